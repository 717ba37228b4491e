//! Fixed timestep simulation tick
//!
//! Core game loop step that advances the simulation deterministically.

use super::state::{CrashCause, GameEvent, GameState, pipe_velocity_for_score};
use super::decor::BillboardChange;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// At least one jump press since the previous tick
    pub jump: bool,
    /// Demo mode - the autopilot decides when to jump
    pub autopilot: bool,
}

/// Margin the autopilot keeps above the lower gap edge
const AUTOPILOT_CLEARANCE: f32 = 20.0;

/// Advance the game state by one frame.
///
/// Order: avatar physics, obstacles (move, retire, score, spawn), clouds,
/// billboard, terminal check with reset, then difficulty for the next frame.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.frame += 1;

    let jump = input.jump || (input.autopilot && autopilot_wants_jump(state));
    state.avatar.integrate(jump);
    if jump {
        events.push(GameEvent::Flap);
    }

    let passed = state
        .obstacles
        .advance(state.pipe_velocity, state.avatar.x, &mut state.rng);
    for _ in 0..passed {
        state.score += 1;
        events.push(GameEvent::Scored { score: state.score });
    }

    state.clouds.advance(&mut state.rng);

    match state.billboard.advance(state.pipe_velocity, &mut state.rng) {
        BillboardChange::Spawned => events.push(GameEvent::BillboardSpawned),
        BillboardChange::Retired => events.push(GameEvent::BillboardRetired),
        BillboardChange::None => {}
    }

    if let Some(cause) = state.crash_cause() {
        events.push(GameEvent::Crashed {
            cause,
            score: state.score,
        });
        state.reset();
        return events;
    }

    let velocity = pipe_velocity_for_score(state.score);
    if velocity < state.pipe_velocity {
        events.push(GameEvent::SpeedUp { velocity });
    }
    state.pipe_velocity = velocity;

    events
}

/// Demo pilot.
///
/// Flaps when the next frame would sink the drone toward the lower lip of the
/// nearest gap that is still ahead of (or around) it, unless the resulting
/// climb would carry it into the upper pipe.
pub fn autopilot_wants_jump(state: &GameState) -> bool {
    let avatar = &state.avatar;

    let gap_top = state
        .obstacles
        .pipes
        .iter()
        .find(|p| p.x + PIPE_WIDTH > avatar.x)
        .map(|p| p.height)
        .unwrap_or(AVATAR_START_Y - PIPE_GAP / 2.0);

    let lowest_y = (gap_top + PIPE_GAP - AVATAR_HEIGHT).min(FLOOR_LINE) - AUTOPILOT_CLEARANCE;
    let predicted_y = avatar.y + avatar.velocity + GRAVITY;

    predicted_y > lowest_y && avatar.y - jump_rise() >= gap_top
}

/// Total height gained by a single jump before falling again
pub fn jump_rise() -> f32 {
    let mut velocity = JUMP_VELOCITY;
    let mut rise = 0.0;
    while velocity < 0.0 {
        rise -= velocity;
        velocity += GRAVITY;
    }
    rise
}

/// Convenience for drivers: run `frames` ticks with the same input
pub fn run_frames(state: &mut GameState, input: &TickInput, frames: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(tick(state, input));
    }
    events
}

/// Crash events in a batch, in order
pub fn crashes(events: &[GameEvent]) -> impl Iterator<Item = (CrashCause, u32)> + '_ {
    events.iter().filter_map(|e| match *e {
        GameEvent::Crashed { cause, score } => Some((cause, score)),
        _ => None,
    })
}
