//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (buffered, drained once per frame)
//! - Frame pacing (fixed-step accumulator, native deadline sleeping)

pub mod input;
pub mod pacing;

pub use input::{FrameInput, InputEvent, InputQueue};
pub use pacing::{FpsCounter, FramePacer};

#[cfg(not(target_arch = "wasm32"))]
pub use pacing::FrameClock;

use crate::sim::{GameEvent, GameState, tick};

/// One loop iteration: drain the input queue and tick once.
///
/// The tick always runs, quit included; callers stop after this iteration
/// when the returned frame input asks to quit.
pub fn step(state: &mut GameState, input: &mut InputQueue) -> (Vec<GameEvent>, FrameInput) {
    let (tick_input, frame) = input.next_tick();
    let events = tick(state, &tick_input);
    log_events(&events);
    (events, frame)
}

/// Forward tick events to the log. Crashes at info, the rest at debug.
pub fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::Crashed { cause, score } => {
                log::info!("Crashed into {cause:?} with score {score}, restarting");
            }
            GameEvent::Scored { score } => log::debug!("Score {score}"),
            GameEvent::SpeedUp { velocity } => log::debug!("Pipes speed up to {velocity}"),
            GameEvent::BillboardSpawned => log::debug!("Billboard spawned"),
            GameEvent::BillboardRetired => log::debug!("Billboard retired"),
            GameEvent::Flap => log::trace!("Flap"),
        }
    }
}
