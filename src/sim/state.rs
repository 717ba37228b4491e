//! Game state and core simulation types
//!
//! Everything the loop mutates lives in [`GameState`]. The RNG is part of the
//! state so a run is fully reproducible from its seed.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::decor::{BillboardSlot, CloudLayer};
use super::obstacles::ObstacleStream;
use crate::consts::*;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Flew above the top of the screen
    Ceiling,
    /// Dropped below the floor line
    Floor,
    /// Hit a pipe
    Pipe,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Jump impulse applied
    Flap,
    /// Avatar cleared a pipe; carries the new score
    Scored { score: u32 },
    /// Difficulty step reached; carries the new pipe velocity
    SpeedUp { velocity: f32 },
    BillboardSpawned,
    BillboardRetired,
    /// Run ended and the state was re-seeded
    Crashed { cause: CrashCause, score: u32 },
}

/// Obstacle velocity for a given score (more negative = faster)
pub fn pipe_velocity_for_score(score: u32) -> f32 {
    BASE_PIPE_VELOCITY + PIPE_VELOCITY_STEP * (score / POINTS_PER_SPEEDUP) as f32
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Shared random stream for gaps, clouds and billboard timing
    pub rng: Pcg32,
    pub avatar: Avatar,
    pub obstacles: ObstacleStream,
    pub clouds: CloudLayer,
    pub billboard: BillboardSlot,
    pub score: u32,
    /// Current obstacle velocity (pixels/frame, negative)
    pub pipe_velocity: f32,
    /// Frames simulated since creation (not reset between runs)
    pub frame: u64,
    /// Runs started since creation, counting the first
    pub run: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(seed, Pcg32::seed_from_u64(seed))
    }

    /// Create a state around an existing random stream
    pub fn with_rng(seed: u64, mut rng: Pcg32) -> Self {
        let obstacles = ObstacleStream::seeded(&mut rng);
        let clouds = CloudLayer::scattered(&mut rng);
        let billboard = BillboardSlot::fresh(&mut rng);
        Self {
            seed,
            rng,
            avatar: Avatar::default(),
            obstacles,
            clouds,
            billboard,
            score: 0,
            pipe_velocity: BASE_PIPE_VELOCITY,
            frame: 0,
            run: 1,
        }
    }

    /// Re-seed every gameplay entity for a fresh run.
    ///
    /// The random stream continues, so consecutive runs differ.
    pub fn reset(&mut self) {
        self.avatar = Avatar::default();
        self.obstacles = ObstacleStream::seeded(&mut self.rng);
        self.score = 0;
        self.pipe_velocity = BASE_PIPE_VELOCITY;
        self.clouds = CloudLayer::scattered(&mut self.rng);
        self.billboard = BillboardSlot::fresh(&mut self.rng);
        self.run += 1;
    }

    /// Terminal condition for the current frame, if any
    pub fn crash_cause(&self) -> Option<CrashCause> {
        if self.avatar.y < 0.0 {
            Some(CrashCause::Ceiling)
        } else if self.avatar.y > FLOOR_LINE {
            Some(CrashCause::Floor)
        } else if self.obstacles.collides(&self.avatar.rect()) {
            Some(CrashCause::Pipe)
        } else {
            None
        }
    }

    /// Matches the state right after a reset
    pub fn is_fresh_run(&self) -> bool {
        self.score == 0
            && self.avatar == Avatar::default()
            && self.obstacles.len() == 1
            && !self.obstacles.pipes[0].passed
            && self.pipe_velocity == BASE_PIPE_VELOCITY
            && !self.billboard.is_active()
            && (FIRST_BILLBOARD_DELAY.0..=FIRST_BILLBOARD_DELAY.1).contains(&self.billboard.countdown)
            && self.clouds.clouds.len() == CLOUD_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_fresh() {
        let state = GameState::new(12345);
        assert!(state.is_fresh_run());
        assert_eq!(state.clouds.clouds.len(), CLOUD_COUNT);
        assert_eq!(state.run, 1);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(99);
        let b = GameState::new(99);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.clouds, b.clouds);
        assert_eq!(a.billboard, b.billboard);
    }

    #[test]
    fn test_reset_restores_fresh_run() {
        let mut state = GameState::new(5);
        state.score = 17;
        state.pipe_velocity = pipe_velocity_for_score(17);
        state.avatar.y = 10.0;
        state.avatar.velocity = 4.0;
        state.obstacles.pipes[0].passed = true;
        state.obstacles.pipes.push(super::super::obstacles::Pipe::new(400.0, 200.0));
        state.billboard.billboard = Some(super::super::decor::Billboard::new(-5.0));
        state.billboard.countdown = BILLBOARD_INTERVAL.1;
        let old_clouds = state.clouds.clone();

        state.reset();
        assert!(state.is_fresh_run());
        assert_eq!(state.run, 2);

        assert_ne!(state.clouds, old_clouds);
        assert_eq!(state.clouds.clouds.len(), CLOUD_COUNT);
        for cloud in &state.clouds.clouds {
            assert!((CLOUD_MIN_SPEED..CLOUD_MAX_SPEED).contains(&cloud.velocity));
        }
        let (lo, hi) = FIRST_BILLBOARD_DELAY;
        assert!((lo..=hi).contains(&state.billboard.countdown));
    }

    #[test]
    fn test_pipe_velocity_steps_every_five_points() {
        assert_eq!(pipe_velocity_for_score(0), -5.0);
        assert_eq!(pipe_velocity_for_score(4), -5.0);
        assert_eq!(pipe_velocity_for_score(5), -6.0);
        assert_eq!(pipe_velocity_for_score(9), -6.0);
        assert_eq!(pipe_velocity_for_score(10), -7.0);
        assert_eq!(pipe_velocity_for_score(27), -10.0);
    }

    #[test]
    fn test_crash_causes() {
        let mut state = GameState::new(1);
        // Push the seeded pipe far away so only bounds matter
        state.obstacles.pipes[0].x = 1000.0;
        assert_eq!(state.crash_cause(), None);

        state.avatar.y = -0.5;
        assert_eq!(state.crash_cause(), Some(CrashCause::Ceiling));

        state.avatar.y = FLOOR_LINE;
        assert_eq!(state.crash_cause(), None);
        state.avatar.y = FLOOR_LINE + 1.0;
        assert_eq!(state.crash_cause(), Some(CrashCause::Floor));

        state.avatar.y = 300.0;
        state.obstacles.pipes[0].x = AVATAR_X;
        state.obstacles.pipes[0].height = 400.0;
        assert_eq!(state.crash_cause(), Some(CrashCause::Pipe));
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let state = GameState::new(2024);
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.obstacles, state.obstacles);
        assert_eq!(restored.rng, state.rng);
    }
}
