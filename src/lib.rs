//! Flappy Drone - A side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacle streams, scoring)
//! - `renderer`: Draw command composition and WebGPU rendering
//! - `assets`: Sprite dimensions used for layout and collision sizing
//! - `platform`: Input queue and frame pacing
//! - `settings`: Cosmetic preferences

pub mod assets;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetError, Assets, SpriteId};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target frame rate; one simulation tick per frame
    pub const FPS: u32 = 30;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Screen dimensions (pixels, origin top-left, y down)
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Sprite sizes after pre-scaling
    pub const AVATAR_WIDTH: f32 = 90.0;
    pub const AVATAR_HEIGHT: f32 = 70.0;
    pub const PIPE_WIDTH: f32 = 100.0;
    pub const PIPE_HEIGHT: f32 = 500.0;
    pub const CLOUD_WIDTH: f32 = 180.0;
    pub const CLOUD_HEIGHT: f32 = 90.0;
    pub const BILLBOARD_WIDTH: f32 = 700.0;
    pub const BILLBOARD_HEIGHT: f32 = 350.0;
    pub const FLOOR_HEIGHT: f32 = 100.0;

    /// Anything below this line is the ground
    pub const FLOOR_LINE: f32 = SCREEN_HEIGHT - FLOOR_HEIGHT;

    /// Avatar defaults
    pub const AVATAR_X: f32 = 50.0;
    pub const AVATAR_START_Y: f32 = 300.0;
    /// Downward acceleration (pixels/frame²)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity forced on jump (negative = up)
    pub const JUMP_VELOCITY: f32 = -7.0;
    /// Tilt clamp while ascending (degrees)
    pub const MAX_TILT_DEG: f32 = 5.0;

    /// Vertical gap between top and bottom pipe
    pub const PIPE_GAP: f32 = 190.0;
    /// Obstacle velocity at score 0 (pixels/frame)
    pub const BASE_PIPE_VELOCITY: f32 = -5.0;
    /// Extra velocity per difficulty step
    pub const PIPE_VELOCITY_STEP: f32 = -1.0;
    /// Points per difficulty step
    pub const POINTS_PER_SPEEDUP: u32 = 5;
    /// Design-time spawn cadence; spawning is distance based
    pub const PIPE_FREQUENCY_MS: u32 = 1500;
    /// Spawn a new pipe once the newest one is left of this x
    pub const PIPE_SPAWN_X: f32 = SCREEN_WIDTH - 300.0;
    /// Where the first pipe of a run appears
    pub const FIRST_PIPE_X: f32 = SCREEN_WIDTH + 100.0;
    /// Gap height (top pipe bottom edge) range, inclusive
    pub const GAP_HEIGHT_MIN: i32 = 100;
    pub const GAP_HEIGHT_MAX: i32 = 400;

    /// Decorations
    pub const CLOUD_COUNT: usize = 5;
    pub const CLOUD_MIN_SPEED: f32 = -1.0;
    pub const CLOUD_MAX_SPEED: f32 = -0.5;
    /// Clouds start above this margin over the floor
    pub const CLOUD_SPAWN_MARGIN: f32 = 100.0;
    /// Frames before the first billboard of a run, inclusive range
    pub const FIRST_BILLBOARD_DELAY: (u32, u32) = (100, 200);
    /// Frames between later billboards, inclusive range
    pub const BILLBOARD_INTERVAL: (u32, u32) = (500, 1000);
}
