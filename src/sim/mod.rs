//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only, owned by the state
//! - Stable iteration order (pipes by spawn order)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod collision;
pub mod decor;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use avatar::{Avatar, tilt_for_velocity};
pub use collision::{Rect, hits_pipe_pair};
pub use decor::{Billboard, BillboardChange, BillboardSlot, Cloud, CloudLayer};
pub use obstacles::{ObstacleStream, Pipe};
pub use state::{CrashCause, GameEvent, GameState, pipe_velocity_for_score};
pub use tick::{TickInput, autopilot_wants_jump, crashes, jump_rise, run_frames, tick};
