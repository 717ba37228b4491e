//! The player's drone

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// The drone. Horizontal position never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity (pixels/frame, positive = down)
    pub velocity: f32,
    /// Display tilt in degrees (counter-clockwise). Not used for collision.
    pub rotation: f32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            x: AVATAR_X,
            y: AVATAR_START_Y,
            velocity: 0.0,
            rotation: 0.0,
        }
    }
}

impl Avatar {
    /// Advance one frame of vertical motion.
    ///
    /// A jump overrides velocity outright; otherwise gravity accumulates.
    pub fn integrate(&mut self, jump: bool) {
        if jump {
            self.velocity = JUMP_VELOCITY;
        } else {
            self.velocity += GRAVITY;
        }
        self.y += self.velocity;
        self.rotation = tilt_for_velocity(self.velocity);
    }

    /// Collision box (unrotated sprite bounds)
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, AVATAR_WIDTH, AVATAR_HEIGHT)
    }
}

/// Nose-up tilt while climbing, level while falling
pub fn tilt_for_velocity(velocity: f32) -> f32 {
    if velocity < 0.0 {
        (velocity * -2.0).min(MAX_TILT_DEG)
    } else {
        0.0
    }
}
