//! Pipe pairs scrolling toward the drone

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, hits_pipe_pair};
use crate::consts::*;

/// A top/bottom pipe pair separated by a fixed gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Bottom edge of the top pipe (top of the gap)
    pub height: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, height: f32) -> Self {
        Self {
            x,
            height,
            passed: false,
        }
    }

    /// Pipe with a gap height drawn uniformly from the allowed range
    pub fn random<R: Rng>(x: f32, rng: &mut R) -> Self {
        let height = rng.random_range(GAP_HEIGHT_MIN..=GAP_HEIGHT_MAX) as f32;
        Self::new(x, height)
    }

    /// Top of the bottom pipe
    #[inline]
    pub fn bottom_y(&self) -> f32 {
        self.height + PIPE_GAP
    }

    /// Top pipe extends upward off screen from the gap
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, self.height - PIPE_HEIGHT, PIPE_WIDTH, PIPE_HEIGHT)
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(self.x, self.bottom_y(), PIPE_WIDTH, PIPE_HEIGHT)
    }

    pub fn collides(&self, avatar: &Rect) -> bool {
        hits_pipe_pair(avatar, &self.top_rect(), &self.bottom_rect())
    }

    /// Fully scrolled past the left screen edge
    pub fn is_offscreen(&self) -> bool {
        self.x + PIPE_WIDTH < 0.0
    }
}

/// Ordered pipe sequence, oldest first (so descending x is reversed order)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleStream {
    pub pipes: Vec<Pipe>,
}

impl ObstacleStream {
    /// Fresh stream with a single pipe waiting just off the right edge
    pub fn seeded<R: Rng>(rng: &mut R) -> Self {
        Self {
            pipes: vec![Pipe::random(FIRST_PIPE_X, rng)],
        }
    }

    /// Advance every pipe, retire off-screen ones, score and spawn.
    ///
    /// Returns how many pipes the avatar passed this frame.
    pub fn advance<R: Rng>(&mut self, velocity: f32, avatar_x: f32, rng: &mut R) -> u32 {
        for pipe in &mut self.pipes {
            pipe.x += velocity;
        }

        // Separate pass so a removal never skips its neighbour
        self.pipes.retain(|p| !p.is_offscreen());

        let mut passed = 0;
        for pipe in &mut self.pipes {
            if !pipe.passed && pipe.x < avatar_x {
                pipe.passed = true;
                passed += 1;
            }
        }

        if self.needs_spawn() {
            self.pipes.push(Pipe::random(SCREEN_WIDTH, rng));
        }

        passed
    }

    /// Newest pipe has scrolled far enough in (or the stream ran dry)
    pub fn needs_spawn(&self) -> bool {
        self.pipes.last().is_none_or(|p| p.x < PIPE_SPAWN_X)
    }

    /// True if any pipe overlaps the avatar box
    pub fn collides(&self, avatar: &Rect) -> bool {
        self.pipes.iter().any(|p| p.collides(avatar))
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }
}
