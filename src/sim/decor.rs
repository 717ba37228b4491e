//! Background decorations: drifting clouds and the occasional billboard
//!
//! Decorations never collide with anything. They only share the random
//! stream with gameplay, so they are simulated alongside it for determinism.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A cloud drifting left at its own pace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    /// Assigned once when the pool is created
    pub velocity: f32,
}

impl Cloud {
    /// Cloud scattered somewhere on screen, clear of the floor
    pub fn scattered<R: Rng>(rng: &mut R) -> Self {
        let x = rng.random_range(0..=SCREEN_WIDTH as i32) as f32;
        let max_y = (FLOOR_LINE - CLOUD_SPAWN_MARGIN) as i32;
        let y = rng.random_range(0..=max_y) as f32;
        let velocity = rng.random_range(CLOUD_MIN_SPEED..CLOUD_MAX_SPEED);
        Self { x, y, velocity }
    }

    pub fn is_offscreen(&self) -> bool {
        self.x + CLOUD_WIDTH < 0.0
    }

    /// Wrap back to the right edge at a new height; speed is kept
    pub fn recycle<R: Rng>(&mut self, rng: &mut R) {
        self.x = SCREEN_WIDTH;
        self.y = rng.random_range(0..=FLOOR_LINE as i32) as f32;
    }
}

/// Fixed pool of clouds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudLayer {
    pub clouds: Vec<Cloud>,
}

impl CloudLayer {
    pub fn scattered<R: Rng>(rng: &mut R) -> Self {
        Self {
            clouds: (0..CLOUD_COUNT).map(|_| Cloud::scattered(rng)).collect(),
        }
    }

    /// Drift every cloud; returns the number recycled this frame
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> usize {
        let mut recycled = 0;
        for cloud in &mut self.clouds {
            cloud.x += cloud.velocity;
            if cloud.is_offscreen() {
                cloud.recycle(rng);
                recycled += 1;
            }
        }
        recycled
    }
}

/// Billboard standing on the floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Billboard {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
}

impl Billboard {
    pub fn new(pipe_velocity: f32) -> Self {
        Self {
            x: SCREEN_WIDTH,
            y: FLOOR_LINE - BILLBOARD_HEIGHT,
            velocity: pipe_velocity / 2.0,
        }
    }

    pub fn is_offscreen(&self) -> bool {
        self.x + BILLBOARD_WIDTH < 0.0
    }
}

/// What happened to the billboard slot during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillboardChange {
    None,
    Spawned,
    Retired,
}

/// At most one billboard, spawned when its countdown runs out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillboardSlot {
    pub billboard: Option<Billboard>,
    /// Frames until the next billboard may appear
    pub countdown: u32,
}

impl BillboardSlot {
    /// Empty slot with the short first-appearance countdown
    pub fn fresh<R: Rng>(rng: &mut R) -> Self {
        let (lo, hi) = FIRST_BILLBOARD_DELAY;
        Self {
            billboard: None,
            countdown: rng.random_range(lo..=hi),
        }
    }

    /// Tick the countdown, move and retire the billboard.
    ///
    /// The billboard always travels at half the current pipe velocity, so it
    /// speeds up along with the pipes.
    pub fn advance<R: Rng>(&mut self, pipe_velocity: f32, rng: &mut R) -> BillboardChange {
        let mut change = BillboardChange::None;

        if self.countdown > 0 {
            self.countdown -= 1;
        } else if self.billboard.is_none() {
            self.billboard = Some(Billboard::new(pipe_velocity));
            change = BillboardChange::Spawned;
        }

        if let Some(board) = &mut self.billboard {
            board.velocity = pipe_velocity / 2.0;
            board.x += board.velocity;
            if board.is_offscreen() {
                self.billboard = None;
                let (lo, hi) = BILLBOARD_INTERVAL;
                self.countdown = rng.random_range(lo..=hi);
                change = BillboardChange::Retired;
            }
        }

        change
    }

    pub fn is_active(&self) -> bool {
        self.billboard.is_some()
    }
}
