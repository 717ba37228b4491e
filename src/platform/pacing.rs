//! Frame pacing
//!
//! The simulation always advances in whole `SIM_DT` steps. [`FramePacer`]
//! turns variable wall-clock deltas into a step count; [`FrameClock`] sleeps
//! to fixed deadlines on native.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Fixed-step accumulator
#[derive(Debug, Clone)]
pub struct FramePacer {
    accumulator: f32,
    step: f32,
    max_steps: u32,
    /// Total steps handed out
    pub steps_taken: u64,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FramePacer {
    pub fn new(step: f32, max_steps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_steps,
            steps_taken: 0,
        }
    }

    /// Feed elapsed seconds, get the number of steps to run now.
    ///
    /// Backlog beyond `max_steps` is dropped so a stalled tab does not
    /// fast-forward the game when it comes back.
    pub fn steps(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps {
            self.accumulator = self.accumulator.min(self.step);
        }
        self.steps_taken += u64::from(steps);
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Smoothed frames-per-second estimate
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    /// Record one rendered frame; refreshes twice a second
    pub fn frame(&mut self, dt: f32) {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed >= 0.5 {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FrameClock;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{Duration, Instant};

    /// Deadline-based sleeper for the native driver
    #[derive(Debug)]
    pub struct FrameClock {
        period: Duration,
        next: Instant,
    }

    impl FrameClock {
        pub fn new(fps: u32) -> Self {
            Self {
                period: Duration::from_secs(1) / fps.max(1),
                next: Instant::now(),
            }
        }

        pub fn period(&self) -> Duration {
            self.period
        }

        /// Sleep until the next frame deadline. Returns how late we were.
        pub fn wait(&mut self) -> Duration {
            self.next += self.period;
            let now = Instant::now();
            if self.next > now {
                std::thread::sleep(self.next - now);
                Duration::ZERO
            } else {
                // Running behind: don't try to catch up
                let late = now - self.next;
                self.next = now;
                late
            }
        }
    }
}
