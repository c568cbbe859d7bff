//! Animation time for a single view.
//!
//! The clock only moves while running. Starting it always rewinds to zero;
//! there is no resume-in-place.

use serde::Deserialize;

/// Per-frame step used by the bundled pages.
pub const DEFAULT_STEP: f64 = 0.016;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClockStep {
    /// Advance by a constant amount per frame regardless of frame timing.
    Fixed(f64),
    /// Advance by the measured frame delta.
    FrameDelta,
}

impl Default for ClockStep {
    fn default() -> Self {
        ClockStep::Fixed(DEFAULT_STEP)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnimationClock {
    time: f64,
    running: bool,
    step: ClockStep,
}

impl AnimationClock {
    pub fn new(step: ClockStep) -> Self {
        Self {
            time: 0.0,
            running: false,
            step,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.time = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Flip between running and stopped. Returns whether it now runs.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
        self.running
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.running = false;
    }

    /// Move time forward by one frame. Returns the new time, or `None` when
    /// stopped.
    pub fn advance(&mut self, frame_delta: f64) -> Option<f64> {
        if !self.running {
            return None;
        }
        let step = match self.step {
            ClockStep::Fixed(step) => step,
            ClockStep::FrameDelta => frame_delta,
        };
        if step.is_finite() && step > 0.0 {
            self.time += step;
        }
        Some(self.time)
    }
}

/// A point sweeping back and forth across `[0, 1]`.
pub fn oscillating_point(time: f64) -> f64 {
    (time.sin() + 1.0) / 2.0
}

/// A step size pulsing between zero and `max`.
pub fn shrinking_epsilon(time: f64, max: f64) -> f64 {
    time.sin().abs() * max
}

/// A subinterval count pulsing between `min` and `min + range`.
pub fn rectangle_count(time: f64, min: usize, range: usize) -> usize {
    (min as f64 + range as f64 * time.sin().abs()).floor() as usize
}
