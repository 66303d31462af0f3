//! L3 Molecular Layer: Scroll animator
//!
//! Advances linear progress over one cycle, shapes it through the easing
//! curve, and maps the result onto a horizontal offset in
//! `[0, text_width + blank_space]`. It reports when a leg reaches its far
//! endpoint and otherwise leaves sequencing to the round controller.

use std::time::Duration;

use super::easing::EasingType;
use super::timing::{fraction_of, lerp};

/// Which way linear progress is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunDirection {
    /// Progress runs 0 → 1
    Forward,
    /// Progress runs 1 → 0
    Reverse,
}

impl RunDirection {
    pub fn flipped(self) -> Self {
        match self {
            RunDirection::Forward => RunDirection::Reverse,
            RunDirection::Reverse => RunDirection::Forward,
        }
    }
}

/// Emitted once when a leg reaches its endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub direction: RunDirection,
    /// Part of the tick that fell after the endpoint
    pub overshoot: Duration,
}

/// Drives the offset of the text over one cycle
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    cycle: Duration,
    /// `text_width + blank_space`
    extent: f64,
    easing: EasingType,
    /// Swap the offset mapping so text travels the other way
    reverse: bool,
    progress: f64,
    direction: RunDirection,
    running: bool,
}

impl ScrollAnimator {
    pub fn new(cycle: Duration, extent: f64, easing: EasingType, reverse: bool) -> Self {
        Self {
            cycle,
            extent,
            easing,
            reverse,
            progress: 0.0,
            direction: RunDirection::Forward,
            running: false,
        }
    }

    /// Begin a forward leg at `from` (normally 0)
    pub fn start(&mut self, from: f64) {
        self.progress = from.clamp(0.0, 1.0);
        self.direction = RunDirection::Forward;
        self.running = true;
    }

    /// Begin a reverse leg at `value` (normally 1), heading back to 0
    pub fn reverse_from(&mut self, value: f64) {
        self.progress = value.clamp(0.0, 1.0);
        self.direction = RunDirection::Reverse;
        self.running = true;
    }

    /// Advance by `elapsed` real time
    ///
    /// Returns a completion when the leg reaches its endpoint, carrying the
    /// time past the endpoint so the caller can hand it to the next leg. At
    /// most one completion is reported per call.
    pub fn tick(&mut self, elapsed: Duration) -> Option<Completion> {
        if !self.running {
            return None;
        }

        let remaining = match self.direction {
            RunDirection::Forward => 1.0 - self.progress,
            RunDirection::Reverse => self.progress,
        };
        let delta = fraction_of(elapsed, self.cycle);
        let done = match self.direction {
            RunDirection::Forward => {
                self.progress = (self.progress + delta).min(1.0);
                self.progress >= 1.0
            }
            RunDirection::Reverse => {
                self.progress = (self.progress - delta).max(0.0);
                self.progress <= 0.0
            }
        };

        if done {
            self.running = false;
            // A zero-length cycle ends the moment it starts
            let overshoot = if self.cycle.is_zero() {
                Duration::ZERO
            } else {
                elapsed.saturating_sub(self.cycle.mul_f64(remaining.clamp(0.0, 1.0)))
            };
            Some(Completion {
                direction: self.direction,
                overshoot,
            })
        } else {
            None
        }
    }

    /// Stop advancing, keeping the current offset
    pub fn freeze(&mut self) {
        self.running = false;
    }

    /// Return to the resting position without running
    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.direction = RunDirection::Forward;
        self.running = false;
    }

    /// Swap cycle geometry, keeping normalized progress
    pub fn set_cycle(&mut self, cycle: Duration, extent: f64) {
        self.cycle = cycle;
        self.extent = extent;
    }

    /// Progress after the easing curve
    #[inline]
    pub fn shaped(&self) -> f64 {
        self.easing.apply(self.progress)
    }

    /// Horizontal text offset for the current frame
    ///
    /// Normal mapping runs from `extent` down to 0 as shaped progress goes
    /// 0 → 1; the reversed mapping runs from 0 up to `extent`.
    pub fn current_offset(&self) -> f64 {
        let shaped = self.shaped();
        if self.reverse {
            lerp(0.0, self.extent, shaped)
        } else {
            lerp(self.extent, 0.0, shaped)
        }
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[inline]
    pub fn direction(&self) -> RunDirection {
        self.direction
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn cycle(&self) -> Duration {
        self.cycle
    }
}
