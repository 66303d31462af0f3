//! Scrolling engine
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing curves
//! - `timing` - Cycle duration and interpolation
//! - `fade` - Edge fade gradient and visibility rule
//! - `frame` - Placement of the text copies for one frame
//!
//! ## L3 Molecular Layer
//! - `animator` - Progress → offset over one cycle
//!
//! ## L2 Organism Layer
//! - `controller` - Delay / run / pause / round-limit state machine
//! - `diff` - What a config replacement invalidates
//!
//! # Usage
//!
//! ```ignore
//! use std::time::{Duration, Instant};
//! use marquee_core::engine::{cycle_duration, RoundController, RoundSettings, ScrollAnimator};
//!
//! let cycle = cycle_duration(100.0, 400.0, 100.0)?; // 5s
//! let animator = ScrollAnimator::new(cycle, 500.0, EasingType::Linear, false);
//! let mut controller = RoundController::new(animator, RoundSettings::from_config(&config));
//!
//! controller.mount(Instant::now());
//! // each frame:
//! controller.tick(Instant::now());
//! let offset = controller.current_offset();
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod fade;
pub mod frame;
pub mod timing;

// L3 Molecular Layer
pub mod animator;

// L2 Organism Layer
pub mod controller;
pub mod diff;

pub use animator::{Completion, RunDirection, ScrollAnimator};
pub use controller::{MarqueeEvent, Phase, RoundController, RoundSettings};
pub use diff::{diff, ConfigDiff};
pub use easing::EasingType;
pub use fade::{build_gradient, FadeGradient, FadeMask, GradientStop};
pub use frame::{layout, text_fits, DrawPosition, FrameLayout, Viewport};
pub use timing::cycle_duration;
