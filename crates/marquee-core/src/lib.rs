pub mod config;
pub mod engine;
pub mod error;
pub mod marquee;
pub mod metrics;

pub use config::{AppConfig, EasingType, MarqueeConfig, MarqueeOptions, TextStyle};
pub use engine::{MarqueeEvent, Phase, Viewport};
pub use error::{Error, Result};
pub use marquee::{Frame, Marquee};
pub use metrics::{TextMeasurer, TextMetrics};
