//! Text measurement seam
//!
//! The engine never shapes text itself. Hosts supply a [`TextMeasurer`]
//! and the engine caches its answer until the text or style changes.

use crate::config::TextStyle;

/// Measured size of a single line of text, in host length units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

impl TextMetrics {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Measures text for a given style
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Fixed advance per character; handy for hosts with a monospace grid
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    pub advance: f64,
    pub line_height: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance: 1.0,
            line_height: 1.0,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, _style: &TextStyle) -> TextMetrics {
        TextMetrics::new(text.chars().count() as f64 * self.advance, self.line_height)
    }
}

/// Single-entry cache of the last measurement
#[derive(Debug, Clone, Default)]
pub struct MetricsCache {
    entry: Option<(String, TextStyle, TextMetrics)>,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return cached metrics, measuring only when text or style differ
    pub fn get_or_measure(
        &mut self,
        measurer: &dyn TextMeasurer,
        text: &str,
        style: &TextStyle,
    ) -> TextMetrics {
        if let Some((cached_text, cached_style, metrics)) = &self.entry {
            if cached_text == text && cached_style == style {
                return *metrics;
            }
        }

        let metrics = measurer.measure(text, style);
        tracing::debug!(width = metrics.width, height = metrics.height, "Measured marquee text");
        self.entry = Some((text.to_string(), style.clone(), metrics));
        metrics
    }
}
