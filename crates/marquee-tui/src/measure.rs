//! Terminal text measurement: one cell per column, one row per line

use marquee_core::config::TextStyle;
use marquee_core::metrics::{TextMeasurer, TextMetrics};
use unicode_width::UnicodeWidthStr;

/// Measures text in terminal cells using display width
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWidthMeasurer;

impl TextMeasurer for UnicodeWidthMeasurer {
    fn measure(&self, text: &str, _style: &TextStyle) -> TextMetrics {
        // Bold and italic do not change cell width
        TextMetrics::new(text.width() as f64, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        let metrics = UnicodeWidthMeasurer.measure("hello", &TextStyle::default());
        assert_eq!(metrics, TextMetrics::new(5.0, 1.0));
    }

    #[test]
    fn test_wide_chars_take_two_cells() {
        let metrics = UnicodeWidthMeasurer.measure("日本", &TextStyle::default());
        assert_eq!(metrics.width, 4.0);
    }
}
