//! L4 Atomic Layer: Frame layout
//!
//! Computes where the copies of the text land for a given offset. With the
//! offset confined to `[0, text_width + blank_space]`, two copies one period
//! apart always cover the viewport, so a third is never needed.

use crate::metrics::TextMetrics;

/// Size of the visible area, in the same units as [`TextMetrics`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left position of one text copy relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPosition {
    pub x: f64,
    pub y: f64,
}

/// Draw positions for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub positions: Vec<DrawPosition>,
    /// Drawing must be clipped to the viewport rectangle
    pub clip: bool,
}

/// The text fits without scrolling
#[inline]
pub fn text_fits(metrics: &TextMetrics, viewport: &Viewport) -> bool {
    metrics.width < viewport.width
}

/// Lay out the copies of the text for `offset`
pub fn layout(
    offset: f64,
    metrics: &TextMetrics,
    viewport: &Viewport,
    blank_space: f64,
    start_padding: f64,
) -> FrameLayout {
    let y = (viewport.height - metrics.height) / 2.0;

    if text_fits(metrics, viewport) {
        return FrameLayout {
            positions: vec![DrawPosition { x: 0.0, y }],
            clip: false,
        };
    }

    let leading = start_padding + offset;
    FrameLayout {
        positions: vec![
            DrawPosition { x: leading, y },
            DrawPosition {
                x: leading - metrics.width - blank_space,
                y,
            },
        ],
        clip: true,
    }
}
