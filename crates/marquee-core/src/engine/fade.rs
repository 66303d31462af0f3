//! L4 Atomic Layer: Edge fade mask
//!
//! Builds a left/right opacity gradient across the viewport and decides per
//! frame whether it applies.

use super::timing::lerp;

/// One stop of the fade gradient, position normalized across the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f64,
    pub opacity: f64,
}

/// Transparent → opaque → opaque → transparent across the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeGradient {
    start_fraction: f64,
    end_fraction: f64,
}

impl FadeGradient {
    pub fn stops(&self) -> [GradientStop; 4] {
        [
            GradientStop {
                position: 0.0,
                opacity: 0.0,
            },
            GradientStop {
                position: self.start_fraction,
                opacity: 1.0,
            },
            GradientStop {
                position: 1.0 - self.end_fraction,
                opacity: 1.0,
            },
            GradientStop {
                position: 1.0,
                opacity: 0.0,
            },
        ]
    }

    /// Opacity at normalized position `t` in [0, 1]
    ///
    /// Interpolates linearly between neighbouring stops; zero-width segments
    /// (an edge with no fade) are skipped.
    pub fn opacity_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let stops = self.stops();
        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if b.position > a.position && t <= b.position {
                let local = (t - a.position) / (b.position - a.position);
                return lerp(a.opacity, b.opacity, local);
            }
        }
        1.0
    }
}

/// Gradient for the configured fractions, or `None` when neither edge fades
pub fn build_gradient(fade_start_fraction: f64, fade_end_fraction: f64) -> Option<FadeGradient> {
    if fade_start_fraction == 0.0 && fade_end_fraction == 0.0 {
        return None;
    }
    Some(FadeGradient {
        start_fraction: fade_start_fraction,
        end_fraction: fade_end_fraction,
    })
}

/// Mask applied to a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeMask {
    Opaque,
    Gradient(FadeGradient),
}

impl FadeMask {
    /// Per-frame visibility rule
    ///
    /// Fading is dropped when the text fits the viewport, or when it should
    /// only show while scrolling and nothing is scrolling.
    pub fn resolve(
        gradient: Option<FadeGradient>,
        fade_only_when_scrolling: bool,
        is_animating: bool,
        text_fits: bool,
    ) -> Self {
        if text_fits || (fade_only_when_scrolling && !is_animating) {
            return FadeMask::Opaque;
        }
        match gradient {
            Some(gradient) => FadeMask::Gradient(gradient),
            None => FadeMask::Opaque,
        }
    }

    pub fn opacity_at(&self, t: f64) -> f64 {
        match self {
            FadeMask::Opaque => 1.0,
            FadeMask::Gradient(gradient) => gradient.opacity_at(t),
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, FadeMask::Opaque)
    }
}
