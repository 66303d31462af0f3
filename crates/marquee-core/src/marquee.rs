//! Marquee facade
//!
//! Owns one marquee's config, cached text metrics, and round controller,
//! and exposes the host lifecycle: `on_create`, `on_config_changed`, `tick`,
//! `frame`, and `on_destroy`. Each instance is independent.

use std::time::{Duration, Instant};

use crate::config::{MarqueeConfig, TextStyle};
use crate::engine::{
    build_gradient, cycle_duration, diff, layout, text_fits, ConfigDiff, FadeGradient, FadeMask,
    FrameLayout, MarqueeEvent, Phase, RoundController, RoundSettings, ScrollAnimator, Viewport,
};
use crate::error::Result;
use crate::metrics::{MetricsCache, TextMeasurer, TextMetrics};

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub text: &'a str,
    pub style: &'a TextStyle,
    pub metrics: TextMetrics,
    pub viewport: Viewport,
    pub layout: FrameLayout,
    pub mask: FadeMask,
}

pub struct Marquee {
    config: MarqueeConfig,
    measurer: Box<dyn TextMeasurer>,
    cache: MetricsCache,
    metrics: TextMetrics,
    gradient: Option<FadeGradient>,
    controller: RoundController,
}

impl std::fmt::Debug for Marquee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marquee")
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .field("phase", &self.controller.phase())
            .finish_non_exhaustive()
    }
}

impl Marquee {
    /// Mount a marquee: measure, derive the cycle, and enter the start delay
    pub fn on_create(
        config: MarqueeConfig,
        measurer: Box<dyn TextMeasurer>,
        now: Instant,
    ) -> Result<Self> {
        let mut cache = MetricsCache::new();
        let metrics = cache.get_or_measure(measurer.as_ref(), config.text(), config.style());
        let animator = build_animator(&config, &metrics)?;
        let mut controller = RoundController::new(animator, RoundSettings::from_config(&config));
        controller.mount(now);

        tracing::debug!(
            width = metrics.width,
            cycle_ms = controller.animator().cycle().as_millis() as u64,
            "Marquee created"
        );

        Ok(Self {
            gradient: build_gradient(config.fade_start_fraction(), config.fade_end_fraction()),
            config,
            measurer,
            cache,
            metrics,
            controller,
        })
    }

    /// Replace the config, rebuilding only what the change invalidates
    ///
    /// On error the previous config stays in effect.
    pub fn on_config_changed(&mut self, config: MarqueeConfig, now: Instant) -> Result<ConfigDiff> {
        if !self.controller.is_alive() {
            return Ok(ConfigDiff::default());
        }

        let changes = diff(&self.config, &config);
        tracing::debug!(?changes, "Marquee config changed");

        let metrics = if changes.needs_remeasure {
            self.cache
                .get_or_measure(self.measurer.as_ref(), config.text(), config.style())
        } else {
            self.metrics
        };

        if changes.needs_animation_rebuild {
            let animator = build_animator(&config, &metrics)?;
            self.controller
                .rebuild(animator, RoundSettings::from_config(&config), now);
        } else if changes.needs_duration_recalc {
            let cycle = cycle_duration(config.velocity(), metrics.width, config.blank_space())?;
            self.controller
                .animator_mut()
                .set_cycle(cycle, metrics.width + config.blank_space());
        }

        self.metrics = metrics;
        self.gradient = build_gradient(config.fade_start_fraction(), config.fade_end_fraction());
        self.config = config;
        Ok(changes)
    }

    /// Teardown. Later calls are no-ops.
    pub fn on_destroy(&mut self) {
        self.controller.destroy();
    }

    /// Advance to `now` and return what happened
    pub fn tick(&mut self, now: Instant) -> Vec<MarqueeEvent> {
        self.controller.tick(now);
        let events = self.controller.drain_events();
        if !events.is_empty() {
            tracing::trace!(?events, "Marquee events");
        }
        events
    }

    /// Draw parameters for the current state
    pub fn frame(&self, viewport: Viewport) -> Frame<'_> {
        let fits = text_fits(&self.metrics, &viewport);
        Frame {
            text: self.config.text(),
            style: self.config.style(),
            metrics: self.metrics,
            viewport,
            layout: layout(
                self.controller.current_offset(),
                &self.metrics,
                &viewport,
                self.config.blank_space(),
                self.config.start_padding(),
            ),
            mask: FadeMask::resolve(
                self.gradient,
                self.config.fade_only_when_scrolling(),
                self.controller.is_animating(),
                fits,
            ),
        }
    }

    /// Halt now, freezing the text in place
    pub fn stop(&mut self) -> Vec<MarqueeEvent> {
        self.controller.stop();
        self.controller.drain_events()
    }

    /// Stop once the current round completes
    pub fn finish_round(&mut self) -> Vec<MarqueeEvent> {
        self.controller.finish_round();
        self.controller.drain_events()
    }

    /// Reset the round count and start over from the start delay
    pub fn restart(&mut self, now: Instant) -> Vec<MarqueeEvent> {
        self.controller.restart(now);
        self.controller.drain_events()
    }

    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    pub fn metrics(&self) -> TextMetrics {
        self.metrics
    }

    pub fn cycle_duration(&self) -> Duration {
        self.controller.animator().cycle()
    }

    pub fn offset(&self) -> f64 {
        self.controller.current_offset()
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    pub fn rounds_completed(&self) -> u32 {
        self.controller.rounds_completed()
    }

    pub fn needs_frame(&self) -> bool {
        self.controller.needs_frame()
    }

    pub fn next_wakeup(&self) -> Option<Instant> {
        self.controller.next_wakeup()
    }
}

fn build_animator(config: &MarqueeConfig, metrics: &TextMetrics) -> Result<ScrollAnimator> {
    let cycle = cycle_duration(config.velocity(), metrics.width, config.blank_space())?;
    Ok(ScrollAnimator::new(
        cycle,
        metrics.width + config.blank_space(),
        config.easing(),
        config.reverse(),
    ))
}
