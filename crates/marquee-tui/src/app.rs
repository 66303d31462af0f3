use std::time::{Duration, Instant};

use marquee_core::{Marquee, MarqueeConfig, MarqueeEvent, MarqueeOptions, Phase};

use crate::input::Action;
use crate::measure::UnicodeWidthMeasurer;
use crate::theme::Theme;

/// Velocity multiplier for one speed step
const SPEED_STEP: f64 = 1.25;

pub struct App {
    pub marquee: Marquee,
    pub theme: Theme,
    /// Transient message shown in the status bar
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: MarqueeConfig, theme: Theme, now: Instant) -> marquee_core::Result<Self> {
        let marquee = Marquee::on_create(config, Box::new(UnicodeWidthMeasurer), now)?;
        Ok(Self {
            marquee,
            theme,
            status_message: None,
            should_quit: false,
        })
    }

    /// Advance the marquee and surface notable events
    pub fn tick(&mut self, now: Instant) -> Vec<MarqueeEvent> {
        let events = self.marquee.tick(now);
        self.note_events(&events);
        events
    }

    /// How long the main loop may sleep before the marquee needs attention
    pub fn until_wakeup(&self, now: Instant) -> Option<Duration> {
        self.marquee
            .next_wakeup()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleRunning => {
                let events = if self.marquee.phase() == Phase::Stopped {
                    self.marquee.restart(now)
                } else {
                    self.marquee.stop()
                };
                self.note_events(&events);
            }
            Action::FinishRound => {
                let events = self.marquee.finish_round();
                self.status_message = Some("Stopping after this round".to_string());
                self.note_events(&events);
            }
            Action::Restart => {
                self.status_message = None;
                let events = self.marquee.restart(now);
                self.note_events(&events);
            }
            Action::ToggleReverse => self.reconfigure(now, |o| o.reverse = !o.reverse),
            Action::ToggleBounce => self.reconfigure(now, |o| o.bounce = !o.bounce),
            Action::SpeedUp => self.reconfigure(now, |o| o.velocity *= SPEED_STEP),
            Action::SlowDown => self.reconfigure(now, |o| o.velocity /= SPEED_STEP),
            Action::None => {}
        }
    }

    /// Edit the current options and push them through validation
    fn reconfigure(&mut self, now: Instant, edit: impl FnOnce(&mut MarqueeOptions)) {
        let mut options = self.marquee.config().to_options();
        edit(&mut options);

        let result = MarqueeConfig::new(options)
            .and_then(|config| self.marquee.on_config_changed(config, now));
        match result {
            Ok(_) => self.status_message = None,
            Err(e) => {
                tracing::warn!("Rejected marquee change: {}", e);
                self.status_message = Some(e.to_string());
            }
        }
    }

    fn note_events(&mut self, events: &[MarqueeEvent]) {
        for event in events {
            match event {
                MarqueeEvent::Done => {
                    tracing::info!(rounds = self.marquee.rounds_completed(), "Marquee done");
                    self.status_message = Some("Done. Press space to run again".to_string());
                }
                MarqueeEvent::Stopped => {
                    self.status_message = Some("Stopped. Press space to run again".to_string());
                }
                MarqueeEvent::Started => self.status_message = None,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(options: MarqueeOptions, now: Instant) -> App {
        App::new(MarqueeConfig::new(options).unwrap(), Theme::default(), now).unwrap()
    }

    #[test]
    fn test_toggle_running() {
        let t0 = Instant::now();
        let mut app = app(MarqueeOptions::default(), t0);
        assert!(app.marquee.is_animating());

        app.handle_action(Action::ToggleRunning, t0);
        assert_eq!(app.marquee.phase(), Phase::Stopped);
        assert!(app.status_message.is_some());

        app.handle_action(Action::ToggleRunning, t0);
        assert_eq!(app.marquee.phase(), Phase::Running);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_speed_change_keeps_running() {
        let t0 = Instant::now();
        let mut app = app(MarqueeOptions::default(), t0);
        let before = app.marquee.config().velocity();
        app.handle_action(Action::SpeedUp, t0);
        assert!((app.marquee.config().velocity() - before * SPEED_STEP).abs() < 1e-9);
        assert_eq!(app.marquee.phase(), Phase::Running);
    }

    #[test]
    fn test_toggle_bounce_restarts() {
        let t0 = Instant::now();
        let mut app = app(MarqueeOptions::default(), t0);
        app.handle_action(Action::ToggleBounce, t0);
        assert!(app.marquee.config().bounce());
        assert_eq!(app.marquee.rounds_completed(), 0);
    }

    #[test]
    fn test_done_sets_status() {
        let t0 = Instant::now();
        let mut app = app(
            MarqueeOptions {
                text: "abc".to_string(),
                velocity: 10.0,
                blank_space: 7.0,
                number_of_rounds: Some(1),
                ..Default::default()
            },
            t0,
        );
        let events = app.tick(t0 + Duration::from_secs(1));
        assert!(events.contains(&MarqueeEvent::Done));
        assert!(app.status_message.as_deref().unwrap().starts_with("Done"));
    }

    #[test]
    fn test_until_wakeup_during_delay() {
        let t0 = Instant::now();
        let app = app(
            MarqueeOptions {
                start_after_ms: 800,
                ..Default::default()
            },
            t0,
        );
        assert_eq!(
            app.until_wakeup(t0 + Duration::from_millis(300)),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn test_quit() {
        let t0 = Instant::now();
        let mut app = app(MarqueeOptions::default(), t0);
        app.handle_action(Action::Quit, t0);
        assert!(app.should_quit);
    }
}
