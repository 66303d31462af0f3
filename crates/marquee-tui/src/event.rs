use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    frame_interval: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, frame_interval: Duration) -> Self {
        Self {
            tick_rate,
            frame_interval,
        }
    }

    /// Poll timeout for the next loop iteration
    ///
    /// Frame rate while scrolling, the pending timer while delaying or
    /// pausing, and the idle tick rate otherwise.
    pub fn timeout(&self, needs_frame: bool, until_wakeup: Option<Duration>) -> Duration {
        if needs_frame {
            self.frame_interval
        } else if let Some(wait) = until_wakeup {
            wait.min(self.tick_rate)
        } else {
            self.tick_rate
        }
    }

    /// Poll for the next event, waiting at most `timeout`
    pub fn next(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Poll timed out; time to advance the marquee
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_selection() {
        let handler = EventHandler::new(Duration::from_millis(250), Duration::from_millis(16));
        assert_eq!(handler.timeout(true, None), Duration::from_millis(16));
        assert_eq!(
            handler.timeout(false, Some(Duration::from_millis(40))),
            Duration::from_millis(40)
        );
        assert_eq!(
            handler.timeout(false, Some(Duration::from_secs(3))),
            Duration::from_millis(250)
        );
        assert_eq!(handler.timeout(false, None), Duration::from_millis(250));
    }
}
