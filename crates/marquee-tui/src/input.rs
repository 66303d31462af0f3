use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleRunning, // Space: stop now, or restart when stopped
    FinishRound,   // 'f': stop after the current round
    Restart,
    ToggleReverse,
    ToggleBounce,
    SpeedUp,
    SlowDown,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char(' '), _) => Action::ToggleRunning,
        (KeyCode::Char('f'), KeyModifiers::NONE) => Action::FinishRound,
        (KeyCode::Char('s'), KeyModifiers::NONE) => Action::Restart,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::ToggleReverse,
        (KeyCode::Char('b'), KeyModifiers::NONE) => Action::ToggleBounce,

        // '+' arrives with SHIFT on most layouts
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), KeyModifiers::NONE) => Action::SpeedUp,
        (KeyCode::Char('-'), KeyModifiers::NONE) => Action::SlowDown,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE)), Action::Quit);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_speed_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('+'), KeyModifiers::SHIFT)),
            Action::SpeedUp
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('-'), KeyModifiers::NONE)), Action::SlowDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE)), Action::None);
    }
}
