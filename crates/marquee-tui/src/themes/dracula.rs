//! Dracula theme
//! https://draculatheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg: Color::Rgb(0x28, 0x2a, 0x36),
        bg_alt: Color::Rgb(0x44, 0x47, 0x5a),
        fg: Color::Rgb(0xf8, 0xf8, 0xf2),
        accent: Color::Rgb(0xbd, 0x93, 0xf9),
        muted: Color::Rgb(0x62, 0x72, 0xa4),
    }
}
