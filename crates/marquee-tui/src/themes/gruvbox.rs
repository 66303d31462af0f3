//! Gruvbox Material themes

use ratatui::style::Color;
use crate::theme::Theme;

pub fn dark() -> Theme {
    Theme::default()
}

pub fn light() -> Theme {
    Theme {
        bg: Color::Rgb(0xfb, 0xf1, 0xc7),
        bg_alt: Color::Rgb(0xeb, 0xdb, 0xb2),
        fg: Color::Rgb(0x65, 0x47, 0x35),
        accent: Color::Rgb(0x4c, 0x7a, 0x5d),
        muted: Color::Rgb(0x92, 0x83, 0x74),
    }
}
