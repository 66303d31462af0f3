//! Nord theme
//! https://www.nordtheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

/// Nord default theme
pub fn default() -> Theme {
    Theme {
        bg: Color::Rgb(0x2e, 0x34, 0x40),     // nord0
        bg_alt: Color::Rgb(0x43, 0x4c, 0x5e), // nord2
        fg: Color::Rgb(0xec, 0xef, 0xf4),     // nord6
        accent: Color::Rgb(0x88, 0xc0, 0xd0), // nord8
        muted: Color::Rgb(0xd8, 0xde, 0xe9),  // nord4
    }
}
