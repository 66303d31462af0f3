use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Viewport background
    pub bg: Color,
    /// Status bar background
    pub bg_alt: Color,
    /// Default text color
    pub fg: Color,
    /// Status bar highlights
    pub accent: Color,
    /// Secondary status text
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Default to Gruvbox Dark
        Self {
            bg: Color::Rgb(0x28, 0x28, 0x28),
            bg_alt: Color::Rgb(0x45, 0x40, 0x3d),
            fg: Color::Rgb(0xd4, 0xbe, 0x98),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            muted: Color::Rgb(0xa8, 0x99, 0x84),
        }
    }
}
