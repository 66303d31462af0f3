use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub marquee: MarqueeOptions,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Poll interval while nothing is moving
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Target frame rate while the text is scrolling
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            theme: ThemeConfig::default(),
        }
    }
}

impl UiConfig {
    /// Frame interval while animating
    pub fn frame_interval(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_micros(1_000_000 / self.animation_fps as u64)
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a bare theme name or a table with `name` and `colors`
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Optional color overrides for theme customization
/// Each color is a hex string (e.g., "#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Viewport background
    pub bg: Option<String>,
    /// Text foreground
    pub fg: Option<String>,
    /// Status line accent
    pub accent: Option<String>,
    /// Dimmed status text
    pub muted: Option<String>,
}

/// Easing curve applied to linear scroll progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Holds at the start and jumps to the end
    Step,
    #[default]
    Linear,
    Cubic,
    Quintic,
    EaseOut,
    EaseInOut,
}

/// Immutable text style used for measuring and drawing
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default)]
    pub fg: Option<String>,
    #[serde(default)]
    pub bg: Option<String>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

/// Raw marquee settings as written in the config file
///
/// Nothing here is checked; convert into a [`MarqueeConfig`] to validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarqueeOptions {
    #[serde(default = "default_text")]
    pub text: String,
    /// Scroll speed in length units (cells) per second
    #[serde(default = "default_velocity")]
    pub velocity: f64,
    /// Gap between consecutive copies of the text
    #[serde(default = "default_blank_space")]
    pub blank_space: f64,
    /// Offset of the resting position, at most `blank_space`
    #[serde(default)]
    pub start_padding: f64,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub bounce: bool,
    #[serde(default)]
    pub start_after_ms: u64,
    #[serde(default)]
    pub pause_after_round_ms: u64,
    /// Unbounded when absent
    #[serde(default)]
    pub number_of_rounds: Option<u32>,
    #[serde(default)]
    pub fade_start_fraction: f64,
    #[serde(default)]
    pub fade_end_fraction: f64,
    #[serde(default = "default_true")]
    pub fade_only_when_scrolling: bool,
    #[serde(default)]
    pub easing: EasingType,
    #[serde(default)]
    pub style: TextStyle,
}

impl Default for MarqueeOptions {
    fn default() -> Self {
        Self {
            text: default_text(),
            style: TextStyle::default(),
            velocity: default_velocity(),
            blank_space: default_blank_space(),
            start_padding: 0.0,
            reverse: false,
            bounce: false,
            start_after_ms: 0,
            pause_after_round_ms: 0,
            number_of_rounds: None,
            fade_start_fraction: 0.0,
            fade_end_fraction: 0.0,
            fade_only_when_scrolling: default_true(),
            easing: EasingType::default(),
        }
    }
}

/// Validated marquee configuration
///
/// Replaced wholesale on change; see [`crate::engine::diff`] for what a
/// replacement invalidates.
#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeConfig {
    text: String,
    style: TextStyle,
    velocity: f64,
    blank_space: f64,
    start_padding: f64,
    reverse: bool,
    bounce: bool,
    start_after: Duration,
    pause_after_round: Duration,
    number_of_rounds: Option<u32>,
    fade_start_fraction: f64,
    fade_end_fraction: f64,
    fade_only_when_scrolling: bool,
    easing: EasingType,
}

impl MarqueeConfig {
    /// Validate raw options. Invalid values are rejected, never clamped.
    pub fn new(options: MarqueeOptions) -> Result<Self> {
        if !options.velocity.is_finite() || options.velocity <= 0.0 {
            return Err(Error::InvalidVelocity(options.velocity));
        }
        check_length("blank space", options.blank_space)?;
        check_length("start padding", options.start_padding)?;
        if options.start_padding > options.blank_space {
            return Err(Error::StartPaddingExceedsBlankSpace {
                start_padding: options.start_padding,
                blank_space: options.blank_space,
            });
        }
        check_fade_fraction("start", options.fade_start_fraction)?;
        check_fade_fraction("end", options.fade_end_fraction)?;
        if options.number_of_rounds == Some(0) {
            return Err(Error::InvalidRoundCount);
        }

        Ok(Self {
            text: options.text,
            style: options.style,
            velocity: options.velocity,
            blank_space: options.blank_space,
            start_padding: options.start_padding,
            reverse: options.reverse,
            bounce: options.bounce,
            start_after: Duration::from_millis(options.start_after_ms),
            pause_after_round: Duration::from_millis(options.pause_after_round_ms),
            number_of_rounds: options.number_of_rounds,
            fade_start_fraction: options.fade_start_fraction,
            fade_end_fraction: options.fade_end_fraction,
            fade_only_when_scrolling: options.fade_only_when_scrolling,
            easing: options.easing,
        })
    }

    /// Convert back to raw options, e.g. to tweak one field and revalidate
    pub fn to_options(&self) -> MarqueeOptions {
        MarqueeOptions {
            text: self.text.clone(),
            style: self.style.clone(),
            velocity: self.velocity,
            blank_space: self.blank_space,
            start_padding: self.start_padding,
            reverse: self.reverse,
            bounce: self.bounce,
            start_after_ms: self.start_after.as_millis() as u64,
            pause_after_round_ms: self.pause_after_round.as_millis() as u64,
            number_of_rounds: self.number_of_rounds,
            fade_start_fraction: self.fade_start_fraction,
            fade_end_fraction: self.fade_end_fraction,
            fade_only_when_scrolling: self.fade_only_when_scrolling,
            easing: self.easing,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn blank_space(&self) -> f64 {
        self.blank_space
    }

    pub fn start_padding(&self) -> f64 {
        self.start_padding
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    pub fn bounce(&self) -> bool {
        self.bounce
    }

    pub fn start_after(&self) -> Duration {
        self.start_after
    }

    pub fn pause_after_round(&self) -> Duration {
        self.pause_after_round
    }

    pub fn number_of_rounds(&self) -> Option<u32> {
        self.number_of_rounds
    }

    pub fn fade_start_fraction(&self) -> f64 {
        self.fade_start_fraction
    }

    pub fn fade_end_fraction(&self) -> f64 {
        self.fade_end_fraction
    }

    pub fn fade_only_when_scrolling(&self) -> bool {
        self.fade_only_when_scrolling
    }

    pub fn easing(&self) -> EasingType {
        self.easing
    }
}

impl TryFrom<MarqueeOptions> for MarqueeConfig {
    type Error = Error;

    fn try_from(options: MarqueeOptions) -> Result<Self> {
        Self::new(options)
    }
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        // Default options always validate
        Self {
            text: default_text(),
            style: TextStyle::default(),
            velocity: default_velocity(),
            blank_space: default_blank_space(),
            start_padding: 0.0,
            reverse: false,
            bounce: false,
            start_after: Duration::ZERO,
            pause_after_round: Duration::ZERO,
            number_of_rounds: None,
            fade_start_fraction: 0.0,
            fade_end_fraction: 0.0,
            fade_only_when_scrolling: true,
            easing: EasingType::Linear,
        }
    }
}

fn check_length(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::NonFinite(name));
    }
    if value < 0.0 {
        return Err(Error::NegativeLength(name));
    }
    Ok(())
}

fn check_fade_fraction(edge: &'static str, value: f64) -> Result<()> {
    if (0.0..=0.5).contains(&value) {
        Ok(())
    } else {
        Err(Error::FadeFractionOutOfRange { edge, value })
    }
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_text() -> String {
    "Hello from marquee! This line scrolls forever.".to_string()
}

fn default_velocity() -> f64 {
    20.0
}

fn default_blank_space() -> f64 {
    10.0
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marquee")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    250
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults when absent
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/marquee/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("marquee")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("marquee.log")
    }

    /// Validate the `[marquee]` section
    pub fn marquee_config(&self) -> Result<MarqueeConfig> {
        MarqueeConfig::new(self.marquee.clone())
    }
}
