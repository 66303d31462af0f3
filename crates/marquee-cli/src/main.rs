use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use marquee_core::{AppConfig, EasingType};

mod commands;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "Scroll a line of text across the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to ~/.config/marquee/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the text full-screen (default)
    Run(Overrides),
    /// Validate the configuration and print the derived timings
    Check(Overrides),
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Command line values that take precedence over the config file
#[derive(Args, Default)]
struct Overrides {
    /// Text to scroll
    text: Option<String>,
    /// Scroll speed in cells per second
    #[arg(short = 'v', long)]
    velocity: Option<f64>,
    /// Cells of space between copies of the text
    #[arg(long)]
    blank_space: Option<f64>,
    /// Resting offset of the text, at most the blank space
    #[arg(long)]
    start_padding: Option<f64>,
    /// Scroll left-to-right
    #[arg(short = 'r', long, overrides_with = "no_reverse")]
    reverse: bool,
    /// Scroll right-to-left even if the config file says otherwise
    #[arg(long, overrides_with = "reverse")]
    no_reverse: bool,
    /// Bounce back and forth instead of looping
    #[arg(short = 'b', long, overrides_with = "no_bounce")]
    bounce: bool,
    /// Loop even if the config file enables bounce
    #[arg(long, overrides_with = "bounce")]
    no_bounce: bool,
    /// Delay before the first round, in milliseconds
    #[arg(long)]
    start_after: Option<u64>,
    /// Pause between rounds, in milliseconds
    #[arg(short = 'p', long)]
    pause: Option<u64>,
    /// Stop after this many rounds
    #[arg(short = 'n', long)]
    rounds: Option<u32>,
    /// Fraction of the width faded on the left, 0 to 0.5
    #[arg(long)]
    fade_start: Option<f64>,
    /// Fraction of the width faded on the right, 0 to 0.5
    #[arg(long)]
    fade_end: Option<f64>,
    /// Keep the edge fade while paused or stopped
    #[arg(long)]
    always_fade: bool,
    /// Easing curve: step, linear, cubic, quintic, ease_out, ease_in_out
    #[arg(short = 'e', long, value_parser = parse_easing)]
    easing: Option<EasingType>,
    /// Theme name
    #[arg(long)]
    theme: Option<String>,
}

impl Overrides {
    fn apply(self, config: &mut AppConfig) {
        let marquee = &mut config.marquee;
        if let Some(text) = self.text {
            marquee.text = text;
        }
        if let Some(velocity) = self.velocity {
            marquee.velocity = velocity;
        }
        if let Some(blank_space) = self.blank_space {
            marquee.blank_space = blank_space;
        }
        if let Some(start_padding) = self.start_padding {
            marquee.start_padding = start_padding;
        }
        if let Some(reverse) = switch(self.reverse, self.no_reverse) {
            marquee.reverse = reverse;
        }
        if let Some(bounce) = switch(self.bounce, self.no_bounce) {
            marquee.bounce = bounce;
        }
        if let Some(ms) = self.start_after {
            marquee.start_after_ms = ms;
        }
        if let Some(ms) = self.pause {
            marquee.pause_after_round_ms = ms;
        }
        if self.rounds.is_some() {
            marquee.number_of_rounds = self.rounds;
        }
        if let Some(fraction) = self.fade_start {
            marquee.fade_start_fraction = fraction;
        }
        if let Some(fraction) = self.fade_end {
            marquee.fade_end_fraction = fraction;
        }
        if self.always_fade {
            marquee.fade_only_when_scrolling = false;
        }
        if let Some(easing) = self.easing {
            marquee.easing = easing;
        }
        if let Some(theme) = self.theme {
            config.ui.theme.name = theme;
        }
    }
}

/// Resolve an `--x` / `--no-x` pair; `None` keeps the file value
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Parse an easing name with the same spelling the config file uses
fn parse_easing(value: &str) -> std::result::Result<EasingType, String> {
    toml::Value::String(value.to_string())
        .try_into()
        .map_err(|_| format!("unknown easing '{}'", value))
}

/// Non-blocking writer appending to `path`
///
/// Log lines are flushed by a background worker until the guard is dropped.
fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .context("log path has no file name")?;
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("opening log file {}", path.display()))?;
    Ok(tracing_appender::non_blocking(appender))
}

/// Initialize logging
///
/// The TUI owns the terminal, so `run` logs to a file under the data
/// directory. The returned guard must outlive the terminal session.
fn init_logging(config: &AppConfig, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.general.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    let stderr_layer = log_file.is_none().then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config_path.unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    match cli.command {
        Some(Commands::Run(overrides)) => {
            overrides.apply(&mut config);
            let _guard = init_logging(&config, Some(&config.log_path()))?;
            commands::run::run(config)
        }
        None => {
            let _guard = init_logging(&config, Some(&config.log_path()))?;
            commands::run::run(config)
        }
        Some(Commands::Check(overrides)) => {
            overrides.apply(&mut config);
            init_logging(&config, None)?;
            commands::check::run(&config)
        }
        Some(Commands::Init { force }) => {
            init_logging(&config, None)?;
            commands::init::run(&config_path, force)
        }
    }
}
