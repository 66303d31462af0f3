use std::fmt::Write as _;

use anyhow::{Context, Result};

use marquee_core::{engine::cycle_duration, metrics::TextMeasurer, AppConfig};
use marquee_tui::{themes::available_themes, UnicodeWidthMeasurer};

/// Validate the configuration and print what the engine derives from it
pub fn run(config: &AppConfig) -> Result<()> {
    let report = report(config)?;
    print!("{}", report);
    Ok(())
}

fn report(config: &AppConfig) -> Result<String> {
    let marquee = config.marquee_config().context("invalid [marquee] configuration")?;
    let metrics = UnicodeWidthMeasurer.measure(marquee.text(), marquee.style());
    let cycle = cycle_duration(marquee.velocity(), metrics.width, marquee.blank_space())?;

    let themes = available_themes();
    let theme_name = config.ui.theme.name.to_lowercase();
    let theme_note = if themes.contains(&theme_name.as_str()) {
        ""
    } else {
        " (unknown, gruvbox-dark will be used)"
    };

    let mut out = String::new();
    writeln!(out, "Configuration OK")?;
    writeln!(out, "  text width:    {} cells", metrics.width)?;
    writeln!(out, "  velocity:      {} cells/s", marquee.velocity())?;
    writeln!(out, "  cycle:         {:.3}s", cycle.as_secs_f64())?;
    writeln!(
        out,
        "  mode:          {}{}",
        if marquee.bounce() { "bounce" } else { "loop" },
        if marquee.reverse() { ", reversed" } else { "" }
    )?;
    match marquee.number_of_rounds() {
        Some(rounds) => writeln!(out, "  rounds:        {}", rounds)?,
        None => writeln!(out, "  rounds:        unbounded")?,
    }
    writeln!(out, "  easing:        {:?}", marquee.easing())?;
    writeln!(out, "  theme:         {}{}", config.ui.theme.name, theme_note)?;
    writeln!(out, "  themes:        {}", themes.join(", "))?;
    writeln!(out, "  log file:      {}", config.log_path().display())?;

    tracing::debug!(cycle_us = cycle.as_micros() as u64, "Config check passed");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lists_timings_and_themes() {
        let mut config = AppConfig::default();
        config.marquee.text = "x".repeat(30);
        config.marquee.velocity = 10.0;
        config.marquee.blank_space = 10.0;
        config.ui.theme.name = "nord".to_string();

        let report = report(&config).unwrap();
        assert!(report.contains("cycle:         4.000s"));
        assert!(report.contains("theme:         nord\n"));
        assert!(report.contains("gruvbox-dark, gruvbox-light, dracula, nord"));
    }

    #[test]
    fn test_report_flags_unknown_theme() {
        let mut config = AppConfig::default();
        config.ui.theme.name = "solarized".to_string();
        let report = report(&config).unwrap();
        assert!(report.contains("solarized (unknown"));
    }

    #[test]
    fn test_report_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.marquee.velocity = 0.0;
        assert!(report(&config).is_err());
    }
}
