use marquee_core::{Marquee, Phase};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        marquee: &Marquee,
        status_message: Option<&str>,
        theme: &Theme,
    ) {
        frame.render_widget(Self::paragraph(area, marquee, status_message, theme), area);
    }

    fn status_text(marquee: &Marquee) -> String {
        let phase_str = match marquee.phase() {
            Phase::Idle => "IDLE",
            Phase::Delaying => "DELAY",
            Phase::Running => "RUN",
            Phase::Pausing => "PAUSE",
            Phase::Stopped => "STOP",
        };

        let config = marquee.config();
        let rounds = match config.number_of_rounds() {
            Some(limit) => format!("{}/{}", marquee.rounds_completed(), limit),
            None => marquee.rounds_completed().to_string(),
        };

        let mut flags = Vec::new();
        if config.reverse() {
            flags.push("rev");
        }
        if config.bounce() {
            flags.push("bounce");
        }

        format!(
            " {} | rounds: {} | {:.1}/s | cycle: {:.2}s{}",
            phase_str,
            rounds,
            config.velocity(),
            marquee.cycle_duration().as_secs_f64(),
            if flags.is_empty() {
                String::new()
            } else {
                format!(" | {}", flags.join(","))
            }
        )
    }

    fn paragraph<'a>(
        area: Rect,
        marquee: &Marquee,
        status_message: Option<&str>,
        theme: &Theme,
    ) -> Paragraph<'a> {
        let status_text = match status_message {
            Some(msg) => format!(" {}", msg),
            None => Self::status_text(marquee),
        };

        let help_hint = " q:quit space:stop/start f:finish s:restart r:rev b:bounce +/-:speed ";
        let padding_len = area
            .width
            .saturating_sub(status_text.chars().count() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.accent).bg(theme.bg_alt),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg_alt)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.bg_alt)),
        ]);

        Paragraph::new(line)
    }
}
