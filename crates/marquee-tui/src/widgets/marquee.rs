use marquee_core::engine::FadeMask;
use marquee_core::{Frame as MarqueeFrame, Marquee, Viewport};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;
use crate::themes::parse_hex_color;

/// Rasterises a marquee frame into terminal cells
pub struct MarqueeWidget;

impl MarqueeWidget {
    pub fn render(frame: &mut Frame, area: Rect, marquee: &Marquee, theme: &Theme) {
        Self::render_to_buffer(frame.buffer_mut(), area, marquee, theme);
    }

    pub fn render_to_buffer(buf: &mut Buffer, area: Rect, marquee: &Marquee, theme: &Theme) {
        if area.is_empty() {
            return;
        }
        let plan = marquee.frame(Viewport::new(area.width as f64, area.height as f64));
        Self::draw(buf, area, &plan, theme);
    }

    fn draw(buf: &mut Buffer, area: Rect, plan: &MarqueeFrame<'_>, theme: &Theme) {
        buf.set_style(area, Style::default().bg(theme.bg));

        let fg = plan
            .style
            .fg
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(theme.fg);
        let bg = plan
            .style
            .bg
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(theme.bg);
        let mut modifiers = Modifier::empty();
        if plan.style.bold {
            modifiers |= Modifier::BOLD;
        }
        if plan.style.italic {
            modifiers |= Modifier::ITALIC;
        }

        let width = area.width as i64;
        for position in &plan.layout.positions {
            let row = area.y as i64 + position.y.floor() as i64;
            if row < area.top() as i64 || row >= area.bottom() as i64 {
                continue;
            }

            let mut col = position.x.round() as i64;
            for ch in plan.text.chars() {
                let w = ch.width().unwrap_or(0) as i64;
                if w == 0 {
                    continue;
                }
                let cell_x = col;
                col += w;
                // Clip to the viewport; a wide char straddling an edge is dropped
                if cell_x < 0 || cell_x + w > width {
                    continue;
                }

                let t = (cell_x as f64 + w as f64 / 2.0) / width as f64;
                let style = faded_style(fg, bg, modifiers, &plan.mask, t);
                let x = area.x + cell_x as u16;
                if let Some(cell) = buf.cell_mut((x, row as u16)) {
                    cell.set_char(ch);
                    cell.set_style(style);
                }
                for trailing in 1..w {
                    if let Some(cell) = buf.cell_mut((x + trailing as u16, row as u16)) {
                        cell.reset();
                        cell.set_style(Style::default().bg(bg));
                    }
                }
            }
        }
    }
}

/// Text style with the fade mask applied at normalized position `t`
fn faded_style(fg: Color, bg: Color, modifiers: Modifier, mask: &FadeMask, t: f64) -> Style {
    let opacity = mask.opacity_at(t);
    let base = Style::default().bg(bg).add_modifier(modifiers);
    if opacity >= 1.0 {
        return base.fg(fg);
    }

    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| (b as f64 + (f as f64 - b as f64) * opacity).round() as u8;
            base.fg(Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb)))
        }
        // Without true colour the best a terminal can do is dim
        _ if opacity < 0.5 => base.fg(fg).add_modifier(Modifier::DIM),
        _ => base.fg(fg),
    }
}
