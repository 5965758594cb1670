use ratatui::layout::Rect;
use ratatui::prelude::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::AppState;

/// Top banner: centered ASCII logo between two animated rain strips, with a
/// bottom border that lights up once a result exists.
pub fn draw_banner(f: &mut Frame, area: Rect, state: &AppState) {
    let border = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(if state.form.result.is_some() {
            crate::theme::ACCENT
        } else {
            crate::theme::MUTED
        }));
    let inner = border.inner(area);

    crate::visuals::draw_ambient_bg(f, inner, &state.theme, state.tick);

    let logo: &[String] = &state.logo_lines;
    let fallback = ["".to_string(), "cgpa-tui".to_string(), "".to_string()];
    let logo = if logo.is_empty() { &fallback[..] } else { logo };

    let logo_w = logo
        .iter()
        .map(|s| s.chars().count() as u16)
        .max()
        .unwrap_or(0)
        .min(inner.width);
    let lx = inner.x + inner.width.saturating_sub(logo_w) / 2;
    let ly = inner.y + inner.height.saturating_sub(logo.len() as u16) / 2;
    let logo_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    for (i, s) in logo.iter().enumerate() {
        let row = Rect {
            x: lx,
            y: ly.saturating_add(i as u16),
            width: logo_w,
            height: 1,
        };
        if row.y >= inner.y + inner.height {
            break;
        }
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(s.clone(), logo_style))),
            row,
        );
    }

    // Rain strips at the banner edges, kept clear of the logo
    let strip_w = 3u16.min(inner.width / 8);
    if strip_w > 0 && lx > inner.x + strip_w + 1 {
        let palette = [
            crate::theme::PRIMARY,
            crate::theme::ACCENT,
            crate::theme::SECONDARY,
        ];
        let left = Rect {
            x: inner.x,
            y: inner.y,
            width: strip_w,
            height: inner.height,
        };
        crate::visuals::draw_rain_strip(f, left, &palette, state.tick);
        let palette_r = [
            crate::theme::SECONDARY,
            crate::theme::ACCENT,
            crate::theme::PRIMARY,
        ];
        let right = Rect {
            x: inner.x + inner.width - strip_w,
            y: inner.y,
            width: strip_w,
            height: inner.height,
        };
        crate::visuals::draw_rain_strip(f, right, &palette_r, state.tick);
    }

    // Render the separating bottom border last
    f.render_widget(border, area);
}
