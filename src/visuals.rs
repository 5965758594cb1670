use ratatui::layout::Rect;
use ratatui::prelude::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::theme::Theme;

/// Subtle drifting dot field for idle areas. Purely decorative.
pub fn draw_ambient_bg(f: &mut Frame, area: Rect, theme: &Theme, tick: u64) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let drift = (tick / 2) as usize;
    let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
    for y in 0..area.height as usize {
        let mut row = String::with_capacity(area.width as usize);
        for x in 0..area.width as usize {
            // Cheap hash keeps the dots sparse but stable between frames
            let cell = x.wrapping_mul(31).wrapping_add(y.wrapping_mul(17)) + drift;
            row.push(if cell % 9 == 0 { '·' } else { ' ' });
        }
        lines.push(Line::from(Span::styled(
            row,
            Style::default()
                .bg(theme.bg)
                .fg(theme.muted)
                .add_modifier(Modifier::DIM),
        )));
    }
    let p = Paragraph::new(lines)
        .style(Style::default().bg(theme.bg))
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

/// Falling-glyph side strip. Each column runs its own phase so narrow strips
/// do not look synchronized.
pub fn draw_rain_strip(f: &mut Frame, area: Rect, palette: &[Color], tick: u64) {
    if area.width == 0 || area.height == 0 || palette.is_empty() {
        return;
    }
    let h = area.height as usize;
    let w = area.width as usize;
    let mut rows: Vec<Line> = Vec::with_capacity(h);
    for y in 0..h {
        let mut spans: Vec<Span> = Vec::with_capacity(w);
        for x in 0..w {
            let phase = (x * 23 + 7) % h;
            let head = (phase + tick as usize / 3) % h;
            let trail = if y <= head { head - y } else { head + h - y };
            let col = palette[x % palette.len()];
            let (ch, style) = match trail {
                0 => ('█', Style::default().fg(col).add_modifier(Modifier::BOLD)),
                1..=2 => ('▓', Style::default().fg(col)),
                3..=8 => ('▒', Style::default().fg(col).add_modifier(Modifier::DIM)),
                9..=16 => ('░', Style::default().fg(col).add_modifier(Modifier::DIM)),
                _ => (' ', Style::default()),
            };
            spans.push(Span::styled(ch.to_string(), style));
        }
        rows.push(Line::from(spans));
    }
    let p = Paragraph::new(rows).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

/// Short palette swatches in the top corners of the content area.
pub fn draw_color_bars(f: &mut Frame, screen: Rect, theme: &Theme) {
    const BAR_WIDTH: u16 = 10;
    let margin = screen.width / 20; // matches the 5% side margins
    let content_width = screen.width.saturating_sub(margin * 2);
    if content_width < BAR_WIDTH * 2 {
        return;
    }
    let colors = [
        theme.primary,
        theme.accent,
        theme.secondary,
        theme.selected,
        theme.success,
    ];
    let swatch = |reversed: bool| -> Line<'static> {
        let mut spans: Vec<Span> = Vec::with_capacity(BAR_WIDTH as usize);
        for i in 0..BAR_WIDTH as usize {
            let idx = if reversed {
                colors.len() - 1 - (i % colors.len())
            } else {
                i % colors.len()
            };
            spans.push(Span::styled("█", Style::default().fg(colors[idx])));
        }
        Line::from(spans)
    };
    let left = Rect {
        x: screen.x + margin,
        y: screen.y,
        width: BAR_WIDTH,
        height: 1,
    };
    f.render_widget(
        Paragraph::new(swatch(false)).style(Style::default().bg(theme.bg)),
        left,
    );
    let right = Rect {
        x: screen.x + margin + content_width - BAR_WIDTH,
        y: screen.y,
        width: BAR_WIDTH,
        height: 1,
    };
    f.render_widget(
        Paragraph::new(swatch(true)).style(Style::default().bg(theme.bg)),
        right,
    );
}
