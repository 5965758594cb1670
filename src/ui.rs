use crate::app::{update, AppMsg, Effect};
use crate::model::AppConfig;
use crate::theme::Theme;
use crate::widgets::banner::draw_banner;
use crate::widgets::form::{self, FormSlot, FormState, TermField};
use crate::widgets::status_bar::draw_footer;
use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Clone, Copy)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub expires_at_tick: u64,
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) form: FormState,
    pub(crate) theme: Theme,
    pub(crate) header_h: u16,
    pub(crate) logo_lines: Vec<String>,
    pub(crate) tick: u64,
    pub(crate) toast: Option<Toast>,
    pub(crate) animations_enabled: bool,
    pub(crate) animation_start_tick: u64,
    // Debug log (rendered in bottom debug pane)
    pub(crate) debug_log: VecDeque<String>,
}

impl AppState {
    pub fn dbg(&mut self, msg: impl Into<String>) {
        const MAX_LOG_LINES: usize = 200;
        if self.debug_log.len() >= MAX_LOG_LINES {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(msg.into());
    }
}

pub(crate) fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::ShowToast {
                text,
                level,
                seconds,
            } => {
                let ticks = seconds.saturating_mul(5); // ~200ms tick
                let exp = state.tick.saturating_add(ticks);
                state.toast = Some(Toast {
                    text,
                    level,
                    expires_at_tick: exp,
                });
            }
        }
    }
}

pub fn run() -> Result<()> {
    let cfg = load_config()?;
    let mut state = AppState {
        header_h: 3,
        theme: Theme::campus_dark(),
        animations_enabled: cfg.animations,
        form: FormState::new(
            cfg.header
                .clone()
                .unwrap_or_else(|| "CGPA Calculator".to_string()),
        ),
        config: cfg,
        ..Default::default()
    };
    init_logo_and_header(&mut state);

    // Headless smoke mode
    let headless = std::env::var("CGPA_TUI_HEADLESS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false);
    if headless {
        let base_ticks: u64 = std::env::var("CGPA_TUI_TICKS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);
        let script = std::env::var("CGPA_TUI_KEYS").unwrap_or_default();
        let summary_wanted: bool = std::env::var("CGPA_TUI_SMOKE_SUMMARY")
            .ok()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
            .unwrap_or(false);
        let ticks = base_ticks.max(script.chars().count() as u64);
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend)?;
        let mut keys = script.chars();
        for _ in 0..ticks {
            terminal.draw(|f| ui(f, &mut state))?;
            // One scripted key per frame: ';' Enter, '^' Up, '_' Down,
            // '<' Backspace, '~' Esc, anything else a plain character.
            if let Some(c) = keys.next() {
                let code = match c {
                    ';' => KeyCode::Enter,
                    '^' => KeyCode::Up,
                    '_' => KeyCode::Down,
                    '<' => KeyCode::Backspace,
                    '~' => KeyCode::Esc,
                    other => KeyCode::Char(other),
                };
                let _ = handle_key(&mut state, KeyEvent::new(code, KeyModifiers::NONE));
            }
            state.tick = state.tick.wrapping_add(1);
        }
        if summary_wanted {
            let summary = serde_json::json!({
                "ok": true,
                "terms": state.form.term_count(),
                "result": state.form.result,
                "editing": state.form.editing,
            });
            println!("{summary}");
        }
        return Ok(());
    }

    // Setup terminal (interactive)
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();
    let res = loop {
        terminal.draw(|f| ui(f, &mut state))?;
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_key(&mut state, key) {
                    break Ok(());
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            state.tick = state.tick.wrapping_add(1);
            last_tick = Instant::now();
        }
    };
    // Restore
    disable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    res
}

/// Route one key event. Returns true when the app should quit.
pub(crate) fn handle_key(state: &mut AppState, key: KeyEvent) -> bool {
    // Ctrl+C copies the current result to the clipboard (any mode)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        if let Some(cgpa) = state.form.result.clone() {
            match arboard::Clipboard::new() {
                Ok(mut clipboard) => {
                    let _ = clipboard.set_text(&cgpa);
                    run_effects(
                        state,
                        vec![Effect::ShowToast {
                            text: "Copied to clipboard!".into(),
                            level: ToastLevel::Info,
                            seconds: 2,
                        }],
                    );
                }
                Err(e) => {
                    run_effects(
                        state,
                        vec![Effect::ShowToast {
                            text: format!("Clipboard unavailable: {e}"),
                            level: ToastLevel::Error,
                            seconds: 3,
                        }],
                    );
                }
            }
        }
        return false;
    }
    if state.form.editing {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                state.form.editing = false;
                state.form.message = None;
            }
            KeyCode::Backspace => {
                if let Some(msg) = edited_after_backspace(&state.form) {
                    let effects = update(state, msg);
                    run_effects(state, effects);
                }
            }
            KeyCode::Char(c) => {
                if let Some(msg) = edited_after_char(&state.form, c) {
                    let effects = update(state, msg);
                    run_effects(state, effects);
                }
            }
            _ => {}
        }
        return false;
    }
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Up => {
            if state.form.selected > 0 {
                state.form.selected -= 1;
            }
        }
        KeyCode::Down => {
            if state.form.selected + 1 < form::slot_count(&state.form) {
                state.form.selected += 1;
            }
        }
        KeyCode::Enter => match form::slot_at(&state.form, state.form.selected) {
            FormSlot::CalculateButton => {
                let effects = update(state, AppMsg::CalculateRequested);
                run_effects(state, effects);
            }
            _ => {
                state.form.editing = true;
            }
        },
        KeyCode::Char('c') => {
            let effects = update(state, AppMsg::CalculateRequested);
            run_effects(state, effects);
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let FormSlot::Term { index, .. } = form::slot_at(&state.form, state.form.selected) {
                let effects = update(state, AppMsg::TermRemoved(index));
                run_effects(state, effects);
            }
        }
        KeyCode::Esc => {
            state.form.message = None;
        }
        _ => {}
    }
    false
}

fn field_text(form: &FormState, index: usize, field: TermField) -> &str {
    match field {
        TermField::CreditHours => &form.terms[index].credit_hours,
        TermField::GradePoints => &form.terms[index].grade_points,
    }
}

// Keystroke filters mirror a numeric input box: digits always, one leading
// '-', and for term fields a single '.'. The controller itself accepts any
// raw text; unparseable leftovers are simply skipped at calculate time.
fn edited_after_char(form: &FormState, c: char) -> Option<AppMsg> {
    match form::slot_at(form, form.selected) {
        FormSlot::TermCount => {
            let s = &form.term_count_input;
            if c.is_ascii_digit() || (c == '-' && s.is_empty()) {
                Some(AppMsg::TermCountChanged(format!("{s}{c}")))
            } else {
                None
            }
        }
        FormSlot::Term { index, field } => {
            let s = field_text(form, index, field);
            if c.is_ascii_digit() || (c == '.' && !s.contains('.')) || (c == '-' && s.is_empty()) {
                Some(AppMsg::TermEdited {
                    index,
                    field,
                    value: format!("{s}{c}"),
                })
            } else {
                None
            }
        }
        FormSlot::CalculateButton => None,
    }
}

fn edited_after_backspace(form: &FormState) -> Option<AppMsg> {
    match form::slot_at(form, form.selected) {
        FormSlot::TermCount => {
            let mut s = form.term_count_input.clone();
            s.pop()?;
            Some(AppMsg::TermCountChanged(s))
        }
        FormSlot::Term { index, field } => {
            let mut s = field_text(form, index, field).to_string();
            s.pop()?;
            Some(AppMsg::TermEdited {
                index,
                field,
                value: s,
            })
        }
        FormSlot::CalculateButton => None,
    }
}

fn load_config() -> Result<AppConfig> {
    // 1) If CGPA_TUI_CONFIG_DIR is set, expect cgpa.yaml inside it
    if let Ok(base) = std::env::var("CGPA_TUI_CONFIG_DIR") {
        let entry = PathBuf::from(&base).join("cgpa.yaml");
        let s = fs::read_to_string(&entry).with_context(|| format!("reading {entry:?}"))?;
        let cfg: AppConfig =
            serde_yaml::from_str(&s).with_context(|| format!("parsing {entry:?}"))?;
        return Ok(cfg);
    }
    // 2) Discover cgpa.yaml in the CWD
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let candidates = [cwd.join("cgpa.yaml"), cwd.join(".cgpa").join("cgpa.yaml")];
    for p in &candidates {
        if p.exists() {
            let s = fs::read_to_string(p).with_context(|| format!("reading {p:?}"))?;
            let cfg: AppConfig =
                serde_yaml::from_str(&s).with_context(|| format!("parsing {p:?}"))?;
            return Ok(cfg);
        }
    }
    // No config file is fine for a calculator; run with defaults.
    Ok(AppConfig::default())
}

fn init_logo_and_header(state: &mut AppState) {
    // Determine logo lines from config.logo, relative to CGPA_TUI_CONFIG_DIR when needed.
    let mut lines: Vec<String> = Vec::new();
    if let Some(path) = state.config.logo.clone() {
        let pb = PathBuf::from(&path);
        let full = if pb.is_absolute() {
            pb
        } else if let Ok(dir) = std::env::var("CGPA_TUI_CONFIG_DIR") {
            PathBuf::from(dir).join(&path)
        } else {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(&path)
        };
        if let Ok(s) = fs::read_to_string(&full) {
            lines = s.lines().map(|l| l.to_string()).collect();
        }
    }
    if lines.is_empty() {
        lines = vec!["".to_string(), "cgpa-tui".to_string(), "".to_string()];
    }
    // Reserve one extra row for the banner's bottom border so content isn't clipped.
    state.header_h = (lines.len() as u16).saturating_add(1);
    state.logo_lines = lines;
}

fn ui(f: &mut Frame, state: &mut AppState) {
    // Clear expired toast
    if let Some(t) = &state.toast {
        if state.tick >= t.expires_at_tick {
            state.toast = None;
        }
    }

    // Fill entire screen with theme background
    let screen = f.area();
    let bg = Block::default().style(Style::default().bg(state.theme.bg));
    f.render_widget(bg, screen);

    // Split screen: 5% left margin, 90% content, 5% right margin
    let layout_h = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(5),
            Constraint::Percentage(90),
            Constraint::Percentage(5),
        ])
        .split(screen);

    let left_side = layout_h[0];
    let content_area = layout_h[1];
    let right_side = layout_h[2];

    // Side strips: vivid matrix rain for the first few seconds, then calm dots
    const ANIMATION_MIN_TICKS: u64 = 15; // 3 seconds @ 200ms
    if state.animations_enabled {
        let elapsed_ticks = state.tick.saturating_sub(state.animation_start_tick);
        if elapsed_ticks < ANIMATION_MIN_TICKS {
            let palette = [
                state.theme.primary,
                state.theme.accent,
                state.theme.secondary,
            ];
            let palette_r = [
                state.theme.secondary,
                state.theme.accent,
                state.theme.primary,
            ];
            crate::visuals::draw_rain_strip(f, left_side, &palette, state.tick);
            crate::visuals::draw_rain_strip(f, right_side, &palette_r, state.tick);
        } else {
            crate::visuals::draw_ambient_bg(f, left_side, &state.theme, state.tick);
            crate::visuals::draw_ambient_bg(f, right_side, &state.theme, state.tick);
        }
    }

    const DEBUG_H: u16 = 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(state.header_h.max(1)),
            Constraint::Min(0),
            Constraint::Length(DEBUG_H),
            Constraint::Length(1),
        ])
        .split(content_area);

    draw_banner(f, chunks[0], state);
    let cursor_on = state.tick % 2 == 0;
    form::draw_form(f, chunks[1], &state.form, true, cursor_on);
    draw_debug(f, chunks[2], state);

    let help_text = if state.form.editing {
        "type digits  Backspace delete  Enter/Esc done".to_string()
    } else {
        match form::slot_at(&state.form, state.form.selected) {
            FormSlot::TermCount => "↑/↓ select  Enter edit  c calculate  q quit".to_string(),
            FormSlot::Term { .. } => {
                "↑/↓ select  Enter edit  d remove term  c calculate  Ctrl+C copy  q quit"
                    .to_string()
            }
            FormSlot::CalculateButton => {
                "↑/↓ select  Enter calculate  Ctrl+C copy  q quit".to_string()
            }
        }
    };
    draw_footer(f, chunks[3], state, &help_text);

    // Draw color palette bars LAST so they appear on top of everything else
    crate::visuals::draw_color_bars(f, screen, &state.theme);
}

fn draw_debug(f: &mut Frame, area: Rect, state: &AppState) {
    let b = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            "Debug",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
    // Take last `area.height` lines
    let h = area.height as usize;
    let mut lines: Vec<Line> = Vec::new();
    let total = state.debug_log.len();
    let start = total.saturating_sub(h);
    for s in state.debug_log.iter().skip(start) {
        lines.push(Line::raw(s.clone()));
    }
    let p = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(b)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(state: &mut AppState, code: KeyCode) -> bool {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typing_a_count_then_values_then_calculate() {
        let mut st = AppState::default();
        key(&mut st, KeyCode::Enter); // edit count field
        assert!(st.form.editing);
        key(&mut st, KeyCode::Char('2'));
        assert_eq!(st.form.term_count(), 2);
        key(&mut st, KeyCode::Enter); // done editing
        assert!(!st.form.editing);
        key(&mut st, KeyCode::Down); // term 1, credit hours
        key(&mut st, KeyCode::Enter);
        key(&mut st, KeyCode::Char('3'));
        key(&mut st, KeyCode::Enter);
        key(&mut st, KeyCode::Down); // term 1, gpa
        key(&mut st, KeyCode::Enter);
        key(&mut st, KeyCode::Char('4'));
        key(&mut st, KeyCode::Enter);
        key(&mut st, KeyCode::Char('c'));
        assert_eq!(st.form.result.as_deref(), Some("4.00"));
    }

    #[test]
    fn non_numeric_keys_are_filtered_while_editing() {
        let mut st = AppState::default();
        key(&mut st, KeyCode::Enter);
        key(&mut st, KeyCode::Char('x'));
        assert_eq!(st.form.term_count_input, "");
        key(&mut st, KeyCode::Char('1'));
        assert_eq!(st.form.term_count_input, "1");
    }

    #[test]
    fn backspace_shrinks_the_count_and_the_rows() {
        let mut st = AppState::default();
        key(&mut st, KeyCode::Enter);
        key(&mut st, KeyCode::Char('1'));
        key(&mut st, KeyCode::Char('2'));
        assert_eq!(st.form.term_count(), 12);
        key(&mut st, KeyCode::Backspace);
        assert_eq!(st.form.term_count(), 1);
        key(&mut st, KeyCode::Backspace);
        assert_eq!(st.form.term_count(), 0);
    }

    #[test]
    fn d_removes_the_selected_term_row() {
        let mut st = AppState::default();
        let effects = update(&mut st, AppMsg::TermCountChanged("2".into()));
        run_effects(&mut st, effects);
        st.form.selected = 3; // term 2, credit hours
        key(&mut st, KeyCode::Char('d'));
        assert_eq!(st.form.term_count(), 1);
    }

    #[test]
    fn q_quits_only_when_not_editing() {
        let mut st = AppState::default();
        assert!(key(&mut st, KeyCode::Char('q')));
        st.form.editing = true;
        assert!(!key(&mut st, KeyCode::Char('q')));
    }

    #[test]
    fn enter_on_the_button_calculates() {
        let mut st = AppState::default();
        let _ = update(&mut st, AppMsg::TermCountChanged("1".into()));
        let _ = update(
            &mut st,
            AppMsg::TermEdited {
                index: 0,
                field: TermField::CreditHours,
                value: "3".into(),
            },
        );
        let _ = update(
            &mut st,
            AppMsg::TermEdited {
                index: 0,
                field: TermField::GradePoints,
                value: "3.5".into(),
            },
        );
        st.form.selected = form::slot_count(&st.form) - 1;
        key(&mut st, KeyCode::Enter);
        assert_eq!(st.form.result.as_deref(), Some("3.50"));
    }
}
