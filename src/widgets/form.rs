use crate::widgets::chrome::panel_block;
use ratatui::prelude::*;
use ratatui::widgets::*;

/// Which of a term row's two inputs an edit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TermField {
    CreditHours,
    GradePoints,
}

/// One academic term as entered by the user.
///
/// Both fields hold raw text rather than parsed numbers so blank or partial
/// input stays representable while editing; parsing happens only inside
/// [`calculate`], and entries that do not parse are silently skipped there.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TermEntry {
    pub credit_hours: String,
    pub grade_points: String,
}

/// State of the calculator screen: the term-count input, the term rows, and
/// the last computed result.
#[derive(Clone, Debug, Default)]
pub struct FormState {
    pub title: String,
    /// Raw text of the "Number of terms" input.
    pub term_count_input: String,
    pub terms: Vec<TermEntry>,
    /// Linear cursor over slots: count field, then two fields per term, then
    /// the calculate button.
    pub selected: usize,
    pub editing: bool,
    pub message: Option<String>,
    /// Formatted CGPA from the last calculate, exactly two decimals.
    /// Edits do not clear it; it stays visible until the next calculate.
    pub result: Option<String>,
}

impl FormState {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            term_count_input: "0".into(),
            ..Default::default()
        }
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

/// A position the selection cursor can rest on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormSlot {
    TermCount,
    Term { index: usize, field: TermField },
    CalculateButton,
}

pub fn slot_count(form: &FormState) -> usize {
    2 + form.terms.len() * 2
}

pub fn slot_at(form: &FormState, selected: usize) -> FormSlot {
    if selected == 0 {
        return FormSlot::TermCount;
    }
    let idx = selected - 1;
    if idx < form.terms.len() * 2 {
        FormSlot::Term {
            index: idx / 2,
            field: if idx % 2 == 0 {
                TermField::CreditHours
            } else {
                TermField::GradePoints
            },
        }
    } else {
        FormSlot::CalculateButton
    }
}

/// Replace the term list with `n` blank entries, where `n` is parsed from the
/// raw count text. Non-numeric or negative input counts as zero. Previous
/// values are discarded; the last result is left as-is.
pub fn set_term_count(form: &mut FormState, raw: &str) {
    form.term_count_input = raw.to_string();
    let n = raw.trim().parse::<i64>().unwrap_or(0).max(0) as usize;
    form.terms = vec![TermEntry::default(); n];
    clamp_selected(form);
}

/// Replace one field of one entry. Callers only hand us indices taken from
/// the rendered list; anything else is a contract violation that trips the
/// debug assert and no-ops in release.
pub fn edit_term(form: &mut FormState, index: usize, field: TermField, value: String) {
    debug_assert!(
        index < form.terms.len(),
        "edit_term: index {index} out of range"
    );
    if index >= form.terms.len() {
        return;
    }
    form.terms = form
        .terms
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if i != index {
                return entry.clone();
            }
            match field {
                TermField::CreditHours => TermEntry {
                    credit_hours: value.clone(),
                    grade_points: entry.grade_points.clone(),
                },
                TermField::GradePoints => TermEntry {
                    credit_hours: entry.credit_hours.clone(),
                    grade_points: value.clone(),
                },
            }
        })
        .collect();
}

/// Remove the entry at `index`; later entries shift down one position and the
/// count input is rewritten to the new length.
pub fn remove_term(form: &mut FormState, index: usize) {
    debug_assert!(
        index < form.terms.len(),
        "remove_term: index {index} out of range"
    );
    if index >= form.terms.len() {
        return;
    }
    form.terms = form
        .terms
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, entry)| entry.clone())
        .collect();
    form.term_count_input = form.terms.len().to_string();
    clamp_selected(form);
}

/// Credit-weighted average over the entries whose two fields both parse to
/// finite numbers. Entries that do not are skipped, never reported. A zero
/// credit total (nothing parseable, or only zero-credit terms) produces an
/// absent result rather than an error.
pub fn calculate(form: &mut FormState) {
    let mut weighted = 0.0f64;
    let mut credits = 0.0f64;
    for term in &form.terms {
        let credit = term.credit_hours.trim().parse::<f64>();
        let gpa = term.grade_points.trim().parse::<f64>();
        if let (Ok(credit), Ok(gpa)) = (credit, gpa) {
            if credit.is_finite() && gpa.is_finite() {
                weighted += gpa * credit;
                credits += credit;
            }
        }
    }
    form.result = if credits > 0.0 {
        Some(format!("{:.2}", weighted / credits))
    } else {
        None
    };
}

fn clamp_selected(form: &mut FormState) {
    let max = slot_count(form) - 1;
    if form.selected > max {
        form.selected = max;
    }
}

fn field_line(
    form: &FormState,
    slot: usize,
    indent: &str,
    label: &str,
    value: &str,
    cursor_on: bool,
) -> Line<'static> {
    let sel = if form.selected == slot { '›' } else { ' ' };
    let mut val = value.to_string();
    if form.editing && form.selected == slot && cursor_on {
        val.push('▏');
    }
    let value_style = if form.selected == slot {
        if form.editing {
            crate::theme::text_editing_bold()
        } else {
            crate::theme::text_active_bold()
        }
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(format!("{indent}{sel} {label}: ")),
        Span::styled(val, value_style),
    ])
}

pub fn draw_form(f: &mut Frame, area: Rect, form: &FormState, highlight: bool, cursor_on: bool) {
    let mut lines: Vec<Line> = Vec::new();
    lines.push(field_line(
        form,
        0,
        "",
        "Number of terms",
        &form.term_count_input,
        cursor_on,
    ));
    for (i, term) in form.terms.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("-- Term {} --", i + 1),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(field_line(
            form,
            1 + i * 2,
            "  ",
            "Credit hours",
            &term.credit_hours,
            cursor_on,
        ));
        lines.push(field_line(
            form,
            2 + i * 2,
            "  ",
            "GPA",
            &term.grade_points,
            cursor_on,
        ));
    }
    lines.push(Line::from(""));
    let calc_idx = slot_count(form) - 1;
    let calc_style = if form.selected == calc_idx {
        crate::theme::list_cursor_style()
    } else {
        crate::theme::text_active_bold()
    };
    lines.push(Line::from(Span::styled("  [ Calculate ]", calc_style)));
    if let Some(cgpa) = &form.result {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("  Your CGPA is: "),
            Span::styled(
                cgpa.clone(),
                crate::theme::text_success().add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    if let Some(msg) = &form.message {
        lines.push(Line::from(Span::styled(
            msg.clone(),
            crate::theme::text_muted(),
        )));
    }
    let title = if form.editing {
        format!("{} — editing", form.title)
    } else {
        form.title.clone()
    };
    let block = panel_block(&title, highlight);
    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}
