use crate::ui::{AppState, ToastLevel};
use crate::widgets::form::{self, TermField};

/// User intents accepted by the calculator screen. The rendering layer maps
/// key events onto these; everything that changes form state goes through
/// [`update`].
pub enum AppMsg {
    /// Raw text of the term-count input after a keystroke.
    TermCountChanged(String),
    /// Raw text of one term field after a keystroke.
    TermEdited {
        index: usize,
        field: TermField,
        value: String,
    },
    TermRemoved(usize),
    CalculateRequested,
}

pub enum Effect {
    ShowToast {
        text: String,
        level: ToastLevel,
        seconds: u64,
    },
}

pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    let mut effects: Vec<Effect> = Vec::new();
    match msg {
        AppMsg::TermCountChanged(raw) => {
            form::set_term_count(&mut state.form, &raw);
            let line = format!("term count {raw:?} -> {} rows", state.form.term_count());
            state.dbg(line);
        }
        AppMsg::TermEdited {
            index,
            field,
            value,
        } => {
            form::edit_term(&mut state.form, index, field, value);
        }
        AppMsg::TermRemoved(index) => {
            if index < state.form.term_count() {
                form::remove_term(&mut state.form, index);
                state.dbg(format!("removed term {}", index + 1));
                effects.push(Effect::ShowToast {
                    text: format!("Removed term {}", index + 1),
                    level: ToastLevel::Info,
                    seconds: 2,
                });
            }
        }
        AppMsg::CalculateRequested => {
            form::calculate(&mut state.form);
            match state.form.result.clone() {
                Some(cgpa) => {
                    state.form.message = None;
                    state.dbg(format!("calculated CGPA {cgpa}"));
                    effects.push(Effect::ShowToast {
                        text: format!("CGPA {cgpa}"),
                        level: ToastLevel::Success,
                        seconds: 3,
                    });
                }
                None => {
                    state.form.message =
                        Some("No terms with both fields filled in yet".into());
                    state.dbg("calculate: no parseable terms");
                    effects.push(Effect::ShowToast {
                        text: "Nothing to average yet".into(),
                        level: ToastLevel::Info,
                        seconds: 3,
                    });
                }
            }
        }
    }
    effects
}

#[cfg(test)]
mod tests;
