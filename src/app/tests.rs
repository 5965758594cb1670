use super::*;
use crate::ui::AppState;
use crate::widgets::form::TermField;

fn state_with_terms(entries: &[(&str, &str)]) -> AppState {
    let mut st = AppState::default();
    let _ = update(
        &mut st,
        AppMsg::TermCountChanged(entries.len().to_string()),
    );
    for (i, (credit, gpa)) in entries.iter().enumerate() {
        let _ = update(
            &mut st,
            AppMsg::TermEdited {
                index: i,
                field: TermField::CreditHours,
                value: credit.to_string(),
            },
        );
        let _ = update(
            &mut st,
            AppMsg::TermEdited {
                index: i,
                field: TermField::GradePoints,
                value: gpa.to_string(),
            },
        );
    }
    st
}

#[test]
fn count_change_rebuilds_blank_rows() {
    let mut st = state_with_terms(&[("3", "4.0"), ("3", "3.0")]);
    let _ = update(&mut st, AppMsg::TermCountChanged("3".into()));
    assert_eq!(st.form.term_count(), 3);
    assert!(st.form.terms.iter().all(|t| t.credit_hours.is_empty()
        && t.grade_points.is_empty()));
}

#[test]
fn invalid_count_text_means_zero_rows() {
    let mut st = state_with_terms(&[("3", "4.0")]);
    let _ = update(&mut st, AppMsg::TermCountChanged("-2".into()));
    assert_eq!(st.form.term_count(), 0);
}

#[test]
fn calculate_produces_result_and_toast() {
    let mut st = state_with_terms(&[("3", "4.0"), ("3", "3.0")]);
    let effects = update(&mut st, AppMsg::CalculateRequested);
    assert_eq!(st.form.result.as_deref(), Some("3.50"));
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowToast {
            level: crate::ui::ToastLevel::Success,
            ..
        }]
    ));
}

#[test]
fn calculate_without_parseable_terms_leaves_result_absent() {
    let mut st = state_with_terms(&[("", ""), ("0", "4.0")]);
    let effects = update(&mut st, AppMsg::CalculateRequested);
    assert!(st.form.result.is_none());
    assert!(st.form.message.is_some());
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowToast {
            level: crate::ui::ToastLevel::Info,
            ..
        }]
    ));
}

#[test]
fn edits_after_calculate_keep_the_stale_result() {
    let mut st = state_with_terms(&[("3", "4.0")]);
    let _ = update(&mut st, AppMsg::CalculateRequested);
    let _ = update(
        &mut st,
        AppMsg::TermEdited {
            index: 0,
            field: TermField::GradePoints,
            value: "1.0".into(),
        },
    );
    assert_eq!(st.form.result.as_deref(), Some("4.00"));
    let _ = update(&mut st, AppMsg::CalculateRequested);
    assert_eq!(st.form.result.as_deref(), Some("1.00"));
}

#[test]
fn remove_shifts_rows_and_follows_count() {
    let mut st = state_with_terms(&[("1", "1.0"), ("2", "2.0"), ("3", "3.0")]);
    let effects = update(&mut st, AppMsg::TermRemoved(0));
    assert_eq!(st.form.term_count(), 2);
    assert_eq!(st.form.term_count_input, "2");
    assert_eq!(st.form.terms[0].credit_hours, "2");
    assert_eq!(st.form.terms[1].credit_hours, "3");
    assert_eq!(effects.len(), 1);
}

#[test]
fn remove_out_of_range_is_ignored() {
    let mut st = state_with_terms(&[("1", "1.0")]);
    let effects = update(&mut st, AppMsg::TermRemoved(7));
    assert_eq!(st.form.term_count(), 1);
    assert!(effects.is_empty());
}
