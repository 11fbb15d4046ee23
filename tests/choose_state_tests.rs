use gh_hook::{
    HookError,
    tui::components::{ChooseEvent, ChooseOutcome, ChooseState, PAGE_SIZE},
};

fn state(n: usize, limit: usize) -> ChooseState {
    ChooseState::new((0..n).map(|i| format!("item {i}")), limit).unwrap()
}

fn confirm(state: &mut ChooseState) -> Vec<usize> {
    match state.update(ChooseEvent::Confirm) {
        Some(ChooseOutcome::Confirmed(indices)) => indices,
        other => panic!("expected confirmation, got {other:?}"),
    }
}

#[test]
fn test_selection_never_exceeds_limit() {
    let mut s = state(30, 5);
    let script = [
        ChooseEvent::Toggle,
        ChooseEvent::Down,
        ChooseEvent::SelectAll,
        ChooseEvent::Right,
        ChooseEvent::Toggle,
        ChooseEvent::Up,
        ChooseEvent::Toggle,
    ];
    for event in script.iter().cycle().take(200) {
        s.update(*event);
        assert!(s.num_selected() <= s.limit());
    }
    assert!(confirm(&mut s).len() <= 5);
}

#[test]
fn test_cursor_stays_on_visible_page() {
    let mut s = state(PAGE_SIZE * 3 + 4, 0);
    let script = [
        ChooseEvent::Down,
        ChooseEvent::Down,
        ChooseEvent::Right,
        ChooseEvent::Up,
        ChooseEvent::Left,
        ChooseEvent::Up,
        ChooseEvent::Up,
        ChooseEvent::Down,
    ];
    for event in script.iter().cycle().take(500) {
        s.update(*event);
        assert!(s.index() < s.len());
        let paginator = s.paginator();
        assert_eq!(paginator.page, s.index() / paginator.per_page);
    }
}

#[test]
fn test_select_all_then_deselect_all_leaves_nothing() {
    let mut s = state(12, 0);
    s.update(ChooseEvent::SelectAll);
    assert_eq!(s.num_selected(), 12);
    s.update(ChooseEvent::DeselectAll);
    assert_eq!(s.num_selected(), 0);
    assert!((0..12).all(|i| !s.is_selected(i)));
}

#[test]
fn test_multi_select_returns_selection_order() {
    let mut s = state(15, 0);
    s.update(ChooseEvent::Right);
    s.update(ChooseEvent::Toggle); // 10
    s.update(ChooseEvent::Left);
    s.update(ChooseEvent::Toggle); // 0
    s.update(ChooseEvent::Up);
    s.update(ChooseEvent::Toggle); // 14

    assert_eq!(confirm(&mut s), vec![10, 0, 14]);
}

#[test]
fn test_single_select_confirm_is_cursor() {
    let mut s = state(3, 1);
    s.update(ChooseEvent::Up);
    assert_eq!(confirm(&mut s), vec![2]);
}

#[test]
fn test_cancel_reports_cancelled() {
    let mut s = state(3, 0);
    assert_eq!(s.update(ChooseEvent::Cancel), Some(ChooseOutcome::Cancelled));
    assert!(s.is_cancelled());
}

#[test]
fn test_empty_list_is_rejected() {
    let err = ChooseState::new(Vec::<&str>::new(), 0).unwrap_err();
    assert_eq!(err, HookError::NoOptions);
}
