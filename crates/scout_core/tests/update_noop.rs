use scout_core::{update, AppState, Msg, SessionState};

fn submit(state: AppState, input: &str) -> AppState {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::InputSubmitted).0
}

#[test]
fn blank_submission_while_busy_is_noop() {
    let busy = submit(AppState::new(), "search first");
    assert_eq!(busy.session(), SessionState::Busy);
    let before = busy.log().clone();

    let (state, _) = update(busy, Msg::InputChanged("   ".to_string()));
    let (next, effects) = update(state, Msg::InputSubmitted);

    assert!(effects.is_empty());
    assert_eq!(next.log(), &before);
    assert_eq!(next.session(), SessionState::Busy);
    assert_eq!(next.active_turn(), Some(1));
}
