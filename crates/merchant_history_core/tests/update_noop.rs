use merchant_history_core::{update, ClientState, HistoryState, Msg};

#[test]
fn update_is_noop() {
    let state = HistoryState::new();
    let mut client = ClientState::new();
    let (next, effects) = update(state.clone(), &mut client, Msg::NoOp);

    assert_eq!(state, next);
    assert_eq!(client, ClientState::new());
    assert!(effects.is_empty());
}
