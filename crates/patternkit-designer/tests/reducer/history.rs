use patternkit_designer::action::PaletteUpdate;
use patternkit_designer::{
    get_historical_action, initial_state, Action, ControlAction, Reducer, State, UndoableAction,
};

use crate::common::*;

fn palette(color: &str) -> Action {
    UndoableAction::PaletteUpdate(PaletteUpdate {
        colors: vec![color.to_string()],
    })
    .into()
}

fn switch(branch: usize) -> Action {
    ControlAction::HistorySwitch { branch }.into()
}

fn colors(state: &State) -> &str {
    &state.palette[0]
}

#[test]
fn test_undo_redo_walks_the_history() {
    let reducer = Reducer::default();
    let state = apply(&reducer, initial_state(), [palette("a"), palette("b")]);

    let state = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(colors(&state), "a");
    let state = reducer.reduce(state, ControlAction::Redo.into());
    assert_eq!(colors(&state), "b");

    // Redo at the tip and undo past the start are no-ops.
    let tip = reducer.reduce(state.clone(), ControlAction::Redo.into());
    assert_eq!(tip, state);
    let state = apply(
        &reducer,
        state,
        [
            ControlAction::Undo.into(),
            ControlAction::Undo.into(),
            ControlAction::Undo.into(),
        ],
    );
    assert_eq!(state.palette, initial_state().palette);
    assert!(!state.history.can_undo());
}

#[test]
fn test_edit_after_undo_forks_a_branch() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            palette("a"),
            palette("b"),
            palette("c"),
            ControlAction::Undo.into(),
            ControlAction::Undo.into(),
            palette("x"),
        ],
    );
    assert_eq!(colors(&state), "x");
    assert_eq!(state.history.current_branch, 1);
    assert_eq!(state.history.branches.len(), 2);
    assert_eq!(state.history.branches[&0].items.len(), 3);
    assert_eq!(depth(&state), 2);

    let newest = get_historical_action(&state.history, 1).unwrap().unwrap();
    assert_eq!(newest.branch, 1);
    let parent = get_historical_action(&state.history, 2).unwrap().unwrap();
    assert_eq!((parent.branch, parent.idx), (0, 0));
}

#[test]
fn test_history_switch_replays_branches() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            palette("a"),
            palette("b"),
            palette("c"),
            ControlAction::Undo.into(),
            ControlAction::Undo.into(),
            palette("x"),
        ],
    );

    let state = reducer.reduce(state, switch(0));
    assert_eq!(colors(&state), "c");
    assert_eq!(state.history.current_branch, 0);
    assert_eq!(depth(&state), 3);

    let state = reducer.reduce(state, switch(1));
    assert_eq!(colors(&state), "x");
    assert_eq!(depth(&state), 2);

    let state = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(colors(&state), "a");
}

#[test]
fn test_history_switch_to_unknown_branch_is_ignored() {
    let reducer = Reducer::default();
    let state = reducer.reduce(initial_state(), palette("a"));
    let after = reducer.reduce(state.clone(), switch(7));
    assert_eq!(after, state);
}

#[test]
fn test_reset_replaces_state() {
    let reducer = Reducer::default();
    let state = apply(&reducer, initial_state(), [palette("a"), palette("b")]);
    let replacement = apply(&reducer, initial_state(), [palette("z")]);

    let state = reducer.reduce(
        state,
        ControlAction::Reset {
            state: Box::new(replacement.clone()),
        }
        .into(),
    );
    assert_eq!(state, replacement);
}

#[test]
fn test_unrecognized_action_is_ignored() {
    let reducer = Reducer::default();
    let state = reducer.reduce(initial_state(), palette("a"));
    let action: Action = serde_json::from_str(r#"{"type": "layer:explode", "id": "1"}"#).unwrap();
    let after = reducer.reduce(state.clone(), action);
    assert_eq!(after, state);
}

#[test]
fn test_malformed_payload_is_ignored_not_misapplied() {
    let reducer = Reducer::default();
    let state = reducer.reduce(initial_state(), create(square(0.0, 0.0, 2.0)));
    let actions: Vec<Action> = serde_json::from_str(
        r#"[
            {"type": "path:delete", "id": 1},
            {"type": "history:switch", "branch": "main"}
        ]"#,
    )
    .unwrap();
    for action in actions {
        assert_eq!(action.rejection().map(|r| r.contains("invalid type")), Some(true));
        let after = reducer.reduce(state.clone(), action);
        assert_eq!(after, state);
    }
    assert_eq!(state.paths.len(), 1);
}

#[test]
fn test_replays_json_actions() {
    let reducer = Reducer::default();
    let actions: Vec<Action> = serde_json::from_str(
        r#"[
            {"type": "path:create", "origin": {"x": 0, "y": 0}, "segments": [
                {"type": "Line", "to": {"x": 4, "y": 0}},
                {"type": "Line", "to": {"x": 4, "y": 4}},
                {"type": "Line", "to": {"x": 0, "y": 0}}
            ]},
            {"type": "selection:set", "selection": {"type": "Path", "ids": ["1"]}},
            {"type": "gcode:item:are", "are": {"type": "add", "key": 0, "value": {"type": "Pause", "message": "swap bit"}}},
            {"type": "undo"},
            {"type": "redo"}
        ]"#,
    )
    .unwrap();

    let state = apply(&reducer, initial_state(), actions);
    assert_eq!(state.paths.len(), 1);
    assert_eq!(state.selection.as_ref().unwrap().ids, vec!["1".to_string()]);
    assert_eq!(state.gcode.items.len(), 1);
    assert_eq!(depth(&state), 3);
}

#[test]
fn test_state_with_history_survives_json() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            create(square(0.0, 0.0, 2.0)),
            palette("a"),
            ControlAction::Undo.into(),
            palette("b"),
        ],
    );
    let json = serde_json::to_string(&state).unwrap();
    let restored: State = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);

    let undone = reducer.reduce(restored, ControlAction::Undo.into());
    assert_eq!(undone.palette, initial_state().palette);
}
