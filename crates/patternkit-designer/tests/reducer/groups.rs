use patternkit_designer::action::{ById, GroupRegroup, GroupUpdate, SelectionSet};
use patternkit_designer::model::{PathGroup, Selection, SelectionKind};
use patternkit_designer::{initial_state, ControlAction, Reducer, UndoableAction};

use crate::common::*;

fn select(kind: SelectionKind, ids: &[&str]) -> patternkit_designer::Action {
    UndoableAction::SelectionSet(SelectionSet {
        selection: Some(Selection::new(
            kind,
            ids.iter().map(|id| id.to_string()).collect(),
        )),
    })
    .into()
}

#[test]
fn test_group_delete_cascades_to_paths() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            create(square(0.0, 0.0, 1.0)),
            create(square(5.0, 5.0, 1.0)),
            select(SelectionKind::PathGroup, &["0", "2"]),
        ],
    );
    let before = state.without_history();

    let state = reducer.reduce(
        state,
        UndoableAction::GroupDelete(ById { id: "0".into() }).into(),
    );
    assert_eq!(ids(&state), vec!["3".to_string()]);
    assert!(!state.path_groups.contains_key("0"));
    assert_eq!(state.selection.as_ref().unwrap().ids, vec!["2".to_string()]);

    let undone = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), before);
}

#[test]
fn test_group_delete_clears_member_selection() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            create(square(0.0, 0.0, 1.0)),
            select(SelectionKind::Path, &["1"]),
            UndoableAction::GroupDelete(ById { id: "0".into() }).into(),
        ],
    );
    assert!(state.paths.is_empty());
    assert_eq!(state.selection, None);
}

#[test]
fn test_group_update_creates_and_undo_removes() {
    let reducer = Reducer::default();
    let start = initial_state();
    let mut group = PathGroup::new("ignored");
    group.hide = true;

    let state = reducer.reduce(
        start.clone(),
        UndoableAction::GroupUpdate(GroupUpdate {
            id: "g".into(),
            group: group.clone(),
        })
        .into(),
    );
    assert_eq!(state.path_groups["g"].id, "g");
    assert!(state.path_groups["g"].hide);

    // Writing the same group again is not an edit.
    let state = reducer.reduce(
        state,
        UndoableAction::GroupUpdate(GroupUpdate {
            id: "g".into(),
            group,
        })
        .into(),
    );
    assert_eq!(depth(&state), 1);

    let undone = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), start.without_history());
}

#[test]
fn test_group_regroup_into_new_group() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            create(square(0.0, 0.0, 1.0)),
            create(square(5.0, 5.0, 1.0)),
        ],
    );
    let before = state.without_history();

    let state = reducer.reduce(
        state,
        UndoableAction::GroupRegroup(GroupRegroup {
            selection: Selection::new(SelectionKind::Path, vec!["1".into(), "3".into()]),
            group: None,
        })
        .into(),
    );
    assert_eq!(state.next_id, 5);
    assert_eq!(state.paths["1"].group.as_deref(), Some("4"));
    assert_eq!(state.paths["3"].group.as_deref(), Some("4"));

    let undone = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), before);
}

#[test]
fn test_group_regroup_into_existing_group() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            create(square(0.0, 0.0, 1.0)),
            create(square(5.0, 5.0, 1.0)),
            UndoableAction::GroupRegroup(GroupRegroup {
                selection: Selection::new(SelectionKind::PathGroup, vec!["2".into()]),
                group: Some("0".into()),
            })
            .into(),
        ],
    );
    assert_eq!(state.paths["3"].group.as_deref(), Some("0"));

    // Already in the group: nothing to record.
    let depth_before = depth(&state);
    let state = reducer.reduce(
        state,
        UndoableAction::GroupRegroup(GroupRegroup {
            selection: Selection::new(SelectionKind::Path, vec!["3".into()]),
            group: Some("0".into()),
        })
        .into(),
    );
    assert_eq!(depth(&state), depth_before);
}
