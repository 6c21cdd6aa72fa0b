use std::collections::{BTreeMap, HashSet};

use patternkit_core::{Coord, MirrorParent};
use patternkit_designer::action::{ById, PathMultiply, PathUpdateMany};
use patternkit_designer::model::{Path, Selection, SelectionKind};
use patternkit_designer::path_ops::{canonical_key, path_to_segment_keys};
use patternkit_designer::{initial_state, ControlAction, Reducer, UndoableAction};

use crate::common::*;

#[test]
fn test_path_create_square_from_initial_state() {
    let reducer = Reducer::default();
    let start = initial_state();
    let state = reducer.reduce(start.clone(), create(square(0.0, 0.0, 10.0)));

    assert_eq!(state.paths.len(), 1);
    assert_eq!(state.path_groups.len(), 1);
    assert_eq!(state.next_id, start.next_id + 2);
    let path = &state.paths["1"];
    assert_eq!(path.group.as_deref(), Some("0"));
    assert_eq!(path.origin, Coord::new(0.0, 0.0));
    assert_eq!(path.segments.len(), 4);
    assert_eq!(depth(&state), 1);

    let undone = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), start.without_history());
    assert!(undone.history.can_redo());
}

#[test]
fn test_path_create_merges_collinear_segments() {
    let reducer = Reducer::default();
    let mut input = square(0.0, 0.0, 10.0);
    input.segments.insert(
        0,
        patternkit_designer::model::Segment::Line {
            to: Coord::new(5.0, 0.0),
        },
    );
    let state = reducer.reduce(initial_state(), create(input));
    assert_eq!(state.paths["1"].segments.len(), 4);
}

#[test]
fn test_path_create_empty_is_ignored() {
    let reducer = Reducer::default();
    let mut input = square(0.0, 0.0, 1.0);
    input.segments.clear();
    let state = reducer.reduce(initial_state(), create(input));
    assert!(state.paths.is_empty());
    assert_eq!(depth(&state), 0);
}

#[test]
fn test_path_create_through_active_mirror() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            add_mirror(rotational_mirror(2)),
            create(square(2.0, 2.0, 1.0)),
        ],
    );
    // One base path plus its half-turn copy, sharing a group.
    assert_eq!(state.paths.len(), 2);
    assert_eq!(state.path_groups.len(), 1);
    let groups: HashSet<_> = state.paths.values().map(|p| p.group.clone()).collect();
    assert_eq!(groups.len(), 1);
}

#[test]
fn test_path_create_skips_symmetric_copies() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            add_mirror(rotational_mirror(2)),
            create(square(-1.0, -1.0, 2.0)),
        ],
    );
    assert_eq!(state.paths.len(), 1);
}

#[test]
fn test_path_create_with_broken_active_mirror_is_ignored() {
    let reducer = Reducer::default();
    let mut state = initial_state();
    let mut broken = rotational_mirror(2).with_parent(MirrorParent::Id("ghost".into()));
    broken.id = "m".into();
    state.mirrors.insert("m".into(), broken);
    state.active_mirror = Some("m".into());

    let before = state.clone();
    let state = reducer.reduce(state, create(square(0.0, 0.0, 1.0)));
    assert_eq!(state, before);
}

#[test]
fn test_path_multiply_dedups_copies() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            create(rect(-2.0, -1.0, 4.0, 2.0)),
            add_mirror(rotational_mirror(4)),
        ],
    );
    let mirror = state.active_mirror.clone().unwrap();
    let before = state.without_history();

    let state = reducer.reduce(
        state,
        UndoableAction::PathMultiply(PathMultiply {
            selection: Selection::new(SelectionKind::Path, vec!["1".into()]),
            mirror,
        })
        .into(),
    );

    // Four rotations of a 4x2 rectangle give only two distinct outlines.
    assert_eq!(state.paths.len(), 2);
    let keys: HashSet<String> = state
        .paths
        .values()
        .map(|p| canonical_key(path_to_segment_keys(p.origin, &p.segments, 3)))
        .collect();
    assert_eq!(keys.len(), state.paths.len());
    let copy = state.paths.values().find(|p| p.id != "1").unwrap();
    assert_eq!(copy.group.as_deref(), Some("0"));

    let undone = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), before);
}

#[test]
fn test_path_multiply_groups_loose_paths() {
    let reducer = Reducer::default();
    let loose = Path {
        id: "loose".into(),
        origin: Coord::new(1.0, 1.0),
        segments: square(1.0, 1.0, 1.0).segments,
        open: false,
        group: None,
        style: Default::default(),
        ordering: None,
        hidden: false,
        created: 0,
    };
    let state = apply(
        &reducer,
        initial_state(),
        [
            UndoableAction::PathUpdateMany(PathUpdateMany {
                changed: BTreeMap::from([("loose".to_string(), loose.clone())]),
            })
            .into(),
            add_mirror(rotational_mirror(2)),
        ],
    );
    let before = state.without_history();

    let state = reducer.reduce(
        state,
        UndoableAction::PathMultiply(PathMultiply {
            selection: Selection::new(SelectionKind::Path, vec!["loose".into()]),
            mirror: "0".into(),
        })
        .into(),
    );
    assert_eq!(state.paths.len(), 2);
    assert_eq!(state.path_groups.len(), 1);
    let group = state.paths["loose"].group.clone().unwrap();
    assert!(state.paths.values().all(|p| p.group.as_ref() == Some(&group)));

    let undone = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), before);
    assert_eq!(undone.paths["loose"].group, None);
}

#[test]
fn test_path_update_many_undo_removes_inserted_paths() {
    let reducer = Reducer::default();
    let state = reducer.reduce(initial_state(), create(square(0.0, 0.0, 1.0)));
    let mut moved = state.paths["1"].clone();
    moved.hidden = true;
    let mut fresh = moved.clone();
    fresh.id = "new".into();
    let before = state.without_history();

    let state = reducer.reduce(
        state,
        UndoableAction::PathUpdateMany(PathUpdateMany {
            changed: BTreeMap::from([("1".to_string(), moved), ("new".to_string(), fresh)]),
        })
        .into(),
    );
    assert!(state.paths["1"].hidden);
    assert_eq!(state.paths["new"].id, "new");

    let undone = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), before);
}

#[test]
fn test_path_delete_prunes_selection() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            create(square(0.0, 0.0, 1.0)),
            create(square(5.0, 5.0, 1.0)),
            UndoableAction::SelectionSet(patternkit_designer::action::SelectionSet {
                selection: Some(Selection::new(
                    SelectionKind::Path,
                    vec!["1".into(), "3".into()],
                )),
            })
            .into(),
        ],
    );
    let before = state.without_history();

    let state = reducer.reduce(
        state,
        UndoableAction::PathDelete(ById { id: "1".into() }).into(),
    );
    assert_eq!(ids(&state), vec!["3".to_string()]);
    assert_eq!(state.selection.as_ref().unwrap().ids, vec!["3".to_string()]);

    let undone = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), before);
}

#[test]
fn test_path_delete_unknown_is_ignored() {
    let reducer = Reducer::default();
    let state = reducer.reduce(
        initial_state(),
        UndoableAction::PathDelete(ById { id: "nope".into() }).into(),
    );
    assert_eq!(state, initial_state());
}
