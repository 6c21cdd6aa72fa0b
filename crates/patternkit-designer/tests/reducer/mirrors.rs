use patternkit_core::{Coord, Mirror, MirrorParent};
use patternkit_designer::action::{ById, GuideAdd, MirrorActive, MirrorChange};
use patternkit_designer::model::GuideGeom;
use patternkit_designer::{initial_state, ControlAction, Reducer, UndoableAction};

use crate::common::*;

fn child_of(parent: &str) -> Mirror {
    Mirror::new("", Coord::new(3.0, 0.0), Coord::new(3.0, 1.0))
        .with_reflect(true)
        .with_parent(MirrorParent::Id(parent.into()))
}

#[test]
fn test_mirror_add_becomes_active() {
    let reducer = Reducer::default();
    let start = initial_state();
    let state = reducer.reduce(start.clone(), add_mirror(rotational_mirror(3)));
    assert_eq!(state.active_mirror.as_deref(), Some("0"));
    assert_eq!(state.mirrors["0"].id, "0");

    let undone = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), start.without_history());
}

#[test]
fn test_mirror_add_with_unknown_parent_is_refused() {
    let reducer = Reducer::default();
    let state = reducer.reduce(initial_state(), add_mirror(child_of("ghost")));
    assert!(state.mirrors.is_empty());
    assert_eq!(depth(&state), 0);
    assert_eq!(state.next_id, 0);
}

#[test]
fn test_mirror_change_cycle_is_refused() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [add_mirror(rotational_mirror(2)), add_mirror(child_of("0"))],
    );
    let before = state.clone();

    let state = reducer.reduce(
        state,
        UndoableAction::MirrorChange(MirrorChange {
            id: "0".into(),
            mirror: rotational_mirror(2).with_parent(MirrorParent::Id("1".into())),
        })
        .into(),
    );
    assert_eq!(state, before);
}

#[test]
fn test_mirror_change_and_undo() {
    let reducer = Reducer::default();
    let state = reducer.reduce(initial_state(), add_mirror(rotational_mirror(2)));
    let before = state.without_history();

    let state = reducer.reduce(
        state,
        UndoableAction::MirrorChange(MirrorChange {
            id: "0".into(),
            mirror: rotational_mirror(6),
        })
        .into(),
    );
    assert_eq!(state.mirrors["0"].rotational.len(), 5);
    assert_eq!(state.mirrors["0"].id, "0");

    let undone = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), before);
}

#[test]
fn test_mirror_delete_detaches_references() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            add_mirror(rotational_mirror(2)),
            add_mirror(child_of("0")),
            UndoableAction::GuideAdd(GuideAdd {
                geom: GuideGeom::Line {
                    p1: Coord::ZERO,
                    p2: Coord::new(1.0, 1.0),
                    limit: false,
                },
                mirror: Some("0".into()),
                basic: false,
            })
            .into(),
            UndoableAction::MirrorActive(MirrorActive {
                id: Some("0".into()),
            })
            .into(),
        ],
    );
    let before = state.without_history();

    let state = reducer.reduce(
        state,
        UndoableAction::MirrorDelete(ById { id: "0".into() }).into(),
    );
    assert!(!state.mirrors.contains_key("0"));
    assert_eq!(state.active_mirror, None);
    assert_eq!(state.guides["2"].mirror, None);
    assert_eq!(state.mirrors["1"].parent, None);

    let undone = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), before);
}

#[test]
fn test_mirror_active_validates_id() {
    let reducer = Reducer::default();
    let state = reducer.reduce(initial_state(), add_mirror(rotational_mirror(2)));

    let unknown = reducer.reduce(
        state.clone(),
        UndoableAction::MirrorActive(MirrorActive {
            id: Some("nope".into()),
        })
        .into(),
    );
    assert_eq!(unknown, state);

    let cleared = reducer.reduce(
        state,
        UndoableAction::MirrorActive(MirrorActive { id: None }).into(),
    );
    assert_eq!(cleared.active_mirror, None);
    let restored = reducer.reduce(cleared, ControlAction::Undo.into());
    assert_eq!(restored.active_mirror.as_deref(), Some("0"));
}
