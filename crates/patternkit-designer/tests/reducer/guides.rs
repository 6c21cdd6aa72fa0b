use patternkit_core::Coord;
use patternkit_designer::action::{
    ById, GuideAdd, GuideUpdate, PendingExtent, PendingPoint, PendingType,
};
use patternkit_designer::model::{GuideGeom, GuideKind, Pending};
use patternkit_designer::{initial_state, Action, ControlAction, Reducer, UndoableAction};

use crate::common::*;

fn pending(kind: Option<GuideKind>) -> Action {
    UndoableAction::PendingType(PendingType { kind }).into()
}

fn click(x: f64, y: f64) -> Action {
    UndoableAction::PendingPoint(PendingPoint {
        coord: Coord::new(x, y),
        shift: false,
    })
    .into()
}

fn extent(delta: i32) -> Action {
    UndoableAction::PendingExtent(PendingExtent { delta }).into()
}

#[test]
fn test_pending_line_materializes_on_second_point() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            add_mirror(rotational_mirror(2)),
            pending(Some(GuideKind::Line)),
            click(0.0, 0.0),
        ],
    );
    assert_eq!(
        state.pending,
        Some(Pending::Guide {
            kind: GuideKind::Line,
            points: vec![Coord::ZERO],
            extent: None,
        })
    );
    assert!(state.guides.is_empty());

    let state = reducer.reduce(state, click(4.0, 0.0));
    assert_eq!(state.pending, None);
    let guide = &state.guides["1"];
    assert_eq!(guide.mirror.as_deref(), Some("0"));
    assert!(guide.active);
    assert_eq!(
        guide.geom,
        GuideGeom::Line {
            p1: Coord::ZERO,
            p2: Coord::new(4.0, 0.0),
            limit: false,
        }
    );

    // Undo steps back through each click, then the kind choice.
    let state = reducer.reduce(state, ControlAction::Undo.into());
    assert!(state.guides.is_empty());
    assert_eq!(state.next_id, 1);
    assert!(matches!(&state.pending, Some(Pending::Guide { points, .. }) if points.len() == 1));
    let state = reducer.reduce(state, ControlAction::Undo.into());
    assert!(matches!(&state.pending, Some(Pending::Guide { points, .. }) if points.is_empty()));
    let state = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(state.pending, None);
}

#[test]
fn test_pending_point_without_construction_is_ignored() {
    let reducer = Reducer::default();
    let state = reducer.reduce(initial_state(), click(1.0, 1.0));
    assert_eq!(state, initial_state());
}

#[test]
fn test_pending_extent_clamps_to_minimum() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [pending(Some(GuideKind::Polygon)), extent(-10)],
    );
    assert!(matches!(state.pending, Some(Pending::Guide { extent: Some(3), .. })));

    let depth_before = depth(&state);
    let state = reducer.reduce(state, extent(-1));
    assert_eq!(depth(&state), depth_before);

    let state = apply(&reducer, state, [extent(2), click(0.0, 0.0), click(0.0, 5.0)]);
    assert!(matches!(
        state.guides["0"].geom,
        GuideGeom::Polygon { sides: 5, .. }
    ));
}

#[test]
fn test_pending_extent_needs_adjustable_kind() {
    let reducer = Reducer::default();
    let state = reducer.reduce(initial_state(), pending(Some(GuideKind::Line)));
    let after = reducer.reduce(state.clone(), extent(1));
    assert_eq!(after, state);
}

#[test]
fn test_pending_type_cancel() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [pending(Some(GuideKind::Circle)), pending(None)],
    );
    assert_eq!(state.pending, None);
    let state = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(state.pending, Some(Pending::guide(GuideKind::Circle)));
}

#[test]
fn test_repeated_pending_type_is_not_recorded() {
    let reducer = Reducer::default();
    let state = reducer.reduce(initial_state(), pending(Some(GuideKind::Circle)));
    assert_eq!(depth(&state), 1);
    let after = reducer.reduce(state.clone(), pending(Some(GuideKind::Circle)));
    assert_eq!(after, state);

    let after = reducer.reduce(initial_state(), pending(None));
    assert_eq!(after, initial_state());
}

#[test]
fn test_guide_edits_round_trip() {
    let reducer = Reducer::default();
    let geom = GuideGeom::Circle {
        center: Coord::ZERO,
        radius: Coord::new(2.0, 0.0),
        half: false,
        multiples: 0,
    };
    let state = reducer.reduce(
        initial_state(),
        UndoableAction::GuideAdd(GuideAdd {
            geom,
            mirror: None,
            basic: true,
        })
        .into(),
    );
    let added = state.without_history();
    let mut changed = state.guides["0"].clone();
    changed.basic = false;

    let state = apply(
        &reducer,
        state,
        [
            UndoableAction::GuideToggle(ById { id: "0".into() }).into(),
            UndoableAction::GuideUpdate(GuideUpdate {
                id: "0".into(),
                guide: changed,
            })
            .into(),
            UndoableAction::GuideDelete(ById { id: "0".into() }).into(),
        ],
    );
    assert!(state.guides.is_empty());

    let state = apply(
        &reducer,
        state,
        [
            ControlAction::Undo.into(),
            ControlAction::Undo.into(),
            ControlAction::Undo.into(),
        ],
    );
    assert_eq!(state.without_history(), added);
    assert!(state.guides["0"].active);
}
