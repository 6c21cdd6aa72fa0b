use patternkit_core::Coord;
use patternkit_designer::action::{
    ById, ClipAdd, ClipCut, OverlayAdd, OverlayUpdate, SelectionSet, TilingAdd, TilingUpdate,
};
use patternkit_designer::model::{Selection, SelectionKind, TilingShape};
use patternkit_designer::{initial_state, Action, ControlAction, Reducer, UndoableAction};

use crate::common::*;

fn clip_square(x: f64, y: f64, size: f64, outside: bool) -> Action {
    let shape = square(x, y, size);
    UndoableAction::ClipAdd(ClipAdd {
        origin: shape.origin,
        segments: shape.segments,
        outside,
    })
    .into()
}

fn cut(clip: &str) -> Action {
    UndoableAction::ClipCut(ClipCut { clip: clip.into() }).into()
}

#[test]
fn test_clip_cut_inside_drops_outer_paths() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            create(square(1.0, 1.0, 2.0)),
            create(square(20.0, 20.0, 2.0)),
            clip_square(0.0, 0.0, 10.0, false),
            UndoableAction::SelectionSet(SelectionSet {
                selection: Some(Selection::new(SelectionKind::Path, vec!["3".into()])),
            })
            .into(),
        ],
    );
    assert_eq!(state.clips["4"].id, "4");
    let before = state.without_history();

    let state = reducer.reduce(state, cut("4"));
    assert_eq!(ids(&state), vec!["1".to_string()]);
    assert_eq!(state.selection, None);

    let undone = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), before);
}

#[test]
fn test_clip_cut_outside_keeps_outer_paths() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            create(square(1.0, 1.0, 2.0)),
            create(square(20.0, 20.0, 2.0)),
            clip_square(0.0, 0.0, 10.0, true),
            cut("4"),
        ],
    );
    assert_eq!(ids(&state), vec!["3".to_string()]);
}

#[test]
fn test_clip_cut_without_changes_is_ignored() {
    let reducer = Reducer::default();
    let state = apply(
        &reducer,
        initial_state(),
        [
            create(square(1.0, 1.0, 2.0)),
            clip_square(0.0, 0.0, 10.0, false),
        ],
    );
    let after = reducer.reduce(state.clone(), cut("2"));
    assert_eq!(after, state);
    let missing = reducer.reduce(state.clone(), cut("nope"));
    assert_eq!(missing, state);
}

#[test]
fn test_overlay_lifecycle() {
    let reducer = Reducer::default();
    let start = initial_state();
    let state = reducer.reduce(
        start.clone(),
        UndoableAction::OverlayAdd(OverlayAdd {
            source: "photo.png".into(),
        })
        .into(),
    );
    let mut overlay = state.overlays["0"].clone();
    assert_eq!(overlay.source, "photo.png");
    overlay.opacity = 0.25;

    let state = apply(
        &reducer,
        state,
        [
            UndoableAction::OverlayUpdate(OverlayUpdate { overlay }).into(),
            UndoableAction::OverlayDelete(ById { id: "0".into() }).into(),
        ],
    );
    assert!(state.overlays.is_empty());

    let state = reducer.reduce(state, ControlAction::Undo.into());
    assert_eq!(state.overlays["0"].opacity, 0.25);
    let state = apply(
        &reducer,
        state,
        [ControlAction::Undo.into(), ControlAction::Undo.into()],
    );
    assert_eq!(state.without_history(), start.without_history());
}

#[test]
fn test_tiling_lifecycle() {
    let reducer = Reducer::default();
    let shape = TilingShape::Parallelogram {
        points: [
            Coord::ZERO,
            Coord::new(1.0, 0.0),
            Coord::new(1.0, 1.0),
            Coord::new(0.0, 1.0),
        ],
    };
    let state = reducer.reduce(
        initial_state(),
        UndoableAction::TilingAdd(TilingAdd {
            shape,
            cache: vec![],
        })
        .into(),
    );
    let mut tiling = state.tilings["0"].clone();
    tiling.cache = vec![[Coord::ZERO, Coord::new(1.0, 1.0)]];
    let before_update = state.without_history();

    let state = reducer.reduce(
        state,
        UndoableAction::TilingUpdate(TilingUpdate { tiling }).into(),
    );
    assert_eq!(state.tilings["0"].cache.len(), 1);
    let state = reducer.reduce(
        state,
        UndoableAction::TilingDelete(ById { id: "0".into() }).into(),
    );
    assert!(state.tilings.is_empty());

    let state = apply(
        &reducer,
        state,
        [ControlAction::Undo.into(), ControlAction::Undo.into()],
    );
    assert_eq!(state.without_history(), before_update);
}
