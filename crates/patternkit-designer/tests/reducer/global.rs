use std::f64::consts::FRAC_PI_3;

use patternkit_core::Coord;
use patternkit_designer::action::{Flip, GlobalTransform, GuideAdd};
use patternkit_designer::model::{GuideGeom, Segment};
use patternkit_designer::{initial_state, ControlAction, Reducer, State, UndoableAction};

use crate::common::*;

fn transform(rotate: Option<f64>, flip: Option<Flip>) -> patternkit_designer::Action {
    UndoableAction::GlobalTransform(GlobalTransform { rotate, flip }).into()
}

fn document(reducer: &Reducer) -> State {
    apply(
        reducer,
        initial_state(),
        [
            add_mirror(rotational_mirror(1)),
            create(square(1.0, 2.0, 3.0)),
            UndoableAction::GuideAdd(GuideAdd {
                geom: GuideGeom::Line {
                    p1: Coord::new(1.0, 0.0),
                    p2: Coord::new(2.0, 5.0),
                    limit: false,
                },
                mirror: None,
                basic: false,
            })
            .into(),
        ],
    )
}

fn all_points(state: &State) -> Vec<Coord> {
    let mut points = Vec::new();
    for path in state.paths.values() {
        points.push(path.origin);
        points.extend(path.segments.iter().map(Segment::to));
    }
    for guide in state.guides.values() {
        points.extend(guide.geom.points());
    }
    for mirror in state.mirrors.values() {
        points.push(mirror.origin);
        points.push(mirror.point);
    }
    points
}

#[test]
fn test_flip_is_exact_and_reversible() {
    let reducer = Reducer::default();
    let state = document(&reducer);
    let before = state.without_history();

    let flipped = reducer.reduce(state, transform(None, Some(Flip::H)));
    let path = flipped.paths.values().next().unwrap();
    assert_eq!(path.origin, Coord::new(-1.0, 2.0));
    assert_eq!(flipped.mirrors["0"].point, Coord::new(-1.0, 0.0));
    assert!(matches!(
        flipped.guides.values().next().unwrap().geom,
        GuideGeom::Line { p2, .. } if p2 == Coord::new(-2.0, 5.0)
    ));

    let undone = reducer.reduce(flipped, ControlAction::Undo.into());
    assert_eq!(undone.without_history(), before);
}

#[test]
fn test_flip_vertical() {
    let reducer = Reducer::default();
    let state = reducer.reduce(document(&reducer), transform(None, Some(Flip::V)));
    let path = state.paths.values().next().unwrap();
    assert_eq!(path.origin, Coord::new(1.0, -2.0));
}

#[test]
fn test_rotation_round_trip_within_tolerance() {
    let reducer = Reducer::default();
    let state = document(&reducer);
    let before = all_points(&state);

    let rotated = reducer.reduce(state, transform(Some(FRAC_PI_3), Some(Flip::H)));
    assert_ne!(all_points(&rotated), before);

    let undone = reducer.reduce(rotated, ControlAction::Undo.into());
    let after = all_points(&undone);
    assert_eq!(after.len(), before.len());
    for (a, b) in after.iter().zip(&before) {
        assert!(a.distance_to(b) < 1e-9, "{a:?} vs {b:?}");
    }
}

#[test]
fn test_empty_transform_is_ignored() {
    let reducer = Reducer::default();
    let state = document(&reducer);
    let after = reducer.reduce(state.clone(), transform(None, None));
    assert_eq!(after, state);
}
