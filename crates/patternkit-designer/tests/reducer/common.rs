use patternkit_core::{Coord, Mirror};
use patternkit_designer::action::{MirrorAdd, PathCreate};
use patternkit_designer::model::Segment;
use patternkit_designer::{reachable_depth, Action, Reducer, State, UndoableAction};

/// Clockwise square with its top-left corner at `(x, y)`.
pub fn square(x: f64, y: f64, size: f64) -> PathCreate {
    rect(x, y, size, size)
}

pub fn rect(x: f64, y: f64, w: f64, h: f64) -> PathCreate {
    PathCreate {
        origin: Coord::new(x, y),
        segments: vec![
            Segment::Line {
                to: Coord::new(x + w, y),
            },
            Segment::Line {
                to: Coord::new(x + w, y + h),
            },
            Segment::Line {
                to: Coord::new(x, y + h),
            },
            Segment::Line {
                to: Coord::new(x, y),
            },
        ],
        open: false,
        created: 0,
    }
}

/// Rotational mirror about the origin with `folds` copies (1 = identity only).
pub fn rotational_mirror(folds: usize) -> Mirror {
    Mirror::new("", Coord::ZERO, Coord::new(1.0, 0.0))
        .with_rotational(vec![true; folds.saturating_sub(1)])
}

pub fn add_mirror(mirror: Mirror) -> Action {
    UndoableAction::MirrorAdd(MirrorAdd { mirror }).into()
}

pub fn create(path: PathCreate) -> Action {
    UndoableAction::PathCreate(path).into()
}

pub fn apply(reducer: &Reducer, state: State, actions: impl IntoIterator<Item = Action>) -> State {
    actions
        .into_iter()
        .fold(state, |state, action| reducer.reduce(state, action))
}

pub fn depth(state: &State) -> usize {
    reachable_depth(&state.history)
}

pub fn ids(state: &State) -> Vec<String> {
    state.paths.keys().cloned().collect()
}
