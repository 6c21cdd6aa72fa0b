use patternkit_core::Coord;
use serde::{Deserialize, Serialize};

use super::{Id, Segment};

/// A clipping contour applied by `clip:cut`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: Id,
    pub origin: Coord,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub active: bool,
    /// Keep what lies outside the contour instead of inside.
    #[serde(default)]
    pub outside: bool,
}

/// A reference image drawn under or over the pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub id: Id,
    pub source: String,
    pub center: Coord,
    pub scale: Coord,
    pub opacity: f64,
    #[serde(default)]
    pub hide: bool,
    #[serde(default)]
    pub over: bool,
}

impl Overlay {
    pub fn new(id: impl Into<Id>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            center: Coord::ZERO,
            scale: Coord::new(1.0, 1.0),
            opacity: 1.0,
            hide: false,
            over: false,
        }
    }
}

/// The fundamental region a tiling repeats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TilingShape {
    RightTriangle {
        start: Coord,
        corner: Coord,
        end: Coord,
        #[serde(default)]
        rotate_hypotenuse: bool,
    },
    IsocelesTriangle {
        first: Coord,
        second: Coord,
        third: Coord,
    },
    EquilateralTriangle {
        first: Coord,
        second: Coord,
        third: Coord,
    },
    Parallelogram {
        points: [Coord; 4],
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tiling {
    pub id: Id,
    pub shape: TilingShape,
    /// Line segments produced by the tiling engine for this shape.
    #[serde(default)]
    pub cache: Vec<[Coord; 2]>,
}
