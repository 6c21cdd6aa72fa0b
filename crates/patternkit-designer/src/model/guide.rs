use patternkit_core::Coord;
use serde::{Deserialize, Serialize};

use super::Id;

/// The construction a guide performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuideKind {
    Line,
    Circle,
    PerpendicularBisector,
    Perpendicular,
    Split,
    Polygon,
    AngleBisector,
    InCircle,
    CircumCircle,
}

impl GuideKind {
    /// Number of clicked points needed to build this kind of guide.
    pub fn points(self) -> usize {
        match self {
            GuideKind::Line
            | GuideKind::Circle
            | GuideKind::PerpendicularBisector
            | GuideKind::Perpendicular
            | GuideKind::Split
            | GuideKind::Polygon => 2,
            GuideKind::AngleBisector | GuideKind::InCircle | GuideKind::CircumCircle => 3,
        }
    }

    /// Starting value of the adjustable extent, for kinds that have one.
    pub fn default_extent(self) -> Option<u32> {
        match self {
            GuideKind::Circle => Some(0),
            GuideKind::Split => Some(2),
            GuideKind::Polygon => Some(6),
            _ => None,
        }
    }

    pub(crate) fn min_extent(self) -> u32 {
        match self {
            GuideKind::Split => 2,
            GuideKind::Polygon => 3,
            _ => 0,
        }
    }
}

/// Guide geometry, one variant per [`GuideKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GuideGeom {
    Line {
        p1: Coord,
        p2: Coord,
        #[serde(default)]
        limit: bool,
    },
    /// `radius` is a point on the circle.
    Circle {
        center: Coord,
        radius: Coord,
        #[serde(default)]
        half: bool,
        #[serde(default)]
        multiples: u32,
    },
    PerpendicularBisector {
        p1: Coord,
        p2: Coord,
    },
    Perpendicular {
        p1: Coord,
        p2: Coord,
    },
    Split {
        p1: Coord,
        p2: Coord,
        count: u32,
    },
    Polygon {
        p1: Coord,
        p2: Coord,
        sides: u32,
        #[serde(default)]
        to_center: bool,
    },
    AngleBisector {
        p0: Coord,
        p1: Coord,
        p2: Coord,
    },
    InCircle {
        p1: Coord,
        p2: Coord,
        p3: Coord,
    },
    CircumCircle {
        p1: Coord,
        p2: Coord,
        p3: Coord,
    },
}

impl GuideGeom {
    pub fn kind(&self) -> GuideKind {
        match self {
            GuideGeom::Line { .. } => GuideKind::Line,
            GuideGeom::Circle { .. } => GuideKind::Circle,
            GuideGeom::PerpendicularBisector { .. } => GuideKind::PerpendicularBisector,
            GuideGeom::Perpendicular { .. } => GuideKind::Perpendicular,
            GuideGeom::Split { .. } => GuideKind::Split,
            GuideGeom::Polygon { .. } => GuideKind::Polygon,
            GuideGeom::AngleBisector { .. } => GuideKind::AngleBisector,
            GuideGeom::InCircle { .. } => GuideKind::InCircle,
            GuideGeom::CircumCircle { .. } => GuideKind::CircumCircle,
        }
    }

    /// The defining points, in construction order.
    pub fn points(&self) -> Vec<Coord> {
        match *self {
            GuideGeom::Line { p1, p2, .. }
            | GuideGeom::PerpendicularBisector { p1, p2 }
            | GuideGeom::Perpendicular { p1, p2 }
            | GuideGeom::Split { p1, p2, .. }
            | GuideGeom::Polygon { p1, p2, .. } => vec![p1, p2],
            GuideGeom::Circle { center, radius, .. } => vec![center, radius],
            GuideGeom::AngleBisector { p0, p1, p2 } => vec![p0, p1, p2],
            GuideGeom::InCircle { p1, p2, p3 } | GuideGeom::CircumCircle { p1, p2, p3 } => {
                vec![p1, p2, p3]
            }
        }
    }

    /// Returns a copy with every defining point passed through `f`.
    pub fn map_points(&self, f: impl Fn(Coord) -> Coord) -> GuideGeom {
        let mut geom = self.clone();
        match &mut geom {
            GuideGeom::Line { p1, p2, .. }
            | GuideGeom::PerpendicularBisector { p1, p2 }
            | GuideGeom::Perpendicular { p1, p2 }
            | GuideGeom::Split { p1, p2, .. }
            | GuideGeom::Polygon { p1, p2, .. } => {
                *p1 = f(*p1);
                *p2 = f(*p2);
            }
            GuideGeom::Circle { center, radius, .. } => {
                *center = f(*center);
                *radius = f(*radius);
            }
            GuideGeom::AngleBisector { p0, p1, p2 } => {
                *p0 = f(*p0);
                *p1 = f(*p1);
                *p2 = f(*p2);
            }
            GuideGeom::InCircle { p1, p2, p3 } | GuideGeom::CircumCircle { p1, p2, p3 } => {
                *p1 = f(*p1);
                *p2 = f(*p2);
                *p3 = f(*p3);
            }
        }
        geom
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub id: Id,
    pub geom: GuideGeom,
    #[serde(default)]
    pub active: bool,
    /// Created by the editor rather than the user.
    #[serde(default)]
    pub basic: bool,
    /// Mirror whose copies of this guide are drawn.
    #[serde(default)]
    pub mirror: Option<Id>,
}

/// In-progress construction driven by clicks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pending {
    Guide {
        kind: GuideKind,
        points: Vec<Coord>,
        #[serde(default)]
        extent: Option<u32>,
    },
}

impl Pending {
    pub fn guide(kind: GuideKind) -> Self {
        Pending::Guide {
            kind,
            points: vec![],
            extent: kind.default_extent(),
        }
    }
}
