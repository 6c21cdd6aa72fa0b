use patternkit_core::Coord;
use serde::{Deserialize, Serialize};

use super::Id;

/// One step of a contour, continuing from the previous point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Segment {
    Line {
        to: Coord,
    },
    /// Circular arc around `center`; `clockwise` as drawn on screen (y down).
    Arc {
        center: Coord,
        to: Coord,
        clockwise: bool,
    },
    Quad {
        control: Coord,
        to: Coord,
    },
}

impl Segment {
    pub fn to(&self) -> Coord {
        match *self {
            Segment::Line { to } | Segment::Arc { to, .. } | Segment::Quad { to, .. } => to,
        }
    }
}

/// Palette index or CSS color string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Index(usize),
    Css(String),
}

impl Default for Color {
    fn default() -> Self {
        Color::Index(0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fill {
    pub color: Color,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub inset: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleLine {
    pub color: Color,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub inset: Option<f64>,
}

/// Fill and stroke layers; `None` entries are placeholders for removed layers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    #[serde(default)]
    pub fills: Vec<Option<Fill>>,
    #[serde(default)]
    pub lines: Vec<Option<StyleLine>>,
}

impl Style {
    /// Style given to freshly drawn paths: closed shapes are filled, open
    /// ones are stroked.
    pub fn for_new_path(open: bool, line_width: f64) -> Self {
        if open {
            Style {
                fills: vec![],
                lines: vec![Some(StyleLine {
                    color: Color::default(),
                    width: Some(line_width),
                    inset: None,
                })],
            }
        } else {
            Style {
                fills: vec![Some(Fill::default())],
                lines: vec![],
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub id: Id,
    pub origin: Coord,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub group: Option<Id>,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub ordering: Option<i64>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub created: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathGroup {
    pub id: Id,
    /// Parent group.
    #[serde(default)]
    pub group: Option<Id>,
    #[serde(default)]
    pub hide: bool,
}

impl PathGroup {
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            group: None,
            hide: false,
        }
    }
}
