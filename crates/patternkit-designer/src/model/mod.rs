//! Entity types held by the editor [`State`](crate::State).
//!
//! Every entity table is keyed by a string id allocated from the state's
//! `next_id` counter. Cross references between entities (a path's group, a
//! guide's mirror) are stored as ids and looked up on demand.

mod animation;
mod entities;
mod gcode;
mod guide;
mod path;

use serde::{Deserialize, Serialize};

pub use animation::{
    Animations, Script, ScriptPhase, SlotContents, Timeline, TimelineLane, TimelineSlot,
};
pub use entities::{Clip, Overlay, Tiling, TilingShape};
pub use gcode::{GCode, GCodeItem};
pub use guide::{Guide, GuideGeom, GuideKind, Pending};
pub use path::{Color, Fill, Path, PathGroup, Segment, Style, StyleLine};

/// Entity identifier, allocated from `State::next_id` as a decimal string.
pub type Id = String;

/// The entity table a selection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionKind {
    Guide,
    Mirror,
    Path,
    PathGroup,
    Overlay,
    Tiling,
    Clip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(rename = "type")]
    pub kind: SelectionKind,
    pub ids: Vec<Id>,
}

impl Selection {
    pub fn new(kind: SelectionKind, ids: Vec<Id>) -> Self {
        Self { kind, ids }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }
}
