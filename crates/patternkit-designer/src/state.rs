//! The editor document and its initial value.

use std::collections::BTreeMap;

use patternkit_core::{Coord, Mirror};
use serde::{Deserialize, Serialize};

use crate::history::History;
use crate::model::{
    Animations, Clip, GCode, Guide, Id, Overlay, Path, PathGroup, Pending, Selection, Tiling,
};

/// Current document format version.
pub const STATE_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created: i64,
    /// Pixels per inch used when exporting at physical size.
    pub ppi: f64,
    #[serde(default)]
    pub license: String,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            description: String::new(),
            created: 0,
            ppi: 96.0,
            license: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub center: Coord,
    pub zoom: f64,
    #[serde(default)]
    pub show_guides: bool,
    #[serde(default)]
    pub background: Option<String>,
}

impl Default for View {
    fn default() -> Self {
        Self {
            center: Coord::ZERO,
            zoom: 1.0,
            show_guides: true,
            background: None,
        }
    }
}

/// The whole editable document, including its undo history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub version: u32,
    pub next_id: u64,
    #[serde(default)]
    pub history: History,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub view: View,
    #[serde(default)]
    pub pending: Option<Pending>,
    #[serde(default)]
    pub guides: BTreeMap<Id, Guide>,
    #[serde(default)]
    pub paths: BTreeMap<Id, Path>,
    #[serde(default)]
    pub path_groups: BTreeMap<Id, PathGroup>,
    #[serde(default)]
    pub mirrors: BTreeMap<Id, Mirror>,
    #[serde(default)]
    pub active_mirror: Option<Id>,
    #[serde(default)]
    pub clips: BTreeMap<Id, Clip>,
    #[serde(default)]
    pub overlays: BTreeMap<Id, Overlay>,
    #[serde(default)]
    pub tilings: BTreeMap<Id, Tiling>,
    #[serde(default)]
    pub selection: Option<Selection>,
    #[serde(default)]
    pub animations: Animations,
    #[serde(default)]
    pub gcode: GCode,
    #[serde(default)]
    pub palette: Vec<String>,
}

impl Default for State {
    fn default() -> Self {
        initial_state()
    }
}

/// An empty document with a fresh history.
pub fn initial_state() -> State {
    State {
        version: STATE_VERSION,
        next_id: 0,
        history: History::default(),
        meta: Meta::default(),
        view: View::default(),
        pending: None,
        guides: BTreeMap::new(),
        paths: BTreeMap::new(),
        path_groups: BTreeMap::new(),
        mirrors: BTreeMap::new(),
        active_mirror: None,
        clips: BTreeMap::new(),
        overlays: BTreeMap::new(),
        tilings: BTreeMap::new(),
        selection: None,
        animations: Animations::default(),
        gcode: GCode::default(),
        palette: vec![
            "#000000".to_string(),
            "#ffffff".to_string(),
            "#e74c3c".to_string(),
            "#3498db".to_string(),
        ],
    }
}

impl State {
    /// Allocates the next entity id.
    pub fn alloc_id(&mut self) -> Id {
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }

    /// Copy of the document with an empty history, for comparing content.
    pub fn without_history(&self) -> State {
        State {
            history: History::default(),
            ..self.clone()
        }
    }

    /// Drops `ids` from the selection if it refers to their table.
    ///
    /// Returns the selection as it was before, so callers can record it.
    pub(crate) fn prune_selection(
        &mut self,
        kind: crate::model::SelectionKind,
        ids: &[&str],
    ) -> Option<Selection> {
        let prev = self.selection.clone();
        if let Some(selection) = &mut self.selection {
            if selection.kind == kind {
                selection.ids.retain(|id| !ids.contains(&id.as_str()));
                if selection.ids.is_empty() {
                    self.selection = None;
                }
            }
        }
        prev
    }
}
