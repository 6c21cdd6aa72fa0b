//! # Actions
//!
//! Every change to a [`State`](crate::State) is described by an [`Action`].
//! Edits ([`UndoableAction`]) are recorded in the history together with an
//! [`UndoAction`] holding the forward action and exactly the prior values it
//! overwrote. Control actions ([`ControlAction`]) drive the history itself.
//!
//! All three enums serialize as JSON objects tagged by a `type` field, e.g.
//! `{"type": "path:delete", "id": "4"}`.

use std::collections::BTreeMap;

use patternkit_core::{Coord, Mirror};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::{
    Clip, GCodeItem, Guide, GuideGeom, GuideKind, Id, Overlay, Path, PathGroup, Pending, Script,
    Segment, Selection, Tiling, TilingShape, TimelineLane, TimelineSlot,
};
use crate::state::{Meta, State, View};

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideAdd {
    pub geom: GuideGeom,
    #[serde(default)]
    pub mirror: Option<Id>,
    #[serde(default)]
    pub basic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideUpdate {
    pub id: Id,
    pub guide: Guide,
}

/// Payload shared by actions that only name an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ById {
    pub id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorAdd {
    /// The id is replaced by a freshly allocated one.
    pub mirror: Mirror,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorChange {
    pub id: Id,
    pub mirror: Mirror,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorActive {
    pub id: Option<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCreate {
    pub origin: Coord,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub created: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCreateMany {
    pub paths: Vec<PathCreate>,
    /// Also add copies through the active mirror.
    #[serde(default)]
    pub with_mirror: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathMultiply {
    pub selection: Selection,
    pub mirror: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathUpdate {
    pub id: Id,
    pub path: Path,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathUpdateMany {
    pub changed: BTreeMap<Id, Path>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMany {
    pub ids: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUpdate {
    pub id: Id,
    pub group: PathGroup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRegroup {
    pub selection: Selection,
    /// Existing target group; a new group is made when absent.
    #[serde(default)]
    pub group: Option<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipAdd {
    pub origin: Coord,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub outside: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipUpdate {
    pub id: Id,
    pub clip: Clip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipCut {
    pub clip: Id,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayAdd {
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayUpdate {
    pub overlay: Overlay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilingAdd {
    pub shape: TilingShape,
    #[serde(default)]
    pub cache: Vec<[Coord; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilingUpdate {
    pub tiling: Tiling,
}

/// Splice into an ordered list: insert at, replace at or remove at `key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AddRemoveEdit<T> {
    Add { key: usize, value: T },
    Edit { key: usize, value: T },
    Remove { key: usize },
}

impl<T> AddRemoveEdit<T> {
    pub fn key(&self) -> usize {
        match self {
            AddRemoveEdit::Add { key, .. }
            | AddRemoveEdit::Edit { key, .. }
            | AddRemoveEdit::Remove { key } => *key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCodeItemAre {
    pub are: AddRemoveEdit<GCodeItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOrder {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLaneAre {
    pub are: AddRemoveEdit<TimelineLane>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSlotAre {
    pub lane: usize,
    pub are: AddRemoveEdit<TimelineSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptUpdate {
    pub key: String,
    /// `None` deletes the script.
    pub script: Option<Script>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRename {
    pub key: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteUpdate {
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewUpdate {
    pub view: View,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaUpdate {
    pub meta: Meta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    pub selection: Option<Selection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flip {
    /// Mirror left to right.
    H,
    /// Mirror top to bottom.
    V,
}

/// Rotation (radians) and/or flip of the whole document about the origin.
/// Rotation is applied first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalTransform {
    #[serde(default)]
    pub rotate: Option<f64>,
    #[serde(default)]
    pub flip: Option<Flip>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingType {
    /// `None` cancels the pending construction.
    pub kind: Option<GuideKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingPoint {
    pub coord: Coord,
    /// Modifier held while clicking; selects the alternate form of the guide.
    #[serde(default)]
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingExtent {
    pub delta: i32,
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// An edit that is recorded in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UndoableAction {
    #[serde(rename = "guide:add")]
    GuideAdd(GuideAdd),
    #[serde(rename = "guide:update")]
    GuideUpdate(GuideUpdate),
    #[serde(rename = "guide:delete")]
    GuideDelete(ById),
    #[serde(rename = "guide:toggle")]
    GuideToggle(ById),

    #[serde(rename = "mirror:add")]
    MirrorAdd(MirrorAdd),
    #[serde(rename = "mirror:change")]
    MirrorChange(MirrorChange),
    #[serde(rename = "mirror:delete")]
    MirrorDelete(ById),
    #[serde(rename = "mirror:active")]
    MirrorActive(MirrorActive),

    #[serde(rename = "path:create")]
    PathCreate(PathCreate),
    #[serde(rename = "path:create:many")]
    PathCreateMany(PathCreateMany),
    #[serde(rename = "path:multiply")]
    PathMultiply(PathMultiply),
    #[serde(rename = "path:update")]
    PathUpdate(PathUpdate),
    #[serde(rename = "path:update:many")]
    PathUpdateMany(PathUpdateMany),
    #[serde(rename = "path:delete")]
    PathDelete(ById),
    #[serde(rename = "path:delete:many")]
    PathDeleteMany(DeleteMany),

    #[serde(rename = "group:update")]
    GroupUpdate(GroupUpdate),
    #[serde(rename = "group:delete")]
    GroupDelete(ById),
    #[serde(rename = "group:regroup")]
    GroupRegroup(GroupRegroup),

    #[serde(rename = "clip:add")]
    ClipAdd(ClipAdd),
    #[serde(rename = "clip:update")]
    ClipUpdate(ClipUpdate),
    #[serde(rename = "clip:cut")]
    ClipCut(ClipCut),

    #[serde(rename = "overlay:add")]
    OverlayAdd(OverlayAdd),
    #[serde(rename = "overlay:update")]
    OverlayUpdate(OverlayUpdate),
    #[serde(rename = "overlay:delete")]
    OverlayDelete(ById),

    #[serde(rename = "tiling:add")]
    TilingAdd(TilingAdd),
    #[serde(rename = "tiling:update")]
    TilingUpdate(TilingUpdate),
    #[serde(rename = "tiling:delete")]
    TilingDelete(ById),

    #[serde(rename = "gcode:item:are")]
    GCodeItemAre(GCodeItemAre),
    #[serde(rename = "gcode:item:order")]
    GCodeItemOrder(ListOrder),
    #[serde(rename = "timeline:lane:are")]
    TimelineLaneAre(TimelineLaneAre),
    #[serde(rename = "timeline:slot:are")]
    TimelineSlotAre(TimelineSlotAre),

    #[serde(rename = "script:update")]
    ScriptUpdate(ScriptUpdate),
    #[serde(rename = "script:rename")]
    ScriptRename(ScriptRename),

    #[serde(rename = "palette:update")]
    PaletteUpdate(PaletteUpdate),
    #[serde(rename = "view:update")]
    ViewUpdate(ViewUpdate),
    #[serde(rename = "meta:update")]
    MetaUpdate(MetaUpdate),
    #[serde(rename = "selection:set")]
    SelectionSet(SelectionSet),
    #[serde(rename = "global:transform")]
    GlobalTransform(GlobalTransform),

    #[serde(rename = "pending:type")]
    PendingType(PendingType),
    #[serde(rename = "pending:point")]
    PendingPoint(PendingPoint),
    #[serde(rename = "pending:extent")]
    PendingExtent(PendingExtent),
}

impl UndoableAction {
    /// The `type` tag, for logging.
    pub fn tag(&self) -> &'static str {
        match self {
            UndoableAction::GuideAdd(_) => "guide:add",
            UndoableAction::GuideUpdate(_) => "guide:update",
            UndoableAction::GuideDelete(_) => "guide:delete",
            UndoableAction::GuideToggle(_) => "guide:toggle",
            UndoableAction::MirrorAdd(_) => "mirror:add",
            UndoableAction::MirrorChange(_) => "mirror:change",
            UndoableAction::MirrorDelete(_) => "mirror:delete",
            UndoableAction::MirrorActive(_) => "mirror:active",
            UndoableAction::PathCreate(_) => "path:create",
            UndoableAction::PathCreateMany(_) => "path:create:many",
            UndoableAction::PathMultiply(_) => "path:multiply",
            UndoableAction::PathUpdate(_) => "path:update",
            UndoableAction::PathUpdateMany(_) => "path:update:many",
            UndoableAction::PathDelete(_) => "path:delete",
            UndoableAction::PathDeleteMany(_) => "path:delete:many",
            UndoableAction::GroupUpdate(_) => "group:update",
            UndoableAction::GroupDelete(_) => "group:delete",
            UndoableAction::GroupRegroup(_) => "group:regroup",
            UndoableAction::ClipAdd(_) => "clip:add",
            UndoableAction::ClipUpdate(_) => "clip:update",
            UndoableAction::ClipCut(_) => "clip:cut",
            UndoableAction::OverlayAdd(_) => "overlay:add",
            UndoableAction::OverlayUpdate(_) => "overlay:update",
            UndoableAction::OverlayDelete(_) => "overlay:delete",
            UndoableAction::TilingAdd(_) => "tiling:add",
            UndoableAction::TilingUpdate(_) => "tiling:update",
            UndoableAction::TilingDelete(_) => "tiling:delete",
            UndoableAction::GCodeItemAre(_) => "gcode:item:are",
            UndoableAction::GCodeItemOrder(_) => "gcode:item:order",
            UndoableAction::TimelineLaneAre(_) => "timeline:lane:are",
            UndoableAction::TimelineSlotAre(_) => "timeline:slot:are",
            UndoableAction::ScriptUpdate(_) => "script:update",
            UndoableAction::ScriptRename(_) => "script:rename",
            UndoableAction::PaletteUpdate(_) => "palette:update",
            UndoableAction::ViewUpdate(_) => "view:update",
            UndoableAction::MetaUpdate(_) => "meta:update",
            UndoableAction::SelectionSet(_) => "selection:set",
            UndoableAction::GlobalTransform(_) => "global:transform",
            UndoableAction::PendingType(_) => "pending:type",
            UndoableAction::PendingPoint(_) => "pending:point",
            UndoableAction::PendingExtent(_) => "pending:extent",
        }
    }
}

/// Actions that operate on the history rather than the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlAction {
    #[serde(rename = "undo")]
    Undo,
    #[serde(rename = "redo")]
    Redo,
    /// Replace the whole state, history included.
    #[serde(rename = "reset")]
    Reset { state: Box<State> },
    /// Move to the tip of another history branch.
    #[serde(rename = "history:switch")]
    HistorySwitch { branch: usize },
}

impl ControlAction {
    fn is_tag(tag: &str) -> bool {
        matches!(tag, "undo" | "redo" | "reset" | "history:switch")
    }
}

/// Anything the reducer accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Action {
    Edit(UndoableAction),
    Control(ControlAction),
    /// A tagged object that is not a valid action, either because the tag is
    /// unknown or because its payload does not parse. Kept verbatim.
    Unrecognized(Value),
}

impl Action {
    /// The `type` tag of the action as written.
    pub fn raw_tag(&self) -> &str {
        match self {
            Action::Edit(action) => action.tag(),
            Action::Control(ControlAction::Undo) => "undo",
            Action::Control(ControlAction::Redo) => "redo",
            Action::Control(ControlAction::Reset { .. }) => "reset",
            Action::Control(ControlAction::HistorySwitch { .. }) => "history:switch",
            Action::Unrecognized(raw) => raw.get("type").and_then(Value::as_str).unwrap_or(""),
        }
    }

    /// Why an [`Action::Unrecognized`] was rejected. `None` for valid actions.
    pub fn rejection(&self) -> Option<String> {
        let Action::Unrecognized(raw) = self else {
            return None;
        };
        let err = if ControlAction::is_tag(self.raw_tag()) {
            ControlAction::deserialize(raw).err()
        } else {
            UndoableAction::deserialize(raw).err()
        };
        Some(err.map_or_else(|| "unrecognized".to_string(), |err| err.to_string()))
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let tag = match raw.get("type") {
            Some(Value::String(tag)) => tag.as_str(),
            _ => return Err(de::Error::missing_field("type")),
        };
        let parsed = if ControlAction::is_tag(tag) {
            ControlAction::deserialize(&raw).map(Action::Control).ok()
        } else {
            UndoableAction::deserialize(&raw).map(Action::Edit).ok()
        };
        Ok(parsed.unwrap_or(Action::Unrecognized(raw)))
    }
}

impl From<UndoableAction> for Action {
    fn from(action: UndoableAction) -> Self {
        Action::Edit(action)
    }
}

impl From<ControlAction> for Action {
    fn from(action: ControlAction) -> Self {
        Action::Control(action)
    }
}

// ---------------------------------------------------------------------------
// Undo records
// ---------------------------------------------------------------------------

/// A single id taken from `next_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocated {
    pub id: Id,
    pub prev_next_id: u64,
}

/// Paths (and optionally a group) created by one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Added {
    pub ids: Vec<Id>,
    #[serde(default)]
    pub group: Option<Id>,
    pub prev_next_id: u64,
}

/// The forward action plus the prior values needed to reverse it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UndoAction {
    #[serde(rename = "guide:add")]
    GuideAdd { action: GuideAdd, added: Allocated },
    #[serde(rename = "guide:update")]
    GuideUpdate { action: GuideUpdate, prev: Guide },
    #[serde(rename = "guide:delete")]
    GuideDelete {
        action: ById,
        prev: Guide,
        prev_selection: Option<Selection>,
    },
    #[serde(rename = "guide:toggle")]
    GuideToggle { action: ById },

    #[serde(rename = "mirror:add")]
    MirrorAdd {
        action: MirrorAdd,
        added: Allocated,
        prev_active: Option<Id>,
    },
    #[serde(rename = "mirror:change")]
    MirrorChange { action: MirrorChange, prev: Mirror },
    #[serde(rename = "mirror:delete")]
    MirrorDelete {
        action: ById,
        prev: Mirror,
        prev_active: Option<Id>,
        prev_selection: Option<Selection>,
        /// Guides that referenced the deleted mirror.
        detached_guides: Vec<Id>,
        /// Mirrors whose parent was the deleted mirror, as they were.
        prev_children: BTreeMap<Id, Mirror>,
    },
    #[serde(rename = "mirror:active")]
    MirrorActive {
        action: MirrorActive,
        prev: Option<Id>,
    },

    #[serde(rename = "path:create")]
    PathCreate { action: PathCreate, added: Added },
    #[serde(rename = "path:create:many")]
    PathCreateMany { action: PathCreateMany, added: Added },
    #[serde(rename = "path:multiply")]
    PathMultiply {
        action: PathMultiply,
        added: Added,
        /// Sources moved into the new group.
        prev: BTreeMap<Id, Path>,
    },
    #[serde(rename = "path:update")]
    PathUpdate { action: PathUpdate, prev: Path },
    #[serde(rename = "path:update:many")]
    PathUpdateMany {
        action: PathUpdateMany,
        prev: BTreeMap<Id, Path>,
    },
    #[serde(rename = "path:delete")]
    PathDelete {
        action: ById,
        prev: Path,
        prev_selection: Option<Selection>,
    },
    #[serde(rename = "path:delete:many")]
    PathDeleteMany {
        action: DeleteMany,
        prev: BTreeMap<Id, Path>,
        prev_selection: Option<Selection>,
    },

    #[serde(rename = "group:update")]
    GroupUpdate {
        action: GroupUpdate,
        prev: Option<PathGroup>,
    },
    #[serde(rename = "group:delete")]
    GroupDelete {
        action: ById,
        prev: PathGroup,
        prev_paths: BTreeMap<Id, Path>,
        prev_selection: Option<Selection>,
    },
    #[serde(rename = "group:regroup")]
    GroupRegroup {
        action: GroupRegroup,
        prev: BTreeMap<Id, Path>,
        added: Option<Allocated>,
    },

    #[serde(rename = "clip:add")]
    ClipAdd { action: ClipAdd, added: Allocated },
    #[serde(rename = "clip:update")]
    ClipUpdate { action: ClipUpdate, prev: Clip },
    #[serde(rename = "clip:cut")]
    ClipCut {
        action: ClipCut,
        prev: BTreeMap<Id, Path>,
        added: Added,
        prev_selection: Option<Selection>,
    },

    #[serde(rename = "overlay:add")]
    OverlayAdd { action: OverlayAdd, added: Allocated },
    #[serde(rename = "overlay:update")]
    OverlayUpdate { action: OverlayUpdate, prev: Overlay },
    #[serde(rename = "overlay:delete")]
    OverlayDelete {
        action: ById,
        prev: Overlay,
        prev_selection: Option<Selection>,
    },

    #[serde(rename = "tiling:add")]
    TilingAdd { action: TilingAdd, added: Allocated },
    #[serde(rename = "tiling:update")]
    TilingUpdate { action: TilingUpdate, prev: Tiling },
    #[serde(rename = "tiling:delete")]
    TilingDelete {
        action: ById,
        prev: Tiling,
        prev_selection: Option<Selection>,
    },

    #[serde(rename = "gcode:item:are")]
    GCodeItemAre {
        action: GCodeItemAre,
        prev: Option<GCodeItem>,
    },
    #[serde(rename = "gcode:item:order")]
    GCodeItemOrder { action: ListOrder },
    #[serde(rename = "timeline:lane:are")]
    TimelineLaneAre {
        action: TimelineLaneAre,
        prev: Option<TimelineLane>,
    },
    #[serde(rename = "timeline:slot:are")]
    TimelineSlotAre {
        action: TimelineSlotAre,
        prev: Option<TimelineSlot>,
    },

    #[serde(rename = "script:update")]
    ScriptUpdate {
        action: ScriptUpdate,
        prev: Option<Script>,
    },
    #[serde(rename = "script:rename")]
    ScriptRename { action: ScriptRename },

    #[serde(rename = "palette:update")]
    PaletteUpdate {
        action: PaletteUpdate,
        prev: Vec<String>,
    },
    #[serde(rename = "view:update")]
    ViewUpdate { action: ViewUpdate, prev: View },
    #[serde(rename = "meta:update")]
    MetaUpdate { action: MetaUpdate, prev: Meta },
    #[serde(rename = "selection:set")]
    SelectionSet {
        action: SelectionSet,
        prev: Option<Selection>,
    },
    #[serde(rename = "global:transform")]
    GlobalTransform { action: GlobalTransform },

    #[serde(rename = "pending:type")]
    PendingType {
        action: PendingType,
        prev: Option<Pending>,
    },
    #[serde(rename = "pending:point")]
    PendingPoint {
        action: PendingPoint,
        prev: Option<Pending>,
        /// Guide materialized by this click.
        added: Option<Allocated>,
    },
    #[serde(rename = "pending:extent")]
    PendingExtent {
        action: PendingExtent,
        prev: Option<Pending>,
    },
}

impl UndoAction {
    /// The forward action this record reverses, used for redo.
    pub fn action(&self) -> UndoableAction {
        match self {
            UndoAction::GuideAdd { action, .. } => UndoableAction::GuideAdd(action.clone()),
            UndoAction::GuideUpdate { action, .. } => UndoableAction::GuideUpdate(action.clone()),
            UndoAction::GuideDelete { action, .. } => UndoableAction::GuideDelete(action.clone()),
            UndoAction::GuideToggle { action } => UndoableAction::GuideToggle(action.clone()),
            UndoAction::MirrorAdd { action, .. } => UndoableAction::MirrorAdd(action.clone()),
            UndoAction::MirrorChange { action, .. } => {
                UndoableAction::MirrorChange(action.clone())
            }
            UndoAction::MirrorDelete { action, .. } => {
                UndoableAction::MirrorDelete(action.clone())
            }
            UndoAction::MirrorActive { action, .. } => {
                UndoableAction::MirrorActive(action.clone())
            }
            UndoAction::PathCreate { action, .. } => UndoableAction::PathCreate(action.clone()),
            UndoAction::PathCreateMany { action, .. } => {
                UndoableAction::PathCreateMany(action.clone())
            }
            UndoAction::PathMultiply { action, .. } => {
                UndoableAction::PathMultiply(action.clone())
            }
            UndoAction::PathUpdate { action, .. } => UndoableAction::PathUpdate(action.clone()),
            UndoAction::PathUpdateMany { action, .. } => {
                UndoableAction::PathUpdateMany(action.clone())
            }
            UndoAction::PathDelete { action, .. } => UndoableAction::PathDelete(action.clone()),
            UndoAction::PathDeleteMany { action, .. } => {
                UndoableAction::PathDeleteMany(action.clone())
            }
            UndoAction::GroupUpdate { action, .. } => UndoableAction::GroupUpdate(action.clone()),
            UndoAction::GroupDelete { action, .. } => UndoableAction::GroupDelete(action.clone()),
            UndoAction::GroupRegroup { action, .. } => {
                UndoableAction::GroupRegroup(action.clone())
            }
            UndoAction::ClipAdd { action, .. } => UndoableAction::ClipAdd(action.clone()),
            UndoAction::ClipUpdate { action, .. } => UndoableAction::ClipUpdate(action.clone()),
            UndoAction::ClipCut { action, .. } => UndoableAction::ClipCut(action.clone()),
            UndoAction::OverlayAdd { action, .. } => UndoableAction::OverlayAdd(action.clone()),
            UndoAction::OverlayUpdate { action, .. } => {
                UndoableAction::OverlayUpdate(action.clone())
            }
            UndoAction::OverlayDelete { action, .. } => {
                UndoableAction::OverlayDelete(action.clone())
            }
            UndoAction::TilingAdd { action, .. } => UndoableAction::TilingAdd(action.clone()),
            UndoAction::TilingUpdate { action, .. } => {
                UndoableAction::TilingUpdate(action.clone())
            }
            UndoAction::TilingDelete { action, .. } => {
                UndoableAction::TilingDelete(action.clone())
            }
            UndoAction::GCodeItemAre { action, .. } => {
                UndoableAction::GCodeItemAre(action.clone())
            }
            UndoAction::GCodeItemOrder { action } => {
                UndoableAction::GCodeItemOrder(action.clone())
            }
            UndoAction::TimelineLaneAre { action, .. } => {
                UndoableAction::TimelineLaneAre(action.clone())
            }
            UndoAction::TimelineSlotAre { action, .. } => {
                UndoableAction::TimelineSlotAre(action.clone())
            }
            UndoAction::ScriptUpdate { action, .. } => {
                UndoableAction::ScriptUpdate(action.clone())
            }
            UndoAction::ScriptRename { action } => UndoableAction::ScriptRename(action.clone()),
            UndoAction::PaletteUpdate { action, .. } => {
                UndoableAction::PaletteUpdate(action.clone())
            }
            UndoAction::ViewUpdate { action, .. } => UndoableAction::ViewUpdate(action.clone()),
            UndoAction::MetaUpdate { action, .. } => UndoableAction::MetaUpdate(action.clone()),
            UndoAction::SelectionSet { action, .. } => {
                UndoableAction::SelectionSet(action.clone())
            }
            UndoAction::GlobalTransform { action } => UndoableAction::GlobalTransform(*action),
            UndoAction::PendingType { action, .. } => UndoableAction::PendingType(*action),
            UndoAction::PendingPoint { action, .. } => UndoableAction::PendingPoint(*action),
            UndoAction::PendingExtent { action, .. } => UndoableAction::PendingExtent(*action),
        }
    }
}
