//! # Action Reducer
//!
//! [`Reducer::reduce`] is the only way the document changes. Edits go
//! through [`Reducer::reduce_without_undo`], which returns the new state and
//! the [`UndoAction`] that reverses it; the record is then appended to the
//! history. Undo applies [`undo`](crate::undo::undo) to the record the
//! history hands back, redo re-reduces the forward action it carries.
//!
//! Inapplicable edits (unknown ids, out of range indices, cyclic mirrors) are
//! logged and return the state unchanged without a history record.
//!
//! The reducer takes the state by value and hands it back, so unchanged
//! tables are moved rather than copied. Undo records hold owned copies of the
//! prior values.

mod entities;
mod global;
mod guides;
mod lists;
mod mirrors;
mod paths;

use tracing::{debug, info, warn};

use crate::action::{Action, ControlAction, UndoAction, UndoableAction};
use crate::clip::{ContainmentClipper, PathClipper};
use crate::history::{add_action, branch_switch_plan, redo_action, undo_action};
use crate::state::State;
use crate::undo::undo;

pub(crate) use global::transform_document;
pub(crate) use lists::undo_are;

/// Result of one edit: the new state and, if anything changed, its undo record.
pub type Reduced = (State, Option<UndoAction>);

/// Tunables for the reducer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducerOptions {
    /// Decimal places kept when comparing contours for duplicates.
    pub key_precision: u32,
    /// Stroke width given to newly drawn open paths.
    pub default_line_width: f64,
}

impl Default for ReducerOptions {
    fn default() -> Self {
        Self {
            key_precision: 3,
            default_line_width: 1.0,
        }
    }
}

pub struct Reducer {
    options: ReducerOptions,
    clipper: Box<dyn PathClipper>,
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new(ReducerOptions::default())
    }
}

impl std::fmt::Debug for Reducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reducer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Reducer {
    pub fn new(options: ReducerOptions) -> Self {
        Self {
            options,
            clipper: Box::new(ContainmentClipper),
        }
    }

    /// Replaces the collaborator used by `clip:cut`.
    pub fn with_clipper(mut self, clipper: impl PathClipper + 'static) -> Self {
        self.clipper = Box::new(clipper);
        self
    }

    pub fn options(&self) -> &ReducerOptions {
        &self.options
    }

    /// Applies any action, maintaining the history.
    pub fn reduce(&self, mut state: State, action: Action) -> State {
        match action {
            Action::Edit(action) => {
                debug!(action = action.tag(), "Reducing");
                let (mut state, record) = self.reduce_without_undo(state, action);
                if let Some(record) = record {
                    let history = std::mem::take(&mut state.history);
                    state.history = add_action(history, record);
                }
                state
            }
            Action::Control(ControlAction::Undo) => {
                let (history, record) = undo_action(std::mem::take(&mut state.history));
                let mut state = match record {
                    Some(record) => {
                        debug!(action = record.action().tag(), "Undoing");
                        undo(state, &record)
                    }
                    None => {
                        info!("Nothing to undo");
                        state
                    }
                };
                state.history = history;
                state
            }
            Action::Control(ControlAction::Redo) => {
                let (history, forward) = redo_action(std::mem::take(&mut state.history));
                let mut state = match forward {
                    Some(forward) => {
                        debug!(action = forward.tag(), "Redoing");
                        self.reduce_without_undo(state, forward).0
                    }
                    None => {
                        info!("Nothing to redo");
                        state
                    }
                };
                state.history = history;
                state
            }
            Action::Control(ControlAction::Reset { state: replacement }) => {
                debug!("Resetting state");
                *replacement
            }
            Action::Control(ControlAction::HistorySwitch { branch }) => {
                let mut history = std::mem::take(&mut state.history);
                match branch_switch_plan(&history, branch) {
                    Ok(plan) => {
                        debug!(
                            branch,
                            undo = plan.undo.len(),
                            redo = plan.redo.len(),
                            "Switching history branch"
                        );
                        for record in &plan.undo {
                            state = undo(state, record);
                        }
                        for forward in plan.redo {
                            state = self.reduce_without_undo(state, forward).0;
                        }
                        history.current_branch = branch;
                        history.undo = 0;
                    }
                    Err(err) => warn!(%err, branch, "Cannot switch history branch"),
                }
                state.history = history;
                state
            }
            unrecognized @ Action::Unrecognized(_) => {
                let reason = unrecognized.rejection().unwrap_or_default();
                warn!(
                    action = unrecognized.raw_tag(),
                    %reason,
                    "Ignoring unrecognized action"
                );
                state
            }
        }
    }

    /// Applies an edit without touching the history.
    pub fn reduce_without_undo(&self, state: State, action: UndoableAction) -> Reduced {
        match action {
            UndoableAction::GuideAdd(action) => guides::guide_add(state, action),
            UndoableAction::GuideUpdate(action) => guides::guide_update(state, action),
            UndoableAction::GuideDelete(action) => guides::guide_delete(state, action),
            UndoableAction::GuideToggle(action) => guides::guide_toggle(state, action),

            UndoableAction::MirrorAdd(action) => mirrors::mirror_add(state, action),
            UndoableAction::MirrorChange(action) => mirrors::mirror_change(state, action),
            UndoableAction::MirrorDelete(action) => mirrors::mirror_delete(state, action),
            UndoableAction::MirrorActive(action) => mirrors::mirror_active(state, action),

            UndoableAction::PathCreate(action) => self.path_create(state, action),
            UndoableAction::PathCreateMany(action) => self.path_create_many(state, action),
            UndoableAction::PathMultiply(action) => self.path_multiply(state, action),
            UndoableAction::PathUpdate(action) => paths::path_update(state, action),
            UndoableAction::PathUpdateMany(action) => paths::path_update_many(state, action),
            UndoableAction::PathDelete(action) => paths::path_delete(state, action),
            UndoableAction::PathDeleteMany(action) => paths::path_delete_many(state, action),

            UndoableAction::GroupUpdate(action) => paths::group_update(state, action),
            UndoableAction::GroupDelete(action) => paths::group_delete(state, action),
            UndoableAction::GroupRegroup(action) => paths::group_regroup(state, action),

            UndoableAction::ClipAdd(action) => entities::clip_add(state, action),
            UndoableAction::ClipUpdate(action) => entities::clip_update(state, action),
            UndoableAction::ClipCut(action) => self.clip_cut(state, action),

            UndoableAction::OverlayAdd(action) => entities::overlay_add(state, action),
            UndoableAction::OverlayUpdate(action) => entities::overlay_update(state, action),
            UndoableAction::OverlayDelete(action) => entities::overlay_delete(state, action),

            UndoableAction::TilingAdd(action) => entities::tiling_add(state, action),
            UndoableAction::TilingUpdate(action) => entities::tiling_update(state, action),
            UndoableAction::TilingDelete(action) => entities::tiling_delete(state, action),

            UndoableAction::GCodeItemAre(action) => lists::gcode_item_are(state, action),
            UndoableAction::GCodeItemOrder(action) => lists::gcode_item_order(state, action),
            UndoableAction::TimelineLaneAre(action) => lists::timeline_lane_are(state, action),
            UndoableAction::TimelineSlotAre(action) => lists::timeline_slot_are(state, action),

            UndoableAction::ScriptUpdate(action) => lists::script_update(state, action),
            UndoableAction::ScriptRename(action) => lists::script_rename(state, action),

            UndoableAction::PaletteUpdate(action) => lists::palette_update(state, action),
            UndoableAction::ViewUpdate(action) => lists::view_update(state, action),
            UndoableAction::MetaUpdate(action) => lists::meta_update(state, action),
            UndoableAction::SelectionSet(action) => lists::selection_set(state, action),
            UndoableAction::GlobalTransform(action) => global::global_transform(state, action),

            UndoableAction::PendingType(action) => guides::pending_type(state, action),
            UndoableAction::PendingPoint(action) => guides::pending_point(state, action),
            UndoableAction::PendingExtent(action) => guides::pending_extent(state, action),
        }
    }
}

/// [`Reducer::reduce`] with default options.
pub fn reducer(state: State, action: impl Into<Action>) -> State {
    Reducer::default().reduce(state, action.into())
}

/// [`Reducer::reduce_without_undo`] with default options.
pub fn reduce_without_undo(state: State, action: UndoableAction) -> Reduced {
    Reducer::default().reduce_without_undo(state, action)
}

/// Logs an inapplicable edit and returns the state unchanged.
pub(crate) fn skip(state: State, action: &'static str, reason: &str) -> Reduced {
    warn!(action, reason, "Ignoring action");
    (state, None)
}
