//! Reversing recorded edits.
//!
//! [`undo`] restores exactly the values an [`UndoAction`] captured. It does
//! not touch the history; [`Reducer::reduce`](crate::Reducer::reduce) moves
//! the history cursor around it.

use std::collections::BTreeMap;

use tracing::{error, warn};

use crate::action::{Added, Allocated, UndoAction};
use crate::list_edit::move_item;
use crate::model::{Id, Path};
use crate::reducer::{transform_document, undo_are};
use crate::state::State;

fn remove_allocated<V>(table: &mut BTreeMap<Id, V>, state_next_id: &mut u64, added: &Allocated) {
    table.remove(&added.id);
    *state_next_id = added.prev_next_id;
}

fn remove_added(state: &mut State, added: &Added) {
    for id in &added.ids {
        state.paths.remove(id);
    }
    if let Some(group) = &added.group {
        state.path_groups.remove(group);
    }
    state.next_id = added.prev_next_id;
}

fn restore_paths(state: &mut State, prev: &BTreeMap<Id, Path>) {
    for (id, path) in prev {
        state.paths.insert(id.clone(), path.clone());
    }
}

/// Reverses one recorded edit.
pub fn undo(mut state: State, record: &UndoAction) -> State {
    match record {
        UndoAction::GuideAdd { added, .. } => {
            remove_allocated(&mut state.guides, &mut state.next_id, added);
        }
        UndoAction::GuideUpdate { action, prev } => {
            state.guides.insert(action.id.clone(), prev.clone());
        }
        UndoAction::GuideDelete {
            action,
            prev,
            prev_selection,
        } => {
            state.guides.insert(action.id.clone(), prev.clone());
            state.selection = prev_selection.clone();
        }
        UndoAction::GuideToggle { action } => {
            if let Some(guide) = state.guides.get_mut(&action.id) {
                guide.active = !guide.active;
            }
        }

        UndoAction::MirrorAdd {
            added, prev_active, ..
        } => {
            remove_allocated(&mut state.mirrors, &mut state.next_id, added);
            state.active_mirror = prev_active.clone();
        }
        UndoAction::MirrorChange { action, prev } => {
            state.mirrors.insert(action.id.clone(), prev.clone());
        }
        UndoAction::MirrorDelete {
            action,
            prev,
            prev_active,
            prev_selection,
            detached_guides,
            prev_children,
        } => {
            state.mirrors.insert(action.id.clone(), prev.clone());
            for (id, child) in prev_children {
                state.mirrors.insert(id.clone(), child.clone());
            }
            for id in detached_guides {
                if let Some(guide) = state.guides.get_mut(id) {
                    guide.mirror = Some(action.id.clone());
                }
            }
            state.active_mirror = prev_active.clone();
            state.selection = prev_selection.clone();
        }
        UndoAction::MirrorActive { prev, .. } => {
            state.active_mirror = prev.clone();
        }

        UndoAction::PathCreate { added, .. } | UndoAction::PathCreateMany { added, .. } => {
            remove_added(&mut state, added);
        }
        UndoAction::PathMultiply { added, prev, .. } => {
            remove_added(&mut state, added);
            restore_paths(&mut state, prev);
        }
        UndoAction::PathUpdate { action, prev } => {
            state.paths.insert(action.id.clone(), prev.clone());
        }
        UndoAction::PathUpdateMany { action, prev } => {
            for id in action.changed.keys() {
                match prev.get(id) {
                    Some(path) => state.paths.insert(id.clone(), path.clone()),
                    None => state.paths.remove(id),
                };
            }
        }
        UndoAction::PathDelete {
            action,
            prev,
            prev_selection,
        } => {
            state.paths.insert(action.id.clone(), prev.clone());
            state.selection = prev_selection.clone();
        }
        UndoAction::PathDeleteMany {
            prev,
            prev_selection,
            ..
        } => {
            restore_paths(&mut state, prev);
            state.selection = prev_selection.clone();
        }

        UndoAction::GroupUpdate { action, prev } => match prev {
            Some(prev) => {
                state.path_groups.insert(action.id.clone(), prev.clone());
            }
            None => {
                state.path_groups.remove(&action.id);
            }
        },
        UndoAction::GroupDelete {
            action,
            prev,
            prev_paths,
            prev_selection,
        } => {
            state.path_groups.insert(action.id.clone(), prev.clone());
            restore_paths(&mut state, prev_paths);
            state.selection = prev_selection.clone();
        }
        UndoAction::GroupRegroup { prev, added, .. } => {
            restore_paths(&mut state, prev);
            if let Some(added) = added {
                remove_allocated(&mut state.path_groups, &mut state.next_id, added);
            }
        }

        UndoAction::ClipAdd { added, .. } => {
            remove_allocated(&mut state.clips, &mut state.next_id, added);
        }
        UndoAction::ClipUpdate { action, prev } => {
            state.clips.insert(action.id.clone(), prev.clone());
        }
        UndoAction::ClipCut {
            prev,
            added,
            prev_selection,
            ..
        } => {
            remove_added(&mut state, added);
            restore_paths(&mut state, prev);
            state.selection = prev_selection.clone();
        }

        UndoAction::OverlayAdd { added, .. } => {
            remove_allocated(&mut state.overlays, &mut state.next_id, added);
        }
        UndoAction::OverlayUpdate { prev, .. } => {
            state.overlays.insert(prev.id.clone(), prev.clone());
        }
        UndoAction::OverlayDelete {
            prev,
            prev_selection,
            ..
        } => {
            state.overlays.insert(prev.id.clone(), prev.clone());
            state.selection = prev_selection.clone();
        }

        UndoAction::TilingAdd { added, .. } => {
            remove_allocated(&mut state.tilings, &mut state.next_id, added);
        }
        UndoAction::TilingUpdate { prev, .. } => {
            state.tilings.insert(prev.id.clone(), prev.clone());
        }
        UndoAction::TilingDelete {
            prev,
            prev_selection,
            ..
        } => {
            state.tilings.insert(prev.id.clone(), prev.clone());
            state.selection = prev_selection.clone();
        }

        UndoAction::GCodeItemAre { action, prev } => {
            if !undo_are(&mut state, &action.are, prev.as_ref(), |s| {
                Some(&mut s.gcode.items)
            }) {
                warn!("G-code items no longer match the recorded edit");
            }
        }
        UndoAction::GCodeItemOrder { action } => {
            if !move_item(&mut state.gcode.items, action.to, action.from) {
                warn!("G-code items no longer match the recorded move");
            }
        }
        UndoAction::TimelineLaneAre { action, prev } => {
            if !undo_are(&mut state, &action.are, prev.as_ref(), |s| {
                Some(&mut s.animations.timeline.lanes)
            }) {
                warn!("Timeline lanes no longer match the recorded edit");
            }
        }
        UndoAction::TimelineSlotAre { action, prev } => {
            let lane = action.lane;
            if !undo_are(&mut state, &action.are, prev.as_ref(), |s| {
                s.animations.timeline.lanes.get_mut(lane).map(|l| &mut l.items)
            }) {
                warn!(lane, "Timeline slots no longer match the recorded edit");
            }
        }

        UndoAction::ScriptUpdate { action, prev } => match prev {
            Some(prev) => {
                state
                    .animations
                    .scripts
                    .insert(action.key.clone(), prev.clone());
            }
            None => {
                state.animations.scripts.remove(&action.key);
            }
        },
        UndoAction::ScriptRename { action } => {
            if let Some(script) = state.animations.scripts.remove(&action.to) {
                state.animations.scripts.insert(action.key.clone(), script);
            }
        }

        UndoAction::PaletteUpdate { prev, .. } => state.palette = prev.clone(),
        UndoAction::ViewUpdate { prev, .. } => state.view = prev.clone(),
        UndoAction::MetaUpdate { prev, .. } => state.meta = prev.clone(),
        UndoAction::SelectionSet { prev, .. } => state.selection = prev.clone(),
        UndoAction::GlobalTransform { action } => match action.inverse_matrices() {
            Ok(chain) => transform_document(&mut state, &chain),
            Err(err) => error!(%err, "Cannot invert global transform"),
        },

        UndoAction::PendingType { prev, .. } | UndoAction::PendingExtent { prev, .. } => {
            state.pending = prev.clone();
        }
        UndoAction::PendingPoint { prev, added, .. } => {
            state.pending = prev.clone();
            if let Some(added) = added {
                remove_allocated(&mut state.guides, &mut state.next_id, added);
            }
        }
    }
    state
}
