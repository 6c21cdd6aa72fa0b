use std::collections::BTreeMap;

use patternkit_core::check_parent_chain;
use tracing::warn;

use super::{skip, Reduced};
use crate::action::{Allocated, ById, MirrorActive, MirrorAdd, MirrorChange, UndoAction};
use crate::model::SelectionKind;
use crate::state::State;

/// Adds a mirror under a fresh id and makes it active.
pub(super) fn mirror_add(mut state: State, action: MirrorAdd) -> Reduced {
    let mut mirror = action.mirror.clone();
    mirror.id = state.next_id.to_string();
    if let Err(err) = check_parent_chain(&mirror, &state.mirrors) {
        warn!(%err, "Refusing mirror with invalid parent chain");
        return (state, None);
    }

    let prev_next_id = state.next_id;
    let id = state.alloc_id();
    state.mirrors.insert(id.clone(), mirror);
    let prev_active = state.active_mirror.replace(id.clone());
    (
        state,
        Some(UndoAction::MirrorAdd {
            action,
            added: Allocated { id, prev_next_id },
            prev_active,
        }),
    )
}

pub(super) fn mirror_change(mut state: State, action: MirrorChange) -> Reduced {
    let Some(prev) = state.mirrors.get(&action.id).cloned() else {
        return skip(state, "mirror:change", "no such mirror");
    };
    let mut mirror = action.mirror.clone();
    mirror.id = action.id.clone();
    if let Err(err) = check_parent_chain(&mirror, &state.mirrors) {
        warn!(%err, mirror = %action.id, "Refusing mirror change with invalid parent chain");
        return (state, None);
    }
    state.mirrors.insert(action.id.clone(), mirror);
    (state, Some(UndoAction::MirrorChange { action, prev }))
}

/// Removes a mirror and every reference to it.
pub(super) fn mirror_delete(mut state: State, action: ById) -> Reduced {
    let Some(prev) = state.mirrors.remove(&action.id) else {
        return skip(state, "mirror:delete", "no such mirror");
    };

    let prev_active = state.active_mirror.clone();
    if prev_active.as_deref() == Some(action.id.as_str()) {
        state.active_mirror = None;
    }

    let mut detached_guides = Vec::new();
    for guide in state.guides.values_mut() {
        if guide.mirror.as_deref() == Some(action.id.as_str()) {
            guide.mirror = None;
            detached_guides.push(guide.id.clone());
        }
    }

    let mut prev_children = BTreeMap::new();
    for child in state.mirrors.values_mut() {
        if child.parent_id() == Some(action.id.as_str()) {
            prev_children.insert(child.id.clone(), child.clone());
            child.parent = None;
        }
    }

    let prev_selection = state.prune_selection(SelectionKind::Mirror, &[action.id.as_str()]);
    (
        state,
        Some(UndoAction::MirrorDelete {
            action,
            prev,
            prev_active,
            prev_selection,
            detached_guides,
            prev_children,
        }),
    )
}

pub(super) fn mirror_active(mut state: State, action: MirrorActive) -> Reduced {
    if let Some(id) = &action.id {
        if !state.mirrors.contains_key(id) {
            return skip(state, "mirror:active", "no such mirror");
        }
    }
    if state.active_mirror == action.id {
        return skip(state, "mirror:active", "already active");
    }
    let prev = std::mem::replace(&mut state.active_mirror, action.id.clone());
    (state, Some(UndoAction::MirrorActive { action, prev }))
}
