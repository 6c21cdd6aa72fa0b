use std::collections::BTreeMap;

use tracing::debug;

use super::{skip, Reduced, Reducer};
use crate::action::{
    Added, Allocated, ById, ClipAdd, ClipCut, ClipUpdate, OverlayAdd, OverlayUpdate, TilingAdd,
    TilingUpdate, UndoAction,
};
use crate::clip::ClipMode;
use crate::model::{Clip, Overlay, Path, SelectionKind, Tiling};
use crate::state::State;

pub(super) fn clip_add(mut state: State, action: ClipAdd) -> Reduced {
    if action.segments.is_empty() {
        return skip(state, "clip:add", "no segments");
    }
    let prev_next_id = state.next_id;
    let id = state.alloc_id();
    state.clips.insert(
        id.clone(),
        Clip {
            id: id.clone(),
            origin: action.origin,
            segments: action.segments.clone(),
            active: true,
            outside: action.outside,
        },
    );
    (
        state,
        Some(UndoAction::ClipAdd {
            action,
            added: Allocated { id, prev_next_id },
        }),
    )
}

pub(super) fn clip_update(mut state: State, action: ClipUpdate) -> Reduced {
    let Some(prev) = state.clips.get(&action.id).cloned() else {
        return skip(state, "clip:update", "no such clip");
    };
    let clip = Clip {
        id: action.id.clone(),
        ..action.clip.clone()
    };
    state.clips.insert(action.id.clone(), clip);
    (state, Some(UndoAction::ClipUpdate { action, prev }))
}

impl Reducer {
    /// Clips every visible path. Changed paths are replaced by their pieces
    /// under fresh ids.
    pub(super) fn clip_cut(&self, mut state: State, action: ClipCut) -> Reduced {
        let Some(clip) = state.clips.get(&action.clip).cloned() else {
            return skip(state, "clip:cut", "no such clip");
        };
        let mode = ClipMode::for_clip(&clip);

        let mut replaced: Vec<(Path, Vec<Path>)> = Vec::new();
        for path in state.paths.values().filter(|path| !path.hidden) {
            let pieces = self.clipper.clip_path(path, &clip, mode);
            if pieces.len() == 1 && pieces[0] == *path {
                continue;
            }
            replaced.push((path.clone(), pieces));
        }
        if replaced.is_empty() {
            return skip(state, "clip:cut", "no path changed");
        }

        let prev_next_id = state.next_id;
        let mut prev = BTreeMap::new();
        let mut ids = Vec::new();
        for (original, pieces) in replaced {
            state.paths.remove(&original.id);
            for piece in pieces {
                let id = state.alloc_id();
                state.paths.insert(
                    id.clone(),
                    Path {
                        id: id.clone(),
                        group: original.group.clone(),
                        ..piece
                    },
                );
                ids.push(id);
            }
            prev.insert(original.id.clone(), original);
        }

        let removed: Vec<&str> = prev.keys().map(String::as_str).collect();
        let prev_selection = state.prune_selection(SelectionKind::Path, &removed);
        debug!(removed = prev.len(), added = ids.len(), clip = %action.clip, "Clipped paths");

        (
            state,
            Some(UndoAction::ClipCut {
                action,
                prev,
                added: Added {
                    ids,
                    group: None,
                    prev_next_id,
                },
                prev_selection,
            }),
        )
    }
}

pub(super) fn overlay_add(mut state: State, action: OverlayAdd) -> Reduced {
    let prev_next_id = state.next_id;
    let id = state.alloc_id();
    state
        .overlays
        .insert(id.clone(), Overlay::new(id.clone(), action.source.clone()));
    (
        state,
        Some(UndoAction::OverlayAdd {
            action,
            added: Allocated { id, prev_next_id },
        }),
    )
}

pub(super) fn overlay_update(mut state: State, action: OverlayUpdate) -> Reduced {
    let id = action.overlay.id.clone();
    let Some(prev) = state.overlays.get(&id).cloned() else {
        return skip(state, "overlay:update", "no such overlay");
    };
    state.overlays.insert(id, action.overlay.clone());
    (state, Some(UndoAction::OverlayUpdate { action, prev }))
}

pub(super) fn overlay_delete(mut state: State, action: ById) -> Reduced {
    let Some(prev) = state.overlays.remove(&action.id) else {
        return skip(state, "overlay:delete", "no such overlay");
    };
    let prev_selection = state.prune_selection(SelectionKind::Overlay, &[action.id.as_str()]);
    (
        state,
        Some(UndoAction::OverlayDelete {
            action,
            prev,
            prev_selection,
        }),
    )
}

pub(super) fn tiling_add(mut state: State, action: TilingAdd) -> Reduced {
    let prev_next_id = state.next_id;
    let id = state.alloc_id();
    state.tilings.insert(
        id.clone(),
        Tiling {
            id: id.clone(),
            shape: action.shape.clone(),
            cache: action.cache.clone(),
        },
    );
    (
        state,
        Some(UndoAction::TilingAdd {
            action,
            added: Allocated { id, prev_next_id },
        }),
    )
}

pub(super) fn tiling_update(mut state: State, action: TilingUpdate) -> Reduced {
    let id = action.tiling.id.clone();
    let Some(prev) = state.tilings.get(&id).cloned() else {
        return skip(state, "tiling:update", "no such tiling");
    };
    state.tilings.insert(id, action.tiling.clone());
    (state, Some(UndoAction::TilingUpdate { action, prev }))
}

pub(super) fn tiling_delete(mut state: State, action: ById) -> Reduced {
    let Some(prev) = state.tilings.remove(&action.id) else {
        return skip(state, "tiling:delete", "no such tiling");
    };
    let prev_selection = state.prune_selection(SelectionKind::Tiling, &[action.id.as_str()]);
    (
        state,
        Some(UndoAction::TilingDelete {
            action,
            prev,
            prev_selection,
        }),
    )
}
