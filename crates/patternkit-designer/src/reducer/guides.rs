use tracing::debug;

use super::{skip, Reduced};
use crate::action::{
    Allocated, ById, GuideAdd, GuideUpdate, PendingExtent, PendingPoint, PendingType, UndoAction,
};
use crate::model::{Guide, Pending, SelectionKind};
use crate::path_ops::{guide_points, pending_guide};
use crate::state::State;

pub(super) fn guide_add(mut state: State, action: GuideAdd) -> Reduced {
    let prev_next_id = state.next_id;
    let id = state.alloc_id();
    state.guides.insert(
        id.clone(),
        Guide {
            id: id.clone(),
            geom: action.geom.clone(),
            active: true,
            basic: action.basic,
            mirror: action.mirror.clone(),
        },
    );
    (
        state,
        Some(UndoAction::GuideAdd {
            action,
            added: Allocated { id, prev_next_id },
        }),
    )
}

pub(super) fn guide_update(mut state: State, action: GuideUpdate) -> Reduced {
    let Some(prev) = state.guides.get(&action.id).cloned() else {
        return skip(state, "guide:update", "no such guide");
    };
    let guide = Guide {
        id: action.id.clone(),
        ..action.guide.clone()
    };
    state.guides.insert(action.id.clone(), guide);
    (state, Some(UndoAction::GuideUpdate { action, prev }))
}

pub(super) fn guide_delete(mut state: State, action: ById) -> Reduced {
    let Some(prev) = state.guides.remove(&action.id) else {
        return skip(state, "guide:delete", "no such guide");
    };
    let prev_selection = state.prune_selection(SelectionKind::Guide, &[action.id.as_str()]);
    (
        state,
        Some(UndoAction::GuideDelete {
            action,
            prev,
            prev_selection,
        }),
    )
}

pub(super) fn guide_toggle(mut state: State, action: ById) -> Reduced {
    let Some(guide) = state.guides.get_mut(&action.id) else {
        return skip(state, "guide:toggle", "no such guide");
    };
    guide.active = !guide.active;
    (state, Some(UndoAction::GuideToggle { action }))
}

pub(super) fn pending_type(mut state: State, action: PendingType) -> Reduced {
    let pending = action.kind.map(Pending::guide);
    if state.pending == pending {
        return skip(state, "pending:type", "unchanged");
    }
    let prev = std::mem::replace(&mut state.pending, pending);
    (state, Some(UndoAction::PendingType { action, prev }))
}

pub(super) fn pending_point(mut state: State, action: PendingPoint) -> Reduced {
    let Some(Pending::Guide {
        kind,
        points,
        extent,
    }) = &state.pending
    else {
        return skip(state, "pending:point", "nothing pending");
    };
    let (kind, extent) = (*kind, *extent);
    let mut points = points.clone();
    points.push(action.coord);

    let prev = state.pending.clone();
    if points.len() < guide_points(kind) {
        state.pending = Some(Pending::Guide {
            kind,
            points,
            extent,
        });
        return (
            state,
            Some(UndoAction::PendingPoint {
                action,
                prev,
                added: None,
            }),
        );
    }

    let Some(geom) = pending_guide(kind, &points, action.shift, extent) else {
        return skip(state, "pending:point", "too many points for guide kind");
    };
    let prev_next_id = state.next_id;
    let id = state.alloc_id();
    debug!(guide = %id, ?kind, "Materializing pending guide");
    state.guides.insert(
        id.clone(),
        Guide {
            id: id.clone(),
            geom,
            active: true,
            basic: false,
            mirror: state.active_mirror.clone(),
        },
    );
    state.pending = None;
    (
        state,
        Some(UndoAction::PendingPoint {
            action,
            prev,
            added: Some(Allocated { id, prev_next_id }),
        }),
    )
}

pub(super) fn pending_extent(mut state: State, action: PendingExtent) -> Reduced {
    let Some(Pending::Guide {
        kind,
        extent: Some(extent),
        ..
    }) = &state.pending
    else {
        return skip(state, "pending:extent", "no adjustable pending guide");
    };
    let (kind, extent) = (*kind, *extent);
    let next = (i64::from(extent) + i64::from(action.delta)).max(i64::from(kind.min_extent()));
    let next = u32::try_from(next).unwrap_or(u32::MAX);
    if next == extent {
        return skip(state, "pending:extent", "extent unchanged");
    }

    let prev = state.pending.clone();
    if let Some(Pending::Guide { extent, .. }) = &mut state.pending {
        *extent = Some(next);
    }
    (state, Some(UndoAction::PendingExtent { action, prev }))
}
