use super::{skip, Reduced};
use crate::action::{
    AddRemoveEdit, GCodeItemAre, ListOrder, MetaUpdate, PaletteUpdate, ScriptRename, ScriptUpdate,
    SelectionSet, TimelineLaneAre, TimelineSlotAre, UndoAction, ViewUpdate,
};
use crate::list_edit::{move_item, splice, unsplice};
use crate::state::State;

/// Splices into the list `list` selects, returning the displaced value.
/// `None` when the list is missing or the index is out of range.
fn handle_are<T, F>(
    state: &mut State,
    are: &AddRemoveEdit<T>,
    list: F,
) -> Option<Option<T>>
where
    T: Clone,
    F: FnOnce(&mut State) -> Option<&mut Vec<T>>,
{
    splice(list(state)?, are)
}

/// Reverses [`handle_are`] on the same list.
pub(crate) fn undo_are<T, F>(
    state: &mut State,
    are: &AddRemoveEdit<T>,
    prev: Option<&T>,
    list: F,
) -> bool
where
    T: Clone,
    F: FnOnce(&mut State) -> Option<&mut Vec<T>>,
{
    list(state).is_some_and(|list| unsplice(list, are, prev))
}

pub(super) fn gcode_item_are(mut state: State, action: GCodeItemAre) -> Reduced {
    let Some(prev) = handle_are(&mut state, &action.are, |s| Some(&mut s.gcode.items)) else {
        return skip(state, "gcode:item:are", "index out of range");
    };
    (state, Some(UndoAction::GCodeItemAre { action, prev }))
}

pub(super) fn gcode_item_order(mut state: State, action: ListOrder) -> Reduced {
    if action.from == action.to || !move_item(&mut state.gcode.items, action.from, action.to) {
        return skip(state, "gcode:item:order", "nothing to move");
    }
    (state, Some(UndoAction::GCodeItemOrder { action }))
}

pub(super) fn timeline_lane_are(mut state: State, action: TimelineLaneAre) -> Reduced {
    let Some(prev) = handle_are(&mut state, &action.are, |s| {
        Some(&mut s.animations.timeline.lanes)
    }) else {
        return skip(state, "timeline:lane:are", "index out of range");
    };
    (state, Some(UndoAction::TimelineLaneAre { action, prev }))
}

pub(super) fn timeline_slot_are(mut state: State, action: TimelineSlotAre) -> Reduced {
    let lane = action.lane;
    let Some(prev) = handle_are(&mut state, &action.are, |s| {
        s.animations.timeline.lanes.get_mut(lane).map(|l| &mut l.items)
    }) else {
        return skip(state, "timeline:slot:are", "no such lane or slot");
    };
    (state, Some(UndoAction::TimelineSlotAre { action, prev }))
}

pub(super) fn script_update(mut state: State, action: ScriptUpdate) -> Reduced {
    let scripts = &mut state.animations.scripts;
    let prev = match &action.script {
        Some(script) => {
            if scripts.get(&action.key) == Some(script) {
                return skip(state, "script:update", "unchanged");
            }
            scripts.insert(action.key.clone(), script.clone())
        }
        None => match scripts.remove(&action.key) {
            Some(prev) => Some(prev),
            None => return skip(state, "script:update", "no such script"),
        },
    };
    (state, Some(UndoAction::ScriptUpdate { action, prev }))
}

pub(super) fn script_rename(mut state: State, action: ScriptRename) -> Reduced {
    let scripts = &mut state.animations.scripts;
    if action.key == action.to || scripts.contains_key(&action.to) {
        return skip(state, "script:rename", "target name taken");
    }
    let Some(script) = scripts.remove(&action.key) else {
        return skip(state, "script:rename", "no such script");
    };
    scripts.insert(action.to.clone(), script);
    (state, Some(UndoAction::ScriptRename { action }))
}

pub(super) fn palette_update(mut state: State, action: PaletteUpdate) -> Reduced {
    if state.palette == action.colors {
        return skip(state, "palette:update", "unchanged");
    }
    let prev = std::mem::replace(&mut state.palette, action.colors.clone());
    (state, Some(UndoAction::PaletteUpdate { action, prev }))
}

pub(super) fn view_update(mut state: State, action: ViewUpdate) -> Reduced {
    if state.view == action.view {
        return skip(state, "view:update", "unchanged");
    }
    let prev = std::mem::replace(&mut state.view, action.view.clone());
    (state, Some(UndoAction::ViewUpdate { action, prev }))
}

pub(super) fn meta_update(mut state: State, action: MetaUpdate) -> Reduced {
    if state.meta == action.meta {
        return skip(state, "meta:update", "unchanged");
    }
    let prev = std::mem::replace(&mut state.meta, action.meta.clone());
    (state, Some(UndoAction::MetaUpdate { action, prev }))
}

pub(super) fn selection_set(mut state: State, action: SelectionSet) -> Reduced {
    if state.selection == action.selection {
        return skip(state, "selection:set", "unchanged");
    }
    let prev = std::mem::replace(&mut state.selection, action.selection.clone());
    (state, Some(UndoAction::SelectionSet { action, prev }))
}
