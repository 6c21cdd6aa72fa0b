use std::collections::{BTreeMap, HashSet};

use patternkit_core::{get_transforms_for_mirror, Coord, MirrorError, TransformChains};
use tracing::{debug, error};

use super::{skip, Reduced, Reducer};
use crate::action::{
    Added, Allocated, ById, DeleteMany, GroupRegroup, GroupUpdate, PathCreate, PathCreateMany,
    PathMultiply, PathUpdate, PathUpdateMany, UndoAction,
};
use crate::model::{Id, Path, PathGroup, Segment, Selection, SelectionKind, Style};
use crate::path_ops::{
    canonical_key, ensure_clockwise, path_to_reversed_segment_keys, path_to_segment_keys,
    simplify_path, transform_contour,
};
use crate::state::State;

/// A contour about to become a path.
struct Shape {
    origin: Coord,
    segments: Vec<Segment>,
}

impl Reducer {
    fn normalize(&self, origin: Coord, segments: Vec<Segment>, open: bool) -> Shape {
        let segments = simplify_path(origin, segments);
        let (origin, segments) = if open {
            (origin, segments)
        } else {
            ensure_clockwise(origin, segments)
        };
        Shape { origin, segments }
    }

    fn shape_key(&self, origin: Coord, segments: &[Segment]) -> String {
        canonical_key(path_to_segment_keys(
            origin,
            segments,
            self.options.key_precision,
        ))
    }

    /// Copies of `shape` under each chain, skipping any whose contour (in
    /// either direction) is already in `used`.
    fn mirror_copies(
        &self,
        shape: &Shape,
        open: bool,
        chains: &TransformChains,
        used: &mut HashSet<String>,
    ) -> Vec<Shape> {
        let precision = self.options.key_precision;
        let mut copies = Vec::new();
        for chain in chains {
            let (origin, segments) = transform_contour(shape.origin, &shape.segments, chain);
            let (origin, segments) = if open {
                (origin, segments)
            } else {
                ensure_clockwise(origin, segments)
            };
            let forward = self.shape_key(origin, &segments);
            let reversed = canonical_key(path_to_reversed_segment_keys(
                origin, &segments, precision,
            ));
            if used.contains(&forward) || used.contains(&reversed) {
                continue;
            }
            used.insert(forward);
            copies.push(Shape { origin, segments });
        }
        copies
    }

    /// Chains of the active mirror, `Ok(None)` when no mirror is active.
    fn active_chains(&self, state: &State) -> Result<Option<TransformChains>, MirrorError> {
        let Some(active) = state.active_mirror.as_deref() else {
            return Ok(None);
        };
        match get_transforms_for_mirror(active, &state.mirrors) {
            Ok(chains) => Ok(Some(chains)),
            Err(err) => {
                error!(%err, mirror = active, "Cannot resolve active mirror");
                Err(err)
            }
        }
    }

    fn new_path(&self, id: Id, shape: Shape, open: bool, group: &Id, created: i64) -> Path {
        Path {
            id,
            origin: shape.origin,
            segments: shape.segments,
            open,
            group: Some(group.clone()),
            style: Style::for_new_path(open, self.options.default_line_width),
            ordering: None,
            hidden: false,
            created,
        }
    }

    /// Creates one group holding the new path and its copies through the
    /// active mirror.
    pub(super) fn path_create(&self, mut state: State, action: PathCreate) -> Reduced {
        if action.segments.is_empty() {
            return skip(state, "path:create", "no segments");
        }
        let Ok(chains) = self.active_chains(&state) else {
            return (state, None);
        };

        let base = self.normalize(action.origin, action.segments.clone(), action.open);
        let mut used = HashSet::from([self.shape_key(base.origin, &base.segments)]);
        let copies = match &chains {
            Some(chains) => self.mirror_copies(&base, action.open, chains, &mut used),
            None => vec![],
        };

        let prev_next_id = state.next_id;
        let group = state.alloc_id();
        state.path_groups.insert(group.clone(), PathGroup::new(group.clone()));

        let mut ids = Vec::with_capacity(copies.len() + 1);
        for shape in std::iter::once(base).chain(copies) {
            let id = state.alloc_id();
            let path = self.new_path(id.clone(), shape, action.open, &group, action.created);
            state.paths.insert(id.clone(), path);
            ids.push(id);
        }
        debug!(paths = ids.len(), group = %group, "Created paths");

        (
            state,
            Some(UndoAction::PathCreate {
                action,
                added: Added {
                    ids,
                    group: Some(group),
                    prev_next_id,
                },
            }),
        )
    }

    pub(super) fn path_create_many(&self, mut state: State, action: PathCreateMany) -> Reduced {
        let inputs: Vec<&PathCreate> = action
            .paths
            .iter()
            .filter(|path| !path.segments.is_empty())
            .collect();
        if inputs.is_empty() {
            return skip(state, "path:create:many", "no paths");
        }
        let chains = if action.with_mirror {
            match self.active_chains(&state) {
                Ok(chains) => chains,
                Err(_) => return (state, None),
            }
        } else {
            None
        };

        let mut used = HashSet::new();
        let mut shapes = Vec::new();
        for input in inputs {
            let base = self.normalize(input.origin, input.segments.clone(), input.open);
            used.insert(self.shape_key(base.origin, &base.segments));
            let copies = match &chains {
                Some(chains) => self.mirror_copies(&base, input.open, chains, &mut used),
                None => vec![],
            };
            shapes.push((base, input.open, input.created));
            shapes.extend(copies.into_iter().map(|c| (c, input.open, input.created)));
        }

        let prev_next_id = state.next_id;
        let group = state.alloc_id();
        state.path_groups.insert(group.clone(), PathGroup::new(group.clone()));
        let mut ids = Vec::with_capacity(shapes.len());
        for (shape, open, created) in shapes {
            let id = state.alloc_id();
            let path = self.new_path(id.clone(), shape, open, &group, created);
            state.paths.insert(id.clone(), path);
            ids.push(id);
        }

        (
            state,
            Some(UndoAction::PathCreateMany {
                action,
                added: Added {
                    ids,
                    group: Some(group),
                    prev_next_id,
                },
            }),
        )
    }

    /// Adds copies of the selected paths through `mirror`. Ungrouped sources
    /// are first gathered into one new group.
    pub(super) fn path_multiply(&self, mut state: State, action: PathMultiply) -> Reduced {
        let chains = match get_transforms_for_mirror(action.mirror.as_str(), &state.mirrors) {
            Ok(chains) => chains,
            Err(err) => {
                error!(%err, mirror = %action.mirror, "Cannot resolve mirror for multiply");
                return (state, None);
            }
        };
        let sources = selected_paths(&state, &action.selection);
        if sources.is_empty() {
            return skip(state, "path:multiply", "no paths selected");
        }

        let mut used: HashSet<String> = state
            .paths
            .values()
            .map(|path| self.shape_key(path.origin, &path.segments))
            .collect();

        let prev_next_id = state.next_id;
        let mut prev = BTreeMap::new();
        let ungrouped: Vec<Id> = sources
            .iter()
            .filter(|id| state.paths.get(*id).is_some_and(|p| p.group.is_none()))
            .cloned()
            .collect();
        let group = if ungrouped.is_empty() {
            None
        } else {
            let group = state.alloc_id();
            state.path_groups.insert(group.clone(), PathGroup::new(group.clone()));
            for id in &ungrouped {
                if let Some(path) = state.paths.get_mut(id) {
                    prev.insert(id.clone(), path.clone());
                    path.group = Some(group.clone());
                }
            }
            Some(group)
        };

        let mut ids = Vec::new();
        for source_id in &sources {
            let Some(source) = state.paths.get(source_id).cloned() else {
                continue;
            };
            let shape = Shape {
                origin: source.origin,
                segments: source.segments.clone(),
            };
            for copy in self.mirror_copies(&shape, source.open, &chains, &mut used) {
                let id = state.alloc_id();
                state.paths.insert(
                    id.clone(),
                    Path {
                        id: id.clone(),
                        origin: copy.origin,
                        segments: copy.segments,
                        ..source.clone()
                    },
                );
                ids.push(id);
            }
        }

        if ids.is_empty() && group.is_none() {
            return skip(state, "path:multiply", "every copy already exists");
        }
        debug!(copies = ids.len(), "Multiplied paths");
        (
            state,
            Some(UndoAction::PathMultiply {
                action,
                added: Added {
                    ids,
                    group,
                    prev_next_id,
                },
                prev,
            }),
        )
    }
}

/// Path ids named by a path or group selection, in table order.
pub(super) fn selected_paths(state: &State, selection: &Selection) -> Vec<Id> {
    match selection.kind {
        SelectionKind::Path => state
            .paths
            .keys()
            .filter(|id| selection.contains(id))
            .cloned()
            .collect(),
        SelectionKind::PathGroup => state
            .paths
            .values()
            .filter(|path| path.group.as_deref().is_some_and(|g| selection.contains(g)))
            .map(|path| path.id.clone())
            .collect(),
        _ => vec![],
    }
}

pub(super) fn path_update(mut state: State, action: PathUpdate) -> Reduced {
    let Some(prev) = state.paths.get(&action.id).cloned() else {
        return skip(state, "path:update", "no such path");
    };
    let path = Path {
        id: action.id.clone(),
        ..action.path.clone()
    };
    state.paths.insert(action.id.clone(), path);
    (state, Some(UndoAction::PathUpdate { action, prev }))
}

/// Replaces or inserts each path; only entries that existed are recorded.
pub(super) fn path_update_many(mut state: State, action: PathUpdateMany) -> Reduced {
    if action.changed.is_empty() {
        return skip(state, "path:update:many", "nothing changed");
    }
    let mut prev = BTreeMap::new();
    for (id, path) in &action.changed {
        let path = Path {
            id: id.clone(),
            ..path.clone()
        };
        if let Some(old) = state.paths.insert(id.clone(), path) {
            prev.insert(id.clone(), old);
        }
    }
    (state, Some(UndoAction::PathUpdateMany { action, prev }))
}

pub(super) fn path_delete(mut state: State, action: ById) -> Reduced {
    let Some(prev) = state.paths.remove(&action.id) else {
        return skip(state, "path:delete", "no such path");
    };
    let prev_selection = state.prune_selection(SelectionKind::Path, &[action.id.as_str()]);
    (
        state,
        Some(UndoAction::PathDelete {
            action,
            prev,
            prev_selection,
        }),
    )
}

pub(super) fn path_delete_many(mut state: State, action: DeleteMany) -> Reduced {
    let prev: BTreeMap<Id, Path> = action
        .ids
        .iter()
        .filter_map(|id| state.paths.remove(id).map(|path| (id.clone(), path)))
        .collect();
    if prev.is_empty() {
        return skip(state, "path:delete:many", "no such paths");
    }
    let removed: Vec<&str> = prev.keys().map(String::as_str).collect();
    let prev_selection = state.prune_selection(SelectionKind::Path, &removed);
    (
        state,
        Some(UndoAction::PathDeleteMany {
            action,
            prev,
            prev_selection,
        }),
    )
}

/// Replaces a group, creating it if absent.
pub(super) fn group_update(mut state: State, action: GroupUpdate) -> Reduced {
    let group = PathGroup {
        id: action.id.clone(),
        ..action.group.clone()
    };
    if state.path_groups.get(&action.id) == Some(&group) {
        return skip(state, "group:update", "unchanged");
    }
    let prev = state.path_groups.insert(action.id.clone(), group);
    (state, Some(UndoAction::GroupUpdate { action, prev }))
}

/// Deletes a group together with its member paths.
pub(super) fn group_delete(mut state: State, action: ById) -> Reduced {
    let Some(prev) = state.path_groups.remove(&action.id) else {
        return skip(state, "group:delete", "no such group");
    };
    let members: Vec<Id> = state
        .paths
        .values()
        .filter(|path| path.group.as_deref() == Some(action.id.as_str()))
        .map(|path| path.id.clone())
        .collect();
    let prev_paths: BTreeMap<Id, Path> = members
        .iter()
        .filter_map(|id| state.paths.remove(id).map(|path| (id.clone(), path)))
        .collect();

    let prev_selection = state.selection.clone();
    let member_refs: Vec<&str> = members.iter().map(String::as_str).collect();
    state.prune_selection(SelectionKind::Path, &member_refs);
    state.prune_selection(SelectionKind::PathGroup, &[action.id.as_str()]);
    debug!(group = %action.id, paths = prev_paths.len(), "Deleted group");

    (
        state,
        Some(UndoAction::GroupDelete {
            action,
            prev,
            prev_paths,
            prev_selection,
        }),
    )
}

/// Moves the selected paths into an existing group or a new one.
pub(super) fn group_regroup(mut state: State, action: GroupRegroup) -> Reduced {
    let targets = selected_paths(&state, &action.selection);
    if targets.is_empty() {
        return skip(state, "group:regroup", "no paths selected");
    }

    let (group, added) = match &action.group {
        Some(group) if state.path_groups.contains_key(group) => (group.clone(), None),
        Some(_) => return skip(state, "group:regroup", "no such group"),
        None => {
            let prev_next_id = state.next_id;
            let id = state.alloc_id();
            state.path_groups.insert(id.clone(), PathGroup::new(id.clone()));
            (id.clone(), Some(Allocated { id, prev_next_id }))
        }
    };

    let mut prev = BTreeMap::new();
    for id in &targets {
        if let Some(path) = state.paths.get_mut(id) {
            if path.group.as_ref() != Some(&group) {
                prev.insert(id.clone(), path.clone());
                path.group = Some(group.clone());
            }
        }
    }
    if prev.is_empty() && added.is_none() {
        return skip(state, "group:regroup", "already grouped");
    }
    (
        state,
        Some(UndoAction::GroupRegroup {
            action,
            prev,
            added,
        }),
    )
}
