//! # Mirror Resolution
//!
//! A [`Mirror`] describes a symmetry group: `n + 1`-fold rotation about
//! `origin` (where `n = rotational.len()` and each flag enables one of the
//! non-identity rotations) and an optional reflection across the line through
//! `origin` and `point`.
//!
//! Mirrors can be parented. A child's transforms are combined with every
//! transform of its ancestry, so multiplying a path under a child mirror
//! multiplies it under each combination of the nested symmetries:
//!
//! ```text
//! own ++ parent ++ [o ++ p for o in own, for p in parent]
//! ```
//!
//! Parents are either an id into the mirrors table or a reified copy of the
//! parent mirror. Both forms resolve to the same chains. A mirror that is its
//! own ancestor is reported as [`MirrorError::Cycle`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MirrorError;
use crate::geometry::Coord;
use crate::transform::{transforms_to_matrices, Matrix, Transform};

/// Every transform chain implied by a mirror and its ancestry.
pub type TransformChains = Vec<Vec<Matrix>>;

/// A symmetry definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mirror {
    pub id: String,
    pub origin: Coord,
    pub point: Coord,
    pub rotational: Vec<bool>,
    pub reflect: bool,
    #[serde(default)]
    pub parent: Option<MirrorParent>,
}

/// Link from a mirror to its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MirrorParent {
    Id(String),
    Reified(Box<Mirror>),
}

impl MirrorParent {
    pub fn id(&self) -> &str {
        match self {
            MirrorParent::Id(id) => id,
            MirrorParent::Reified(mirror) => &mirror.id,
        }
    }
}

impl Mirror {
    pub fn new(id: impl Into<String>, origin: Coord, point: Coord) -> Self {
        Self {
            id: id.into(),
            origin,
            point,
            rotational: Vec::new(),
            reflect: false,
            parent: None,
        }
    }

    pub fn with_rotational(mut self, rotational: Vec<bool>) -> Self {
        self.rotational = rotational;
        self
    }

    pub fn with_reflect(mut self, reflect: bool) -> Self {
        self.reflect = reflect;
        self
    }

    pub fn with_parent(mut self, parent: MirrorParent) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent.as_ref().map(MirrorParent::id)
    }
}

/// A mirror given either by value or by id.
#[derive(Debug, Clone, Copy)]
pub enum MirrorRef<'a> {
    Id(&'a str),
    Mirror(&'a Mirror),
}

impl<'a> From<&'a Mirror> for MirrorRef<'a> {
    fn from(mirror: &'a Mirror) -> Self {
        MirrorRef::Mirror(mirror)
    }
}

impl<'a> From<&'a str> for MirrorRef<'a> {
    fn from(id: &'a str) -> Self {
        MirrorRef::Id(id)
    }
}

/// The symmetric operations of a single mirror, ignoring its parent.
///
/// The first variant is always the identity (`[]`). Reflection doubles the
/// base set, and every enabled rotation adds one rotated copy of the base set,
/// giving `2^reflect * (enabled + 1)` variants.
pub fn mirror_transforms(mirror: &Mirror) -> Vec<Vec<Transform>> {
    let mut base: Vec<Vec<Transform>> = vec![Vec::new()];
    if mirror.reflect {
        base.push(vec![Transform::Reflect {
            p1: mirror.origin,
            p2: mirror.point,
        }]);
    }

    let step = PI * 2.0 / (mirror.rotational.len() + 1) as f64;
    let mut variants = base.clone();
    for (i, enabled) in mirror.rotational.iter().enumerate() {
        if !enabled {
            continue;
        }
        let rotate = Transform::Rotate {
            center: mirror.origin,
            theta: step * (i + 1) as f64,
        };
        variants.extend(base.iter().map(|variant| {
            let mut variant = variant.clone();
            variant.push(rotate);
            variant
        }));
    }
    variants
}

fn own_chains(mirror: &Mirror) -> TransformChains {
    mirror_transforms(mirror)
        .iter()
        .map(|variant| transforms_to_matrices(variant))
        .collect()
}

fn combine(own: TransformChains, parent: &TransformChains) -> TransformChains {
    let mut out = Vec::with_capacity(own.len() + parent.len() * (own.len() + 1));
    out.extend(own.iter().cloned());
    out.extend(parent.iter().cloned());
    for o in &own {
        for p in parent {
            let mut chain = o.clone();
            chain.extend_from_slice(p);
            out.push(chain);
        }
    }
    out
}

/// Resolves mirrors against a table, memoizing results per id.
pub struct MirrorResolver<'a> {
    mirrors: &'a BTreeMap<String, Mirror>,
    cache: HashMap<String, TransformChains>,
}

impl<'a> MirrorResolver<'a> {
    pub fn new(mirrors: &'a BTreeMap<String, Mirror>) -> Self {
        Self {
            mirrors,
            cache: HashMap::new(),
        }
    }

    /// Transform chains for a mirror in the table.
    pub fn resolve_id(&mut self, id: &str) -> Result<TransformChains, MirrorError> {
        self.resolve_id_inner(id, &mut Vec::new())
    }

    /// Transform chains for a mirror value, which need not be in the table.
    pub fn resolve(&mut self, mirror: &Mirror) -> Result<TransformChains, MirrorError> {
        self.resolve_inner(mirror, &mut Vec::new())
    }

    fn resolve_id_inner(
        &mut self,
        id: &str,
        visiting: &mut Vec<String>,
    ) -> Result<TransformChains, MirrorError> {
        if let Some(cached) = self.cache.get(id) {
            return Ok(cached.clone());
        }
        let mirrors = self.mirrors;
        let mirror = mirrors.get(id).ok_or_else(|| MirrorError::UnknownMirror {
            id: id.to_string(),
        })?;
        let chains = self.resolve_inner(mirror, visiting)?;
        self.cache.insert(id.to_string(), chains.clone());
        Ok(chains)
    }

    fn resolve_inner(
        &mut self,
        mirror: &Mirror,
        visiting: &mut Vec<String>,
    ) -> Result<TransformChains, MirrorError> {
        if visiting.iter().any(|id| id == &mirror.id) {
            return Err(MirrorError::Cycle {
                id: mirror.id.clone(),
            });
        }
        visiting.push(mirror.id.clone());

        let own = own_chains(mirror);
        let result = match &mirror.parent {
            None => Ok(own),
            Some(MirrorParent::Id(parent)) => self
                .resolve_id_inner(parent, visiting)
                .map(|parent| combine(own, &parent)),
            Some(MirrorParent::Reified(parent)) => self
                .resolve_inner(parent, visiting)
                .map(|parent| combine(own, &parent)),
        };

        visiting.pop();
        result
    }
}

/// Computes every transform chain implied by a mirror and its ancestry.
pub fn get_transforms_for_mirror<'a>(
    mirror: impl Into<MirrorRef<'a>>,
    mirrors: &BTreeMap<String, Mirror>,
) -> Result<TransformChains, MirrorError> {
    let mut resolver = MirrorResolver::new(mirrors);
    match mirror.into() {
        MirrorRef::Id(id) => resolver.resolve_id(id),
        MirrorRef::Mirror(mirror) => resolver.resolve(mirror),
    }
}

/// Resolves a whole mirrors table at once.
///
/// Mirrors are resolved in topological order: each pass resolves the mirrors
/// whose parent is already known. A pass that makes no progress means the
/// remaining mirrors sit on a cycle or point at a missing parent.
pub fn get_mirror_transforms(
    mirrors: &BTreeMap<String, Mirror>,
) -> Result<BTreeMap<String, TransformChains>, MirrorError> {
    let mut resolved: BTreeMap<String, TransformChains> = BTreeMap::new();
    let mut pending: Vec<&Mirror> = mirrors.values().collect();
    let mut passes = 0usize;

    while !pending.is_empty() {
        passes += 1;
        let before = pending.len();
        let mut failure = None;

        pending.retain(|mirror| {
            let chains = match &mirror.parent {
                None => Some(Ok(own_chains(mirror))),
                Some(MirrorParent::Id(parent)) => resolved
                    .get(parent)
                    .map(|parent| Ok(combine(own_chains(mirror), parent))),
                Some(MirrorParent::Reified(_)) => {
                    Some(MirrorResolver::new(mirrors).resolve(mirror))
                }
            };
            match chains {
                Some(Ok(chains)) => {
                    resolved.insert(mirror.id.clone(), chains);
                    false
                }
                Some(Err(err)) => {
                    failure.get_or_insert(err);
                    false
                }
                None => true,
            }
        });

        if let Some(err) = failure {
            return Err(err);
        }

        if pending.len() == before {
            let stuck = pending[0];
            return Err(match stuck.parent_id() {
                Some(parent) if !mirrors.contains_key(parent) => MirrorError::UnknownMirror {
                    id: parent.to_string(),
                },
                _ => MirrorError::Cycle {
                    id: stuck.id.clone(),
                },
            });
        }
    }

    debug!(mirrors = resolved.len(), passes, "Resolved mirror table");
    Ok(resolved)
}

/// Checks that a mirror's parent chain terminates and only names known mirrors.
///
/// `mirror` is checked as if it replaced the table entry with the same id.
pub fn check_parent_chain(
    mirror: &Mirror,
    mirrors: &BTreeMap<String, Mirror>,
) -> Result<(), MirrorError> {
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(&mirror.id);

    let mut current = mirror.parent.as_ref();
    while let Some(parent) = current {
        let next = match parent {
            MirrorParent::Id(id) => {
                if !visited.insert(id) {
                    return Err(MirrorError::Cycle { id: id.clone() });
                }
                mirrors
                    .get(id)
                    .ok_or_else(|| MirrorError::UnknownMirror { id: id.clone() })?
            }
            MirrorParent::Reified(reified) => {
                if !visited.insert(&reified.id) {
                    return Err(MirrorError::Cycle {
                        id: reified.id.clone(),
                    });
                }
                &**reified
            }
        };
        current = next.parent.as_ref();
    }
    Ok(())
}

/// Replaces every id parent on the chain with a reified copy from the table.
pub fn reify_mirror(
    mirror: &Mirror,
    mirrors: &BTreeMap<String, Mirror>,
) -> Result<Mirror, MirrorError> {
    check_parent_chain(mirror, mirrors)?;
    reify_unchecked(mirror, mirrors)
}

fn reify_unchecked(
    mirror: &Mirror,
    mirrors: &BTreeMap<String, Mirror>,
) -> Result<Mirror, MirrorError> {
    let parent = match &mirror.parent {
        None => None,
        Some(MirrorParent::Id(id)) => {
            let parent = mirrors
                .get(id)
                .ok_or_else(|| MirrorError::UnknownMirror { id: id.clone() })?;
            Some(MirrorParent::Reified(Box::new(reify_unchecked(parent, mirrors)?)))
        }
        Some(MirrorParent::Reified(parent)) => {
            Some(MirrorParent::Reified(Box::new(reify_unchecked(parent, mirrors)?)))
        }
    };
    Ok(Mirror {
        parent,
        ..mirror.clone()
    })
}
