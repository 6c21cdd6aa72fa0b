use patternkit_core::{invert_matrix, rotation_matrix, scale_matrix, GeometryError, Matrix};

use super::{skip, Reduced};
use crate::action::{Flip, GlobalTransform, UndoAction};
use crate::path_ops::{transform_clip, transform_guide, transform_mirror, transform_path};
use crate::state::State;

impl GlobalTransform {
    /// The matrices this transform applies, in order.
    pub fn matrices(&self) -> Vec<Matrix> {
        let rotate = self.rotate.map(rotation_matrix);
        let flip = self.flip.map(|flip| match flip {
            Flip::H => scale_matrix(-1.0, 1.0),
            Flip::V => scale_matrix(1.0, -1.0),
        });
        rotate.into_iter().chain(flip).collect()
    }

    /// The chain that undoes [`matrices`](Self::matrices).
    pub fn inverse_matrices(&self) -> Result<Vec<Matrix>, GeometryError> {
        self.matrices().iter().rev().map(invert_matrix).collect()
    }
}

/// Applies `chain` to every positioned entity: paths, guides, clips and
/// mirrors.
pub(crate) fn transform_document(state: &mut State, chain: &[Matrix]) {
    for path in state.paths.values_mut() {
        *path = transform_path(path, chain);
    }
    for guide in state.guides.values_mut() {
        *guide = transform_guide(guide, chain);
    }
    for clip in state.clips.values_mut() {
        *clip = transform_clip(clip, chain);
    }
    for mirror in state.mirrors.values_mut() {
        *mirror = transform_mirror(mirror, chain);
    }
}

pub(super) fn global_transform(mut state: State, action: GlobalTransform) -> Reduced {
    let chain = action.matrices();
    if chain.is_empty() {
        return skip(state, "global:transform", "no rotation or flip");
    }
    transform_document(&mut state, &chain);
    (state, Some(UndoAction::GlobalTransform { action }))
}
