//! # PatternKit Core
//!
//! Pure geometry for the PatternKit editor engine.
//! Provides the coordinate type, the affine transform algebra used by
//! symmetry operations, and resolution of nested mirror definitions into
//! transform chains.

pub mod error;
pub mod geometry;
pub mod mirror;
pub mod transform;

pub use error::{Error, GeometryError, MirrorError, Result};
pub use geometry::Coord;
pub use mirror::{
    check_parent_chain, get_mirror_transforms, get_transforms_for_mirror, mirror_transforms,
    reify_mirror, Mirror, MirrorParent, MirrorRef, MirrorResolver, TransformChains,
};
pub use transform::{
    apply_matrices, apply_matrix, chain_is_reflection, compose_chain, invert_matrix,
    rotation_matrix, scale_matrix, transform_to_matrices, transforms_to_matrices,
    translation_matrix, Matrix, Transform,
};
