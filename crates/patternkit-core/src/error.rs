//! Error handling for PatternKit core
//!
//! Provides error types for the pure geometry layer:
//! - Geometry errors (matrix algebra)
//! - Mirror errors (parent chain resolution)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised by the transform algebra when an operation falls outside the
/// supported subset of affine matrices.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Only translation, scale and rotation matrices can be inverted
    #[error("Cannot invert matrix {matrix:?}: only translation, scale or rotation matrices are supported")]
    NonInvertible {
        /// Rows of the rejected matrix.
        matrix: [[f64; 3]; 2],
    },
}

/// Mirror error type
///
/// Represents failures while walking a mirror's parent chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MirrorError {
    /// A mirror is its own ancestor
    #[error("Mirror cycle detected at '{id}'")]
    Cycle {
        /// The mirror id found twice on the chain.
        id: String,
    },

    /// A parent id does not exist in the mirrors table
    #[error("Unknown mirror '{id}'")]
    UnknownMirror {
        /// The id that could not be found.
        id: String,
    },
}

/// Main error type for the core crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Mirror error
    #[error(transparent)]
    Mirror(#[from] MirrorError),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
