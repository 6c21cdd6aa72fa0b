//! # Transform Algebra
//!
//! Affine matrices and the symmetric operations built from them.
//!
//! A [`Matrix`] is a 2×3 affine transform `[[a, b, c], [d, e, f]]` mapping
//! `x' = a·x + b·y + c` and `y' = d·x + e·y + f`. Matrices are combined into
//! chains (`&[Matrix]`) which are applied in array order, so the first matrix
//! in the chain acts on the point first.
//!
//! Only translation, scale and rotation matrices can be inverted; the editor
//! never needs general affine inversion and [`invert_matrix`] reports anything
//! else as an error.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::Coord;

/// A 2×3 affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix(pub [[f64; 3]; 2]);

impl Matrix {
    pub const IDENTITY: Matrix = Matrix([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    /// Determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        let [[a, b, _], [d, e, _]] = self.0;
        a * e - b * d
    }

    /// Matrix equivalent to applying `self` and then `next`.
    pub fn then(&self, next: &Matrix) -> Matrix {
        let [[a1, b1, c1], [d1, e1, f1]] = self.0;
        let [[a2, b2, c2], [d2, e2, f2]] = next.0;
        Matrix([
            [
                a2 * a1 + b2 * d1,
                a2 * b1 + b2 * e1,
                a2 * c1 + b2 * f1 + c2,
            ],
            [
                d2 * a1 + e2 * d1,
                d2 * b1 + e2 * e1,
                d2 * c1 + e2 * f1 + f2,
            ],
        ])
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A single symmetric operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Transform {
    /// Rotation by `theta` radians about `center`.
    #[serde(rename = "rotate")]
    Rotate { center: Coord, theta: f64 },
    /// Reflection across the line through `p1` and `p2`.
    #[serde(rename = "reflect")]
    Reflect { p1: Coord, p2: Coord },
}

pub fn translation_matrix(by: Coord) -> Matrix {
    Matrix([[1.0, 0.0, by.x], [0.0, 1.0, by.y]])
}

pub fn rotation_matrix(theta: f64) -> Matrix {
    let (sin, cos) = theta.sin_cos();
    Matrix([[cos, -sin, 0.0], [sin, cos, 0.0]])
}

pub fn scale_matrix(sx: f64, sy: f64) -> Matrix {
    Matrix([[sx, 0.0, 0.0], [0.0, sy, 0.0]])
}

/// Expands a symmetric operation into the primitive matrices that implement it.
///
/// Rotation yields three matrices (translate to origin, rotate, translate
/// back). Reflection yields five: the mirror axis is rotated onto the x axis,
/// flipped with `scale(1, -1)`, and rotated back.
pub fn transform_to_matrices(transform: &Transform) -> Vec<Matrix> {
    match *transform {
        Transform::Rotate { center, theta } => vec![
            translation_matrix(-center),
            rotation_matrix(theta),
            translation_matrix(center),
        ],
        Transform::Reflect { p1, p2 } => {
            let theta = p1.angle_to(&p2);
            vec![
                translation_matrix(-p1),
                rotation_matrix(-theta),
                scale_matrix(1.0, -1.0),
                rotation_matrix(theta),
                translation_matrix(p1),
            ]
        }
    }
}

/// Flattens a list of transforms into one matrix chain.
pub fn transforms_to_matrices(transforms: &[Transform]) -> Vec<Matrix> {
    transforms.iter().flat_map(transform_to_matrices).collect()
}

/// Inverts a translation-only, scale-only or rotation-only matrix.
pub fn invert_matrix(matrix: &Matrix) -> Result<Matrix, GeometryError> {
    let [[a, b, c], [d, e, f]] = matrix.0;

    if a == 1.0 && b == 0.0 && d == 0.0 && e == 1.0 {
        return Ok(Matrix([[1.0, 0.0, -c], [0.0, 1.0, -f]]));
    }

    if b == 0.0 && d == 0.0 && c == 0.0 && f == 0.0 && a != 0.0 && e != 0.0 {
        return Ok(Matrix([[1.0 / a, 0.0, 0.0], [0.0, 1.0 / e, 0.0]]));
    }

    // Pure rotation: the inverse is the transpose of the linear part.
    if c == 0.0 && f == 0.0 && a == e && b == -d && ((a * a + b * b) - 1.0).abs() < 1e-12 {
        return Ok(Matrix([[a, d, 0.0], [b, e, 0.0]]));
    }

    Err(GeometryError::NonInvertible { matrix: matrix.0 })
}

pub fn apply_matrix(point: Coord, matrix: &Matrix) -> Coord {
    let [[a, b, c], [d, e, f]] = matrix.0;
    Coord::new(
        a * point.x + b * point.y + c,
        d * point.x + e * point.y + f,
    )
}

pub fn apply_matrices(point: Coord, chain: &[Matrix]) -> Coord {
    chain
        .iter()
        .fold(point, |point, matrix| apply_matrix(point, matrix))
}

/// Collapses a chain into a single matrix.
pub fn compose_chain(chain: &[Matrix]) -> Matrix {
    chain
        .iter()
        .fold(Matrix::IDENTITY, |acc, matrix| acc.then(matrix))
}

/// Whether the chain flips orientation (negative determinant).
///
/// Arcs transformed by such a chain must swap their winding direction.
pub fn chain_is_reflection(chain: &[Matrix]) -> bool {
    chain.iter().map(Matrix::determinant).product::<f64>() < 0.0
}
