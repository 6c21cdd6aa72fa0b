use patternkit_core::{
    apply_matrices, apply_matrix, invert_matrix, rotation_matrix, scale_matrix,
    transform_to_matrices, translation_matrix, Coord, Matrix, Transform,
};
use proptest::prelude::*;

fn near(a: Coord, b: Coord) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
}

#[test]
fn test_reflect_is_involution() {
    let chain = transform_to_matrices(&Transform::Reflect {
        p1: Coord::new(1.0, -2.0),
        p2: Coord::new(4.0, 3.0),
    });
    let p = Coord::new(7.5, 0.25);
    let once = apply_matrices(p, &chain);
    let twice = apply_matrices(once, &chain);
    assert!(near(twice, p));
    assert!(!near(once, p));
}

#[test]
fn test_points_on_axis_are_fixed() {
    let chain = transform_to_matrices(&Transform::Reflect {
        p1: Coord::new(0.0, 0.0),
        p2: Coord::new(2.0, 1.0),
    });
    let on_axis = Coord::new(4.0, 2.0);
    assert!(near(apply_matrices(on_axis, &chain), on_axis));
}

#[test]
fn test_chain_applies_in_order() {
    let chain = vec![translation_matrix(Coord::new(1.0, 0.0)), scale_matrix(2.0, 2.0)];
    assert_eq!(apply_matrices(Coord::new(1.0, 1.0), &chain), Coord::new(4.0, 2.0));

    let reversed = vec![scale_matrix(2.0, 2.0), translation_matrix(Coord::new(1.0, 0.0))];
    assert_eq!(apply_matrices(Coord::new(1.0, 1.0), &reversed), Coord::new(3.0, 2.0));
}

#[test]
fn test_empty_chain_is_identity() {
    let p = Coord::new(-3.0, 9.0);
    assert_eq!(apply_matrices(p, &[]), p);
    assert_eq!(apply_matrix(p, &Matrix::IDENTITY), p);
}

#[test]
fn test_matrix_serializes_as_rows() {
    let json = serde_json::to_string(&translation_matrix(Coord::new(2.0, 3.0)))
        .expect("serialize");
    assert_eq!(json, "[[1.0,0.0,2.0],[0.0,1.0,3.0]]");
}

proptest! {
    #[test]
    fn prop_rotation_inverse_restores_point(theta in -10.0f64..10.0, x in -100.0f64..100.0, y in -100.0f64..100.0) {
        let m = rotation_matrix(theta);
        let inv = invert_matrix(&m).expect("rotation inverts");
        let p = Coord::new(x, y);
        prop_assert!(near(apply_matrix(apply_matrix(p, &m), &inv), p));
    }

    #[test]
    fn prop_translation_inverse_restores_point(dx in -1e3f64..1e3, dy in -1e3f64..1e3, x in -100.0f64..100.0, y in -100.0f64..100.0) {
        let m = translation_matrix(Coord::new(dx, dy));
        let inv = invert_matrix(&m).expect("translation inverts");
        let p = Coord::new(x, y);
        prop_assert!(near(apply_matrices(p, &[m, inv]), p));
    }
}
