use approx::assert_abs_diff_eq;
use coordinatus_core::{Coordinate, CoordinateKind, GeometryError, RotationMatrix, Transform};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

fn sample_transforms() -> Vec<Transform> {
    vec![
        Transform::identity(2),
        Transform::translate_2d(3.0, -1.0),
        Transform::rotate_2d(FRAC_PI_4),
        Transform::rigid_2d(-2.0, 5.0, 2.5),
        Transform::rigid_2d(0.25, 0.5, -PI),
    ]
}

#[test]
fn test_composition_associative_over_samples() {
    let ts = sample_transforms();
    for a in &ts {
        for b in &ts {
            for c in &ts {
                let left = a.compose(b).unwrap().compose(c).unwrap();
                let right = a.compose(&b.compose(c).unwrap()).unwrap();
                assert!(
                    left.approx_eq(&right, 1e-12),
                    "associativity failed, difference {}",
                    left.max_difference(&right)
                );
            }
        }
    }
}

#[test]
fn test_inverse_over_samples() {
    for t in sample_transforms() {
        assert!(t.compose(&t.inverse()).unwrap().is_identity(1e-12));
        assert!(t.inverse().inverse().approx_eq(&t, 1e-12));
    }
}

#[test]
fn test_compose_then_apply_matches_sequential_apply() {
    let a = Transform::rigid_2d(1.0, 2.0, 0.6);
    let b = Transform::rigid_2d(-3.0, 0.5, -1.2);
    let p = Coordinate::point([[0.0, 1.0, -2.0, 4.5], [0.0, 1.0, 3.0, -0.5]]).unwrap();

    let combined = a.compose(&b).unwrap().apply_point(&p).unwrap();
    let sequential = a.apply_point(&b.apply_point(&p).unwrap()).unwrap();
    assert!(combined.approx_eq(&sequential, 1e-12));
}

#[test]
fn test_vector_between_points_transforms_like_vector() {
    let t = Transform::rigid_2d(7.0, -4.0, 1.1);
    let a = Coordinate::point([1.0, 2.0]).unwrap();
    let b = Coordinate::point([4.0, 6.0]).unwrap();
    let displacement = (&b - &a).unwrap().with_kind(CoordinateKind::Vector);

    // point minus point stays a point
    let moved = (t.apply_point(&b).unwrap() - t.apply_point(&a).unwrap()).unwrap();
    assert!(moved.is_point());

    let rotated = t.apply_vector(&displacement).unwrap();
    assert!(moved
        .with_kind(CoordinateKind::Vector)
        .approx_eq(&rotated, 1e-12));
}

#[test]
fn test_rotation_preserves_length() {
    let t = Transform::rotate_2d(0.8);
    let v = Coordinate::vector([3.0, 4.0]).unwrap();
    let r = t.apply_vector(&v).unwrap();
    let [x, y] = [r.values()[0], r.values()[1]];
    assert_abs_diff_eq!((x * x + y * y).sqrt(), 5.0, epsilon = 1e-12);
}

#[test]
fn test_3d_rotation_composition() {
    let rz = Transform::from_rotation(RotationMatrix::about_z(FRAC_PI_2));
    let rx = Transform::from_rotation(RotationMatrix::about_x(FRAC_PI_2));

    // x axis -> y axis under Rz, then y axis -> z axis under Rx
    let t = rx.compose(&rz).unwrap();
    let x = Coordinate::vector([1.0, 0.0, 0.0]).unwrap();
    let out = t.apply(&x).unwrap();
    assert!(out.approx_eq(&Coordinate::vector([0.0, 0.0, 1.0]).unwrap(), 1e-15));
}

#[test]
fn test_mixed_dimensions_rejected() {
    let t2 = Transform::rigid_2d(1.0, 1.0, 0.1);
    let t3 = Transform::identity(3);
    match t2.compose(&t3) {
        Err(GeometryError::DimensionMismatch {
            expected, found, ..
        }) => {
            assert_eq!(expected, 2);
            assert_eq!(found, 3);
        }
        other => panic!("expected DimensionMismatch, got {:?}", other),
    }
}

#[test]
fn test_homogeneous_matches_apply() {
    let t = Transform::rigid_2d(2.0, -1.0, 0.3);
    let m = t.to_homogeneous();
    let p = [1.5, -0.5, 1.0];
    let manual: Vec<f64> = m[..2]
        .iter()
        .map(|row| row.iter().zip(p).map(|(a, b)| a * b).sum())
        .collect();
    let applied = t.apply_point(&Coordinate::point([1.5, -0.5]).unwrap()).unwrap();
    assert_abs_diff_eq!(applied.values()[0], manual[0], epsilon = 1e-12);
    assert_abs_diff_eq!(applied.values()[1], manual[1], epsilon = 1e-12);
}
