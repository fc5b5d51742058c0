//! # Hull Integration Tests
//!
//! Convex hulls over placed detector boxes.

use super::*;
use crate::header::BoxShape;
use crate::transform::RigidTransform;
use approx::assert_relative_eq;
use config::constants::HULL_TOLERANCE;

fn corners_of(boxes: &[BoxShape]) -> Vec<DVec3> {
    boxes.iter().flat_map(|b| b.corners).collect()
}

#[test]
fn test_hull_of_single_box_is_the_box() {
    let shape = BoxShape::cuboid(DVec3::ZERO, DVec3::new(10.0, 20.0, 30.0));
    let hull = hull_from_points(&shape.corners, HULL_TOLERANCE);

    assert_eq!(hull.vertex_count(), 8);
    assert_eq!(hull.triangle_count(), 12);
    assert_eq!(hull.bounding_box(), (DVec3::ZERO, DVec3::new(10.0, 20.0, 30.0)));
    assert_relative_eq!(hull.volume(), 6000.0, epsilon = 1e-6);
    assert!(hull.validate());
}

#[test]
fn test_hull_of_crystal_row() {
    let crystal = BoxShape::centered(DVec3::ONE);
    let row: Vec<BoxShape> = (0..4)
        .map(|i| RigidTransform::from_translation(DVec3::X * i as f64).apply_to_box(&crystal))
        .collect();

    let hull = hull_from_points(&corners_of(&row), HULL_TOLERANCE);

    assert_eq!(hull.vertex_count(), 8);
    assert_eq!(hull.triangle_count(), 12);
    assert_relative_eq!(hull.volume(), 4.0, epsilon = 1e-9);
}

#[test]
fn test_hull_of_rotated_crystal_grid() {
    let crystal = BoxShape::centered(DVec3::new(1.0, 1.0, 2.0));
    let module = RigidTransform::from_rotation_z_translation(0.3, DVec3::new(50.0, 0.0, 0.0));
    let mut boxes = Vec::new();
    for i in 0..3 {
        for j in 0..3 {
            let element = RigidTransform::from_translation(DVec3::new(i as f64, j as f64, 0.0));
            boxes.push(crate::transform::compose(&[module, element]).apply_to_box(&crystal));
        }
    }

    let hull = hull_from_points(&corners_of(&boxes), HULL_TOLERANCE);

    assert_eq!(hull.vertex_count(), 8);
    assert_relative_eq!(hull.volume(), 18.0, epsilon = 1e-6);
}

#[test]
fn test_hull_of_flat_points_is_empty() {
    let square = BoxShape::cuboid(DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0));
    let hull = hull_from_points(&square.corners, HULL_TOLERANCE);
    assert!(hull.is_empty());
}

#[test]
fn test_hull_of_no_points_is_empty() {
    assert!(hull_from_points(&[], HULL_TOLERANCE).is_empty());
}
