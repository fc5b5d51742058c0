//! # Box Solid
//!
//! Builds a closed hexahedron from 8 already-placed corners.

use glam::DVec3;

use crate::mesh::Mesh;

/// Corner-to-face table for a [`BoxShape`](crate::header::BoxShape) in
/// canonical corner order, two triangles per quad face, wound
/// counter-clockwise when seen from outside.
///
/// Order: bottom, top, left, right, front, back.
pub const BOX_FACES: [[u32; 3]; 12] = [
    // Bottom face (corners 0-3)
    [0, 2, 1],
    [0, 3, 2],
    // Top face (corners 4-7)
    [4, 5, 6],
    [4, 6, 7],
    // Left face (0-3-7-4)
    [3, 0, 4],
    [3, 4, 7],
    // Right face (1-2-6-5)
    [1, 2, 6],
    [1, 6, 5],
    // Front face (0-1-5-4)
    [0, 1, 5],
    [0, 5, 4],
    // Back face (3-2-6-7)
    [2, 3, 7],
    [2, 7, 6],
];

/// Creates a box mesh from 8 corners in canonical order.
///
/// The corners are used as given: a box with permuted corners produces a
/// twisted mesh, which is not detected.
///
/// # Returns
///
/// A mesh with 8 vertices and 12 triangles.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use scanner_mesh::header::BoxShape;
/// use scanner_mesh::primitives::box_from_corners;
///
/// let shape = BoxShape::centered(DVec3::splat(2.0));
/// let mesh = box_from_corners(&shape.corners);
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn box_from_corners(corners: &[DVec3; 8]) -> Mesh {
    let mut mesh = Mesh::with_capacity(8, BOX_FACES.len());

    for corner in corners {
        mesh.add_vertex(*corner);
    }

    for [a, b, c] in BOX_FACES {
        mesh.add_triangle(a, b, c);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::BoxShape;
    use crate::transform::RigidTransform;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_counts_are_fixed() {
        let skewed = [
            DVec3::new(3.0, -1.0, 0.2),
            DVec3::new(-5.0, 2.0, 9.0),
            DVec3::ZERO,
            DVec3::splat(1e6),
            DVec3::new(0.1, 0.1, 0.1),
            DVec3::new(7.0, 7.0, -7.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 2.0),
        ];
        let mesh = box_from_corners(&skewed);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_box_vertices_keep_corner_order() {
        let shape = BoxShape::cuboid(DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0));
        let mesh = box_from_corners(&shape.corners);
        assert_eq!(mesh.vertices(), &shape.corners[..]);
    }

    #[test]
    fn test_box_is_outward_wound() {
        let shape = BoxShape::cuboid(DVec3::ZERO, DVec3::new(2.0, 3.0, 4.0));
        let mesh = box_from_corners(&shape.corners);
        assert_relative_eq!(mesh.volume(), 24.0, epsilon = 1e-12);
        assert!(mesh.validate());

        // Every face normal points away from the box center.
        let center = shape.center();
        for tri in mesh.triangles() {
            let [a, b, c] = tri.map(|i| mesh.vertex(i));
            let normal = (b - a).cross(c - a);
            let face_center = (a + b + c) / 3.0;
            assert!(normal.dot(face_center - center) > 0.0);
        }
    }

    #[test]
    fn test_rotated_box_keeps_volume() {
        let shape = BoxShape::centered(DVec3::new(1.0, 2.0, 3.0));
        let placed = RigidTransform::from_rotation_z_translation(0.4, DVec3::new(5.0, 0.0, 1.0))
            .apply_to_box(&shape);
        let mesh = box_from_corners(&placed.corners);
        assert_relative_eq!(mesh.volume(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_face_table_uses_every_corner() {
        let mut uses = [0usize; 8];
        for face in BOX_FACES {
            for index in face {
                uses[index as usize] += 1;
            }
        }
        // Each corner touches three quads; diagonals add the rest.
        assert_eq!(uses.iter().sum::<usize>(), 36);
        assert!(uses.iter().all(|&n| n >= 3));
    }
}
