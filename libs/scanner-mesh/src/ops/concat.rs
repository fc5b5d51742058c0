//! # Concatenation
//!
//! Joins solids into one mesh for export. Vertices are not deduplicated and
//! each face keeps the color it was synthesized with.

use crate::mesh::Mesh;

/// Concatenates meshes in order.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use scanner_mesh::header::BoxShape;
/// use scanner_mesh::ops::concatenate;
/// use scanner_mesh::primitives::box_from_corners;
///
/// let a = box_from_corners(&BoxShape::centered(DVec3::ONE).corners);
/// let b = a.clone();
/// let joined = concatenate(&[a, b]);
/// assert_eq!(joined.vertex_count(), 16);
/// assert_eq!(joined.triangle_count(), 24);
/// ```
pub fn concatenate(meshes: &[Mesh]) -> Mesh {
    let vertex_count = meshes.iter().map(Mesh::vertex_count).sum();
    let triangle_count = meshes.iter().map(Mesh::triangle_count).sum();

    let mut result = Mesh::with_capacity(vertex_count, triangle_count);
    for mesh in meshes {
        result.merge(mesh);
    }
    result
}
