//! # Convex Hull
//!
//! QuickHull algorithm for computing 3D convex hulls, used to draw one solid
//! per detector module from the corners of all its crystals.
//!
//! ## Algorithm Overview
//!
//! QuickHull is a divide-and-conquer algorithm:
//! 1. Find extreme points to form initial simplex (tetrahedron)
//! 2. For each face, find the farthest point outside
//! 3. Create new faces from that point to the horizon edges
//! 4. Repeat until no points remain outside
//!
//! ## Degenerate Input
//!
//! Fewer than 4 distinct points, or points that are all collinear or
//! coplanar, produce an empty mesh and a warning.

mod quickhull;

#[cfg(test)]
mod tests;

pub use quickhull::{convex_hull, DegenerateHull};

use glam::DVec3;

use crate::mesh::Mesh;

/// Computes the convex hull of an unordered point set.
///
/// # Arguments
///
/// * `points` - Points to enclose
/// * `tolerance` - Distance below which a point counts as lying on a face
///
/// # Returns
///
/// A closed, outward-wound mesh, or an empty mesh for degenerate input.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use scanner_mesh::header::BoxShape;
/// use scanner_mesh::ops::hull_from_points;
///
/// let shape = BoxShape::centered(DVec3::ONE);
/// let hull = hull_from_points(&shape.corners, 1e-7);
/// assert_eq!(hull.vertex_count(), 8);
/// assert_eq!(hull.triangle_count(), 12);
/// ```
pub fn hull_from_points(points: &[DVec3], tolerance: f64) -> Mesh {
    match convex_hull(points, tolerance) {
        Ok(mesh) => mesh,
        Err(reason) => {
            log::warn!("convex hull of {} points is degenerate: {reason}", points.len());
            Mesh::new()
        }
    }
}
