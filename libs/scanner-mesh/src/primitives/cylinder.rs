//! # Cylinder Primitive
//!
//! Generates the closed reference cylinder used to show a scanner's field of
//! view.

use glam::DVec3;
use std::f64::consts::PI;

use crate::error::{ScannerMeshError, ScannerMeshResult};
use crate::mesh::Mesh;

/// Creates a capped cylinder centered on the origin, axis along z.
///
/// # Arguments
///
/// * `radius` - Radius of both caps
/// * `height` - Extent along z, from `-height / 2` to `height / 2`
/// * `segments` - Number of segments around circumference
///
/// # Example
///
/// ```rust
/// use scanner_mesh::primitives::create_cylinder;
///
/// let mesh = create_cylinder(300.0, 200.0, 32).unwrap();
/// assert_eq!(mesh.vertex_count(), 64);
/// ```
pub fn create_cylinder(radius: f64, height: f64, segments: u32) -> ScannerMeshResult<Mesh> {
    if !(radius > 0.0 && height > 0.0) {
        return Err(ScannerMeshError::InvalidFov { radius, height });
    }
    let segments = segments.max(config::constants::MIN_SEGMENTS);

    let mut mesh = Mesh::with_capacity(2 * segments as usize, 4 * segments as usize);
    let (z_bottom, z_top) = (-height / 2.0, height / 2.0);

    let ring = |mesh: &mut Mesh, z: f64| -> Vec<u32> {
        (0..segments)
            .map(|j| {
                let theta = 2.0 * PI * j as f64 / segments as f64;
                mesh.add_vertex(DVec3::new(radius * theta.cos(), radius * theta.sin(), z))
            })
            .collect()
    };
    let bottom = ring(&mut mesh, z_bottom);
    let top = ring(&mut mesh, z_top);

    // Side quads
    for j in 0..segments as usize {
        let j_next = (j + 1) % segments as usize;
        mesh.add_triangle(bottom[j], bottom[j_next], top[j_next]);
        mesh.add_triangle(bottom[j], top[j_next], top[j]);
    }

    // Caps (fans)
    for j in 1..segments as usize - 1 {
        mesh.add_triangle(bottom[0], bottom[j + 1], bottom[j]);
        mesh.add_triangle(top[0], top[j], top[j + 1]);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cylinder_counts() {
        let mesh = create_cylinder(5.0, 10.0, 32).unwrap();
        assert_eq!(mesh.vertex_count(), 64);
        // 2 per side quad + (n - 2) per cap
        assert_eq!(mesh.triangle_count(), 64 + 60);
        assert!(mesh.validate());
    }

    #[test]
    fn test_cylinder_centered() {
        let mesh = create_cylinder(5.0, 10.0, 16).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min.z, -5.0);
        assert_relative_eq!(max.z, 5.0);
        assert_relative_eq!(max.x, 5.0);
    }

    #[test]
    fn test_cylinder_volume_matches_prism() {
        let n = 24u32;
        let mesh = create_cylinder(2.0, 3.0, n).unwrap();
        let polygon_area = 0.5 * n as f64 * 4.0 * (2.0 * PI / n as f64).sin();
        assert_relative_eq!(mesh.volume(), polygon_area * 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cylinder_invalid_dimensions() {
        assert!(matches!(
            create_cylinder(0.0, 10.0, 32),
            Err(ScannerMeshError::InvalidFov { .. })
        ));
        assert!(create_cylinder(5.0, -1.0, 32).is_err());
        assert!(create_cylinder(f64::NAN, 1.0, 32).is_err());
    }

    #[test]
    fn test_cylinder_clamps_segments() {
        let mesh = create_cylinder(1.0, 1.0, 1).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
    }
}
