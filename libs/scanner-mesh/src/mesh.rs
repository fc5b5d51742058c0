//! # Mesh Data Structure
//!
//! Triangle mesh with one RGBA color per face. A synthesized solid is a
//! `Mesh` whose faces all share one color.

use config::constants::{DEFAULT_FACE_COLOR, DEGENERATE_AREA_EPSILON};
use glam::DVec3;

/// An 8-bit RGBA color.
pub type Rgba = [u8; 4];

/// A triangle mesh with vertices, indices and optional face colors.
///
/// # Example
///
/// ```rust
/// use scanner_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// mesh.set_uniform_color([255, 40, 40, 50]);
/// assert_eq!(mesh.face_colors(), Some(&[[255, 40, 40, 50]][..]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
    /// Optional face colors, one per triangle
    face_colors: Option<Vec<Rgba>>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            face_colors: None,
        }
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            face_colors: None,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    ///
    /// If the mesh already carries face colors the new face gets
    /// [`DEFAULT_FACE_COLOR`] until it is recolored.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
        if let Some(colors) = &mut self.face_colors {
            colors.push(DEFAULT_FACE_COLOR);
        }
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Sets one color on every face.
    pub fn set_uniform_color(&mut self, color: Rgba) {
        self.face_colors = Some(vec![color; self.triangles.len()]);
    }

    /// Returns the face colors.
    pub fn face_colors(&self) -> Option<&[Rgba]> {
        self.face_colors.as_deref()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Computes the signed enclosed volume (divergence theorem).
    ///
    /// Positive for closed meshes with outward winding.
    pub fn volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|tri| {
                let v0 = self.vertices[tri[0] as usize];
                let v1 = self.vertices[tri[1] as usize];
                let v2 = self.vertices[tri[2] as usize];
                v0.dot(v1.cross(v2))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Appends another mesh; indices are offset, nothing is welded.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        let own_triangles = self.triangles.len();

        self.vertices.extend_from_slice(&other.vertices);

        for tri in &other.triangles {
            self.triangles.push([
                tri[0] + offset,
                tri[1] + offset,
                tri[2] + offset,
            ]);
        }

        match (&mut self.face_colors, &other.face_colors) {
            (Some(self_colors), Some(other_colors)) => {
                self_colors.extend_from_slice(other_colors);
            }
            (Some(self_colors), None) => {
                self_colors.resize(self.triangles.len(), DEFAULT_FACE_COLOR);
            }
            (None, Some(other_colors)) => {
                let mut colors = vec![DEFAULT_FACE_COLOR; own_triangles];
                colors.extend_from_slice(other_colors);
                self.face_colors = Some(colors);
            }
            (None, None) => {}
        }
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No degenerate triangles (repeated index or zero area)
    /// - Face colors, if present, cover every triangle
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        if let Some(colors) = &self.face_colors {
            if colors.len() != self.triangles.len() {
                return false;
            }
        }

        for tri in &self.triangles {
            if tri[0] >= vertex_count || tri[1] >= vertex_count || tri[2] >= vertex_count {
                return false;
            }

            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }

            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            let area = (v1 - v0).cross(v2 - v0).length();
            if area < DEGENERATE_AREA_EPSILON {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle(z: f64) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(0.0, 0.0, z));
        mesh.add_vertex(DVec3::new(1.0, 0.0, z));
        mesh.add_vertex(DVec3::new(0.0, 1.0, z));
        mesh.add_triangle(0, 1, 2);
        mesh
    }

    fn tetrahedron() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_vertex(DVec3::Z);
        mesh.add_triangle(0, 2, 1);
        mesh.add_triangle(0, 1, 3);
        mesh.add_triangle(0, 3, 2);
        mesh.add_triangle(1, 2, 3);
        mesh
    }

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.face_colors().is_none());
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(-1.0, -2.0, -3.0));
        mesh.add_vertex(DVec3::new(4.0, 5.0, 6.0));
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_mesh_volume_of_outward_tetrahedron() {
        assert_relative_eq!(tetrahedron().volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_uniform_color_covers_all_faces() {
        let mut mesh = tetrahedron();
        mesh.set_uniform_color([1, 2, 3, 4]);
        assert_eq!(mesh.face_colors().map(<[Rgba]>::len), Some(4));
        assert!(mesh.validate());
    }

    #[test]
    fn test_mesh_merge_offsets_indices() {
        let mut mesh1 = triangle(0.0);
        let mesh2 = triangle(1.0);
        mesh1.merge(&mesh2);
        assert_eq!(mesh1.vertex_count(), 6);
        assert_eq!(mesh1.triangle_count(), 2);
        assert_eq!(mesh1.triangle(1), [3, 4, 5]);
    }

    #[test]
    fn test_mesh_merge_keeps_face_colors() {
        let mut red = triangle(0.0);
        red.set_uniform_color([255, 0, 0, 50]);
        let mut blue = triangle(1.0);
        blue.set_uniform_color([0, 0, 255, 50]);
        let plain = triangle(2.0);

        red.merge(&blue);
        red.merge(&plain);
        assert_eq!(
            red.face_colors(),
            Some(&[[255, 0, 0, 50], [0, 0, 255, 50], DEFAULT_FACE_COLOR][..])
        );

        let mut uncolored = triangle(0.0);
        uncolored.merge(&blue);
        assert_eq!(
            uncolored.face_colors(),
            Some(&[DEFAULT_FACE_COLOR, [0, 0, 255, 50]][..])
        );
    }

    #[test]
    fn test_mesh_validate_invalid_index() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_triangle(0, 1, 2);
        assert!(!mesh.validate());
    }
}
