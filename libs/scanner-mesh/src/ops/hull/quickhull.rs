//! # QuickHull Algorithm
//!
//! 3D convex hull computation using the QuickHull algorithm.
//! Based on the original algorithm by Barber, Dobkin, and Huhdanpaa.
//!
//! ## Algorithm Steps
//!
//! 1. Find 6 extreme points (min/max on each axis)
//! 2. Build initial tetrahedron from 4 non-coplanar points
//! 3. Assign remaining points to faces they're outside of
//! 4. For each face with outside points:
//!    a. Find farthest point
//!    b. Find horizon edges (boundary of visible faces)
//!    c. Create new faces from horizon to farthest point
//!    d. Reassign outside points to the updated faces
//! 5. Repeat until no faces have outside points
//! 6. Drop vertices that lie on an edge or inside a flat region of the hull
//!    (fewer than 3 distinct incident face planes) and rebuild from the rest
//!
//! Step 6 matters for crystal grids: corners shared by neighbouring crystals
//! sit exactly on the module's outer faces and can otherwise end up as
//! vertices of a coplanar triangulation.

use glam::DVec3;
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;

use crate::mesh::Mesh;

/// Why a point set has no solid hull.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DegenerateHull {
    /// Fewer than 4 distinct points.
    #[error("{0} distinct points, at least 4 are required")]
    TooFewPoints(usize),
    /// All points lie on one line.
    #[error("all points are collinear")]
    Collinear,
    /// All points lie in one plane.
    #[error("all points are coplanar")]
    Coplanar,
}

/// Computes the convex hull of a set of 3D points.
///
/// # Arguments
///
/// * `points` - Points to compute hull of (at least 4 non-coplanar)
/// * `tolerance` - Plane distance below which a point is not outside a face
///
/// # Returns
///
/// A mesh representing the convex hull, wound counter-clockwise when seen
/// from outside.
pub fn convex_hull(points: &[DVec3], tolerance: f64) -> Result<Mesh, DegenerateHull> {
    let unique_points = remove_duplicates(points, tolerance);
    if unique_points.len() < 4 {
        return Err(DegenerateHull::TooFewPoints(unique_points.len()));
    }

    let faces = build_initial_simplex(&unique_points, tolerance)?;
    let faces = quickhull_iterate(faces, &unique_points, tolerance);

    let (extreme, flat) = split_extreme_vertices(&faces);
    if flat == 0 {
        return Ok(faces_to_mesh(&faces, &unique_points));
    }

    let extreme_points: Vec<DVec3> = extreme.iter().map(|&i| unique_points[i]).collect();
    let faces = build_initial_simplex(&extreme_points, tolerance)?;
    let faces = quickhull_iterate(faces, &extreme_points, tolerance);
    Ok(faces_to_mesh(&faces, &extreme_points))
}

/// A face of the convex hull (triangle).
#[derive(Debug, Clone)]
struct HullFace {
    /// Indices of the three vertices
    vertices: [usize; 3],
    /// Outward-pointing unit normal
    normal: DVec3,
    /// Distance from origin along normal
    distance: f64,
    /// Points outside this face (indices into points array)
    outside_points: Vec<usize>,
}

impl HullFace {
    fn new(v0: usize, v1: usize, v2: usize, points: &[DVec3]) -> Self {
        let p0 = points[v0];
        let normal = (points[v1] - p0).cross(points[v2] - p0).normalize_or_zero();

        Self {
            vertices: [v0, v1, v2],
            normal,
            distance: normal.dot(p0),
            outside_points: Vec::new(),
        }
    }

    fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    fn is_outside(&self, point: DVec3, tolerance: f64) -> bool {
        self.signed_distance(point) > tolerance
    }

    fn farthest_point(&self, points: &[DVec3]) -> Option<usize> {
        self.outside_points
            .iter()
            .max_by(|&&a, &&b| {
                let da = self.signed_distance(points[a]);
                let db = self.signed_distance(points[b]);
                da.total_cmp(&db)
            })
            .copied()
    }
}

/// Removes points closer than `tolerance` to an earlier point.
fn remove_duplicates(points: &[DVec3], tolerance: f64) -> Vec<DVec3> {
    let mut unique: Vec<DVec3> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|u| u.distance(*p) < tolerance) {
            unique.push(*p);
        }
    }
    unique
}

/// Builds the initial tetrahedron from extreme points and distributes the
/// remaining points over its faces.
fn build_initial_simplex(points: &[DVec3], tolerance: f64) -> Result<Vec<HullFace>, DegenerateHull> {
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        if p.x < points[extremes[0]].x { extremes[0] = i; }
        if p.x > points[extremes[1]].x { extremes[1] = i; }
        if p.y < points[extremes[2]].y { extremes[2] = i; }
        if p.y > points[extremes[3]].y { extremes[3] = i; }
        if p.z < points[extremes[4]].z { extremes[4] = i; }
        if p.z > points[extremes[5]].z { extremes[5] = i; }
    }

    let (p0, p1) = find_farthest_pair(&extremes, points);
    let p2 = find_farthest_from_line(p0, p1, points, tolerance)?;
    let p3 = find_farthest_from_plane(p0, p1, p2, points, tolerance)?;

    let centroid = (points[p0] + points[p1] + points[p2] + points[p3]) / 4.0;
    let mut faces = vec![
        create_face_outward(p0, p1, p2, centroid, points),
        create_face_outward(p0, p2, p3, centroid, points),
        create_face_outward(p0, p3, p1, centroid, points),
        create_face_outward(p1, p3, p2, centroid, points),
    ];

    let used: HashSet<usize> = [p0, p1, p2, p3].into_iter().collect();
    let remaining = (0..points.len()).filter(|i| !used.contains(i));
    assign_outside(&mut faces, remaining, points, tolerance);

    Ok(faces)
}

fn find_farthest_pair(indices: &[usize], points: &[DVec3]) -> (usize, usize) {
    let mut max_dist = -1.0;
    let mut best = (indices[0], indices[1]);

    for (i, &a) in indices.iter().enumerate() {
        for &b in indices.iter().skip(i + 1) {
            let dist = points[a].distance_squared(points[b]);
            if dist > max_dist {
                max_dist = dist;
                best = (a, b);
            }
        }
    }
    best
}

fn find_farthest_from_line(
    p0: usize,
    p1: usize,
    points: &[DVec3],
    tolerance: f64,
) -> Result<usize, DegenerateHull> {
    let line_dir = (points[p1] - points[p0]).normalize_or_zero();
    let mut max_dist = tolerance;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 {
            continue;
        }
        let v = *p - points[p0];
        let dist = (v - v.dot(line_dir) * line_dir).length();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or(DegenerateHull::Collinear)
}

fn find_farthest_from_plane(
    p0: usize,
    p1: usize,
    p2: usize,
    points: &[DVec3],
    tolerance: f64,
) -> Result<usize, DegenerateHull> {
    let normal = (points[p1] - points[p0])
        .cross(points[p2] - points[p0])
        .normalize_or_zero();

    let mut max_dist = tolerance;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 || i == p2 {
            continue;
        }
        let dist = normal.dot(*p - points[p0]).abs();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or(DegenerateHull::Coplanar)
}

/// Creates a face whose normal points away from `centroid`.
fn create_face_outward(v0: usize, v1: usize, v2: usize, centroid: DVec3, points: &[DVec3]) -> HullFace {
    let face = HullFace::new(v0, v1, v2, points);
    let face_center = (points[v0] + points[v1] + points[v2]) / 3.0;

    if face.normal.dot(centroid - face_center) > 0.0 {
        HullFace::new(v0, v2, v1, points)
    } else {
        face
    }
}

/// Puts each point in the outside set of the first face it is outside of.
fn assign_outside(
    faces: &mut [HullFace],
    candidates: impl IntoIterator<Item = usize>,
    points: &[DVec3],
    tolerance: f64,
) {
    for idx in candidates {
        let point = points[idx];
        if let Some(face) = faces.iter_mut().find(|f| f.is_outside(point, tolerance)) {
            face.outside_points.push(idx);
        }
    }
}

fn quickhull_iterate(mut faces: Vec<HullFace>, points: &[DVec3], tolerance: f64) -> Vec<HullFace> {
    while let Some(face_idx) = faces.iter().position(|f| !f.outside_points.is_empty()) {
        let Some(farthest) = faces[face_idx].farthest_point(points) else {
            break;
        };
        let apex = points[farthest];

        let visible: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_outside(apex, tolerance))
            .map(|(i, _)| i)
            .collect();

        let horizon = find_horizon_edges(&faces, &visible);

        let mut reassign: Vec<usize> = visible
            .iter()
            .flat_map(|&idx| faces[idx].outside_points.iter().copied())
            .collect();
        reassign.retain(|&p| p != farthest);

        // Remove visible faces, highest index first so swap_remove stays valid.
        let mut visible_sorted = visible;
        visible_sorted.sort_unstable_by(|a, b| b.cmp(a));
        for idx in visible_sorted {
            faces.swap_remove(idx);
        }

        // Horizon edges keep the winding of the removed faces, so the new
        // faces are outward without a centroid test.
        let first_new = faces.len();
        for (e0, e1) in horizon {
            faces.push(HullFace::new(e0, e1, farthest, points));
        }

        // New faces first: most reassigned points lie beyond them.
        let (old, new) = faces.split_at_mut(first_new);
        let mut leftover = Vec::new();
        for idx in reassign {
            let point = points[idx];
            if let Some(face) = new.iter_mut().find(|f| f.is_outside(point, tolerance)) {
                face.outside_points.push(idx);
            } else {
                leftover.push(idx);
            }
        }
        assign_outside(old, leftover, points, tolerance);
    }

    faces
}

/// Edges of the visible region that border a non-visible face, in the
/// winding of the visible face they belong to.
fn find_horizon_edges(faces: &[HullFace], visible: &[usize]) -> Vec<(usize, usize)> {
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();

    for &idx in visible {
        let v = faces[idx].vertices;
        for (a, b) in [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])] {
            *edge_count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }

    let mut horizon = Vec::new();
    for &idx in visible {
        let v = faces[idx].vertices;
        for (a, b) in [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])] {
            if edge_count[&(a.min(b), a.max(b))] == 1 {
                horizon.push((a, b));
            }
        }
    }

    horizon
}

/// Splits hull vertices into true corners (at least 3 distinct incident
/// face planes) and the number of vertices that are not.
fn split_extreme_vertices(faces: &[HullFace]) -> (Vec<usize>, usize) {
    let mut incident: HashMap<usize, Vec<DVec3>> = HashMap::new();
    for face in faces {
        for v in face.vertices {
            let normals = incident.entry(v).or_default();
            if !normals.iter().any(|n| n.dot(face.normal) > 1.0 - PLANE_MATCH) {
                normals.push(face.normal);
            }
        }
    }

    let mut extreme: Vec<usize> = incident
        .iter()
        .filter(|(_, normals)| normals.len() >= 3)
        .map(|(&v, _)| v)
        .collect();
    extreme.sort_unstable();
    let flat = incident.len() - extreme.len();
    (extreme, flat)
}

/// Two unit normals whose dot product is within this of 1 describe the same
/// plane orientation.
const PLANE_MATCH: f64 = 1e-9;

fn faces_to_mesh(faces: &[HullFace], points: &[DVec3]) -> Mesh {
    let used: BTreeSet<usize> = faces.iter().flat_map(|f| f.vertices).collect();

    let mut mesh = Mesh::with_capacity(used.len(), faces.len());
    let vertex_map: HashMap<usize, u32> = used
        .iter()
        .map(|&v| (v, mesh.add_vertex(points[v])))
        .collect();

    for face in faces {
        let [v0, v1, v2] = face.vertices.map(|v| vertex_map[&v]);
        mesh.add_triangle(v0, v1, v2);
    }

    mesh
}
