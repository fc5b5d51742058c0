//! # Transform Algebra
//!
//! Rigid-body transforms (rotation + translation) stored as 3×4 matrices,
//! composed through their 4×4 homogeneous form.
//!
//! ## Composition Order
//!
//! `compose(&[a, b, c])` yields `a · b · c`: `c` is applied to a point first
//! and `a` last. In the scanner hierarchy the module placement is outermost,
//! so element transforms are composed as `[module, element]`.

use glam::{DMat4, DVec3, DVec4};
use serde::{Deserialize, Serialize};

use crate::header::BoxShape;

/// A rotation followed by a translation, as the top three rows of a
/// homogeneous matrix.
///
/// The rotation block is assumed orthonormal; nothing here checks it.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use scanner_mesh::transform::RigidTransform;
///
/// let shift = RigidTransform::from_translation(DVec3::new(1.0, 0.0, 0.0));
/// assert_eq!(shift.apply(DVec3::ZERO), DVec3::X);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Row-major `[R | t]` matrix.
    pub matrix: [[f64; 4]; 3],
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RigidTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        matrix: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ],
    };

    /// Creates a pure translation.
    pub fn from_translation(offset: DVec3) -> Self {
        Self {
            matrix: [
                [1.0, 0.0, 0.0, offset.x],
                [0.0, 1.0, 0.0, offset.y],
                [0.0, 0.0, 1.0, offset.z],
            ],
        }
    }

    /// Creates a rotation of `angle` radians about the z axis, followed by a
    /// translation.
    pub fn from_rotation_z_translation(angle: f64, offset: DVec3) -> Self {
        Self::from_mat4(&(DMat4::from_translation(offset) * DMat4::from_rotation_z(angle)))
    }

    /// Promotes to the 4×4 homogeneous matrix with a `[0, 0, 0, 1]` last row.
    pub fn to_mat4(&self) -> DMat4 {
        let [r0, r1, r2] = self.matrix;
        // glam is column-major: build the rows, then transpose.
        DMat4::from_cols_array_2d(&[r0, r1, r2, [0.0, 0.0, 0.0, 1.0]]).transpose()
    }

    /// Demotes a homogeneous matrix by dropping its last row.
    pub fn from_mat4(matrix: &DMat4) -> Self {
        let rows = matrix.transpose().to_cols_array_2d();
        Self {
            matrix: [rows[0], rows[1], rows[2]],
        }
    }

    /// Returns the translation column.
    pub fn translation(&self) -> DVec3 {
        DVec3::new(self.matrix[0][3], self.matrix[1][3], self.matrix[2][3])
    }

    /// Applies the transform to a point through its homogeneous form.
    pub fn apply(&self, point: DVec3) -> DVec3 {
        (self.to_mat4() * point.extend(1.0)).truncate()
    }

    /// Applies the transform to every corner of a box; order is preserved.
    pub fn apply_to_box(&self, shape: &BoxShape) -> BoxShape {
        let matrix = self.to_mat4();
        BoxShape {
            corners: shape.corners.map(|c| apply_homogeneous(&matrix, c)),
        }
    }
}

#[inline]
fn apply_homogeneous(matrix: &DMat4, point: DVec3) -> DVec3 {
    let h: DVec4 = *matrix * point.extend(1.0);
    h.truncate()
}

/// Multiplies transforms in reverse list order.
///
/// The last transform in the list is applied to a point first. An empty list
/// yields the identity.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use scanner_mesh::transform::{compose, RigidTransform};
///
/// let module = RigidTransform::from_rotation_z_translation(std::f64::consts::FRAC_PI_2, DVec3::ZERO);
/// let element = RigidTransform::from_translation(DVec3::X);
///
/// // The element offset is rotated by the module placement.
/// let placed = compose(&[module, element]).apply(DVec3::ZERO);
/// assert!((placed - DVec3::Y).length() < 1e-12);
/// ```
pub fn compose(transforms: &[RigidTransform]) -> RigidTransform {
    let matrix = transforms
        .iter()
        .rev()
        .fold(DMat4::IDENTITY, |acc, t| t.to_mat4() * acc);
    RigidTransform::from_mat4(&matrix)
}

/// Applies a transform to a point.
pub fn apply(transform: &RigidTransform, point: DVec3) -> DVec3 {
    transform.apply(point)
}

/// Applies a transform to each corner of a box.
pub fn apply_to_box(transform: &RigidTransform, shape: &BoxShape) -> BoxShape {
    transform.apply_to_box(shape)
}

/// Applies a list of transforms to a point one at a time, innermost first.
///
/// Numerically equivalent to `compose(transforms).apply(point)` up to
/// floating-point error.
pub fn apply_sequence(transforms: &[RigidTransform], point: DVec3) -> DVec3 {
    transforms.iter().rev().fold(point, |p, t| t.apply(p))
}
