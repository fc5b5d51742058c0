//! # Mesh Operations
//!
//! Convex hull of a point cloud and plain concatenation of solids.

pub mod concat;
pub mod hull;

pub use concat::concatenate;
pub use hull::hull_from_points;
