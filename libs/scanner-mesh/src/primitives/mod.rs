//! # Primitives
//!
//! Mesh generation for detector boxes and the reference cylinder.

pub mod box_solid;
pub mod cylinder;

pub use box_solid::{box_from_corners, BOX_FACES};
pub use cylinder::create_cylinder;
