//! # Configuration Constants
//!
//! Centralized constants for the scanner mesh pipeline.
//!
//! ## Categories
//!
//! - **Appearance**: Base crystal color and solid transparency
//! - **Precision**: Hull and validation tolerances
//! - **Tessellation**: Segment count for the reference cylinder

use std::fmt;

// =============================================================================
// APPEARANCE CONSTANTS
// =============================================================================

/// Base RGB color of a detector crystal.
///
/// Efficiency weighting scales this color channel-wise; unweighted solids use
/// it as is.
///
/// # Example
///
/// ```rust
/// use config::constants::CRYSTAL_COLOR;
/// assert_eq!(CRYSTAL_COLOR, [255, 40, 40]);
/// ```
pub const CRYSTAL_COLOR: [u8; 3] = [255, 40, 40];

/// Alpha channel applied to every synthesized solid.
pub const SOLID_ALPHA: u8 = 50;

/// Color of the optional field-of-view cylinder.
pub const FOV_COLOR: [u8; 4] = [200, 200, 200, SOLID_ALPHA];

/// Face color given to uncolored triangles when they are merged with colored
/// ones.
pub const DEFAULT_FACE_COLOR: [u8; 4] = [255, 255, 255, 255];

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Tolerance used by the convex hull to decide whether a point lies outside
/// a face plane, and to merge coincident input points.
///
/// Detector corners are produced by composing single-precision calibration
/// transforms, so exact coplanarity cannot be expected.
pub const HULL_TOLERANCE: f64 = 1e-7;

/// Twice-area below which a triangle counts as degenerate during mesh
/// validation.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-8;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Number of segments around the circumference of the reference cylinder.
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Smallest segment count that still forms a closed polygon.
pub const MIN_SEGMENTS: u32 = 3;

// =============================================================================
// ENGINE CONFIGURATION
// =============================================================================

/// Immutable snapshot of the settings the geometry engine consumes.
///
/// # Examples
/// ```
/// use config::constants::EngineConfig;
/// let config = EngineConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Base crystal RGB scaled by efficiency weighting.
    pub base_color: [u8; 3],
    /// Alpha channel written on every solid.
    pub alpha: u8,
    /// Hull tolerance propagated into the convex hull kernel.
    pub tolerance: f64,
    /// Segment count of the reference cylinder.
    pub cylinder_segments: u32,
}

impl EngineConfig {
    /// Builds a configuration, validating tolerance and segment count.
    ///
    /// # Examples
    /// ```
    /// use config::constants::EngineConfig;
    /// let cfg = EngineConfig::new([0, 255, 0], 128, 1.0e-6, 24).expect("valid config");
    /// assert_eq!(cfg.cylinder_segments, 24);
    /// ```
    pub fn new(
        base_color: [u8; 3],
        alpha: u8,
        tolerance: f64,
        cylinder_segments: u32,
    ) -> Result<Self, ConfigError> {
        if !(tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if cylinder_segments < MIN_SEGMENTS {
            return Err(ConfigError::InvalidSegments(cylinder_segments));
        }
        Ok(Self {
            base_color,
            alpha,
            tolerance,
            cylinder_segments,
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_color: CRYSTAL_COLOR,
            alpha: SOLID_ALPHA,
            tolerance: HULL_TOLERANCE,
            cylinder_segments: DEFAULT_SEGMENTS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the requested segment count is too small to form a polygon.
    InvalidSegments(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidSegments(value) => {
                write!(f, "cylinder_segments must be >= {MIN_SEGMENTS}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
