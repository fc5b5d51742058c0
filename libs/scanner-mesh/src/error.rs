//! # Scanner Mesh Errors
//!
//! Error types for scanner mesh synthesis.
//!
//! ## Error Policy
//!
//! - Configuration problems are detected before the first solid is built
//! - Geometric oddities (degenerate hulls, out-of-range efficiencies) are
//!   logged, never raised
//! - Collaborator failures (reader, writer) are carried as messages

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while turning a scanner description into solids.
///
/// ## Example
///
/// ```rust
/// use scanner_mesh::ScannerMeshError;
///
/// let err = ScannerMeshError::MissingEfficiencyTable;
/// assert!(err.is_configuration_error());
/// assert!(err.to_string().contains("det_el_efficiencies"));
/// ```
#[derive(Debug, Error)]
pub enum ScannerMeshError {
    /// Efficiency coloring was requested but the header has no table.
    #[error(
        "The scanner detection efficiencies (det_el_efficiencies) are not defined. \
         Correct this or remove the detector efficiency flag."
    )]
    MissingEfficiencyTable,

    /// Module types expose different element counts per module, so the flat
    /// efficiency table cannot be mapped onto elements.
    #[error(
        "Module type {module_type} has {found} detecting elements per module, \
         expected {expected}; efficiency coloring requires a uniform count"
    )]
    NonUniformModules {
        /// Index of the offending replicated module type
        module_type: usize,
        /// Element count of the first module type
        expected: usize,
        /// Element count of the offending module type
        found: usize,
    },

    /// The efficiency table does not have one row per element instance.
    #[error("Efficiency table has {rows} rows but the scanner has {instances} detecting element instances")]
    EfficiencyShapeMismatch {
        /// Rows present in the table
        rows: usize,
        /// Element instances enumerated by the geometry
        instances: usize,
    },

    /// An efficiency row has no energy bins to average.
    #[error("Efficiency table row {instance} has no energy bins")]
    EmptyEfficiencyRow {
        /// Element instance index of the empty row
        instance: usize,
    },

    /// The reference cylinder dimensions are not positive.
    #[error("Invalid field of view cylinder: radius={radius}, height={height}")]
    InvalidFov {
        /// Requested radius
        radius: f64,
        /// Requested height
        height: f64,
    },

    /// The scanner description reader failed.
    #[error("Source error: {0}")]
    Source(String),

    /// The mesh writer failed.
    #[error("Sink error: {0}")]
    Sink(String),
}

impl ScannerMeshError {
    /// Creates a source error.
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }

    /// Creates a sink error.
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink(message.into())
    }

    /// Returns true for errors raised by the pre-traversal configuration
    /// checks, as opposed to collaborator I/O failures.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingEfficiencyTable
                | Self::NonUniformModules { .. }
                | Self::EfficiencyShapeMismatch { .. }
                | Self::EmptyEfficiencyRow { .. }
                | Self::InvalidFov { .. }
        )
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for scanner mesh operations.
pub type ScannerMeshResult<T> = Result<T, ScannerMeshError>;

// =============================================================================
// TESTS
// =============================================================================
