//! # Scanner Header Model
//!
//! Immutable value types for the part of a list-mode header this crate
//! consumes: the replicated geometry tree and the optional detection
//! efficiency table.
//!
//! ```text
//! ScannerGeometry
//! └── ReplicatedModule            (one module type, many placements)
//!     ├── transforms
//!     └── DetectorModule
//!         └── ReplicatedDetectingElement   (one crystal type, many placements)
//!             ├── transforms
//!             └── SolidVolume → BoxShape
//! ```

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::transform::RigidTransform;

/// A point in a local or world frame.
pub type Coordinate = DVec3;

// =============================================================================
// SHAPES
// =============================================================================

/// A hexahedron given by its 8 corners.
///
/// Corners 0-3 run around the bottom face and corners 4-7 sit above them in
/// the same order; [`crate::primitives::BOX_FACES`] depends on this layout.
///
/// ```text
///     7────────6
///    /|       /|
///   4────────5 |
///   | 3──────|─2
///   |/       |/
///   0────────1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    /// Corners in canonical order.
    pub corners: [Coordinate; 8],
}

impl BoxShape {
    /// Creates an axis-aligned box from its minimum and maximum corners.
    pub fn cuboid(min: DVec3, max: DVec3) -> Self {
        Self {
            corners: [
                DVec3::new(min.x, min.y, min.z),
                DVec3::new(max.x, min.y, min.z),
                DVec3::new(max.x, max.y, min.z),
                DVec3::new(min.x, max.y, min.z),
                DVec3::new(min.x, min.y, max.z),
                DVec3::new(max.x, min.y, max.z),
                DVec3::new(max.x, max.y, max.z),
                DVec3::new(min.x, max.y, max.z),
            ],
        }
    }

    /// Creates an axis-aligned box of the given size centered on the origin.
    pub fn centered(size: DVec3) -> Self {
        let half = size / 2.0;
        Self::cuboid(-half, half)
    }

    /// Returns the mean of the corners.
    pub fn center(&self) -> DVec3 {
        self.corners.iter().copied().sum::<DVec3>() / 8.0
    }
}

/// The volume of one crystal type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidVolume {
    /// Template shape in the crystal's local frame.
    pub shape: BoxShape,
    /// Material identifier; carried through, not interpreted.
    #[serde(default)]
    pub material_id: u32,
}

// =============================================================================
// REPLICATION TREE
// =============================================================================

/// One crystal type placed many times inside a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicatedDetectingElement {
    /// The crystal template.
    pub object: SolidVolume,
    /// Placements in the module frame.
    pub transforms: Vec<RigidTransform>,
}

/// A module template: one or more crystal groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorModule {
    /// Crystal groups, enumerated in order during traversal.
    pub detecting_elements: Vec<ReplicatedDetectingElement>,
}

/// One module type placed many times in the scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicatedModule {
    /// The module template.
    pub object: DetectorModule,
    /// Placements in the scanner frame.
    pub transforms: Vec<RigidTransform>,
}

impl ReplicatedModule {
    /// Number of crystal instances in one placement of this module, summed
    /// over all of its crystal groups.
    pub fn elements_per_module(&self) -> usize {
        self.object
            .detecting_elements
            .iter()
            .map(|group| group.transforms.len())
            .sum()
    }

    /// Number of crystal instances across every placement of this module.
    pub fn element_instances(&self) -> usize {
        self.transforms.len() * self.elements_per_module()
    }
}

/// The full replicated geometry of a scanner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannerGeometry {
    /// Module types, enumerated in order during traversal.
    pub replicated_modules: Vec<ReplicatedModule>,
}

impl ScannerGeometry {
    /// Total number of module placements across all module types.
    pub fn module_instances(&self) -> usize {
        self.replicated_modules.iter().map(|m| m.transforms.len()).sum()
    }

    /// Total number of crystal instances across the scanner.
    pub fn element_instances(&self) -> usize {
        self.replicated_modules
            .iter()
            .map(ReplicatedModule::element_instances)
            .sum()
    }
}

// =============================================================================
// CALIBRATION
// =============================================================================

/// Per-element detection efficiencies: one row per crystal instance, one
/// column per energy bin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyTable {
    /// `rows[instance][energy_bin]`
    pub rows: Vec<Vec<f64>>,
}

impl EfficiencyTable {
    /// Number of crystal instances covered by the table.
    pub fn instance_count(&self) -> usize {
        self.rows.len()
    }
}

/// Calibration block of the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionEfficiencies {
    /// Optional per-element efficiency table.
    #[serde(default)]
    pub det_el_efficiencies: Option<EfficiencyTable>,
}

// =============================================================================
// HEADER
// =============================================================================

/// Scanner description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannerInformation {
    /// Free-form model name.
    #[serde(default)]
    pub model_name: String,
    /// Replicated geometry tree.
    pub scanner_geometry: ScannerGeometry,
    /// Optional calibration data.
    #[serde(default)]
    pub detection_efficiencies: DetectionEfficiencies,
}

/// The header yielded by a list-mode reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannerHeader {
    /// Scanner description.
    pub scanner: ScannerInformation,
}

impl ScannerHeader {
    /// Returns the efficiency table if the header carries one.
    pub fn efficiency_table(&self) -> Option<&EfficiencyTable> {
        self.scanner
            .detection_efficiencies
            .det_el_efficiencies
            .as_ref()
    }

    /// Returns the replicated geometry tree.
    pub fn geometry(&self) -> &ScannerGeometry {
        &self.scanner.scanner_geometry
    }
}
