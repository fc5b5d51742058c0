//! # Efficiency Extractor
//!
//! Reduces the per-element, per-energy-bin calibration table to one weight
//! per element instance, or reports that no weighting applies.

use std::ops::Range;

use crate::error::{ScannerMeshError, ScannerMeshResult};
use crate::header::{EfficiencyTable, ScannerGeometry};

/// Per-element weights used by efficiency coloring.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementWeights {
    /// No weighting: solids keep the base crystal color.
    Neutral,
    /// One mean efficiency per element instance, in traversal order.
    PerElement(Vec<f64>),
}

impl ElementWeights {
    /// Returns true when no weighting applies.
    pub fn is_neutral(&self) -> bool {
        matches!(self, Self::Neutral)
    }

    /// Weight of one element instance.
    pub fn element(&self, index: usize) -> Option<f64> {
        match self {
            Self::Neutral => None,
            Self::PerElement(weights) => weights.get(index).copied(),
        }
    }

    /// Mean weight over a contiguous run of element instances.
    pub fn mean(&self, range: Range<usize>) -> Option<f64> {
        match self {
            Self::Neutral => None,
            Self::PerElement(weights) => {
                let slice = weights.get(range)?;
                if slice.is_empty() {
                    return None;
                }
                Some(slice.iter().sum::<f64>() / slice.len() as f64)
            }
        }
    }
}

/// Derives element weights from the optional table.
///
/// | `show_det_eff` | table   | result                          |
/// |----------------|---------|---------------------------------|
/// | true           | present | mean over energy bins, per row  |
/// | true           | absent  | [`ScannerMeshError::MissingEfficiencyTable`] |
/// | false          | any     | [`ElementWeights::Neutral`]     |
///
/// # Example
///
/// ```rust
/// use scanner_mesh::efficiency::{extract_detector_efficiencies, ElementWeights};
/// use scanner_mesh::header::EfficiencyTable;
///
/// let table = EfficiencyTable { rows: vec![vec![0.5, 1.0], vec![0.25, 0.25]] };
/// let weights = extract_detector_efficiencies(Some(&table), true).unwrap();
/// assert_eq!(weights, ElementWeights::PerElement(vec![0.75, 0.25]));
///
/// assert!(extract_detector_efficiencies(None, true).is_err());
/// assert!(extract_detector_efficiencies(Some(&table), false).unwrap().is_neutral());
/// ```
pub fn extract_detector_efficiencies(
    table: Option<&EfficiencyTable>,
    show_det_eff: bool,
) -> ScannerMeshResult<ElementWeights> {
    if !show_det_eff {
        if table.is_some() {
            log::debug!("efficiency table present but efficiency coloring is off");
        }
        return Ok(ElementWeights::Neutral);
    }

    let table = table.ok_or(ScannerMeshError::MissingEfficiencyTable)?;

    let weights = table
        .rows
        .iter()
        .enumerate()
        .map(|(instance, bins)| {
            if bins.is_empty() {
                return Err(ScannerMeshError::EmptyEfficiencyRow { instance });
            }
            Ok(bins.iter().sum::<f64>() / bins.len() as f64)
        })
        .collect::<ScannerMeshResult<Vec<f64>>>()?;

    let out_of_range = weights.iter().filter(|w| !(0.0..=1.0).contains(*w)).count();
    if out_of_range > 0 {
        log::warn!(
            "{out_of_range} element efficiencies fall outside [0, 1]; their colors will wrap"
        );
    }

    Ok(ElementWeights::PerElement(weights))
}

/// Checks that per-element weights can be mapped onto the geometry.
///
/// The flat table is indexed as `module * elements_per_module + element`,
/// which only holds when every module type has the same element count.
/// Neutral weights always pass.
pub fn check_weights_match_geometry(
    weights: &ElementWeights,
    geometry: &ScannerGeometry,
) -> ScannerMeshResult<()> {
    let ElementWeights::PerElement(values) = weights else {
        return Ok(());
    };

    let mut populated = geometry
        .replicated_modules
        .iter()
        .enumerate()
        .filter(|(_, module)| !module.transforms.is_empty());
    if let Some((_, first)) = populated.next() {
        let expected = first.elements_per_module();
        for (module_type, module) in populated {
            let found = module.elements_per_module();
            if found != expected {
                return Err(ScannerMeshError::NonUniformModules {
                    module_type,
                    expected,
                    found,
                });
            }
        }
    }

    let instances = geometry.element_instances();
    if values.len() != instances {
        return Err(ScannerMeshError::EfficiencyShapeMismatch {
            rows: values.len(),
            instances,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{
        BoxShape, DetectorModule, ReplicatedDetectingElement, ReplicatedModule, SolidVolume,
    };
    use crate::transform::RigidTransform;
    use approx::assert_relative_eq;
    use glam::DVec3;

    fn module(elements: usize, placements: usize) -> ReplicatedModule {
        ReplicatedModule {
            object: DetectorModule {
                detecting_elements: vec![ReplicatedDetectingElement {
                    object: SolidVolume {
                        shape: BoxShape::centered(DVec3::ONE),
                        material_id: 0,
                    },
                    transforms: vec![RigidTransform::IDENTITY; elements],
                }],
            },
            transforms: vec![RigidTransform::IDENTITY; placements],
        }
    }

    #[test]
    fn test_mean_over_energy_bins() {
        let table = EfficiencyTable {
            rows: vec![vec![0.2, 0.4, 0.6], vec![1.0]],
        };
        let weights = extract_detector_efficiencies(Some(&table), true).unwrap();
        assert_relative_eq!(weights.element(0).unwrap(), 0.4, epsilon = 1e-12);
        assert_eq!(weights.element(1), Some(1.0));
        assert_eq!(weights.element(2), None);
    }

    #[test]
    fn test_missing_table_is_configuration_error() {
        let err = extract_detector_efficiencies(None, true).unwrap_err();
        assert!(matches!(err, ScannerMeshError::MissingEfficiencyTable));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_flag_off_is_neutral_with_or_without_table() {
        let table = EfficiencyTable {
            rows: vec![vec![0.5]],
        };
        assert_eq!(
            extract_detector_efficiencies(Some(&table), false).unwrap(),
            ElementWeights::Neutral
        );
        assert_eq!(
            extract_detector_efficiencies(None, false).unwrap(),
            ElementWeights::Neutral
        );
    }

    #[test]
    fn test_empty_row_is_rejected() {
        let table = EfficiencyTable {
            rows: vec![vec![0.5], vec![]],
        };
        assert!(matches!(
            extract_detector_efficiencies(Some(&table), true),
            Err(ScannerMeshError::EmptyEfficiencyRow { instance: 1 })
        ));
    }

    #[test]
    fn test_out_of_range_values_are_kept() {
        let table = EfficiencyTable {
            rows: vec![vec![1.5], vec![-0.5]],
        };
        let weights = extract_detector_efficiencies(Some(&table), true).unwrap();
        assert_eq!(weights, ElementWeights::PerElement(vec![1.5, -0.5]));
    }

    #[test]
    fn test_module_mean() {
        let weights = ElementWeights::PerElement(vec![1.0, 0.0, 0.5, 0.5]);
        assert_eq!(weights.mean(0..2), Some(0.5));
        assert_eq!(weights.mean(2..4), Some(0.5));
        assert_eq!(weights.mean(3..3), None);
        assert_eq!(weights.mean(2..9), None);
        assert_eq!(ElementWeights::Neutral.mean(0..1), None);
    }

    #[test]
    fn test_geometry_check_accepts_matching_table() {
        let geometry = ScannerGeometry {
            replicated_modules: vec![module(4, 2), module(4, 3)],
        };
        let weights = ElementWeights::PerElement(vec![1.0; 20]);
        assert!(check_weights_match_geometry(&weights, &geometry).is_ok());
        assert!(check_weights_match_geometry(&ElementWeights::Neutral, &geometry).is_ok());
    }

    #[test]
    fn test_geometry_check_rejects_non_uniform_modules() {
        let geometry = ScannerGeometry {
            replicated_modules: vec![module(4, 2), module(3, 2)],
        };
        let weights = ElementWeights::PerElement(vec![1.0; 14]);
        assert!(matches!(
            check_weights_match_geometry(&weights, &geometry),
            Err(ScannerMeshError::NonUniformModules {
                module_type: 1,
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_geometry_check_rejects_row_count_mismatch() {
        let geometry = ScannerGeometry {
            replicated_modules: vec![module(4, 2)],
        };
        let weights = ElementWeights::PerElement(vec![1.0; 7]);
        assert!(matches!(
            check_weights_match_geometry(&weights, &geometry),
            Err(ScannerMeshError::EfficiencyShapeMismatch {
                rows: 7,
                instances: 8
            })
        ));
    }
}
