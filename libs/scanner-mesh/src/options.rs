//! Run options supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::error::{ScannerMeshError, ScannerMeshResult};

/// Reference cylinder marking the scanner's field of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fov {
    /// Cylinder radius.
    pub radius: f64,
    /// Cylinder height along z.
    pub height: f64,
}

impl Fov {
    /// Creates a field of view cylinder, rejecting non-positive dimensions.
    pub fn new(radius: f64, height: f64) -> ScannerMeshResult<Self> {
        let fov = Self { radius, height };
        fov.validate()?;
        Ok(fov)
    }

    /// Checks that both dimensions are positive.
    pub fn validate(&self) -> ScannerMeshResult<()> {
        if self.radius > 0.0 && self.height > 0.0 {
            Ok(())
        } else {
            Err(ScannerMeshError::InvalidFov {
                radius: self.radius,
                height: self.height,
            })
        }
    }
}

/// Selects what gets synthesized and how it is colored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// One convex hull per module instead of one box per element.
    pub modules_only: bool,
    /// Weight colors by the header's detection efficiencies.
    pub show_det_eff: bool,
    /// Random debug colors; overrides efficiency weighting.
    pub random_color: bool,
    /// Optional reference cylinder appended to the output.
    pub fov: Option<Fov>,
    /// Seed for random colors. `None` uses the thread RNG.
    pub color_seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fov_validation() {
        assert!(Fov::new(10.0, 5.0).is_ok());
        assert!(Fov::new(0.0, 5.0).is_err());
        assert!(Fov::new(10.0, -1.0).is_err());
        assert!(Fov::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_default_options_select_boxes_and_base_color() {
        let options = RenderOptions::default();
        assert!(!options.modules_only);
        assert!(!options.show_det_eff);
        assert!(!options.random_color);
        assert!(options.fov.is_none());
        assert!(options.color_seed.is_none());
    }
}
