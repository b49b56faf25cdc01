use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_non_negative, SimError};

// ---------------------------------------------------------------------------
// Default physical constants
// ---------------------------------------------------------------------------

pub const GRAVITY: f64 = 9.81; // m/s^2
pub const AIR_DENSITY: f64 = 1.225; // kg/m^3, sea level
pub const DRAG_COEFFICIENT: f64 = 0.47; // sphere

// ---------------------------------------------------------------------------
// Environment parameters
// ---------------------------------------------------------------------------

/// Environment constants held fixed for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalParameters {
    pub gravity: f64,          // m/s^2, positive = downward pull
    pub air_density: f64,      // kg/m^3
    pub drag_coefficient: f64, // dimensionless
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            air_density: AIR_DENSITY,
            drag_coefficient: DRAG_COEFFICIENT,
        }
    }
}

impl PhysicalParameters {
    /// Same environment with aerodynamic drag switched off.
    pub fn vacuum(gravity: f64) -> Self {
        Self {
            gravity,
            drag_coefficient: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        require_finite("gravity", self.gravity)?;
        require_non_negative("air_density", self.air_density)?;
        require_non_negative("drag_coefficient", self.drag_coefficient)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sea_level_sphere() {
        let p = PhysicalParameters::default();
        assert_eq!(p.gravity, 9.81);
        assert_eq!(p.air_density, 1.225);
        assert_eq!(p.drag_coefficient, 0.47);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn vacuum_has_no_drag() {
        let p = PhysicalParameters::vacuum(10.0);
        assert_eq!(p.drag_coefficient, 0.0);
        assert_eq!(p.gravity, 10.0);
    }

    #[test]
    fn negative_density_rejected() {
        let p = PhysicalParameters {
            air_density: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(SimError::InvalidParameter { name: "air_density", .. })
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let p: PhysicalParameters = serde_json::from_str(r#"{ "gravity": 1.62 }"#).unwrap();
        assert_eq!(p.gravity, 1.62);
        assert_eq!(p.air_density, AIR_DENSITY);
        assert_eq!(p.drag_coefficient, DRAG_COEFFICIENT);
    }
}
