use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_positive, SimError};
use crate::physics::params::PhysicalParameters;
use crate::sim::integrator::Method;

/// Upper bound on integration steps per run. The step count is the only
/// cost driver, so this caps the work a single configuration can request.
pub const MAX_STEPS: usize = 10_000_000;

// ---------------------------------------------------------------------------
// Ground impact handling
// ---------------------------------------------------------------------------

/// What to do with the first sample whose height is negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactPolicy {
    /// Keep the sample, forcing its height to 0. The true impact lies
    /// somewhere inside the last step; this is an accepted approximation.
    #[default]
    Clamp,
    /// Replace the sample by the linear interpolation of the last two
    /// samples at the zero crossing (height exactly 0).
    Interpolate,
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub step: f64,     // integration timestep, s
    pub max_time: f64, // hard stop, s
    pub method: Method,
    pub impact: ImpactPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step: 0.01,     // 100 Hz
            max_time: 10.0, // 1000 steps
            method: Method::Rk4,
            impact: ImpactPolicy::Clamp,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        require_positive("step", self.step)?;
        require_non_negative("max_time", self.max_time)?;
        if self.max_time / self.step > MAX_STEPS as f64 {
            return Err(SimError::invalid(
                "max_time",
                format!(
                    "{} s at step {} s exceeds {MAX_STEPS} steps",
                    self.max_time, self.step
                ),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Scenario file
// ---------------------------------------------------------------------------

/// Environment and integration settings loaded from a JSON file.
///
/// ```json
/// {
///   "physics": { "gravity": 9.81, "air_density": 1.225, "drag_coefficient": 0.47 },
///   "sim": { "step": 0.01, "max_time": 10.0, "method": "rk4", "impact": "clamp" }
/// }
/// ```
///
/// Every field is optional and falls back to its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub physics: PhysicalParameters,
    pub sim: SimConfig,
}

impl ScenarioConfig {
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        let config: ScenarioConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        self.physics.validate()?;
        self.sim.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_runs_up_to_1000_steps() {
        let c = SimConfig::default();
        assert_eq!(c.step, 0.01);
        assert_eq!(c.max_time, 10.0);
        assert_eq!((c.max_time / c.step).round() as usize, 1000);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_step_rejected() {
        let c = SimConfig {
            step: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            c.validate(),
            Err(SimError::InvalidParameter { name: "step", .. })
        ));
    }

    #[test]
    fn excessive_step_count_rejected() {
        let c = SimConfig {
            step: 1e-9,
            max_time: 100.0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn empty_scenario_is_all_defaults() {
        let s = ScenarioConfig::from_json("{}").unwrap();
        assert_eq!(s, ScenarioConfig::default());
    }

    #[test]
    fn scenario_overrides_selected_fields() {
        let s = ScenarioConfig::from_json(
            r#"{ "physics": { "drag_coefficient": 0.0 },
                 "sim": { "method": "euler", "impact": "interpolate", "max_time": 20.0 } }"#,
        )
        .unwrap();
        assert_eq!(s.physics.drag_coefficient, 0.0);
        assert_eq!(s.physics.gravity, 9.81);
        assert_eq!(s.sim.method, Method::Euler);
        assert_eq!(s.sim.impact, ImpactPolicy::Interpolate);
        assert_eq!(s.sim.max_time, 20.0);
        assert_eq!(s.sim.step, 0.01);
    }

    #[test]
    fn invalid_scenario_rejected_on_load() {
        let err = ScenarioConfig::from_json(r#"{ "sim": { "step": -0.01 } }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter { name: "step", .. }));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = ScenarioConfig::from_json("{ physics: ").unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }
}
