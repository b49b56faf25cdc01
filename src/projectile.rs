use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::dynamics::state::State;
use crate::error::{require_finite, require_non_negative, require_positive, SimError};
use crate::physics::aerodynamics;
use crate::physics::params::PhysicalParameters;

// ---------------------------------------------------------------------------
// Projectile body
// ---------------------------------------------------------------------------

/// A spherical point projectile. Mass is checked at construction since the
/// equations of motion divide by it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectileSpec {
    mass: f64,   // kg, > 0
    radius: f64, // m,  >= 0
}

impl ProjectileSpec {
    pub fn new(mass: f64, radius: f64) -> Result<Self, SimError> {
        require_positive("mass", mass)?;
        require_non_negative("radius", radius)?;
        Ok(Self { mass, radius })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn cross_section_area(&self) -> f64 {
        aerodynamics::cross_section_area(self.radius)
    }

    pub fn drag_factor(&self, physics: &PhysicalParameters) -> f64 {
        aerodynamics::drag_factor(physics, self.radius, self.mass)
    }
}

// ---------------------------------------------------------------------------
// Launch conditions
// ---------------------------------------------------------------------------

/// Muzzle speed and elevation. The angle is not restricted to 0-90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchConditions {
    pub speed: f64,     // m/s
    pub angle_deg: f64, // degrees above horizontal
    #[serde(default)]
    pub height: f64, // m, launch height above ground
}

impl LaunchConditions {
    pub fn new(speed: f64, angle_deg: f64) -> Self {
        Self {
            speed,
            angle_deg,
            height: 0.0,
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        require_non_negative("initial_speed", self.speed)?;
        require_finite("launch_angle_deg", self.angle_deg)?;
        require_non_negative("height", self.height)?;
        Ok(())
    }

    pub fn initial_velocity(&self) -> Vector2<f64> {
        let theta = self.angle_deg.to_radians();
        Vector2::new(self.speed * theta.cos(), self.speed * theta.sin())
    }

    /// State at t = 0: launch point directly above the origin.
    pub fn initial_state(&self) -> State {
        State {
            pos: Vector2::new(0.0, self.height),
            vel: self.initial_velocity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_mass_is_rejected() {
        let err = ProjectileSpec::new(0.0, 0.1).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter { name: "mass", .. }));
        assert!(ProjectileSpec::new(-1.0, 0.1).is_err());
    }

    #[test]
    fn negative_radius_is_rejected() {
        let err = ProjectileSpec::new(1.0, -0.01).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter { name: "radius", .. }));
    }

    #[test]
    fn point_mass_has_no_drag() {
        let p = ProjectileSpec::new(1.0, 0.0).unwrap();
        assert_eq!(p.drag_factor(&PhysicalParameters::default()), 0.0);
    }

    #[test]
    fn velocity_split_at_45_degrees() {
        let v = LaunchConditions::new(50.0, 45.0).initial_velocity();
        assert!((v.x - v.y).abs() < 1e-9);
        assert!((v.norm() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn initial_state_starts_at_launch_height() {
        let s = LaunchConditions::new(10.0, 0.0).with_height(2.0).initial_state();
        assert_eq!(s.pos, Vector2::new(0.0, 2.0));
        assert!((s.vel.x - 10.0).abs() < 1e-12);
        assert!(s.vel.y.abs() < 1e-12);
    }

    #[test]
    fn launch_validation() {
        assert!(LaunchConditions::new(-1.0, 45.0).validate().is_err());
        assert!(LaunchConditions::new(1.0, f64::NAN).validate().is_err());
        assert!(LaunchConditions::new(1.0, 120.0).validate().is_ok());
        assert!(LaunchConditions::new(1.0, 45.0).with_height(-0.5).validate().is_err());
    }
}
