use std::f64::consts::PI;

use nalgebra::Vector2;

use crate::physics::params::PhysicalParameters;

/// Frontal area of a sphere of the given radius, m^2.
pub fn cross_section_area(radius: f64) -> f64 {
    PI * radius * radius
}

/// Drag factor k = 0.5 * rho * Cd * A / m, in 1/m.
///
/// Multiplying by speed * v gives the drag deceleration, so the whole
/// aerodynamic model collapses to this one coefficient per projectile.
pub fn drag_factor(physics: &PhysicalParameters, radius: f64, mass: f64) -> f64 {
    0.5 * physics.air_density * physics.drag_coefficient * cross_section_area(radius) / mass
}

/// Quadratic drag acceleration, opposing velocity with magnitude k * |v|^2.
pub fn drag_accel(vel: &Vector2<f64>, drag_factor: f64) -> Vector2<f64> {
    -vel * (drag_factor * vel.norm())
}
