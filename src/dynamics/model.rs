use nalgebra::Vector2;

use crate::dynamics::state::{Deriv, State};
use crate::physics::aerodynamics::drag_accel;
use crate::physics::params::PhysicalParameters;
use crate::projectile::ProjectileSpec;

// ---------------------------------------------------------------------------
// Derivative capability
// ---------------------------------------------------------------------------

/// Right-hand side of the ODE `ds/dt = f(t, s)`.
///
/// Implement this to drive the integrators with a custom force model.
/// Closures of the form `Fn(f64, &State) -> Deriv` implement it too.
pub trait Derivative {
    fn derivative(&self, t: f64, state: &State) -> Deriv;
}

impl<F> Derivative for F
where
    F: Fn(f64, &State) -> Deriv,
{
    fn derivative(&self, t: f64, state: &State) -> Deriv {
        self(t, state)
    }
}

// ---------------------------------------------------------------------------
// Equations of motion (2D point mass, quadratic drag)
// ---------------------------------------------------------------------------

/// Ballistic model bound to one projectile in one environment.
///
/// Forces modeled:
///   1. Gravity - uniform, along -y
///   2. Drag    - quadratic, opposing velocity: -k * |v| * v
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallisticModel {
    pub drag_factor: f64, // 1/m
    pub gravity: f64,     // m/s^2
}

impl BallisticModel {
    pub fn new(projectile: &ProjectileSpec, physics: &PhysicalParameters) -> Self {
        Self {
            drag_factor: projectile.drag_factor(physics),
            gravity: physics.gravity,
        }
    }
}

impl Derivative for BallisticModel {
    /// `t` is unused: all forces are time-invariant.
    fn derivative(&self, _t: f64, state: &State) -> Deriv {
        let a_gravity = Vector2::new(0.0, -self.gravity);
        let a_drag = drag_accel(&state.vel, self.drag_factor);

        Deriv {
            dpos: state.vel,
            dvel: a_gravity + a_drag,
        }
    }
}
