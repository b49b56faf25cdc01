use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Planar state: position and velocity
// ---------------------------------------------------------------------------

/// Projectile state in the vertical launch plane.
/// Frame: x downrange, y up, origin at the foot of the launch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub pos: Vector2<f64>, // m   [x, y]
    pub vel: Vector2<f64>, // m/s [vx, vy]
}

impl State {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self {
            pos: Vector2::new(x, y),
            vel: Vector2::new(vx, vy),
        }
    }

    /// Successor state `self + d * dt`. Used inside the integrators.
    pub fn apply(&self, d: &Deriv, dt: f64) -> State {
        State {
            pos: self.pos + d.dpos * dt,
            vel: self.vel + d.dvel * dt,
        }
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    pub fn is_finite(&self) -> bool {
        self.pos.iter().chain(self.vel.iter()).all(|c| c.is_finite())
    }

    /// Componentwise blend: `self` at `frac = 0`, `other` at `frac = 1`.
    pub fn lerp(&self, other: &State, frac: f64) -> State {
        State {
            pos: self.pos.lerp(&other.pos, frac),
            vel: self.vel.lerp(&other.vel, frac),
        }
    }
}

// ---------------------------------------------------------------------------
// State derivative (dp/dt, dv/dt)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deriv {
    pub dpos: Vector2<f64>, // velocity
    pub dvel: Vector2<f64>, // acceleration
}

// ---------------------------------------------------------------------------
// Time-stamped trajectory sample
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64, // s
    pub state: State,
}

impl Sample {
    pub fn x(&self) -> f64 {
        self.state.pos.x
    }

    pub fn y(&self) -> f64 {
        self.state.pos.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_scales_derivative() {
        let s = State::new(1.0, 2.0, 3.0, 4.0);
        let d = Deriv {
            dpos: Vector2::new(3.0, 4.0),
            dvel: Vector2::new(0.0, -10.0),
        };
        let next = s.apply(&d, 0.5);
        assert_eq!(next, State::new(2.5, 4.0, 3.0, -1.0));
        // source untouched
        assert_eq!(s, State::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn non_finite_component_detected() {
        assert!(State::new(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!State::new(0.0, f64::NAN, 1.0, 1.0).is_finite());
        assert!(!State::new(0.0, 0.0, f64::INFINITY, 1.0).is_finite());
    }

    #[test]
    fn lerp_midpoint() {
        let a = State::new(0.0, 2.0, 10.0, 4.0);
        let b = State::new(1.0, -2.0, 10.0, 2.0);
        let m = a.lerp(&b, 0.5);
        assert_eq!(m, State::new(0.5, 0.0, 10.0, 3.0));
    }
}
