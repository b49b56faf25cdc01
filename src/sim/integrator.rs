use serde::{Deserialize, Serialize};

use crate::dynamics::model::Derivative;
use crate::dynamics::state::State;

// ---------------------------------------------------------------------------
// Fixed-step integrators
// ---------------------------------------------------------------------------

/// Stepping scheme used by the trajectory driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Classical 4th-order Runge-Kutta.
    #[default]
    Rk4,
    /// Forward Euler, first order.
    Euler,
}

impl Method {
    pub fn step<M: Derivative + ?Sized>(self, model: &M, t: f64, state: &State, h: f64) -> State {
        match self {
            Method::Rk4 => rk4_step(model, t, state, h),
            Method::Euler => euler_step(model, t, state, h),
        }
    }
}

/// Single RK4 step: advance state from t to t + h.
pub fn rk4_step<M: Derivative + ?Sized>(model: &M, t: f64, state: &State, h: f64) -> State {
    let k1 = model.derivative(t, state);
    let k2 = model.derivative(t + h * 0.5, &state.apply(&k1, h * 0.5));
    let k3 = model.derivative(t + h * 0.5, &state.apply(&k2, h * 0.5));
    let k4 = model.derivative(t + h, &state.apply(&k3, h));

    State {
        pos: state.pos + (k1.dpos + 2.0 * k2.dpos + 2.0 * k3.dpos + k4.dpos) * (h / 6.0),
        vel: state.vel + (k1.dvel + 2.0 * k2.dvel + 2.0 * k3.dvel + k4.dvel) * (h / 6.0),
    }
}

/// Single forward Euler step.
pub fn euler_step<M: Derivative + ?Sized>(model: &M, t: f64, state: &State, h: f64) -> State {
    state.apply(&model.derivative(t, state), h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::Deriv;
    use nalgebra::Vector2;

    /// dvx/dt = -vx, so vx(t) = vx0 * e^-t.
    fn decay(_t: f64, s: &State) -> Deriv {
        Deriv {
            dpos: s.vel,
            dvel: -s.vel,
        }
    }

    fn constant_gravity(_t: f64, s: &State) -> Deriv {
        Deriv {
            dpos: s.vel,
            dvel: Vector2::new(0.0, -10.0),
        }
    }

    fn integrate(method: Method, h: f64, t_end: f64) -> State {
        let n = (t_end / h).round() as usize;
        let mut s = State::new(0.0, 0.0, 1.0, 0.0);
        for i in 0..n {
            s = method.step(&decay, i as f64 * h, &s, h);
        }
        s
    }

    #[test]
    fn rk4_exact_for_constant_acceleration() {
        let s0 = State::new(0.0, 0.0, 3.0, 20.0);
        let s1 = rk4_step(&constant_gravity, 0.0, &s0, 0.5);
        // y = 20 * 0.5 - 5 * 0.25
        assert!((s1.pos.y - 8.75).abs() < 1e-12);
        assert!((s1.pos.x - 1.5).abs() < 1e-12);
        assert!((s1.vel.y - 15.0).abs() < 1e-12);
    }

    #[test]
    fn rk4_fourth_order_convergence() {
        let exact = (-1.0_f64).exp();
        let e1 = (integrate(Method::Rk4, 0.1, 1.0).vel.x - exact).abs();
        let e2 = (integrate(Method::Rk4, 0.05, 1.0).vel.x - exact).abs();
        let ratio = e1 / e2;
        // Halving h should cut the global error by ~2^4
        assert!(ratio > 12.0 && ratio < 20.0, "ratio = {ratio}");
    }

    #[test]
    fn euler_first_order_convergence() {
        let exact = (-1.0_f64).exp();
        let e1 = (integrate(Method::Euler, 0.01, 1.0).vel.x - exact).abs();
        let e2 = (integrate(Method::Euler, 0.005, 1.0).vel.x - exact).abs();
        let ratio = e1 / e2;
        assert!(ratio > 1.8 && ratio < 2.2, "ratio = {ratio}");
    }

    #[test]
    fn rk4_beats_euler() {
        let exact = (-1.0_f64).exp();
        let rk4 = (integrate(Method::Rk4, 0.01, 1.0).vel.x - exact).abs();
        let euler = (integrate(Method::Euler, 0.01, 1.0).vel.x - exact).abs();
        assert!(rk4 < euler * 1e-4);
    }

    #[test]
    fn euler_matches_explicit_update() {
        let s0 = State::new(1.0, 2.0, 3.0, 4.0);
        let s1 = euler_step(&constant_gravity, 0.0, &s0, 0.1);
        assert!((s1.pos.x - 1.3).abs() < 1e-12);
        assert!((s1.pos.y - 2.4).abs() < 1e-12);
        assert!((s1.vel.y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn method_parses_lowercase() {
        let m: Method = serde_json::from_str("\"euler\"").unwrap();
        assert_eq!(m, Method::Euler);
        assert_eq!(Method::default(), Method::Rk4);
    }
}
