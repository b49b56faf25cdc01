//! Point-projectile flight simulation.
//!
//! A projectile launched from the ground is integrated under uniform gravity
//! and quadratic air drag with a fixed-step RK4 scheme until it hits the
//! ground or a time limit elapses.
//!
//! ```
//! use projectile_sim::simulate_defaults;
//!
//! let trajectory = simulate_defaults(50.0, 45.0, 1.0, 0.1).unwrap();
//! let result = trajectory.result();
//! assert!(trajectory.landed());
//! assert!(result.distance_max > 100.0);
//! ```

pub mod dynamics;
pub mod error;
pub mod io;
pub mod logging;
pub mod physics;
pub mod projectile;
pub mod sim;

pub use dynamics::{BallisticModel, Derivative, Sample, State};
pub use error::SimError;
pub use physics::PhysicalParameters;
pub use projectile::{LaunchConditions, ProjectileSpec};
pub use sim::{
    simulate, simulate_defaults, simulate_with, ImpactPolicy, Method, RunResult, ScenarioConfig,
    SimConfig, Termination, Trajectory,
};
