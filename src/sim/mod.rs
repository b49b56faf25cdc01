pub mod config;
pub mod event;
pub mod integrator;
pub mod runner;

pub use config::{ImpactPolicy, ScenarioConfig, SimConfig, MAX_STEPS};
pub use integrator::{euler_step, rk4_step, Method};
pub use runner::{simulate, simulate_defaults, simulate_with, RunResult, Termination, Trajectory};
