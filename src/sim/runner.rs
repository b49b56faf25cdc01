use log::{debug, warn};
use serde::Serialize;

use crate::dynamics::model::{BallisticModel, Derivative};
use crate::dynamics::state::{Sample, State};
use crate::error::SimError;
use crate::physics::params::PhysicalParameters;
use crate::projectile::{LaunchConditions, ProjectileSpec};
use crate::sim::config::{ImpactPolicy, SimConfig};

/// Fraction of a step below which a leftover interval is treated as
/// floating-point noise rather than a partial step.
const STEP_EPS: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// How a run ended. Both are normal, terminal outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Height went negative; the last sample is on the ground.
    Landed,
    /// `max_time` elapsed with the projectile still airborne.
    TimedOut,
}

/// Time-ordered samples of one run. Always holds at least the launch sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
    termination: Termination,
}

impl Trajectory {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn landed(&self) -> bool {
        self.termination == Termination::Landed
    }

    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    /// Highest sample (first one on ties).
    pub fn apogee(&self) -> &Sample {
        self.samples
            .iter()
            .fold(self.first(), |best, s| if s.y() > best.y() { s } else { best })
    }

    /// (x, y) series for plotting.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().map(|s| (s.x(), s.y()))
    }

    pub fn result(&self) -> RunResult {
        RunResult::from_trajectory(self)
    }
}

/// Summary statistics of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunResult {
    pub distance_max: f64, // m, max x over all samples
    pub height_max: f64,   // m, max y over all samples
    pub flight_time: f64,  // s, time of last sample
    pub max_speed: f64,    // m/s
    pub impact_speed: f64, // m/s, speed at last sample
    pub termination: Termination,
    pub samples: usize,
}

impl RunResult {
    pub fn from_trajectory(trajectory: &Trajectory) -> Self {
        let samples = trajectory.samples();
        let last = trajectory.last();

        RunResult {
            distance_max: max_over(samples, Sample::x),
            height_max: max_over(samples, Sample::y),
            flight_time: last.time,
            max_speed: max_over(samples, |s| s.state.speed()),
            impact_speed: last.state.speed(),
            termination: trajectory.termination(),
            samples: samples.len(),
        }
    }
}

fn max_over(samples: &[Sample], f: impl Fn(&Sample) -> f64) -> f64 {
    samples.iter().map(f).fold(f64::NEG_INFINITY, f64::max)
}

// ---------------------------------------------------------------------------
// Trajectory driver
// ---------------------------------------------------------------------------

/// Run the ballistic model for one projectile from launch to ground impact
/// (or `max_time`).
pub fn simulate(
    launch: &LaunchConditions,
    projectile: &ProjectileSpec,
    physics: &PhysicalParameters,
    config: &SimConfig,
) -> Result<Trajectory, SimError> {
    launch.validate()?;
    physics.validate()?;
    let model = BallisticModel::new(projectile, physics);
    debug!(
        "launch v0={} m/s angle={} deg mass={} kg radius={} m drag_factor={:.6e}",
        launch.speed,
        launch.angle_deg,
        projectile.mass(),
        projectile.radius(),
        model.drag_factor
    );
    simulate_with(&model, launch.initial_state(), config)
}

/// [`simulate`] with default environment and integration settings.
pub fn simulate_defaults(
    initial_speed: f64,
    launch_angle_deg: f64,
    mass: f64,
    radius: f64,
) -> Result<Trajectory, SimError> {
    let projectile = ProjectileSpec::new(mass, radius)?;
    simulate(
        &LaunchConditions::new(initial_speed, launch_angle_deg),
        &projectile,
        &PhysicalParameters::default(),
        &SimConfig::default(),
    )
}

/// Integrate any derivative model from `initial` at t = 0.
///
/// Steps land on `i * step`; when `max_time` is not a whole number of steps
/// a final shorter step ends exactly at `max_time`. The first sample with
/// negative height ends the run and is kept, grounded per `config.impact`.
pub fn simulate_with<M: Derivative + ?Sized>(
    model: &M,
    initial: State,
    config: &SimConfig,
) -> Result<Trajectory, SimError> {
    config.validate()?;
    if !initial.is_finite() {
        return Err(SimError::invalid("initial_state", "must be finite"));
    }

    let h = config.step;
    let full_steps = (config.max_time / h + STEP_EPS).floor() as usize;
    let remainder = config.max_time - full_steps as f64 * h;
    let total_steps = full_steps + usize::from(remainder > h * STEP_EPS);

    let mut samples = Vec::with_capacity((total_steps + 1).min(100_000));
    let mut prev = Sample {
        time: 0.0,
        state: initial,
    };
    samples.push(prev);

    for i in 1..=total_steps {
        let time = if i <= full_steps {
            i as f64 * h
        } else {
            config.max_time
        };
        let state = config.method.step(model, prev.time, &prev.state, time - prev.time);

        if !state.is_finite() {
            warn!("state diverged at step {i} (t={time:.4} s)");
            return Err(SimError::NumericInstability { step: i, time });
        }

        let current = Sample { time, state };

        // Ground impact
        if state.pos.y < 0.0 {
            if let Some(impact) = ground_impact(&prev, &current, config.impact) {
                samples.push(impact);
            }
            let last = samples[samples.len() - 1];
            debug!(
                "landed t={:.3} s x={:.3} m after {} steps",
                last.time,
                last.x(),
                i
            );
            return Ok(Trajectory {
                samples,
                termination: Termination::Landed,
            });
        }

        samples.push(current);
        prev = current;
    }

    warn!(
        "still airborne at max_time={} s (y={:.3} m)",
        config.max_time,
        prev.y()
    );
    Ok(Trajectory {
        samples,
        termination: Termination::TimedOut,
    })
}

/// Ground the first below-ground sample. `None` means `prev` already sits at
/// the crossing and ends the trajectory itself.
fn ground_impact(prev: &Sample, below: &Sample, policy: ImpactPolicy) -> Option<Sample> {
    match policy {
        ImpactPolicy::Clamp => {
            let mut grounded = *below;
            grounded.state.pos.y = 0.0;
            Some(grounded)
        }
        ImpactPolicy::Interpolate => {
            let frac = prev.y() / (prev.y() - below.y());
            if frac <= 0.0 {
                return None;
            }
            let mut state = prev.state.lerp(&below.state, frac);
            state.pos.y = 0.0;
            Some(Sample {
                time: prev.time + frac * (below.time - prev.time),
                state,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
