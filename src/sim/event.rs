use crate::dynamics::state::Sample;
use crate::sim::runner::Trajectory;

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

/// Kinds of flight events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Apogee,
    Impact,
    Custom(String),
}

/// A discrete event located on a trajectory sample.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightEvent {
    pub time: f64,
    pub kind: EventKind,
    pub sample: Sample,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive samples and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<EventKind>;
}

/// Detects apogee (vertical velocity going from positive to non-positive).
pub struct ApogeeDetector;

impl EventDetector for ApogeeDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<EventKind> {
        if prev.state.vel.y > 0.0 && current.state.vel.y <= 0.0 {
            Some(EventKind::Apogee)
        } else {
            None
        }
    }
}

/// Detects when height crosses a threshold (ascending or descending).
/// Fires at most once.
pub struct AltitudeDetector {
    pub altitude: f64,
    pub ascending: bool,
    fired: bool,
}

impl AltitudeDetector {
    pub fn new(altitude: f64, ascending: bool) -> Self {
        Self {
            altitude,
            ascending,
            fired: false,
        }
    }
}

impl EventDetector for AltitudeDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let crossed = if self.ascending {
            prev.y() < self.altitude && current.y() >= self.altitude
        } else {
            prev.y() > self.altitude && current.y() <= self.altitude
        };
        if crossed {
            self.fired = true;
            Some(EventKind::Custom(format!(
                "Height {:.1}m ({})",
                self.altitude,
                if self.ascending { "ascending" } else { "descending" }
            )))
        } else {
            None
        }
    }
}

/// Run detectors over every consecutive sample pair, in time order.
/// A landed trajectory always ends with an `Impact` event.
pub fn detect_events(
    trajectory: &Trajectory,
    detectors: &mut [&mut dyn EventDetector],
) -> Vec<FlightEvent> {
    let mut events = Vec::new();

    for pair in trajectory.samples().windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(prev, current) {
                events.push(FlightEvent {
                    time: current.time,
                    kind,
                    sample: *current,
                });
            }
        }
    }

    if trajectory.landed() {
        let last = trajectory.last();
        events.push(FlightEvent {
            time: last.time,
            kind: EventKind::Impact,
            sample: *last,
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::State;
    use crate::sim::runner::simulate_defaults;

    fn make_sample(time: f64, y: f64, vy: f64) -> Sample {
        Sample {
            time,
            state: State::new(0.0, y, 10.0, vy),
        }
    }

    #[test]
    fn apogee_detected() {
        let mut det = ApogeeDetector;
        let prev = make_sample(0.0, 30.0, 0.5);
        let curr = make_sample(0.01, 30.001, -0.05);
        assert_eq!(det.check(&prev, &curr), Some(EventKind::Apogee));
        assert_eq!(det.check(&curr, &curr), None);
    }

    #[test]
    fn altitude_detector_descending() {
        let mut det = AltitudeDetector::new(10.0, false);
        let prev = make_sample(0.0, 10.5, -5.0);
        let curr = make_sample(0.1, 9.9, -5.0);
        assert!(det.check(&prev, &curr).is_some());
        // Should not fire again
        assert!(det.check(&prev, &curr).is_none());
    }

    #[test]
    fn reference_shot_event_sequence() {
        let traj = simulate_defaults(50.0, 45.0, 1.0, 0.1).unwrap();
        let mut apogee = ApogeeDetector;
        let mut up = AltitudeDetector::new(20.0, true);
        let mut down = AltitudeDetector::new(20.0, false);
        let mut detectors: [&mut dyn EventDetector; 3] = [&mut apogee, &mut up, &mut down];
        let events = detect_events(&traj, &mut detectors);

        let kinds: Vec<&EventKind> = events.iter().map(|e| &e.kind).collect();
        assert_eq!(kinds.len(), 4);
        assert!(matches!(kinds[0], EventKind::Custom(s) if s.contains("ascending")));
        assert_eq!(kinds[1], &EventKind::Apogee);
        assert!(matches!(kinds[2], EventKind::Custom(s) if s.contains("descending")));
        assert_eq!(kinds[3], &EventKind::Impact);

        let apogee_event = &events[1];
        assert!((apogee_event.sample.y() - traj.result().height_max).abs() < 0.01);
        assert!(events.windows(2).all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn timed_out_run_has_no_impact() {
        use crate::physics::params::PhysicalParameters;
        use crate::projectile::{LaunchConditions, ProjectileSpec};
        use crate::sim::config::SimConfig;
        use crate::sim::runner::simulate;

        let traj = simulate(
            &LaunchConditions::new(50.0, 45.0),
            &ProjectileSpec::new(1.0, 0.1).unwrap(),
            &PhysicalParameters::default(),
            &SimConfig {
                max_time: 1.0,
                ..Default::default()
            },
        )
        .unwrap();
        let mut detectors: [&mut dyn EventDetector; 0] = [];
        let events = detect_events(&traj, &mut detectors);
        assert!(events.is_empty());
    }
}
