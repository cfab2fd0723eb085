// pursuit_core/src/estimation/kinematics.rs

use tracing::debug;

use crate::models::motion::Kinematics;
use crate::types::{Observation, Vec3};

/// Samples closer together than this (seconds) are treated as duplicates.
pub const TIME_EPSILON: f64 = 1e-9;

/// Lower bound on the divisor when differentiating velocity.
const MIN_ACCEL_DT: f64 = 1e-6;

/// Finite-difference kinematics of one tracked target.
///
/// `previous_*` always hold the values from the sample before the latest
/// accepted one, so `position - previous_position` is the last displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub previous_position: Vec3,
    pub previous_velocity: Vec3,
    pub timestamp: f64,
    pub previous_timestamp: f64,
    /// Number of accepted observations, including the first.
    pub samples: u64,
}

impl TrackState {
    /// Tracking starts at rest at the first observed position.
    pub fn start(observation: &Observation) -> Self {
        Self {
            position: observation.position,
            velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            previous_position: observation.position,
            previous_velocity: Vec3::zeros(),
            timestamp: observation.timestamp,
            previous_timestamp: observation.timestamp,
            samples: 1,
        }
    }

    /// Elapsed time between the last two accepted samples; zero until there are two.
    pub fn last_dt(&self) -> f64 {
        self.timestamp - self.previous_timestamp
    }

    pub fn current(&self) -> Kinematics {
        Kinematics {
            position: self.position,
            velocity: self.velocity,
            acceleration: self.acceleration,
        }
    }

    /// The state one sample ago. Acceleration is the current estimate since it
    /// is what carried the target from there to here.
    pub fn previous(&self) -> Kinematics {
        Kinematics {
            position: self.previous_position,
            velocity: self.previous_velocity,
            acceleration: self.acceleration,
        }
    }
}

/// Turns a stream of position samples into velocity and acceleration estimates.
#[derive(Debug, Clone, Default)]
pub struct KinematicDifferentiator {
    state: Option<TrackState>,
}

impl KinematicDifferentiator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&TrackState> {
        self.state.as_ref()
    }

    /// Folds one observation in. Returns `false` when the sample is not newer
    /// than the last accepted one by more than `TIME_EPSILON`; the state is
    /// then left untouched.
    pub fn update(&mut self, observation: &Observation) -> bool {
        let Some(state) = self.state.as_mut() else {
            self.state = Some(TrackState::start(observation));
            return true;
        };

        let dt = observation.timestamp - state.timestamp;
        if dt <= TIME_EPSILON {
            debug!(
                dt,
                timestamp = observation.timestamp,
                "Skipping stale or duplicate observation."
            );
            return false;
        }

        let velocity = (observation.position - state.position) / dt;
        // With a single earlier sample the previous velocity is the implicit
        // zero of a fresh track, not a measurement.
        let acceleration = if state.samples >= 2 {
            (velocity - state.velocity) / dt.max(MIN_ACCEL_DT)
        } else {
            Vec3::zeros()
        };

        state.previous_position = state.position;
        state.previous_velocity = state.velocity;
        state.previous_timestamp = state.timestamp;
        state.position = observation.position;
        state.velocity = velocity;
        state.acceleration = acceleration;
        state.timestamp = observation.timestamp;
        state.samples += 1;
        true
    }
}
