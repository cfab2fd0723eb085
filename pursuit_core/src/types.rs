// pursuit_core/src/types.rs

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// --- Core Type Aliases ---
pub type Vec3 = Vector3<f64>;

/// A single timestamped position sample of the tracked target.
/// Produced by the caller once per fixed step; never mutated after it is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// World-frame position of the target.
    pub position: Vec3,
    /// Sample time in seconds. Must strictly increase within one track.
    pub timestamp: f64,
}

impl Observation {
    pub fn new(position: Vec3, timestamp: f64) -> Self {
        Self {
            position,
            timestamp,
        }
    }

    /// True when every component and the timestamp are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.timestamp.is_finite() && self.position.iter().all(|c| c.is_finite())
    }
}

/// The answer to a `predicted_position` query. Recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub position: Vec3,
}

/// The answer to an `intercept_point` query.
///
/// `time_to_intercept` is `Some` exactly when `feasible` is true. For an
/// infeasible query `point` holds a degraded but usable aim point (the
/// target's predicted position) rather than an intercept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptSolution {
    pub point: Vec3,
    pub time_to_intercept: Option<f64>,
    pub feasible: bool,
}

impl InterceptSolution {
    pub fn reachable(point: Vec3, tau: f64) -> Self {
        Self {
            point,
            time_to_intercept: Some(tau),
            feasible: true,
        }
    }

    pub fn unreachable(fallback: Vec3) -> Self {
        Self {
            point: fallback,
            time_to_intercept: None,
            feasible: false,
        }
    }
}
