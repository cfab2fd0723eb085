// pursuit_core/src/estimation/mod.rs

use std::fmt::Debug;

use downcast_rs::{impl_downcast, Downcast};
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};

use crate::config::EstimatorConfig;
use crate::math::VerticalAxis;
use crate::types::{Observation, Vec3};

pub mod filters;
pub mod kinematics;

pub use filters::multi_model::{ModelWeights, MultiModelEstimator};
pub use filters::scalar_kalman::{AxisFilter, ScalarKalmanEstimator};
pub use kinematics::{KinematicDifferentiator, TrackState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    MultiModel,
    ScalarKalman,
}

/// The contract for any algorithm that tracks a single target and forecasts
/// where it will be.
///
/// State is mutated only through `update`; every other method is a pure read,
/// so queries may be repeated between updates with identical results.
/// Variant-specific read-only state (model weights, covariance) is reachable
/// by downcasting, e.g. `estimator.downcast_ref::<ScalarKalmanEstimator>()`.
pub trait TargetEstimator: Downcast + DynClone + Debug + Send + Sync {
    fn kind(&self) -> EstimatorKind;

    /// Folds one observation into the state. Returns `false` when the sample
    /// was ignored (not newer than the last accepted one).
    fn update(&mut self, observation: &Observation) -> bool;

    /// Position `lookahead` seconds past the last accepted sample.
    /// `None` until the first observation.
    fn predict(&self, lookahead: f64) -> Option<Vec3>;

    /// The estimator's notion of where the target is now.
    fn current_position(&self) -> Option<Vec3>;

    fn current_velocity(&self) -> Option<Vec3>;

    fn last_timestamp(&self) -> Option<f64>;

    fn is_tracking(&self) -> bool {
        self.current_position().is_some()
    }
}
impl_downcast!(TargetEstimator);
dyn_clone::clone_trait_object!(TargetEstimator);

/// Builds the estimator selected by `config`. Validation is the caller's job.
pub fn build_estimator(config: &EstimatorConfig, up: VerticalAxis) -> Box<dyn TargetEstimator> {
    match config {
        EstimatorConfig::MultiModel(c) => Box::new(MultiModelEstimator::new(*c, up)),
        EstimatorConfig::ScalarKalman(c) => Box::new(ScalarKalmanEstimator::new(*c)),
    }
}
