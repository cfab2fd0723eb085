// pursuit_core/src/service.rs

use tracing::debug;

use crate::config::ServiceConfig;
use crate::error::{ConfigError, TrackingError};
use crate::estimation::{build_estimator, TargetEstimator};
use crate::intercept::InterceptSolver;
use crate::types::{InterceptSolution, Observation, PredictionResult, Vec3};

/// Tracks one target and answers "where will it be" and "where do I meet it".
///
/// The owning scheduler calls `tick` once per fixed step with the latest
/// sample; all queries take `&self` and are pure functions of the state left
/// by the last tick, so they can be repeated freely between ticks.
#[derive(Debug, Clone)]
pub struct PredictionService {
    config: ServiceConfig,
    estimator: Box<dyn TargetEstimator>,
    solver: InterceptSolver,
}

impl PredictionService {
    /// Validates `config` and builds the selected estimator.
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            estimator: build_estimator(&config.estimator, config.up_axis),
            solver: InterceptSolver::from(config.intercept),
            config,
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Read-only access for debug renderers. Downcast for variant detail.
    pub fn estimator(&self) -> &dyn TargetEstimator {
        self.estimator.as_ref()
    }

    pub fn is_tracking(&self) -> bool {
        self.estimator.is_tracking()
    }

    /// Feeds one observation. `Ok(false)` means the sample was not newer than
    /// the previous one and was ignored.
    pub fn tick(&mut self, observation: Observation) -> Result<bool, TrackingError> {
        if !observation.is_finite() {
            return Err(TrackingError::NonFiniteObservation {
                position: observation.position.into(),
                timestamp: observation.timestamp,
            });
        }
        Ok(self.estimator.update(&observation))
    }

    /// Ends the current track. The next observation starts a new one.
    pub fn reset(&mut self) {
        debug!("Resetting target track.");
        self.estimator = build_estimator(&self.config.estimator, self.config.up_axis);
    }

    /// Where the target is expected `lookahead` seconds after the last sample,
    /// clamped to the world bounds when they are configured.
    pub fn predicted_position(&self, lookahead: f64) -> Result<PredictionResult, TrackingError> {
        if !lookahead.is_finite() {
            return Err(TrackingError::NonFiniteLookahead(lookahead));
        }
        let position = self
            .estimator
            .predict(lookahead)
            .ok_or(TrackingError::NotTracking)?;
        Ok(PredictionResult {
            position: self.clamp(&position),
        })
    }

    /// Straight-line velocity implied by the prediction at the configured
    /// horizon. Smoother than the instantaneous finite-difference velocity.
    pub fn effective_target_velocity(&self) -> Result<Vec3, TrackingError> {
        let (current, predicted) = self.horizon_pair()?;
        Ok((predicted - current) / self.config.prediction_horizon)
    }

    /// Meeting point for a follower at `follower_position` moving at
    /// `follower_speed`. When no meeting is possible the solution is marked
    /// infeasible and aims at the horizon prediction instead.
    pub fn intercept_point(
        &self,
        follower_position: &Vec3,
        follower_speed: f64,
    ) -> Result<InterceptSolution, TrackingError> {
        if !follower_position.iter().all(|c| c.is_finite()) {
            return Err(TrackingError::NonFiniteFollower((*follower_position).into()));
        }
        if !follower_speed.is_finite() || follower_speed < 0.0 {
            return Err(TrackingError::InvalidFollowerSpeed(follower_speed));
        }

        let (current, predicted) = self.horizon_pair()?;
        let target_velocity = (predicted - current) / self.config.prediction_horizon;
        let solution = self
            .solver
            .solve(follower_position, &current, &target_velocity, follower_speed);

        if solution.feasible {
            Ok(solution)
        } else {
            Ok(InterceptSolution::unreachable(self.clamp(&predicted)))
        }
    }

    // --- Private helpers ---

    /// Current position and the unclamped prediction at the horizon.
    fn horizon_pair(&self) -> Result<(Vec3, Vec3), TrackingError> {
        let current = self
            .estimator
            .current_position()
            .ok_or(TrackingError::NotTracking)?;
        let predicted = self
            .estimator
            .predict(self.config.prediction_horizon)
            .ok_or(TrackingError::NotTracking)?;
        Ok((current, predicted))
    }

    fn clamp(&self, position: &Vec3) -> Vec3 {
        match &self.config.world_bounds {
            Some(bounds) => bounds.clamp_horizontal(position, self.config.up_axis),
            None => *position,
        }
    }
}
