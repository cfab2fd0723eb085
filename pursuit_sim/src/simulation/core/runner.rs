// pursuit_sim/src/simulation/core/runner.rs

use std::collections::VecDeque;
use std::fmt;

use anyhow::{Context, Result};
use rand_distr::Normal;
use tracing::{debug, info, trace};

use pursuit_core::estimation::{
    EstimatorKind, MultiModelEstimator, ScalarKalmanEstimator, TargetEstimator,
};
use pursuit_core::service::PredictionService;
use pursuit_core::types::{Observation, Vec3};

use crate::simulation::config::ScenarioConfig;
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::core::truth::TargetTruth;

/// Summary of one scenario run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub name: String,
    pub estimator: EstimatorKind,
    /// Observations fed to the service.
    pub ticks: usize,
    /// Distance between the prediction made at `t` for `t + horizon` and the
    /// truth at `t + horizon`, averaged over every prediction that came due.
    pub mean_prediction_error: f64,
    pub max_prediction_error: f64,
    /// Share of ticks where the follower could reach the target.
    pub feasible_ratio: f64,
    /// Smallest follower-to-target distance seen during the run.
    pub closest_approach: f64,
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:?}: {} ticks, prediction error mean {:.3} / max {:.3}, \
             feasible {:.0}%, closest approach {:.3}",
            self.name,
            self.estimator,
            self.ticks,
            self.mean_prediction_error,
            self.max_prediction_error,
            self.feasible_ratio * 100.0,
            self.closest_approach,
        )
    }
}

/// Prediction waiting for the truth to catch up with it.
struct PendingPrediction {
    due: f64,
    position: Vec3,
}

/// Plays one scenario to the end of its target script.
///
/// Each step the target advances, a (noisy) sample is ticked into the
/// service, the horizon prediction is queued for scoring, and the follower
/// moves one step toward the current intercept point.
pub fn run_scenario(config: &ScenarioConfig) -> Result<ScenarioReport> {
    let mut service = PredictionService::new(config.service.clone())
        .with_context(|| format!("scenario '{}': bad service config", config.name))?;
    let horizon = service.config().prediction_horizon;
    let step = config.step;

    let mut truth = TargetTruth::new(&config.target, config.service.up_axis);
    let mut rng = SimulationRng::new(config.seed);
    let noise = Normal::new(0.0, config.noise_stddev)
        .with_context(|| format!("scenario '{}': bad noise_stddev", config.name))?;

    let mut follower = Vec3::from(config.follower.position);
    let mut pending: VecDeque<PendingPrediction> = VecDeque::new();

    let mut ticks = 0usize;
    let mut feasible = 0usize;
    let mut scored = 0usize;
    let mut error_sum = 0.0;
    let mut error_max: f64 = 0.0;
    let mut closest = (follower - truth.position()).norm();

    info!(
        "Running scenario '{}' ({:.1} s, estimator {:?}).",
        config.name,
        truth.total_duration(),
        service.estimator().kind()
    );

    loop {
        let now = truth.time();
        let measured = rng.perturb(&truth.position(), &noise);
        service.tick(Observation::new(measured, now))?;
        ticks += 1;

        // Score predictions that have come due against the truth.
        while pending.front().is_some_and(|p| p.due <= now + 0.5 * step) {
            if let Some(p) = pending.pop_front() {
                let error = (p.position - truth.position()).norm();
                error_sum += error;
                error_max = error_max.max(error);
                scored += 1;
            }
        }
        pending.push_back(PendingPrediction {
            due: now + horizon,
            position: service.predicted_position(horizon)?.position,
        });

        trace_estimator(&service);

        let solution = service.intercept_point(&follower, config.follower.speed)?;
        if solution.feasible {
            feasible += 1;
        }
        follower = step_toward(&follower, &solution.point, config.follower.speed * step);
        closest = closest.min((follower - truth.position()).norm());
        let velocity_error = (service.effective_target_velocity()? - truth.velocity()).norm();
        debug!(
            t = now,
            velocity_error,
            feasible = solution.feasible,
            tau = ?solution.time_to_intercept,
            "Tick processed."
        );

        if truth.is_finished() {
            break;
        }
        truth.advance(step);
        closest = closest.min((follower - truth.position()).norm());
    }

    Ok(ScenarioReport {
        name: config.name.clone(),
        estimator: service.estimator().kind(),
        ticks,
        mean_prediction_error: if scored > 0 {
            error_sum / scored as f64
        } else {
            0.0
        },
        max_prediction_error: error_max,
        feasible_ratio: feasible as f64 / ticks as f64,
        closest_approach: closest,
    })
}

/// Logs the variant-specific state of whichever estimator the service runs.
fn trace_estimator(service: &PredictionService) {
    let estimator = service.estimator();
    if let Some(kf) = estimator.downcast_ref::<ScalarKalmanEstimator>() {
        trace!(
            raw = ?kf.last_measurement(),
            filtered = ?kf.current_position(),
            covariance = ?kf.covariance(),
            "Kalman state."
        );
    } else if let Some(mm) = estimator.downcast_ref::<MultiModelEstimator>() {
        trace!(
            weights = ?mm.model_weights(),
            turn_rate = mm.turn_rate(),
            "Model bank state."
        );
    }
}

/// Moves `from` toward `to` by at most `max_distance`, without overshooting.
fn step_toward(from: &Vec3, to: &Vec3, max_distance: f64) -> Vec3 {
    let offset = to - from;
    let distance = offset.norm();
    if distance <= max_distance {
        *to
    } else {
        from + offset * (max_distance / distance)
    }
}
