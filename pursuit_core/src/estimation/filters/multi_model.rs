// pursuit_core/src/estimation/filters/multi_model.rs

use tracing::{trace, warn};

use crate::config::MultiModelConfig;
use crate::estimation::kinematics::{KinematicDifferentiator, TrackState};
use crate::estimation::{EstimatorKind, TargetEstimator};
use crate::math::{heading, shortest_angle_delta, VerticalAxis};
use crate::models::motion::{
    ConstantAcceleration, ConstantTurn, ConstantVelocity, Kinematics, MotionModel,
    MotionModelKind,
};
use crate::types::{Observation, Vec3};

/// Lower bound on the divisor when turning a heading change into a rate.
const MIN_TURN_DT: f64 = 1e-6;

/// Normalized credibility of each motion model. The three weights sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelWeights {
    pub constant_velocity: f64,
    pub constant_acceleration: f64,
    pub constant_turn: f64,
}

impl ModelWeights {
    /// Normalizes raw weights, falling back to equal thirds when their sum is
    /// not a positive finite number.
    pub fn normalized(raw: [f64; 3]) -> Self {
        let sum: f64 = raw.iter().sum();
        let [cv, ca, ct] = if sum > 0.0 && sum.is_finite() {
            raw.map(|w| w / sum)
        } else {
            [1.0 / 3.0; 3]
        };
        Self {
            constant_velocity: cv,
            constant_acceleration: ca,
            constant_turn: ct,
        }
    }

    pub fn get(&self, kind: MotionModelKind) -> f64 {
        match kind {
            MotionModelKind::ConstantVelocity => self.constant_velocity,
            MotionModelKind::ConstantAcceleration => self.constant_acceleration,
            MotionModelKind::ConstantTurn => self.constant_turn,
        }
    }

    /// The model carrying the most weight.
    pub fn dominant(&self) -> MotionModelKind {
        let mut best = MotionModelKind::ConstantVelocity;
        for kind in [
            MotionModelKind::ConstantAcceleration,
            MotionModelKind::ConstantTurn,
        ] {
            if self.get(kind) > self.get(best) {
                best = kind;
            }
        }
        best
    }
}

/// Converts squared retrodiction errors into raw (unnormalized) weights.
/// `softening` keeps a perfect fit finite and bounds the largest weight.
pub fn inverse_error_weights(squared_errors: [f64; 3], softening: f64) -> [f64; 3] {
    squared_errors.map(|e| 1.0 / (e + softening))
}

/// Convex combination of the candidates. Falls back to their plain mean when
/// the weights do not sum to a positive finite number.
pub fn blend(candidates: &[Vec3; 3], weights: &[f64; 3]) -> Vec3 {
    let sum: f64 = weights.iter().sum();
    if !(sum > 0.0 && sum.is_finite()) {
        warn!(?weights, "Degenerate model weights; using the unweighted mean.");
        return (candidates[0] + candidates[1] + candidates[2]) / 3.0;
    }
    candidates
        .iter()
        .zip(weights)
        .fold(Vec3::zeros(), |acc, (c, w)| acc + c * *w)
        / sum
}

/// Blends constant-velocity, constant-acceleration and constant-turn forecasts,
/// weighting each by how well it retrodicts the latest sample.
///
/// Behaves like a CV predictor on straight runs and shifts weight toward CA
/// or CT while the target speeds up or turns, with no explicit mode switch.
#[derive(Debug, Clone)]
pub struct MultiModelEstimator {
    config: MultiModelConfig,
    up: VerticalAxis,
    kinematics: KinematicDifferentiator,
}

impl MultiModelEstimator {
    pub fn new(config: MultiModelConfig, up: VerticalAxis) -> Self {
        Self {
            config,
            up,
            kinematics: KinematicDifferentiator::new(),
        }
    }

    /// The differentiated kinematic state, for debug renderers.
    pub fn track(&self) -> Option<&TrackState> {
        self.kinematics.state()
    }

    /// Signed turn rate about the up axis (rad/s); zero when either of the
    /// last two velocity samples is too slow to carry a heading.
    pub fn turn_rate(&self) -> f64 {
        self.track().map_or(0.0, |t| self.turn_rate_of(t))
    }

    /// Forecasts of each model, ordered CV, CA, CT.
    pub fn candidates(&self, horizon: f64) -> Option<[Vec3; 3]> {
        let track = self.track()?;
        Some(self.candidates_of(track, horizon))
    }

    pub fn model_weights(&self) -> Option<ModelWeights> {
        let track = self.track()?;
        Some(ModelWeights::normalized(self.raw_weights_of(track)))
    }

    /// Interval the models are run over when scoring them from the previous sample.
    pub fn probe_interval(&self) -> Option<f64> {
        self.track().map(|t| self.probe_interval_of(t))
    }

    // --- Private helpers ---

    fn turn_rate_of(&self, track: &TrackState) -> f64 {
        let min_speed = self.config.min_turn_speed;
        if track.velocity.norm() <= min_speed || track.previous_velocity.norm() <= min_speed {
            return 0.0;
        }
        let delta = shortest_angle_delta(
            heading(&track.previous_velocity, self.up),
            heading(&track.velocity, self.up),
        );
        delta / track.last_dt().max(MIN_TURN_DT)
    }

    fn probe_interval_of(&self, track: &TrackState) -> f64 {
        self.config
            .model_memory
            .min(track.last_dt().max(self.config.probe_floor))
    }

    fn candidates_of(&self, track: &TrackState, horizon: f64) -> [Vec3; 3] {
        self.forecast(track, &track.current(), horizon)
    }

    fn raw_weights_of(&self, track: &TrackState) -> [f64; 3] {
        // Each model replays the last step from the previous sample and is
        // scored against where the target was actually seen.
        let retrodicted = self.forecast(track, &track.previous(), self.probe_interval_of(track));
        let squared_errors = retrodicted.map(|p| (track.position - p).norm_squared());
        inverse_error_weights(squared_errors, self.config.softening)
    }

    /// Runs the three models from `start`, ordered CV, CA, CT.
    fn forecast(&self, track: &TrackState, start: &Kinematics, horizon: f64) -> [Vec3; 3] {
        let turn = ConstantTurn::new(self.turn_rate_of(track), self.up);
        let models: [&dyn MotionModel; 3] = [&ConstantVelocity, &ConstantAcceleration, &turn];
        models.map(|m| m.extrapolate(start, horizon))
    }
}

impl TargetEstimator for MultiModelEstimator {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::MultiModel
    }

    fn update(&mut self, observation: &Observation) -> bool {
        let accepted = self.kinematics.update(observation);
        if accepted {
            if let Some(weights) = self.model_weights() {
                trace!(
                    cv = weights.constant_velocity,
                    ca = weights.constant_acceleration,
                    ct = weights.constant_turn,
                    turn_rate = self.turn_rate(),
                    "Updated model weights."
                );
            }
        }
        accepted
    }

    fn predict(&self, lookahead: f64) -> Option<Vec3> {
        let track = self.track()?;
        let candidates = self.candidates_of(track, lookahead);
        Some(blend(&candidates, &self.raw_weights_of(track)))
    }

    fn current_position(&self) -> Option<Vec3> {
        self.track().map(|t| t.position)
    }

    fn current_velocity(&self) -> Option<Vec3> {
        self.track().map(|t| t.velocity)
    }

    fn last_timestamp(&self) -> Option<f64> {
        self.track().map(|t| t.timestamp)
    }
}
