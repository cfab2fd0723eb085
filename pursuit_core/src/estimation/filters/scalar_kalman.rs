// pursuit_core/src/estimation/filters/scalar_kalman.rs

use crate::config::KalmanConfig;
use crate::estimation::kinematics::KinematicDifferentiator;
use crate::estimation::{EstimatorKind, TargetEstimator};
use crate::types::{Observation, Vec3};

/// One independent scalar filter: position estimate, smoothed velocity and
/// the position variance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisFilter {
    pub position: f64,
    pub velocity: f64,
    pub covariance: f64,
}

impl AxisFilter {
    /// Advances the estimate by `dt` and grows the uncertainty.
    fn predict(&mut self, dt: f64, process_noise: f64) {
        self.position += self.velocity * dt;
        self.covariance += process_noise;
    }

    /// Fuses a position measurement. The gain lies in `[0, 1)` because the
    /// measurement noise is strictly positive.
    fn correct(&mut self, measured: f64, measurement_noise: f64) {
        let innovation = measured - self.position;
        let gain = self.covariance / (self.covariance + measurement_noise);
        self.position += gain * innovation;
        self.covariance *= 1.0 - gain;
    }

    /// Exponential blend toward a freshly measured velocity. Not part of the
    /// Kalman update proper.
    fn smooth_velocity(&mut self, measured: f64, smoothing: f64) {
        self.velocity += smoothing * (measured - self.velocity);
    }
}

/// Per-axis linear Kalman filter over position with a separately smoothed
/// velocity. The three axes never exchange information.
#[derive(Debug, Clone)]
pub struct ScalarKalmanEstimator {
    config: KalmanConfig,
    axes: Option<[AxisFilter; 3]>,
    /// Raw finite differences of the measurements; supplies `dt` and the
    /// measured velocity fed into the smoothing step.
    raw: KinematicDifferentiator,
}

impl ScalarKalmanEstimator {
    pub fn new(config: KalmanConfig) -> Self {
        Self {
            config,
            axes: None,
            raw: KinematicDifferentiator::new(),
        }
    }

    pub fn axes(&self) -> Option<&[AxisFilter; 3]> {
        self.axes.as_ref()
    }

    /// Per-axis position variance.
    pub fn covariance(&self) -> Option<Vec3> {
        self.axes
            .map(|a| Vec3::new(a[0].covariance, a[1].covariance, a[2].covariance))
    }

    /// Latest raw measurement, before filtering.
    pub fn last_measurement(&self) -> Option<Vec3> {
        self.raw.state().map(|s| s.position)
    }
}

impl TargetEstimator for ScalarKalmanEstimator {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::ScalarKalman
    }

    fn update(&mut self, observation: &Observation) -> bool {
        if !self.raw.update(observation) {
            return false;
        }
        let (dt, measured_velocity) = match self.raw.state() {
            Some(raw) => (raw.last_dt(), raw.velocity),
            None => return false,
        };

        match self.axes.as_mut() {
            None => {
                let initial_covariance = self.config.initial_covariance;
                self.axes = Some(std::array::from_fn(|i| AxisFilter {
                    position: observation.position[i],
                    velocity: 0.0,
                    covariance: initial_covariance,
                }));
            }
            Some(axes) => {
                for (i, axis) in axes.iter_mut().enumerate() {
                    axis.predict(dt, self.config.process_noise);
                    axis.correct(observation.position[i], self.config.measurement_noise);
                    axis.smooth_velocity(measured_velocity[i], self.config.velocity_smoothing);
                }
            }
        }
        true
    }

    fn predict(&self, lookahead: f64) -> Option<Vec3> {
        let position = self.current_position()?;
        let velocity = self.current_velocity()?;
        Some(position + velocity * lookahead)
    }

    fn current_position(&self) -> Option<Vec3> {
        self.axes
            .map(|a| Vec3::new(a[0].position, a[1].position, a[2].position))
    }

    fn current_velocity(&self) -> Option<Vec3> {
        self.axes
            .map(|a| Vec3::new(a[0].velocity, a[1].velocity, a[2].velocity))
    }

    fn last_timestamp(&self) -> Option<f64> {
        self.raw.state().map(|s| s.timestamp)
    }
}
