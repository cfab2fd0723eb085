// pursuit_core/src/config.rs

//! Tuning parameters for the prediction service.
//!
//! Every struct here deserializes with defaults for missing fields, so a
//! scenario file only needs to spell out what it changes. Values are checked
//! once by `validate`, never mid-computation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::{VerticalAxis, WorldBounds};

// =========================================================================
// == Top-Level Service Configuration ==
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// How far ahead (seconds) the intercept solver looks when deriving the
    /// effective target velocity.
    pub prediction_horizon: f64,
    pub up_axis: VerticalAxis,
    /// Optional clamp applied to returned predictions only.
    pub world_bounds: Option<WorldBounds>,
    pub estimator: EstimatorConfig,
    pub intercept: InterceptConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            prediction_horizon: 1.2,
            up_axis: VerticalAxis::default(),
            world_bounds: None,
            estimator: EstimatorConfig::default(),
            intercept: InterceptConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("prediction_horizon", self.prediction_horizon)?;
        if let Some(bounds) = &self.world_bounds {
            bounds.validate()?;
        }
        self.estimator.validate()?;
        self.intercept.validate()
    }
}

// =========================================================================
// == Estimator Selection ==
// =========================================================================

/// Picks the estimator strategy at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimatorConfig {
    MultiModel(MultiModelConfig),
    ScalarKalman(KalmanConfig),
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig::MultiModel(MultiModelConfig::default())
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            EstimatorConfig::MultiModel(c) => c.validate(),
            EstimatorConfig::ScalarKalman(c) => c.validate(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultiModelConfig {
    /// Upper bound (seconds) on the retrodiction probe interval.
    pub model_memory: f64,
    /// Added to each squared retrodiction error before inverting it.
    pub softening: f64,
    /// Lower bound (seconds) on the retrodiction probe interval.
    pub probe_floor: f64,
    /// Below this speed a velocity sample carries no usable heading.
    pub min_turn_speed: f64,
}

impl Default for MultiModelConfig {
    fn default() -> Self {
        Self {
            model_memory: 0.15,
            softening: 0.01,
            probe_floor: 0.02,
            min_turn_speed: 1e-4,
        }
    }
}

impl MultiModelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("model_memory", self.model_memory)?;
        positive("softening", self.softening)?;
        positive("probe_floor", self.probe_floor)?;
        non_negative("min_turn_speed", self.min_turn_speed)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KalmanConfig {
    /// Per-axis covariance growth added on every predict step.
    pub process_noise: f64,
    /// Per-axis variance of a position measurement.
    pub measurement_noise: f64,
    /// Covariance assigned when tracking starts.
    pub initial_covariance: f64,
    /// Weight in `(0, 1]` given to the freshly measured velocity.
    pub velocity_smoothing: f64,
}

impl Default for KalmanConfig {
    fn default() -> Self {
        Self {
            process_noise: 0.01,
            measurement_noise: 0.1,
            initial_covariance: 1.0,
            velocity_smoothing: 0.5,
        }
    }
}

impl KalmanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Zero process noise lets the covariance decay to zero, after which the
        // gain is zero and measurements are ignored.
        positive("process_noise", self.process_noise)?;
        // A zero measurement noise turns the gain into exactly one and the
        // covariance into zero, freezing the filter on raw samples.
        positive("measurement_noise", self.measurement_noise)?;
        non_negative("initial_covariance", self.initial_covariance)?;
        // Zero smoothing would pin the velocity at its seed value.
        positive("velocity_smoothing", self.velocity_smoothing)?;
        in_range("velocity_smoothing", self.velocity_smoothing, 0.0, 1.0)
    }
}

// =========================================================================
// == Intercept Configuration ==
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterceptConfig {
    /// Cap (seconds) on the lead time of a feasible intercept.
    pub max_lead_time: f64,
    /// Threshold below which the quadratic coefficient counts as zero.
    pub epsilon: f64,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self {
            max_lead_time: 5.0,
            epsilon: 1e-6,
        }
    }
}

impl InterceptConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("intercept.max_lead_time", self.max_lead_time)?;
        positive("intercept.epsilon", self.epsilon)?;
        Ok(())
    }
}

// --- Validation helpers ---

fn finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite(field, value)? >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&finite(field, value)?) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ServiceConfig::default().validate(), Ok(()));
        let kalman = ServiceConfig {
            estimator: EstimatorConfig::ScalarKalman(KalmanConfig::default()),
            ..Default::default()
        };
        assert_eq!(kalman.validate(), Ok(()));
    }

    #[test]
    fn negative_covariance_is_rejected() {
        let config = KalmanConfig {
            initial_covariance: -0.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "initial_covariance",
                value: -0.5
            })
        );
    }

    #[test]
    fn zero_process_noise_and_zero_smoothing_are_rejected() {
        let config = KalmanConfig {
            process_noise: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "process_noise",
                value: 0.0
            })
        );

        let config = KalmanConfig {
            velocity_smoothing: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "velocity_smoothing",
                value: 0.0
            })
        );

        // A zero starting covariance is fine once the process noise grows it.
        let config = KalmanConfig {
            initial_covariance: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_horizon_and_nan_softening_are_rejected() {
        let config = ServiceConfig {
            prediction_horizon: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "prediction_horizon",
                ..
            })
        ));

        let config = MultiModelConfig {
            softening: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "softening",
                ..
            })
        ));
    }

    #[test]
    fn smoothing_outside_unit_interval_is_rejected() {
        let config = KalmanConfig {
            velocity_smoothing: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn nested_errors_surface_from_service_config() {
        let config = ServiceConfig {
            intercept: InterceptConfig {
                max_lead_time: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "intercept.max_lead_time",
                ..
            })
        ));
    }
}
