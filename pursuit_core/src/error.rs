// pursuit_core/src/error.rs

use thiserror::Error;

/// Raised while validating configuration, before any estimator is built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("`{field}` must be strictly positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("`{field}` must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("world bounds axis {axis}: min {min} is greater than max {max}")]
    InvertedBounds { axis: usize, min: f64, max: f64 },
}

/// Errors a caller can get back from the prediction service.
/// Numeric degeneracies never end up here; they are absorbed as fallbacks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackingError {
    #[error("no observation has been received for this target yet")]
    NotTracking,

    #[error("observation has non-finite values (position {position:?}, timestamp {timestamp})")]
    NonFiniteObservation { position: [f64; 3], timestamp: f64 },

    #[error("follower position contains non-finite values: {0:?}")]
    NonFiniteFollower([f64; 3]),

    #[error("follower speed must be finite and non-negative, got {0}")]
    InvalidFollowerSpeed(f64),

    #[error("lookahead must be a finite number of seconds, got {0}")]
    NonFiniteLookahead(f64),
}
