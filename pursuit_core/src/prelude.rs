// pursuit_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::estimation::{build_estimator, EstimatorKind, TargetEstimator};
pub use crate::models::motion::{MotionModel, MotionModelKind};
pub use crate::service::PredictionService;

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::estimation::TrackState;
pub use crate::math::{VerticalAxis, WorldBounds};
pub use crate::types::{InterceptSolution, Observation, PredictionResult, Vec3};

// --- Configuration & Errors ---
pub use crate::config::{
    EstimatorConfig, InterceptConfig, KalmanConfig, MultiModelConfig, ServiceConfig,
};
pub use crate::error::{ConfigError, TrackingError};

// --- Concrete Implementations (Export common ones for convenience) ---
pub use crate::estimation::{MultiModelEstimator, ScalarKalmanEstimator};
pub use crate::intercept::{solve_intercept, InterceptSolver};
