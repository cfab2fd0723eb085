// pursuit_sim/src/prelude.rs

// Re-export the entire pursuit_core prelude so you can easily access
// pure types like `PredictionService`, `Observation`, `Vec3`, etc.
pub use pursuit_core::prelude::*;

// Re-export common simulation-specific types for easy access.
pub use crate::cli::{Cli, EstimatorChoice};
pub use crate::simulation::config::structs::*;
pub use crate::simulation::config::{discover_scenarios, load_scenario};
pub use crate::simulation::core::prng::SimulationRng;
pub use crate::simulation::core::runner::{run_scenario, ScenarioReport};
pub use crate::simulation::core::truth::TargetTruth;
