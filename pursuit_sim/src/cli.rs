use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use pursuit_core::config::{EstimatorConfig, KalmanConfig, MultiModelConfig};

use crate::simulation::config::ScenarioConfig;

/// Pursuit: headless scenario runner for the predictive targeting engine.
///
/// This struct defines the command-line arguments accepted by the
/// `pursuit-sim` binary.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(
        short,
        long,
        default_value = "assets/scenarios/00_straight_run.toml"
    )]
    pub scenario: PathBuf,

    /// Run every `*.toml` scenario found below this directory instead.
    #[arg(long, conflicts_with = "scenario")]
    pub scenario_dir: Option<PathBuf>,

    /// Replace the estimator named in the scenario file.
    #[arg(long, value_enum)]
    pub estimator: Option<EstimatorChoice>,

    /// Print the default scenario as TOML and exit.
    #[arg(long, default_value_t = false)]
    pub print_default: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorChoice {
    MultiModel,
    ScalarKalman,
}

impl Cli {
    /// Applies command-line overrides on top of a loaded scenario. An
    /// override naming the estimator already configured keeps its tuning.
    pub fn apply_overrides(&self, scenario: &mut ScenarioConfig) {
        let Some(choice) = self.estimator else {
            return;
        };
        let estimator = &mut scenario.service.estimator;
        match (choice, &*estimator) {
            (EstimatorChoice::MultiModel, EstimatorConfig::MultiModel(_))
            | (EstimatorChoice::ScalarKalman, EstimatorConfig::ScalarKalman(_)) => {}
            (EstimatorChoice::MultiModel, _) => {
                *estimator = EstimatorConfig::MultiModel(MultiModelConfig::default())
            }
            (EstimatorChoice::ScalarKalman, _) => {
                *estimator = EstimatorConfig::ScalarKalman(KalmanConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimator_override_swaps_the_variant() {
        let cli = Cli::parse_from(["pursuit-sim", "--estimator", "scalar-kalman"]);
        let mut scenario = ScenarioConfig::default();
        cli.apply_overrides(&mut scenario);
        assert!(matches!(
            scenario.service.estimator,
            EstimatorConfig::ScalarKalman(_)
        ));
    }

    #[test]
    fn matching_override_keeps_custom_tuning() {
        let cli = Cli::parse_from(["pursuit-sim", "--estimator", "multi-model"]);
        let tuned = MultiModelConfig {
            softening: 0.5,
            ..Default::default()
        };
        let mut scenario = ScenarioConfig::default();
        scenario.service.estimator = EstimatorConfig::MultiModel(tuned);
        cli.apply_overrides(&mut scenario);
        assert_eq!(scenario.service.estimator, EstimatorConfig::MultiModel(tuned));
    }

    #[test]
    fn scenario_and_directory_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "pursuit-sim",
            "--scenario",
            "a.toml",
            "--scenario-dir",
            "assets",
        ]);
        assert!(result.is_err());
    }
}
