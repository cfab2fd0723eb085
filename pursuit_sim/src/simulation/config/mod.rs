// pursuit_sim/src/simulation/config/mod.rs

//! This module handles loading and validating scenario configuration from
//! disk, including discovery of every scenario in a directory tree.

mod catalog;

pub mod structs;

use std::path::Path;

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use tracing::info;

pub use catalog::discover_scenarios;
pub use structs::{FollowerConfig, ManeuverSegment, ScenarioConfig, TargetScript};

/// Environment variables with this prefix override scenario values,
/// e.g. `PURSUIT_FOLLOWER__SPEED=7.5`.
pub const ENV_PREFIX: &str = "PURSUIT_";

/// Loads a scenario: struct defaults, then the TOML file, then environment
/// overrides. The result is validated before it is returned.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    info!("Loading scenario from: {}", path.display());

    let mut config: ScenarioConfig = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .with_context(|| format!("failed to load scenario file at {}", path.display()))?;

    if config.name.is_empty() {
        config.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scenario".to_owned());
    }

    config
        .validate()
        .with_context(|| format!("invalid scenario '{}'", config.name))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn file_values_and_env_overrides_are_layered() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "sprint.toml",
                r#"
                    seed = 11

                    [[target.segments]]
                    maneuver = "accelerate"
                    duration = 3.0
                    acceleration = [2.0, 0.0, 0.0]

                    [follower]
                    speed = 4.0
                "#,
            )?;
            jail.set_env("PURSUIT_FOLLOWER__SPEED", "9.5");

            let config = load_scenario(Path::new("sprint.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.name, "sprint");
            assert_eq!(config.seed, Some(11));
            assert_eq!(config.follower.speed, 9.5);
            // Untouched sections keep their defaults.
            assert_eq!(config.step, 0.02);
            assert_eq!(config.target.segments.len(), 1);
            Ok(())
        });
    }

    #[test]
    fn invalid_values_are_reported_with_the_scenario_name() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "broken.toml",
                r#"
                    name = "broken"
                    step = -1.0
                "#,
            )?;
            let err = load_scenario(Path::new("broken.toml")).unwrap_err();
            assert!(format!("{err:#}").contains("broken"));
            Ok(())
        });
    }
}
