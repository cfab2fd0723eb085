// pursuit_sim/src/lib.rs

use anyhow::{bail, Result};
use tracing::{error, info};

use crate::cli::Cli;
use crate::simulation::config::{discover_scenarios, load_scenario, ScenarioConfig};
use crate::simulation::core::runner::run_scenario;

// This prelude is for convenience for other files WITHIN the pursuit_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;

/// Runs whatever the command line asks for. Every scenario is attempted even
/// if an earlier one fails; the failures are reported together at the end.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.print_default {
        println!("{}", default_scenario_toml()?);
        return Ok(());
    }

    let paths = match &cli.scenario_dir {
        Some(dir) => discover_scenarios(dir),
        None => vec![cli.scenario.clone()],
    };
    if paths.is_empty() {
        bail!("no scenarios to run");
    }

    let mut failures = 0usize;
    for path in &paths {
        let outcome = load_scenario(path).and_then(|mut scenario| {
            cli.apply_overrides(&mut scenario);
            run_scenario(&scenario)
        });
        match outcome {
            Ok(report) => info!("{report}"),
            Err(e) => {
                error!("{:#}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} scenario(s) failed", paths.len());
    }
    Ok(())
}

/// The default scenario rendered as TOML, a starting point for new files.
pub fn default_scenario_toml() -> Result<String> {
    Ok(toml::to_string_pretty(&ScenarioConfig::default())?)
}
