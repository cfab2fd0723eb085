// pursuit_sim/src/simulation/config/structs.rs

use anyhow::{bail, ensure, Result};
use pursuit_core::config::ServiceConfig;
use serde::{Deserialize, Serialize};

// =========================================================================
// == Top-Level Scenario Configuration ==
// =========================================================================

/// # ScenarioConfig
/// The root of the data parsed from a `scenario.toml` file. Every section is
/// optional; missing values fall back to `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    /// Display name. Filled from the file stem when left empty.
    pub name: String,
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Fixed simulation step in seconds; one observation per step.
    pub step: f64,
    /// Standard deviation of the Gaussian noise added to every position sample.
    pub noise_stddev: f64,
    pub target: TargetScript,
    pub follower: FollowerConfig,
    /// Passed straight through to the prediction service.
    pub service: ServiceConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            seed: None,
            step: 0.02,
            noise_stddev: 0.0,
            target: TargetScript::default(),
            follower: FollowerConfig::default(),
            service: ServiceConfig::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.step.is_finite() && self.step > 0.0,
            "`step` must be a positive number of seconds, got {}",
            self.step
        );
        ensure!(
            self.noise_stddev.is_finite() && self.noise_stddev >= 0.0,
            "`noise_stddev` must be finite and non-negative, got {}",
            self.noise_stddev
        );
        ensure!(
            self.follower.speed.is_finite() && self.follower.speed >= 0.0,
            "`follower.speed` must be finite and non-negative, got {}",
            self.follower.speed
        );
        if self.target.segments.is_empty() {
            bail!("`target.segments` must contain at least one maneuver");
        }
        for (i, segment) in self.target.segments.iter().enumerate() {
            let duration = segment.duration();
            ensure!(
                duration.is_finite() && duration > 0.0,
                "segment {i}: duration must be positive, got {duration}"
            );
        }
        self.service.validate()?;
        Ok(())
    }
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in a scenario.toml file.
// =========================================================================

/// Scripted ground-truth motion of the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetScript {
    pub start: [f64; 3],
    pub initial_velocity: [f64; 3],
    /// Played back in order. The `[[target.segments]]` array in TOML.
    pub segments: Vec<ManeuverSegment>,
}

impl Default for TargetScript {
    fn default() -> Self {
        Self {
            start: [0.0, 20.0, 0.0],
            initial_velocity: [4.0, 0.0, 0.0],
            segments: vec![
                ManeuverSegment::Straight { duration: 2.0 },
                ManeuverSegment::Turn {
                    duration: 3.0,
                    turn_rate: 0.6,
                },
                ManeuverSegment::Accelerate {
                    duration: 2.0,
                    acceleration: [1.0, 0.0, 0.0],
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "maneuver", rename_all = "snake_case")]
pub enum ManeuverSegment {
    /// Hold the current velocity.
    Straight { duration: f64 },
    /// Constant world-frame acceleration.
    Accelerate { duration: f64, acceleration: [f64; 3] },
    /// Constant-speed turn about the up axis, rad/s (positive is counter-clockwise).
    Turn { duration: f64, turn_rate: f64 },
}

impl ManeuverSegment {
    pub fn duration(&self) -> f64 {
        match self {
            ManeuverSegment::Straight { duration }
            | ManeuverSegment::Accelerate { duration, .. }
            | ManeuverSegment::Turn { duration, .. } => *duration,
        }
    }
}

/// A minimal pursuer that heads for the current intercept point every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FollowerConfig {
    pub position: [f64; 3],
    /// Units per second.
    pub speed: f64,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            speed: 6.0,
        }
    }
}
