// pursuit_core/src/models/motion.rs

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::math::{rotate_about, VerticalAxis};
use crate::types::Vec3;

/// The kinematic quantities a motion model starts from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
}

/// Names the three forecasting models, e.g. for reporting weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionModelKind {
    ConstantVelocity,
    ConstantAcceleration,
    ConstantTurn,
}

/// Represents a closed-form forecast of where a target will be after `horizon` seconds.
///
/// The same model is used both to forecast from the current state and to score
/// itself by retrodiction from the previous state.
pub trait MotionModel: Debug + Send + Sync {
    /// Position reached after `horizon` seconds when starting from `start`.
    fn extrapolate(&self, start: &Kinematics, horizon: f64) -> Vec3;
}

// --- Constant Velocity Model ---
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstantVelocity;

impl MotionModel for ConstantVelocity {
    fn extrapolate(&self, start: &Kinematics, horizon: f64) -> Vec3 {
        start.position + start.velocity * horizon
    }
}

// --- Constant Acceleration Model ---
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstantAcceleration;

impl MotionModel for ConstantAcceleration {
    fn extrapolate(&self, start: &Kinematics, horizon: f64) -> Vec3 {
        start.position + start.velocity * horizon + start.acceleration * (0.5 * horizon * horizon)
    }
}

// --- Constant Turn Model ---
// The velocity is turned by the full `turn_rate * horizon` first and the
// position is then extrapolated along the turned velocity.
#[derive(Debug, Clone, Copy)]
pub struct ConstantTurn {
    /// Signed turn rate about `up`, rad/s.
    pub turn_rate: f64,
    pub up: VerticalAxis,
}

impl ConstantTurn {
    pub fn new(turn_rate: f64, up: VerticalAxis) -> Self {
        Self { turn_rate, up }
    }
}

impl MotionModel for ConstantTurn {
    fn extrapolate(&self, start: &Kinematics, horizon: f64) -> Vec3 {
        let turned = rotate_about(&start.velocity, self.up, self.turn_rate * horizon);
        start.position + turned * horizon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn start() -> Kinematics {
        Kinematics {
            position: Vec3::new(1.0, 2.0, 0.5),
            velocity: Vec3::new(2.0, 0.0, 0.0),
            acceleration: Vec3::new(0.0, 4.0, 0.0),
        }
    }

    #[test]
    fn constant_velocity_ignores_acceleration() {
        let p = ConstantVelocity.extrapolate(&start(), 1.5);
        assert_eq!(p, Vec3::new(4.0, 2.0, 0.5));
    }

    #[test]
    fn constant_acceleration_adds_half_a_t_squared() {
        let p = ConstantAcceleration.extrapolate(&start(), 1.5);
        assert_abs_diff_eq!(p.x, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.0 + 0.5 * 4.0 * 2.25, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn zero_turn_rate_matches_constant_velocity() {
        let ct = ConstantTurn::new(0.0, VerticalAxis::Z);
        let cv = ConstantVelocity.extrapolate(&start(), 0.8);
        let p = ct.extrapolate(&start(), 0.8);
        assert_abs_diff_eq!((p - cv).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn quarter_turn_swings_velocity_onto_the_other_axis() {
        // pi/2 rad/s for 1 s turns +x into +y (Z up).
        let ct = ConstantTurn::new(FRAC_PI_2, VerticalAxis::Z);
        let p = ct.extrapolate(&start(), 1.0);
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, 0.5, epsilon = 1e-12);
    }
}
