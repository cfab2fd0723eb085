// pursuit_core/src/math.rs

//! Small geometric helpers shared by the motion models, the estimators and
//! the bounds policy. Everything here is pure and allocation-free.

use std::f64::consts::{PI, TAU};

use nalgebra::{Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Vec3;

/// Which world axis points "up". Turn rates are measured about this axis and
/// the remaining two components form the horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAxis {
    /// ENU convention.
    #[default]
    Z,
    /// Y-up convention used by most game engines.
    Y,
}

impl VerticalAxis {
    pub fn unit(self) -> Unit<Vec3> {
        match self {
            VerticalAxis::Z => Vector3::z_axis(),
            VerticalAxis::Y => Vector3::y_axis(),
        }
    }

    /// Indices `(a, b)` of the horizontal plane, ordered so that a positive
    /// rotation about the up axis increases `atan2(v[b], v[a])`.
    pub fn horizontal_indices(self) -> (usize, usize) {
        match self {
            VerticalAxis::Z => (0, 1),
            VerticalAxis::Y => (2, 0),
        }
    }
}

/// Signed difference `to - from`, wrapped into `(-PI, PI]`.
pub fn shortest_angle_delta(from: f64, to: f64) -> f64 {
    let mut delta = (to - from) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta <= -PI {
        delta += TAU;
    }
    delta
}

/// Planar heading of `v` about `up`, in radians.
pub fn heading(v: &Vec3, up: VerticalAxis) -> f64 {
    let (a, b) = up.horizontal_indices();
    v[b].atan2(v[a])
}

/// Rotates `v` about the up axis. The vertical component is preserved.
pub fn rotate_about(v: &Vec3, up: VerticalAxis, angle: f64) -> Vec3 {
    Rotation3::from_axis_angle(&up.unit(), angle) * v
}

/// Axis-aligned limits for returned predictions.
///
/// Only the two horizontal components are ever clamped; the vertical entries
/// of `min`/`max` are validated but otherwise ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldBounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl WorldBounds {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for axis in 0..3 {
            let (min, max) = (self.min[axis], self.max[axis]);
            // Infinite limits are allowed; NaN is not.
            if min.is_nan() {
                return Err(ConfigError::NonFinite {
                    field: "world_bounds.min",
                    value: min,
                });
            }
            if max.is_nan() {
                return Err(ConfigError::NonFinite {
                    field: "world_bounds.max",
                    value: max,
                });
            }
            if min > max {
                return Err(ConfigError::InvertedBounds { axis, min, max });
            }
        }
        Ok(())
    }

    pub fn clamp_horizontal(&self, p: &Vec3, up: VerticalAxis) -> Vec3 {
        let (a, b) = up.horizontal_indices();
        let mut out = *p;
        for i in [a, b] {
            out[i] = p[i].clamp(self.min[i], self.max[i]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-12;

    #[test]
    fn shortest_delta_wraps_across_pi() {
        // From just below +pi to just above -pi is a small positive step.
        let d = shortest_angle_delta(PI - 0.1, -PI + 0.1);
        assert_abs_diff_eq!(d, 0.2, epsilon = 1e-9);

        let d = shortest_angle_delta(-PI + 0.1, PI - 0.1);
        assert_abs_diff_eq!(d, -0.2, epsilon = 1e-9);

        assert_abs_diff_eq!(shortest_angle_delta(0.3, 0.3), 0.0, epsilon = EPS);
        assert_abs_diff_eq!(shortest_angle_delta(0.0, 3.0 * TAU + 0.5), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn rotation_matches_heading_convention() {
        for up in [VerticalAxis::Z, VerticalAxis::Y] {
            let (a, _) = up.horizontal_indices();
            let mut v = Vec3::zeros();
            v[a] = 1.0;
            let rotated = rotate_about(&v, up, FRAC_PI_2);
            assert_abs_diff_eq!(heading(&rotated, up), FRAC_PI_2, epsilon = 1e-9);
            assert_abs_diff_eq!(rotated.norm(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn rotation_preserves_vertical_component() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let r = rotate_about(&v, VerticalAxis::Z, 0.7);
        assert_abs_diff_eq!(r.z, 3.0, epsilon = EPS);
        let r = rotate_about(&v, VerticalAxis::Y, 0.7);
        assert_abs_diff_eq!(r.y, 2.0, epsilon = EPS);
    }

    #[test]
    fn clamp_only_touches_horizontal_plane() {
        let bounds = WorldBounds::new([-10.0, -10.0, -10.0], [10.0, 10.0, 10.0]);
        let p = Vec3::new(25.0, -30.0, 99.0);

        let z_up = bounds.clamp_horizontal(&p, VerticalAxis::Z);
        assert_eq!(z_up, Vec3::new(10.0, -10.0, 99.0));

        let y_up = bounds.clamp_horizontal(&p, VerticalAxis::Y);
        assert_eq!(y_up, Vec3::new(10.0, -30.0, 10.0));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let bounds = WorldBounds::new([0.0, 5.0, 0.0], [1.0, 4.0, 1.0]);
        assert_eq!(
            bounds.validate(),
            Err(ConfigError::InvertedBounds {
                axis: 1,
                min: 5.0,
                max: 4.0
            })
        );
    }
}
