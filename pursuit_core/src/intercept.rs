// pursuit_core/src/intercept.rs

//! Closed-form pursuit: where should a constant-speed follower head so that it
//! meets a target moving with constant velocity?
//!
//! With `r = target - follower`, the follower reaches the target after `tau`
//! seconds when
//!
//! ```text
//! (|v|^2 - s^2) tau^2 + 2 (r . v) tau + |r|^2 = 0
//! ```
//!
//! and the smallest strictly positive root is the earliest meeting.

use tracing::debug;

use crate::config::InterceptConfig;
use crate::types::{InterceptSolution, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptSolver {
    /// Cap on a feasible lead time, seconds.
    pub max_lead_time: f64,
    /// Threshold below which a coefficient counts as zero.
    pub epsilon: f64,
}

impl Default for InterceptSolver {
    fn default() -> Self {
        Self::from(InterceptConfig::default())
    }
}

impl From<InterceptConfig> for InterceptSolver {
    fn from(config: InterceptConfig) -> Self {
        Self {
            max_lead_time: config.max_lead_time,
            epsilon: config.epsilon,
        }
    }
}

impl InterceptSolver {
    /// Earliest meeting time, unclamped. `None` when the follower can never
    /// reach the target.
    pub fn intercept_time(
        &self,
        follower_position: &Vec3,
        target_position: &Vec3,
        target_velocity: &Vec3,
        follower_speed: f64,
    ) -> Option<f64> {
        let relative = target_position - follower_position;
        let a = target_velocity.norm_squared() - follower_speed * follower_speed;
        let b = 2.0 * relative.dot(target_velocity);
        let c = relative.norm_squared();

        // Already on top of the target.
        if c <= self.epsilon {
            return Some(0.0);
        }

        if a.abs() < self.epsilon {
            // Matched speeds: b tau + c = 0.
            if b.abs() <= self.epsilon {
                return None;
            }
            let tau = -c / b;
            return (tau > 0.0).then_some(tau);
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        [(-b + sqrt_d) / (2.0 * a), (-b - sqrt_d) / (2.0 * a)]
            .into_iter()
            .filter(|t| *t > 0.0)
            .min_by(f64::total_cmp)
    }

    /// Solves the pursuit for a target at `target_position` moving with
    /// `target_velocity`. The lead time is capped at `max_lead_time`.
    ///
    /// When no intercept exists the returned `point` is the target's current
    /// position; callers with a better aim point should substitute it.
    pub fn solve(
        &self,
        follower_position: &Vec3,
        target_position: &Vec3,
        target_velocity: &Vec3,
        follower_speed: f64,
    ) -> InterceptSolution {
        match self.intercept_time(
            follower_position,
            target_position,
            target_velocity,
            follower_speed,
        ) {
            Some(tau) => {
                let tau = tau.min(self.max_lead_time);
                InterceptSolution::reachable(target_position + target_velocity * tau, tau)
            }
            None => {
                debug!(
                    follower_speed,
                    target_speed = target_velocity.norm(),
                    "No intercept exists for this follower."
                );
                InterceptSolution::unreachable(*target_position)
            }
        }
    }
}

/// One-shot form of [`InterceptSolver::solve`] with the default epsilon.
pub fn solve_intercept(
    follower_position: &Vec3,
    target_position: &Vec3,
    target_velocity: &Vec3,
    follower_speed: f64,
    max_lead_time: f64,
) -> InterceptSolution {
    InterceptSolver {
        max_lead_time,
        ..Default::default()
    }
    .solve(
        follower_position,
        target_position,
        target_velocity,
        follower_speed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn tail_chase_along_the_x_axis() {
        // Gap of 5 closing at 1 unit/s.
        let s = solve_intercept(
            &Vec3::new(-5.0, 0.0, 0.0),
            &Vec3::zeros(),
            &Vec3::new(1.0, 0.0, 0.0),
            2.0,
            10.0,
        );
        assert!(s.feasible);
        assert_abs_diff_eq!(s.time_to_intercept.unwrap(), 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.point, Vec3::new(5.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn head_on_closes_at_the_combined_speed() {
        // -3 tau^2 - 10 tau + 25 = 0 has its positive root at 5/3.
        let s = solve_intercept(
            &Vec3::new(5.0, 0.0, 0.0),
            &Vec3::zeros(),
            &Vec3::new(1.0, 0.0, 0.0),
            2.0,
            5.0,
        );
        assert!(s.feasible);
        let tau = s.time_to_intercept.unwrap();
        assert_abs_diff_eq!(tau, 5.0 / 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.point, Vec3::new(5.0 / 3.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn faster_follower_always_meets_the_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let solver = InterceptSolver {
            max_lead_time: f64::INFINITY,
            ..Default::default()
        };
        for _ in 0..1_000 {
            let p = Vec3::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0), 0.0);
            let q = Vec3::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0), 0.0);
            let v = Vec3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-1.0..1.0),
            );
            let s = v.norm() + rng.gen_range(0.1..10.0);

            let solution = solver.solve(&q, &p, &v, s);
            assert!(solution.feasible);
            let tau = solution.time_to_intercept.unwrap();
            assert!(tau >= 0.0);
            let travelled = (p + v * tau - q).norm();
            assert_abs_diff_eq!(travelled, s * tau, epsilon = 1e-6 * (1.0 + s * tau));
        }
    }

    #[test]
    fn fleeing_target_outruns_a_slow_follower() {
        // Target moves straight away at 3, follower manages only 2.
        let s = solve_intercept(
            &Vec3::zeros(),
            &Vec3::new(10.0, 0.0, 0.0),
            &Vec3::new(3.0, 0.0, 0.0),
            2.0,
            5.0,
        );
        assert!(!s.feasible);
        assert_eq!(s.time_to_intercept, None);
        assert_eq!(s.point, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn crossing_target_can_be_caught_by_a_slower_follower() {
        // Target approaches before passing by, so the slower follower can meet it.
        let s = solve_intercept(
            &Vec3::zeros(),
            &Vec3::new(10.0, 1.0, 0.0),
            &Vec3::new(-3.0, 0.0, 0.0),
            2.0,
            5.0,
        );
        assert!(s.feasible);
        let tau = s.time_to_intercept.unwrap();
        let meet = Vec3::new(10.0, 1.0, 0.0) + Vec3::new(-3.0, 0.0, 0.0) * tau;
        assert_abs_diff_eq!(meet.norm(), 2.0 * tau, epsilon = 1e-9);
    }

    #[test]
    fn matched_speed_uses_the_linear_equation() {
        // |v| == s, head-on: gap 10 closing at 2, so -20 tau + 100 = 0.
        let s = solve_intercept(
            &Vec3::zeros(),
            &Vec3::new(10.0, 0.0, 0.0),
            &Vec3::new(-1.0, 0.0, 0.0),
            1.0,
            60.0,
        );
        assert!(s.feasible);
        assert_abs_diff_eq!(s.time_to_intercept.unwrap(), 5.0, epsilon = 1e-9);

        // Same speed, moving away: never.
        let s = solve_intercept(
            &Vec3::zeros(),
            &Vec3::new(10.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, 0.0),
            1.0,
            60.0,
        );
        assert!(!s.feasible);
    }

    #[test]
    fn lead_time_is_capped() {
        // Nearly matched speeds put the true meeting far in the future.
        let s = solve_intercept(
            &Vec3::new(-100.0, 0.0, 0.0),
            &Vec3::zeros(),
            &Vec3::new(1.0, 0.0, 0.0),
            1.1,
            5.0,
        );
        assert!(s.feasible);
        assert_eq!(s.time_to_intercept, Some(5.0));
        assert_abs_diff_eq!(s.point, Vec3::new(5.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn coincident_start_is_an_immediate_intercept() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let s = solve_intercept(&p, &p, &Vec3::new(4.0, 0.0, 0.0), 1.0, 5.0);
        assert!(s.feasible);
        assert_eq!(s.time_to_intercept, Some(0.0));
        assert_eq!(s.point, p);
    }

    #[test]
    fn stationary_follower_cannot_catch_a_moving_target() {
        let s = solve_intercept(
            &Vec3::zeros(),
            &Vec3::new(3.0, 4.0, 0.0),
            &Vec3::new(0.0, 1.0, 0.0),
            0.0,
            5.0,
        );
        assert!(!s.feasible);
    }
}
