// pursuit_sim/src/simulation/core/truth.rs

use pursuit_core::math::VerticalAxis;
use pursuit_core::types::Vec3;

use crate::simulation::config::{ManeuverSegment, TargetScript};

/// Below this turn rate (rad/s) a turn segment is integrated as a straight line.
const MIN_TURN_RATE: f64 = 1e-9;

/// Slack when deciding a segment has been played to its end.
const SEGMENT_EPSILON: f64 = 1e-9;

/// Ground-truth target motion. Plays a `TargetScript` back exactly: every
/// maneuver has a closed-form solution, so the result does not depend on the
/// step size used to advance it.
#[derive(Debug, Clone)]
pub struct TargetTruth {
    segments: Vec<ManeuverSegment>,
    up: VerticalAxis,
    position: Vec3,
    velocity: Vec3,
    time: f64,
    segment: usize,
    segment_elapsed: f64,
}

impl TargetTruth {
    pub fn new(script: &TargetScript, up: VerticalAxis) -> Self {
        Self {
            segments: script.segments.clone(),
            up,
            position: Vec3::from(script.start),
            velocity: Vec3::from(script.initial_velocity),
            time: 0.0,
            segment: 0,
            segment_elapsed: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(ManeuverSegment::duration).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.segment >= self.segments.len()
    }

    /// Moves the target `dt` seconds along the script, crossing segment
    /// boundaries as needed. Once the script is exhausted the target holds
    /// its last velocity.
    pub fn advance(&mut self, dt: f64) {
        let mut remaining = dt;
        while remaining > 0.0 {
            let Some(segment) = self.segments.get(self.segment).cloned() else {
                self.integrate(&ManeuverSegment::Straight { duration: remaining }, remaining);
                break;
            };
            let chunk = remaining.min(segment.duration() - self.segment_elapsed);
            self.integrate(&segment, chunk);
            self.segment_elapsed += chunk;
            remaining -= chunk;
            if self.segment_elapsed >= segment.duration() - SEGMENT_EPSILON {
                self.segment += 1;
                self.segment_elapsed = 0.0;
            }
        }
    }

    fn integrate(&mut self, segment: &ManeuverSegment, dt: f64) {
        match segment {
            ManeuverSegment::Straight { .. } => {
                self.position += self.velocity * dt;
            }
            ManeuverSegment::Accelerate { acceleration, .. } => {
                let a = Vec3::from(*acceleration);
                self.position += self.velocity * dt + a * (0.5 * dt * dt);
                self.velocity += a * dt;
            }
            ManeuverSegment::Turn { turn_rate, .. } => {
                if turn_rate.abs() < MIN_TURN_RATE {
                    self.position += self.velocity * dt;
                } else {
                    let up = self.up.unit().into_inner();
                    let vertical = up * up.dot(&self.velocity);
                    let horizontal = self.velocity - vertical;
                    let theta = turn_rate * dt;
                    // Integral of the rotating horizontal velocity over the chunk.
                    self.position += horizontal * (theta.sin() / turn_rate)
                        + up.cross(&horizontal) * ((1.0 - theta.cos()) / turn_rate)
                        + vertical * dt;
                    self.velocity = horizontal * theta.cos()
                        + up.cross(&horizontal) * theta.sin()
                        + vertical;
                }
            }
        }
        self.time += dt;
    }
}
