//! Flock agent state and per-tick integration

use glam::Vec3;

use crate::core::config::{BoidConfig, WorldConfig};
use crate::core::math::{normalize_or, project_into_sphere, DEFAULT_HEADING};
use crate::core::types::AgentId;

/// One schooling agent
///
/// Heading is always the normalized velocity direction; it is never
/// smoothed independently. Neighbor statistics are not stored here - they
/// are recomputed from the tick snapshot and consumed immediately.
#[derive(Debug, Clone)]
pub struct Boid {
    pub id: AgentId,
    pub position: Vec3,
    pub heading: Vec3,
    pub velocity: Vec3,
}

impl Boid {
    /// Create an agent with a seeded initial heading and speed
    pub fn new(position: Vec3, heading: Vec3, speed: f32) -> Self {
        let heading = normalize_or(heading, DEFAULT_HEADING);
        Self {
            id: AgentId::new(),
            position,
            heading,
            velocity: heading * speed,
        }
    }

    /// Current speed
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Apply one tick of accumulated steering acceleration
    ///
    /// Velocity integrates, speed is re-clamped into the configured band
    /// and reapplied along the normalized direction, position integrates,
    /// and finally the position is projected back into the boundary sphere
    /// as a backstop against multi-force overshoot.
    pub fn integrate(&mut self, accel: Vec3, dt: f32, boid: &BoidConfig, world: &WorldConfig) {
        let velocity = self.velocity + accel * dt;
        let speed = velocity.length();
        let dir = if speed > f32::EPSILON {
            velocity / speed
        } else {
            self.heading
        };
        let speed = speed.clamp(boid.speed_min, boid.speed_max);

        self.velocity = dir * speed;
        self.heading = dir;
        self.position = project_into_sphere(self.position + self.velocity * dt, world.boundary_radius);
    }
}
