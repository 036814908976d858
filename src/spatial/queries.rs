//! Query contracts between the simulation core and its spatial providers
//!
//! The steering and perception code never scans the world directly; it is
//! handed these narrow interfaces so the indexing strategy behind them
//! (brute force, sparse hash, anything else) stays swappable.

use glam::Vec3;

use crate::core::types::AgentId;

/// One agent's position and heading as they stood at the start of the tick
///
/// All perception in a tick reads from a snapshot built before any agent
/// integrates, so nobody sees a neighbor that has already moved.
#[derive(Debug, Clone, Copy)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub position: Vec3,
    pub heading: Vec3,
}

/// Per-tick neighbor statistics for one agent
///
/// `count == 0` means the vectors are all zero; callers skip the flocking
/// terms entirely rather than dividing by zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborAggregate {
    /// Number of other agents within the perception radius
    pub count: usize,
    /// Mean heading of those agents
    pub avg_heading: Vec3,
    /// Mean position of those agents
    pub avg_center: Vec3,
    /// Mean away-from-crowding direction, weighted by inverse square distance
    pub avg_avoidance: Vec3,
}

impl NeighborAggregate {
    pub const EMPTY: Self = Self {
        count: 0,
        avg_heading: Vec3::ZERO,
        avg_center: Vec3::ZERO,
        avg_avoidance: Vec3::ZERO,
    };
}

/// Neighbor statistics provider consumed by the boid steering engine
pub trait NeighborQuery {
    /// Aggregate over all other live agents within `perception_radius` of
    /// `position`; agents inside `avoidance_radius` additionally feed the
    /// avoidance direction. Zero neighbors yields the empty aggregate.
    fn aggregate(
        &self,
        agent: AgentId,
        position: Vec3,
        perception_radius: f32,
        avoidance_radius: f32,
    ) -> NeighborAggregate;
}

/// Accumulate one candidate neighbor into running sums
///
/// Shared by every provider so brute force and the sparse grid agree
/// exactly on the aggregation rule.
pub(crate) fn accumulate_neighbor(
    position: Vec3,
    other: &AgentSnapshot,
    perception_radius: f32,
    avoidance_radius: f32,
    count: &mut usize,
    heading_sum: &mut Vec3,
    center_sum: &mut Vec3,
    avoidance_sum: &mut Vec3,
) {
    let offset = other.position - position;
    let dist_sq = offset.length_squared();
    if dist_sq > perception_radius * perception_radius {
        return;
    }

    *count += 1;
    *heading_sum += other.heading;
    *center_sum += other.position;

    if dist_sq < avoidance_radius * avoidance_radius && dist_sq > f32::EPSILON {
        // Push away from the neighbor, harder the closer it is
        *avoidance_sum -= offset / dist_sq;
    }
}

pub(crate) fn finish_aggregate(
    count: usize,
    heading_sum: Vec3,
    center_sum: Vec3,
    avoidance_sum: Vec3,
) -> NeighborAggregate {
    if count == 0 {
        return NeighborAggregate::EMPTY;
    }
    let n = count as f32;
    NeighborAggregate {
        count,
        avg_heading: heading_sum / n,
        avg_center: center_sum / n,
        avg_avoidance: avoidance_sum / n,
    }
}

/// Linear-scan provider over a tick snapshot
///
/// The reference implementation; the sparse grid must produce identical
/// aggregates.
pub struct BruteForceQuery<'a> {
    agents: &'a [AgentSnapshot],
}

impl<'a> BruteForceQuery<'a> {
    pub fn new(agents: &'a [AgentSnapshot]) -> Self {
        Self { agents }
    }
}

impl NeighborQuery for BruteForceQuery<'_> {
    fn aggregate(
        &self,
        agent: AgentId,
        position: Vec3,
        perception_radius: f32,
        avoidance_radius: f32,
    ) -> NeighborAggregate {
        let mut count = 0;
        let mut heading_sum = Vec3::ZERO;
        let mut center_sum = Vec3::ZERO;
        let mut avoidance_sum = Vec3::ZERO;

        for other in self.agents {
            if other.id == agent {
                continue;
            }
            accumulate_neighbor(
                position,
                other,
                perception_radius,
                avoidance_radius,
                &mut count,
                &mut heading_sum,
                &mut center_sum,
                &mut avoidance_sum,
            );
        }

        finish_aggregate(count, heading_sum, center_sum, avoidance_sum)
    }
}

/// A static spherical obstacle
#[derive(Debug, Clone, Copy)]
pub struct SphereObstacle {
    pub center: Vec3,
    pub radius: f32,
}

/// Swept-sphere obstacle test consumed by the boid steering engine
pub trait ObstacleQuery {
    /// Does a sphere of `radius` swept from `origin` along `dir` for
    /// `max_dist` units hit any obstacle?
    fn sweep_blocked(&self, origin: Vec3, radius: f32, dir: Vec3, max_dist: f32) -> bool;
}

/// Collection of spherical obstacles
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<SphereObstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, center: Vec3, radius: f32) {
        self.obstacles.push(SphereObstacle { center, radius });
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl ObstacleQuery for ObstacleField {
    fn sweep_blocked(&self, origin: Vec3, radius: f32, dir: Vec3, max_dist: f32) -> bool {
        self.obstacles.iter().any(|obstacle| {
            // Closest point on the swept segment to the obstacle center
            let t = (obstacle.center - origin).dot(dir).clamp(0.0, max_dist);
            let closest = origin + dir * t;
            let hit_dist = radius + obstacle.radius;
            closest.distance_squared(obstacle.center) < hit_dist * hit_dist
        })
    }
}
