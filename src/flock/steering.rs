//! Boid steering engine
//!
//! Accumulates one acceleration per tick from boundary containment,
//! predator flee, the three flocking terms, and obstacle avoidance. Every
//! term except the hard boundary correction passes through the shared
//! steer-towards primitive, so no single term can exceed the steering cap
//! before weighting.

use std::sync::OnceLock;

use glam::{Quat, Vec3};

use crate::core::config::{BoidConfig, WorldConfig};
use crate::core::math::{normalize_or, steer_towards};
use crate::flock::boid::Boid;
use crate::flock::constants::{
    BOUNDARY_HARD_FORCE_CAP, BOUNDARY_HARD_FORCE_MULT, BOUNDARY_SOFT_MARGIN,
    BOUNDARY_SOFT_WEIGHT_MAX, BOUNDARY_SOFT_WEIGHT_MIN, FLEE_RADIUS, FLEE_WEIGHT,
    OBSTACLE_PROBE_COUNT,
};
use crate::spatial::queries::{NeighborAggregate, ObstacleQuery};

/// Accumulate the full steering acceleration for one agent
///
/// All inputs reflect the start-of-tick snapshot; the caller integrates
/// the result afterwards.
pub fn steering_acceleration(
    boid: &Boid,
    neighbors: &NeighborAggregate,
    obstacles: &dyn ObstacleQuery,
    predator_position: Option<Vec3>,
    cfg: &BoidConfig,
    world: &WorldConfig,
) -> Vec3 {
    let mut accel = containment(boid, cfg, world);

    if let Some(predator) = predator_position {
        if boid.position.distance(predator) < FLEE_RADIUS {
            let away = boid.position - predator;
            accel += steer(boid, away, cfg) * FLEE_WEIGHT;
        }
    }

    if neighbors.count > 0 {
        accel += steer(boid, neighbors.avg_heading, cfg) * cfg.align_weight;
        accel += steer(boid, neighbors.avg_center - boid.position, cfg) * cfg.cohesion_weight;
        accel += steer(boid, neighbors.avg_avoidance, cfg) * cfg.separation_weight;
    }

    if obstacles.sweep_blocked(
        boid.position,
        cfg.bounding_radius,
        boid.heading,
        cfg.obstacle_lookahead,
    ) {
        let clear = first_clear_direction(boid, obstacles, cfg);
        accel += steer(boid, clear, cfg) * cfg.obstacle_avoid_weight;
    }

    accel
}

/// Layered boundary containment
///
/// Inside the soft margin: nothing. In the soft band: steer-to-center with
/// a weight ramping 10 -> 25 across the band. Beyond the boundary: a raw
/// corrective acceleration toward the center that intentionally exceeds
/// the steering cap.
fn containment(boid: &Boid, cfg: &BoidConfig, world: &WorldConfig) -> Vec3 {
    let radius = world.boundary_radius;
    let margin = BOUNDARY_SOFT_MARGIN * radius;
    let dist = boid.position.length();

    if dist > radius {
        let to_center = normalize_or(-boid.position, boid.heading);
        let magnitude =
            (BOUNDARY_HARD_FORCE_MULT * cfg.max_steer_force).min(BOUNDARY_HARD_FORCE_CAP);
        return to_center * magnitude;
    }

    if dist > margin {
        let t = (dist - margin) / (radius - margin);
        let weight = BOUNDARY_SOFT_WEIGHT_MIN + t * (BOUNDARY_SOFT_WEIGHT_MAX - BOUNDARY_SOFT_WEIGHT_MIN);
        return steer(boid, -boid.position, cfg) * weight;
    }

    Vec3::ZERO
}

#[inline]
fn steer(boid: &Boid, desired: Vec3, cfg: &BoidConfig) -> Vec3 {
    steer_towards(
        desired,
        boid.velocity,
        boid.heading,
        cfg.speed_max,
        cfg.max_steer_force,
    )
}

/// First probe direction whose sweep is clear, or the current heading when
/// every probe is blocked (the agent keeps going rather than stalling)
fn first_clear_direction(boid: &Boid, obstacles: &dyn ObstacleQuery, cfg: &BoidConfig) -> Vec3 {
    let frame = Quat::from_rotation_arc(Vec3::Z, boid.heading);
    for local in probe_directions() {
        let dir = frame * *local;
        if !obstacles.sweep_blocked(boid.position, cfg.bounding_radius, dir, cfg.obstacle_lookahead)
        {
            return dir;
        }
    }
    boid.heading
}

/// Fixed ordered probe fan: a golden-spiral point set over the unit
/// sphere, ordered front (+Z in the local frame) to back, so the first
/// clear direction is always the one closest to the current heading.
fn probe_directions() -> &'static [Vec3] {
    static DIRECTIONS: OnceLock<Vec<Vec3>> = OnceLock::new();
    DIRECTIONS.get_or_init(|| {
        let golden_ratio = (1.0 + 5.0f32.sqrt()) / 2.0;
        let angle_increment = std::f32::consts::TAU * golden_ratio;

        (0..OBSTACLE_PROBE_COUNT)
            .map(|i| {
                let t = i as f32 / OBSTACLE_PROBE_COUNT as f32;
                let inclination = (1.0 - 2.0 * t).acos();
                let azimuth = angle_increment * i as f32;
                Vec3::new(
                    inclination.sin() * azimuth.cos(),
                    inclination.sin() * azimuth.sin(),
                    inclination.cos(),
                )
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::queries::ObstacleField;

    fn configs() -> (BoidConfig, WorldConfig) {
        (BoidConfig::default(), WorldConfig::default())
    }

    fn no_obstacles() -> ObstacleField {
        ObstacleField::new()
    }

    #[test]
    fn test_probe_directions_front_to_back() {
        let dirs = probe_directions();
        assert_eq!(dirs.len(), OBSTACLE_PROBE_COUNT);
        // First probe is straight ahead in the local frame
        assert!((dirs[0] - Vec3::Z).length() < 1e-3);
        // Ordering is front to back
        assert!(dirs[0].z > dirs[OBSTACLE_PROBE_COUNT / 2].z);
        assert!(dirs[OBSTACLE_PROBE_COUNT / 2].z > dirs[OBSTACLE_PROBE_COUNT - 1].z);
        // All unit length
        for dir in dirs {
            assert!((dir.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_no_forces_inside_margin_without_neighbors() {
        let (cfg, world) = configs();
        let boid = Boid::new(Vec3::ZERO, Vec3::X, 3.0);

        let accel = steering_acceleration(
            &boid,
            &NeighborAggregate::EMPTY,
            &no_obstacles(),
            None,
            &cfg,
            &world,
        );

        assert!(accel.length() < 1e-5);
    }

    #[test]
    fn test_soft_band_steers_inward_with_ramp() {
        let (cfg, world) = configs();
        let radius = world.boundary_radius;

        let near_margin = Boid::new(Vec3::X * (0.87 * radius), Vec3::X, 3.0);
        let near_edge = Boid::new(Vec3::X * (0.99 * radius), Vec3::X, 3.0);

        let accel_margin = containment(&near_margin, &cfg, &world);
        let accel_edge = containment(&near_edge, &cfg, &world);

        // Both point back toward the center
        assert!(accel_margin.x < 0.0);
        assert!(accel_edge.x < 0.0);
        // Deeper into the band pushes harder
        assert!(accel_edge.length() > accel_margin.length());
    }

    #[test]
    fn test_hard_correction_beyond_boundary() {
        let (cfg, world) = configs();
        let outside = Boid::new(Vec3::X * (world.boundary_radius * 1.1), Vec3::X, 3.0);

        let accel = containment(&outside, &cfg, &world);
        let expected =
            (BOUNDARY_HARD_FORCE_MULT * cfg.max_steer_force).min(BOUNDARY_HARD_FORCE_CAP);

        assert!(accel.x < 0.0);
        assert!((accel.length() - expected).abs() < 1e-4);
        // The override exceeds the normal steering cap
        assert!(accel.length() > cfg.max_steer_force);
    }

    #[test]
    fn test_flee_term_points_away_from_predator() {
        let (cfg, world) = configs();
        let boid = Boid::new(Vec3::ZERO, Vec3::Z, 3.0);
        let predator = Vec3::new(5.0, 0.0, 0.0);

        let accel = steering_acceleration(
            &boid,
            &NeighborAggregate::EMPTY,
            &no_obstacles(),
            Some(predator),
            &cfg,
            &world,
        );

        assert!(accel.x < 0.0);
    }

    #[test]
    fn test_no_flee_outside_radius() {
        let (cfg, world) = configs();
        let boid = Boid::new(Vec3::ZERO, Vec3::Z, 3.0);
        let predator = Vec3::new(FLEE_RADIUS + 1.0, 0.0, 0.0);

        let accel = steering_acceleration(
            &boid,
            &NeighborAggregate::EMPTY,
            &no_obstacles(),
            Some(predator),
            &cfg,
            &world,
        );

        assert!(accel.length() < 1e-5);
    }

    #[test]
    fn test_flee_dominates_flocking() {
        let (cfg, world) = configs();
        let boid = Boid::new(Vec3::ZERO, Vec3::Z, 3.0);
        let predator = Vec3::new(3.0, 0.0, 0.0);
        // Neighbors pulling toward +x, predator also at +x
        let neighbors = NeighborAggregate {
            count: 3,
            avg_heading: Vec3::X,
            avg_center: Vec3::new(4.0, 0.0, 0.0),
            avg_avoidance: Vec3::X,
        };

        let accel = steering_acceleration(
            &boid,
            &neighbors,
            &no_obstacles(),
            Some(predator),
            &cfg,
            &world,
        );

        // Panic wins over cohesion with the default weights
        assert!(accel.x < 0.0);
    }

    #[test]
    fn test_cohesion_pulls_toward_centroid() {
        let (cfg, world) = configs();
        let boid = Boid::new(Vec3::ZERO, Vec3::X, 3.0);
        let neighbors = NeighborAggregate {
            count: 2,
            avg_heading: Vec3::X,
            avg_center: Vec3::new(0.0, 4.0, 0.0),
            avg_avoidance: Vec3::ZERO,
        };

        let accel = steering_acceleration(
            &boid,
            &neighbors,
            &no_obstacles(),
            None,
            &cfg,
            &world,
        );

        assert!(accel.y > 0.0);
    }

    #[test]
    fn test_zero_neighbor_aggregate_adds_nothing() {
        let (cfg, world) = configs();
        let boid = Boid::new(Vec3::ZERO, Vec3::X, 3.0);

        let with_empty = steering_acceleration(
            &boid,
            &NeighborAggregate::EMPTY,
            &no_obstacles(),
            None,
            &cfg,
            &world,
        );

        assert_eq!(with_empty, Vec3::ZERO);
        assert!(with_empty.is_finite());
    }

    #[test]
    fn test_obstacle_ahead_steers_around() {
        let (cfg, world) = configs();
        let boid = Boid::new(Vec3::ZERO, Vec3::Z, 3.0);
        let mut field = ObstacleField::new();
        field.add(Vec3::new(0.0, 0.0, 3.0), 1.0);

        let accel = steering_acceleration(
            &boid,
            &NeighborAggregate::EMPTY,
            &field,
            None,
            &cfg,
            &world,
        );

        // Some lateral push away from straight ahead
        assert!(accel.length() > 0.0);
        let clear = first_clear_direction(&boid, &field, &cfg);
        assert!(!field.sweep_blocked(boid.position, cfg.bounding_radius, clear, cfg.obstacle_lookahead));
    }

    #[test]
    fn test_fully_blocked_keeps_heading() {
        let (cfg, _world) = configs();
        let boid = Boid::new(Vec3::ZERO, Vec3::Z, 3.0);
        // Giant obstacle surrounding the agent: every probe is blocked
        let mut field = ObstacleField::new();
        field.add(Vec3::ZERO, 50.0);

        let clear = first_clear_direction(&boid, &field, &cfg);
        assert_eq!(clear, boid.heading);
        assert!(clear.length() > 0.0);
    }
}
