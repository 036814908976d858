//! World registry and tick orchestration
//!
//! Owns the live-agent registry, the predator, and the obstacle field, and
//! runs the fixed-step compute-then-apply loop: all steering and
//! perception decisions are taken against a snapshot of start-of-tick
//! state, then every integration applies. Captures resolve inside the same
//! tick, so a removed agent can never be perceived again.

use glam::Vec3;
use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::math::project_into_sphere;
use crate::core::types::{AgentId, Tick};
use crate::flock::boid::Boid;
use crate::flock::steering::steering_acceleration;
use crate::metrics::{
    average_nearest_neighbor_distance, polarization, FlockSample, MetricsSink,
};
use crate::predator::Predator;
use crate::sim::events::SimulationEvent;
use crate::spatial::queries::{AgentSnapshot, NeighborQuery, ObstacleField};
use crate::spatial::sparse_hash::SparseHashGrid;

pub struct HuntWorld {
    config: SimulationConfig,
    agents: Vec<Boid>,
    predator: Predator,
    obstacles: ObstacleField,
    tick: Tick,
    elapsed: f32,
    total_captures: u64,
}

impl HuntWorld {
    /// Build a world from a validated config
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate().map_err(SimError::InvalidConfig)?;
        let predator_start = Vec3::new(0.0, 0.0, -config.world.boundary_radius * 0.5);
        Ok(Self {
            config,
            agents: Vec::new(),
            predator: Predator::new(predator_start, Vec3::Z),
            obstacles: ObstacleField::new(),
            tick: 0,
            elapsed: 0.0,
            total_captures: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Read-only agent access for external samplers
    pub fn agents(&self) -> &[Boid] {
        &self.agents
    }

    pub fn predator(&self) -> &Predator {
        &self.predator
    }

    pub fn live_count(&self) -> usize {
        self.agents.len()
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn total_captures(&self) -> u64 {
        self.total_captures
    }

    /// Spawn one agent with a seeded initial heading and speed
    ///
    /// The position is projected into the boundary sphere and the speed
    /// clamped into the configured band so the registry never holds an
    /// invariant-violating agent.
    pub fn spawn_agent(&mut self, position: Vec3, heading: Vec3, speed: f32) -> AgentId {
        let position = project_into_sphere(position, self.config.world.boundary_radius);
        let speed = speed.clamp(self.config.boid.speed_min, self.config.boid.speed_max);
        let boid = Boid::new(position, heading, speed);
        let id = boid.id;
        self.agents.push(boid);
        id
    }

    /// Spawn `count` agents scattered through the inner half of the world
    pub fn spawn_school(&mut self, count: usize, rng: &mut impl Rng) {
        let radius = self.config.world.boundary_radius * 0.5;
        for _ in 0..count {
            let position = random_in_sphere(rng) * radius;
            let heading = random_unit(rng);
            let speed = rng.gen_range(self.config.boid.speed_min..=self.config.boid.speed_max);
            self.spawn_agent(position, heading, speed);
        }
    }

    pub fn add_obstacle(&mut self, center: Vec3, radius: f32) {
        self.obstacles.add(center, radius);
    }

    /// Current flock statistics for periodic sampling
    pub fn sample_flock(&self) -> FlockSample {
        let headings: Vec<Vec3> = self.agents.iter().map(|b| b.heading).collect();
        let positions: Vec<Vec3> = self.agents.iter().map(|b| b.position).collect();
        FlockSample {
            live_count: self.agents.len(),
            polarization: polarization(&headings),
            avg_nearest_neighbor_distance: average_nearest_neighbor_distance(&positions),
        }
    }

    /// Advance the whole simulation one fixed step
    ///
    /// Order within the tick: snapshot, all boid steering decisions, all
    /// boid integrations, predator decision + movement, capture
    /// resolution. The metrics sink hears about a capture in the same tick
    /// it resolves.
    pub fn step(&mut self, metrics: &mut dyn MetricsSink) -> Vec<SimulationEvent> {
        let dt = self.config.world.dt;
        let now = self.elapsed;

        let snapshot: Vec<AgentSnapshot> = self
            .agents
            .iter()
            .map(|b| AgentSnapshot {
                id: b.id,
                position: b.position,
                heading: b.heading,
            })
            .collect();

        let cell_size = self
            .config
            .boid
            .perception_radius
            .max(self.config.boid.avoidance_radius);
        let grid = SparseHashGrid::build(&snapshot, cell_size);
        let predator_position = Some(self.predator.position);

        let accelerations: Vec<Vec3> = self
            .agents
            .iter()
            .map(|boid| {
                let neighbors = grid.aggregate(
                    boid.id,
                    boid.position,
                    self.config.boid.perception_radius,
                    self.config.boid.avoidance_radius,
                );
                steering_acceleration(
                    boid,
                    &neighbors,
                    &self.obstacles,
                    predator_position,
                    &self.config.boid,
                    &self.config.world,
                )
            })
            .collect();

        for (boid, accel) in self.agents.iter_mut().zip(accelerations) {
            boid.integrate(accel, dt, &self.config.boid, &self.config.world);
        }

        let outcome = self.predator.step(&snapshot, now, dt, &self.config);

        let mut events = Vec::new();
        if let Some(switch) = outcome.switch {
            events.push(SimulationEvent::TargetSwitched {
                from: switch.from,
                to: switch.to,
                forced: switch.forced,
                tick: self.tick,
            });
        }

        if let Some(captured) = outcome.captured {
            self.agents.retain(|b| b.id != captured);
            self.total_captures += 1;
            metrics.on_capture(outcome.visible_count);
            tracing::info!(
                agent = ?captured,
                visible = outcome.visible_count,
                tick = self.tick,
                "capture resolved"
            );
            events.push(SimulationEvent::Captured {
                agent: captured,
                visible_count: outcome.visible_count,
                tick: self.tick,
            });
        }

        self.tick += 1;
        self.elapsed += dt;
        events
    }
}

/// Uniform-ish point in the unit sphere via rejection sampling
fn random_in_sphere(rng: &mut impl Rng) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}

/// Random unit direction
fn random_unit(rng: &mut impl Rng) -> Vec3 {
    loop {
        let candidate = random_in_sphere(rng);
        if let Some(unit) = candidate.try_normalize() {
            return unit;
        }
    }
}
