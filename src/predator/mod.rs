//! Predator state machine: perceive, retarget, pursue, capture
//!
//! Evaluated once per tick against the start-of-tick snapshot. Movement
//! and aim both degrade with confusion; target switching carries the
//! cooldown hysteresis while confusion itself is memoryless.

pub mod confusion;
pub mod constants;
pub mod perception;
pub mod targeting;

use ahash::AHashSet;
use glam::Vec3;

use crate::core::config::SimulationConfig;
use crate::core::math::{normalize_or, project_into_sphere, slerp_heading, DEFAULT_HEADING};
use crate::core::types::AgentId;
use crate::predator::confusion::{confusion_level, deviate_aim};
use crate::predator::constants::{CONFUSION_SPEED_PENALTY, CONFUSION_TURN_PENALTY};
use crate::predator::perception::{newly_entered, visible_agents};
use crate::predator::targeting::{reacquire, snapshot_position, target_lost};
use crate::spatial::queries::AgentSnapshot;

/// A resolved change of target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSwitch {
    pub from: Option<AgentId>,
    pub to: AgentId,
    /// True for the forced reacquire path (lost target), false for the
    /// cooldown-gated novelty poach
    pub forced: bool,
}

/// What one predator tick produced
#[derive(Debug, Clone, Copy)]
pub struct PredatorOutcome {
    /// At most one capture resolves per tick
    pub captured: Option<AgentId>,
    /// Size of this tick's visible set (recorded on capture events)
    pub visible_count: usize,
    pub switch: Option<TargetSwitch>,
}

#[derive(Debug)]
pub struct Predator {
    pub position: Vec3,
    pub heading: Vec3,
    /// Weak handle: validated against the snapshot before every use
    pub target: Option<AgentId>,
    /// Confusion as of the last step, in [0, 1]
    pub confusion: f32,
    pub last_switch_time: Option<f32>,
    /// Diagnostic tally of resolved switches
    pub switch_count: u32,
    prev_visible: AHashSet<AgentId>,
}

impl Predator {
    pub fn new(position: Vec3, heading: Vec3) -> Self {
        Self {
            position,
            heading: normalize_or(heading, DEFAULT_HEADING),
            target: None,
            confusion: 0.0,
            last_switch_time: None,
            switch_count: 0,
            prev_visible: AHashSet::new(),
        }
    }

    fn cooldown_elapsed(&self, now: f32, cooldown: f32) -> bool {
        self.last_switch_time
            .map_or(true, |last| now - last >= cooldown)
    }

    /// Advance the predator one tick against the tick snapshot
    pub fn step(
        &mut self,
        agents: &[AgentSnapshot],
        now: f32,
        dt: f32,
        config: &SimulationConfig,
    ) -> PredatorOutcome {
        let visible = visible_agents(self.position, self.heading, agents, &config.predator);
        let newly = newly_entered(&visible, &self.prev_visible);

        // Clear a dangling handle before any use this tick
        if let Some(id) = self.target {
            if snapshot_position(agents, id).is_none() {
                self.target = None;
            }
        }

        let mut switch = None;
        if target_lost(self.target, &visible, self.position, agents, &config.targeting) {
            // Forced path: retarget immediately, cooldown ignored
            let replacement = reacquire(&visible, &newly, self.position, agents);
            if replacement != self.target {
                if let Some(to) = replacement {
                    switch = Some(TargetSwitch {
                        from: self.target,
                        to,
                        forced: true,
                    });
                }
                self.target = replacement;
            }
        } else if self.cooldown_elapsed(now, config.targeting.switch_cooldown) {
            // Novelty poach: a freshly seen agent steals attention from a
            // still-chaseable target once the cooldown allows it
            if let Some(&candidate) = newly.last() {
                if Some(candidate) != self.target {
                    switch = Some(TargetSwitch {
                        from: self.target,
                        to: candidate,
                        forced: false,
                    });
                    self.target = Some(candidate);
                }
            }
        }

        if let Some(resolved) = switch {
            self.last_switch_time = Some(now);
            self.switch_count += 1;
            tracing::debug!(
                from = ?resolved.from,
                to = ?resolved.to,
                forced = resolved.forced,
                "predator switched target"
            );
        }

        self.confusion = confusion_level(visible.count(), &config.confusion);

        let target_pos = self.target.and_then(|id| snapshot_position(agents, id));
        if let Some(position) = target_pos {
            let clean = normalize_or(position - self.position, self.heading);
            let desired = deviate_aim(clean, now, self.confusion, &config.confusion);
            let turn_rate =
                config.predator.base_turn_speed * (1.0 - self.confusion * CONFUSION_TURN_PENALTY);
            let speed = config.predator.speed * (1.0 - self.confusion * CONFUSION_SPEED_PENALTY);
            self.heading = slerp_heading(self.heading, desired, turn_rate * dt);
            self.position += self.heading * (speed * dt);
        } else {
            // No target: keep swimming forward at base speed
            self.position += self.heading * (config.predator.speed * dt);
        }
        self.position = project_into_sphere(self.position, config.world.boundary_radius);

        let mut captured = None;
        if let (Some(id), Some(position)) = (self.target, target_pos) {
            if self.position.distance(position) < config.predator.capture_radius {
                captured = Some(id);
                self.target = None;
            }
        }

        let visible_count = visible.count();
        self.prev_visible = visible.members;

        PredatorOutcome {
            captured,
            visible_count,
            switch,
        }
    }
}
