//! Target-selection policy
//!
//! Two deliberately separate paths: losing a target forces an immediate
//! reacquisition that ignores the switch cooldown (the predator must never
//! idle while prey is visible), while novelty-driven poaching of a still
//! valid target is cooldown-gated. Do not unify them.

use glam::Vec3;

use crate::core::config::TargetingConfig;
use crate::core::types::AgentId;
use crate::predator::perception::VisibleSet;
use crate::spatial::queries::AgentSnapshot;

/// Snapshot position of a live agent, if it is still live
pub fn snapshot_position(agents: &[AgentSnapshot], id: AgentId) -> Option<Vec3> {
    agents
        .iter()
        .find(|agent| agent.id == id)
        .map(|agent| agent.position)
}

/// Is the currently tracked target lost this tick?
///
/// Lost when absent (never acquired, or invalidated), no longer in the
/// visible set, or farther than the maximum chase distance.
pub fn target_lost(
    target: Option<AgentId>,
    visible: &VisibleSet,
    predator_pos: Vec3,
    agents: &[AgentSnapshot],
    cfg: &TargetingConfig,
) -> bool {
    let Some(id) = target else {
        return true;
    };
    if !visible.contains(id) {
        return true;
    }
    let Some(position) = snapshot_position(agents, id) else {
        return true;
    };
    predator_pos.distance(position) > cfg.max_chase_distance
}

/// Replacement after a lost target: the most recently entered agent when
/// any entered this tick, otherwise the nearest visible agent
pub fn reacquire(
    visible: &VisibleSet,
    newly: &[AgentId],
    predator_pos: Vec3,
    agents: &[AgentSnapshot],
) -> Option<AgentId> {
    if let Some(&id) = newly.last() {
        return Some(id);
    }
    nearest_visible(visible, predator_pos, agents)
}

fn nearest_visible(
    visible: &VisibleSet,
    predator_pos: Vec3,
    agents: &[AgentSnapshot],
) -> Option<AgentId> {
    let mut best: Option<(AgentId, f32)> = None;
    for &id in &visible.ordered {
        let Some(position) = snapshot_position(agents, id) else {
            continue;
        };
        let dist = predator_pos.distance_squared(position);
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((id, dist));
        }
    }
    best.map(|(id, _)| id)
}
