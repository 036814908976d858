//! Predator field-of-view perception
//!
//! The visible set is rebuilt from scratch every tick in registry scan
//! order; only the previous tick's set is retained, and only to detect
//! agents that newly entered view.

use ahash::AHashSet;
use glam::Vec3;

use crate::core::config::PredatorConfig;
use crate::core::math::{angle_between_deg, planar_distance};
use crate::core::types::AgentId;
use crate::spatial::queries::AgentSnapshot;

/// Agents passing the field-of-view test this tick
///
/// `ordered` preserves scan order (used for the newly-entered tie-break);
/// `members` answers membership queries.
#[derive(Debug, Default)]
pub struct VisibleSet {
    pub ordered: Vec<AgentId>,
    pub members: AHashSet<AgentId>,
}

impl VisibleSet {
    pub fn count(&self) -> usize {
        self.ordered.len()
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.members.contains(&id)
    }
}

/// Field-of-view test for a single candidate
///
/// Visible iff the planar distance is inside the view radius AND the
/// angular offset from the heading is inside the forward cone AND outside
/// the rear blind cone. The two angular tests are independent; both must
/// pass.
pub fn is_visible(
    predator_pos: Vec3,
    predator_heading: Vec3,
    agent_pos: Vec3,
    cfg: &PredatorConfig,
) -> bool {
    if planar_distance(agent_pos, predator_pos) >= cfg.view_radius {
        return false;
    }

    let Some(to_agent) = (agent_pos - predator_pos).try_normalize() else {
        // Coincident positions: zero angular offset, trivially in view
        return true;
    };

    let angle = angle_between_deg(predator_heading, to_agent);
    angle < cfg.view_angle_deg / 2.0 && angle < 180.0 - cfg.blind_angle_deg / 2.0
}

/// Compute the visible set over a tick snapshot, in scan order
pub fn visible_agents(
    predator_pos: Vec3,
    predator_heading: Vec3,
    agents: &[AgentSnapshot],
    cfg: &PredatorConfig,
) -> VisibleSet {
    let mut set = VisibleSet::default();
    for agent in agents {
        if is_visible(predator_pos, predator_heading, agent.position, cfg) {
            set.ordered.push(agent.id);
            set.members.insert(agent.id);
        }
    }
    set
}

/// Agents visible now that were not visible last tick, scan order preserved
///
/// The last element is the most recently entered under the defined
/// tie-break.
pub fn newly_entered(current: &VisibleSet, previous: &AHashSet<AgentId>) -> Vec<AgentId> {
    current
        .ordered
        .iter()
        .copied()
        .filter(|id| !previous.contains(id))
        .collect()
}
