//! Events generated during a simulation tick
//!
//! Returned by `HuntWorld::step` so drivers can display or log them; the
//! metrics sink receives captures independently of this stream.

use crate::core::types::{AgentId, Tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEvent {
    /// The predator caught its target; the agent is already removed
    Captured {
        agent: AgentId,
        /// Visible-agent count at the instant of capture
        visible_count: usize,
        tick: Tick,
    },
    /// The predator changed targets
    TargetSwitched {
        from: Option<AgentId>,
        to: AgentId,
        /// Forced reacquire (lost target) vs novelty poach
        forced: bool,
        tick: Tick,
    },
}
