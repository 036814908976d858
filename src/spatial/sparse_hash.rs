//! Sparse hash grid for efficient neighbor queries

use ahash::AHashMap;
use glam::Vec3;

use crate::core::types::AgentId;
use crate::spatial::queries::{
    accumulate_neighbor, finish_aggregate, AgentSnapshot, NeighborAggregate, NeighborQuery,
};

/// Sparse hash grid over a tick snapshot
///
/// Queries walk the 3x3x3 cell neighborhood, so `cell_size` must be at
/// least the largest query radius or distant neighbors will be missed.
pub struct SparseHashGrid<'a> {
    cell_size: f32,
    agents: &'a [AgentSnapshot],
    cells: AHashMap<(i32, i32, i32), Vec<usize>>,
}

impl<'a> SparseHashGrid<'a> {
    /// Bucket every snapshot entry by cell
    pub fn build(agents: &'a [AgentSnapshot], cell_size: f32) -> Self {
        let mut cells: AHashMap<(i32, i32, i32), Vec<usize>> = AHashMap::new();
        for (idx, agent) in agents.iter().enumerate() {
            let coord = cell_coord(agent.position, cell_size);
            cells.entry(coord).or_default().push(idx);
        }
        Self {
            cell_size,
            agents,
            cells,
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[inline]
fn cell_coord(pos: Vec3, cell_size: f32) -> (i32, i32, i32) {
    (
        (pos.x / cell_size).floor() as i32,
        (pos.y / cell_size).floor() as i32,
        (pos.z / cell_size).floor() as i32,
    )
}

impl NeighborQuery for SparseHashGrid<'_> {
    fn aggregate(
        &self,
        agent: AgentId,
        position: Vec3,
        perception_radius: f32,
        avoidance_radius: f32,
    ) -> NeighborAggregate {
        debug_assert!(perception_radius <= self.cell_size);

        let (cx, cy, cz) = cell_coord(position, self.cell_size);
        let mut count = 0;
        let mut heading_sum = Vec3::ZERO;
        let mut center_sum = Vec3::ZERO;
        let mut avoidance_sum = Vec3::ZERO;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(cell) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &idx in cell {
                        let other = &self.agents[idx];
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
                }
            }
        }

        finish_aggregate(count, heading_sum, center_sum, avoidance_sum)
    }
}
