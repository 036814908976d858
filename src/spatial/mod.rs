pub mod queries;
pub mod sparse_hash;

pub use queries::{
    AgentSnapshot, BruteForceQuery, NeighborAggregate, NeighborQuery, ObstacleField,
    ObstacleQuery, SphereObstacle,
};
pub use sparse_hash::SparseHashGrid;
