pub mod events;
pub mod world;

pub use events::SimulationEvent;
pub use world::HuntWorld;
