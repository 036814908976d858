pub mod boid;
pub mod constants;
pub mod steering;

pub use boid::Boid;
pub use steering::steering_acceleration;
