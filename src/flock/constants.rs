//! Flock steering constants - fixed values the config surface does not expose

// Boundary containment
//
// Between SOFT_MARGIN * R and R the steer-to-center weight ramps linearly
// (a ramp, not a step, so agents do not oscillate at the band edge).
// Beyond R the correction bypasses the normal steering cap so escape takes
// at most a tick or two.
pub const BOUNDARY_SOFT_MARGIN: f32 = 0.85;
pub const BOUNDARY_SOFT_WEIGHT_MIN: f32 = 10.0;
pub const BOUNDARY_SOFT_WEIGHT_MAX: f32 = 25.0;
pub const BOUNDARY_HARD_FORCE_MULT: f32 = 5.0;
pub const BOUNDARY_HARD_FORCE_CAP: f32 = 20.0;

// Panic response to a nearby predator; dominates the flocking terms
pub const FLEE_RADIUS: f32 = 15.0;
pub const FLEE_WEIGHT: f32 = 15.0;

// Candidate directions probed when the forward sweep is blocked
pub const OBSTACLE_PROBE_COUNT: usize = 100;
