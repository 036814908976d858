//! Steering and rotation math shared by agents and the predator

use glam::{Quat, Vec3};

/// Fallback axis for degenerate directions (predator at world center, etc.)
pub const DEFAULT_HEADING: Vec3 = Vec3::X;

/// Normalize `v`, falling back to `fallback` when `v` has no usable length
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(fallback)
}

/// Convert a desired direction into a bounded acceleration contribution
///
/// `normalize(desired) * speed_max - velocity`, clamped to `max_force`.
/// This is the single conversion used by every steering term. A degenerate
/// desired direction normalizes to the current heading so the result can
/// never inject NaN into the accumulator.
pub fn steer_towards(
    desired: Vec3,
    velocity: Vec3,
    heading: Vec3,
    speed_max: f32,
    max_force: f32,
) -> Vec3 {
    let dir = normalize_or(desired, heading);
    (dir * speed_max - velocity).clamp_length_max(max_force)
}

/// Angle between two directions in degrees
///
/// Callers must not pass zero-length vectors.
pub fn angle_between_deg(a: Vec3, b: Vec3) -> f32 {
    a.angle_between(b).to_degrees()
}

/// Horizontal (xz-plane) distance between two points
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Spherically interpolate a heading toward a desired direction
///
/// `t` is the fraction of the remaining arc to close, clamped to [0, 1].
/// Both inputs are re-normalized on entry; the result is always unit
/// length.
pub fn slerp_heading(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let from = normalize_or(from, DEFAULT_HEADING);
    let to = normalize_or(to, from);
    let full = Quat::from_rotation_arc(from, to);
    let partial = Quat::IDENTITY.slerp(full, t.clamp(0.0, 1.0));
    normalize_or(partial * from, from)
}

/// Perturb a direction by a yaw rotation then a pitch rotation
///
/// Yaw rotates about the world up axis; pitch rotates about the resulting
/// direction's horizontal right axis. Used to recompose the predator's
/// aim deviation onto the clean target direction.
pub fn apply_yaw_pitch(dir: Vec3, yaw_deg: f32, pitch_deg: f32) -> Vec3 {
    let yawed = Quat::from_rotation_y(yaw_deg.to_radians()) * dir;
    let right = normalize_or(yawed.cross(Vec3::Y), Vec3::Z);
    let pitched = Quat::from_axis_angle(right, pitch_deg.to_radians()) * yawed;
    normalize_or(pitched, dir)
}

/// Radially project a position back inside a sphere of `radius` about the
/// origin. Positions already inside pass through untouched.
pub fn project_into_sphere(position: Vec3, radius: f32) -> Vec3 {
    let dist = position.length();
    if dist > radius {
        position * (radius / dist)
    } else {
        position
    }
}
