//! Confusion scalar and confusion-scaled aim noise
//!
//! Confusion is a pure function of the instantaneous visible-agent count.
//! The aim deviation is a smooth deterministic function of elapsed time,
//! so the same elapsed-time sequence reproduces the same trajectory.

use glam::Vec3;

use crate::core::config::ConfusionConfig;
use crate::core::math::apply_yaw_pitch;
use crate::predator::constants::CONFUSION_EPSILON;

// Incommensurate frequencies keep the two sine components from locking
// into a short repeating pattern; the weights sum to 1 so each channel
// stays in [-1, 1].
const NOISE_PRIMARY_WEIGHT: f32 = 0.6;
const NOISE_SECONDARY_WEIGHT: f32 = 0.4;
const YAW_FREQS: (f32, f32) = (1.3, 3.7);
const YAW_PHASES: (f32, f32) = (0.7, 2.9);
const PITCH_FREQS: (f32, f32) = (1.7, 4.3);
const PITCH_PHASES: (f32, f32) = (4.2, 1.1);

/// Confusion level for a visible-agent count
///
/// `clamp01(count / max_confusion_count) * confusion_strength`. Monotone
/// non-decreasing in the count; zero whenever the strength is zero.
pub fn confusion_level(visible_count: usize, cfg: &ConfusionConfig) -> f32 {
    let raw = (visible_count as f32 / cfg.max_confusion_count as f32).clamp(0.0, 1.0);
    raw * cfg.confusion_strength
}

/// Smooth noise channels for the aim deviation, each in [-1, 1]
///
/// The yaw and pitch channels are independently phased so the deviation
/// wanders rather than tracing a fixed figure.
pub fn aim_noise(elapsed: f32) -> (f32, f32) {
    let yaw = NOISE_PRIMARY_WEIGHT * (YAW_FREQS.0 * elapsed + YAW_PHASES.0).sin()
        + NOISE_SECONDARY_WEIGHT * (YAW_FREQS.1 * elapsed + YAW_PHASES.1).sin();
    let pitch = NOISE_PRIMARY_WEIGHT * (PITCH_FREQS.0 * elapsed + PITCH_PHASES.0).sin()
        + NOISE_SECONDARY_WEIGHT * (PITCH_FREQS.1 * elapsed + PITCH_PHASES.1).sin();
    (yaw, pitch)
}

/// Perturb a clean pursuit direction by the confusion-scaled deviation
///
/// Below the epsilon threshold the direction passes through untouched.
pub fn deviate_aim(direction: Vec3, elapsed: f32, confusion: f32, cfg: &ConfusionConfig) -> Vec3 {
    if confusion <= CONFUSION_EPSILON {
        return direction;
    }
    let (yaw_noise, pitch_noise) = aim_noise(elapsed);
    let scale = cfg.max_angle_deviation_deg * confusion;
    apply_yaw_pitch(direction, yaw_noise * scale, pitch_noise * scale)
}
