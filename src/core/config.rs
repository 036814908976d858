//! Simulation configuration with documented parameters
//!
//! All tunable values are collected here with explanations of their purpose
//! and how they interact with each other. Configs are deserializable from
//! TOML so experiment runs can be parameterized without recompiling.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{Result, SimError};

/// Per-agent steering and flocking parameters
///
/// These values have been tuned to produce visible schooling cohesion.
/// Changing the weight ratios changes how tight and reactive the flock is.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoidConfig {
    /// Lower bound on agent speed (world units per second)
    ///
    /// Speed is re-clamped into [speed_min, speed_max] after every
    /// integration step, so agents never stall mid-flock.
    pub speed_min: f32,

    /// Upper bound on agent speed (world units per second)
    pub speed_max: f32,

    /// Radius within which other agents contribute to alignment/cohesion
    pub perception_radius: f32,

    /// Radius within which other agents contribute to separation
    ///
    /// Should be well below perception_radius; separation only reacts to
    /// neighbors that are genuinely too close.
    pub avoidance_radius: f32,

    /// Weight of the steer toward the average neighbor heading
    pub align_weight: f32,

    /// Weight of the steer toward the neighbor centroid
    pub cohesion_weight: f32,

    /// Weight of the steer away from crowding neighbors
    pub separation_weight: f32,

    /// Cap on the magnitude of any single steering contribution
    ///
    /// Every steering term passes through the shared steer-towards
    /// primitive and is clamped to this before weighting. The hard
    /// boundary correction intentionally exceeds it.
    pub max_steer_force: f32,

    /// Weight of the steer toward the first clear probe direction
    pub obstacle_avoid_weight: f32,

    /// How far ahead the obstacle sweep looks (world units)
    pub obstacle_lookahead: f32,

    /// Agent bounding radius used for the obstacle sphere-sweep
    pub bounding_radius: f32,
}

impl Default for BoidConfig {
    fn default() -> Self {
        Self {
            speed_min: 2.0,
            speed_max: 5.0,
            perception_radius: 2.5,
            avoidance_radius: 1.0,
            align_weight: 1.0,
            cohesion_weight: 1.0,
            separation_weight: 1.0,
            max_steer_force: 3.0,
            obstacle_avoid_weight: 10.0,
            obstacle_lookahead: 5.0,
            bounding_radius: 0.27,
        }
    }
}

/// Predator body and field-of-view parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PredatorConfig {
    /// How far the predator can see (world units, planar distance)
    pub view_radius: f32,

    /// Total width of the forward vision cone (degrees)
    pub view_angle_deg: f32,

    /// Total width of the rear blind cone (degrees)
    ///
    /// An agent must pass both angular tests: inside the forward cone AND
    /// outside the rear blind cone. The two are independent.
    pub blind_angle_deg: f32,

    /// Base pursuit speed before confusion scaling (world units per second)
    pub speed: f32,

    /// Base turn rate before confusion scaling (fraction of the remaining
    /// angle closed per second via spherical interpolation)
    pub base_turn_speed: f32,

    /// Distance at which a pursued target counts as caught
    pub capture_radius: f32,
}

impl Default for PredatorConfig {
    fn default() -> Self {
        Self {
            view_radius: 25.0,
            view_angle_deg: 120.0,
            blind_angle_deg: 40.0,
            speed: 6.0,
            base_turn_speed: 3.0,
            capture_radius: 0.8,
        }
    }
}

/// Confusion-effect parameters
///
/// Confusion is a pure function of the instantaneous visible-agent count:
/// `clamp01(visible / max_confusion_count) * confusion_strength`. There is
/// no cross-tick smoothing; temporal continuity comes from the aim-noise
/// function alone.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfusionConfig {
    /// Scales raw confusion into [0, confusion_strength]
    ///
    /// Must stay in [0, 1] so the confusion invariant holds. Zero disables
    /// the confusion effect entirely regardless of visible count.
    pub confusion_strength: f32,

    /// Visible-agent count at which raw confusion saturates at 1.0
    pub max_confusion_count: u32,

    /// Maximum angular aim deviation at full confusion (degrees)
    pub max_angle_deviation_deg: f32,
}

impl Default for ConfusionConfig {
    fn default() -> Self {
        Self {
            confusion_strength: 1.0,
            max_confusion_count: 25,
            max_angle_deviation_deg: 40.0,
        }
    }
}

/// Target-selection policy parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// Minimum seconds between novelty-driven target switches
    ///
    /// Only the "eye-catching" poach respects this. Forced reacquisition
    /// after losing a target always happens immediately.
    pub switch_cooldown: f32,

    /// Beyond this distance a held target counts as lost
    pub max_chase_distance: f32,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            switch_cooldown: 1.5,
            max_chase_distance: 30.0,
        }
    }
}

/// World volume and time-step parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Radius of the spherical world volume all agents are kept inside
    pub boundary_radius: f32,

    /// Fixed simulation time step (seconds per tick)
    pub dt: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            boundary_radius: 40.0,
            dt: 1.0 / 50.0,
        }
    }
}

/// Full configuration surface consumed by the simulation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub boid: BoidConfig,
    pub predator: PredatorConfig,
    pub confusion: ConfusionConfig,
    pub targeting: TargetingConfig,
    pub world: WorldConfig,
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config
            .validate()
            .map_err(SimError::InvalidConfig)?;
        Ok(config)
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.boid.speed_min <= 0.0 || self.boid.speed_max < self.boid.speed_min {
            return Err(format!(
                "boid speed bounds must satisfy 0 < speed_min <= speed_max (got {} / {})",
                self.boid.speed_min, self.boid.speed_max
            ));
        }

        if self.boid.avoidance_radius > self.boid.perception_radius {
            return Err(format!(
                "avoidance_radius ({}) should be <= perception_radius ({})",
                self.boid.avoidance_radius, self.boid.perception_radius
            ));
        }

        if self.boid.max_steer_force <= 0.0 {
            return Err("max_steer_force must be positive".into());
        }

        if self.boid.obstacle_lookahead <= 0.0 || self.boid.bounding_radius <= 0.0 {
            return Err("obstacle lookahead and bounding radius must be positive".into());
        }

        if self.predator.view_radius <= 0.0 {
            return Err("view_radius must be positive".into());
        }

        if self.predator.view_angle_deg <= 0.0 || self.predator.view_angle_deg > 360.0 {
            return Err(format!(
                "view_angle_deg ({}) must be in (0, 360]",
                self.predator.view_angle_deg
            ));
        }

        if self.predator.blind_angle_deg < 0.0 || self.predator.blind_angle_deg >= 360.0 {
            return Err(format!(
                "blind_angle_deg ({}) must be in [0, 360)",
                self.predator.blind_angle_deg
            ));
        }

        if self.predator.speed <= 0.0 || self.predator.base_turn_speed <= 0.0 {
            return Err("predator speed and base_turn_speed must be positive".into());
        }

        if self.predator.capture_radius <= 0.0 {
            return Err("capture_radius must be positive".into());
        }

        if !(0.0..=1.0).contains(&self.confusion.confusion_strength) {
            return Err(format!(
                "confusion_strength ({}) must be in [0, 1]",
                self.confusion.confusion_strength
            ));
        }

        if self.confusion.max_confusion_count == 0 {
            return Err("max_confusion_count must be at least 1".into());
        }

        if self.confusion.max_angle_deviation_deg < 0.0 {
            return Err("max_angle_deviation_deg must be non-negative".into());
        }

        if self.targeting.switch_cooldown < 0.0 {
            return Err("switch_cooldown must be non-negative".into());
        }

        if self.targeting.max_chase_distance <= 0.0 {
            return Err("max_chase_distance must be positive".into());
        }

        if self.world.boundary_radius <= 0.0 {
            return Err("boundary_radius must be positive".into());
        }

        if self.world.dt <= 0.0 {
            return Err("dt must be positive".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_speed_bounds_rejected() {
        let mut config = SimulationConfig::default();
        config.boid.speed_min = 6.0;
        config.boid.speed_max = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_confusion_strength_out_of_range_rejected() {
        let mut config = SimulationConfig::default();
        config.confusion.confusion_strength = 1.5;
        assert!(config.validate().is_err());

        config.confusion.confusion_strength = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_confusion_count_rejected() {
        let mut config = SimulationConfig::default();
        config.confusion.max_confusion_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_view_angle_bounds() {
        let mut config = SimulationConfig::default();
        config.predator.view_angle_deg = 0.0;
        assert!(config.validate().is_err());

        config.predator.view_angle_deg = 361.0;
        assert!(config.validate().is_err());

        config.predator.view_angle_deg = 360.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_avoidance_radius_exceeding_perception_rejected() {
        let mut config = SimulationConfig::default();
        config.boid.avoidance_radius = config.boid.perception_radius + 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_with_partial_tables() {
        let text = r#"
            [predator]
            view_radius = 30.0

            [confusion]
            confusion_strength = 0.5
        "#;
        let config = SimulationConfig::from_toml_str(text).unwrap();
        assert_eq!(config.predator.view_radius, 30.0);
        assert_eq!(config.confusion.confusion_strength, 0.5);
        // Unspecified tables keep defaults
        assert_eq!(config.world.boundary_radius, 40.0);
    }

    #[test]
    fn test_invalid_toml_config_rejected() {
        let text = r#"
            [confusion]
            confusion_strength = 2.0
        "#;
        assert!(SimulationConfig::from_toml_str(text).is_err());
    }
}
