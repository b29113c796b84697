//! Configuration loading for the engine.
//!
//! All engine settings can be loaded from a TOML configuration file. Every
//! section is optional; missing values fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::Color;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Unit placement settings
    #[serde(default)]
    pub placement: PlacementConfig,
    /// Link geometry settings
    #[serde(default)]
    pub links: LinkConfig,
    /// Link growth animation settings
    #[serde(default)]
    pub growth: GrowthConfig,
    /// Idle camera orbit settings
    #[serde(default)]
    pub camera: CameraConfig,
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string and validates it.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.placement;
        if !(p.min_distance > 0.0) {
            return Err(ConfigError::Invalid("placement.min_distance must be positive".into()));
        }
        if !(p.scale_divisor > 0.0) {
            return Err(ConfigError::Invalid("placement.scale_divisor must be positive".into()));
        }
        if !(0.0..1.0).contains(&p.margin_fraction) {
            return Err(ConfigError::Invalid("placement.margin_fraction must be in [0, 1)".into()));
        }
        if p.max_attempts == 0 {
            return Err(ConfigError::Invalid("placement.max_attempts must be at least 1".into()));
        }

        let l = &self.links;
        if !(l.radius > 0.0) || l.tubular_segments == 0 || l.radial_segments == 0 {
            return Err(ConfigError::Invalid(
                "links need a positive radius and non-zero segment counts".into(),
            ));
        }

        if !(self.growth.step > 0.0 && self.growth.step <= 1.0) {
            return Err(ConfigError::Invalid("growth.step must be in (0, 1]".into()));
        }

        let c = &self.camera;
        if c.min_speed > c.max_speed {
            return Err(ConfigError::Invalid("camera.min_speed exceeds camera.max_speed".into()));
        }
        if c.max_speed == 0.0 {
            return Err(ConfigError::Invalid("camera.max_speed must be non-zero".into()));
        }
        Ok(())
    }
}

/// Unit placement configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Minimum distance between any two unit centers
    pub min_distance: f32,
    /// Fraction of the viewport trimmed before computing placement limits
    pub margin_fraction: f32,
    /// Screen pixels per world unit when computing placement limits
    pub scale_divisor: f32,
    /// Rejected samples allowed before a placement gives up
    pub max_attempts: u32,
    /// Radius of the unit shape, used for picking
    pub unit_radius: f32,
    /// Color given to newly placed units
    pub unit_color: Color,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            margin_fraction: 0.05,
            scale_divisor: 20.0,
            max_attempts: 10_000,
            unit_radius: 1.0,
            unit_color: Color::LIGHT_BLUE,
        }
    }
}

/// Link geometry configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Color of links created by a selection
    pub color: Color,
    /// Tube radius
    pub radius: f32,
    /// Rings along the curve
    pub tubular_segments: u32,
    /// Vertices around each ring
    pub radial_segments: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            color: Color::BLUSH,
            radius: 0.05,
            tubular_segments: 64,
            radial_segments: 8,
        }
    }
}

/// Link growth configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Growth added per tick
    pub step: f64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self { step: 0.02 }
    }
}

/// Idle camera orbit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Milliseconds without pointer movement before the camera speeds up
    pub idle_threshold_ms: u64,
    /// Speed gained per tick while idle
    pub acceleration: f32,
    /// Speed lost per tick while active
    pub deceleration: f32,
    /// Lower speed bound
    pub min_speed: f32,
    /// Upper speed bound
    pub max_speed: f32,
    /// Speed at startup
    pub initial_speed: f32,
    /// Angular step applied even at minimum speed
    pub base_step: f32,
    /// Scale from speed to radians per tick
    pub angle_scale: f32,
    /// Orbit radius in the XZ plane
    pub orbit_radius: f32,
    /// Vertical bob amplitude
    pub bob_amplitude: f32,
    /// Vertical bob center
    pub bob_offset: f32,
    /// Vertical field of view
    pub fov_y_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            idle_threshold_ms: 2000,
            acceleration: 10.0,
            deceleration: 20.0,
            min_speed: 0.0,
            max_speed: 1000.0,
            initial_speed: 1000.0,
            base_step: 0.1,
            angle_scale: 0.01,
            orbit_radius: 40.0,
            bob_amplitude: 15.0,
            bob_offset: 5.0,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Error serializing TOML config
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A value is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = EngineConfig::from_str(
            r#"
            [growth]
            step = 0.05

            [links]
            color = "red"
            "#,
        )
        .unwrap();

        assert_eq!(config.growth.step, 0.05);
        assert_eq!(config.links.color, Color::RED);
        assert_eq!(config.links.radius, 0.05);
        assert_eq!(config.placement.min_distance, 2.0);
        assert_eq!(config.camera.max_speed, 1000.0);
    }

    #[test]
    fn test_unknown_sections_are_ignored() {
        let config = EngineConfig::from_str("[render]\nbloom_strength = 2.0\n").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_invalid_step_rejected() {
        let result = EngineConfig::from_str("[growth]\nstep = 0.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_inverted_speed_bounds_rejected() {
        let result = EngineConfig::from_str("[camera]\nmin_speed = 10.0\nmax_speed = 5.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_color_is_parse_error() {
        let result = EngineConfig::from_str("[links]\ncolor = \"#zzz\"\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let config = EngineConfig::default();
        let toml = config.to_toml().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml.as_bytes()).unwrap();

        let loaded = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }
}
