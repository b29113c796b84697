//! Viewer settings: engine configuration plus rendering parameters.

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use constellation_core::{Color, ConfigError, EngineConfig};

/// Everything the viewer needs before the first frame.
#[derive(Resource, Debug, Clone)]
pub struct VizSettings {
    /// Data file to load units from.
    pub data: PathBuf,
    /// Placement seed.
    pub seed: u64,
    pub engine: EngineConfig,
    pub render: RenderConfig,
}

impl Default for VizSettings {
    fn default() -> Self {
        Self {
            data: PathBuf::from("data/data.json"),
            seed: 42,
            engine: EngineConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl VizSettings {
    /// Read both the engine and render sections from one TOML file.
    pub fn with_config_file(mut self, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        self.engine = EngineConfig::from_str(&content)?;
        self.render = RenderConfig::from_str(&content)?;
        Ok(self)
    }
}

/// The `[render]` section of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Bloom strength
    pub bloom_strength: f32,
    /// Brightness above which bloom kicks in
    pub bloom_threshold: f32,
    /// Bloom spread
    pub bloom_radius: f32,
    /// Ambient light intensity, 0..1
    pub ambient_intensity: f32,
    /// Point light intensity, 0..1
    pub point_light_intensity: f32,
    /// Point light position
    pub point_light_position: [f32; 3],
    /// Clear color
    pub background: Color,
    /// Initial window width
    pub window_width: f32,
    /// Initial window height
    pub window_height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bloom_strength: 1.0,
            bloom_threshold: 0.25,
            bloom_radius: 0.25,
            ambient_intensity: 0.5,
            point_light_intensity: 0.5,
            point_light_position: [2.0, 3.0, 4.0],
            background: Color::rgb(0, 0, 0),
            window_width: 1280.0,
            window_height: 720.0,
        }
    }
}

#[derive(Deserialize)]
struct RenderSection {
    #[serde(default)]
    render: RenderConfig,
}

impl RenderConfig {
    /// Parse the `[render]` section, ignoring every other section.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let section: RenderSection = toml::from_str(content)?;
        Ok(section.render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_section_parsed() {
        let config = RenderConfig::from_str(
            r##"
            [growth]
            step = 0.05

            [render]
            bloom_strength = 2.0
            background = "#101020"
            "##,
        )
        .unwrap();

        assert_eq!(config.bloom_strength, 2.0);
        assert_eq!(config.bloom_threshold, 0.25);
        assert_eq!(config.background, Color::rgb(0x10, 0x10, 0x20));
    }

    #[test]
    fn test_missing_render_section_uses_defaults() {
        assert_eq!(RenderConfig::from_str("").unwrap(), RenderConfig::default());
    }
}
