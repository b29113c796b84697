//! Visualization layer: Bevy-based renderer for the constellation engine.

pub mod camera;
pub mod frame;
pub mod links;
pub mod plugin;
pub mod scene;
pub mod settings;
pub mod units;

pub use plugin::ConstellationPlugin;
pub use settings::{RenderConfig, VizSettings};

/// Engine vector to Bevy vector.
pub(crate) fn to_vec3(v: constellation_core::glam::Vec3) -> bevy::math::Vec3 {
    bevy::math::Vec3::from_array(v.to_array())
}

/// Engine color to Bevy color.
pub(crate) fn to_color(c: constellation_core::Color) -> bevy::color::Color {
    bevy::color::Color::srgb_u8(c.r, c.g, c.b)
}

/// Bevy vector to engine vector.
pub(crate) fn from_vec3(v: bevy::math::Vec3) -> constellation_core::glam::Vec3 {
    constellation_core::glam::Vec3::from_array(v.to_array())
}

/// Bevy screen position to engine vector.
pub(crate) fn from_vec2(v: bevy::math::Vec2) -> constellation_core::glam::Vec2 {
    constellation_core::glam::Vec2::from_array(v.to_array())
}
