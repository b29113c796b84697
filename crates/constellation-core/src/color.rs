//! sRGB colors as they appear in configuration files.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
    /// Pale pink used for links.
    pub const BLUSH: Color = Color::rgb(0xff, 0xc9, 0xc9);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned for unrecognized color strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized color {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ParseColorError(s.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "white" => Ok(Color::WHITE),
            "black" => Ok(Color::rgb(0, 0, 0)),
            "red" => Ok(Color::RED),
            "green" => Ok(Color::rgb(0, 128, 0)),
            "blue" => Ok(Color::rgb(0, 0, 255)),
            "lightblue" => Ok(Color::LIGHT_BLUE),
            "pink" => Ok(Color::rgb(255, 192, 203)),
            "gold" => Ok(Color::rgb(255, 215, 0)),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            // #rgb expands each digit: #fc9 -> #ffcc99
            let digit = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color::rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
