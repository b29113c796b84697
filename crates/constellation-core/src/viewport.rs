//! Viewport dimensions and the placement limits derived from them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::PlacementConfig;

/// Current viewport size and derived placement bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in screen pixels.
    pub width: f32,
    /// Height in screen pixels.
    pub height: f32,
    /// Horizontal placement extent in world units.
    pub limit_x: f32,
    /// Vertical (and depth) placement extent in world units.
    pub limit_y: f32,
    margin_fraction: f32,
    scale_divisor: f32,
}

impl Viewport {
    /// Create a viewport using the given placement settings.
    pub fn new(width: f32, height: f32, placement: &PlacementConfig) -> Self {
        let mut viewport = Self {
            width,
            height,
            limit_x: 0.0,
            limit_y: 0.0,
            margin_fraction: placement.margin_fraction,
            scale_divisor: placement.scale_divisor,
        };
        viewport.resize(width, height);
        viewport
    }

    /// Recompute the limits for a new size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.limit_x = self.limit_for(width);
        self.limit_y = self.limit_for(height);
    }

    fn limit_for(&self, size: f32) -> f32 {
        (size - size * self.margin_fraction) / self.scale_divisor
    }

    /// Width over height, or 1.0 for a collapsed window.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Convert a screen coordinate (origin top-left, y down) to normalized device coordinates.
    pub fn ndc(&self, screen: Vec2) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (screen.x / self.width) * 2.0 - 1.0,
            -(screen.y / self.height) * 2.0 + 1.0,
        )
    }
}
