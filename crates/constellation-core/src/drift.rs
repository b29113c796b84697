//! Idle camera orbit.
//!
//! While the viewer leaves the pointer alone the orbit speeds up toward the
//! configured maximum; any pointer movement makes it slow down toward the
//! minimum, so interaction happens against a nearly still camera.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::picking::Ray;

/// Recency of pointer input and the current orbit speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityClock {
    /// Timestamp of the last pointer movement, in milliseconds.
    pub last_input_ms: u64,
    /// Orbit speed, kept within the configured bounds.
    pub current_speed: f32,
}

impl ActivityClock {
    /// Start the clock as if input just happened.
    pub fn new(now_ms: u64, config: &CameraConfig) -> Self {
        Self {
            last_input_ms: now_ms,
            current_speed: config.initial_speed.clamp(config.min_speed, config.max_speed),
        }
    }

    /// Record pointer movement.
    pub fn record_input(&mut self, now_ms: u64) {
        self.last_input_ms = now_ms;
    }

    /// Milliseconds since the last input. Never negative.
    pub fn idle_for(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_input_ms)
    }

    /// Step the speed once: up while idle past the threshold, down otherwise.
    pub fn update_speed(&mut self, now_ms: u64, config: &CameraConfig) {
        if self.idle_for(now_ms) > config.idle_threshold_ms {
            self.current_speed = (self.current_speed + config.acceleration).min(config.max_speed);
        } else {
            self.current_speed = (self.current_speed - config.deceleration).max(config.min_speed);
        }
    }
}

/// Camera placement for one frame. The camera always looks at `target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraPose {
    /// World-space ray through a point given in normalized device coordinates.
    pub fn ray_through(&self, ndc: Vec2, aspect: f32) -> Ray {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        let half_height = (self.fov_y / 2.0).tan();

        let direction =
            forward + right * (ndc.x * half_height * aspect) + up * (ndc.y * half_height);
        Ray::new(self.position, direction)
    }
}

/// Accumulated orbit angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraDrift {
    /// Radians travelled so far.
    pub angle: f32,
}

impl CameraDrift {
    /// Advance one frame and return the new pose.
    pub fn update(
        &mut self,
        now_ms: u64,
        clock: &mut ActivityClock,
        config: &CameraConfig,
    ) -> CameraPose {
        clock.update_speed(now_ms, config);

        let speed = config.base_step + (clock.current_speed / config.max_speed).abs();
        self.angle += speed * config.angle_scale;

        self.pose(config)
    }

    /// Pose for the current angle without advancing.
    pub fn pose(&self, config: &CameraConfig) -> CameraPose {
        let (sin, cos) = self.angle.sin_cos();
        CameraPose {
            position: Vec3::new(
                cos * config.orbit_radius,
                cos * config.bob_amplitude + config.bob_offset,
                sin * config.orbit_radius,
            ),
            target: Vec3::ZERO,
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
        }
    }
}
