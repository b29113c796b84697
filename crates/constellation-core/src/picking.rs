//! Ray picking against unit bounding spheres.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::world::{Unit, UnitId};

/// A half-line with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Distance along the ray to the first hit on a sphere, if any.
    ///
    /// A ray starting inside the sphere hits its far side.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = -b - root;
        let far = -b + root;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// The nearest unit hit by `ray`. Equal distances go to the lower id.
///
/// Links are not pickable and do not block units behind them.
pub fn pick(units: &[Unit], ray: &Ray, radius: f32) -> Option<UnitId> {
    let mut best: Option<(f32, UnitId)> = None;
    for unit in units {
        let Some(distance) = ray.intersect_sphere(unit.position, radius) else {
            continue;
        };
        match best {
            Some((best_distance, _)) if best_distance <= distance => {}
            _ => best = Some((distance, unit.id)),
        }
    }
    best.map(|(_, id)| id)
}
