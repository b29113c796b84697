//! Uniform grid used for neighbor checks during placement.

use glam::{IVec3, Vec3};
use std::collections::HashMap;

use crate::world::UnitId;

/// Spatial hash with cubic cells.
///
/// With a cell edge equal to the query radius, every point closer than the
/// radius lies in one of the 27 cells around the query cell.
#[derive(Debug, Clone)]
pub struct SpatialHash {
    cell_size: f32,
    cells: HashMap<IVec3, Vec<(UnitId, Vec3)>>,
    len: usize,
}

impl SpatialHash {
    /// Create an empty hash. `cell_size` must be positive.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
            len: 0,
        }
    }

    fn cell_of(&self, position: Vec3) -> IVec3 {
        (position / self.cell_size).floor().as_ivec3()
    }

    /// Register a point.
    pub fn insert(&mut self, id: UnitId, position: Vec3) {
        let cell = self.cell_of(position);
        self.cells.entry(cell).or_default().push((id, position));
        self.len += 1;
    }

    /// True if some registered point is strictly closer than `radius`.
    ///
    /// `radius` must not exceed the cell size.
    pub fn any_within(&self, position: Vec3, radius: f32) -> bool {
        debug_assert!(radius <= self.cell_size);
        let center = self.cell_of(position);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.cells.get(&(center + IVec3::new(dx, dy, dz))) else {
                        continue;
                    };
                    if bucket.iter().any(|(_, p)| p.distance(position) < radius) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Number of registered points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no points are registered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every point.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_close_neighbor_across_cells() {
        let mut hash = SpatialHash::new(2.0);
        hash.insert(UnitId(0), Vec3::new(1.9, 0.0, 0.0));

        // Different cell, distance 1.8
        assert!(hash.any_within(Vec3::new(3.7, 0.0, 0.0), 2.0));
    }

    #[test]
    fn test_exact_threshold_is_not_a_collision() {
        let mut hash = SpatialHash::new(2.0);
        hash.insert(UnitId(0), Vec3::ZERO);

        assert!(!hash.any_within(Vec3::new(2.0, 0.0, 0.0), 2.0));
        assert!(hash.any_within(Vec3::new(1.999, 0.0, 0.0), 2.0));
    }

    #[test]
    fn test_negative_coordinates() {
        let mut hash = SpatialHash::new(2.0);
        hash.insert(UnitId(0), Vec3::new(-0.5, -0.5, -0.5));

        assert!(hash.any_within(Vec3::new(0.5, 0.5, 0.5), 2.0));
        assert!(!hash.any_within(Vec3::new(-5.0, -5.0, -5.0), 2.0));
    }

    #[test]
    fn test_matches_linear_scan() {
        let points: Vec<Vec3> = (0..40)
            .map(|i| {
                let f = i as f32;
                Vec3::new((f * 1.37).sin() * 9.0, (f * 0.71).cos() * 7.0, (f * 2.3).sin() * 5.0)
            })
            .collect();

        let mut hash = SpatialHash::new(2.0);
        for (i, p) in points.iter().enumerate().take(20) {
            hash.insert(UnitId(i as u32), *p);
        }
        assert_eq!(hash.len(), 20);

        for query in &points[20..] {
            let linear = points[..20].iter().any(|p| p.distance(*query) < 2.0);
            assert_eq!(hash.any_within(*query, 2.0), linear);
        }
    }
}
