//! Unit placement: rejection sampling inside the viewport volume.
//!
//! Candidates are drawn with a deliberately lopsided law: each horizontal and
//! vertical offset is scaled by the cosine/sine of an independent random
//! angle, which piles units toward the center axes instead of filling a
//! uniform disk. Depth is uniform over a band as deep as the viewport is
//! tall. A candidate is rejected if it lies closer than the minimum distance
//! to any placed unit; links are not considered.

use glam::Vec3;
use rand::Rng;

use crate::config::PlacementConfig;
use crate::spatial::SpatialHash;
use crate::viewport::Viewport;

/// Errors that can occur while placing a unit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// Every sample collided with an existing unit.
    #[error("no collision-free position found after {attempts} attempts")]
    Exhausted {
        /// Samples drawn before giving up.
        attempts: u32,
    },
}

/// A successful placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// Samples drawn, including the accepted one.
    pub attempts: u32,
}

/// Draw one candidate position.
///
/// The angles are raw radians in `0..360`, not degrees.
pub fn sample_candidate<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> Vec3 {
    let (lx, ly) = (viewport.limit_x, viewport.limit_y);

    let x = (rng.gen::<f32>() * lx - lx / 2.0) * (rng.gen::<f32>() * 360.0).cos();
    let y = (rng.gen::<f32>() * ly - ly / 2.0) * (rng.gen::<f32>() * 360.0).sin();
    let z = rng.gen::<f32>() * ((ly + ly) / 2.0) - (ly + ly) / 4.0;

    Vec3::new(x, y, z)
}

/// Sample until a candidate clears every indexed unit, or give up after
/// `config.max_attempts` samples.
pub fn find_free_position<R: Rng + ?Sized>(
    rng: &mut R,
    viewport: &Viewport,
    index: &SpatialHash,
    config: &PlacementConfig,
) -> Result<Placement, PlacementError> {
    for attempt in 1..=config.max_attempts {
        let candidate = sample_candidate(rng, viewport);
        if !index.any_within(candidate, config.min_distance) {
            return Ok(Placement {
                position: candidate,
                attempts: attempt,
            });
        }
    }
    Err(PlacementError::Exhausted {
        attempts: config.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::UnitId;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn viewport(width: f32, height: f32) -> Viewport {
        Viewport::new(width, height, &PlacementConfig::default())
    }

    #[test]
    fn test_samples_stay_inside_limits() {
        let mut rng = SmallRng::seed_from_u64(7);
        let vp = viewport(800.0, 600.0);

        for _ in 0..5000 {
            let p = sample_candidate(&mut rng, &vp);
            assert!(p.x.abs() <= vp.limit_x / 2.0);
            assert!(p.y.abs() <= vp.limit_y / 2.0);
            assert!(p.z.abs() <= vp.limit_y / 2.0);
        }
    }

    #[test]
    fn test_depth_band_is_filled() {
        let mut rng = SmallRng::seed_from_u64(11);
        let vp = viewport(800.0, 600.0);
        let samples: Vec<Vec3> = (0..2000).map(|_| sample_candidate(&mut rng, &vp)).collect();

        let near = samples.iter().filter(|p| p.z < -vp.limit_y / 4.0).count();
        let far = samples.iter().filter(|p| p.z > vp.limit_y / 4.0).count();
        assert!(near > 300 && far > 300);
    }

    #[test]
    fn test_first_placement_takes_one_attempt() {
        let mut rng = SmallRng::seed_from_u64(1);
        let index = SpatialHash::new(2.0);
        let placement =
            find_free_position(&mut rng, &viewport(800.0, 600.0), &index, &PlacementConfig::default())
                .unwrap();
        assert_eq!(placement.attempts, 1);
    }

    #[test]
    fn test_exhaustion_is_reported() {
        let mut rng = SmallRng::seed_from_u64(3);
        // 20x20 pixels gives limits under one world unit: no room for a second unit
        let vp = viewport(20.0, 20.0);
        let mut index = SpatialHash::new(2.0);
        index.insert(UnitId(0), Vec3::ZERO);

        let config = PlacementConfig {
            max_attempts: 50,
            ..PlacementConfig::default()
        };
        let result = find_free_position(&mut rng, &vp, &index, &config);
        assert_eq!(result, Err(PlacementError::Exhausted { attempts: 50 }));
    }
}
