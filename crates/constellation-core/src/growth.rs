//! Link growth animation.
//!
//! A growing link is scaled uniformly by its growth and translated to
//! `origin * (1 - growth)`, so it appears to emerge from its origin unit.
//! Updates stop once growth reaches 1; the last step may overshoot and is
//! left as is.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::link::Link;

/// Per-link animation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthState {
    /// Still being scaled up each tick.
    Growing,
    /// Done; never touched again.
    Settled,
}

/// Render transform derived from a link's growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkTransform {
    /// Uniform scale on all three axes.
    pub scale: f32,
    pub translation: Vec3,
}

impl Link {
    /// Apply one growth step. Returns false once the link has settled.
    ///
    /// Growth is `ticks * step` rather than a running sum so that 50 steps
    /// of 0.02 land exactly on 1.0.
    pub fn advance(&mut self, step: f64) -> bool {
        if self.growth >= 1.0 {
            return false;
        }
        self.ticks += 1;
        self.growth = self.ticks as f64 * step;
        if self.growth >= 1.0 {
            self.state = GrowthState::Settled;
        }
        true
    }

    /// Current render transform.
    pub fn transform(&self) -> LinkTransform {
        let growth = self.growth as f32;
        LinkTransform {
            scale: growth,
            translation: self.origin_position * (1.0 - growth),
        }
    }
}

/// Grow every link once. Returns how many links changed.
pub fn advance_all(links: &mut [Link], step: f64) -> usize {
    links
        .iter_mut()
        .map(|link| link.advance(step))
        .filter(|advanced| *advanced)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::LinkConfig;
    use crate::link::{build_link, LinkId};
    use crate::world::{Unit, UnitId};
    use constellation_data::UnitRecord;

    fn link_from(origin: Vec3) -> Link {
        let a = Unit {
            id: UnitId(0),
            position: origin,
            record: UnitRecord::new(),
            color: Color::LIGHT_BLUE,
        };
        let b = Unit {
            id: UnitId(1),
            position: Vec3::new(0.0, 5.0, 0.0),
            record: UnitRecord::new(),
            color: Color::LIGHT_BLUE,
        };
        let config = LinkConfig {
            tubular_segments: 2,
            radial_segments: 3,
            ..LinkConfig::default()
        };
        build_link(LinkId(0), &a, &b, "gender", Color::BLUSH, &config)
    }

    #[test]
    fn test_initial_transform_sits_at_origin_unit() {
        let link = link_from(Vec3::new(4.0, -2.0, 6.0));
        let transform = link.transform();

        assert_eq!(transform.scale, 0.0);
        assert_eq!(transform.translation, Vec3::new(4.0, -2.0, 6.0));
    }

    #[test]
    fn test_fifty_steps_reach_exactly_one() {
        let mut link = link_from(Vec3::new(4.0, -2.0, 6.0));

        for _ in 0..50 {
            assert!(link.advance(0.02));
        }
        assert_eq!(link.growth(), 1.0);
        assert_eq!(link.state(), GrowthState::Settled);
        assert_eq!(link.transform().translation, Vec3::ZERO);
        assert_eq!(link.transform().scale, 1.0);

        // No 51st update
        assert!(!link.advance(0.02));
        assert_eq!(link.ticks(), 50);
    }

    #[test]
    fn test_growth_is_monotonic_and_stops() {
        let mut link = link_from(Vec3::new(1.0, 1.0, 1.0));
        let mut previous = link.transform().scale;
        let mut settled_scale = None;

        for _ in 0..60 {
            link.advance(0.02);
            let scale = link.transform().scale;
            assert!(scale >= previous);
            if let Some(settled) = settled_scale {
                assert_eq!(scale, settled);
            } else if link.growth() >= 1.0 {
                settled_scale = Some(scale);
            }
            previous = scale;
        }
        assert!(settled_scale.is_some());
    }

    #[test]
    fn test_overshoot_is_kept() {
        let mut link = link_from(Vec3::new(2.0, 0.0, 0.0));
        let mut steps = 0;
        while link.advance(0.3) {
            steps += 1;
        }

        assert_eq!(steps, 4);
        assert!((link.growth() - 1.2).abs() < 1e-9);
        // Translation overshoots past the coordinate origin as well
        assert!(link.transform().translation.x < 0.0);
    }

    #[test]
    fn test_interpolation_midway() {
        let mut link = link_from(Vec3::new(10.0, 0.0, -10.0));
        for _ in 0..25 {
            link.advance(0.02);
        }
        let transform = link.transform();

        assert!((transform.scale - 0.5).abs() < 1e-6);
        assert!(transform.translation.distance(Vec3::new(5.0, 0.0, -5.0)) < 1e-5);
    }

    #[test]
    fn test_advance_all_counts_growing_links() {
        let mut links = vec![link_from(Vec3::X), link_from(Vec3::Y)];
        links[1].advance(1.0);

        assert_eq!(advance_all(&mut links, 0.02), 1);
        assert_eq!(links[0].ticks(), 1);
        assert_eq!(links[1].ticks(), 1);
    }
}
