//! Links: tubes connecting a selected unit to a related unit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::LinkConfig;
use crate::curve::CatmullRomCurve;
use crate::growth::GrowthState;
use crate::tube::TubeGeometry;
use crate::world::{Unit, UnitId};

/// Index of a link in the world's link arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(pub u32);

/// A visual relation from an origin unit to a target unit.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: LinkId,
    pub origin: UnitId,
    pub target: UnitId,
    /// Attribute group that produced this link.
    pub attribute: String,
    /// Origin position at creation time.
    pub origin_position: Vec3,
    pub target_position: Vec3,
    pub color: Color,
    /// Full-size geometry, shown at growth 1.
    pub geometry: TubeGeometry,
    pub(crate) ticks: u32,
    pub(crate) growth: f64,
    pub(crate) state: GrowthState,
}

impl Link {
    /// Growth progress; starts at 0 and may end slightly above 1.
    pub fn growth(&self) -> f64 {
        self.growth
    }

    pub fn state(&self) -> GrowthState {
        self.state
    }

    /// Growth ticks applied so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}

/// Build a link from `origin` to `target`.
///
/// Every call sweeps new geometry; nothing is shared between links.
pub fn build_link(
    id: LinkId,
    origin: &Unit,
    target: &Unit,
    attribute: impl Into<String>,
    color: Color,
    config: &LinkConfig,
) -> Link {
    let curve = CatmullRomCurve::between(origin.position, target.position);
    let geometry = TubeGeometry::sweep(
        &curve,
        config.tubular_segments,
        config.radius,
        config.radial_segments,
    );

    Link {
        id,
        origin: origin.id,
        target: target.id,
        attribute: attribute.into(),
        origin_position: origin.position,
        target_position: target.position,
        color,
        geometry,
        ticks: 0,
        growth: 0.0,
        state: GrowthState::Growing,
    }
}
