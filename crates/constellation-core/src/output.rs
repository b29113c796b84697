//! Serializable scene summaries for headless runs.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use constellation_data::UnitRecord;

use crate::drift::CameraPose;
use crate::growth::{GrowthState, LinkTransform};
use crate::link::LinkId;
use crate::world::{Constellation, UnitId};

/// Snapshot of a world after a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSummary {
    pub frame: u64,
    pub viewport: ViewportSummary,
    pub camera: CameraPose,
    pub camera_speed: f32,
    pub units: Vec<UnitSummary>,
    pub links: Vec<LinkSummary>,
    /// Records that could not be placed.
    pub placement_failures: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSummary {
    pub width: f32,
    pub height: f32,
    pub limit_x: f32,
    pub limit_y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSummary {
    pub id: UnitId,
    pub position: Vec3,
    pub color: String,
    pub attributes: UnitRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSummary {
    pub id: LinkId,
    pub origin: UnitId,
    pub target: UnitId,
    pub attribute: String,
    pub growth: f64,
    pub state: GrowthState,
    pub transform: LinkTransform,
}

impl SceneSummary {
    /// Capture the current state of `world`.
    pub fn capture(world: &Constellation, placement_failures: usize) -> Self {
        let viewport = world.viewport();
        Self {
            frame: world.frame(),
            viewport: ViewportSummary {
                width: viewport.width,
                height: viewport.height,
                limit_x: viewport.limit_x,
                limit_y: viewport.limit_y,
            },
            camera: world.camera(),
            camera_speed: world.activity().current_speed,
            units: world
                .units()
                .iter()
                .map(|u| UnitSummary {
                    id: u.id,
                    position: u.position,
                    color: u.color.to_hex(),
                    attributes: u.record.clone(),
                })
                .collect(),
            links: world
                .links()
                .iter()
                .map(|l| LinkSummary {
                    id: l.id,
                    origin: l.origin,
                    target: l.target,
                    attribute: l.attribute.clone(),
                    growth: l.growth(),
                    state: l.state(),
                    transform: l.transform(),
                })
                .collect(),
            placement_failures,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
