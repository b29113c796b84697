//! The world: sole owner of every piece of mutable engine state.

use bevy_ecs::prelude::Resource;
use constellation_data::UnitRecord;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::EngineConfig;
use crate::drift::{ActivityClock, CameraDrift, CameraPose};
use crate::growth::advance_all;
use crate::link::{build_link, Link, LinkId};
use crate::picking::{pick, Ray};
use crate::placement::{find_free_position, PlacementError};
use crate::relations::resolve_links;
use crate::spatial::SpatialHash;
use crate::viewport::Viewport;

/// Index of a unit in the world's unit arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// A placed entity. Never moved or removed once placed.
#[derive(Debug, Clone)]
pub struct Unit {
    pub id: UnitId,
    pub position: Vec3,
    pub record: UnitRecord,
    pub color: Color,
}

/// Outcome of loading a batch of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Units placed, in record order.
    pub placed: Vec<UnitId>,
    /// Records that could not be placed.
    pub failed: usize,
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at 1.
    pub frame: u64,
    pub camera: CameraPose,
    /// Links that grew this frame.
    pub links_advanced: usize,
}

/// Units, links, input activity and camera state for one scene.
///
/// Units and links live in append-only arenas indexed by [`UnitId`] and
/// [`LinkId`]. Renderers keep their own handles keyed by those ids.
#[derive(Resource)]
pub struct Constellation {
    config: EngineConfig,
    viewport: Viewport,
    units: Vec<Unit>,
    links: Vec<Link>,
    index: SpatialHash,
    activity: ActivityClock,
    drift: CameraDrift,
    rng: SmallRng,
    frame: u64,
}

impl Constellation {
    /// Create an empty world.
    pub fn new(config: EngineConfig, width: f32, height: f32, seed: u64, now_ms: u64) -> Self {
        let viewport = Viewport::new(width, height, &config.placement);
        let index = SpatialHash::new(config.placement.min_distance);
        let activity = ActivityClock::new(now_ms, &config.camera);
        Self {
            config,
            viewport,
            units: Vec::new(),
            links: Vec::new(),
            index,
            activity,
            drift: CameraDrift::default(),
            rng: SmallRng::seed_from_u64(seed),
            frame: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0 as usize)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.0 as usize)
    }

    pub fn activity(&self) -> &ActivityClock {
        &self.activity
    }

    /// Camera pose as of the last frame.
    pub fn camera(&self) -> CameraPose {
        self.drift.pose(&self.config.camera)
    }

    /// Frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Place one unit for `record`.
    pub fn place_unit(&mut self, record: UnitRecord, color: Color) -> Result<UnitId, PlacementError> {
        let placement = find_free_position(
            &mut self.rng,
            &self.viewport,
            &self.index,
            &self.config.placement,
        )?;

        let id = UnitId(self.units.len() as u32);
        tracing::debug!(
            unit = id.0,
            attempts = placement.attempts,
            position = ?placement.position,
            "Placed unit"
        );
        self.index.insert(id, placement.position);
        self.units.push(Unit {
            id,
            position: placement.position,
            record,
            color,
        });
        Ok(id)
    }

    /// Place every record in order with the configured unit color.
    ///
    /// A record that cannot be placed is logged and skipped.
    pub fn load(&mut self, records: impl IntoIterator<Item = UnitRecord>) -> LoadReport {
        let color = self.config.placement.unit_color;
        let mut report = LoadReport::default();
        for record in records {
            match self.place_unit(record, color) {
                Ok(id) => report.placed.push(id),
                Err(e) => {
                    tracing::warn!(error = %e, "Could not place unit");
                    report.failed += 1;
                }
            }
        }
        tracing::info!(
            placed = report.placed.len(),
            failed = report.failed,
            total = self.units.len(),
            "Loaded units"
        );
        report
    }

    /// Create one link per relationship of `selected`. Unknown ids create nothing.
    pub fn select(&mut self, selected: UnitId) -> Vec<LinkId> {
        let Some(origin) = self.units.get(selected.0 as usize) else {
            tracing::debug!(unit = selected.0, "Selected unknown unit");
            return Vec::new();
        };

        let relations: Vec<(UnitId, String)> = resolve_links(&self.units, origin)
            .map(|r| (r.target, r.attribute.to_string()))
            .collect();

        let color = self.config.links.color;
        let mut created = Vec::with_capacity(relations.len());
        for (target, attribute) in relations {
            let id = LinkId(self.links.len() as u32);
            let link = build_link(
                id,
                &self.units[selected.0 as usize],
                &self.units[target.0 as usize],
                attribute,
                color,
                &self.config.links,
            );
            self.links.push(link);
            created.push(id);
        }

        tracing::debug!(unit = selected.0, links = created.len(), "Selected unit");
        created
    }

    /// Unit under `ray`, if any.
    pub fn pick(&self, ray: &Ray) -> Option<UnitId> {
        pick(&self.units, ray, self.config.placement.unit_radius)
    }

    /// Pick with `ray` and select the hit unit.
    pub fn select_at(&mut self, ray: &Ray) -> Option<(UnitId, Vec<LinkId>)> {
        let hit = self.pick(ray)?;
        let links = self.select(hit);
        Some((hit, links))
    }

    /// Ray through a screen coordinate from the current camera pose.
    pub fn screen_ray(&self, screen: glam::Vec2) -> Ray {
        let ndc = self.viewport.ndc(screen);
        self.camera().ray_through(ndc, self.viewport.aspect())
    }

    /// Record pointer movement.
    pub fn pointer_moved(&mut self, now_ms: u64) {
        self.activity.record_input(now_ms);
    }

    /// New viewport size. Only later placements see the new limits.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        tracing::debug!(
            width,
            height,
            limit_x = self.viewport.limit_x,
            limit_y = self.viewport.limit_y,
            "Viewport resized"
        );
    }

    /// Advance the camera and grow every link present at call time once.
    pub fn tick(&mut self, now_ms: u64) -> FrameReport {
        self.frame += 1;
        let camera = self
            .drift
            .update(now_ms, &mut self.activity, &self.config.camera);
        let links_advanced = advance_all(&mut self.links, self.config.growth.step);
        FrameReport {
            frame: self.frame,
            camera,
            links_advanced,
        }
    }
}
