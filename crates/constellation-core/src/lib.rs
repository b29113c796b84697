//! Constellation engine: layout, selection, and link growth.
//!
//! Units are scattered through a volume sized from the viewport without ever
//! coming closer than a fixed distance. Selecting a unit links it to every
//! unit sharing one of its attribute values, and each link grows out of the
//! selected unit over successive frames while an idle camera orbits the
//! scene.
//!
//! # Architecture
//!
//! ```text
//! records ──▶ placement ──▶ Constellation ◀── pointer / click / resize
//!                               │
//!               relations ──▶ link ──▶ growth (per frame)
//!                               │
//!                     drift ──▶ camera pose ──▶ renderer
//! ```
//!
//! # Modules
//!
//! - [`world`]: the [`Constellation`] owning every unit, link and clock
//! - [`placement`]: rejection sampling with a retry ceiling
//! - [`spatial`]: grid used for neighbor checks
//! - [`relations`]: shared-attribute discovery
//! - [`link`], [`curve`], [`tube`]: link geometry
//! - [`growth`]: per-frame link animation
//! - [`drift`]: idle camera orbit
//! - [`picking`]: ray vs unit spheres
//! - [`scheduler`]: stop flag and headless frame loop

pub use glam;

pub mod color;
pub mod config;
pub mod curve;
pub mod drift;
pub mod error;
pub mod growth;
pub mod link;
pub mod output;
pub mod picking;
pub mod placement;
pub mod relations;
pub mod scheduler;
pub mod spatial;
pub mod tube;
pub mod viewport;
pub mod world;

pub use color::{Color, ParseColorError};
pub use config::{CameraConfig, ConfigError, EngineConfig, GrowthConfig, LinkConfig, PlacementConfig};
pub use curve::CatmullRomCurve;
pub use drift::{ActivityClock, CameraDrift, CameraPose};
pub use error::EngineError;
pub use growth::{advance_all, GrowthState, LinkTransform};
pub use link::{build_link, Link, LinkId};
pub use output::SceneSummary;
pub use picking::{pick, Ray};
pub use placement::{find_free_position, sample_candidate, Placement, PlacementError};
pub use relations::{resolve_links, Relation};
pub use scheduler::{run_frames, FrameClock, StopFlag};
pub use spatial::SpatialHash;
pub use tube::TubeGeometry;
pub use viewport::Viewport;
pub use world::{Constellation, FrameReport, LoadReport, Unit, UnitId};
