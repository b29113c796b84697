//! Top-level error type for engine entry points.

use constellation_data::SourceError;

use crate::config::ConfigError;
use crate::placement::PlacementError;

/// Errors surfaced by the engine's entry points.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("data source: {0}")]
    Source(#[from] SourceError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
