//! Orbit state for a loaded solar system and its per-tick advancement.

pub mod layout;
pub mod session;
pub mod snapshot;

pub use layout::Layout;
pub use session::{LoadSummary, PositionUpdate, SessionStatus, SolarSystemSession};
pub use snapshot::{BodySnapshot, OrbitSnapshot};

use orrery_bodies::DataShapeError;
use orrery_config::ConfigError;

/// Why a load produced no scene. Reported once, never per field.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to acquire body data: {0}")]
    Source(#[from] ConfigError),
    #[error("body data is malformed: {0}")]
    Shape(#[from] DataShapeError),
}
