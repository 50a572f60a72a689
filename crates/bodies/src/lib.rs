//! Celestial body model, the normalizer that builds it from raw records, and the
//! presentation helpers used for tooltip text.

pub mod facts;
pub mod id;
pub mod model;
pub mod natural;
pub mod normalize;

pub use facts::facts;
pub use id::{BodyId, IdDispenser};
pub use model::{BodyKind, CelestialBody, PlanetMetrics, SatelliteMetrics};
pub use natural::natural_language;
pub use normalize::{DataShapeError, normalize};
