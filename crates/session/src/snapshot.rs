//! Read-only copies of body state handed to presentation code.

use serde::Serialize;

use orrery_bodies::{BodyId, CelestialBody};
use orrery_core::vector::Point;

/// Orbit geometry and progress at the time the snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitSnapshot {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    pub arc_length: f64,
    pub progress: f64,
    pub revolutions: u64,
}

/// A detached copy of one body. Mutating it has no effect on the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub body: CelestialBody,
    pub parent: Option<BodyId>,
    pub position: Point,
    /// Rendered size in viewport units.
    pub size: f64,
    pub orbit: OrbitSnapshot,
}

impl BodySnapshot {
    pub fn id(&self) -> BodyId {
        self.body.id
    }
}
