//! Typed body records produced once per load.

use serde::Serialize;

use crate::id::BodyId;

/// Quantities only planets carry. Derived values are computed by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetMetrics {
    /// Year length in Earth years, as given by the data file.
    pub length_of_year: f64,
    /// `length_of_year * 365`.
    pub orbit_period: f64,
    /// `1 - orbit_period / 1e5`, the per-tick progress increment.
    pub orbit_time_step: f64,
    pub day: f64,
    pub mass: f64,
    pub density: f64,
}

/// Quantities only satellites carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SatelliteMetrics {
    /// Orbit duration from the data file. Recorded for display only: every satellite
    /// advances by the same fixed step.
    pub orbit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BodyKind {
    Planet(PlanetMetrics),
    Satellite(SatelliteMetrics),
}

/// A planet or a satellite. Satellites are listed under exactly one planet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelestialBody {
    pub id: BodyId,
    pub name: String,
    pub color: String,
    /// Distance from the sun for planets, from the parent planet for satellites.
    pub distance: f64,
    pub radius: f64,
    pub kind: BodyKind,
    pub satellites: Vec<CelestialBody>,
}

impl CelestialBody {
    pub fn planet_metrics(&self) -> Option<&PlanetMetrics> {
        match &self.kind {
            BodyKind::Planet(metrics) => Some(metrics),
            BodyKind::Satellite(_) => None,
        }
    }

    /// Per-tick step for planets; `None` for satellites, which use the shared constant.
    pub fn orbit_time_step(&self) -> Option<f64> {
        self.planet_metrics().map(|m| m.orbit_time_step)
    }

    /// This body plus all of its satellites.
    pub fn body_count(&self) -> usize {
        1 + self.satellites.len()
    }
}
