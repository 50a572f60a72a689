//! [`SolarSystemSession`]: owns every body and orbit of one load and advances them.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, trace, warn};

use orrery_bodies::{BodyId, CelestialBody, IdDispenser, normalize};
use orrery_config::{BodySource, OrreryConfig, RawRecord};
use orrery_core::constants::DEFAULT_SATELLITE_STEP;
use orrery_core::vector::Point;
use orrery_orbits::OrbitPath;

use crate::LoadError;
use crate::layout::{Layout, SATELLITE_SIZE, finite_max};
use crate::snapshot::{BodySnapshot, OrbitSnapshot};

/// New position of one body after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionUpdate {
    pub body: BodyId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Empty,
    Loaded { planets: usize, satellites: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub planets: usize,
    pub satellites: usize,
}

/// A body together with its live orbit.
#[derive(Debug, Clone)]
struct Tracked {
    body: CelestialBody,
    orbit: OrbitPath,
    step: f64,
    size: f64,
    position: Point,
}

impl Tracked {
    fn advance(&mut self) {
        self.orbit.advance(self.step);
        self.position = self.orbit.position();
    }

    fn update(&self) -> PositionUpdate {
        PositionUpdate {
            body: self.body.id,
            x: self.position.x,
            y: self.position.y,
        }
    }

    fn snapshot(&self, parent: Option<BodyId>) -> BodySnapshot {
        let (rx, ry) = self.orbit.radii();
        BodySnapshot {
            body: self.body.clone(),
            parent,
            position: self.position,
            size: self.size,
            orbit: OrbitSnapshot {
                center: self.orbit.center(),
                rx,
                ry,
                arc_length: self.orbit.arc_length(),
                progress: self.orbit.progress(),
                revolutions: self.orbit.revolutions(),
            },
        }
    }
}

#[derive(Debug, Clone)]
struct PlanetSlot {
    /// The planet itself; its `body.satellites` is left empty, the satellites live below.
    planet: Tracked,
    satellites: Vec<Tracked>,
}

impl PlanetSlot {
    fn advance_satellites(&mut self) {
        let center = self.planet.position;
        for sat in &mut self.satellites {
            sat.orbit.advance(sat.step);
            sat.orbit.recenter(center);
            sat.position = sat.orbit.position();
        }
    }

    fn push_updates(&self, out: &mut Vec<PositionUpdate>) {
        out.push(self.planet.update());
        out.extend(self.satellites.iter().map(Tracked::update));
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Planet(usize),
    Satellite(usize, usize),
}

/// Owns the bodies of the current load. Disposable: create one per scene or per test.
#[derive(Debug)]
pub struct SolarSystemSession {
    layout: Layout,
    satellite_step: f64,
    ids: IdDispenser,
    planets: Vec<PlanetSlot>,
    index: HashMap<BodyId, Slot>,
    status: SessionStatus,
    ticks: u64,
}

impl Default for SolarSystemSession {
    fn default() -> Self {
        Self::new(Layout::default(), DEFAULT_SATELLITE_STEP)
    }
}

impl SolarSystemSession {
    pub fn new(layout: Layout, satellite_step: f64) -> Self {
        Self {
            layout,
            satellite_step,
            ids: IdDispenser::new(),
            planets: Vec::new(),
            index: HashMap::new(),
            status: SessionStatus::Empty,
            ticks: 0,
        }
    }

    pub fn from_config(config: &OrreryConfig) -> Self {
        Self::new(Layout::from_config(config), config.satellite_step)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn sun(&self) -> Point {
        self.layout.sun()
    }

    /// Ticks applied since the session was created.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Planets plus satellites.
    pub fn body_count(&self) -> usize {
        self.index.len()
    }

    /// Discard every body. Ids already handed out stay retired.
    pub fn clear(&mut self) {
        self.planets.clear();
        self.index.clear();
        self.status = SessionStatus::Empty;
    }

    /// Replace the current bodies with a freshly normalized set. On failure the session is
    /// left empty and reports [`SessionStatus::Failed`].
    pub fn load(&mut self, records: &[RawRecord]) -> Result<LoadSummary, LoadError> {
        self.clear();
        match normalize(records, &mut self.ids) {
            Ok(bodies) => Ok(self.install(bodies)),
            Err(err) => Err(self.fail(err.into())),
        }
    }

    /// Fetch records from `source` and load them.
    pub fn load_from(&mut self, source: &mut dyn BodySource) -> Result<LoadSummary, LoadError> {
        match source.fetch() {
            Ok(records) => self.load(&records),
            Err(err) => {
                self.clear();
                Err(self.fail(err.into()))
            }
        }
    }

    fn fail(&mut self, err: LoadError) -> LoadError {
        warn!(%err, "load failed, scene left empty");
        self.status = SessionStatus::Failed {
            reason: err.to_string(),
        };
        err
    }

    fn install(&mut self, bodies: Vec<CelestialBody>) -> LoadSummary {
        let max_distance = finite_max(bodies.iter().map(|b| b.distance));
        let max_radius = finite_max(bodies.iter().map(|b| b.radius));
        if !bodies.is_empty() && max_distance == 0.0 {
            warn!("no planet has a positive distance, all orbits collapse onto the sun");
        }

        let count = bodies.len();
        let mut satellites_total = 0;
        for (i, mut body) in bodies.into_iter().enumerate() {
            let children = std::mem::take(&mut body.satellites);
            let mut orbit = self.layout.planet_orbit(body.distance, max_distance);
            orbit.set_progress(seed(orbit.arc_length(), i, count));
            let planet = Tracked {
                step: body.orbit_time_step().unwrap_or(0.0),
                size: self.layout.planet_size(body.radius, max_radius),
                position: orbit.position(),
                orbit,
                body,
            };

            let max_sat_distance = finite_max(children.iter().map(|s| s.distance));
            let siblings = children.len();
            let satellites: Vec<Tracked> = children
                .into_iter()
                .enumerate()
                .map(|(j, sat)| {
                    let mut orbit =
                        self.layout
                            .satellite_orbit(sat.distance, max_sat_distance, planet.position);
                    orbit.set_progress(seed(orbit.arc_length(), j, siblings));
                    Tracked {
                        step: self.satellite_step,
                        size: SATELLITE_SIZE,
                        position: orbit.position(),
                        orbit,
                        body: sat,
                    }
                })
                .collect();

            let p = self.planets.len();
            self.index.insert(planet.body.id, Slot::Planet(p));
            for (j, sat) in satellites.iter().enumerate() {
                self.index.insert(sat.body.id, Slot::Satellite(p, j));
            }
            satellites_total += satellites.len();
            self.planets.push(PlanetSlot { planet, satellites });
        }

        info!(planets = count, satellites = satellites_total, "solar system loaded");
        self.status = SessionStatus::Loaded {
            planets: count,
            satellites: satellites_total,
        };
        LoadSummary {
            planets: count,
            satellites: satellites_total,
        }
    }

    /// Advance every body by one tick and return the new positions, each planet followed
    /// by its satellites.
    ///
    /// All planets move first; satellites then recenter on their parent's position from
    /// this same tick.
    pub fn tick(&mut self) -> Vec<PositionUpdate> {
        self.ticks += 1;
        for slot in &mut self.planets {
            slot.planet.advance();
        }
        for slot in &mut self.planets {
            slot.advance_satellites();
        }
        trace!(tick = self.ticks, bodies = self.index.len(), "tick");
        self.positions()
    }

    /// Advance a single planet and its satellites. `None` when `id` is not a loaded planet.
    pub fn advance_planet(&mut self, id: BodyId) -> Option<Vec<PositionUpdate>> {
        let Some(Slot::Planet(p)) = self.index.get(&id).copied() else {
            return None;
        };
        let slot = &mut self.planets[p];
        slot.planet.advance();
        slot.advance_satellites();
        let mut out = Vec::with_capacity(1 + slot.satellites.len());
        slot.push_updates(&mut out);
        Some(out)
    }

    /// Current positions of every body, in tick order.
    pub fn positions(&self) -> Vec<PositionUpdate> {
        let mut out = Vec::with_capacity(self.index.len());
        for slot in &self.planets {
            slot.push_updates(&mut out);
        }
        out
    }

    /// A detached copy of one body, or `None` for unknown (or discarded) ids.
    pub fn snapshot(&self, id: BodyId) -> Option<BodySnapshot> {
        match *self.index.get(&id)? {
            Slot::Planet(p) => Some(self.planet_snapshot(&self.planets[p])),
            Slot::Satellite(p, s) => {
                let slot = &self.planets[p];
                Some(slot.satellites[s].snapshot(Some(slot.planet.body.id)))
            }
        }
    }

    /// Snapshots of every body, in tick order.
    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        let mut out = Vec::with_capacity(self.index.len());
        for slot in &self.planets {
            out.push(self.planet_snapshot(slot));
            let parent = Some(slot.planet.body.id);
            out.extend(slot.satellites.iter().map(|s| s.snapshot(parent)));
        }
        out
    }

    /// Ids of the loaded planets, in load order.
    pub fn planet_ids(&self) -> Vec<BodyId> {
        self.planets.iter().map(|s| s.planet.body.id).collect()
    }

    fn planet_snapshot(&self, slot: &PlanetSlot) -> BodySnapshot {
        let mut snapshot = slot.planet.snapshot(None);
        snapshot.body.satellites = slot.satellites.iter().map(|s| s.body.clone()).collect();
        snapshot
    }
}

/// Spread `count` bodies evenly along an orbit so they start apart.
fn seed(arc_length: f64, index: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        arc_length * index as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_config::Viewport;

    fn planet(name: &str, distance: &str, years: &str) -> RawRecord {
        RawRecord::from_fields([
            ("name", name),
            ("distance", distance),
            ("radius", "1000"),
            ("length_of_year", years),
        ])
    }

    fn moon(name: &str, distance: &str) -> RawRecord {
        RawRecord::from_fields([("name", name), ("distance_from_planet", distance)])
    }

    fn small_layout() -> Layout {
        Layout {
            viewport: Viewport {
                width: 100.0,
                height: 60.0,
            },
            orbit_fill: 1.0,
            satellite_orbit_scale: 4.0,
        }
    }

    #[test]
    fn bodies_start_spread_along_their_orbits() {
        let mut session = SolarSystemSession::new(small_layout(), 2.0);
        let records = [planet("A", "10", "1"), planet("B", "20", "2")];
        session.load(&records).expect("load");
        let b = session.snapshot(session.planet_ids()[1]).unwrap();
        assert!((b.orbit.progress - b.orbit.arc_length / 2.0).abs() < 1e-9);
        let a = session.snapshot(session.planet_ids()[0]).unwrap();
        assert_eq!(a.orbit.progress, 0.0);
    }

    #[test]
    fn satellites_are_glued_to_the_initial_planet_position() {
        let mut session = SolarSystemSession::new(small_layout(), 2.0);
        let records = [planet("A", "10", "1").with_satellites(vec![moon("a1", "3")])];
        session.load(&records).expect("load");
        let snaps = session.snapshots();
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[1].parent, Some(snaps[0].id()));
        assert_eq!(snaps[1].orbit.center, snaps[0].position);
        assert_eq!(snaps[0].body.satellites.len(), 1);
    }

    #[test]
    fn advance_planet_moves_only_that_family() {
        let mut session = SolarSystemSession::new(small_layout(), 2.0);
        let records = [
            planet("A", "10", "1").with_satellites(vec![moon("a1", "3")]),
            planet("B", "20", "2"),
        ];
        session.load(&records).expect("load");
        let ids = session.planet_ids();
        let before_b = session.snapshot(ids[1]).unwrap().orbit.progress;
        let updates = session.advance_planet(ids[0]).expect("planet");
        assert_eq!(updates.len(), 2);
        assert_eq!(session.snapshot(ids[1]).unwrap().orbit.progress, before_b);
        let moon_id = updates[1].body;
        assert!(session.advance_planet(moon_id).is_none());
    }

    #[test]
    fn failed_load_reports_one_condition_and_empties_the_scene() {
        let mut session = SolarSystemSession::new(small_layout(), 2.0);
        session.load(&[planet("A", "10", "1")]).expect("load");
        let err = session
            .load(&[RawRecord::from_fields([("name", "Broken")])])
            .unwrap_err();
        assert!(matches!(err, LoadError::Shape(_)));
        assert_eq!(session.body_count(), 0);
        assert!(matches!(session.status(), SessionStatus::Failed { .. }));
        assert!(session.tick().is_empty());
    }
}
