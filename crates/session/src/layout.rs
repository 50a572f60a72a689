//! Maps body distances and radii onto the viewport.

use orrery_config::{OrreryConfig, Viewport};
use orrery_core::vector::Point;
use orrery_orbits::OrbitPath;

/// Rendered size of every satellite.
pub const SATELLITE_SIZE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub viewport: Viewport,
    /// Fraction of the half-viewport used by the outermost planet orbit.
    pub orbit_fill: f64,
    /// Radius of the outermost satellite orbit around its planet.
    pub satellite_orbit_scale: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self::from_config(&OrreryConfig::default())
    }
}

impl Layout {
    pub fn from_config(config: &OrreryConfig) -> Self {
        Self {
            viewport: config.viewport,
            orbit_fill: config.orbit_fill,
            satellite_orbit_scale: config.satellite_orbit_scale,
        }
    }

    /// The sun sits at the middle of the viewport.
    pub fn sun(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    /// Ellipse around the sun with the viewport's aspect ratio, scaled by distance.
    pub fn planet_orbit(&self, distance: f64, max_distance: f64) -> OrbitPath {
        let r = ratio(distance, max_distance) * self.orbit_fill;
        OrbitPath::ellipse(
            self.sun(),
            self.viewport.width / 2.0 * r,
            self.viewport.height / 2.0 * r,
        )
    }

    pub fn planet_size(&self, radius: f64, max_radius: f64) -> f64 {
        ratio(radius, max_radius) * self.viewport.height / 50.0 + 2.0
    }

    /// Circle around the parent planet, scaled against the farthest sibling.
    pub fn satellite_orbit(&self, distance: f64, max_distance: f64, parent: Point) -> OrbitPath {
        OrbitPath::circle(parent, self.satellite_orbit_scale * ratio(distance, max_distance))
    }
}

fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 && value.is_finite() {
        value / max
    } else {
        0.0
    }
}

/// Largest finite value, or zero when there is none.
pub(crate) fn finite_max(values: impl Iterator<Item = f64>) -> f64 {
    values.filter(|v| v.is_finite()).fold(0.0, f64::max)
}
