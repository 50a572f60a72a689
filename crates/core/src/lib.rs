//! Core constants and shared planar primitives for the Solar Orrery workspace.

/// Constants shared by the normalizer, the advancer and the scheduler.
pub mod constants {
    /// Days in one Earth year, used to turn `length_of_year` into an orbit period.
    pub const DAYS_PER_EARTH_YEAR: f64 = 365.0;
    /// Divisor of the inverse-period heuristic `1 - period / ORBIT_STEP_SCALE`.
    pub const ORBIT_STEP_SCALE: f64 = 1e5;
    /// Arc-length increment applied to every satellite on every tick.
    pub const DEFAULT_SATELLITE_STEP: f64 = 2.0;
    /// Default wall-clock period between two ticks, in milliseconds.
    pub const DEFAULT_TICK_PERIOD_MS: u64 = 200;
    /// Radius of the sun drawn at the viewport center.
    pub const SUN_RADIUS: f64 = 5.0;
}

/// Conversions between the raw data units and the normalized orbit units.
pub mod units {
    use super::constants::{DAYS_PER_EARTH_YEAR, ORBIT_STEP_SCALE};

    /// Convert a year length expressed in Earth years to days.
    #[inline]
    pub fn earth_years_to_days(years: f64) -> f64 {
        years * DAYS_PER_EARTH_YEAR
    }

    /// Per-tick progress increment for an orbit period in days.
    ///
    /// This is an inverse-period heuristic rather than an angular velocity: long periods
    /// advance slowly and periods beyond `ORBIT_STEP_SCALE` days yield a negative step.
    #[inline]
    pub fn orbit_time_step(period_days: f64) -> f64 {
        1.0 - period_days / ORBIT_STEP_SCALE
    }
}

/// Planar point helpers so that orbit code never juggles bare `(f64, f64)` tuples.
pub mod vector {
    use serde::Serialize;

    /// A position on the diagram plane, in viewport units.
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
    pub struct Point {
        pub x: f64,
        pub y: f64,
    }

    impl Point {
        pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

        #[inline]
        pub const fn new(x: f64, y: f64) -> Self {
            Self { x, y }
        }

        /// Component-wise sum.
        #[inline]
        pub fn add(self, other: Point) -> Point {
            Point::new(self.x + other.x, self.y + other.y)
        }

        /// Component-wise difference.
        #[inline]
        pub fn sub(self, other: Point) -> Point {
            Point::new(self.x - other.x, self.y - other.y)
        }

        /// Euclidean distance to another point.
        #[inline]
        pub fn distance(self, other: Point) -> f64 {
            let d = self.sub(other);
            d.x.hypot(d.y)
        }

        /// True when both coordinates are finite.
        #[inline]
        pub fn is_finite(self) -> bool {
            self.x.is_finite() && self.y.is_finite()
        }

        /// Approximate equality used by tests and by the closure check.
        #[inline]
        pub fn approx_eq(self, other: Point, tolerance: f64) -> bool {
            (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::units::{earth_years_to_days, orbit_time_step};
    use super::vector::Point;

    #[test]
    fn earth_step_matches_heuristic() {
        let period = earth_years_to_days(1.0);
        assert_eq!(period, 365.0);
        assert!((orbit_time_step(period) - 0.99635).abs() < 1e-12);
    }

    #[test]
    fn very_long_years_produce_negative_steps() {
        assert!(orbit_time_step(earth_years_to_days(300.0)) < 0.0);
    }

    #[test]
    fn point_distance() {
        let a = Point::new(3.0, 0.0);
        let b = Point::new(0.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert!(a.add(b).sub(b).approx_eq(a, 1e-12));
    }
}
