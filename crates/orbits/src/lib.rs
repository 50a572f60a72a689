//! Closed planar orbit curves addressed by arc length.
//!
//! An [`OrbitPath`] is an axis-aligned ellipse (a circle when both radii match). Its
//! perimeter is tabulated once at construction as cumulative chord lengths over a fixed
//! number of parameter samples, so `arc_length` and `point_at` are deterministic and agree
//! with each other exactly.
use std::f64::consts::TAU;

use orrery_core::vector::Point;
use tracing::debug;

/// Parameter samples per revolution.
const SAMPLES: usize = 1024;

#[derive(Debug, Clone)]
pub struct OrbitPath {
    center: Point,
    rx: f64,
    ry: f64,
    /// `cumulative[i]` is the arc length from the reference point to sample `i`;
    /// the last entry is the full perimeter. Empty for degenerate curves.
    cumulative: Vec<f64>,
    progress: f64,
    revolutions: u64,
}

impl OrbitPath {
    pub fn ellipse(center: Point, rx: f64, ry: f64) -> Self {
        let degenerate = !(rx.is_finite() && ry.is_finite()) || rx < 0.0 || ry < 0.0;
        let cumulative = if degenerate {
            Vec::new()
        } else {
            tabulate(rx, ry)
        };
        let path = Self {
            center,
            rx,
            ry,
            cumulative,
            progress: 0.0,
            revolutions: 0,
        };
        if path.is_degenerate() {
            debug!(rx, ry, "degenerate orbit, positions collapse to the center");
        }
        path
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::ellipse(center, radius, radius)
    }

    /// Total perimeter length; zero for degenerate curves.
    pub fn arc_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.arc_length() > 0.0)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radii(&self) -> (f64, f64) {
        (self.rx, self.ry)
    }

    /// Current arc-length position, always in `[0, arc_length)` (zero when degenerate).
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Completed laps since construction.
    pub fn revolutions(&self) -> u64 {
        self.revolutions
    }

    /// Point at `offset` along the perimeter, measured from `(cx + rx, cy)` in the order of
    /// increasing parameter angle. Offsets wrap modulo the perimeter in both directions.
    pub fn point_at(&self, offset: f64) -> Point {
        let length = self.arc_length();
        if !(length > 0.0) {
            return self.center;
        }
        let s = if offset.is_finite() {
            offset.rem_euclid(length)
        } else {
            0.0
        };

        let upper = self.cumulative.partition_point(|&c| c <= s);
        let i = upper.saturating_sub(1).min(SAMPLES - 1);
        let segment = self.cumulative[i + 1] - self.cumulative[i];
        let frac = if segment > 0.0 {
            ((s - self.cumulative[i]) / segment).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let a = self.vertex(i);
        let b = self.vertex(i + 1);
        Point::new(a.x + (b.x - a.x) * frac, a.y + (b.y - a.y) * frac)
    }

    /// Point at the current progress.
    pub fn position(&self) -> Point {
        self.point_at(self.progress)
    }

    /// Move the curve without touching its shape or progress.
    pub fn recenter(&mut self, center: Point) {
        self.center = center;
    }

    /// Place the body at `offset`, wrapped into `[0, arc_length)`.
    pub fn set_progress(&mut self, offset: f64) {
        let length = self.arc_length();
        self.progress = if length > 0.0 && offset.is_finite() {
            let wrapped = offset.rem_euclid(length);
            if wrapped >= length { 0.0 } else { wrapped }
        } else {
            0.0
        };
    }

    /// Add `step` to the progress. Reaching or passing the end resets progress to zero;
    /// a negative step that crosses the start wraps to the far end. Either crossing counts
    /// as one revolution. Returns whether a wrap happened.
    pub fn advance(&mut self, step: f64) -> bool {
        let length = self.arc_length();
        if !(length > 0.0) || !step.is_finite() {
            self.progress = 0.0;
            return false;
        }
        let next = self.progress + step;
        if next >= length {
            self.progress = 0.0;
        } else if next < 0.0 {
            self.set_progress(next);
        } else {
            self.progress = next;
            return false;
        }
        self.revolutions += 1;
        true
    }

    fn vertex(&self, i: usize) -> Point {
        let t = TAU * (i as f64) / (SAMPLES as f64);
        Point::new(
            self.center.x + self.rx * t.cos(),
            self.center.y + self.ry * t.sin(),
        )
    }
}

fn tabulate(rx: f64, ry: f64) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(SAMPLES + 1);
    cumulative.push(0.0);
    let mut prev = (rx, 0.0);
    let mut total = 0.0;
    for i in 1..=SAMPLES {
        let t = TAU * (i as f64) / (SAMPLES as f64);
        let next = (rx * t.cos(), ry * t.sin());
        total += (next.0 - prev.0).hypot(next.1 - prev.1);
        cumulative.push(total);
        prev = next;
    }
    cumulative
}
