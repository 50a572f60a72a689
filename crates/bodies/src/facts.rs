//! Tooltip rows for a body: natural-language labels paired with display values.

use crate::model::{BodyKind, CelestialBody};
use crate::natural::natural_language;

/// Label/value rows describing a body, in display order.
pub fn facts(body: &CelestialBody) -> Vec<(String, String)> {
    let mut rows = vec![row("name", natural_language(&body.name))];
    if !body.color.is_empty() {
        rows.push(row("color", body.color.clone()));
    }
    match &body.kind {
        BodyKind::Planet(metrics) => {
            rows.push(row("distance", number(body.distance)));
            rows.push(row("radius", number(body.radius)));
            rows.push(row("length_of_year", number(metrics.length_of_year)));
            rows.push(row("day", number(metrics.day)));
            rows.push(row("mass", number(metrics.mass)));
            rows.push(row("density", number(metrics.density)));
            rows.push(row("satellites", body.satellites.len().to_string()));
        }
        BodyKind::Satellite(metrics) => {
            rows.push(row("distance_from_planet", number(body.distance)));
            rows.push(row("orbit", number(metrics.orbit)));
        }
    }
    rows
}

fn row(field: &str, value: String) -> (String, String) {
    (natural_language(field), value)
}

fn number(value: f64) -> String {
    if !value.is_finite() {
        return "Unknown".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        natural_language(&format!("{}", value as i64))
    } else {
        format!("{value}")
    }
}
