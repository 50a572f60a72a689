//! Raw record → [`CelestialBody`] conversion.
//!
//! Mandatory fields fail the whole load. Optional numeric fields are permissive and
//! become `NaN` when missing or malformed.

use thiserror::Error;
use tracing::debug;

use orrery_config::RawRecord;
use orrery_core::units::{earth_years_to_days, orbit_time_step};

use crate::id::IdDispenser;
use crate::model::{BodyKind, CelestialBody, PlanetMetrics, SatelliteMetrics};

/// A body record that cannot be turned into a renderable body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataShapeError {
    #[error("{body}: missing required field `{field}`")]
    MissingField { body: String, field: &'static str },
    #[error("{body}: field `{field}` must be a finite, non-negative number (got `{value}`)")]
    InvalidNumber {
        body: String,
        field: &'static str,
        value: String,
    },
}

/// Normalize planet records (with nested satellites) into typed bodies, assigning ids.
pub fn normalize(
    records: &[RawRecord],
    ids: &mut IdDispenser,
) -> Result<Vec<CelestialBody>, DataShapeError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| planet(record, index, ids))
        .collect()
}

fn planet(
    record: &RawRecord,
    index: usize,
    ids: &mut IdDispenser,
) -> Result<CelestialBody, DataShapeError> {
    let label = format!("planet #{}", index + 1);
    let name = required_text(record, &label, "name")?;
    let distance = required_number(record, &name, "distance")?;
    let radius = required_number(record, &name, "radius")?;
    let length_of_year = required_number(record, &name, "length_of_year")?;

    let orbit_period = earth_years_to_days(length_of_year);
    let metrics = PlanetMetrics {
        length_of_year,
        orbit_period,
        orbit_time_step: orbit_time_step(orbit_period),
        day: optional_number(record, "day"),
        mass: optional_number(record, "mass"),
        density: optional_number(record, "density"),
    };

    let id = ids.next_id();
    let satellites = record
        .satellites
        .iter()
        .enumerate()
        .map(|(i, sat)| satellite(sat, &name, i, ids))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(%id, %name, satellites = satellites.len(), step = metrics.orbit_time_step, "normalized planet");
    Ok(CelestialBody {
        id,
        color: record.field("color").unwrap_or_default().trim().to_string(),
        name,
        distance,
        radius,
        kind: BodyKind::Planet(metrics),
        satellites,
    })
}

fn satellite(
    record: &RawRecord,
    parent: &str,
    index: usize,
    ids: &mut IdDispenser,
) -> Result<CelestialBody, DataShapeError> {
    let label = format!("satellite #{} of {parent}", index + 1);
    let name = required_text(record, &label, "name")?;
    let distance = required_number(record, &name, "distance_from_planet")?;

    Ok(CelestialBody {
        id: ids.next_id(),
        color: record.field("color").unwrap_or_default().trim().to_string(),
        name,
        distance,
        radius: optional_number(record, "radius"),
        kind: BodyKind::Satellite(SatelliteMetrics {
            orbit: optional_number(record, "orbit"),
        }),
        satellites: Vec::new(),
    })
}

fn required_text(
    record: &RawRecord,
    body: &str,
    field: &'static str,
) -> Result<String, DataShapeError> {
    match record.field(field).map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(DataShapeError::MissingField {
            body: body.to_string(),
            field,
        }),
    }
}

fn required_number(
    record: &RawRecord,
    body: &str,
    field: &'static str,
) -> Result<f64, DataShapeError> {
    let raw = match record.field(field).map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            return Err(DataShapeError::MissingField {
                body: body.to_string(),
                field,
            });
        }
    };
    match parse_number(raw) {
        Some(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(DataShapeError::InvalidNumber {
            body: body.to_string(),
            field,
            value: raw.to_string(),
        }),
    }
}

fn optional_number(record: &RawRecord, field: &str) -> f64 {
    record
        .field(field)
        .and_then(parse_number)
        .unwrap_or(f64::NAN)
}

/// Parse a numeric attribute, tolerating surrounding blanks and digit separators.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
