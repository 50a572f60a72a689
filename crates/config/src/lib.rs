//! Body data files and runtime settings for the Solar Orrery.
//!
//! Body records are kept as raw text so that the normalizer decides what is mandatory
//! and how malformed numbers are treated. Settings are typed and validated here.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use orrery_core::constants::{DEFAULT_SATELLITE_STEP, DEFAULT_TICK_PERIOD_MS};

/// Errors that can occur while loading data files or settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid setting `{setting}`: {reason}")]
    Invalid {
        setting: &'static str,
        reason: String,
    },
}

/// A scalar attribute value exactly as the data file spelled it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawValue(pub String);

impl RawValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawValueVisitor;

        impl<'de> Visitor<'de> for RawValueVisitor {
            type Value = RawValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string, number or boolean attribute")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RawValue, E> {
                Ok(RawValue(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<RawValue, E> {
                Ok(RawValue(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawValue, E> {
                Ok(RawValue(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawValue, E> {
                Ok(RawValue(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawValue, E> {
                Ok(RawValue(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<RawValue, E> {
                Ok(RawValue(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<RawValue, E> {
                Ok(RawValue::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<RawValue, E> {
                Ok(RawValue::default())
            }
        }

        deserializer.deserialize_any(RawValueVisitor)
    }
}

/// One planet or satellite as read from a data file: named text attributes plus an
/// optional nested list of satellites.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default, alias = "SATELLITES", alias = "Satellites")]
    pub satellites: Vec<RawRecord>,
    #[serde(flatten)]
    fields: BTreeMap<String, RawValue>,
}

impl RawRecord {
    /// Build a record from `(field, value)` pairs.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            satellites: Vec::new(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), RawValue(v.into())))
                .collect(),
        }
    }

    /// Attach satellites, builder style.
    pub fn with_satellites(mut self, satellites: Vec<RawRecord>) -> Self {
        self.satellites = satellites;
        self
    }

    /// Look up an attribute; field names are matched case-insensitively.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Top-level layout of a whole-system data file.
#[derive(Debug, Deserialize)]
struct Catalog {
    #[serde(alias = "PLANETS", alias = "Planets")]
    planets: Vec<RawRecord>,
}

/// Load planet records from a YAML file, a TOML file, or a directory of TOML files
/// (one planet per file, read in file-name order).
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>, ConfigError> {
    let path = path.as_ref();
    let records = if path.is_dir() {
        read_dir_records(path)?
    } else if has_extension(path, "toml") {
        parse_toml_records(&read_to_string(path)?)?
    } else {
        parse_yaml_records(&read_to_string(path)?)?
    };
    info!(path = %path.display(), planets = records.len(), "loaded body records");
    Ok(records)
}

/// Parse a YAML document that is either `planets: [...]` or a bare list of planets.
pub fn parse_yaml_records(contents: &str) -> Result<Vec<RawRecord>, ConfigError> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_yaml::from_str::<Catalog>(contents) {
        Ok(catalog) => Ok(catalog.planets),
        Err(err) => {
            debug!(%err, "not a planets catalog, trying a bare list");
            Ok(serde_yaml::from_str::<Vec<RawRecord>>(contents)?)
        }
    }
}

/// Parse a TOML document that is either a `[[planets]]` catalog or a single planet.
pub fn parse_toml_records(contents: &str) -> Result<Vec<RawRecord>, ConfigError> {
    match toml::from_str::<Catalog>(contents) {
        Ok(catalog) => Ok(catalog.planets),
        Err(_) => Ok(vec![toml::from_str::<RawRecord>(contents)?]),
    }
}

fn read_dir_records(dir: &Path) -> Result<Vec<RawRecord>, ConfigError> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| has_extension(path, "toml"))
        .collect();
    entries.sort();
    let mut records = Vec::new();
    for path in entries {
        records.extend(parse_toml_records(&read_to_string(&path)?)?);
    }
    Ok(records)
}

fn read_to_string(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().map(|e| e == ext).unwrap_or(false)
}

/// Anything that can hand the session a fresh set of body records.
pub trait BodySource {
    fn fetch(&mut self) -> Result<Vec<RawRecord>, ConfigError>;
}

/// Reads body records from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BodySource for FileSource {
    fn fetch(&mut self) -> Result<Vec<RawRecord>, ConfigError> {
        load_records(&self.path)
    }
}

impl BodySource for Vec<RawRecord> {
    fn fetch(&mut self) -> Result<Vec<RawRecord>, ConfigError> {
        Ok(self.clone())
    }
}

/// Drawing area the layout maps orbits into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Runtime settings for layout and animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Wall-clock milliseconds between ticks.
    pub tick_period_ms: u64,
    /// Arc-length advanced by every satellite on every tick.
    pub satellite_step: f64,
    /// Fraction of the half-viewport used by the outermost orbit.
    pub orbit_fill: f64,
    /// Radius of the outermost satellite orbit around its planet.
    pub satellite_orbit_scale: f64,
    pub viewport: Viewport,
    /// Default body data file used when none is given on the command line.
    pub data_path: Option<PathBuf>,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            satellite_step: DEFAULT_SATELLITE_STEP,
            orbit_fill: 0.9,
            satellite_orbit_scale: 12.0,
            viewport: Viewport::default(),
            data_path: None,
        }
    }
}

impl OrreryConfig {
    /// Reject settings the advancer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(invalid("tick_period_ms", "must be greater than zero"));
        }
        if !self.satellite_step.is_finite() || self.satellite_step < 0.0 {
            return Err(invalid("satellite_step", "must be finite and non-negative"));
        }
        if !(self.orbit_fill > 0.0 && self.orbit_fill <= 1.0) {
            return Err(invalid("orbit_fill", "must lie in (0, 1]"));
        }
        if !self.satellite_orbit_scale.is_finite() || self.satellite_orbit_scale < 0.0 {
            return Err(invalid(
                "satellite_orbit_scale",
                "must be finite and non-negative",
            ));
        }
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(invalid("viewport", "width and height must be positive"));
        }
        Ok(())
    }
}

fn invalid(setting: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        setting,
        reason: reason.to_string(),
    }
}

/// Load settings from a TOML file; missing keys fall back to defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<OrreryConfig, ConfigError> {
    let config: OrreryConfig = toml::from_str(&read_to_string(path.as_ref())?)?;
    config.validate()?;
    Ok(config)
}
