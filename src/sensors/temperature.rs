//! Linux thermal-zone core temperature sensor.
//!
//! The kernel exposes the SoC die temperature as an ASCII integer in
//! millidegrees Celsius (e.g. `48312\n`) under
//! `/sys/class/thermal/thermal_zoneN/temp`.  Every [`read`](ThermalZoneSensor::read)
//! reopens the file; nothing is cached.

use std::fs;
use std::path::{Path, PathBuf};

use log::error;

use crate::error::SensorError;

const MILLIDEGREES_PER_DEGREE: f32 = 1000.0;

pub struct ThermalZoneSensor {
    path: PathBuf,
}

impl ThermalZoneSensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current temperature in degrees Celsius.
    pub fn read(&self) -> Result<f32, SensorError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            error!("thermal: read {} failed: {}", self.path.display(), e);
            SensorError::ReadFailed
        })?;
        parse_millidegrees(&raw)
    }
}

/// Convert sysfs thermal output to degrees Celsius.
///
/// Surrounding whitespace is ignored; anything else that is not a signed
/// integer is a [`SensorError::ParseFailed`].
pub fn parse_millidegrees(raw: &str) -> Result<f32, SensorError> {
    let trimmed = raw.trim();
    let milli: i64 = trimmed.parse().map_err(|_| {
        error!("thermal: could not parse {:?}", trimmed);
        SensorError::ParseFailed
    })?;
    Ok(milli as f32 / MILLIDEGREES_PER_DEGREE)
}
