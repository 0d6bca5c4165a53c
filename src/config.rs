use std::fs;
use std::path::Path;

use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::Result;

/// One sigma measurement noise per unit of DOP, in meters
///
/// East and North are scaled by HDOP, Up by VDOP.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NoiseModel {
    pub sigma_east: f64,
    pub sigma_north: f64,
    pub sigma_up: f64,
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self {
            sigma_east: 1.5,
            sigma_north: 1.5,
            sigma_up: 3.5,
        }
    }
}

/// Surveyed receiver position in ECEF meters
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct TruePosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<TruePosition> for Vector3<f64> {
    fn from(value: TruePosition) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

/// Everything an analysis run depends on besides the epochs themselves
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub noise: NoiseModel,
    /// Reference for ECEF offsets, not needed when the log carries local errors
    pub true_position: Option<TruePosition>,
}

impl AnalysisConfig {
    #[must_use]
    pub fn with_noise(mut self, noise: NoiseModel) -> Self {
        self.noise = noise;
        self
    }

    #[must_use]
    pub fn with_true_position(mut self, true_position: TruePosition) -> Self {
        self.true_position = Some(true_position);
        self
    }

    /// Read a configuration from a TOML file, missing keys take their default
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        debug!("read configuration {config:?} from {path:?}");
        Ok(config)
    }
}
