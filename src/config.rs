//! Engine and service configuration.

use crate::compute::distance::DistanceMetric;
use crate::error::{GeoTripError, Result};
use std::path::Path;

/// Default capacities above this are accepted but logged.
const LARGE_CAPACITY_WARNING: usize = 10_000;

/// Service configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Trip capacity used when an optimize request does not name one
    #[serde(default = "Config::default_capacity")]
    pub default_capacity: usize,

    /// Metric used to chain stops when building trips
    #[serde(default)]
    pub distance_metric: DistanceMetric,
}

impl Config {
    const fn default_capacity() -> usize {
        3
    }

    pub fn with_default_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Default capacity must be greater than zero");

        if capacity > LARGE_CAPACITY_WARNING {
            log::warn!(
                "Default trip capacity of {} is unusually large; every request \
                without an explicit capacity will produce very long trips.",
                capacity
            );
        }

        self.default_capacity = capacity;
        self
    }

    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_capacity == 0 {
            return Err(GeoTripError::Config(
                "Default capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)
            .map_err(|e| GeoTripError::Config(format!("Invalid JSON config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)
            .map_err(|e| GeoTripError::Config(format!("Invalid TOML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GeoTripError::Serialization(e.to_string()))
    }

    /// Loads a config file, choosing the format from its extension.
    ///
    /// `.toml` requires the `toml` feature; anything else is parsed as JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GeoTripError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&contents),
            #[cfg(not(feature = "toml"))]
            Some("toml") => Err(GeoTripError::Config(
                "TOML configuration requires the `toml` feature".to_string(),
            )),
            _ => Self::from_json(&contents),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_capacity: Self::default_capacity(),
            distance_metric: DistanceMetric::default(),
        }
    }
}
