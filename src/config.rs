//! Configuration management for Calor
//!
//! This module handles loading and validation of the local application
//! settings from YAML files. These are the process-level settings
//! (endpoints, credentials, register ids, timezone); the behavioral
//! tuning document lives in [`crate::tuning`] and is fetched remotely.

use crate::error::{CalorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Heat-pump controller endpoint configuration
    pub controller: ControllerConfig,

    /// Controller register id mappings
    pub registers: RegistersConfig,

    /// Spot price source configuration
    pub spot: SpotConfig,

    /// Remote tuning document source
    pub remote: RemoteConfig,

    /// Cloud temperature sensor configuration
    pub sensor: SensorConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Path of the JSON key-value cache file (daily prices, sensor token)
    pub cache_file: String,

    /// IANA timezone for all local-time decisions
    pub timezone: String,
}

/// Heat-pump controller endpoint
///
/// The controller is reached over its local REST gateway. The host is the
/// result of whatever discovery the installation uses (static lease, mDNS
/// pinning); an empty host fails validation at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Base URL of the controller gateway, e.g. `http://192.168.25.196`
    pub host: String,

    /// Controller identifier, used for logging only
    pub id: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Controller register id mappings
///
/// Register ids are the gateway's four-digit hex indexes. Raw values are
/// tenths-scale integers (54.0 C -> 540).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistersConfig {
    /// Hot-water target temperature register
    pub hot_water: String,

    /// Heating-curve slope register
    pub curve: String,

    /// Heating-curve parallel offset register
    pub parallel: String,
}

/// Spot price source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotConfig {
    /// Price area, e.g. `SE3`
    pub region: String,

    /// Base URL of the spot price API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Remote tuning document source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// URL of the tuning document; empty disables remote tuning and uses
    /// built-in defaults with no overrides
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Cloud temperature sensor (best-effort collaborator)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Whether the sensor feedback path is enabled at all
    pub enabled: bool,

    /// OAuth client id
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Long-lived refresh credential
    pub refresh_token: String,

    /// Name of the station module to read the temperature from
    pub module: String,

    /// Base URL of the sensor cloud API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARNING, ERROR)
    pub level: String,

    /// Path to log file; empty logs to console only
    pub file: String,

    /// Whether the file output uses JSON format
    pub json_format: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            id: "H60".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for RegistersConfig {
    fn default() -> Self {
        Self {
            hot_water: "0208".to_string(),
            curve: "2205".to_string(),
            parallel: "2207".to_string(),
        }
    }
}

impl Default for SpotConfig {
    fn default() -> Self {
        Self {
            region: "SE3".to_string(),
            base_url: "https://spot.utilitarian.io/electricity".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 10,
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            module: "Indoor".to_string(),
            base_url: "https://api.netatmo.com".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            file: String::new(),
            json_format: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            registers: RegistersConfig::default(),
            spot: SpotConfig::default(),
            remote: RemoteConfig::default(),
            sensor: SensorConfig::default(),
            logging: LoggingConfig::default(),
            cache_file: "calor_cache.json".to_string(),
            timezone: "Europe/Stockholm".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        let default_paths = ["calor_config.yaml", "/etc/calor/config.yaml"];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        Ok(Config::default())
    }

    /// Parse the configured timezone
    pub fn tz(&self) -> Result<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| CalorError::validation("timezone", &format!("unknown timezone {}", self.timezone)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.controller.host.is_empty() {
            return Err(CalorError::validation(
                "controller.host",
                "No controller found; host cannot be empty",
            ));
        }

        if self.spot.region.is_empty() {
            return Err(CalorError::validation(
                "spot.region",
                "Price region cannot be empty",
            ));
        }

        if self.cache_file.is_empty() {
            return Err(CalorError::validation(
                "cache_file",
                "Cache file path cannot be empty",
            ));
        }

        self.tz()?;

        Ok(())
    }
}
