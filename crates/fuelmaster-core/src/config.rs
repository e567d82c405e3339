//! Vehicle and reminder configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a layered resolution:
//! 1. Explicit path (`--config`), when given and present
//! 2. Override in data dir (~/.local/share/fuelmaster/config/fuelmaster.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{ServiceConfig, VehicleProfile};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/fuelmaster.toml");

/// Day thresholds for the inspection countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertThresholds {
    /// Below this many days the countdown is critical
    pub critical_days: i64,
    /// Below this many days the countdown is a warning
    pub warning_days: i64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical_days: 7,
            warning_days: 30,
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub vehicle: VehicleProfile,
    pub service: ServiceConfig,
    pub alerts: AlertThresholds,
    pub tank_capacity_liters: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vehicle: VehicleProfile::default(),
            service: ServiceConfig::default(),
            alerts: AlertThresholds::default(),
            tank_capacity_liters: 43.0,
        }
    }
}

/// Where the configuration was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Embedded => write!(f, "built-in defaults"),
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("fuelmaster").join("config").join("fuelmaster.toml"))
}

/// Load configuration (explicit path, then override, then embedded default)
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, ConfigSource)> {
    let candidate = match explicit {
        Some(path) if path.exists() => Some(path.to_path_buf()),
        Some(path) => {
            warn!("Config file {} not found, falling back", path.display());
            default_config_path().filter(|p| p.exists())
        }
        None => default_config_path().filter(|p| p.exists()),
    };

    match candidate {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
            Ok((parse_config(&content)?, ConfigSource::File(path)))
        }
        None => Ok((parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded)),
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    vehicle: Option<VehicleProfile>,
    service: Option<ServiceConfig>,
    alerts: Option<RawAlerts>,
    fuel: Option<RawFuel>,
}

#[derive(Debug, Deserialize)]
struct RawAlerts {
    critical_days: Option<i64>,
    warning_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawFuel {
    tank_capacity_liters: Option<f64>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig =
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(vehicle) = raw.vehicle {
        config.vehicle = vehicle;
    }
    if let Some(service) = raw.service {
        config.service = service;
    }

    if let Some(alerts) = raw.alerts {
        if let Some(critical) = alerts.critical_days {
            config.alerts.critical_days = critical;
        }
        if let Some(warning) = alerts.warning_days {
            config.alerts.warning_days = warning;
        }
    }
    if config.alerts.critical_days > config.alerts.warning_days {
        return Err(Error::Config(format!(
            "alerts.critical_days ({}) must not exceed alerts.warning_days ({})",
            config.alerts.critical_days, config.alerts.warning_days
        )));
    }

    if let Some(capacity) = raw.fuel.and_then(|f| f.tank_capacity_liters) {
        config.tank_capacity_liters = capacity;
    }

    Ok(config)
}
