//! Shared command utilities
//!
//! This module contains:
//! - `load_config_checked` - Resolve the layered configuration
//! - `open_records` - Read a refill record file
//! - `parse_date_arg` / `resolve_today` - Date flags

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use fuelmaster_core::dates::parse_date;
use fuelmaster_core::{load_config, load_records, Config, ConfigSource, FuelRecord};
use tracing::debug;

/// Load config from `--config`, the data dir override, or built-in defaults
pub fn load_config_checked(path: Option<&Path>) -> Result<(Config, ConfigSource)> {
    let (config, source) = load_config(path).context("Failed to load configuration")?;
    debug!("Using configuration from {}", source);
    Ok((config, source))
}

/// Read refill records, with the file name in any error
pub fn open_records(file: &Path) -> Result<Vec<FuelRecord>> {
    load_records(file).with_context(|| format!("Failed to read refills from {}", file.display()))
}

/// Parse the value of a `--<flag>` date argument
pub fn parse_date_arg(flag: &str, value: &str) -> Result<NaiveDate> {
    parse_date(value)
        .with_context(|| format!("Invalid --{} date: {} (use YYYY-MM-DD)", flag, value))
}

/// Today's date, or the `--today` override
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => parse_date_arg("today", s),
        None => Ok(Local::now().date_naive()),
    }
}
