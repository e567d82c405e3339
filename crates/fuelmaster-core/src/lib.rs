//! FuelMaster Core Library
//!
//! Shared functionality for the FuelMaster vehicle fuel tracker:
//! - Validated refill records and vehicle profiles
//! - Consumption metrics (per-tank and aggregate)
//! - Periodic inspection (ITV) scheduling with the 30-day amnesty rule
//! - Service and inspection countdowns for the dashboard
//! - Layered TOML configuration

pub mod config;
pub mod dates;
pub mod error;
pub mod inspection;
pub mod metrics;
pub mod models;
pub mod records;
pub mod reminders;

pub use config::{load_config, AlertThresholds, Config, ConfigSource};
pub use error::{Error, Result};
pub use inspection::{
    exempt_sentinel, next_inspection_date, next_inspection_from_str, InspectionStage,
    NextInspection, AMNESTY_DAYS,
};
pub use metrics::{derive_records, summarize};
pub use models::{
    DerivedRecord, FuelRecord, NewFuelRecord, RecordId, ServiceConfig, SummaryStats,
    VehicleCategory, VehicleProfile,
};
pub use records::{append_refill, load_records, read_records, save_records, ManualRefill};
pub use reminders::{Dashboard, InspectionReminder, InspectionUrgency, ServiceReminder};
