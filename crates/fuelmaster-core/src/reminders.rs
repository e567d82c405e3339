//! Dashboard countdowns: inspection urgency and next maintenance service

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{AlertThresholds, Config};
use crate::dates::{add_months, days_remaining};
use crate::inspection::{InspectionStage, NextInspection};
use crate::metrics::{derive_records, summarize};
use crate::models::{FuelRecord, ServiceConfig, SummaryStats, VehicleProfile};

/// How pressing the next inspection is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionUrgency {
    Exempt,
    Expired,
    Critical,
    Warning,
    Ok,
}

impl InspectionUrgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exempt => "exempt",
            Self::Expired => "expired",
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Ok => "ok",
        }
    }

    /// Classify a countdown; `None` days means the vehicle is exempt
    pub fn classify(days: Option<i64>, thresholds: &AlertThresholds) -> Self {
        match days {
            None => Self::Exempt,
            Some(d) if d < 0 => Self::Expired,
            Some(d) if d < thresholds.critical_days => Self::Critical,
            Some(d) if d < thresholds.warning_days => Self::Warning,
            Some(_) => Self::Ok,
        }
    }
}

impl std::fmt::Display for InspectionUrgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inspection countdown ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionReminder {
    pub due: NaiveDate,
    pub days_remaining: Option<i64>,
    pub urgency: InspectionUrgency,
    pub stage: InspectionStage,
}

impl InspectionReminder {
    pub fn new(next: NextInspection, today: NaiveDate, thresholds: &AlertThresholds) -> Self {
        let days = next.days_remaining(today);
        Self {
            due: next.due,
            days_remaining: days,
            urgency: InspectionUrgency::classify(days, thresholds),
            stage: next.stage,
        }
    }
}

/// Maintenance countdown by distance and by date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceReminder {
    pub next_odometer: Option<f64>,
    /// Never negative: an overdue service shows zero
    pub km_remaining: Option<f64>,
    pub next_date: Option<NaiveDate>,
    pub days_remaining: Option<i64>,
}

/// Resolve the next service and count down to it.
///
/// Explicit next odometer/date win; otherwise the last service plus the
/// configured interval. Returns `None` when neither can be determined.
pub fn service_reminder(
    service: &ServiceConfig,
    vehicle: &VehicleProfile,
    last_odometer: f64,
    today: NaiveDate,
) -> Option<ServiceReminder> {
    let next_odometer = service.next_odometer.or_else(|| {
        vehicle
            .last_service_odometer
            .zip(service.interval_km)
            .map(|(last, interval)| last + interval)
    });
    let next_date = service.next_date.or_else(|| {
        vehicle
            .last_service_date
            .zip(service.interval_months)
            .and_then(|(last, months)| add_months(last, i64::from(months)))
    });

    if next_odometer.is_none() && next_date.is_none() {
        return None;
    }

    Some(ServiceReminder {
        next_odometer,
        km_remaining: next_odometer.map(|next| (next - last_odometer).max(0.0)),
        next_date,
        days_remaining: next_date.map(|date| days_remaining(date, today)),
    })
}

/// Everything the dashboard shows for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub record_count: usize,
    pub stats: SummaryStats,
    /// `None` when the vehicle profile has no registration date
    pub inspection: Option<InspectionReminder>,
    pub service: Option<ServiceReminder>,
}

impl Dashboard {
    pub fn build(records: &[FuelRecord], config: &Config, today: NaiveDate) -> Self {
        let stats = summarize(&derive_records(records));
        let inspection = config
            .vehicle
            .next_inspection(today)
            .map(|next| InspectionReminder::new(next, today, &config.alerts));
        let service = service_reminder(&config.service, &config.vehicle, stats.last_odometer, today);

        Self {
            record_count: records.len(),
            stats,
            inspection,
            service,
        }
    }
}
