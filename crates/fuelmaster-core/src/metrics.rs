//! Consumption metrics over a refill history
//!
//! Two pure steps:
//! - [`derive_records`] puts refills in chronological order and attaches
//!   per-tank distance, consumption, efficiency and running totals
//! - [`summarize`] reduces derived records to aggregate statistics
//!
//! Averages are ratio-of-sums (total fuel / total distance), never the mean
//! of per-record ratios. Divisions that would yield NaN or infinity are zeroed.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::{DerivedRecord, FuelRecord, SummaryStats};

/// Chronological order: date, then end odometer for refills on the same day
pub(crate) fn chronological(a: &FuelRecord, b: &FuelRecord) -> Ordering {
    a.date()
        .cmp(&b.date())
        .then_with(|| a.odometer_end().total_cmp(&b.odometer_end()))
}

/// `numerator / denominator * scale`, or zero unless both operands are positive
fn guarded_ratio(numerator: f64, denominator: f64, scale: f64) -> f64 {
    if numerator > 0.0 && denominator > 0.0 {
        numerator / denominator * scale
    } else {
        0.0
    }
}

/// `numerator / denominator * scale`, or zero unless the denominator is positive
fn per_unit(numerator: f64, denominator: f64, scale: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * scale
    } else {
        0.0
    }
}

/// Sort refills chronologically and compute per-record metrics.
///
/// Distance comes from the record's own stated distance when non-zero;
/// otherwise from the odometer chain (`end - previous end`, or `end - start`
/// for the first refill). A stored start reading that disagrees with the
/// chain is reported in `distance_discrepancy`.
pub fn derive_records(records: &[FuelRecord]) -> Vec<DerivedRecord> {
    let mut sorted: Vec<&FuelRecord> = records.iter().collect();
    sorted.sort_by(|a, b| chronological(a, b));

    let Some(first) = sorted.first() else {
        return Vec::new();
    };
    let origin = first.odometer_start();

    let mut cumulative_cost = 0.0;
    let mut cumulative_liters = 0.0;
    let mut previous_end: Option<f64> = None;
    let mut derived = Vec::with_capacity(sorted.len());

    for record in sorted {
        let chained = match previous_end {
            Some(prev) => record.odometer_end() - prev,
            None => record.odometer_end() - record.odometer_start(),
        };

        let distance = match record.distance() {
            Some(stated) if stated != 0.0 => {
                debug!(id = %record.id(), stated, chained, "Using stated distance");
                stated
            }
            _ => chained,
        };

        let distance_discrepancy = previous_end.and_then(|prev| {
            let gap = record.odometer_start() - prev;
            (gap != 0.0).then(|| {
                debug!(id = %record.id(), gap, "Start odometer disagrees with previous refill");
                gap
            })
        });

        let liters = record.liters();
        cumulative_cost += record.cost();
        cumulative_liters += liters;

        derived.push(DerivedRecord {
            distance,
            consumption_per100: guarded_ratio(liters, distance, 100.0),
            efficiency_per_liter: guarded_ratio(distance, liters, 1.0),
            cumulative_cost,
            cumulative_liters,
            cumulative_distance: record.odometer_end() - origin,
            distance_discrepancy,
            record: record.clone(),
        });

        previous_end = Some(record.odometer_end());
    }

    derived
}

/// Aggregate derived records into summary statistics.
///
/// Span is taken from the lowest and highest end odometer, independent of
/// the order the records arrive in. Empty input yields all-zero stats.
pub fn summarize(derived: &[DerivedRecord]) -> SummaryStats {
    let mut by_odometer: Vec<&DerivedRecord> = derived.iter().collect();
    by_odometer.sort_by(|a, b| a.record.odometer_end().total_cmp(&b.record.odometer_end()));

    let (Some(first), Some(last)) = (by_odometer.first(), by_odometer.last()) else {
        return SummaryStats::default();
    };

    let total_distance = last.record.odometer_end() - first.record.odometer_start();
    let total_fuel: f64 = derived.iter().map(|d| d.record.liters()).sum();
    let total_cost: f64 = derived.iter().map(|d| d.record.cost()).sum();
    let avg_price_per_liter =
        derived.iter().map(|d| d.record.price_per_liter()).sum::<f64>() / derived.len() as f64;

    SummaryStats {
        total_distance,
        total_fuel,
        total_cost,
        avg_consumption: per_unit(total_fuel, total_distance, 100.0),
        avg_efficiency: per_unit(total_distance, total_fuel, 1.0),
        avg_price_per_liter,
        avg_cost_per100: per_unit(total_cost, total_distance, 100.0),
        last_odometer: last.record.odometer_end(),
    }
}
