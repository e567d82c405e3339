//! Statistics and history command implementations

use std::path::Path;

use anyhow::Result;
use fuelmaster_core::{derive_records, summarize, DerivedRecord, SummaryStats};

use super::{open_records, truncate};

pub fn cmd_stats(file: &Path, json: bool) -> Result<()> {
    let records = open_records(file)?;
    let stats = summarize(&derive_records(&records));

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!();
    println!("⛽ Fuel Summary ({} refills)", records.len());
    println!("   ─────────────────────────────────────────────────────────────");

    if records.is_empty() {
        println!("   No refills found in {}.", file.display());
        return Ok(());
    }

    print_stats(&stats);
    Ok(())
}

pub(crate) fn print_stats(stats: &SummaryStats) {
    println!("   Distance:          {:>12.0} km", stats.total_distance);
    println!("   Fuel:              {:>12.2} L", stats.total_fuel);
    println!("   Spent:             {:>12.2} €", stats.total_cost);
    println!();
    println!("   Avg consumption:   {:>12.2} L/100km", stats.avg_consumption);
    println!("   Avg efficiency:    {:>12.2} km/L", stats.avg_efficiency);
    println!("   Avg price:         {:>12.3} €/L", stats.avg_price_per_liter);
    println!("   Cost per 100 km:   {:>12.2} €", stats.avg_cost_per100);
    println!("   Odometer:          {:>12.0} km", stats.last_odometer);
}

pub fn cmd_history(file: &Path, limit: usize, json: bool) -> Result<()> {
    let records = open_records(file)?;
    let derived = derive_records(&records);
    let newest: Vec<&DerivedRecord> = derived.iter().rev().take(limit).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&newest)?);
        return Ok(());
    }

    println!();
    println!("📜 Refill History");
    println!("   ─────────────────────────────────────────────────────────────");

    if newest.is_empty() {
        println!("   No refills found in {}.", file.display());
        return Ok(());
    }

    println!(
        "   {:10} │ {:>9} │ {:>7} │ {:>7} │ {:>6} │ {:>8} │ {:>6}",
        "Date", "Odometer", "Dist", "Liters", "€/L", "Cost", "L/100"
    );
    println!("   ───────────┼───────────┼─────────┼─────────┼────────┼──────────┼───────");

    let mut discrepancies = 0;
    for d in &newest {
        let marker = if d.distance_discrepancy.is_some() {
            discrepancies += 1;
            " !"
        } else {
            ""
        };
        println!(
            "   {:10} │ {:>9.0} │ {:>7.0} │ {:>7.2} │ {:>6.3} │ {:>8.2} │ {:>6.2}{}",
            d.record.date().to_string(),
            d.record.odometer_end(),
            d.distance,
            d.record.liters(),
            d.record.price_per_liter(),
            d.record.cost(),
            d.consumption_per100,
            marker
        );
    }

    if derived.len() > newest.len() {
        println!("   ... {} older refills not shown", derived.len() - newest.len());
    }

    if discrepancies > 0 {
        println!();
        println!(
            "   ! {} refill(s) start at a different odometer than the previous refill ended.",
            discrepancies
        );
        for d in newest.iter().filter(|d| d.distance_discrepancy.is_some()) {
            println!(
                "     {} ({}): {:+.0} km",
                truncate(d.record.id().as_str(), 24),
                d.record.date(),
                d.distance_discrepancy.unwrap_or_default()
            );
        }
    }

    Ok(())
}
