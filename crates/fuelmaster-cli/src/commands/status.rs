//! Status-related command implementations (dashboard, config)

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use fuelmaster_core::{Config, Dashboard};

use super::inspection::print_inspection;
use super::reports::print_stats;
use super::{load_config_checked, open_records};

pub fn cmd_dashboard(file: &Path, config: &Config, today: NaiveDate, json: bool) -> Result<()> {
    let records = open_records(file)?;
    let dashboard = Dashboard::build(&records, config, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│          ⛽ FuelMaster Dashboard         │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Refills:         {}", dashboard.record_count);
    if dashboard.record_count > 0 {
        print_stats(&dashboard.stats);
    }
    println!();

    println!("  🛡️  Inspection");
    match &dashboard.inspection {
        Some(reminder) => print_inspection(reminder),
        None => println!("   Not configured"),
    }
    println!();

    println!("  🔧 Service");
    match &dashboard.service {
        Some(service) => {
            if let Some(km) = service.km_remaining {
                println!("   {:.0} km remaining", km);
            }
            if let (Some(date), Some(days)) = (service.next_date, service.days_remaining) {
                if days < 0 {
                    println!("   Overdue since {} ({} days)", date, -days);
                } else {
                    println!("   Due {} ({} days)", date, days);
                }
            }
        }
        None => println!("   Not configured"),
    }
    println!();

    Ok(())
}

pub fn cmd_config(path: Option<&Path>) -> Result<()> {
    let (config, source) = load_config_checked(path)?;

    println!();
    println!("⚙️  Configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Source: {}", source);
    println!();

    let vehicle = &config.vehicle;
    match vehicle.registration_date {
        Some(date) => println!("   Registration:      {}", date),
        None => println!("   Registration:      (not configured)"),
    }
    println!("   Category:          {}", vehicle.category);
    if let Some(date) = vehicle.last_inspection_date {
        println!("   Last inspection:   {}", date);
    }
    if let Some(km) = vehicle.last_service_odometer {
        println!("   Last service:      {:.0} km", km);
    }
    if let Some(date) = vehicle.last_service_date {
        println!("   Last service date: {}", date);
    }

    let service = &config.service;
    if let Some(km) = service.next_odometer {
        println!("   Next service:      {:.0} km", km);
    }
    if let Some(date) = service.next_date {
        println!("   Next service date: {}", date);
    }
    if let Some(km) = service.interval_km {
        println!("   Service every:     {:.0} km", km);
    }
    if let Some(months) = service.interval_months {
        println!("   Service every:     {} months", months);
    }

    println!(
        "   Alerts:            critical < {} days, warning < {} days",
        config.alerts.critical_days, config.alerts.warning_days
    );
    println!("   Tank capacity:     {:.0} L", config.tank_capacity_liters);

    Ok(())
}
