//! Inspection (ITV) command implementation

use anyhow::Result;
use chrono::NaiveDate;
use fuelmaster_core::dates::parse_date;
use fuelmaster_core::{
    next_inspection_date, Config, InspectionReminder, InspectionStage, InspectionUrgency,
    VehicleCategory,
};
use tracing::warn;

/// Command-line overrides for the configured vehicle
#[derive(Debug, Default)]
pub struct ItvArgs<'a> {
    pub registration: Option<&'a str>,
    pub category: Option<&'a str>,
    pub last: Option<&'a str>,
}

pub fn cmd_itv(config: &Config, args: &ItvArgs<'_>, today: NaiveDate, json: bool) -> Result<()> {
    let registration = match args.registration {
        Some(raw) => parse_date(raw).or_else(|| {
            warn!("Invalid registration date: {}", raw);
            None
        }),
        None => config.vehicle.registration_date,
    };
    let category = args
        .category
        .map(VehicleCategory::from_lenient)
        .unwrap_or(config.vehicle.category);
    let last = match args.last {
        Some(raw) => parse_date(raw).or_else(|| {
            warn!("Ignoring invalid last inspection date: {}", raw);
            None
        }),
        None => config.vehicle.last_inspection_date,
    };

    let reminder = registration
        .and_then(|reg| next_inspection_date(reg, category, last, today))
        .map(|next| InspectionReminder::new(next, today, &config.alerts));

    if json {
        println!("{}", serde_json::to_string_pretty(&reminder)?);
        return Ok(());
    }

    println!();
    println!("🛡️  Periodic Inspection (ITV)");
    println!("   ─────────────────────────────────────────────────────────────");

    match reminder {
        None => {
            println!("   Not configured: set a valid registration date with");
            println!("     fuelmaster itv --registration YYYY-MM-DD --category turismo");
            println!("   or in the [vehicle] section of the config file.");
        }
        Some(reminder) => {
            println!("   Category:   {}", category);
            print_inspection(&reminder);
        }
    }

    Ok(())
}

pub(crate) fn print_inspection(reminder: &InspectionReminder) {
    match reminder.stage {
        InspectionStage::AwaitingFirstInspection => {
            println!("   Stage:      awaiting first inspection")
        }
        InspectionStage::EarlyInterval { every_months }
        | InspectionStage::LateInterval { every_months } => {
            println!("   Stage:      every {} months", every_months)
        }
        InspectionStage::Exempt => {}
    }

    match (reminder.urgency, reminder.days_remaining) {
        (InspectionUrgency::Exempt, _) => println!("   ✅ No inspection required (exempt)"),
        (InspectionUrgency::Expired, Some(days)) => {
            println!("   Due:        {}", reminder.due);
            println!("   ❌ Expired {} days ago", -days);
        }
        (urgency, Some(days)) => {
            let icon = match urgency {
                InspectionUrgency::Critical => "🔴",
                InspectionUrgency::Warning => "🟡",
                _ => "🟢",
            };
            println!("   Due:        {}", reminder.due);
            println!("   {} {} days remaining ({})", icon, days, urgency);
        }
        (_, None) => println!("   Due:        {}", reminder.due),
    }
}
