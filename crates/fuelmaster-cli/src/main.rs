//! FuelMaster CLI - Vehicle fuel consumption and inspection tracker
//!
//! Usage:
//!   fuelmaster stats --file refills.json       Summary statistics
//!   fuelmaster history --file refills.json     Per-tank consumption
//!   fuelmaster add --file refills.json --odometer 112950 --liters 38.5 --price 1.549
//!   fuelmaster delete --file refills.json <ID>
//!   fuelmaster itv --registration 2020-01-22   Next inspection date
//!   fuelmaster dashboard --file refills.json   Everything at a glance

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Stats { file, json } => commands::cmd_stats(&file, json),
        Commands::History { file, limit, json } => commands::cmd_history(&file, limit, json),
        Commands::Add {
            file,
            date,
            odometer,
            liters,
            price,
            start,
            id,
        } => {
            let date = match date {
                Some(d) => commands::parse_date_arg("date", &d)?,
                None => commands::resolve_today(None)?,
            };
            commands::cmd_add(
                &file,
                fuelmaster_core::ManualRefill {
                    id,
                    date,
                    odometer,
                    liters,
                    price_per_liter: price,
                    odometer_start: start,
                },
            )
        }
        Commands::Delete { file, id } => commands::cmd_delete(&file, &id),
        Commands::Itv {
            registration,
            category,
            last,
            today,
            json,
        } => {
            let (config, _) = commands::load_config_checked(config_path)?;
            let today = commands::resolve_today(today.as_deref())?;
            commands::cmd_itv(
                &config,
                &commands::ItvArgs {
                    registration: registration.as_deref(),
                    category: category.as_deref(),
                    last: last.as_deref(),
                },
                today,
                json,
            )
        }
        Commands::Dashboard { file, today, json } => {
            let (config, _) = commands::load_config_checked(config_path)?;
            let today = commands::resolve_today(today.as_deref())?;
            commands::cmd_dashboard(&file, &config, today, json)
        }
        Commands::Config => commands::cmd_config(config_path),
    }
}
