//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FuelMaster - Track fuel consumption and inspection deadlines
#[derive(Parser)]
#[command(name = "fuelmaster")]
#[command(about = "Vehicle fuel consumption and inspection tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.local/share/fuelmaster/config/fuelmaster.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show summary statistics for a refill history
    Stats {
        /// JSON file with refill records
        #[arg(short, long)]
        file: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List refills with per-tank consumption, newest first
    History {
        /// JSON file with refill records
        #[arg(short, long)]
        file: PathBuf,

        /// Maximum number of refills to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Record a refill typed in from the pump
    ///
    /// The start reading defaults to where the newest refill ended.
    Add {
        /// JSON file with refill records (created if missing)
        #[arg(short, long)]
        file: PathBuf,

        /// Refill date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Odometer reading at the pump
        #[arg(short, long)]
        odometer: f64,

        /// Liters filled
        #[arg(short, long)]
        liters: f64,

        /// Price per liter
        #[arg(short, long)]
        price: f64,

        /// Odometer reading at the previous refill, if it differs
        #[arg(long)]
        start: Option<f64>,

        /// Record id (generated if omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// Delete a refill by id
    Delete {
        /// JSON file with refill records
        #[arg(short, long)]
        file: PathBuf,

        /// Id of the refill to delete (see `history --json`)
        id: String,
    },

    /// Project the next periodic inspection (ITV)
    ///
    /// Flags override the [vehicle] section of the config file.
    Itv {
        /// Registration date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(short, long)]
        registration: Option<String>,

        /// Vehicle category: turismo, motocicleta, ciclomotor, furgoneta,
        /// pesado, autobus, caravana, historico
        #[arg(short, long)]
        category: Option<String>,

        /// Date of the last real inspection
        #[arg(long)]
        last: Option<String>,

        /// Evaluate as of this date instead of today
        #[arg(long)]
        today: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show statistics, inspection and service countdowns together
    Dashboard {
        /// JSON file with refill records
        #[arg(short, long)]
        file: PathBuf,

        /// Evaluate as of this date instead of today
        #[arg(long)]
        today: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved configuration and where it came from
    Config,
}
