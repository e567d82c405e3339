//! Manual refill entry and deletion

use std::path::Path;

use anyhow::{Context, Result};
use fuelmaster_core::models::remove_record;
use fuelmaster_core::{append_refill, save_records, FuelRecord, ManualRefill, RecordId};
use tracing::debug;

use super::open_records;

fn write_records(file: &Path, records: &[FuelRecord]) -> Result<()> {
    save_records(file, records)
        .with_context(|| format!("Failed to write refills to {}", file.display()))
}

/// Append a refill, creating the record file if needed
pub fn cmd_add(file: &Path, entry: ManualRefill) -> Result<()> {
    let mut records = if file.exists() {
        open_records(file)?
    } else {
        debug!("{} does not exist yet, starting a new history", file.display());
        Vec::new()
    };

    let id = append_refill(&mut records, entry).context("Refill rejected")?;
    write_records(file, &records)?;

    if let Some(added) = records.last() {
        println!(
            "✅ Added refill {} on {}: {:.0} km, {:.2} L, {:.2} €",
            id,
            added.date(),
            added.odometer_end() - added.odometer_start(),
            added.liters(),
            added.cost()
        );
    }

    Ok(())
}

/// Delete a refill by id
pub fn cmd_delete(file: &Path, id: &str) -> Result<()> {
    let mut records = open_records(file)?;
    let id = RecordId(id.to_string());

    if !remove_record(&mut records, &id) {
        anyhow::bail!("Refill not found: {}", id);
    }
    write_records(file, &records)?;

    println!("✅ Deleted refill {} ({} remaining)", id, records.len());
    Ok(())
}
