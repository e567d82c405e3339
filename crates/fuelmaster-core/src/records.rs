//! Refill record files
//!
//! The importer (spreadsheet parser, manual entry form, cloud sync) emits a
//! JSON array of refills. Every entry goes through [`FuelRecord::new`], so a
//! bad entry is reported by position instead of leaking NaN into the metrics.
//! Manual entries are appended with [`append_refill`] and written back with
//! [`save_records`].

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};
use crate::metrics::chronological;
use crate::models::{FuelRecord, NewFuelRecord, RecordId};

/// Distance assumed for the very first refill when no start reading is given
pub const FIRST_REFILL_DISTANCE: f64 = 500.0;

/// Parse a JSON array of refill records
pub fn read_records<R: Read>(reader: R) -> Result<Vec<FuelRecord>> {
    let values: Vec<Value> = serde_json::from_reader(reader)?;

    let records = values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let input: NewFuelRecord = serde_json::from_value(value)
                .map_err(|e| Error::InvalidRecord(format!("entry {}: {}", i + 1, e)))?;
            FuelRecord::new(input).map_err(|e| match e {
                Error::InvalidRecord(msg) => Error::InvalidRecord(format!("entry {}: {}", i + 1, msg)),
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Read {} refill records", records.len());
    Ok(records)
}

/// Read refill records from a JSON file
pub fn load_records(path: &Path) -> Result<Vec<FuelRecord>> {
    let file = File::open(path)?;
    read_records(BufReader::new(file))
}

/// Write refill records as a JSON array.
///
/// The file is written next to `path` and renamed over it, so a failed write
/// never leaves a truncated history behind.
pub fn save_records(path: &Path, records: &[FuelRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut temp, records)?;
    temp.write_all(b"\n")?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    debug!("Saved {} refill records to {}", records.len(), path.display());
    Ok(())
}

/// A refill typed in by hand: pump readings only
#[derive(Debug, Clone, PartialEq)]
pub struct ManualRefill {
    /// Generated when absent
    pub id: Option<String>,
    pub date: NaiveDate,
    /// Odometer reading at the pump
    pub odometer: f64,
    pub liters: f64,
    pub price_per_liter: f64,
    /// Defaults to the end reading of the newest refill
    pub odometer_start: Option<f64>,
}

/// Validate a manual refill and append it to `records`.
///
/// Without an explicit start reading the refill continues the odometer chain
/// from the chronologically newest refill; the first refill of a history
/// starts [`FIRST_REFILL_DISTANCE`] before its own reading. Cost is
/// `liters * price_per_liter`.
pub fn append_refill(records: &mut Vec<FuelRecord>, entry: ManualRefill) -> Result<RecordId> {
    let odometer_start = match entry.odometer_start {
        Some(start) => start,
        None => match records.iter().max_by(|a, b| chronological(a, b)) {
            Some(newest) => newest.odometer_end(),
            None => (entry.odometer - FIRST_REFILL_DISTANCE).max(0.0),
        },
    };

    if entry.odometer < odometer_start {
        return Err(Error::InvalidData(format!(
            "odometer {} is below the start reading {}",
            entry.odometer, odometer_start
        )));
    }

    let exists = |id: &str| records.iter().any(|r| r.id().as_str() == id);
    let id = match entry.id {
        Some(id) if exists(&id) => {
            return Err(Error::InvalidData(format!(
                "a refill with id '{}' already exists",
                id
            )));
        }
        Some(id) => id,
        None => {
            let base = format!("en-{}", Utc::now().timestamp_millis());
            let mut id = base.clone();
            let mut n = 1;
            while exists(&id) {
                id = format!("{}-{}", base, n);
                n += 1;
            }
            id
        }
    };

    let record = FuelRecord::new(NewFuelRecord {
        id: Some(id),
        date: entry.date,
        odometer_start,
        odometer_end: entry.odometer,
        liters: entry.liters,
        price_per_liter: Some(entry.price_per_liter),
        cost: None,
        distance: None,
    })?;

    debug!(id = %record.id(), odometer_start, "Appending refill");
    let id = record.id().clone();
    records.push(record);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: (i32, u32, u32), odometer: f64) -> ManualRefill {
        ManualRefill {
            id: None,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            odometer,
            liters: 40.0,
            price_per_liter: 1.5,
            odometer_start: None,
        }
    }

    #[test]
    fn test_read_records() {
        let json = r#"[
            {"id": "1", "date": "2024-01-01", "odometerStart": 1000, "odometerEnd": 1500, "liters": 30, "pricePerLiter": 1.5},
            {"date": "01/02/2024", "kmInicial": 1500, "kmFinal": 2000, "fuelAmount": 28, "cost": 42}
        ]"#;
        let records = read_records(json.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cost(), 45.0);
        assert_eq!(records[1].price_per_liter(), 1.5);
    }

    #[test]
    fn test_bad_entry_reports_position() {
        let json = r#"[
            {"date": "2024-01-01", "odometerStart": 0, "odometerEnd": 10, "liters": 5},
            {"date": "2024-01-02", "odometerStart": 10, "odometerEnd": 20, "liters": -5}
        ]"#;
        match read_records(json.as_bytes()) {
            Err(Error::InvalidRecord(msg)) => assert!(msg.starts_with("entry 2")),
            other => panic!("expected invalid record, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_date_rejected() {
        let json = r#"[{"date": "yesterday", "odometerStart": 0, "odometerEnd": 10, "liters": 5}]"#;
        assert!(matches!(
            read_records(json.as_bytes()),
            Err(Error::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(read_records("{}".as_bytes()), Err(Error::Json(_))));
    }

    #[test]
    fn test_append_first_refill_assumes_distance() {
        let mut records = Vec::new();
        let id = append_refill(&mut records, entry((2025, 1, 10), 110500.0)).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), &id);
        assert!(id.as_str().starts_with("en-"));
        assert_eq!(records[0].odometer_start(), 110000.0);
        assert_eq!(records[0].cost(), 60.0);

        // Never below zero
        let mut records = Vec::new();
        append_refill(&mut records, entry((2025, 1, 10), 120.0)).unwrap();
        assert_eq!(records[0].odometer_start(), 0.0);
    }

    #[test]
    fn test_append_continues_from_newest_refill() {
        let json = r#"[
            {"id": "b", "date": "2025-02-01", "odometerStart": 1500, "odometerEnd": 2000, "liters": 30, "pricePerLiter": 1.5},
            {"id": "a", "date": "2025-01-01", "odometerStart": 1000, "odometerEnd": 1500, "liters": 30, "pricePerLiter": 1.5}
        ]"#;
        let mut records = read_records(json.as_bytes()).unwrap();

        append_refill(&mut records, entry((2025, 3, 1), 2600.0)).unwrap();
        assert_eq!(records[2].odometer_start(), 2000.0);

        let explicit = ManualRefill {
            odometer_start: Some(2650.0),
            ..entry((2025, 4, 1), 3000.0)
        };
        append_refill(&mut records, explicit).unwrap();
        assert_eq!(records[3].odometer_start(), 2650.0);
    }

    #[test]
    fn test_append_rejects_reading_below_chain() {
        let mut records = Vec::new();
        append_refill(&mut records, entry((2025, 1, 1), 5000.0)).unwrap();

        let result = append_refill(&mut records, entry((2025, 2, 1), 4900.0));
        assert!(matches!(result, Err(Error::InvalidData(_))));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_append_ids() {
        let mut records = Vec::new();
        let first = append_refill(&mut records, entry((2025, 1, 1), 1000.0)).unwrap();
        let second = append_refill(&mut records, entry((2025, 1, 2), 1400.0)).unwrap();
        assert_ne!(first, second);

        let duplicate = ManualRefill {
            id: Some(first.as_str().to_string()),
            ..entry((2025, 1, 3), 1800.0)
        };
        assert!(matches!(
            append_refill(&mut records, duplicate),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_append_rejects_negative_liters() {
        let mut records = Vec::new();
        let bad = ManualRefill {
            liters: -3.0,
            ..entry((2025, 1, 1), 1000.0)
        };
        assert!(matches!(
            append_refill(&mut records, bad),
            Err(Error::InvalidRecord(_))
        ));
        assert!(records.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("refills.json");

        let mut records = Vec::new();
        append_refill(&mut records, entry((2025, 1, 10), 110500.0)).unwrap();
        append_refill(&mut records, entry((2025, 2, 10), 111000.0)).unwrap();
        save_records(&path, &records).unwrap();

        let reloaded = load_records(&path).unwrap();
        assert_eq!(reloaded, records);

        records.pop();
        save_records(&path, &records).unwrap();
        assert_eq!(load_records(&path).unwrap().len(), 1);
    }
}
