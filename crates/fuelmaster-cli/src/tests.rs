//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use chrono::NaiveDate;
use fuelmaster_core::{load_records, Config, ManualRefill, VehicleCategory, VehicleProfile};
use tempfile::NamedTempFile;

use crate::commands::{self, truncate, ItvArgs};

const REFILLS: &str = r#"[
    {"id": "a", "date": "01/01/2024", "kmInicial": 1000, "kmFinal": 1050, "fuelAmount": 5, "pricePerLiter": 1.4},
    {"id": "b", "date": "01/02/2024", "kmInicial": 1050, "kmFinal": 1150, "fuelAmount": 6, "pricePerLiter": 1.5},
    {"id": "c", "date": "2024-03-01", "odometerStart": 1140, "odometerEnd": 1300, "liters": 9, "pricePerLiter": 1.6}
]"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn configured() -> Config {
    Config {
        vehicle: VehicleProfile {
            registration_date: Some(ymd(2020, 1, 22)),
            category: VehicleCategory::Passenger,
            ..Default::default()
        },
        ..Default::default()
    }
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer identifier", 10), "a much ...");
    assert_eq!(truncate("repostaje-ñandú", 12), "repostaje...");
}

#[test]
fn test_resolve_today() {
    assert_eq!(
        commands::resolve_today(Some("01/06/2025")).unwrap(),
        ymd(2025, 6, 1)
    );
    assert!(commands::resolve_today(Some("tomorrow")).is_err());
    assert!(commands::resolve_today(None).is_ok());
}

#[test]
fn test_parse_date_arg() {
    assert_eq!(
        commands::parse_date_arg("date", "2025-02-10").unwrap(),
        ymd(2025, 2, 10)
    );
    let err = commands::parse_date_arg("date", "10 feb").unwrap_err();
    assert!(err.to_string().contains("--date"));
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_stats() {
    let file = write_temp(REFILLS);
    assert!(commands::cmd_stats(file.path(), false).is_ok());
    assert!(commands::cmd_stats(file.path(), true).is_ok());
}

#[test]
fn test_cmd_stats_empty_file() {
    let file = write_temp("[]");
    assert!(commands::cmd_stats(file.path(), false).is_ok());
}

#[test]
fn test_cmd_stats_missing_file() {
    let result = commands::cmd_stats(std::path::Path::new("/nonexistent/refills.json"), false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_stats_invalid_record() {
    let file = write_temp(
        r#"[{"date": "2024-01-01", "odometerStart": 0, "odometerEnd": 10, "liters": -1}]"#,
    );
    let err = commands::cmd_stats(file.path(), false).unwrap_err();
    assert!(format!("{:#}", err).contains("entry 1"));
}

#[test]
fn test_cmd_history_with_discrepancy() {
    let file = write_temp(REFILLS);
    assert!(commands::cmd_history(file.path(), 20, false).is_ok());
    assert!(commands::cmd_history(file.path(), 1, false).is_ok());
    assert!(commands::cmd_history(file.path(), 2, true).is_ok());
}

// ========== Refill Command Tests ==========

fn manual(date: NaiveDate, odometer: f64) -> ManualRefill {
    ManualRefill {
        id: None,
        date,
        odometer,
        liters: 40.0,
        price_per_liter: 1.5,
        odometer_start: None,
    }
}

#[test]
fn test_cmd_add_creates_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("refills.json");

    commands::cmd_add(&path, manual(ymd(2025, 1, 10), 110500.0)).unwrap();
    commands::cmd_add(&path, manual(ymd(2025, 2, 10), 111050.0)).unwrap();

    let records = load_records(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].odometer_start(), 110000.0);
    assert_eq!(records[0].cost(), 60.0);
    assert_eq!(records[1].odometer_start(), 110500.0);
    assert_ne!(records[0].id(), records[1].id());
}

#[test]
fn test_cmd_add_continues_existing_history() {
    let file = write_temp(REFILLS);
    let entry = ManualRefill {
        id: Some("d".to_string()),
        ..manual(ymd(2024, 4, 1), 1450.0)
    };
    commands::cmd_add(file.path(), entry).unwrap();

    let records = load_records(file.path()).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[3].id().as_str(), "d");
    assert_eq!(records[3].odometer_start(), 1300.0);
}

#[test]
fn test_cmd_add_rejected_leaves_file_untouched() {
    let file = write_temp(REFILLS);

    let err = commands::cmd_add(file.path(), manual(ymd(2024, 4, 1), 1200.0)).unwrap_err();
    assert!(format!("{:#}", err).contains("below the start reading"));

    let duplicate = ManualRefill {
        id: Some("a".to_string()),
        ..manual(ymd(2024, 4, 1), 1450.0)
    };
    assert!(commands::cmd_add(file.path(), duplicate).is_err());

    assert_eq!(load_records(file.path()).unwrap().len(), 3);
}

#[test]
fn test_cmd_delete() {
    let file = write_temp(REFILLS);

    commands::cmd_delete(file.path(), "b").unwrap();
    let records = load_records(file.path()).unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id().as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);

    let err = commands::cmd_delete(file.path(), "b").unwrap_err();
    assert!(err.to_string().contains("Refill not found"));
    assert_eq!(load_records(file.path()).unwrap().len(), 2);
}

// ========== Inspection Command Tests ==========

#[test]
fn test_cmd_itv_from_config() {
    let result = commands::cmd_itv(&configured(), &ItvArgs::default(), ymd(2025, 6, 1), false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_itv_flags_override_config() {
    let args = ItvArgs {
        registration: Some("01/01/2020"),
        category: Some("furgoneta"),
        last: Some("2023-12-15"),
    };
    assert!(commands::cmd_itv(&Config::default(), &args, ymd(2024, 6, 1), true).is_ok());
}

#[test]
fn test_cmd_itv_not_configured() {
    // Missing or invalid registration is reported, not an error
    assert!(commands::cmd_itv(&Config::default(), &ItvArgs::default(), ymd(2025, 6, 1), false).is_ok());

    let args = ItvArgs {
        registration: Some("soon"),
        ..Default::default()
    };
    assert!(commands::cmd_itv(&Config::default(), &args, ymd(2025, 6, 1), false).is_ok());
}

#[test]
fn test_cmd_itv_exempt_historic() {
    let args = ItvArgs {
        registration: Some("1955-04-01"),
        category: Some("historico"),
        last: None,
    };
    assert!(commands::cmd_itv(&Config::default(), &args, ymd(2025, 6, 1), false).is_ok());
}

// ========== Status Command Tests ==========

#[test]
fn test_cmd_dashboard() {
    let file = write_temp(REFILLS);
    let mut config = configured();
    config.service.next_odometer = Some(2000.0);
    config.service.next_date = Some(ymd(2024, 1, 1));

    assert!(commands::cmd_dashboard(file.path(), &config, ymd(2024, 6, 1), false).is_ok());
    assert!(commands::cmd_dashboard(file.path(), &config, ymd(2024, 6, 1), true).is_ok());
}

#[test]
fn test_cmd_dashboard_unconfigured() {
    let file = write_temp("[]");
    assert!(
        commands::cmd_dashboard(file.path(), &Config::default(), ymd(2024, 6, 1), false).is_ok()
    );
}

#[test]
fn test_cmd_config_explicit_file() {
    let file = write_temp("[vehicle]\nregistration_date = \"2019-07-01\"\ncategory = \"autobus\"\n");
    assert!(commands::cmd_config(Some(file.path())).is_ok());

    let (config, _) = commands::load_config_checked(Some(file.path())).unwrap();
    assert_eq!(config.vehicle.category, VehicleCategory::Bus);
}

#[test]
fn test_cmd_config_invalid_toml() {
    let file = write_temp("[vehicle\n");
    assert!(commands::cmd_config(Some(file.path())).is_err());
}
