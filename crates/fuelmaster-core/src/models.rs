//! Domain models for FuelMaster

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{deserialize_date, deserialize_lenient_date};
use crate::error::{Error, Result};

// ========== Refill Records ==========

/// Opaque identifier of a refill record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Refill input as produced by the importer or a manual entry form.
///
/// Field aliases accept the spreadsheet-era names (`kmInicial`, `kmFinal`,
/// `fuelAmount`, `distancia`) so old local-storage dumps still load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFuelRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(alias = "kmInicial")]
    pub odometer_start: f64,
    #[serde(alias = "kmFinal")]
    pub odometer_end: f64,
    #[serde(alias = "fuelAmount")]
    pub liters: f64,
    #[serde(default)]
    pub price_per_liter: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default, alias = "distancia")]
    pub distance: Option<f64>,
}

/// One validated refill event.
///
/// Only constructible through [`FuelRecord::new`], so every numeric field is
/// finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "NewFuelRecord")]
pub struct FuelRecord {
    id: RecordId,
    date: NaiveDate,
    odometer_start: f64,
    odometer_end: f64,
    liters: f64,
    price_per_liter: f64,
    cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<f64>,
}

fn check_amount(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::InvalidRecord(format!("{} is not a finite number", field)));
    }
    if value < 0.0 {
        return Err(Error::InvalidRecord(format!(
            "{} must not be negative (got {})",
            field, value
        )));
    }
    Ok(value)
}

impl FuelRecord {
    /// Validate a refill and fill in derived amounts.
    ///
    /// A missing or zero price falls back to `cost / liters`; a missing cost
    /// is `liters * price_per_liter`.
    pub fn new(input: NewFuelRecord) -> Result<Self> {
        let odometer_start = check_amount("odometer_start", input.odometer_start)?;
        let odometer_end = check_amount("odometer_end", input.odometer_end)?;
        let liters = check_amount("liters", input.liters)?;
        let price = input
            .price_per_liter
            .map(|p| check_amount("price_per_liter", p))
            .transpose()?;
        let cost = input.cost.map(|c| check_amount("cost", c)).transpose()?;
        let distance = input
            .distance
            .map(|d| check_amount("distance", d))
            .transpose()?;

        let price_per_liter = match (price, cost) {
            (Some(p), _) if p > 0.0 => p,
            (_, Some(c)) if liters > 0.0 => c / liters,
            (p, _) => p.unwrap_or(0.0),
        };
        let cost = cost.unwrap_or(liters * price_per_liter);

        let id = input
            .id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("{}-{}", input.date, odometer_end));

        Ok(Self {
            id: RecordId(id),
            date: input.date,
            odometer_start,
            odometer_end,
            liters,
            price_per_liter,
            cost,
            distance,
        })
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn odometer_start(&self) -> f64 {
        self.odometer_start
    }

    pub fn odometer_end(&self) -> f64 {
        self.odometer_end
    }

    pub fn liters(&self) -> f64 {
        self.liters
    }

    pub fn price_per_liter(&self) -> f64 {
        self.price_per_liter
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Distance stated on the record itself, if the importer had one
    pub fn distance(&self) -> Option<f64> {
        self.distance
    }
}

impl TryFrom<NewFuelRecord> for FuelRecord {
    type Error = Error;

    fn try_from(input: NewFuelRecord) -> Result<Self> {
        Self::new(input)
    }
}

/// Remove a record by id, returning whether anything was removed
pub fn remove_record(records: &mut Vec<FuelRecord>, id: &RecordId) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}

/// A refill with its computed consumption metrics and running totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRecord {
    pub record: FuelRecord,
    /// Distance driven on this tank (resolved against the odometer chain)
    pub distance: f64,
    /// Liters per 100 distance units
    pub consumption_per100: f64,
    /// Distance units per liter
    pub efficiency_per_liter: f64,
    pub cumulative_cost: f64,
    pub cumulative_liters: f64,
    pub cumulative_distance: f64,
    /// Stored start reading minus the previous record's end reading, when they disagree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_discrepancy: Option<f64>,
}

/// Aggregate statistics over a set of derived records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_distance: f64,
    pub total_fuel: f64,
    pub total_cost: f64,
    /// Ratio of sums: total fuel / total distance * 100
    pub avg_consumption: f64,
    pub avg_efficiency: f64,
    /// Plain mean of the per-record prices
    pub avg_price_per_liter: f64,
    pub avg_cost_per100: f64,
    pub last_odometer: f64,
}

// ========== Vehicle Models ==========

/// Vehicle classes with distinct inspection schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VehicleCategory {
    #[default]
    Passenger,
    Motorcycle,
    Moped,
    LightVan,
    HeavyGoods,
    Bus,
    Caravan,
    Historic,
}

impl VehicleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passenger => "passenger",
            Self::Motorcycle => "motorcycle",
            Self::Moped => "moped",
            Self::LightVan => "light_van",
            Self::HeavyGoods => "heavy_goods",
            Self::Bus => "bus",
            Self::Caravan => "caravan",
            Self::Historic => "historic",
        }
    }

    /// Get all categories
    pub fn all() -> &'static [VehicleCategory] {
        &[
            Self::Passenger,
            Self::Motorcycle,
            Self::Moped,
            Self::LightVan,
            Self::HeavyGoods,
            Self::Bus,
            Self::Caravan,
            Self::Historic,
        ]
    }

    /// Parse a settings-form value, treating anything unknown as a passenger car
    pub fn from_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown vehicle category '{}', using passenger schedule", s);
            Self::Passenger
        })
    }
}

impl std::str::FromStr for VehicleCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "passenger" | "car" | "turismo" => Ok(Self::Passenger),
            "motorcycle" | "motocicleta" => Ok(Self::Motorcycle),
            "moped" | "ciclomotor" => Ok(Self::Moped),
            "light_van" | "van" | "furgoneta" => Ok(Self::LightVan),
            "heavy_goods" | "truck" | "pesado" => Ok(Self::HeavyGoods),
            "bus" | "autobus" | "autobús" => Ok(Self::Bus),
            "caravan" | "trailer" | "caravana" => Ok(Self::Caravan),
            "historic" | "historico" | "histórico" => Ok(Self::Historic),
            _ => Err(format!("Unknown vehicle category: {}", s)),
        }
    }
}

impl From<String> for VehicleCategory {
    fn from(s: String) -> Self {
        Self::from_lenient(&s)
    }
}

impl From<VehicleCategory> for String {
    fn from(c: VehicleCategory) -> Self {
        c.as_str().to_string()
    }
}

impl std::fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vehicle settings used by the inspection scheduler and service reminders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// `None` when unset or unparseable ("not configured")
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    pub registration_date: Option<NaiveDate>,
    #[serde(default)]
    pub category: VehicleCategory,
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    pub last_inspection_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_service_odometer: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    pub last_service_date: Option<NaiveDate>,
}

/// Maintenance plan: explicit next service, or last service plus intervals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub next_odometer: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    pub next_date: Option<NaiveDate>,
    #[serde(default)]
    pub interval_km: Option<f64>,
    #[serde(default)]
    pub interval_months: Option<u32>,
}
