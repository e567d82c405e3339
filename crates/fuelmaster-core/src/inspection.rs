//! Periodic roadworthiness inspection (ITV) scheduling
//!
//! Every category has a schedule of deadlines anchored at the registration
//! date. Deadlines are expressed as vehicle age in whole months, and the
//! interval to the following deadline depends on the age at the current one:
//!
//! | Category            | Rule                                                   |
//! |---------------------|--------------------------------------------------------|
//! | Passenger/Motorcycle| first at 4y, every 2y until 10y, then yearly           |
//! | Moped               | first at 3y, then every 2y                             |
//! | Light van           | first at 2y, every 2y until 6y, yearly until 10y, 6m   |
//! | Heavy goods         | yearly until 10y, then every 6 months                  |
//! | Bus                 | yearly until 5y, then every 6 months                   |
//! | Caravan             | first at 6y, then every 2y                             |
//! | Historic            | 2y until 40y, 3y until 45y, 4y until 60y, then exempt  |
//!
//! An inspection passed no more than 30 days before its deadline keeps the
//! schedule anchored on that deadline; anything earlier (or late) re-anchors
//! on the real inspection date.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::dates::{add_months, days_remaining, parse_date, whole_months_between};
use crate::models::{VehicleCategory, VehicleProfile};

/// Days before a deadline within which an early inspection keeps the deadline as anchor
pub const AMNESTY_DAYS: i64 = 30;

/// Due date reported for vehicles that no longer need inspections
pub fn exempt_sentinel() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 1, 1).unwrap_or(NaiveDate::MAX)
}

/// Where a vehicle sits in its inspection schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InspectionStage {
    /// Younger than the first mandatory inspection age
    AwaitingFirstInspection,
    /// In the first interval phase after the first inspection
    EarlyInterval { every_months: u32 },
    /// In a later, shorter interval phase
    LateInterval { every_months: u32 },
    /// No further inspections required
    Exempt,
}

impl InspectionStage {
    pub fn interval_months(&self) -> Option<u32> {
        match self {
            Self::EarlyInterval { every_months } | Self::LateInterval { every_months } => {
                Some(*every_months)
            }
            _ => None,
        }
    }
}

/// Result of projecting the next inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextInspection {
    /// Next due date, or [`exempt_sentinel`] for exempt vehicles
    pub due: NaiveDate,
    /// Stage the vehicle is in today
    pub stage: InspectionStage,
}

impl NextInspection {
    fn exempt() -> Self {
        Self {
            due: exempt_sentinel(),
            stage: InspectionStage::Exempt,
        }
    }

    pub fn is_exempt(&self) -> bool {
        self.stage == InspectionStage::Exempt
    }

    /// Days until due (negative when overdue); `None` for exempt vehicles
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        (!self.is_exempt()).then(|| days_remaining(self.due, today))
    }
}

/// An interval phase: deadlines step by `every_months` while the age is below `until_months`
#[derive(Debug, Clone, Copy)]
struct Phase {
    until_months: Option<i64>,
    every_months: i64,
}

/// A deadline expressed as vehicle age in months
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deadline {
    At(i64),
    Exempt,
}

#[derive(Debug, Clone, Copy)]
struct Schedule {
    first_due_months: Option<i64>,
    phases: &'static [Phase],
    exempt_from_months: Option<i64>,
}

const fn phase(until_years: Option<i64>, every_months: i64) -> Phase {
    Phase {
        until_months: match until_years {
            Some(y) => Some(y * 12),
            None => None,
        },
        every_months,
    }
}

const PASSENGER: Schedule = Schedule {
    first_due_months: Some(48),
    phases: &[phase(Some(10), 24), phase(None, 12)],
    exempt_from_months: None,
};

const MOPED: Schedule = Schedule {
    first_due_months: Some(36),
    phases: &[phase(None, 24)],
    exempt_from_months: None,
};

const LIGHT_VAN: Schedule = Schedule {
    first_due_months: Some(24),
    phases: &[phase(Some(6), 24), phase(Some(10), 12), phase(None, 6)],
    exempt_from_months: None,
};

const HEAVY_GOODS: Schedule = Schedule {
    first_due_months: None,
    phases: &[phase(Some(10), 12), phase(None, 6)],
    exempt_from_months: None,
};

const BUS: Schedule = Schedule {
    first_due_months: None,
    phases: &[phase(Some(5), 12), phase(None, 6)],
    exempt_from_months: None,
};

const CARAVAN: Schedule = Schedule {
    first_due_months: Some(72),
    phases: &[phase(None, 24)],
    exempt_from_months: None,
};

const HISTORIC: Schedule = Schedule {
    first_due_months: None,
    phases: &[phase(Some(40), 24), phase(Some(45), 36), phase(Some(60), 48)],
    exempt_from_months: Some(60 * 12),
};

impl VehicleCategory {
    fn schedule(&self) -> Schedule {
        match self {
            Self::Passenger | Self::Motorcycle => PASSENGER,
            Self::Moped => MOPED,
            Self::LightVan => LIGHT_VAN,
            Self::HeavyGoods => HEAVY_GOODS,
            Self::Bus => BUS,
            Self::Caravan => CARAVAN,
            Self::Historic => HISTORIC,
        }
    }
}

impl Schedule {
    /// Index of the interval phase governing `age`, if any
    fn phase_index(&self, age: i64) -> Option<usize> {
        self.phases
            .iter()
            .position(|p| p.until_months.map_or(true, |until| age < until))
    }

    fn stage_at(&self, age: i64) -> InspectionStage {
        if self.exempt_from_months.is_some_and(|e| age >= e) {
            return InspectionStage::Exempt;
        }
        if self.first_due_months.is_some_and(|f| age < f) {
            return InspectionStage::AwaitingFirstInspection;
        }
        match self.phase_index(age) {
            Some(0) => InspectionStage::EarlyInterval {
                every_months: self.phases[0].every_months as u32,
            },
            Some(i) => InspectionStage::LateInterval {
                every_months: self.phases[i].every_months as u32,
            },
            None => InspectionStage::Exempt,
        }
    }

    fn checked(&self, age: i64) -> Deadline {
        if self.exempt_from_months.is_some_and(|e| age >= e) {
            Deadline::Exempt
        } else {
            Deadline::At(age)
        }
    }

    /// The deadline that follows the one at `age`
    fn next_deadline(&self, age: i64) -> Deadline {
        match self.stage_at(age) {
            InspectionStage::AwaitingFirstInspection => {
                self.checked(self.first_due_months.unwrap_or(0))
            }
            InspectionStage::EarlyInterval { every_months }
            | InspectionStage::LateInterval { every_months } => {
                self.checked(age + i64::from(every_months))
            }
            InspectionStage::Exempt => Deadline::Exempt,
        }
    }

    /// The first deadline strictly older than `after` months.
    ///
    /// Steps whole phases at a time, so the loop runs at most once per phase
    /// plus once for the first-inspection wait.
    fn first_deadline_after(&self, after: i64) -> Deadline {
        let mut d = 0;

        for _ in 0..=self.phases.len() + 1 {
            if self.stage_at(d) == InspectionStage::AwaitingFirstInspection {
                d = match self.next_deadline(d) {
                    Deadline::At(first) => first,
                    Deadline::Exempt => return Deadline::Exempt,
                };
                if d > after {
                    return Deadline::At(d);
                }
                continue;
            }

            let Some(index) = self.phase_index(d) else {
                return Deadline::Exempt;
            };
            if self.stage_at(d) == InspectionStage::Exempt {
                return Deadline::Exempt;
            }

            let Phase {
                until_months,
                every_months,
            } = self.phases[index];

            // Smallest step count landing strictly after `after`
            let needed = ((after - d).div_euclid(every_months) + 1).max(1);
            // Smallest step count reaching the end of this phase
            let exit = until_months.map(|until| (until - d + every_months - 1) / every_months);

            match exit {
                Some(exit) if needed > exit => {
                    d += exit * every_months;
                    if self.checked(d) == Deadline::Exempt {
                        return Deadline::Exempt;
                    }
                }
                _ => return self.checked(d + needed * every_months),
            }
        }

        // Every phase has been walked through
        Deadline::Exempt
    }

    /// Interval applied after a real inspection performed at `age`
    fn interval_after_inspection_at(&self, age: i64) -> Option<i64> {
        match self.stage_at(age) {
            // An early first inspection counts as the first one
            InspectionStage::AwaitingFirstInspection => {
                self.phases.first().map(|p| p.every_months)
            }
            stage => stage.interval_months().map(i64::from),
        }
    }
}

/// Project the next inspection due date.
///
/// Without a last inspection this is the first deadline after `today`. With
/// one, the inspection is matched to the deadline it satisfied; if it was
/// passed within [`AMNESTY_DAYS`] of that deadline the next one follows the
/// deadline, otherwise it follows the real inspection date (and may already
/// be overdue). A last inspection before registration or after `today` is
/// ignored. Returns `None` only when date arithmetic leaves chrono's range.
pub fn next_inspection_date(
    registration: NaiveDate,
    category: VehicleCategory,
    last_inspection: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<NextInspection> {
    let schedule = category.schedule();
    let today_age = whole_months_between(registration, today);
    let stage = schedule.stage_at(today_age.max(0));

    if stage == InspectionStage::Exempt {
        return Some(NextInspection::exempt());
    }

    let last_inspection = last_inspection.filter(|last| {
        if *last < registration {
            warn!(
                "Last inspection {} predates registration {}, ignoring it",
                last, registration
            );
            false
        } else if *last > today {
            warn!("Last inspection {} is after {}, ignoring it", last, today);
            false
        } else {
            true
        }
    });

    let due = match last_inspection {
        None => match schedule.first_deadline_after(today_age) {
            Deadline::At(age) => add_months(registration, age)?,
            Deadline::Exempt => return Some(NextInspection::exempt()),
        },
        Some(last) => {
            let last_age = whole_months_between(registration, last);

            // The deadline this inspection satisfied: first one on or after it
            let mut satisfied = schedule.first_deadline_after(last_age - 1);
            if let Deadline::At(age) = satisfied {
                if add_months(registration, age)? < last {
                    satisfied = schedule.first_deadline_after(age);
                }
            }

            let theoretical = match satisfied {
                Deadline::At(age) => Some((age, add_months(registration, age)?)),
                Deadline::Exempt => None,
            };

            match theoretical {
                Some((age, deadline)) if days_remaining(deadline, last) <= AMNESTY_DAYS => {
                    debug!(%last, %deadline, "Inspection within amnesty window, keeping deadline anchor");
                    match schedule.next_deadline(age) {
                        Deadline::At(next) => add_months(registration, next)?,
                        Deadline::Exempt => return Some(NextInspection::exempt()),
                    }
                }
                _ => {
                    debug!(%last, "Re-anchoring schedule on real inspection date");
                    let Some(every) = schedule.interval_after_inspection_at(last_age) else {
                        return Some(NextInspection::exempt());
                    };
                    if schedule.checked(last_age + every) == Deadline::Exempt {
                        return Some(NextInspection::exempt());
                    }
                    add_months(last, every)?
                }
            }
        }
    };

    Some(NextInspection { due, stage })
}

/// Loosely-typed entry point for settings-form values.
///
/// An unparseable registration date yields `None` ("not configured"); an
/// unparseable last inspection date is ignored; unknown categories use the
/// passenger schedule.
pub fn next_inspection_from_str(
    registration: &str,
    category: &str,
    last_inspection: Option<&str>,
    today: NaiveDate,
) -> Option<NextInspection> {
    let Some(registration) = parse_date(registration) else {
        warn!("Cannot compute inspection: invalid registration date '{}'", registration);
        return None;
    };
    let last_inspection = last_inspection.and_then(parse_date);
    next_inspection_date(
        registration,
        VehicleCategory::from_lenient(category),
        last_inspection,
        today,
    )
}

impl VehicleProfile {
    /// Next inspection for this vehicle, or `None` when no registration date is set
    pub fn next_inspection(&self, today: NaiveDate) -> Option<NextInspection> {
        next_inspection_date(
            self.registration_date?,
            self.category,
            self.last_inspection_date,
            today,
        )
    }
}
