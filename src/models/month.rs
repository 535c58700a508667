//! Billing-period identification.
//!
//! A [`MonthKey`] names one billing period in `YYYY-MM` form and provides
//! the calendar arithmetic the rest of the engine needs: days in the month,
//! per-day dates, and the Monday-anchored week-of-month used by both the
//! pattern applier and the invoice weekly breakdown.

use chrono::{Datelike, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// Identifies one billing period (a calendar month).
///
/// Serialized as a `YYYY-MM` string, which is also the map-key form used in
/// the persisted document.
///
/// # Example
///
/// ```
/// use invoice_engine::models::MonthKey;
///
/// let month: MonthKey = "2025-09".parse().unwrap();
/// assert_eq!(month.year(), 2025);
/// assert_eq!(month.month(), 9);
/// assert_eq!(month.days_in_month(), 30);
/// assert_eq!(month.to_string(), "2025-09");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a month key from a year and a 1-based month number.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=9999).contains(&year)
            || !(1..=12).contains(&month)
            || NaiveDate::from_ymd_opt(year, month, 1).is_none()
        {
            return Err(EngineError::InvalidMonthKey {
                value: format!("{year:04}-{month:02}"),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the 1-based month number.
    pub fn month(self) -> u32 {
        self.month
    }

    /// Returns the first day of the month.
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("validated month key")
    }

    /// Returns the number of days in the month.
    pub fn days_in_month(self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(31)
    }

    /// Returns the date of the given 1-based day, or `None` if the day is
    /// outside the month.
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Iterates over every date of the month in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        (1..=self.days_in_month()).filter_map(move |day| self.date(day))
    }

    /// Returns the weekday index of day 1, with Monday = 0 .. Sunday = 6.
    pub fn first_weekday_index(self) -> u32 {
        self.first_day().weekday().num_days_from_monday()
    }

    /// Returns the 1-based, Monday-anchored week-of-month for a day.
    ///
    /// Week 1 starts on day 1; a new week starts on each Monday.
    pub fn week_of_month(self, day: u32) -> u32 {
        (day.saturating_sub(1) + self.first_weekday_index()) / 7 + 1
    }

    /// Returns the month that follows this one.
    pub fn succ(self) -> MonthKey {
        if self.month == 12 {
            MonthKey {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthKey {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonthKey {
            value: s.to_string(),
        };

        let (year_part, month_part) = s.split_once('-').ok_or_else(invalid)?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month: u32 = month_part.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: EngineError| D::Error::custom(e))
    }
}
