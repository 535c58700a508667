//! Child model and age-group derivation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attendance::AttendanceRecord;
use crate::store::migrate::LegacyWeek;

/// The entitlement age band a child falls into.
///
/// All children are entitled to funded hours; the band only sets the size of
/// the weekly allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    /// Younger than three years.
    #[serde(rename = "under-3")]
    Under3,
    /// Three or four years old.
    #[serde(rename = "3-4")]
    ThreeToFour,
}

impl AgeGroup {
    /// Derives the age group from a date of birth as of a given day.
    ///
    /// Age is counted in whole years, adjusted when the birthday has not yet
    /// occurred in the current year.
    pub fn for_date_of_birth(dob: NaiveDate, today: NaiveDate) -> AgeGroup {
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }

        if (3..5).contains(&age) {
            AgeGroup::ThreeToFour
        } else {
            AgeGroup::Under3
        }
    }

    /// Returns the weekly funded-hours allowance for the age group.
    pub fn weekly_free_hours(self) -> u32 {
        match self {
            AgeGroup::Under3 => 15,
            AgeGroup::ThreeToFour => 30,
        }
    }

    /// Returns the display label for the age group.
    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Under3 => "Under 3 years",
            AgeGroup::ThreeToFour => "3-4 years",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A child enrolled for one or more billing months.
///
/// The age group and free-hours allowance are derived from the date of birth
/// and refreshed whenever children are listed, so a child who turns three
/// mid-enrollment picks up the larger allowance on the next read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    /// Unique identifier, generated at creation.
    pub id: String,
    /// The child's name.
    pub name: String,
    /// The child's date of birth.
    pub dob: NaiveDate,
    /// The derived entitlement age band.
    pub age_group: AgeGroup,
    /// The weekly funded-hours allowance in hours.
    pub free_hours: u32,
    /// The child's attendance record across months.
    #[serde(default, skip_serializing_if = "AttendanceRecord::is_empty")]
    pub calendar_attendance: AttendanceRecord,
    /// Pre-calendar weekly attendance records, consumed by migration on
    /// document load.
    #[serde(
        default,
        rename = "attendance",
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_attendance: Option<Vec<LegacyWeek>>,
}

impl Child {
    /// Creates a child with a fresh id and an age group derived as of
    /// `today`.
    pub fn new(name: impl Into<String>, dob: NaiveDate, today: NaiveDate) -> Self {
        let age_group = AgeGroup::for_date_of_birth(dob, today);
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            dob,
            age_group,
            free_hours: age_group.weekly_free_hours(),
            calendar_attendance: AttendanceRecord::default(),
            legacy_attendance: None,
        }
    }

    /// Recomputes the age group and allowance as of `today`.
    ///
    /// Returns true if either changed.
    pub fn refresh_entitlement(&mut self, today: NaiveDate) -> bool {
        let age_group = AgeGroup::for_date_of_birth(self.dob, today);
        let free_hours = age_group.weekly_free_hours();
        let changed = self.age_group != age_group || self.free_hours != free_hours;
        self.age_group = age_group;
        self.free_hours = free_hours;
        changed
    }
}
