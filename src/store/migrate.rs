//! One-time migration of legacy attendance shapes.
//!
//! Two historical representations must keep loading without losing a
//! child's hours:
//!
//! 1. Zero-padded day-string keys (`"05"` instead of `5`) inside calendar
//!    attendance. These normalize to integer days during deserialization of
//!    [`AttendanceRecord`](crate::models::AttendanceRecord).
//! 2. The pre-calendar weekly shape stored per child under `attendance`: an
//!    array of week entries keyed by weekday name, with per-slot `type`
//!    values. These are converted into calendar attendance for the month
//!    that owns the child, then dropped.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::AppData;
use crate::models::{AttendanceStatus, Child, MonthKey, Slot};

/// One week of the legacy weekly attendance shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyWeek {
    /// 1-based week number within the month.
    #[serde(rename = "weekNumber")]
    pub week_number: u32,
    /// Weekday-name keyed day entries (`"monday"` .. `"friday"`).
    #[serde(default)]
    pub days: BTreeMap<String, LegacyDay>,
}

/// One day of the legacy weekly attendance shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyDay {
    /// Slot-name keyed entries.
    #[serde(default)]
    pub slots: BTreeMap<String, LegacySlot>,
}

/// One slot of the legacy weekly attendance shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacySlot {
    /// The recorded status; `null` meant not attending.
    #[serde(rename = "type")]
    pub status: Option<AttendanceStatus>,
    /// The duration stored alongside the status. Ignored: the catalog's
    /// canonical durations win.
    #[serde(default)]
    pub duration: Option<f64>,
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        _ => None,
    }
}

fn slot_from_name(name: &str) -> Option<Slot> {
    match name {
        "early" => Some(Slot::Early),
        "morning" => Some(Slot::Morning),
        "lunch" => Some(Slot::Lunch),
        "afternoon" => Some(Slot::Afternoon),
        "late" => Some(Slot::Late),
        _ => None,
    }
}

/// Resolves a (week, weekday) pair to a day-of-month.
///
/// The day is the `week`-th occurrence of the weekday, counting the week
/// containing the first occurrence as week 1. Returns `None` when the
/// occurrence falls past the end of the month.
pub fn day_of_weekday_in_week(month: MonthKey, week: u32, weekday: Weekday) -> Option<u32> {
    if week == 0 {
        return None;
    }
    let target = weekday.num_days_from_monday();
    let first = month.first_weekday_index();
    let first_occurrence = (target + 7 - first) % 7 + 1;
    let day = first_occurrence + 7 * (week - 1);
    (day <= month.days_in_month()).then_some(day)
}

/// Converts a child's legacy weekly record into calendar attendance for the
/// owning month.
///
/// Slots with a recorded status are written unless the calendar already
/// holds data for that day (calendar data is newer and wins). The legacy
/// field is cleared afterwards. Returns the number of cells written.
pub fn migrate_child(child: &mut Child, month: MonthKey) -> u32 {
    let Some(weeks) = child.legacy_attendance.take() else {
        return 0;
    };

    let mut written = 0u32;
    for week in &weeks {
        for (day_name, day) in &week.days {
            let Some(weekday) = weekday_from_name(day_name) else {
                warn!(%month, day = %day_name, "unknown weekday in legacy attendance");
                continue;
            };
            let Some(day_of_month) = day_of_weekday_in_week(month, week.week_number, weekday)
            else {
                warn!(
                    %month,
                    week = week.week_number,
                    day = %day_name,
                    "legacy attendance week falls outside the month"
                );
                continue;
            };
            if child
                .calendar_attendance
                .day_has_attendance(month, day_of_month)
            {
                continue;
            }

            for (slot_name, entry) in &day.slots {
                let Some(slot) = slot_from_name(slot_name) else {
                    warn!(%month, slot = %slot_name, "unknown slot in legacy attendance");
                    continue;
                };
                let Some(status) = entry.status else {
                    continue;
                };
                if !status.is_attending() {
                    continue;
                }
                child
                    .calendar_attendance
                    .set(month, day_of_month, slot, status);
                written += 1;
            }
        }
    }

    if written > 0 {
        debug!(child = %child.id, %month, cells = written, "migrated legacy weekly record");
    }
    written
}

/// Migrates every child of every month in a document. Returns the number of
/// cells written.
pub fn migrate_app(app: &mut AppData) -> u32 {
    let mut written = 0u32;
    for (&month, data) in app.months.iter_mut() {
        for child in &mut data.children {
            written += migrate_child(child, month);
        }
    }
    written
}
