//! The attendance store.
//!
//! An [`AttendanceRecord`] holds one child's attendance as a map of
//! `month -> day -> slot -> status`. Entries are created lazily on first
//! write; reading an untouched cell returns [`AttendanceStatus::None`].
//! Ordered maps keep serialization deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::month::MonthKey;
use super::slot::Slot;
use super::status::AttendanceStatus;

/// The slot statuses recorded for one day. Only touched slots are present.
pub type DayAttendance = BTreeMap<Slot, AttendanceStatus>;

/// The per-day attendance recorded for one month, keyed by bare integer
/// day-of-month.
pub type MonthAttendance = BTreeMap<u32, DayAttendance>;

/// Per-child attendance across billing months.
///
/// This is a pure data structure: persistence and invoice recomputation are
/// the surrounding system's concern.
///
/// # Example
///
/// ```
/// use invoice_engine::models::{AttendanceRecord, AttendanceStatus, MonthKey, Slot};
///
/// let month: MonthKey = "2025-09".parse().unwrap();
/// let mut record = AttendanceRecord::default();
///
/// assert_eq!(record.status(month, 3, Slot::Morning), AttendanceStatus::None);
/// assert_eq!(record.cycle(month, 3, Slot::Morning), AttendanceStatus::Paid);
/// assert_eq!(record.status(month, 3, Slot::Morning), AttendanceStatus::Paid);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceRecord(BTreeMap<MonthKey, MonthAttendance>);

impl AttendanceRecord {
    /// Returns the status of a (month, day, slot) cell, `None` if unset.
    pub fn status(&self, month: MonthKey, day: u32, slot: Slot) -> AttendanceStatus {
        self.0
            .get(&month)
            .and_then(|days| days.get(&day))
            .and_then(|slots| slots.get(&slot))
            .copied()
            .unwrap_or_default()
    }

    /// Overwrites a (month, day, slot) cell.
    ///
    /// The day range is not validated here; days outside the month are never
    /// read by the calculator.
    pub fn set(&mut self, month: MonthKey, day: u32, slot: Slot, status: AttendanceStatus) {
        self.0
            .entry(month)
            .or_default()
            .entry(day)
            .or_default()
            .insert(slot, status);
    }

    /// Advances a cell along the toggle cycle and returns the new status.
    pub fn cycle(&mut self, month: MonthKey, day: u32, slot: Slot) -> AttendanceStatus {
        let next = self.status(month, day, slot).next();
        self.set(month, day, slot, next);
        next
    }

    /// Returns the recorded days for a month, if any.
    pub fn month(&self, month: MonthKey) -> Option<&MonthAttendance> {
        self.0.get(&month)
    }

    /// Returns the recorded slots for a day, if any.
    pub fn day(&self, month: MonthKey, day: u32) -> Option<&DayAttendance> {
        self.0.get(&month).and_then(|days| days.get(&day))
    }

    /// Returns true if any slot of the day holds a non-`None` status.
    pub fn day_has_attendance(&self, month: MonthKey, day: u32) -> bool {
        self.day(month, day)
            .is_some_and(|slots| slots.values().any(|s| s.is_attending()))
    }

    /// Returns a clone of one month's data, if present.
    pub fn extract_month(&self, month: MonthKey) -> Option<MonthAttendance> {
        self.0.get(&month).cloned()
    }

    /// Replaces one month's data wholesale.
    pub fn insert_month(&mut self, month: MonthKey, data: MonthAttendance) {
        self.0.insert(month, data);
    }

    /// Deletes one month's data.
    pub fn remove_month(&mut self, month: MonthKey) {
        self.0.remove(&month);
    }

    /// Returns true if no month holds any data.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
