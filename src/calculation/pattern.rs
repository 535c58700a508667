//! Bulk application of a weekly attendance pattern across a month.
//!
//! A pattern is a reusable weekly template of slot statuses. Applying it
//! writes the template into every matching weekday of the month, optionally
//! restricted to specific weeks and optionally skipping days that already
//! hold attendance (typically manually-marked holidays).

use chrono::{Datelike, Weekday};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::calendar::is_weekend;
use crate::models::{AttendanceRecord, AttendanceStatus, MonthKey, Slot};

/// A weekly template of slot statuses, keyed by weekday.
///
/// Only the slots explicitly set are written when the pattern is applied;
/// unmentioned slots are left untouched. Entries for Saturday or Sunday are
/// representable but inert, because application never visits weekend days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekPattern {
    // Keyed by Weekday::number_from_monday (Mon=1 .. Sun=7).
    days: BTreeMap<u32, BTreeMap<Slot, AttendanceStatus>>,
}

impl WeekPattern {
    /// Creates an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one (weekday, slot) assignment.
    pub fn set(&mut self, weekday: Weekday, slot: Slot, status: AttendanceStatus) {
        self.days
            .entry(weekday.number_from_monday())
            .or_default()
            .insert(slot, status);
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, weekday: Weekday, slot: Slot, status: AttendanceStatus) -> Self {
        self.set(weekday, slot, status);
        self
    }

    /// Returns the assignments for a weekday, if any.
    pub fn day(&self, weekday: Weekday) -> Option<&BTreeMap<Slot, AttendanceStatus>> {
        self.days.get(&weekday.number_from_monday())
    }

    /// Returns true if no (weekday, slot) assignment is set.
    pub fn is_empty(&self) -> bool {
        self.days.values().all(|slots| slots.is_empty())
    }
}

/// Selects which weeks of the month a pattern applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekSelector {
    /// Apply to every week of the month.
    All,
    /// Apply only to the given 1-based, Monday-anchored week-of-month
    /// indices.
    Weeks(BTreeSet<u32>),
}

impl WeekSelector {
    /// Builds an explicit week selection from indices.
    pub fn weeks<I: IntoIterator<Item = u32>>(weeks: I) -> Self {
        WeekSelector::Weeks(weeks.into_iter().collect())
    }

    fn matches(&self, week: u32) -> bool {
        match self {
            WeekSelector::All => true,
            WeekSelector::Weeks(weeks) => weeks.contains(&week),
        }
    }
}

/// The result of applying a pattern.
///
/// Rejections are ordinary outcomes carrying a user-facing message, not
/// errors; no partial state change accompanies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternOutcome {
    /// The pattern was applied.
    Applied {
        /// The number of (day, slot) cells written.
        writes: u32,
        /// The number of distinct days written to.
        days: u32,
    },
    /// The pattern had no slot assignments; nothing was written.
    EmptyPattern,
    /// An explicit week selection was empty; nothing was written.
    EmptyWeekSelection,
}

impl PatternOutcome {
    /// Returns the number of cell writes performed.
    pub fn writes(&self) -> u32 {
        match self {
            PatternOutcome::Applied { writes, .. } => *writes,
            _ => 0,
        }
    }

    /// Returns the rejection message to show the user, if the operation was
    /// a no-op.
    pub fn rejection_message(&self) -> Option<&'static str> {
        match self {
            PatternOutcome::Applied { .. } => None,
            PatternOutcome::EmptyPattern => {
                Some("Select at least one attendance slot before applying a pattern.")
            }
            PatternOutcome::EmptyWeekSelection => {
                Some("Select at least one week before applying a pattern.")
            }
        }
    }
}

/// Applies a weekly pattern to every matching weekday of the month.
///
/// For each weekday of `month` whose weekday appears in `pattern`, whose
/// week-of-month is selected by `weeks`, and which is not excluded by
/// `skip_existing`, every (slot, status) assignment of the pattern is
/// written into the record. Weekend days are never touched.
///
/// When `skip_existing` is true, a day already holding any non-`None` slot
/// status is skipped entirely, leaving all of its slots unmodified.
///
/// Application is a pure set operation, so re-running with identical inputs
/// leaves the record unchanged.
///
/// # Example
///
/// ```
/// use invoice_engine::calculation::{apply_pattern, WeekPattern, WeekSelector};
/// use invoice_engine::models::{AttendanceRecord, AttendanceStatus, MonthKey, Slot};
/// use chrono::Weekday;
///
/// let month: MonthKey = "2025-10".parse().unwrap();
/// let mut record = AttendanceRecord::default();
/// let pattern =
///     WeekPattern::new().with(Weekday::Mon, Slot::Morning, AttendanceStatus::Paid);
///
/// // October 2025 has four Mondays.
/// let outcome = apply_pattern(&mut record, month, &pattern, &WeekSelector::All, false);
/// assert_eq!(outcome.writes(), 4);
/// ```
pub fn apply_pattern(
    record: &mut AttendanceRecord,
    month: MonthKey,
    pattern: &WeekPattern,
    weeks: &WeekSelector,
    skip_existing: bool,
) -> PatternOutcome {
    if pattern.is_empty() {
        return PatternOutcome::EmptyPattern;
    }
    if matches!(weeks, WeekSelector::Weeks(set) if set.is_empty()) {
        return PatternOutcome::EmptyWeekSelection;
    }

    let mut writes = 0u32;
    let mut days_written = 0u32;

    for date in month.days() {
        if is_weekend(date) {
            continue;
        }
        let Some(assignments) = pattern.day(date.weekday()) else {
            continue;
        };
        if assignments.is_empty() {
            continue;
        }

        let day = date.day();
        if !weeks.matches(month.week_of_month(day)) {
            continue;
        }
        if skip_existing && record.day_has_attendance(month, day) {
            continue;
        }

        for (&slot, &status) in assignments {
            record.set(month, day, slot, status);
            writes += 1;
        }
        days_written += 1;
    }

    debug!(
        %month,
        writes,
        days = days_written,
        skip_existing,
        "applied attendance pattern"
    );

    PatternOutcome::Applied {
        writes,
        days: days_written,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn monday_morning_paid() -> WeekPattern {
        WeekPattern::new().with(Weekday::Mon, Slot::Morning, AttendanceStatus::Paid)
    }

    /// PA-001: a Monday-only pattern writes once per Monday
    #[test]
    fn test_monday_pattern_all_weeks() {
        // October 2025: Mondays are the 6th, 13th, 20th, and 27th.
        let m = month("2025-10");
        let mut record = AttendanceRecord::default();

        let outcome = apply_pattern(
            &mut record,
            m,
            &monday_morning_paid(),
            &WeekSelector::All,
            false,
        );

        assert_eq!(
            outcome,
            PatternOutcome::Applied {
                writes: 4,
                days: 4
            }
        );
        for day in [6, 13, 20, 27] {
            assert_eq!(
                record.status(m, day, Slot::Morning),
                AttendanceStatus::Paid
            );
            // Unmentioned slots stay untouched.
            assert_eq!(record.status(m, day, Slot::Early), AttendanceStatus::None);
        }
        // Non-Mondays stay untouched.
        assert_eq!(record.status(m, 7, Slot::Morning), AttendanceStatus::None);
    }

    /// PA-002: empty pattern is a no-op outcome, not an error
    #[test]
    fn test_empty_pattern_rejected() {
        let m = month("2025-10");
        let mut record = AttendanceRecord::default();

        let outcome = apply_pattern(
            &mut record,
            m,
            &WeekPattern::new(),
            &WeekSelector::All,
            false,
        );

        assert_eq!(outcome, PatternOutcome::EmptyPattern);
        assert_eq!(outcome.writes(), 0);
        assert!(outcome.rejection_message().is_some());
        assert!(record.is_empty());
    }

    /// PA-003: empty explicit week selection is a no-op outcome
    #[test]
    fn test_empty_week_selection_rejected() {
        let m = month("2025-10");
        let mut record = AttendanceRecord::default();

        let outcome = apply_pattern(
            &mut record,
            m,
            &monday_morning_paid(),
            &WeekSelector::weeks([]),
            false,
        );

        assert_eq!(outcome, PatternOutcome::EmptyWeekSelection);
        assert!(record.is_empty());
    }

    /// PA-004: explicit week selection restricts matched days
    #[test]
    fn test_specific_weeks() {
        let m = month("2025-10");
        let mut record = AttendanceRecord::default();

        // Monday the 6th is in week 2, the 13th in week 3.
        let outcome = apply_pattern(
            &mut record,
            m,
            &monday_morning_paid(),
            &WeekSelector::weeks([2, 3]),
            false,
        );

        assert_eq!(outcome.writes(), 2);
        assert_eq!(record.status(m, 6, Slot::Morning), AttendanceStatus::Paid);
        assert_eq!(record.status(m, 13, Slot::Morning), AttendanceStatus::Paid);
        assert_eq!(record.status(m, 20, Slot::Morning), AttendanceStatus::None);
        assert_eq!(record.status(m, 27, Slot::Morning), AttendanceStatus::None);
    }

    /// PA-005: skip_existing leaves a pre-marked day entirely untouched
    #[test]
    fn test_skip_existing_day() {
        let m = month("2025-10");
        let mut record = AttendanceRecord::default();
        // Monday the 13th was marked manually.
        record.set(m, 13, Slot::Early, AttendanceStatus::Paid);

        let pattern = WeekPattern::new()
            .with(Weekday::Mon, Slot::Morning, AttendanceStatus::Paid)
            .with(Weekday::Mon, Slot::Early, AttendanceStatus::Free);

        let outcome = apply_pattern(&mut record, m, &pattern, &WeekSelector::All, true);

        // Three Mondays written, the pre-marked one skipped in full.
        assert_eq!(
            outcome,
            PatternOutcome::Applied {
                writes: 6,
                days: 3
            }
        );
        assert_eq!(record.status(m, 13, Slot::Early), AttendanceStatus::Paid);
        assert_eq!(record.status(m, 13, Slot::Morning), AttendanceStatus::None);
        assert_eq!(record.status(m, 6, Slot::Early), AttendanceStatus::Free);
        assert_eq!(record.status(m, 6, Slot::Morning), AttendanceStatus::Paid);
    }

    /// PA-006: application is idempotent
    #[test]
    fn test_idempotent() {
        let m = month("2025-10");
        let pattern = WeekPattern::new()
            .with(Weekday::Mon, Slot::Morning, AttendanceStatus::Paid)
            .with(Weekday::Wed, Slot::Late, AttendanceStatus::Free);

        let mut once = AttendanceRecord::default();
        apply_pattern(&mut once, m, &pattern, &WeekSelector::All, false);

        let mut twice = once.clone();
        let second = apply_pattern(&mut twice, m, &pattern, &WeekSelector::All, false);

        assert_eq!(once, twice);
        // The second run reports the same writes; it is a set, not an
        // additive operation.
        assert_eq!(second.writes(), 9); // 4 Mondays + 5 Wednesdays
    }

    /// PA-007: idempotent with skip_existing as well
    #[test]
    fn test_idempotent_with_skip_existing() {
        let m = month("2025-10");
        let pattern = monday_morning_paid();

        let mut once = AttendanceRecord::default();
        apply_pattern(&mut once, m, &pattern, &WeekSelector::All, true);

        let mut twice = once.clone();
        let second = apply_pattern(&mut twice, m, &pattern, &WeekSelector::All, true);

        // The second run skips every already-patterned day but the end state
        // is identical.
        assert_eq!(once, twice);
        assert_eq!(second.writes(), 0);
    }

    /// PA-008: weekend entries in a pattern never match
    #[test]
    fn test_weekend_pattern_entries_inert() {
        let m = month("2025-10");
        let mut record = AttendanceRecord::default();
        let pattern =
            WeekPattern::new().with(Weekday::Sat, Slot::Morning, AttendanceStatus::Paid);

        let outcome = apply_pattern(&mut record, m, &pattern, &WeekSelector::All, false);
        assert_eq!(outcome.writes(), 0);
        assert!(record.is_empty());
    }

    #[test]
    fn test_partial_first_week_selection() {
        // October 2025 starts on Wednesday; week 1 holds only Wed 1 - Fri 3.
        let m = month("2025-10");
        let mut record = AttendanceRecord::default();
        let pattern = WeekPattern::new()
            .with(Weekday::Mon, Slot::Morning, AttendanceStatus::Paid)
            .with(Weekday::Thu, Slot::Morning, AttendanceStatus::Paid);

        let outcome = apply_pattern(
            &mut record,
            m,
            &pattern,
            &WeekSelector::weeks([1]),
            false,
        );

        // No Monday falls in week 1, only Thursday the 2nd.
        assert_eq!(outcome.writes(), 1);
        assert_eq!(record.status(m, 2, Slot::Morning), AttendanceStatus::Paid);
    }
}
