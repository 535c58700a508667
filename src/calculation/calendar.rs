//! Calendar rules shared by the calculator and the pattern applier.
//!
//! Only weekdays (Monday through Friday) carry attendance; Saturdays and
//! Sundays are excluded from every aggregate even if stray data was written
//! for them.

use chrono::{Datelike, NaiveDate, Weekday};

/// Returns true for Saturday and Sunday.
///
/// # Example
///
/// ```
/// use invoice_engine::calculation::is_weekend;
/// use chrono::NaiveDate;
///
/// // 2025-09-06 is a Saturday
/// assert!(is_weekend(NaiveDate::from_ymd_opt(2025, 9, 6).unwrap()));
/// // 2025-09-08 is a Monday
/// assert!(!is_weekend(NaiveDate::from_ymd_opt(2025, 9, 8).unwrap()));
/// ```
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns the Monday..Friday column index (0..=4) for a date, or `None`
/// for weekend days.
pub fn weekday_column(date: NaiveDate) -> Option<usize> {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => None,
        weekday => Some(weekday.num_days_from_monday() as usize),
    }
}
