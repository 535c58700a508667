//! Funded-hours entitlement tracking.
//!
//! The allowance is attached to the child when the age group is assigned and
//! acts as a fixed monthly ceiling expressed in weekly-equivalent hours. It
//! is advisory: nothing at the data layer blocks marking further slots
//! `Free` once the allowance is used up.

use chrono::Datelike;
use rust_decimal::Decimal;

use super::calendar::is_weekend;
use crate::models::{AttendanceStatus, Child, MonthKey, Slot};

/// Sums the slot durations of every `Free` cell in the month.
///
/// Only weekdays are counted; stray weekend data is ignored.
pub fn free_hours_used(child: &Child, month: MonthKey) -> Decimal {
    let mut used = Decimal::ZERO;
    for date in month.days() {
        if is_weekend(date) {
            continue;
        }
        for slot in Slot::ALL {
            if child.calendar_attendance.status(month, date.day(), slot)
                == AttendanceStatus::Free
            {
                used += slot.duration_hours();
            }
        }
    }
    used
}

/// Returns true while the child's funded hours are not yet used up.
pub fn has_remaining_entitlement(child: &Child, month: MonthKey) -> bool {
    free_hours_used(child, month) < Decimal::from(child.free_hours)
}
