//! Invoice summary models.
//!
//! These types capture the output of a monthly invoice calculation: overall
//! hour and amount totals plus a weekday-only weekly breakdown with enough
//! per-day, per-slot detail for the PDF/CSV renderer. They are derived on
//! demand and never persisted.

use rust_decimal::Decimal;
use serde::Serialize;

use super::attendance::DayAttendance;
use super::slot::Slot;
use super::status::AttendanceStatus;

/// One weekday cell of a weekly breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvoiceDay {
    /// The day-of-month this cell covers.
    pub day: u32,
    /// Statuses of the slots touched on this day. Untouched slots are
    /// absent and read as `None`.
    pub statuses: DayAttendance,
}

impl InvoiceDay {
    /// Returns the status of a slot on this day, `None` if untouched.
    pub fn status(&self, slot: Slot) -> AttendanceStatus {
        self.statuses.get(&slot).copied().unwrap_or_default()
    }
}

/// One Monday-to-Friday week of the month.
///
/// Short first and last weeks are padded with empty placeholder cells so
/// that every week renders as five columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekBreakdown {
    /// The 1-based, Monday-anchored week-of-month index.
    pub index: u32,
    /// The Monday..Friday cells; `None` marks a day outside the month.
    pub days: [Option<InvoiceDay>; 5],
    /// Attended hours within this week.
    pub hours: Decimal,
    /// Billable amount within this week.
    pub amount: Decimal,
}

impl WeekBreakdown {
    /// Creates an empty week with the given index.
    pub fn empty(index: u32) -> Self {
        Self {
            index,
            days: Default::default(),
            hours: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }
}

/// The invoice summary for one child and one month.
///
/// Recomputed on demand from the attendance record and the pricing
/// configuration; calculating twice over unchanged state yields identical
/// values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceSummary {
    /// Total attended hours (paid + free).
    pub total_hours: Decimal,
    /// Hours covered by the funded entitlement.
    pub free_hours: Decimal,
    /// Billable hours.
    pub paid_hours: Decimal,
    /// Total billable amount.
    pub total_amount: Decimal,
    /// The weekday-only weekly breakdown, in week order.
    pub weeks: Vec<WeekBreakdown>,
}

impl InvoiceSummary {
    /// Returns an all-zero summary with no weeks.
    pub fn zero() -> Self {
        Self {
            total_hours: Decimal::ZERO,
            free_hours: Decimal::ZERO,
            paid_hours: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            weeks: Vec::new(),
        }
    }
}
