//! The monthly invoice calculation.
//!
//! Aggregates one child's month of attendance into hour and amount totals
//! plus a weekday-only weekly breakdown for the invoice renderer.

use chrono::Datelike;
use rust_decimal::Decimal;
use tracing::debug;

use super::calendar::weekday_column;
use super::pricing::slot_cost;
use crate::config::PricingConfig;
use crate::models::{
    AttendanceStatus, Child, InvoiceDay, InvoiceSummary, MonthKey, Slot, WeekBreakdown,
};

/// Calculates the invoice summary for one child and one month.
///
/// Every calendar day of the month is visited in order; Saturdays and
/// Sundays are skipped outright, so stray weekend data never contributes.
/// For each weekday slot: a `Free` status adds the slot duration to the free
/// and total hours, a `Paid` status adds the duration to the paid and total
/// hours and the slot cost to the total amount, and `None` contributes
/// nothing.
///
/// A month with no attendance data yields an all-zero summary; this is not
/// an error. The result is a pure function of the inputs, so repeated calls
/// over unchanged state are identical.
///
/// # Example
///
/// ```
/// use invoice_engine::calculation::calculate;
/// use invoice_engine::config::PricingConfig;
/// use invoice_engine::models::{AttendanceStatus, Child, MonthKey, Slot};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let month: MonthKey = "2025-10".parse().unwrap();
/// let today = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
/// let mut child = Child::new("Ada", NaiveDate::from_ymd_opt(2021, 3, 2).unwrap(), today);
///
/// // 2025-10-15 is a Wednesday.
/// child
///     .calendar_attendance
///     .set(month, 15, Slot::Morning, AttendanceStatus::Paid);
///
/// let summary = calculate(&child, month, &PricingConfig::default());
/// assert_eq!(summary.paid_hours, Decimal::new(25, 1)); // 2.5
/// assert_eq!(summary.total_amount, Decimal::new(1325, 2)); // 13.25
/// ```
pub fn calculate(child: &Child, month: MonthKey, pricing: &PricingConfig) -> InvoiceSummary {
    let mut summary = InvoiceSummary::zero();

    for date in month.days() {
        let Some(column) = weekday_column(date) else {
            continue;
        };
        let day = date.day();

        let week_index = month.week_of_month(day);
        if summary.weeks.last().map(|w| w.index) != Some(week_index) {
            summary.weeks.push(WeekBreakdown::empty(week_index));
        }

        let mut cell = InvoiceDay {
            day,
            ..InvoiceDay::default()
        };
        let mut day_hours = Decimal::ZERO;
        let mut day_amount = Decimal::ZERO;

        for slot in Slot::ALL {
            let status = child.calendar_attendance.status(month, day, slot);
            if !status.is_attending() {
                continue;
            }

            cell.statuses.insert(slot, status);
            let duration = slot.duration_hours();
            summary.total_hours += duration;
            day_hours += duration;

            match status {
                AttendanceStatus::Free => summary.free_hours += duration,
                AttendanceStatus::Paid => {
                    summary.paid_hours += duration;
                    let cost = slot_cost(slot, status, pricing);
                    summary.total_amount += cost;
                    day_amount += cost;
                }
                AttendanceStatus::None => {}
            }
        }

        let week = summary.weeks.last_mut().expect("week pushed above");
        week.days[column] = Some(cell);
        week.hours += day_hours;
        week.amount += day_amount;
    }

    debug!(
        child = %child.id,
        %month,
        total_hours = %summary.total_hours,
        total_amount = %summary.total_amount,
        "calculated invoice summary"
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn test_child() -> Child {
        Child::new(
            "Ada",
            NaiveDate::from_ymd_opt(2021, 3, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        )
    }

    /// IC-001: no attendance data yields an all-zero summary
    #[test]
    fn test_empty_month_is_all_zero() {
        let summary = calculate(&test_child(), month("2025-09"), &PricingConfig::default());
        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert_eq!(summary.free_hours, Decimal::ZERO);
        assert_eq!(summary.paid_hours, Decimal::ZERO);
        assert_eq!(summary.total_amount, Decimal::ZERO);
    }

    /// IC-002: the worked scenario from the pricing policy
    #[test]
    fn test_paid_morning_and_free_early() {
        let m = month("2025-10");
        let mut child = test_child();
        // 2025-10-15 is a Wednesday, 2025-10-16 a Thursday.
        child
            .calendar_attendance
            .set(m, 15, Slot::Morning, AttendanceStatus::Paid);
        child
            .calendar_attendance
            .set(m, 16, Slot::Early, AttendanceStatus::Free);

        let summary = calculate(&child, m, &PricingConfig::default());
        assert_eq!(summary.paid_hours, dec("2.5"));
        assert_eq!(summary.free_hours, dec("1.25"));
        assert_eq!(summary.total_hours, dec("3.75"));
        assert_eq!(summary.total_amount, dec("13.25"));
    }

    /// IC-003: weekend data never contributes
    #[test]
    fn test_weekend_data_excluded() {
        let m = month("2025-09");
        let mut child = test_child();
        // 2025-09-06 is a Saturday, 2025-09-07 a Sunday.
        child
            .calendar_attendance
            .set(m, 6, Slot::Morning, AttendanceStatus::Paid);
        child
            .calendar_attendance
            .set(m, 7, Slot::Late, AttendanceStatus::Free);

        let summary = calculate(&child, m, &PricingConfig::default());
        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert_eq!(summary.total_amount, Decimal::ZERO);
    }

    /// IC-004: the late slot bills the flat fee once per paid day
    #[test]
    fn test_late_slot_flat_fee() {
        let m = month("2025-09");
        let mut child = test_child();
        // Two paid late slots on Monday the 1st and Tuesday the 2nd.
        child
            .calendar_attendance
            .set(m, 1, Slot::Late, AttendanceStatus::Paid);
        child
            .calendar_attendance
            .set(m, 2, Slot::Late, AttendanceStatus::Paid);

        let summary = calculate(&child, m, &PricingConfig::default());
        assert_eq!(summary.total_amount, dec("20.00"));
        assert_eq!(summary.paid_hours, dec("5.0")); // hours still accrue
    }

    /// IC-005: repeated calculation over unchanged state is identical
    #[test]
    fn test_determinism() {
        let m = month("2025-09");
        let mut child = test_child();
        child
            .calendar_attendance
            .set(m, 3, Slot::Morning, AttendanceStatus::Paid);
        child
            .calendar_attendance
            .set(m, 10, Slot::Early, AttendanceStatus::Free);

        let pricing = PricingConfig::default();
        let first = calculate(&child, m, &pricing);
        let second = calculate(&child, m, &pricing);
        assert_eq!(first, second);
    }

    /// IC-006: a full week of paid attendance
    #[test]
    fn test_full_paid_week() {
        let m = month("2025-09");
        let mut child = test_child();
        // Week of Monday the 8th through Friday the 12th, all slots paid.
        for day in 8..=12 {
            for slot in Slot::ALL {
                child
                    .calendar_attendance
                    .set(m, day, slot, AttendanceStatus::Paid);
            }
        }

        let summary = calculate(&child, m, &PricingConfig::default());
        // 5 days * 9.75 hours
        assert_eq!(summary.total_hours, dec("48.75"));
        assert_eq!(summary.paid_hours, dec("48.75"));
        // Per day: 6.25 early + 13.25 morning + 7.95 lunch + 10.60 afternoon
        // + 10.00 late flat = 48.05
        assert_eq!(summary.total_amount, dec("240.25"));
    }

    #[test]
    fn test_weekly_breakdown_shape_for_monday_start() {
        // September 2025 starts on a Monday: 30 days = 4 full weekday weeks
        // plus Mon/Tue of week 5.
        let m = month("2025-09");
        let child = test_child();
        let summary = calculate(&child, m, &PricingConfig::default());

        assert_eq!(summary.weeks.len(), 5);
        assert_eq!(summary.weeks[0].index, 1);
        assert!(summary.weeks[0].days.iter().all(|d| d.is_some()));
        // Week 5 holds only Monday the 29th and Tuesday the 30th.
        let last = &summary.weeks[4];
        assert_eq!(last.index, 5);
        assert_eq!(last.days[0].as_ref().unwrap().day, 29);
        assert_eq!(last.days[1].as_ref().unwrap().day, 30);
        assert!(last.days[2].is_none());
        assert!(last.days[3].is_none());
        assert!(last.days[4].is_none());
    }

    #[test]
    fn test_weekly_breakdown_pads_short_first_week() {
        // October 2025 starts on a Wednesday: week 1 has Mon/Tue placeholders.
        let m = month("2025-10");
        let child = test_child();
        let summary = calculate(&child, m, &PricingConfig::default());

        let first = &summary.weeks[0];
        assert_eq!(first.index, 1);
        assert!(first.days[0].is_none());
        assert!(first.days[1].is_none());
        assert_eq!(first.days[2].as_ref().unwrap().day, 1);
        assert_eq!(first.days[3].as_ref().unwrap().day, 2);
        assert_eq!(first.days[4].as_ref().unwrap().day, 3);
    }

    #[test]
    fn test_weekly_totals_sum_to_month_totals() {
        let m = month("2025-10");
        let mut child = test_child();
        child
            .calendar_attendance
            .set(m, 2, Slot::Morning, AttendanceStatus::Paid);
        child
            .calendar_attendance
            .set(m, 15, Slot::Late, AttendanceStatus::Paid);
        child
            .calendar_attendance
            .set(m, 28, Slot::Early, AttendanceStatus::Free);

        let summary = calculate(&child, m, &PricingConfig::default());
        let week_hours: Decimal = summary.weeks.iter().map(|w| w.hours).sum();
        let week_amount: Decimal = summary.weeks.iter().map(|w| w.amount).sum();
        assert_eq!(week_hours, summary.total_hours);
        assert_eq!(week_amount, summary.total_amount);
    }

    #[test]
    fn test_breakdown_cells_carry_slot_statuses() {
        let m = month("2025-10");
        let mut child = test_child();
        child
            .calendar_attendance
            .set(m, 15, Slot::Morning, AttendanceStatus::Paid);
        child
            .calendar_attendance
            .set(m, 15, Slot::Early, AttendanceStatus::Free);

        let summary = calculate(&child, m, &PricingConfig::default());
        // 2025-10-15 is the Wednesday of week 3.
        let week = summary
            .weeks
            .iter()
            .find(|w| w.index == 3)
            .expect("week 3 present");
        let cell = week.days[2].as_ref().expect("Wednesday cell present");
        assert_eq!(cell.day, 15);
        assert_eq!(cell.status(Slot::Morning), AttendanceStatus::Paid);
        assert_eq!(cell.status(Slot::Early), AttendanceStatus::Free);
        assert_eq!(cell.status(Slot::Lunch), AttendanceStatus::None);
    }

    #[test]
    fn test_explicit_none_contributes_nothing() {
        let m = month("2025-09");
        let mut child = test_child();
        child
            .calendar_attendance
            .set(m, 3, Slot::Morning, AttendanceStatus::None);

        let summary = calculate(&child, m, &PricingConfig::default());
        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert_eq!(summary.total_amount, Decimal::ZERO);
    }
}
