//! The pricing rule: maps a slot and status to a monetary cost.

use rust_decimal::Decimal;

use crate::config::PricingConfig;
use crate::models::{AttendanceStatus, Slot};

/// Returns the cost of one attended slot.
///
/// `Free` and `None` always cost zero. Paid slots bill hourly at the early
/// or standard rate, except the late slot, which is a flat fee per
/// occurrence regardless of its duration.
///
/// # Example
///
/// ```
/// use invoice_engine::calculation::slot_cost;
/// use invoice_engine::config::PricingConfig;
/// use invoice_engine::models::{AttendanceStatus, Slot};
/// use rust_decimal::Decimal;
///
/// let pricing = PricingConfig::default();
/// // Morning: 2.5 hours at the 5.30 standard rate.
/// assert_eq!(
///     slot_cost(Slot::Morning, AttendanceStatus::Paid, &pricing),
///     Decimal::new(1325, 2)
/// );
/// // Late: flat fee.
/// assert_eq!(
///     slot_cost(Slot::Late, AttendanceStatus::Paid, &pricing),
///     Decimal::new(1000, 2)
/// );
/// // Funded sessions cost nothing.
/// assert_eq!(
///     slot_cost(Slot::Morning, AttendanceStatus::Free, &pricing),
///     Decimal::ZERO
/// );
/// ```
pub fn slot_cost(slot: Slot, status: AttendanceStatus, pricing: &PricingConfig) -> Decimal {
    match (status, slot) {
        (AttendanceStatus::Paid, Slot::Late) => pricing.late,
        (AttendanceStatus::Paid, Slot::Early) => pricing.early * slot.duration_hours(),
        (AttendanceStatus::Paid, _) => pricing.standard * slot.duration_hours(),
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// PR-001: free and none cost zero for every slot
    #[test]
    fn test_free_and_none_cost_zero() {
        let pricing = PricingConfig::default();
        for slot in Slot::ALL {
            assert_eq!(slot_cost(slot, AttendanceStatus::Free, &pricing), Decimal::ZERO);
            assert_eq!(slot_cost(slot, AttendanceStatus::None, &pricing), Decimal::ZERO);
        }
    }

    /// PR-002: early bills hourly at the early rate
    #[test]
    fn test_early_rate() {
        let pricing = PricingConfig::default();
        // 1.25 hours at 5.00
        assert_eq!(
            slot_cost(Slot::Early, AttendanceStatus::Paid, &pricing),
            dec("6.25")
        );
    }

    /// PR-003: morning, lunch, and afternoon bill hourly at the standard rate
    #[test]
    fn test_standard_rate_slots() {
        let pricing = PricingConfig::default();
        assert_eq!(
            slot_cost(Slot::Morning, AttendanceStatus::Paid, &pricing),
            dec("13.25") // 2.5 * 5.30
        );
        assert_eq!(
            slot_cost(Slot::Lunch, AttendanceStatus::Paid, &pricing),
            dec("7.95") // 1.5 * 5.30
        );
        assert_eq!(
            slot_cost(Slot::Afternoon, AttendanceStatus::Paid, &pricing),
            dec("10.60") // 2.0 * 5.30
        );
    }

    /// PR-004: late is a flat fee, not hourly
    #[test]
    fn test_late_flat_fee() {
        let pricing = PricingConfig::default();
        let cost = slot_cost(Slot::Late, AttendanceStatus::Paid, &pricing);
        assert_eq!(cost, dec("10.00"));
        // The fee does not scale with the slot duration.
        assert_ne!(cost, pricing.late * Slot::Late.duration_hours());
    }

    #[test]
    fn test_custom_rates() {
        let pricing = PricingConfig {
            early: dec("4.00"),
            standard: dec("6.00"),
            late: dec("12.50"),
        };
        assert_eq!(
            slot_cost(Slot::Early, AttendanceStatus::Paid, &pricing),
            dec("5.00")
        );
        assert_eq!(
            slot_cost(Slot::Afternoon, AttendanceStatus::Paid, &pricing),
            dec("12.00")
        );
        assert_eq!(
            slot_cost(Slot::Late, AttendanceStatus::Paid, &pricing),
            dec("12.50")
        );
    }
}
