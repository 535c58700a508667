//! The time-slot catalog.
//!
//! This module defines the five named slots of the operating day together
//! with their display labels, clock ranges, and billable durations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named sub-period of the operating day.
///
/// The five slots partition the day in a fixed order. Durations are
/// configuration constants, not derived from the clock ranges at runtime.
///
/// # Example
///
/// ```
/// use invoice_engine::models::Slot;
/// use rust_decimal::Decimal;
///
/// assert_eq!(Slot::Morning.duration_hours(), Decimal::new(25, 1)); // 2.5
/// assert_eq!(Slot::Early.label(), "Early");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Early drop-off, 7:45-9:00.
    Early,
    /// Morning session, 9:00-11:30.
    Morning,
    /// Lunch cover, 11:30-13:00.
    Lunch,
    /// Afternoon session, 13:00-15:00.
    Afternoon,
    /// Late pick-up, 15:00-17:30. Billed as a flat fee, not hourly.
    Late,
}

impl Slot {
    /// All slots in day order.
    pub const ALL: [Slot; 5] = [
        Slot::Early,
        Slot::Morning,
        Slot::Lunch,
        Slot::Afternoon,
        Slot::Late,
    ];

    /// Returns the billable duration of the slot in hours.
    pub fn duration_hours(self) -> Decimal {
        match self {
            Slot::Early => Decimal::new(125, 2),     // 1.25
            Slot::Morning => Decimal::new(25, 1),    // 2.5
            Slot::Lunch => Decimal::new(15, 1),      // 1.5
            Slot::Afternoon => Decimal::new(20, 1),  // 2.0
            Slot::Late => Decimal::new(25, 1),       // 2.5
        }
    }

    /// Returns the display label for the slot.
    pub fn label(self) -> &'static str {
        match self {
            Slot::Early => "Early",
            Slot::Morning => "Morning",
            Slot::Lunch => "Lunch",
            Slot::Afternoon => "Afternoon",
            Slot::Late => "Late",
        }
    }

    /// Returns the clock range covered by the slot.
    pub fn clock_range(self) -> &'static str {
        match self {
            Slot::Early => "7:45-9:00",
            Slot::Morning => "9:00-11:30",
            Slot::Lunch => "11:30-13:00",
            Slot::Afternoon => "13:00-15:00",
            Slot::Late => "15:00-17:30",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
