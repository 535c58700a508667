//! Calculation logic for the invoicing engine.
//!
//! This module contains the calculation rules: calendar day classification,
//! slot pricing, funded-hours entitlement tracking, the monthly invoice
//! aggregation, and the weekly pattern applier.

mod calendar;
mod entitlement;
mod invoice;
mod pattern;
mod pricing;

pub use calendar::{is_weekend, weekday_column};
pub use entitlement::{free_hours_used, has_remaining_entitlement};
pub use invoice::calculate;
pub use pattern::{PatternOutcome, WeekPattern, WeekSelector, apply_pattern};
pub use pricing::slot_cost;
