//! Configuration types for pricing and invoice presentation.
//!
//! Settings travel inside the persisted application document. Pricing rates
//! are the only values the engine computes with, so they are validated on
//! load: a missing or non-numeric rate falls back to its documented default
//! with a warning rather than poisoning invoice totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::models::MonthKey;

/// The three billing rates.
///
/// `early` and `standard` are hourly rates; `late` is a flat fee charged
/// once per attended paid late slot regardless of its duration. The split
/// reflects the staffing-cost differential of the boundary hours.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    /// Hourly rate for the early slot.
    pub early: Decimal,
    /// Hourly rate for the morning, lunch, and afternoon slots.
    pub standard: Decimal,
    /// Flat fee for the late slot.
    pub late: Decimal,
}

impl PricingConfig {
    /// The default early rate, 5.00.
    pub fn default_early() -> Decimal {
        Decimal::new(500, 2)
    }

    /// The default standard rate, 5.30.
    pub fn default_standard() -> Decimal {
        Decimal::new(530, 2)
    }

    /// The default late flat fee, 10.00.
    pub fn default_late() -> Decimal {
        Decimal::new(1000, 2)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            early: Self::default_early(),
            standard: Self::default_standard(),
            late: Self::default_late(),
        }
    }
}

/// Raw pricing values as they appear in the document: plain JSON numbers,
/// possibly missing or of the wrong type.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPricing {
    early: Option<serde_json::Value>,
    standard: Option<serde_json::Value>,
    late: Option<serde_json::Value>,
}

fn rate_or_default(raw: Option<serde_json::Value>, name: &str, default: Decimal) -> Decimal {
    match raw.as_ref().and_then(|v| v.as_f64()).and_then(Decimal::from_f64) {
        Some(rate) => rate,
        None => {
            warn!(rate = name, %default, "invalid or missing pricing rate, using default");
            default
        }
    }
}

impl<'de> Deserialize<'de> for PricingConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPricing::deserialize(deserializer)?;
        Ok(Self {
            early: rate_or_default(raw.early, "early", Self::default_early()),
            standard: rate_or_default(raw.standard, "standard", Self::default_standard()),
            late: rate_or_default(raw.late, "late", Self::default_late()),
        })
    }
}

impl Serialize for PricingConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Rates are stored as plain JSON numbers, matching the historical
        // document shape.
        let mut s = serializer.serialize_struct("PricingConfig", 3)?;
        s.serialize_field("early", &self.early.to_f64().unwrap_or(0.0))?;
        s.serialize_field("standard", &self.standard.to_f64().unwrap_or(0.0))?;
        s.serialize_field("late", &self.late.to_f64().unwrap_or(0.0))?;
        s.end()
    }
}

/// Identity details of the nursery, printed on invoices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NurserySettings {
    /// The nursery's display name.
    pub name: String,
    /// The nursery's postal address.
    pub address: String,
    /// Contact details (phone, email).
    pub contact: String,
    /// Logo image reference, if one was uploaded.
    pub logo: Option<String>,
}

/// Invoice presentation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceSettings {
    /// Bank details printed in the payment section.
    pub bank_details: String,
    /// Whether accreditation badges are shown.
    pub accreditation: bool,
    /// Free-form footer text.
    pub footer: String,
    /// The day of the month payment is due.
    pub payment_due_day: u32,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            bank_details: "Please make payment to: Account Name: Nursery Account, \
                           Sort Code: 00-00-00, Account Number: 12345678"
                .to_string(),
            accreditation: true,
            footer: "Payment due by: ".to_string(),
            payment_due_day: 15,
        }
    }
}

impl InvoiceSettings {
    /// Returns the payment due date for a billing month.
    ///
    /// The configured due day is clamped to the length of the month, so a
    /// due day of 31 resolves to the last day of February.
    pub fn payment_due_date(&self, month: MonthKey) -> NaiveDate {
        let day = self.payment_due_day.clamp(1, month.days_in_month());
        month.date(day).expect("clamped to month length")
    }
}

/// All persisted settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The billing rates.
    pub pricing: PricingConfig,
    /// Nursery identity details.
    pub nursery: NurserySettings,
    /// Invoice presentation options.
    pub invoice: InvoiceSettings,
}
