//! Configuration for the invoicing engine.

mod types;

pub use types::{InvoiceSettings, NurserySettings, PricingConfig, Settings};
