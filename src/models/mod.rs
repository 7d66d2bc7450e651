//! Core data models for the Estimate Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod breakdown;
mod calculation_result;
mod estimate_item;
mod labor_entry;
mod project_settings;
mod quick_quote;
mod rate_table;

pub use breakdown::{Breakdown, DirectCosts, QuickQuoteBreakdown, SliceTotals, TotalsBreakdown};
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use estimate_item::EstimateItem;
pub use labor_entry::{LaborEntry, STRAIGHT_TIME};
pub use project_settings::{AdjustmentKind, ProjectSettings};
pub use quick_quote::{
    DEFAULT_JOURNEYMAN_RATE, QuickQuoteItem, QuickQuoteItemType, QuickQuoteSettings,
};
pub use rate_table::{RateTable, RoleRate, TradeRates};

/// Generates a unique id of the form `<prefix>_<uuid>`.
pub(crate) fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}
