//! Labor entry model.
//!
//! A [`LaborEntry`] is one (trade, role, hours, overtime multiplier) tuple
//! owned by an estimate item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::generate_id;

/// Straight-time multiplier.
pub const STRAIGHT_TIME: Decimal = Decimal::ONE;

fn default_multiplier() -> Decimal {
    STRAIGHT_TIME
}

/// A single block of labor on an estimate item.
///
/// The cost of an entry is `hours * rate(trade, role) * ot_dt_multiplier`.
///
/// # Example
///
/// ```
/// use estimate_engine::models::LaborEntry;
/// use rust_decimal::Decimal;
///
/// let entry = LaborEntry::new("General", "Journeyman");
/// assert!(entry.id.starts_with("lab_"));
/// assert_eq!(entry.hours, Decimal::ZERO);
/// assert_eq!(entry.ot_dt_multiplier, Decimal::ONE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The trade performing the work (e.g. "Electrical").
    pub trade: String,
    /// The skill role within the trade (e.g. "Journeyman").
    pub role: String,
    /// Hours of labor.
    #[serde(default)]
    pub hours: Decimal,
    /// Overtime/double-time multiplier (1.0, 1.5, 2.0, ...).
    #[serde(default = "default_multiplier")]
    pub ot_dt_multiplier: Decimal,
}

impl LaborEntry {
    /// Creates a zero-hour straight-time entry with a fresh id.
    pub fn new(trade: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: generate_id("lab"),
            trade: trade.into(),
            role: role.into(),
            hours: Decimal::ZERO,
            ot_dt_multiplier: STRAIGHT_TIME,
        }
    }

    /// Sets the hours, returning the entry for chaining.
    pub fn with_hours(mut self, hours: Decimal) -> Self {
        self.hours = hours;
        self
    }

    /// Sets the overtime multiplier, returning the entry for chaining.
    pub fn with_multiplier(mut self, multiplier: Decimal) -> Self {
        self.ot_dt_multiplier = multiplier;
        self
    }
}
