//! Project-level settings.
//!
//! [`ProjectSettings`] holds the rate table, the active trades and every
//! markup percentage. Percentages are whole-number percents (`10` = 10%).
//! Settings are read-only input to the engine; computed totals are returned
//! separately as a breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::RateTable;

/// How the additional-consideration adjustment is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdjustmentKind {
    /// A percentage of the grand total before adjustments.
    #[default]
    #[serde(rename = "%")]
    Percent,
    /// A flat dollar amount.
    #[serde(rename = "$")]
    Flat,
}

/// Global settings for a detailed estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Project name.
    #[serde(default)]
    pub project_name: String,
    /// Client or customer name.
    #[serde(default)]
    pub client_name: String,
    /// Project type (e.g. "Commercial", "Residential", "Quick Quote").
    #[serde(default)]
    pub project_type: String,
    /// Two-letter state code used to seed the sales tax.
    #[serde(default)]
    pub project_state: String,
    /// Trade → role → hourly rate.
    #[serde(default)]
    pub all_trade_labor_rates: RateTable,
    /// Trades available to labor entries, in selection order.
    #[serde(default)]
    pub active_trades: Vec<String>,
    /// Overhead percent.
    #[serde(default)]
    pub overhead: Decimal,
    /// Material markup percent.
    #[serde(default)]
    pub material_markup: Decimal,
    /// Profit margin percent.
    #[serde(default)]
    pub profit_margin: Decimal,
    /// Contingency / miscellaneous percent.
    #[serde(default)]
    pub miscellaneous: Decimal,
    /// Sales tax percent, applied to materials only.
    #[serde(default)]
    pub sales_tax: Decimal,
    /// Discount percent, applied last.
    #[serde(default)]
    pub discount: Decimal,
    /// Whether the additional consideration is a percent or a flat amount.
    #[serde(default)]
    pub additional_considerations_type: AdjustmentKind,
    /// The additional-consideration percent or dollar amount.
    #[serde(default)]
    pub additional_considerations_value: Decimal,
}

impl ProjectSettings {
    /// Creates settings with the given rates and trades and all
    /// percentages at zero.
    pub fn new(all_trade_labor_rates: RateTable, active_trades: Vec<String>) -> Self {
        Self {
            project_name: String::new(),
            client_name: String::new(),
            project_type: String::new(),
            project_state: String::new(),
            all_trade_labor_rates,
            active_trades,
            overhead: Decimal::ZERO,
            material_markup: Decimal::ZERO,
            profit_margin: Decimal::ZERO,
            miscellaneous: Decimal::ZERO,
            sales_tax: Decimal::ZERO,
            discount: Decimal::ZERO,
            additional_considerations_type: AdjustmentKind::Percent,
            additional_considerations_value: Decimal::ZERO,
        }
    }

    /// Returns the named percentage fields in display order.
    pub fn percentages(&self) -> [(&'static str, Decimal); 7] {
        [
            ("profit_margin", self.profit_margin),
            ("sales_tax", self.sales_tax),
            ("miscellaneous", self.miscellaneous),
            ("overhead", self.overhead),
            ("material_markup", self.material_markup),
            ("discount", self.discount),
            (
                "additional_considerations_value",
                self.additional_considerations_value,
            ),
        ]
    }

    /// Strict validation used before persisting settings.
    ///
    /// Rejects an empty active-trade list, negative percentages and negative
    /// labor rates for active trades. The totals engine never calls this;
    /// it sanitizes instead.
    pub fn validate(&self) -> EngineResult<()> {
        if self.active_trades.is_empty() {
            return Err(EngineError::InvalidSetting {
                field: "active_trades".to_string(),
                message: "select at least one trade".to_string(),
            });
        }

        for (field, value) in self.percentages() {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidSetting {
                    field: field.to_string(),
                    message: format!("must be a non-negative number, got {}", value),
                });
            }
        }

        for (trade, role, rate) in self.all_trade_labor_rates.entries() {
            if rate < Decimal::ZERO && self.active_trades.iter().any(|t| t == trade) {
                return Err(EngineError::InvalidRate {
                    trade: trade.to_string(),
                    role: role.to_string(),
                    rate,
                });
            }
        }

        Ok(())
    }
}
