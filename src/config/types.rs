//! Configuration types for the estimate engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{AdjustmentKind, DEFAULT_JOURNEYMAN_RATE, RateTable};

/// Default markup percentages for new projects.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultPercentages {
    /// Profit margin percent.
    pub profit_margin: Decimal,
    /// Sales tax percent used when the state has no table entry.
    pub sales_tax: Decimal,
    /// Contingency percent.
    pub miscellaneous: Decimal,
    /// Overhead percent.
    pub overhead: Decimal,
    /// Material markup percent.
    pub material_markup: Decimal,
    /// Discount percent.
    pub discount: Decimal,
}

/// Default additional-consideration adjustment.
#[derive(Debug, Clone, Deserialize)]
pub struct AdditionalConsiderationDefaults {
    /// Percent or flat.
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    /// The percent or dollar value.
    pub value: Decimal,
}

fn default_hourly_rate() -> Decimal {
    DEFAULT_JOURNEYMAN_RATE
}

/// Quick-quote defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct QuickQuoteDefaults {
    /// Rate used to infer labor hours from labor dollars.
    #[serde(default = "default_hourly_rate")]
    pub default_hourly_rate: Decimal,
}

impl Default for QuickQuoteDefaults {
    fn default() -> Self {
        Self {
            default_hourly_rate: DEFAULT_JOURNEYMAN_RATE,
        }
    }
}

/// Contents of `estimator.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorDefaults {
    /// Default project type.
    pub project_type: String,
    /// Default two-letter state code.
    pub project_state: String,
    /// Trades active on a new project.
    pub active_trades: Vec<String>,
    /// Default markup percentages.
    pub percentages: DefaultPercentages,
    /// Default additional consideration.
    pub additional_considerations: AdditionalConsiderationDefaults,
    /// Quick-quote defaults.
    #[serde(default)]
    pub quick_quote: QuickQuoteDefaults,
}

/// Contents of `rates.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Trade → role → hourly rate, in document order.
    pub trades: RateTable,
}

/// Contents of `sales_tax.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesTaxTable {
    /// State code → sales tax percent.
    pub rates: BTreeMap<String, Decimal>,
}

/// The complete estimator configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    defaults: EstimatorDefaults,
    rates: RateTable,
    sales_tax: SalesTaxTable,
}

impl EstimatorConfig {
    /// Creates a new EstimatorConfig from its component parts.
    pub fn new(defaults: EstimatorDefaults, rates: RateTable, sales_tax: SalesTaxTable) -> Self {
        Self {
            defaults,
            rates,
            sales_tax,
        }
    }

    /// Returns the new-project defaults.
    pub fn defaults(&self) -> &EstimatorDefaults {
        &self.defaults
    }

    /// Returns the default rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Returns the state sales-tax table.
    pub fn sales_tax(&self) -> &SalesTaxTable {
        &self.sales_tax
    }
}
