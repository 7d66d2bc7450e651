//! Totals breakdown models.
//!
//! These are the engine's outputs. They are plain values: nothing is
//! written back into the settings that produced them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direct-cost subtotals by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectCosts {
    /// Total labor cost.
    pub labor: Decimal,
    /// Total raw material cost (before markup).
    pub materials: Decimal,
    /// Total equipment and rental cost.
    pub equipment: Decimal,
    /// Total subcontractor cost.
    pub subcontractor: Decimal,
    /// Total miscellaneous line-item cost.
    pub misc_line_items: Decimal,
    /// Sum of all categories.
    pub total: Decimal,
}

impl DirectCosts {
    /// Sums the five categories, saturating at `Decimal::MAX`.
    pub fn sum_categories(&self) -> Decimal {
        [
            self.labor,
            self.materials,
            self.equipment,
            self.subcontractor,
            self.misc_line_items,
        ]
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

/// Markups, tax and total for one slice of direct cost.
///
/// A slice is the original-contract portion, the change-order portion, or
/// the whole project. Every field follows the markup evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceTotals {
    /// Direct cost of this slice.
    pub direct_cost: Decimal,
    /// Share of total project direct cost carried by this slice.
    pub cost_ratio: Decimal,
    /// Material markup allocated to this slice.
    pub material_markup_amount: Decimal,
    /// Direct cost plus material markup.
    pub base_cost: Decimal,
    /// Overhead on the base cost.
    pub overhead_amount: Decimal,
    /// Contingency on the base cost.
    pub misc_amount: Decimal,
    /// Base cost plus contingency and overhead.
    pub subtotal: Decimal,
    /// Profit on the subtotal.
    pub profit_amount: Decimal,
    /// Subtotal plus profit.
    pub subtotal_with_profit: Decimal,
    /// Materials plus material markup, scaled to this slice.
    pub sales_tax_base: Decimal,
    /// Sales tax on the tax base.
    pub sales_tax_amount: Decimal,
    /// Subtotal with profit plus sales tax.
    pub total: Decimal,
}

/// The detailed-mode totals breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsBreakdown {
    /// Direct costs by category across all items.
    pub direct_costs: DirectCosts,
    /// Direct cost of non-change-order items.
    pub original_direct_cost: Decimal,
    /// Direct cost of change-order items.
    pub change_order_direct_cost: Decimal,
    /// Markups applied to the original-contract slice.
    pub original_contract: SliceTotals,
    /// Markups applied to the change-order slice.
    pub change_order: SliceTotals,
    /// Markups applied to the whole project, for summaries and reports.
    pub combined: SliceTotals,
    /// Total of the original-contract slice.
    pub original_contract_total: Decimal,
    /// Total of the change-order slice.
    pub change_order_total: Decimal,
    /// Sales tax across both slices.
    pub sales_tax_amount: Decimal,
    /// Original-contract total plus change-order total.
    pub grand_total_before_adjustments: Decimal,
    /// Additional consideration (percent of the above, or flat).
    pub additional_consideration_amount: Decimal,
    /// Grand total before adjustments plus additional consideration.
    pub subtotal_before_discount: Decimal,
    /// Discount on the subtotal before discount.
    pub discount_amount: Decimal,
    /// Final proposal total.
    pub grand_total: Decimal,
    /// Hours per role; keys are every role in the rate table.
    pub labor_hours_breakdown: BTreeMap<String, Decimal>,
    /// Sum of all per-role hours.
    pub overall_labor_hours: Decimal,
}

/// The quick-quote totals breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickQuoteBreakdown {
    /// Direct costs by category (subcontractor is always zero).
    pub direct_costs: DirectCosts,
    /// Markups over the whole quote; tax fields are always zero.
    pub markups: SliceTotals,
    /// Final proposal total.
    pub grand_total: Decimal,
    /// Labor hours inferred from labor dollars and the default rate.
    pub overall_labor_hours: Decimal,
}

/// Output of the unified engine entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Breakdown {
    /// Result of a detailed estimate.
    Detailed(TotalsBreakdown),
    /// Result of a quick quote.
    QuickQuote(QuickQuoteBreakdown),
}

impl Breakdown {
    /// Returns the final proposal total regardless of mode.
    pub fn grand_total(&self) -> Decimal {
        match self {
            Breakdown::Detailed(b) => b.grand_total,
            Breakdown::QuickQuote(b) => b.grand_total,
        }
    }

    /// Returns the overall labor hours regardless of mode.
    pub fn overall_labor_hours(&self) -> Decimal {
        match self {
            Breakdown::Detailed(b) => b.overall_labor_hours,
            Breakdown::QuickQuote(b) => b.overall_labor_hours,
        }
    }
}
