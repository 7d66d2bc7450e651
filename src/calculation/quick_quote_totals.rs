//! Quick-quote aggregation.
//!
//! Flat amounts per category, priced as a single slice with no sales-tax,
//! additional-consideration or discount stage.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    DirectCosts, QuickQuoteBreakdown, QuickQuoteItem, QuickQuoteItemType, QuickQuoteSettings,
};

use super::markups::{MarkupSchedule, MarkupSlice, apply_markups};
use super::sanitize::non_negative;

/// Computes the quick-quote breakdown.
///
/// Labor hours are estimated as labor dollars divided by the configured
/// default hourly rate (zero when that rate is zero or negative).
///
/// # Examples
///
/// ```
/// use estimate_engine::calculation::compute_quick_quote_totals;
/// use estimate_engine::models::{QuickQuoteItem, QuickQuoteItemType, QuickQuoteSettings};
/// use rust_decimal::Decimal;
///
/// let items = vec![QuickQuoteItem::new(QuickQuoteItemType::Labor)];
/// let totals = compute_quick_quote_totals(&items, &QuickQuoteSettings::default());
///
/// assert_eq!(totals.grand_total, Decimal::new(600, 0));
/// assert_eq!(totals.overall_labor_hours, Decimal::new(8, 0));
/// ```
pub fn compute_quick_quote_totals(
    items: &[QuickQuoteItem],
    settings: &QuickQuoteSettings,
) -> QuickQuoteBreakdown {
    let mut direct_costs = DirectCosts::default();
    let mut overall_labor_hours = Decimal::ZERO;
    let hourly_rate = non_negative(settings.default_hourly_rate);

    for item in items {
        let amount = item.total_amount;
        let category = match item.item_type {
            QuickQuoteItemType::Labor => {
                if let Some(hours) = amount.checked_div(hourly_rate) {
                    overall_labor_hours = overall_labor_hours.saturating_add(hours);
                }
                &mut direct_costs.labor
            }
            QuickQuoteItemType::Material => &mut direct_costs.materials,
            QuickQuoteItemType::Equipment => &mut direct_costs.equipment,
            QuickQuoteItemType::Other => &mut direct_costs.misc_line_items,
        };
        *category = category.saturating_add(amount);
    }

    direct_costs.total = direct_costs.sum_categories();

    let markups = apply_markups(
        &MarkupSchedule::from_quick_quote(settings),
        MarkupSlice {
            direct_cost: direct_costs.total,
            total_material_cost_raw: direct_costs.materials,
            cost_ratio: Decimal::ONE,
        },
    );
    let grand_total = markups.total;

    debug!(
        items = items.len(),
        direct_cost = %direct_costs.total,
        grand_total = %grand_total,
        "Computed quick quote totals"
    );

    QuickQuoteBreakdown {
        direct_costs,
        markups,
        grand_total,
        overall_labor_hours,
    }
}
