//! Detailed-mode aggregation.
//!
//! Accumulates direct costs over all items, splits them into the
//! original-contract and change-order slices, prices each slice through the
//! shared markup primitive, then applies additional considerations and the
//! discount to the sum.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    AdjustmentKind, DirectCosts, EstimateItem, ProjectSettings, TotalsBreakdown,
};

use super::item_cost::{cost_materials, direct_cost, labor_entry_cost_at};
use super::markups::{MarkupSchedule, MarkupSlice, apply_markups, cost_ratio};
use super::rate_resolution::resolve_entry;
use super::sanitize::{non_negative, percent};

/// Running category totals and the per-role hours map.
struct Accumulator {
    direct_costs: DirectCosts,
    original_direct_cost: Decimal,
    change_order_direct_cost: Decimal,
    labor_hours_breakdown: BTreeMap<String, Decimal>,
}

impl Accumulator {
    fn new(settings: &ProjectSettings) -> Self {
        let labor_hours_breakdown = settings
            .all_trade_labor_rates
            .all_roles()
            .into_iter()
            .map(|role| (role, Decimal::ZERO))
            .collect();

        Self {
            direct_costs: DirectCosts::default(),
            original_direct_cost: Decimal::ZERO,
            change_order_direct_cost: Decimal::ZERO,
            labor_hours_breakdown,
        }
    }

    fn add_item(&mut self, settings: &ProjectSettings, item: &EstimateItem) {
        let costs = &mut self.direct_costs;
        for entry in &item.labor_entries {
            let resolved = resolve_entry(settings, entry);
            costs.labor = costs
                .labor
                .saturating_add(labor_entry_cost_at(resolved.hourly_rate, entry));

            if let Some(hours) = self.labor_hours_breakdown.get_mut(&resolved.role) {
                *hours = hours.saturating_add(entry.hours);
            }
        }

        costs.materials = costs.materials.saturating_add(cost_materials(item));
        costs.equipment = costs.equipment.saturating_add(item.equipment_rental_cost);
        costs.subcontractor = costs
            .subcontractor
            .saturating_add(item.subcontractor_cost_line_item);
        costs.misc_line_items = costs.misc_line_items.saturating_add(item.misc_line_item);

        let item_direct = direct_cost(settings, item);
        if item.is_change_order {
            self.change_order_direct_cost = self.change_order_direct_cost.saturating_add(item_direct);
        } else {
            self.original_direct_cost = self.original_direct_cost.saturating_add(item_direct);
        }
    }
}

/// Computes the detailed totals breakdown for a set of items.
///
/// This is a total function: it never fails, never panics and never mutates
/// its inputs. Dangling trade/role references are priced as their healed
/// equivalents, and sums that would overflow saturate at `Decimal::MAX`.
///
/// # Examples
///
/// ```
/// use estimate_engine::calculation::compute_detailed_totals;
/// use estimate_engine::models::{EstimateItem, ProjectSettings, RateTable};
/// use rust_decimal::Decimal;
///
/// let mut rates = RateTable::default();
/// rates.insert("General", "Journeyman", Decimal::new(75, 0));
/// let mut settings = ProjectSettings::new(rates, vec!["General".to_string()]);
/// settings.profit_margin = Decimal::new(10, 0);
///
/// let mut item = EstimateItem::new("Demo", "General", "Journeyman");
/// item.labor_entries[0].hours = Decimal::new(8, 0);
///
/// let totals = compute_detailed_totals(&[item], &settings);
/// assert_eq!(totals.direct_costs.labor, Decimal::new(600, 0));
/// assert_eq!(totals.grand_total, Decimal::new(660, 0));
/// assert_eq!(totals.labor_hours_breakdown["Journeyman"], Decimal::new(8, 0));
/// ```
pub fn compute_detailed_totals(items: &[EstimateItem], settings: &ProjectSettings) -> TotalsBreakdown {
    let mut acc = Accumulator::new(settings);
    for item in items {
        acc.add_item(settings, item);
    }

    let mut direct_costs = acc.direct_costs;
    direct_costs.total = direct_costs.sum_categories();
    let total_direct = direct_costs.total;
    let materials = direct_costs.materials;

    let schedule = MarkupSchedule::from_settings(settings);
    let slice = |direct_cost: Decimal| MarkupSlice {
        direct_cost,
        total_material_cost_raw: materials,
        cost_ratio: cost_ratio(direct_cost, total_direct),
    };

    let original_contract = apply_markups(&schedule, slice(acc.original_direct_cost));
    let change_order = apply_markups(&schedule, slice(acc.change_order_direct_cost));
    let combined = apply_markups(&schedule, slice(total_direct));

    let grand_total_before_adjustments = original_contract.total.saturating_add(change_order.total);
    let additional_consideration_amount = match settings.additional_considerations_type {
        AdjustmentKind::Percent => grand_total_before_adjustments
            .saturating_mul(percent(settings.additional_considerations_value)),
        AdjustmentKind::Flat => non_negative(settings.additional_considerations_value),
    };
    let subtotal_before_discount =
        grand_total_before_adjustments.saturating_add(additional_consideration_amount);
    let discount_amount = subtotal_before_discount.saturating_mul(percent(settings.discount));
    let grand_total = subtotal_before_discount.saturating_sub(discount_amount);

    let overall_labor_hours = acc
        .labor_hours_breakdown
        .values()
        .copied()
        .fold(Decimal::ZERO, Decimal::saturating_add);

    debug!(
        items = items.len(),
        direct_cost = %total_direct,
        original_contract_total = %original_contract.total,
        change_order_total = %change_order.total,
        grand_total = %grand_total,
        "Computed detailed totals"
    );

    TotalsBreakdown {
        direct_costs,
        original_direct_cost: acc.original_direct_cost,
        change_order_direct_cost: acc.change_order_direct_cost,
        original_contract_total: original_contract.total,
        change_order_total: change_order.total,
        sales_tax_amount: original_contract
            .sales_tax_amount
            .saturating_add(change_order.sales_tax_amount),
        original_contract,
        change_order,
        combined,
        grand_total_before_adjustments,
        additional_consideration_amount,
        subtotal_before_discount,
        discount_amount,
        grand_total,
        labor_hours_breakdown: acc.labor_hours_breakdown,
        overall_labor_hours,
    }
}
