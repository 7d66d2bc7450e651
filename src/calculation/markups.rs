//! The shared markup primitive.
//!
//! Both estimate modes price a slice of direct cost through
//! [`apply_markups`]. The evaluation order is fixed:
//!
//! 1. material markup = total raw materials × material markup % × cost ratio
//! 2. base = slice direct cost + material markup
//! 3. overhead = base × overhead %, contingency = base × misc %
//! 4. subtotal = base + contingency + overhead
//! 5. profit = subtotal × profit %
//! 6. sales-tax base = (materials + materials × material markup %) × cost ratio
//! 7. total = subtotal + profit + sales-tax base × sales tax %
//!
//! Sales tax applies to materials and their markup only, never to labor,
//! equipment, subcontractor or miscellaneous costs. Every step saturates at
//! `Decimal::MAX`.

use rust_decimal::Decimal;

use crate::models::{ProjectSettings, QuickQuoteSettings, SliceTotals};

use super::sanitize::percent;

/// Markup percentages as fractions (`0.10` for 10%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkupSchedule {
    /// Material markup fraction.
    pub material_markup: Decimal,
    /// Overhead fraction.
    pub overhead: Decimal,
    /// Contingency fraction.
    pub miscellaneous: Decimal,
    /// Profit margin fraction.
    pub profit_margin: Decimal,
    /// Sales tax fraction.
    pub sales_tax: Decimal,
}

impl MarkupSchedule {
    /// Builds the schedule for a detailed estimate.
    pub fn from_settings(settings: &ProjectSettings) -> Self {
        Self {
            material_markup: percent(settings.material_markup),
            overhead: percent(settings.overhead),
            miscellaneous: percent(settings.miscellaneous),
            profit_margin: percent(settings.profit_margin),
            sales_tax: percent(settings.sales_tax),
        }
    }

    /// Builds the schedule for a quick quote, which has no sales-tax stage.
    pub fn from_quick_quote(settings: &QuickQuoteSettings) -> Self {
        Self {
            material_markup: percent(settings.material_markup),
            overhead: percent(settings.overhead),
            miscellaneous: percent(settings.miscellaneous),
            profit_margin: percent(settings.profit_margin),
            sales_tax: Decimal::ZERO,
        }
    }
}

/// The direct-cost slice being priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupSlice {
    /// Direct cost of this slice.
    pub direct_cost: Decimal,
    /// Raw material cost across the whole estimate.
    pub total_material_cost_raw: Decimal,
    /// This slice's share of total direct cost.
    pub cost_ratio: Decimal,
}

/// Returns `slice / total`, or zero when the total is zero or the quotient
/// is not representable.
///
/// # Examples
///
/// ```
/// use estimate_engine::calculation::cost_ratio;
/// use rust_decimal::Decimal;
///
/// assert_eq!(cost_ratio(Decimal::new(950, 0), Decimal::new(1900, 0)), Decimal::new(5, 1));
/// assert_eq!(cost_ratio(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn cost_ratio(slice: Decimal, total: Decimal) -> Decimal {
    slice.checked_div(total).unwrap_or(Decimal::ZERO)
}

/// Applies the markup sequence to one slice of direct cost.
pub fn apply_markups(schedule: &MarkupSchedule, slice: MarkupSlice) -> SliceTotals {
    let ratio = slice.cost_ratio;
    let materials = slice.total_material_cost_raw;

    let material_markup_amount = materials
        .saturating_mul(schedule.material_markup)
        .saturating_mul(ratio);
    let base_cost = slice.direct_cost.saturating_add(material_markup_amount);
    let overhead_amount = base_cost.saturating_mul(schedule.overhead);
    let misc_amount = base_cost.saturating_mul(schedule.miscellaneous);
    let subtotal = base_cost
        .saturating_add(misc_amount)
        .saturating_add(overhead_amount);
    let profit_amount = subtotal.saturating_mul(schedule.profit_margin);
    let subtotal_with_profit = subtotal.saturating_add(profit_amount);

    let sales_tax_base = materials
        .saturating_add(materials.saturating_mul(schedule.material_markup))
        .saturating_mul(ratio);
    let sales_tax_amount = sales_tax_base.saturating_mul(schedule.sales_tax);

    SliceTotals {
        direct_cost: slice.direct_cost,
        cost_ratio: ratio,
        material_markup_amount,
        base_cost,
        overhead_amount,
        misc_amount,
        subtotal,
        profit_amount,
        subtotal_with_profit,
        sales_tax_base,
        sales_tax_amount,
        total: subtotal_with_profit.saturating_add(sales_tax_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RateTable;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn reference_schedule() -> MarkupSchedule {
        let mut settings = ProjectSettings::new(RateTable::default(), vec![]);
        settings.overhead = dec("10");
        settings.material_markup = dec("10");
        settings.miscellaneous = dec("5");
        settings.profit_margin = dec("15");
        settings.sales_tax = dec("8");
        MarkupSchedule::from_settings(&settings)
    }

    #[test]
    fn test_schedule_converts_percentages() {
        let schedule = reference_schedule();
        assert_eq!(schedule.overhead, dec("0.1"));
        assert_eq!(schedule.miscellaneous, dec("0.05"));
        assert_eq!(schedule.profit_margin, dec("0.15"));
        assert_eq!(schedule.sales_tax, dec("0.08"));
    }

    #[test]
    fn test_reference_slice() {
        let totals = apply_markups(
            &reference_schedule(),
            MarkupSlice {
                direct_cost: dec("950"),
                total_material_cost_raw: dec("100"),
                cost_ratio: Decimal::ONE,
            },
        );

        assert_eq!(totals.material_markup_amount, dec("10"));
        assert_eq!(totals.base_cost, dec("960"));
        assert_eq!(totals.overhead_amount, dec("96"));
        assert_eq!(totals.misc_amount, dec("48"));
        assert_eq!(totals.subtotal, dec("1104"));
        assert_eq!(totals.profit_amount, dec("165.6"));
        assert_eq!(totals.subtotal_with_profit, dec("1269.6"));
        assert_eq!(totals.sales_tax_base, dec("110"));
        assert_eq!(totals.sales_tax_amount, dec("8.8"));
        assert_eq!(totals.total, dec("1278.4"));
    }

    #[test]
    fn test_half_ratio_halves_material_allocations() {
        let totals = apply_markups(
            &reference_schedule(),
            MarkupSlice {
                direct_cost: dec("950"),
                total_material_cost_raw: dec("200"),
                cost_ratio: dec("0.5"),
            },
        );
        assert_eq!(totals.material_markup_amount, dec("10"));
        assert_eq!(totals.sales_tax_base, dec("110"));
        assert_eq!(totals.total, dec("1278.4"));
    }

    #[test]
    fn test_zero_ratio_contributes_no_material_markup_or_tax() {
        let totals = apply_markups(
            &reference_schedule(),
            MarkupSlice {
                direct_cost: Decimal::ZERO,
                total_material_cost_raw: dec("500"),
                cost_ratio: Decimal::ZERO,
            },
        );
        assert_eq!(totals, SliceTotals::default());
    }

    #[test]
    fn test_quick_quote_schedule_has_no_tax() {
        let settings = QuickQuoteSettings {
            overhead: dec("10"),
            material_markup: dec("10"),
            profit_margin: dec("15"),
            miscellaneous: dec("5"),
            ..Default::default()
        };
        let schedule = MarkupSchedule::from_quick_quote(&settings);
        assert_eq!(schedule.sales_tax, Decimal::ZERO);
    }

    #[test]
    fn test_saturated_slice_stays_at_max() {
        let totals = apply_markups(
            &reference_schedule(),
            MarkupSlice {
                direct_cost: Decimal::MAX,
                total_material_cost_raw: Decimal::MAX,
                cost_ratio: Decimal::ONE,
            },
        );
        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.total, Decimal::MAX);
    }

    #[test]
    fn test_cost_ratio_division() {
        assert_eq!(cost_ratio(dec("1"), dec("4")), dec("0.25"));
        assert_eq!(cost_ratio(dec("10"), Decimal::ZERO), Decimal::ZERO);
    }
}
