//! Audit steps explaining a computed breakdown.
//!
//! Steps are derived from the breakdown after the fact, in the engine's
//! evaluation order, so they always agree with the numbers returned.

use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::models::{
    AdjustmentKind, AuditStep, ProjectSettings, QuickQuoteBreakdown, QuickQuoteSettings,
    SliceTotals, TotalsBreakdown,
};

struct StepRecorder {
    steps: Vec<AuditStep>,
}

impl StepRecorder {
    fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn record(&mut self, rule_id: &str, rule_name: &str, input: Value, output: Value, reasoning: String) {
        self.steps.push(AuditStep {
            step_number: self.steps.len() as u32 + 1,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    fn finish(self) -> Vec<AuditStep> {
        self.steps
    }
}

fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Whole-number percents as entered, for reasoning strings.
struct Percents {
    material_markup: Decimal,
    overhead: Decimal,
    miscellaneous: Decimal,
    profit_margin: Decimal,
    sales_tax: Option<Decimal>,
}

fn record_slice(recorder: &mut StepRecorder, slice_name: &str, slice: &SliceTotals, pct: &Percents) {
    recorder.record(
        "material_markup",
        "Material Markup",
        json!({
            "slice": slice_name,
            "cost_ratio": amount(slice.cost_ratio),
            "material_markup_percent": amount(pct.material_markup),
        }),
        json!({
            "material_markup_amount": amount(slice.material_markup_amount),
            "base_cost": amount(slice.base_cost),
        }),
        format!(
            "${} direct + ${} material markup ({}% share {}) = ${} base",
            amount(slice.direct_cost),
            amount(slice.material_markup_amount),
            amount(pct.material_markup),
            amount(slice.cost_ratio),
            amount(slice.base_cost)
        ),
    );

    recorder.record(
        "overhead",
        "Overhead",
        json!({ "slice": slice_name, "base_cost": amount(slice.base_cost) }),
        json!({ "overhead_amount": amount(slice.overhead_amount) }),
        format!(
            "${} x {}% = ${}",
            amount(slice.base_cost),
            amount(pct.overhead),
            amount(slice.overhead_amount)
        ),
    );

    recorder.record(
        "contingency",
        "Contingency",
        json!({ "slice": slice_name, "base_cost": amount(slice.base_cost) }),
        json!({
            "misc_amount": amount(slice.misc_amount),
            "subtotal": amount(slice.subtotal),
        }),
        format!(
            "${} x {}% = ${}",
            amount(slice.base_cost),
            amount(pct.miscellaneous),
            amount(slice.misc_amount)
        ),
    );

    recorder.record(
        "profit",
        "Profit Margin",
        json!({ "slice": slice_name, "subtotal": amount(slice.subtotal) }),
        json!({
            "profit_amount": amount(slice.profit_amount),
            "subtotal_with_profit": amount(slice.subtotal_with_profit),
        }),
        format!(
            "${} x {}% = ${}",
            amount(slice.subtotal),
            amount(pct.profit_margin),
            amount(slice.profit_amount)
        ),
    );

    if let Some(sales_tax) = pct.sales_tax {
        recorder.record(
            "sales_tax",
            "Sales Tax",
            json!({ "slice": slice_name, "sales_tax_base": amount(slice.sales_tax_base) }),
            json!({
                "sales_tax_amount": amount(slice.sales_tax_amount),
                "total": amount(slice.total),
            }),
            format!(
                "${} materials incl. markup x {}% = ${}",
                amount(slice.sales_tax_base),
                amount(sales_tax),
                amount(slice.sales_tax_amount)
            ),
        );
    }
}

/// Explains a detailed breakdown as ordered audit steps.
///
/// Slices with no direct cost are skipped.
pub fn explain_detailed(breakdown: &TotalsBreakdown, settings: &ProjectSettings) -> Vec<AuditStep> {
    let mut recorder = StepRecorder::new();
    let direct = &breakdown.direct_costs;

    recorder.record(
        "direct_costs",
        "Direct Cost Accumulation",
        json!({
            "labor": amount(direct.labor),
            "materials": amount(direct.materials),
            "equipment": amount(direct.equipment),
            "subcontractor": amount(direct.subcontractor),
            "misc_line_items": amount(direct.misc_line_items),
        }),
        json!({ "total": amount(direct.total) }),
        format!(
            "${} labor + ${} materials + ${} equipment + ${} subcontractor + ${} misc = ${}",
            amount(direct.labor),
            amount(direct.materials),
            amount(direct.equipment),
            amount(direct.subcontractor),
            amount(direct.misc_line_items),
            amount(direct.total)
        ),
    );

    recorder.record(
        "change_order_split",
        "Change Order Split",
        json!({ "total_direct_cost": amount(direct.total) }),
        json!({
            "original_direct_cost": amount(breakdown.original_direct_cost),
            "change_order_direct_cost": amount(breakdown.change_order_direct_cost),
        }),
        format!(
            "Original contract ${} (share {}), change orders ${} (share {})",
            amount(breakdown.original_direct_cost),
            amount(breakdown.original_contract.cost_ratio),
            amount(breakdown.change_order_direct_cost),
            amount(breakdown.change_order.cost_ratio)
        ),
    );

    let pct = Percents {
        material_markup: settings.material_markup,
        overhead: settings.overhead,
        miscellaneous: settings.miscellaneous,
        profit_margin: settings.profit_margin,
        sales_tax: Some(settings.sales_tax),
    };
    for (name, slice) in [
        ("original_contract", &breakdown.original_contract),
        ("change_order", &breakdown.change_order),
    ] {
        if !slice.direct_cost.is_zero() {
            record_slice(&mut recorder, name, slice, &pct);
        }
    }

    let additional_reasoning = match settings.additional_considerations_type {
        AdjustmentKind::Percent => format!(
            "${} x {}% = ${}",
            amount(breakdown.grand_total_before_adjustments),
            amount(settings.additional_considerations_value),
            amount(breakdown.additional_consideration_amount)
        ),
        AdjustmentKind::Flat => format!(
            "Flat amount of ${}",
            amount(breakdown.additional_consideration_amount)
        ),
    };
    recorder.record(
        "additional_considerations",
        "Additional Considerations",
        json!({
            "grand_total_before_adjustments": amount(breakdown.grand_total_before_adjustments),
            "type": settings.additional_considerations_type,
            "value": amount(settings.additional_considerations_value),
        }),
        json!({
            "additional_consideration_amount": amount(breakdown.additional_consideration_amount),
            "subtotal_before_discount": amount(breakdown.subtotal_before_discount),
        }),
        additional_reasoning,
    );

    recorder.record(
        "discount",
        "Discount",
        json!({ "subtotal_before_discount": amount(breakdown.subtotal_before_discount) }),
        json!({
            "discount_amount": amount(breakdown.discount_amount),
            "grand_total": amount(breakdown.grand_total),
        }),
        format!(
            "${} - ${} ({}%) = ${}",
            amount(breakdown.subtotal_before_discount),
            amount(breakdown.discount_amount),
            amount(settings.discount),
            amount(breakdown.grand_total)
        ),
    );

    recorder.finish()
}

/// Explains a quick-quote breakdown as ordered audit steps.
pub fn explain_quick_quote(
    breakdown: &QuickQuoteBreakdown,
    settings: &QuickQuoteSettings,
) -> Vec<AuditStep> {
    let mut recorder = StepRecorder::new();
    let direct = &breakdown.direct_costs;

    recorder.record(
        "direct_costs",
        "Direct Cost Accumulation",
        json!({
            "labor": amount(direct.labor),
            "materials": amount(direct.materials),
            "equipment": amount(direct.equipment),
            "other": amount(direct.misc_line_items),
        }),
        json!({ "total": amount(direct.total) }),
        format!(
            "${} labor + ${} materials + ${} equipment + ${} other = ${}",
            amount(direct.labor),
            amount(direct.materials),
            amount(direct.equipment),
            amount(direct.misc_line_items),
            amount(direct.total)
        ),
    );

    recorder.record(
        "labor_hours",
        "Labor Hours Estimate",
        json!({
            "labor": amount(direct.labor),
            "default_hourly_rate": amount(settings.default_hourly_rate),
        }),
        json!({ "overall_labor_hours": amount(breakdown.overall_labor_hours) }),
        format!(
            "${} / ${}/hr = {} hours",
            amount(direct.labor),
            amount(settings.default_hourly_rate),
            amount(breakdown.overall_labor_hours)
        ),
    );

    let pct = Percents {
        material_markup: settings.material_markup,
        overhead: settings.overhead,
        miscellaneous: settings.miscellaneous,
        profit_margin: settings.profit_margin,
        sales_tax: None,
    };
    record_slice(&mut recorder, "quick_quote", &breakdown.markups, &pct);

    recorder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{compute_detailed_totals, compute_quick_quote_totals};
    use crate::models::{EstimateItem, QuickQuoteItem, QuickQuoteItemType, RateTable};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_settings() -> ProjectSettings {
        let mut rates = RateTable::default();
        rates.insert("General", "Journeyman", dec("75"));
        let mut settings = ProjectSettings::new(rates, vec!["General".to_string()]);
        settings.overhead = dec("10");
        settings.material_markup = dec("10");
        settings.miscellaneous = dec("5");
        settings.profit_margin = dec("15");
        settings.sales_tax = dec("8");
        settings
    }

    fn create_reference_item() -> EstimateItem {
        let mut item = EstimateItem::new("Reference", "General", "Journeyman");
        item.labor_entries[0].hours = dec("10");
        item.material_quantity = dec("2");
        item.material_unit_cost = dec("50");
        item.equipment_rental_cost = dec("100");
        item
    }

    #[test]
    fn test_detailed_steps_follow_evaluation_order() {
        let settings = create_test_settings();
        let breakdown = compute_detailed_totals(&[create_reference_item()], &settings);

        let steps = explain_detailed(&breakdown, &settings);
        let rule_ids: Vec<&str> = steps.iter().map(|s| s.rule_id.as_str()).collect();

        assert_eq!(
            rule_ids,
            vec![
                "direct_costs",
                "change_order_split",
                "material_markup",
                "overhead",
                "contingency",
                "profit",
                "sales_tax",
                "additional_considerations",
                "discount",
            ]
        );
        for (index, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, index as u32 + 1);
        }
    }

    #[test]
    fn test_overhead_step_content() {
        let settings = create_test_settings();
        let breakdown = compute_detailed_totals(&[create_reference_item()], &settings);
        let steps = explain_detailed(&breakdown, &settings);

        let overhead = steps.iter().find(|s| s.rule_id == "overhead").unwrap();
        assert_eq!(overhead.input["slice"].as_str().unwrap(), "original_contract");
        assert_eq!(overhead.input["base_cost"].as_str().unwrap(), "960");
        assert_eq!(overhead.output["overhead_amount"].as_str().unwrap(), "96");
        assert_eq!(overhead.reasoning, "$960 x 10% = $96");
    }

    #[test]
    fn test_sales_tax_step_reports_material_base() {
        let settings = create_test_settings();
        let breakdown = compute_detailed_totals(&[create_reference_item()], &settings);
        let steps = explain_detailed(&breakdown, &settings);

        let tax = steps.iter().find(|s| s.rule_id == "sales_tax").unwrap();
        assert_eq!(tax.input["sales_tax_base"].as_str().unwrap(), "110");
        assert_eq!(tax.output["sales_tax_amount"].as_str().unwrap(), "8.8");
    }

    #[test]
    fn test_change_order_slice_has_its_own_steps() {
        let settings = create_test_settings();
        let mut co = create_reference_item();
        co.is_change_order = true;
        let breakdown = compute_detailed_totals(&[create_reference_item(), co], &settings);

        let steps = explain_detailed(&breakdown, &settings);
        let overhead_slices: Vec<&str> = steps
            .iter()
            .filter(|s| s.rule_id == "overhead")
            .map(|s| s.input["slice"].as_str().unwrap())
            .collect();
        assert_eq!(overhead_slices, vec!["original_contract", "change_order"]);
    }

    #[test]
    fn test_empty_estimate_explains_adjustments_only() {
        let settings = create_test_settings();
        let breakdown = compute_detailed_totals(&[], &settings);
        let steps = explain_detailed(&breakdown, &settings);
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[2].rule_id, "additional_considerations");
    }

    #[test]
    fn test_flat_consideration_reasoning() {
        let mut settings = create_test_settings();
        settings.additional_considerations_type = AdjustmentKind::Flat;
        settings.additional_considerations_value = dec("250");
        let breakdown = compute_detailed_totals(&[], &settings);

        let steps = explain_detailed(&breakdown, &settings);
        let step = steps
            .iter()
            .find(|s| s.rule_id == "additional_considerations")
            .unwrap();
        assert_eq!(step.reasoning, "Flat amount of $250");
        assert_eq!(step.input["type"].as_str().unwrap(), "$");
    }

    #[test]
    fn test_quick_quote_has_no_sales_tax_step() {
        let settings = QuickQuoteSettings {
            overhead: dec("10"),
            ..Default::default()
        };
        let items = vec![QuickQuoteItem::new(QuickQuoteItemType::Labor)];
        let breakdown = compute_quick_quote_totals(&items, &settings);

        let steps = explain_quick_quote(&breakdown, &settings);

        assert!(steps.iter().all(|s| s.rule_id != "sales_tax"));
        let hours = steps.iter().find(|s| s.rule_id == "labor_hours").unwrap();
        assert_eq!(hours.reasoning, "$600 / $75/hr = 8 hours");
    }
}
