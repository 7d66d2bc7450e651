//! Property tests for the detailed totals computation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use estimate_engine::calculation::compute_detailed_totals;
use estimate_engine::estimate::DetailedEstimate;
use estimate_engine::models::{EstimateItem, LaborEntry, ProjectSettings, RateTable};

#[derive(Debug, Clone)]
struct ItemInput {
    hours: Decimal,
    multiplier: Decimal,
    quantity: Decimal,
    unit_cost: Decimal,
    equipment: Decimal,
    subcontractor: Decimal,
    misc: Decimal,
    is_change_order: bool,
}

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_signed_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_huge_amount() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=4)
        .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale))
}

fn arb_percent() -> impl Strategy<Value = Decimal> {
    (0i64..=40).prop_map(Decimal::from)
}

fn arb_item() -> impl Strategy<Value = ItemInput> {
    (
        (0i64..4_000).prop_map(|quarters| Decimal::new(quarters * 25, 2)),
        prop_oneof![Just(Decimal::ONE), Just(Decimal::new(15, 1)), Just(Decimal::from(2))],
        (0i64..500).prop_map(Decimal::from),
        arb_amount(),
        arb_amount(),
        arb_amount(),
        arb_amount(),
        any::<bool>(),
    )
        .prop_map(
            |(hours, multiplier, quantity, unit_cost, equipment, subcontractor, misc, is_change_order)| {
                ItemInput {
                    hours,
                    multiplier,
                    quantity,
                    unit_cost,
                    equipment,
                    subcontractor,
                    misc,
                    is_change_order,
                }
            },
        )
}

fn arb_settings() -> impl Strategy<Value = ProjectSettings> {
    (
        arb_percent(),
        arb_percent(),
        arb_percent(),
        arb_percent(),
        (0i64..=1_000).prop_map(|bp| Decimal::new(bp, 2)),
    )
        .prop_map(|(overhead, material_markup, miscellaneous, profit_margin, sales_tax)| {
            let mut settings = create_settings();
            settings.overhead = overhead;
            settings.material_markup = material_markup;
            settings.miscellaneous = miscellaneous;
            settings.profit_margin = profit_margin;
            settings.sales_tax = sales_tax;
            settings
        })
}

fn create_settings() -> ProjectSettings {
    let mut rates = RateTable::default();
    rates.insert("General", "Journeyman", Decimal::from(75));
    rates.insert("General", "Apprentice", Decimal::from(50));
    ProjectSettings::new(rates, vec!["General".to_string()])
}

fn build_item(input: &ItemInput) -> EstimateItem {
    let mut item = EstimateItem::new("Task", "General", "Journeyman");
    item.labor_entries = vec![LaborEntry::new("General", "Journeyman")
        .with_hours(input.hours)
        .with_multiplier(input.multiplier)];
    item.material_quantity = input.quantity;
    item.material_unit_cost = input.unit_cost;
    item.equipment_rental_cost = input.equipment;
    item.subcontractor_cost_line_item = input.subcontractor;
    item.misc_line_item = input.misc;
    item.is_change_order = input.is_change_order;
    item
}

fn tolerance() -> Decimal {
    Decimal::new(1, 8)
}

proptest! {
    #[test]
    fn prop_direct_cost_splits_between_original_and_change_order(
        inputs in prop::collection::vec(arb_item(), 0..12),
        settings in arb_settings(),
    ) {
        let items: Vec<EstimateItem> = inputs.iter().map(build_item).collect();
        let totals = compute_detailed_totals(&items, &settings);

        prop_assert_eq!(
            totals.original_direct_cost + totals.change_order_direct_cost,
            totals.direct_costs.total
        );
        prop_assert_eq!(
            totals.grand_total_before_adjustments,
            totals.original_contract_total + totals.change_order_total
        );
    }

    #[test]
    fn prop_slices_sum_to_combined_total(
        inputs in prop::collection::vec(arb_item(), 1..12),
        settings in arb_settings(),
    ) {
        let items: Vec<EstimateItem> = inputs.iter().map(build_item).collect();
        let totals = compute_detailed_totals(&items, &settings);

        let split = totals.original_contract_total + totals.change_order_total;
        prop_assert!((split - totals.combined.total).abs() <= tolerance());
    }

    #[test]
    fn prop_totals_are_idempotent(
        inputs in prop::collection::vec(arb_item(), 0..12),
        settings in arb_settings(),
    ) {
        let items: Vec<EstimateItem> = inputs.iter().map(build_item).collect();
        let first = compute_detailed_totals(&items, &settings);
        let second = compute_detailed_totals(&items, &settings);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_sales_tax_depends_on_materials_only(
        mut input in arb_item(),
        settings in arb_settings(),
        equipment in arb_amount(),
        subcontractor in arb_amount(),
        misc in arb_amount(),
        hours in (0i64..400).prop_map(Decimal::from),
    ) {
        input.is_change_order = false;
        let before = compute_detailed_totals(&[build_item(&input)], &settings);

        input.equipment = equipment;
        input.subcontractor = subcontractor;
        input.misc = misc;
        input.hours = hours;
        let after = compute_detailed_totals(&[build_item(&input)], &settings);

        prop_assert_eq!(before.sales_tax_amount, after.sales_tax_amount);

        let materials = input.quantity * input.unit_cost;
        if after.direct_costs.total > Decimal::ZERO {
            let markup = settings.material_markup / Decimal::ONE_HUNDRED;
            let expected = (materials + materials * markup) * (settings.sales_tax / Decimal::ONE_HUNDRED);
            prop_assert_eq!(after.sales_tax_amount, expected);
        }
    }

    #[test]
    fn prop_empty_slice_contributes_nothing(
        inputs in prop::collection::vec(arb_item(), 0..8),
        settings in arb_settings(),
    ) {
        let items: Vec<EstimateItem> = inputs
            .iter()
            .map(|input| {
                let mut item = build_item(input);
                item.is_change_order = true;
                item
            })
            .collect();
        let totals = compute_detailed_totals(&items, &settings);

        prop_assert_eq!(totals.original_contract.cost_ratio, Decimal::ZERO);
        prop_assert_eq!(totals.original_contract_total, Decimal::ZERO);
        prop_assert_eq!(totals.original_contract.sales_tax_amount, Decimal::ZERO);
        prop_assert_eq!(totals.grand_total_before_adjustments, totals.change_order_total);
    }

    #[test]
    fn prop_sanitized_estimate_is_never_negative(
        hours in arb_signed_amount(),
        quantity in arb_signed_amount(),
        equipment in arb_signed_amount(),
        discount in (-50i64..=100).prop_map(Decimal::from),
    ) {
        let mut settings = create_settings();
        settings.discount = discount;
        let mut estimate = DetailedEstimate::new(settings);
        estimate.items[0].labor_entries[0].hours = hours;
        estimate.items[0].material_quantity = quantity;
        estimate.items[0].material_unit_cost = Decimal::from(10);
        estimate.items[0].equipment_rental_cost = equipment;

        estimate.sanitize();
        let totals = estimate.totals();

        prop_assert!(totals.grand_total >= Decimal::ZERO);
        prop_assert!(totals.direct_costs.total >= Decimal::ZERO);
    }

    #[test]
    fn prop_huge_amounts_never_overflow(
        quantity in arb_huge_amount(),
        unit_cost in arb_huge_amount(),
        hours in arb_huge_amount(),
        equipment in arb_huge_amount(),
        settings in arb_settings(),
    ) {
        let mut item = build_item(&ItemInput {
            hours,
            multiplier: Decimal::from(2),
            quantity,
            unit_cost,
            equipment,
            subcontractor: equipment,
            misc: equipment,
            is_change_order: false,
        });
        let change_order = {
            let mut copy = item.clone();
            copy.is_change_order = true;
            copy
        };
        item.misc_line_item = Decimal::MAX;

        let totals = compute_detailed_totals(&[item.clone(), change_order.clone()], &settings);
        prop_assert!(totals.grand_total >= Decimal::ZERO);

        let mut estimate = DetailedEstimate::new(settings);
        estimate.items = vec![item, change_order];
        estimate.sanitize();
        let totals = estimate.totals();
        prop_assert!(totals.grand_total >= Decimal::ZERO);
        prop_assert!(totals.direct_costs.total < Decimal::MAX);
    }
}
