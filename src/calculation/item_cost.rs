//! Per-item direct cost calculation.
//!
//! These functions are pure: the same item and settings always produce the
//! same cost. Labor rates are resolved through the self-healing policy so a
//! dangling trade/role reference prices exactly as the healed entry would.
//! Arithmetic saturates at `Decimal::MAX` instead of overflowing.

use rust_decimal::Decimal;

use crate::models::{EstimateItem, LaborEntry, ProjectSettings};

use super::rate_resolution::resolve_entry;
use super::sanitize::non_negative;

/// Returns the cost of one labor entry.
///
/// `hours * rate(trade, role) * ot_dt_multiplier`
pub fn labor_entry_cost(settings: &ProjectSettings, entry: &LaborEntry) -> Decimal {
    labor_entry_cost_at(resolve_entry(settings, entry).hourly_rate, entry)
}

/// Returns the cost of one labor entry at an already resolved rate.
///
/// Negative rates price as zero.
pub fn labor_entry_cost_at(hourly_rate: Decimal, entry: &LaborEntry) -> Decimal {
    let effective_rate = non_negative(hourly_rate).saturating_mul(entry.ot_dt_multiplier);
    entry.hours.saturating_mul(effective_rate)
}

/// Returns the total labor cost of an item.
pub fn cost_labor(settings: &ProjectSettings, item: &EstimateItem) -> Decimal {
    item.labor_entries
        .iter()
        .map(|entry| labor_entry_cost(settings, entry))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Returns the raw material cost of an item.
pub fn cost_materials(item: &EstimateItem) -> Decimal {
    item.material_quantity.saturating_mul(item.material_unit_cost)
}

/// Returns equipment + subcontractor + miscellaneous cost of an item.
pub fn cost_other(item: &EstimateItem) -> Decimal {
    item.equipment_rental_cost
        .saturating_add(item.subcontractor_cost_line_item)
        .saturating_add(item.misc_line_item)
}

/// Returns the direct cost of an item before any markup.
///
/// # Examples
///
/// ```
/// use estimate_engine::calculation::direct_cost;
/// use estimate_engine::models::{EstimateItem, ProjectSettings, RateTable};
/// use rust_decimal::Decimal;
///
/// let mut rates = RateTable::default();
/// rates.insert("General", "Journeyman", Decimal::new(75, 0));
/// let settings = ProjectSettings::new(rates, vec!["General".to_string()]);
///
/// let mut item = EstimateItem::new("Demo", "General", "Journeyman");
/// item.labor_entries[0].hours = Decimal::new(10, 0);
/// item.material_quantity = Decimal::new(2, 0);
/// item.material_unit_cost = Decimal::new(50, 0);
/// item.equipment_rental_cost = Decimal::new(100, 0);
///
/// assert_eq!(direct_cost(&settings, &item), Decimal::new(950, 0));
/// ```
pub fn direct_cost(settings: &ProjectSettings, item: &EstimateItem) -> Decimal {
    cost_labor(settings, item)
        .saturating_add(cost_materials(item))
        .saturating_add(cost_other(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RateTable;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_settings() -> ProjectSettings {
        let mut rates = RateTable::default();
        rates.insert("General", "Journeyman", dec("75"));
        rates.insert("General", "Apprentice", dec("50"));
        rates.insert("Electrical", "Journeyman", dec("80"));
        ProjectSettings::new(rates, vec!["General".to_string(), "Electrical".to_string()])
    }

    #[test]
    fn test_labor_entry_cost_applies_multiplier() {
        let settings = create_test_settings();
        let entry = LaborEntry::new("Electrical", "Journeyman")
            .with_hours(dec("4"))
            .with_multiplier(dec("1.5"));
        // 4h * $80 * 1.5
        assert_eq!(labor_entry_cost(&settings, &entry), dec("480"));
    }

    #[test]
    fn test_double_time() {
        let settings = create_test_settings();
        let entry = LaborEntry::new("General", "Apprentice")
            .with_hours(dec("3"))
            .with_multiplier(dec("2.0"));
        assert_eq!(labor_entry_cost(&settings, &entry), dec("300"));
    }

    #[test]
    fn test_cost_labor_sums_entries() {
        let settings = create_test_settings();
        let mut item = EstimateItem::new("Rough-in", "General", "Journeyman");
        item.labor_entries[0].hours = dec("10");
        item.labor_entries
            .push(LaborEntry::new("Electrical", "Journeyman").with_hours(dec("2")));
        // 750 + 160
        assert_eq!(cost_labor(&settings, &item), dec("910"));
    }

    #[test]
    fn test_dangling_role_prices_at_healed_rate() {
        let settings = create_test_settings();
        let entry = LaborEntry::new("General", "Superintendent").with_hours(dec("2"));
        // Falls back to General's first role, Journeyman @ $75.
        assert_eq!(labor_entry_cost(&settings, &entry), dec("150"));
    }

    #[test]
    fn test_cost_materials_and_other() {
        let mut item = EstimateItem::new("Deck", "General", "Journeyman");
        item.material_quantity = dec("3");
        item.material_unit_cost = dec("19.99");
        item.equipment_rental_cost = dec("100");
        item.subcontractor_cost_line_item = dec("250");
        item.misc_line_item = dec("12.50");

        assert_eq!(cost_materials(&item), dec("59.97"));
        assert_eq!(cost_other(&item), dec("362.50"));
    }

    #[test]
    fn test_negative_rate_prices_as_zero() {
        let entry = LaborEntry::new("General", "Journeyman").with_hours(dec("10"));
        assert_eq!(labor_entry_cost_at(dec("-75"), &entry), Decimal::ZERO);
    }

    #[test]
    fn test_maximal_amounts_saturate() {
        let settings = create_test_settings();
        let mut item = EstimateItem::new("Bulk", "General", "Journeyman");
        item.labor_entries[0].hours = Decimal::MAX;
        item.material_quantity = Decimal::MAX;
        item.material_unit_cost = dec("2");
        item.equipment_rental_cost = Decimal::MAX;
        item.misc_line_item = Decimal::MAX;

        assert_eq!(cost_materials(&item), Decimal::MAX);
        assert_eq!(cost_other(&item), Decimal::MAX);
        assert_eq!(direct_cost(&settings, &item), Decimal::MAX);
    }

    #[test]
    fn test_direct_cost_is_idempotent() {
        let settings = create_test_settings();
        let mut item = EstimateItem::new("Deck", "General", "Journeyman");
        item.labor_entries[0].hours = dec("7.25");
        item.material_quantity = dec("4");
        item.material_unit_cost = dec("33.10");

        let first = direct_cost(&settings, &item);
        let second = direct_cost(&settings, &item);
        assert_eq!(first, second);
        assert_eq!(first, dec("676.15"));
    }
}
