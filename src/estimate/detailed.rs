//! The detailed estimate workbook.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculation::{
    bounded, compute_detailed_totals, default_role, default_trade, heal_items,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditWarning, EstimateItem, LaborEntry, ProjectSettings, TotalsBreakdown};

const FIRST_TASK_NAME: &str = "First Task";
const FIRST_TASK_DESCRIPTION: &str = "Detail your first project task here.";
const NEW_TASK_NAME: &str = "New Task";
const NEW_TASK_DESCRIPTION: &str = "Add a description for your new task.";

/// A single-field edit to an estimate item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ItemField {
    /// Task name.
    TaskName(String),
    /// Task description.
    Description(String),
    /// Material quantity.
    MaterialQuantity(Decimal),
    /// Material unit cost.
    MaterialUnitCost(Decimal),
    /// Equipment and rental cost.
    EquipmentRentalCost(Decimal),
    /// Subcontractor cost.
    SubcontractorCostLineItem(Decimal),
    /// Miscellaneous line item cost.
    MiscLineItem(Decimal),
    /// Change-order flag.
    IsChangeOrder(bool),
}

/// A single-field edit to a labor entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum LaborField {
    /// Trade; resets the role to the trade's first role.
    Trade(String),
    /// Skill role.
    Role(String),
    /// Hours.
    Hours(Decimal),
    /// Overtime/double-time multiplier.
    OtDtMultiplier(Decimal),
}

/// Project settings plus the ordered list of estimate items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedEstimate {
    /// Project-wide settings and rates.
    pub settings: ProjectSettings,
    /// Line items in display order.
    #[serde(default)]
    pub items: Vec<EstimateItem>,
}

impl DetailedEstimate {
    /// Creates an estimate with one starter task using the default
    /// trade and role.
    pub fn new(settings: ProjectSettings) -> Self {
        let mut estimate = Self {
            settings,
            items: Vec::new(),
        };
        let mut first = estimate.new_item(None);
        first.task_name = FIRST_TASK_NAME.to_string();
        first.description = FIRST_TASK_DESCRIPTION.to_string();
        estimate.items.push(first);
        estimate
    }

    fn new_item(&self, trade: Option<&str>) -> EstimateItem {
        let trade = default_trade(&self.settings, trade);
        let role = default_role(&self.settings, trade);
        EstimateItem::new(NEW_TASK_NAME, trade, role)
    }

    /// Appends a new task, returning its id.
    ///
    /// The labor entry uses `trade` when it is active, otherwise the first
    /// active trade.
    pub fn add_item(&mut self, trade: Option<&str>) -> String {
        let mut item = self.new_item(trade);
        item.description = NEW_TASK_DESCRIPTION.to_string();
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    /// Removes an item.
    pub fn delete_item(&mut self, id: &str) -> EngineResult<EstimateItem> {
        let index = self.index_of(id)?;
        Ok(self.items.remove(index))
    }

    /// Inserts an independent copy directly after the original, returning
    /// the copy's id.
    pub fn duplicate_item(&mut self, id: &str) -> EngineResult<String> {
        let index = self.index_of(id)?;
        let copy = self.items[index].duplicate();
        let copy_id = copy.id.clone();
        self.items.insert(index + 1, copy);
        Ok(copy_id)
    }

    /// Sets one field of an item. Numeric values are clamped into
    /// `0..=MAX_INPUT`.
    pub fn update_item(&mut self, id: &str, field: ItemField) -> EngineResult<()> {
        let item = self.item_mut(id)?;
        match field {
            ItemField::TaskName(value) => item.task_name = value,
            ItemField::Description(value) => item.description = value,
            ItemField::MaterialQuantity(value) => item.material_quantity = bounded(value),
            ItemField::MaterialUnitCost(value) => item.material_unit_cost = bounded(value),
            ItemField::EquipmentRentalCost(value) => {
                item.equipment_rental_cost = bounded(value)
            }
            ItemField::SubcontractorCostLineItem(value) => {
                item.subcontractor_cost_line_item = bounded(value)
            }
            ItemField::MiscLineItem(value) => item.misc_line_item = bounded(value),
            ItemField::IsChangeOrder(value) => item.is_change_order = value,
        }
        Ok(())
    }

    /// Sets one field of a labor entry.
    ///
    /// Changing the trade resets the role to the first role of the new
    /// trade.
    pub fn update_labor_entry(
        &mut self,
        item_id: &str,
        labor_id: &str,
        field: LaborField,
    ) -> EngineResult<()> {
        let first_role_for = |trade: &str| default_role(&self.settings, trade).to_string();
        let new_role = match &field {
            LaborField::Trade(trade) => Some(first_role_for(trade)),
            _ => None,
        };

        let entry = self.labor_entry_mut(item_id, labor_id)?;
        match field {
            LaborField::Trade(trade) => {
                entry.trade = trade;
                if let Some(role) = new_role {
                    entry.role = role;
                }
            }
            LaborField::Role(role) => entry.role = role,
            LaborField::Hours(hours) => entry.hours = bounded(hours),
            LaborField::OtDtMultiplier(multiplier) => {
                entry.ot_dt_multiplier = bounded(multiplier)
            }
        }
        Ok(())
    }

    /// Adds a zero-hour labor entry to an item, returning its id.
    pub fn add_labor_entry(&mut self, item_id: &str, trade: Option<&str>) -> EngineResult<String> {
        let trade = default_trade(&self.settings, trade).to_string();
        let role = default_role(&self.settings, &trade).to_string();
        let entry = LaborEntry::new(trade, role);
        let id = entry.id.clone();
        self.item_mut(item_id)?.labor_entries.push(entry);
        Ok(id)
    }

    /// Removes a labor entry.
    ///
    /// An item always keeps at least one entry; removing the last one fails
    /// with [`EngineError::LastLaborEntry`] and leaves the item unchanged.
    pub fn delete_labor_entry(&mut self, item_id: &str, labor_id: &str) -> EngineResult<LaborEntry> {
        let item = self.item_mut(item_id)?;
        let Some(index) = item.labor_entries.iter().position(|le| le.id == labor_id) else {
            return Err(EngineError::LaborEntryNotFound {
                item_id: item_id.to_string(),
                labor_id: labor_id.to_string(),
            });
        };
        if item.labor_entries.len() <= 1 {
            warn!(item_id = %item_id, "Rejected deleting the last labor entry");
            return Err(EngineError::LastLaborEntry {
                item_id: item_id.to_string(),
            });
        }
        Ok(item.labor_entries.remove(index))
    }

    /// Repairs dangling trade/role references in place and gives every
    /// item without labor a default entry.
    pub fn heal(&mut self) -> Vec<AuditWarning> {
        heal_items(&self.settings, &mut self.items)
    }

    /// Clamps every number into `0..=MAX_INPUT`: item quantities, costs,
    /// hours and multipliers, labor rates and setting percentages.
    ///
    /// [`MAX_INPUT`]: crate::calculation::MAX_INPUT
    pub fn sanitize(&mut self) {
        let settings = &mut self.settings;
        settings.all_trade_labor_rates.map_rates(bounded);
        for value in [
            &mut settings.overhead,
            &mut settings.material_markup,
            &mut settings.profit_margin,
            &mut settings.miscellaneous,
            &mut settings.sales_tax,
            &mut settings.discount,
            &mut settings.additional_considerations_value,
        ] {
            *value = bounded(*value);
        }

        for item in &mut self.items {
            item.material_quantity = bounded(item.material_quantity);
            item.material_unit_cost = bounded(item.material_unit_cost);
            item.equipment_rental_cost = bounded(item.equipment_rental_cost);
            item.subcontractor_cost_line_item = bounded(item.subcontractor_cost_line_item);
            item.misc_line_item = bounded(item.misc_line_item);
            for entry in &mut item.labor_entries {
                entry.hours = bounded(entry.hours);
                entry.ot_dt_multiplier = bounded(entry.ot_dt_multiplier);
            }
        }
    }

    /// Computes the detailed totals for the current items.
    pub fn totals(&self) -> TotalsBreakdown {
        compute_detailed_totals(&self.items, &self.settings)
    }

    /// Finds an item by id.
    pub fn item(&self, id: &str) -> Option<&EstimateItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn index_of(&self, id: &str) -> EngineResult<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| EngineError::ItemNotFound { id: id.to_string() })
    }

    fn item_mut(&mut self, id: &str) -> EngineResult<&mut EstimateItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| EngineError::ItemNotFound { id: id.to_string() })
    }

    fn labor_entry_mut(&mut self, item_id: &str, labor_id: &str) -> EngineResult<&mut LaborEntry> {
        self.item_mut(item_id)?
            .labor_entry_mut(labor_id)
            .ok_or_else(|| EngineError::LaborEntryNotFound {
                item_id: item_id.to_string(),
                labor_id: labor_id.to_string(),
            })
    }
}
