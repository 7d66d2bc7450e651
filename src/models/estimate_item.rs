//! Estimate item model.
//!
//! An [`EstimateItem`] is one task on a detailed estimate: one or more labor
//! entries plus material, equipment, subcontractor and miscellaneous costs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LaborEntry, generate_id};

/// A task line item on a detailed estimate.
///
/// Every item owns at least one [`LaborEntry`]; the estimate workbook
/// refuses to remove the last one, and healing restores a default entry on
/// items deserialized without any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateItem {
    /// Unique identifier for the item.
    pub id: String,
    /// Short task name shown on quotes.
    #[serde(default)]
    pub task_name: String,
    /// Longer task description.
    #[serde(default)]
    pub description: String,
    /// Labor performed on this task.
    #[serde(default)]
    pub labor_entries: Vec<LaborEntry>,
    /// Quantity of material units.
    #[serde(default)]
    pub material_quantity: Decimal,
    /// Cost per material unit.
    #[serde(default)]
    pub material_unit_cost: Decimal,
    /// Equipment and rental cost.
    #[serde(default)]
    pub equipment_rental_cost: Decimal,
    /// Subcontractor cost.
    #[serde(default)]
    pub subcontractor_cost_line_item: Decimal,
    /// Miscellaneous direct cost.
    #[serde(default)]
    pub misc_line_item: Decimal,
    /// Whether this item is a change order rather than original scope.
    #[serde(default)]
    pub is_change_order: bool,
}

impl EstimateItem {
    /// Creates an item with a single zero-hour labor entry.
    ///
    /// # Example
    ///
    /// ```
    /// use estimate_engine::models::EstimateItem;
    ///
    /// let item = EstimateItem::new("New Task", "General", "Journeyman");
    /// assert_eq!(item.labor_entries.len(), 1);
    /// assert_eq!(item.labor_entries[0].trade, "General");
    /// assert!(!item.is_change_order);
    /// ```
    pub fn new(task_name: impl Into<String>, trade: &str, role: &str) -> Self {
        Self {
            id: generate_id("item"),
            task_name: task_name.into(),
            description: String::new(),
            labor_entries: vec![LaborEntry::new(trade, role)],
            material_quantity: Decimal::ZERO,
            material_unit_cost: Decimal::ZERO,
            equipment_rental_cost: Decimal::ZERO,
            subcontractor_cost_line_item: Decimal::ZERO,
            misc_line_item: Decimal::ZERO,
            is_change_order: false,
        }
    }

    /// Returns an independent copy with fresh ids for the item and every
    /// labor entry.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = generate_id("item");
        for entry in &mut copy.labor_entries {
            entry.id = generate_id("lab");
        }
        copy
    }

    /// Finds a labor entry by id.
    pub fn labor_entry(&self, labor_id: &str) -> Option<&LaborEntry> {
        self.labor_entries.iter().find(|le| le.id == labor_id)
    }

    /// Finds a labor entry by id for mutation.
    pub fn labor_entry_mut(&mut self, labor_id: &str) -> Option<&mut LaborEntry> {
        self.labor_entries.iter_mut().find(|le| le.id == labor_id)
    }
}
