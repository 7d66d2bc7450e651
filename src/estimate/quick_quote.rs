//! The quick-quote workbook.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{bounded, compute_quick_quote_totals};
use crate::error::{EngineError, EngineResult};
use crate::models::{QuickQuoteBreakdown, QuickQuoteItem, QuickQuoteItemType, QuickQuoteSettings};

/// A single-field edit to a quick-quote item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum QuickQuoteField {
    /// Free-text description.
    Description(String),
    /// Flat amount.
    TotalAmount(Decimal),
}

/// Quick-quote settings plus flat-amount items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickQuoteEstimate {
    /// Markup settings.
    #[serde(default)]
    pub settings: QuickQuoteSettings,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<QuickQuoteItem>,
}

impl QuickQuoteEstimate {
    /// Creates an empty quick quote.
    pub fn new(settings: QuickQuoteSettings) -> Self {
        Self {
            settings,
            items: Vec::new(),
        }
    }

    /// Appends an item with the default amount for its type, returning its id.
    pub fn add_item(&mut self, item_type: QuickQuoteItemType) -> String {
        let item = QuickQuoteItem::new(item_type);
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    /// Removes an item.
    pub fn delete_item(&mut self, id: &str) -> EngineResult<QuickQuoteItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| EngineError::ItemNotFound { id: id.to_string() })?;
        Ok(self.items.remove(index))
    }

    /// Sets one field of an item. Amounts are clamped into `0..=MAX_INPUT`.
    pub fn update_item(&mut self, id: &str, field: QuickQuoteField) -> EngineResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| EngineError::ItemNotFound { id: id.to_string() })?;
        match field {
            QuickQuoteField::Description(value) => item.description = value,
            QuickQuoteField::TotalAmount(value) => item.total_amount = bounded(value),
        }
        Ok(())
    }

    /// Clamps item amounts, percentages and the default hourly rate into
    /// `0..=MAX_INPUT`.
    ///
    /// [`MAX_INPUT`]: crate::calculation::MAX_INPUT
    pub fn sanitize(&mut self) {
        let settings = &mut self.settings;
        for value in [
            &mut settings.overhead,
            &mut settings.material_markup,
            &mut settings.profit_margin,
            &mut settings.miscellaneous,
            &mut settings.default_hourly_rate,
        ] {
            *value = bounded(*value);
        }
        for item in &mut self.items {
            item.total_amount = bounded(item.total_amount);
        }
    }

    /// Computes the quick-quote totals.
    pub fn totals(&self) -> QuickQuoteBreakdown {
        compute_quick_quote_totals(&self.items, &self.settings)
    }
}
