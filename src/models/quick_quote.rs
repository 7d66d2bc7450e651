//! Quick-quote models.
//!
//! Quick quotes are a simplified estimate shape: flat amounts per cost
//! category, no labor entries and no change orders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::generate_id;

/// Hourly rate used to infer labor hours when none is configured.
pub const DEFAULT_JOURNEYMAN_RATE: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

fn default_hourly_rate() -> Decimal {
    DEFAULT_JOURNEYMAN_RATE
}

/// The cost category of a quick-quote item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickQuoteItemType {
    /// Labor cost.
    Labor,
    /// Material cost (subject to material markup).
    Material,
    /// Equipment cost.
    Equipment,
    /// Anything else.
    Other,
}

impl QuickQuoteItemType {
    /// Returns the amount a newly added item of this type starts with.
    pub fn default_amount(self) -> Decimal {
        match self {
            QuickQuoteItemType::Labor => Decimal::new(600, 0),
            QuickQuoteItemType::Material => Decimal::new(250, 0),
            QuickQuoteItemType::Equipment => Decimal::new(150, 0),
            QuickQuoteItemType::Other => Decimal::new(100, 0),
        }
    }

    /// Returns the capitalized display label.
    pub fn label(self) -> &'static str {
        match self {
            QuickQuoteItemType::Labor => "Labor",
            QuickQuoteItemType::Material => "Material",
            QuickQuoteItemType::Equipment => "Equipment",
            QuickQuoteItemType::Other => "Other",
        }
    }
}

/// A single flat-amount quick-quote line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickQuoteItem {
    /// Unique identifier for the item.
    pub id: String,
    /// The cost category.
    #[serde(rename = "type")]
    pub item_type: QuickQuoteItemType,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// The flat amount for this line.
    #[serde(default)]
    pub total_amount: Decimal,
}

impl QuickQuoteItem {
    /// Creates an item with the default amount and description for its type.
    ///
    /// # Example
    ///
    /// ```
    /// use estimate_engine::models::{QuickQuoteItem, QuickQuoteItemType};
    /// use rust_decimal::Decimal;
    ///
    /// let item = QuickQuoteItem::new(QuickQuoteItemType::Material);
    /// assert_eq!(item.description, "New Material Item");
    /// assert_eq!(item.total_amount, Decimal::new(250, 0));
    /// ```
    pub fn new(item_type: QuickQuoteItemType) -> Self {
        Self {
            id: generate_id("qq"),
            item_type,
            description: format!("New {} Item", item_type.label()),
            total_amount: item_type.default_amount(),
        }
    }
}

/// Markup settings for a quick quote.
///
/// There is no sales-tax, discount or additional-consideration stage in
/// this mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickQuoteSettings {
    /// Overhead percent.
    #[serde(default)]
    pub overhead: Decimal,
    /// Material markup percent.
    #[serde(default)]
    pub material_markup: Decimal,
    /// Profit margin percent.
    #[serde(default)]
    pub profit_margin: Decimal,
    /// Additional adder (contingency) percent.
    #[serde(default)]
    pub miscellaneous: Decimal,
    /// Rate used to turn labor dollars into estimated hours.
    #[serde(default = "default_hourly_rate")]
    pub default_hourly_rate: Decimal,
}

impl Default for QuickQuoteSettings {
    fn default() -> Self {
        Self {
            overhead: Decimal::ZERO,
            material_markup: Decimal::ZERO,
            profit_margin: Decimal::ZERO,
            miscellaneous: Decimal::ZERO,
            default_hourly_rate: DEFAULT_JOURNEYMAN_RATE,
        }
    }
}
