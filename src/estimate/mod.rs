//! Estimate workbooks.
//!
//! An estimate owns its items and enforces the item lifecycle rules: fresh
//! ids on creation and duplication, one field per edit with numeric input
//! clamped at zero, and at least one labor entry per detailed item.

mod detailed;
mod quick_quote;

use serde::{Deserialize, Serialize};

pub use detailed::{DetailedEstimate, ItemField, LaborField};
pub use quick_quote::{QuickQuoteEstimate, QuickQuoteField};

use crate::calculation::compute_totals;
use crate::models::{AuditWarning, Breakdown, ProjectSettings};

/// An estimate in either mode.
///
/// Serialized with a `mode` tag of `detailed` or `quick_quote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Estimate {
    /// A detailed, labor-entry based estimate.
    Detailed(DetailedEstimate),
    /// A flat-amount quick quote.
    QuickQuote(QuickQuoteEstimate),
}

impl Estimate {
    /// Clamps negative numeric input to zero.
    pub fn sanitize(&mut self) {
        match self {
            Estimate::Detailed(detailed) => detailed.sanitize(),
            Estimate::QuickQuote(quote) => quote.sanitize(),
        }
    }

    /// Repairs dangling trade/role references. Quick quotes have none.
    pub fn heal(&mut self) -> Vec<AuditWarning> {
        match self {
            Estimate::Detailed(detailed) => detailed.heal(),
            Estimate::QuickQuote(_) => Vec::new(),
        }
    }

    /// Computes the breakdown for this estimate.
    pub fn totals(&self) -> Breakdown {
        compute_totals(self)
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        match self {
            Estimate::Detailed(detailed) => detailed.items.len(),
            Estimate::QuickQuote(quote) => quote.items.len(),
        }
    }

    /// Returns the detailed settings, if any.
    pub fn project_settings(&self) -> Option<&ProjectSettings> {
        match self {
            Estimate::Detailed(detailed) => Some(&detailed.settings),
            Estimate::QuickQuote(_) => None,
        }
    }
}
