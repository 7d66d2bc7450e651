//! Unified engine entry point over both estimate modes.

use crate::estimate::Estimate;
use crate::models::{AuditStep, Breakdown};

use super::audit_trace::{explain_detailed, explain_quick_quote};
use super::detailed_totals::compute_detailed_totals;
use super::quick_quote_totals::compute_quick_quote_totals;

/// Computes the breakdown for either estimate mode.
///
/// # Examples
///
/// ```
/// use estimate_engine::calculation::compute_totals;
/// use estimate_engine::estimate::{Estimate, QuickQuoteEstimate};
/// use estimate_engine::models::{Breakdown, QuickQuoteItemType};
/// use rust_decimal::Decimal;
///
/// let mut quote = QuickQuoteEstimate::default();
/// quote.add_item(QuickQuoteItemType::Equipment);
///
/// let breakdown = compute_totals(&Estimate::QuickQuote(quote));
/// assert!(matches!(breakdown, Breakdown::QuickQuote(_)));
/// assert_eq!(breakdown.grand_total(), Decimal::new(150, 0));
/// ```
pub fn compute_totals(estimate: &Estimate) -> Breakdown {
    match estimate {
        Estimate::Detailed(detailed) => {
            Breakdown::Detailed(compute_detailed_totals(&detailed.items, &detailed.settings))
        }
        Estimate::QuickQuote(quote) => {
            Breakdown::QuickQuote(compute_quick_quote_totals(&quote.items, &quote.settings))
        }
    }
}

/// Computes the breakdown together with the steps explaining it.
pub fn compute_totals_with_audit(estimate: &Estimate) -> (Breakdown, Vec<AuditStep>) {
    match estimate {
        Estimate::Detailed(detailed) => {
            let totals = compute_detailed_totals(&detailed.items, &detailed.settings);
            let steps = explain_detailed(&totals, &detailed.settings);
            (Breakdown::Detailed(totals), steps)
        }
        Estimate::QuickQuote(quote) => {
            let totals = compute_quick_quote_totals(&quote.items, &quote.settings);
            let steps = explain_quick_quote(&totals, &quote.settings);
            (Breakdown::QuickQuote(totals), steps)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{DetailedEstimate, QuickQuoteEstimate};
    use crate::models::{ProjectSettings, RateTable};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_detailed() -> DetailedEstimate {
        let mut rates = RateTable::default();
        rates.insert("General", "Journeyman", dec("75"));
        let mut estimate = DetailedEstimate::new(ProjectSettings::new(rates, vec!["General".to_string()]));
        estimate.items[0].labor_entries[0].hours = dec("4");
        estimate
    }

    #[test]
    fn test_dispatches_detailed_mode() {
        let estimate = Estimate::Detailed(create_detailed());
        match compute_totals(&estimate) {
            Breakdown::Detailed(totals) => assert_eq!(totals.grand_total, dec("300")),
            other => panic!("Expected detailed breakdown, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatches_quick_quote_mode() {
        let estimate = Estimate::QuickQuote(QuickQuoteEstimate::default());
        assert!(matches!(compute_totals(&estimate), Breakdown::QuickQuote(_)));
    }

    #[test]
    fn test_audit_variant_returns_same_breakdown() {
        let estimate = Estimate::Detailed(create_detailed());
        let (breakdown, steps) = compute_totals_with_audit(&estimate);
        assert_eq!(breakdown, compute_totals(&estimate));
        assert_eq!(steps[0].rule_id, "direct_costs");
    }
}
