//! Labor rate resolution and the self-healing fallback policy.
//!
//! Labor entries can reference a trade that is no longer active, or a role
//! the trade does not define. Such references are repaired, never
//! rejected:
//!
//! 1. A trade not in `active_trades` becomes `active_trades[0]`, or
//!    [`DEFAULT_TRADE`] when no trade is active.
//! 2. A role the (possibly substituted) trade does not define becomes the
//!    trade's first role, or [`DEFAULT_ROLE`] when the trade has none.
//! 3. The rate is then looked up, yielding zero when still missing.
//!
//! [`resolve_or_default`] is the only implementation of this policy. The
//! totals engine, the CSV export and in-place healing all go through it, so
//! they can never disagree about which rate was used.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{AuditWarning, EstimateItem, LaborEntry, ProjectSettings};

/// Trade used when no trade is active.
pub const DEFAULT_TRADE: &str = "General";

/// Role used when a trade defines no roles.
pub const DEFAULT_ROLE: &str = "Journeyman";

/// A labor reference after applying the fallback policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLabor {
    /// The trade actually used.
    pub trade: String,
    /// The role actually used.
    pub role: String,
    /// The hourly rate for the resolved trade/role (before any multiplier).
    pub hourly_rate: Decimal,
    /// True if the requested trade was replaced.
    pub trade_substituted: bool,
    /// True if the requested role was replaced.
    pub role_substituted: bool,
}

impl ResolvedLabor {
    /// Returns true if either the trade or the role was replaced.
    pub fn was_healed(&self) -> bool {
        self.trade_substituted || self.role_substituted
    }
}

/// Returns the hourly rate for a trade/role, or zero if either is missing.
///
/// No healing is applied here.
pub fn resolve_rate(settings: &ProjectSettings, trade: &str, role: &str) -> Decimal {
    settings.all_trade_labor_rates.resolve_rate(trade, role)
}

/// Returns the trade new labor entries default to.
///
/// A preferred trade is used if it is active; otherwise the first active
/// trade, otherwise [`DEFAULT_TRADE`].
pub fn default_trade<'a>(settings: &'a ProjectSettings, preferred: Option<&'a str>) -> &'a str {
    match preferred {
        Some(trade) if settings.active_trades.iter().any(|t| t == trade) => trade,
        _ => settings
            .active_trades
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_TRADE),
    }
}

/// Returns the first role of a trade, or [`DEFAULT_ROLE`].
pub fn default_role<'a>(settings: &'a ProjectSettings, trade: &str) -> &'a str {
    settings
        .all_trade_labor_rates
        .first_role(trade)
        .unwrap_or(DEFAULT_ROLE)
}

/// Applies the fallback policy to a trade/role reference.
///
/// # Examples
///
/// ```
/// use estimate_engine::calculation::resolve_or_default;
/// use estimate_engine::models::{ProjectSettings, RateTable};
/// use rust_decimal::Decimal;
///
/// let mut rates = RateTable::default();
/// rates.insert("General", "Foreman", Decimal::new(85, 0));
/// rates.insert("General", "Journeyman", Decimal::new(75, 0));
/// let settings = ProjectSettings::new(rates, vec!["General".to_string()]);
///
/// let resolved = resolve_or_default(&settings, "Roofing", "Journeyman");
/// assert_eq!(resolved.trade, "General");
/// assert_eq!(resolved.role, "Journeyman");
/// assert_eq!(resolved.hourly_rate, Decimal::new(75, 0));
/// assert!(resolved.trade_substituted);
/// assert!(!resolved.role_substituted);
/// ```
pub fn resolve_or_default(settings: &ProjectSettings, trade: &str, role: &str) -> ResolvedLabor {
    let trade_is_active = settings.active_trades.iter().any(|t| t == trade);
    let resolved_trade = if trade_is_active {
        trade
    } else {
        default_trade(settings, None)
    };

    let rates = &settings.all_trade_labor_rates;
    let role_exists = rates.rate(resolved_trade, role).is_some();
    let resolved_role = if role_exists {
        role
    } else {
        default_role(settings, resolved_trade)
    };

    ResolvedLabor {
        trade: resolved_trade.to_string(),
        role: resolved_role.to_string(),
        hourly_rate: rates.resolve_rate(resolved_trade, resolved_role),
        trade_substituted: resolved_trade != trade,
        role_substituted: resolved_role != role,
    }
}

/// Resolves the reference of a labor entry.
pub fn resolve_entry(settings: &ProjectSettings, entry: &LaborEntry) -> ResolvedLabor {
    resolve_or_default(settings, &entry.trade, &entry.role)
}

/// Repairs a labor entry's stored trade/role in place.
///
/// Returns a warning describing the repair, or `None` if the entry was
/// already valid.
pub fn heal_labor_entry(settings: &ProjectSettings, entry: &mut LaborEntry) -> Option<AuditWarning> {
    let resolved = resolve_entry(settings, entry);
    if !resolved.was_healed() {
        return None;
    }

    let (code, message) = if resolved.trade_substituted {
        (
            "TRADE_SUBSTITUTED",
            format!(
                "Labor entry '{}' referenced inactive trade '{}'; using '{}' / '{}'",
                entry.id, entry.trade, resolved.trade, resolved.role
            ),
        )
    } else {
        (
            "ROLE_SUBSTITUTED",
            format!(
                "Labor entry '{}' referenced unknown role '{}' for trade '{}'; using '{}'",
                entry.id, entry.role, entry.trade, resolved.role
            ),
        )
    };

    warn!(
        labor_id = %entry.id,
        from_trade = %entry.trade,
        from_role = %entry.role,
        to_trade = %resolved.trade,
        to_role = %resolved.role,
        "Healed dangling labor reference"
    );

    entry.trade = resolved.trade;
    entry.role = resolved.role;

    Some(AuditWarning {
        code: code.to_string(),
        message,
        severity: "low".to_string(),
    })
}

/// Gives an item with no labor entries a zero-hour entry on the default
/// trade and role.
pub fn restore_labor_entry(settings: &ProjectSettings, item: &mut EstimateItem) -> Option<AuditWarning> {
    if !item.labor_entries.is_empty() {
        return None;
    }

    let trade = default_trade(settings, None);
    let role = default_role(settings, trade);
    let entry = LaborEntry::new(trade, role);

    warn!(
        item_id = %item.id,
        labor_id = %entry.id,
        trade = %trade,
        role = %role,
        "Added default labor entry to item without labor"
    );

    let message = format!(
        "Item '{}' had no labor entries; added '{}' / '{}'",
        item.id, trade, role
    );
    item.labor_entries.push(entry);

    Some(AuditWarning {
        code: "LABOR_ENTRY_ADDED".to_string(),
        message,
        severity: "low".to_string(),
    })
}

/// Repairs every item and labor entry, returning one warning per repair.
pub fn heal_items(settings: &ProjectSettings, items: &mut [EstimateItem]) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();
    for item in items.iter_mut() {
        warnings.extend(restore_labor_entry(settings, item));
        warnings.extend(
            item.labor_entries
                .iter_mut()
                .filter_map(|entry| heal_labor_entry(settings, entry)),
        );
    }
    warnings
}
