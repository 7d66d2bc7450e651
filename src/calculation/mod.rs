//! Calculation logic for the Estimate Engine.
//!
//! Rate resolution with the self-healing fallback policy, per-item direct
//! costing, the shared markup primitive, and the two aggregation entry
//! points (detailed and quick quote) with their audit explanations.

mod audit_trace;
mod detailed_totals;
mod engine;
mod item_cost;
mod markups;
mod quick_quote_totals;
mod rate_resolution;
mod sanitize;

pub use audit_trace::{explain_detailed, explain_quick_quote};
pub use detailed_totals::compute_detailed_totals;
pub use engine::{compute_totals, compute_totals_with_audit};
pub use item_cost::{
    cost_labor, cost_materials, cost_other, direct_cost, labor_entry_cost, labor_entry_cost_at,
};
pub use markups::{MarkupSchedule, MarkupSlice, apply_markups, cost_ratio};
pub use quick_quote_totals::compute_quick_quote_totals;
pub use rate_resolution::{
    DEFAULT_ROLE, DEFAULT_TRADE, ResolvedLabor, default_role, default_trade, heal_items,
    heal_labor_entry, resolve_entry, resolve_or_default, resolve_rate, restore_labor_entry,
};
pub use sanitize::{MAX_INPUT, bounded, decimal_from_f64, non_negative, parse_amount, percent};
