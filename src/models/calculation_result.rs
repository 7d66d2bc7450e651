//! Calculation result models for the Estimate Engine.
//!
//! This module contains the [`CalculationResult`] envelope returned by the
//! API, and the audit types that explain how a breakdown was reached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Breakdown, EstimateItem};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one stage of the
/// markup sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate data that was repaired or ignored; they never stop a
/// calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use estimate_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The API envelope around a computed breakdown.
///
/// The breakdown itself is a pure function of the estimate; the id,
/// timestamp and duration here are per-request metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The computed totals.
    pub breakdown: Breakdown,
    /// Detailed items after trade/role healing; absent for quick quotes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<EstimateItem>>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuickQuoteBreakdown, TotalsBreakdown};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sample_audit_trace() -> AuditTrace {
        AuditTrace {
            steps: vec![],
            warnings: vec![],
            duration_us: 1000,
        }
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "overhead".to_string(),
            rule_name: "Overhead".to_string(),
            input: serde_json::json!({"base_cost": "960"}),
            output: serde_json::json!({"overhead_amount": "96"}),
            reasoning: "$960 x 10% = $96".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"overhead\""));
        assert!(json.contains("\"rule_name\":\"Overhead\""));
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "TRADE_SUBSTITUTED".to_string(),
            message: "Trade 'Roofing' is not active".to_string(),
            severity: "low".to_string(),
        };

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"TRADE_SUBSTITUTED\""));
        assert!(json.contains("\"severity\":\"low\""));
    }

    #[test]
    fn test_calculation_result_serialization() {
        let result = CalculationResult {
            calculation_id: Uuid::nil(),
            timestamp: DateTime::parse_from_rfc3339("2026-01-15T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            engine_version: "0.1.0".to_string(),
            breakdown: Breakdown::Detailed(TotalsBreakdown {
                grand_total: dec("1278.4"),
                ..Default::default()
            }),
            items: Some(vec![]),
            audit_trace: create_sample_audit_trace(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"calculation_id\":\"00000000-0000-0000-0000-000000000000\""));
        assert!(json.contains("\"engine_version\":\"0.1.0\""));
        assert!(json.contains("\"breakdown\":{\"mode\":\"detailed\""));
        assert!(json.contains("\"items\":[]"));
        assert!(json.contains("\"audit_trace\":{"));
    }

    #[test]
    fn test_quick_quote_result_omits_items() {
        let result = CalculationResult {
            calculation_id: Uuid::nil(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            breakdown: Breakdown::QuickQuote(QuickQuoteBreakdown::default()),
            items: None,
            audit_trace: create_sample_audit_trace(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("\"items\""));
    }

    #[test]
    fn test_calculation_result_deserialization() {
        let json = r#"{
            "calculation_id": "12345678-1234-1234-1234-123456789012",
            "timestamp": "2026-01-15T10:00:00Z",
            "engine_version": "0.1.0",
            "breakdown": {
                "mode": "quick_quote",
                "direct_costs": {
                    "labor": "0", "materials": "0", "equipment": "0",
                    "subcontractor": "0", "misc_line_items": "0", "total": "0"
                },
                "markups": {
                    "direct_cost": "0", "cost_ratio": "1", "material_markup_amount": "0",
                    "base_cost": "0", "overhead_amount": "0", "misc_amount": "0",
                    "subtotal": "0", "profit_amount": "0", "subtotal_with_profit": "0",
                    "sales_tax_base": "0", "sales_tax_amount": "0", "total": "0"
                },
                "grand_total": "0",
                "overall_labor_hours": "0"
            },
            "audit_trace": {
                "steps": [],
                "warnings": [],
                "duration_us": 0
            }
        }"#;

        let result: CalculationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.engine_version, "0.1.0");
        assert!(result.items.is_none());
        assert_eq!(result.breakdown.grand_total(), Decimal::ZERO);
    }
}
