//! CSV export of detailed estimate line items.
//!
//! One row per labor entry. Item-level costs repeat on every row of the
//! item, so the "Line Total ($)" column of a multi-entry item is per row and
//! must not be summed.

use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::{
    cost_materials, cost_other, labor_entry_cost_at, non_negative, resolve_entry,
};
use crate::error::{EngineError, EngineResult};
use crate::estimate::DetailedEstimate;

use super::format::format_amount;

/// Column headers, in output order.
pub const CSV_HEADERS: [&str; 16] = [
    "Task Name",
    "Description",
    "Trade",
    "Skill",
    "OT/DT Multiplier",
    "Hours",
    "Labor Rate ($)",
    "Labor Total ($)",
    "Material Quantity",
    "Material Unit Cost ($)",
    "Materials Total ($)",
    "Equipment/Rental ($)",
    "Subcontractor ($)",
    "Misc Line Item ($)",
    "Other Total ($)",
    "Line Total ($)",
];

/// Returns the download file name for an estimate's CSV export.
pub fn export_file_name(estimate: &DetailedEstimate) -> String {
    let name = estimate.settings.project_name.trim();
    let name = if name.is_empty() { "estimate" } else { name };
    format!("{}-export.csv", name.replace(' ', "_"))
}

fn plain(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Serializes the estimate's line items as CSV.
///
/// Trade and role references are resolved with the same fallback policy
/// as the totals engine, and labor is priced by the engine's own cost
/// function, so exported amounts always match computed totals.
pub fn export_estimate_csv(estimate: &DetailedEstimate) -> EngineResult<String> {
    if estimate.items.is_empty() {
        return Err(EngineError::NothingToExport);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    let mut rows = 0usize;
    for item in &estimate.items {
        let materials_total = cost_materials(item);
        let other_total = cost_other(item);

        for entry in &item.labor_entries {
            let resolved = resolve_entry(&estimate.settings, entry);
            let hourly_rate = non_negative(resolved.hourly_rate);
            let labor_total = labor_entry_cost_at(hourly_rate, entry);
            let line_total = labor_total
                .saturating_add(materials_total)
                .saturating_add(other_total);

            writer.write_record([
                item.task_name.clone(),
                item.description.clone(),
                resolved.trade,
                resolved.role,
                plain(entry.ot_dt_multiplier),
                plain(entry.hours),
                format_amount(hourly_rate),
                format_amount(labor_total),
                plain(item.material_quantity),
                format_amount(item.material_unit_cost),
                format_amount(materials_total),
                format_amount(item.equipment_rental_cost),
                format_amount(item.subcontractor_cost_line_item),
                format_amount(item.misc_line_item),
                format_amount(other_total),
                format_amount(line_total),
            ])?;
            rows += 1;
        }
    }

    let bytes = writer.into_inner().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    let output = String::from_utf8(bytes).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;

    info!(items = estimate.items.len(), rows, "Exported estimate to CSV");
    Ok(output)
}
