//! Saved project records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::estimate::Estimate;

/// Workflow status of a saved proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Not yet sent.
    #[default]
    Draft,
    /// Sent and awaiting a decision.
    #[serde(rename = "Pending Review")]
    PendingReview,
    /// Won.
    Awarded,
    /// Lost.
    Rejected,
}

/// Whether a save created a new record or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    /// A new project was stored.
    Saved,
    /// An existing project with the same name and customer was replaced.
    Updated,
}

/// Input for saving a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    /// Project name; part of the upsert key.
    pub project_name: String,
    /// Customer name; part of the upsert key.
    pub customer_name: String,
    /// Two-letter state code.
    pub project_state: String,
    /// The estimate, stored verbatim.
    pub details: Estimate,
}

/// A stored proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProject {
    /// Unique identifier (`proj_<uuid>`).
    pub id: String,
    /// Project name.
    pub project_name: String,
    /// Customer name.
    pub customer_name: String,
    /// Project type, e.g. "Commercial" or "Quick Quote".
    pub project_type: String,
    /// Two-letter state code.
    pub project_state: String,
    /// Grand total computed when the project was saved.
    pub total_proposal: Decimal,
    /// Date of the most recent save.
    pub last_saved_date: NaiveDate,
    /// Workflow status.
    pub status: ProjectStatus,
    /// The estimate as saved.
    pub details: Estimate,
}
