//! Request types for the Estimate Engine API.
//!
//! Estimate bodies deserialize straight into the domain types
//! ([`Estimate`](crate::estimate::Estimate) and
//! [`DetailedEstimate`](crate::estimate::DetailedEstimate)); this module holds
//! the request shapes that exist only at the HTTP boundary.

use serde::{Deserialize, Serialize};

use crate::estimate::Estimate;
use crate::store::{NewProject, ProjectStatus};

/// Request body for `POST /projects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProjectRequest {
    /// Project name; together with the customer name it identifies the
    /// project for upsert.
    pub project_name: String,
    /// Customer name.
    pub customer_name: String,
    /// Two-letter state code.
    pub project_state: String,
    /// The estimate to store.
    pub details: Estimate,
}

impl From<SaveProjectRequest> for NewProject {
    fn from(req: SaveProjectRequest) -> Self {
        NewProject {
            project_name: req.project_name,
            customer_name: req.customer_name,
            project_state: req.project_state,
            details: req.details,
        }
    }
}

/// Request body for `PUT /projects/:id/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// The new workflow status.
    pub status: ProjectStatus,
}

/// Query string for `GET /settings/defaults`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsQuery {
    /// Two-letter state code used to look up the sales tax.
    #[serde(default)]
    pub state: Option<String>,
}

/// Query string for `GET /projects`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectListQuery {
    /// Case-insensitive filter on project or customer name.
    #[serde(default)]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_project_request_converts_to_new_project() {
        let json = r#"{
            "project_name": "Kitchen",
            "customer_name": "Acme",
            "project_state": "TX",
            "details": {"mode": "quick_quote"}
        }"#;
        let req: SaveProjectRequest = serde_json::from_str(json).unwrap();
        let project: NewProject = req.into();

        assert_eq!(project.project_name, "Kitchen");
        assert_eq!(project.customer_name, "Acme");
        assert_eq!(project.project_state, "TX");
        assert_eq!(project.details.item_count(), 0);
    }

    #[test]
    fn test_status_update_uses_display_names() {
        let req: StatusUpdateRequest =
            serde_json::from_str(r#"{"status": "Pending Review"}"#).unwrap();
        assert_eq!(req.status, ProjectStatus::PendingReview);
    }

    #[test]
    fn test_defaults_query_state_is_optional() {
        let query: DefaultsQuery = serde_json::from_str("{}").unwrap();
        assert!(query.state.is_none());
    }
}
