//! Response types for the Estimate Engine API.
//!
//! This module defines the error response structures, the mapping from
//! [`EngineError`] to HTTP status codes, and the response bodies of the
//! project endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{ProjectSettings, QuickQuoteSettings};
use crate::store::{ProjectStatus, SaveStatus, SavedProject};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a project not found error response.
    pub fn project_not_found(id: &str) -> Self {
        Self::with_details(
            "PROJECT_NOT_FOUND",
            format!("Project not found: {}", id),
            format!("No saved project has the id '{}'", id),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::ItemNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("ITEM_NOT_FOUND", message),
            },
            EngineError::LaborEntryNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("LABOR_ENTRY_NOT_FOUND", message),
            },
            EngineError::LastLaborEntry { .. } => ApiErrorResponse::bad_request(
                ApiError::new("LAST_LABOR_ENTRY", message),
            ),
            EngineError::InvalidSetting { field, .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_SETTING",
                    message,
                    format!("Check the '{}' project setting", field),
                ))
            }
            EngineError::InvalidRate { trade, role, .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_RATE",
                    message,
                    format!("Check the {} rate for the {} trade", role, trade),
                ))
            }
            EngineError::ProjectNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::project_not_found(&id),
            },
            EngineError::InvalidProject { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_PROJECT", message))
            }
            EngineError::NothingToExport => {
                ApiErrorResponse::bad_request(ApiError::new("NOTHING_TO_EXPORT", message))
            }
            EngineError::ExportError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("EXPORT_ERROR", message),
            },
        }
    }
}

/// Response body for `POST /projects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProjectResponse {
    /// Whether the project was created or replaced.
    pub status: SaveStatus,
    /// The stored project.
    pub project: SavedProject,
}

/// A saved project without its estimate details, as listed by
/// `GET /projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project id.
    pub id: String,
    /// Project name.
    pub project_name: String,
    /// Customer name.
    pub customer_name: String,
    /// Project type.
    pub project_type: String,
    /// Two-letter state code.
    pub project_state: String,
    /// Grand total at the last save.
    pub total_proposal: Decimal,
    /// Date of the last save.
    pub last_saved_date: NaiveDate,
    /// Workflow status.
    pub status: ProjectStatus,
}

impl From<&SavedProject> for ProjectSummary {
    fn from(project: &SavedProject) -> Self {
        Self {
            id: project.id.clone(),
            project_name: project.project_name.clone(),
            customer_name: project.customer_name.clone(),
            project_type: project.project_type.clone(),
            project_state: project.project_state.clone(),
            total_proposal: project.total_proposal,
            last_saved_date: project.last_saved_date,
            status: project.status,
        }
    }
}

/// Response body for `GET /settings/defaults`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultSettingsResponse {
    /// Settings for a new detailed estimate.
    pub project: ProjectSettings,
    /// Settings for a new quick quote.
    pub quick_quote: QuickQuoteSettings,
}

/// One row of `GET /customers/totals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerTotal {
    /// Customer name.
    pub customer_name: String,
    /// Sum of the customer's saved proposal totals.
    pub total_proposal: Decimal,
}
