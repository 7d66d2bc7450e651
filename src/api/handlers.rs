//! HTTP request handlers for the Estimate Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_totals_with_audit;
use crate::error::EngineError;
use crate::estimate::{DetailedEstimate, Estimate};
use crate::export::{export_estimate_csv, export_file_name};
use crate::models::{AuditTrace, CalculationResult};
use crate::store::SaveStatus;

use super::request::{
    DefaultsQuery, ProjectListQuery, SaveProjectRequest, StatusUpdateRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, CustomerTotal, DefaultSettingsResponse, ProjectSummary,
    SaveProjectResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/totals", post(totals_handler))
        .route("/export/csv", post(export_csv_handler))
        .route("/settings/defaults", get(defaults_handler))
        .route(
            "/projects",
            get(list_projects_handler).post(save_project_handler),
        )
        .route(
            "/projects/:id",
            get(get_project_handler).delete(delete_project_handler),
        )
        .route("/projects/:id/status", put(update_status_handler))
        .route("/customers/totals", get(customer_totals_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON body rejection to a 400 response.
///
/// Missing fields are validation errors; anything else the body could not
/// be parsed into is malformed JSON.
fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /totals.
///
/// Accepts an estimate in either mode and returns its breakdown.
async fn totals_handler(payload: Result<Json<Estimate>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing totals request");

    let estimate = match payload {
        Ok(Json(estimate)) => estimate,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let item_count = estimate.item_count();
    let result = perform_calculation(estimate);
    info!(
        correlation_id = %correlation_id,
        items_count = item_count,
        grand_total = %result.breakdown.grand_total(),
        warnings = result.audit_trace.warnings.len(),
        duration_us = result.audit_trace.duration_us,
        "Totals computed"
    );
    json_response(StatusCode::OK, result)
}

/// Sanitizes and heals the estimate, then computes its breakdown and audit
/// trace.
fn perform_calculation(mut estimate: Estimate) -> CalculationResult {
    let start_time = Instant::now();

    estimate.sanitize();
    let warnings = estimate.heal();
    let (breakdown, steps) = compute_totals_with_audit(&estimate);
    let items = match estimate {
        Estimate::Detailed(detailed) => Some(detailed.items),
        Estimate::QuickQuote(_) => None,
    };

    let duration_us = start_time.elapsed().as_micros() as u64;

    CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        breakdown,
        items,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    }
}

/// Handler for POST /export/csv.
async fn export_csv_handler(payload: Result<Json<DetailedEstimate>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing CSV export request");

    let mut estimate = match payload {
        Ok(Json(estimate)) => estimate,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    estimate.sanitize();
    estimate.heal();

    match export_estimate_csv(&estimate) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export_file_name(&estimate)),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /settings/defaults.
async fn defaults_handler(
    State(state): State<AppState>,
    Query(query): Query<DefaultsQuery>,
) -> Response {
    let config = state.config();
    let body = DefaultSettingsResponse {
        project: config.default_project_settings(query.state.as_deref()),
        quick_quote: config.default_quick_quote_settings(),
    };
    json_response(StatusCode::OK, body)
}

/// Handler for GET /projects.
async fn list_projects_handler(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> Response {
    let store = state.projects().read().await;
    let summaries: Vec<ProjectSummary> = match query.search.as_deref() {
        Some(term) if !term.trim().is_empty() => {
            store.search(term.trim()).into_iter().map(ProjectSummary::from).collect()
        }
        _ => store.list().iter().map(ProjectSummary::from).collect(),
    };
    json_response(StatusCode::OK, summaries)
}

/// Handler for POST /projects.
///
/// Creates the project, or replaces the one with the same project and
/// customer name.
async fn save_project_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveProjectRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing save project request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let saved = state.projects().write().await.save(request.into());
    match saved {
        Ok((status, project)) => {
            let code = match status {
                SaveStatus::Saved => StatusCode::CREATED,
                SaveStatus::Updated => StatusCode::OK,
            };
            json_response(code, SaveProjectResponse { status, project })
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /projects/:id.
async fn get_project_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let store = state.projects().read().await;
    match store.get(&id) {
        Ok(project) => json_response(StatusCode::OK, project),
        Err(err) => error_response(Uuid::new_v4(), err),
    }
}

/// Handler for DELETE /projects/:id.
async fn delete_project_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.projects().write().await.delete(&id) {
        Ok(project) => {
            info!(
                correlation_id = %correlation_id,
                project_id = %project.id,
                "Deleted project"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /projects/:id/status.
async fn update_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let mut store = state.projects().write().await;
    match store.set_status(&id, request.status) {
        Ok(project) => {
            info!(
                correlation_id = %correlation_id,
                project_id = %project.id,
                status = ?project.status,
                "Updated project status"
            );
            json_response(StatusCode::OK, ProjectSummary::from(project))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /customers/totals.
async fn customer_totals_handler(State(state): State<AppState>) -> Response {
    let totals: Vec<CustomerTotal> = state
        .projects()
        .read()
        .await
        .customer_totals()
        .into_iter()
        .map(|(customer_name, total_proposal)| CustomerTotal {
            customer_name,
            total_proposal,
        })
        .collect();
    json_response(StatusCode::OK, totals)
}
