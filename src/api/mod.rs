//! HTTP API module for the Estimate Engine.
//!
//! This module provides the REST endpoints for computing estimate totals,
//! exporting line items as CSV, and managing saved projects.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DefaultsQuery, ProjectListQuery, SaveProjectRequest, StatusUpdateRequest};
pub use response::{
    ApiError, CustomerTotal, DefaultSettingsResponse, ProjectSummary, SaveProjectResponse,
};
pub use state::AppState;
