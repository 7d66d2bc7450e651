//! Saved projects.
//!
//! Projects are stored in memory only, keyed for upsert by project name and
//! customer name.

mod project;
mod project_store;

pub use project::{NewProject, ProjectStatus, SaveStatus, SavedProject};
pub use project_store::ProjectStore;
