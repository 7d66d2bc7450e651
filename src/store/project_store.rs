//! In-memory saved-project store.

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::estimate::Estimate;
use crate::models::generate_id;

use super::project::{NewProject, ProjectStatus, SaveStatus, SavedProject};

const QUICK_QUOTE_PROJECT_TYPE: &str = "Quick Quote";

fn require(field: &str, value: &str) -> EngineResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidProject {
            field: field.to_string(),
            message: "is required".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Saved projects, kept sorted by project name.
///
/// Projects are keyed for upsert by (project name, customer name).
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: Vec<SavedProject>,
}

impl ProjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a project, replacing any project with the same name and
    /// customer.
    ///
    /// Settings are validated strictly, then the estimate is sanitized and
    /// healed before it is stored. The stored total is the grand total of
    /// that estimate at save time. A replaced project keeps its id and
    /// status.
    pub fn save(&mut self, new_project: NewProject) -> EngineResult<(SaveStatus, SavedProject)> {
        let project_name = require("project_name", &new_project.project_name)?;
        let customer_name = require("customer_name", &new_project.customer_name)?;
        let project_state = require("project_state", &new_project.project_state)?.to_ascii_uppercase();

        let mut details = new_project.details;
        if let Estimate::Detailed(detailed) = &details {
            detailed.settings.validate()?;
        }
        details.sanitize();
        details.heal();
        let project_type = match &mut details {
            Estimate::Detailed(detailed) => {
                detailed.settings.project_name = project_name.clone();
                detailed.settings.client_name = customer_name.clone();
                detailed.settings.project_state = project_state.clone();
                detailed.settings.project_type.clone()
            }
            Estimate::QuickQuote(_) => QUICK_QUOTE_PROJECT_TYPE.to_string(),
        };
        let total_proposal = details.totals().grand_total();

        let existing = self
            .projects
            .iter()
            .position(|p| p.project_name == project_name && p.customer_name == customer_name);

        let (status, id, project_status) = match existing {
            Some(index) => {
                let previous = self.projects.remove(index);
                (SaveStatus::Updated, previous.id, previous.status)
            }
            None => (SaveStatus::Saved, generate_id("proj"), ProjectStatus::Draft),
        };

        let saved = SavedProject {
            id,
            project_name,
            customer_name,
            project_type,
            project_state,
            total_proposal,
            last_saved_date: Utc::now().date_naive(),
            status: project_status,
            details,
        };

        info!(
            project_id = %saved.id,
            project_name = %saved.project_name,
            customer_name = %saved.customer_name,
            total_proposal = %saved.total_proposal,
            status = ?status,
            "Saved project"
        );

        self.projects.push(saved.clone());
        self.projects.sort_by(|a, b| {
            a.project_name
                .to_lowercase()
                .cmp(&b.project_name.to_lowercase())
                .then_with(|| a.customer_name.cmp(&b.customer_name))
        });
        Ok((status, saved))
    }

    /// Returns all projects sorted by project name.
    pub fn list(&self) -> &[SavedProject] {
        &self.projects
    }

    /// Returns projects whose name or customer contains `term`,
    /// case-insensitively.
    pub fn search(&self, term: &str) -> Vec<&SavedProject> {
        let term = term.to_lowercase();
        self.projects
            .iter()
            .filter(|p| {
                p.project_name.to_lowercase().contains(&term)
                    || p.customer_name.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Returns a project by id.
    pub fn get(&self, id: &str) -> EngineResult<&SavedProject> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::ProjectNotFound { id: id.to_string() })
    }

    /// Removes a project by id.
    pub fn delete(&mut self, id: &str) -> EngineResult<SavedProject> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| EngineError::ProjectNotFound { id: id.to_string() })?;
        Ok(self.projects.remove(index))
    }

    /// Changes a project's workflow status.
    pub fn set_status(&mut self, id: &str, status: ProjectStatus) -> EngineResult<&SavedProject> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::ProjectNotFound { id: id.to_string() })?;
        project.status = status;
        Ok(project)
    }

    /// Sums saved proposal totals per customer.
    pub fn customer_totals(&self) -> BTreeMap<String, Decimal> {
        let mut totals = BTreeMap::new();
        for project in &self.projects {
            let total = totals
                .entry(project.customer_name.clone())
                .or_insert(Decimal::ZERO);
            *total = Decimal::saturating_add(*total, project.total_proposal);
        }
        totals
    }

    /// Returns the number of saved projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Returns true if no projects are saved.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
