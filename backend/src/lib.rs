//! # Grade Tracker Backend
//!
//! Contains all non-UI logic for the grade tracker application.
//!
//! This crate brings together:
//! - **Domain**: grade computation, workload planning, reporting
//! - **Storage**: the persisted tracker document (whole-document replace)
//!
//! The backend is UI-agnostic: a desktop shell, a web API, or a CLI can
//! sit on top of [`AppState`] without modification.
//!
//! ## Architecture
//!
//! ```text
//! UI / API layer (out of scope here)
//!     ↓
//! Domain layer (services over a document snapshot)
//!     ↓
//! Storage layer (JSON document, atomic whole-document replace)
//! ```

pub mod domain;
pub mod storage;

use anyhow::Result;
use log::info;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{CalendarService, GradeService, PlannerService, ReportService};
use crate::storage::JsonConnection;

pub use domain::*;
pub use storage::*;

/// Main application state that holds all services.
#[derive(Clone)]
pub struct AppState {
    pub grade_service: GradeService,
    pub planner_service: PlannerService,
    pub calendar_service: CalendarService,
    pub report_service: ReportService,
    pub connection: Arc<JsonConnection>,
}

/// Initialize the backend against the default data directory.
pub fn initialize_backend() -> Result<AppState> {
    let connection = Arc::new(JsonConnection::new_default()?);
    initialize_with_connection(connection)
}

/// Initialize the backend against an explicit data directory.
pub fn initialize_backend_with_directory<P: AsRef<Path>>(data_directory: P) -> Result<AppState> {
    let connection = Arc::new(JsonConnection::new(data_directory)?);
    initialize_with_connection(connection)
}

fn initialize_with_connection(connection: Arc<JsonConnection>) -> Result<AppState> {
    info!("Setting up domain services");
    let app_state = AppState {
        grade_service: GradeService::new(),
        planner_service: PlannerService::new(connection.clone()),
        calendar_service: CalendarService::new(),
        report_service: ReportService::new(),
        connection,
    };
    Ok(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::planner::TodaysPlanQuery;
    use crate::storage::DocumentStorage;
    use chrono::NaiveDate;
    use shared::{Assignment, TrackerDocument};
    use tempfile::TempDir;

    #[test]
    fn backend_initializes_and_plans_over_a_fresh_directory() {
        let temp_dir = TempDir::new().unwrap();
        let app_state = initialize_backend_with_directory(temp_dir.path()).unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();

        let repository = storage::DocumentRepository::new((*app_state.connection).clone());
        let mut document = TrackerDocument::default();
        document.assignments.push(Assignment {
            id: "a1".to_string(),
            class_id: "c1".to_string(),
            name: "Reading".to_string(),
            status: "TODO".to_string(),
            due_date: today.succ_opt(),
            total: 10.0,
            ..Assignment::default()
        });
        repository.save_document(&document).unwrap();

        let result = app_state
            .planner_service
            .todays_plan(TodaysPlanQuery { today: Some(today) })
            .unwrap();
        assert!(result.regenerated);
        assert_eq!(result.assignments.len(), 1);
    }
}
