//! # Domain Module
//!
//! Contains all business logic for the grade tracker.
//!
//! This module encapsulates the core rules and services that define how
//! grades are computed and how daily work is planned. It operates
//! independently of any UI framework or storage mechanism: services
//! compute over a document snapshot supplied by the caller, and only the
//! planner (which owns the daily-plan cache) touches storage.
//!
//! ## Module Organization
//!
//! - **grade_scale**: percentage-to-letter resolution over threshold scales
//! - **grade_rules**: the ordered grading-rule pipeline (drop-lowest)
//! - **grade_service**: per-class grades and the cumulative GPA
//! - **planner_service**: the workload pool and the persisted daily plan
//! - **statuses**: the configurable assignment status taxonomy
//! - **calendar**: month-grid generation for the calendar view
//! - **report_service**: the numbers behind the performance report
//! - **commands**: command/query structs used at the service boundary
//!
//! ## Core Concepts
//!
//! - **Countable assignment**: included in a class's grade, either because
//!   its status counts or because it is past due
//! - **Workload pool**: outstanding assignments due within the next week
//! - **Daily plan**: the persisted, date-keyed selection of today's work
//! - **Impact**: points-possible scaled by category weight, used only to
//!   rank the planner's backlog
//!
//! ## Design Principles
//!
//! - **Total computation**: grade and planning functions never fail; bad
//!   references and malformed numerics resolve to documented conventions
//! - **Configuration over code**: statuses and scales are data
//! - **Storage agnostic**: persistence goes through the storage traits

pub mod calendar;
pub mod commands;
pub mod grade_rules;
pub mod grade_scale;
pub mod grade_service;
pub mod planner_service;
pub mod report_service;
pub mod statuses;

pub use calendar::CalendarService;
pub use grade_service::GradeService;
pub use planner_service::{PlannerService, PLANNING_HORIZON_DAYS};
pub use report_service::ReportService;
pub use statuses::StatusRegistry;
