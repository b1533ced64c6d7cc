//! Performance report computation.
//!
//! Produces the numbers behind the report view: cumulative GPA, credit
//! total, per-status workload counts, per-class grade breakdown, and the
//! chronological assignment log. Printing and layout belong to the
//! caller.

use chrono::{Local, NaiveDate};
use log::info;
use shared::{
    AssignmentLogEntry, ClassGradeRow, ReportSummary, StatusCount, TrackerDocument,
};

use crate::domain::commands::grades::{ClassGradeQuery, CumulativeGpaQuery};
use crate::domain::grade_service::GradeService;
use crate::domain::statuses::StatusRegistry;

/// Service that assembles the performance report.
#[derive(Clone, Default)]
pub struct ReportService {
    grade_service: GradeService,
}

impl ReportService {
    /// Create a new ReportService instance.
    pub fn new() -> Self {
        Self {
            grade_service: GradeService::new(),
        }
    }

    /// Compute the full report over the document snapshot.
    pub fn performance_report(
        &self,
        document: &TrackerDocument,
        statuses: &StatusRegistry,
        today: Option<NaiveDate>,
    ) -> ReportSummary {
        let today = today.unwrap_or_else(|| Local::now().date_naive());

        let gpa = self.grade_service.cumulative_gpa(
            document,
            statuses,
            CumulativeGpaQuery { today: Some(today) },
        );

        let total_credits: f64 = document.classes.iter().map(|class| class.credits).sum();

        let assignment_count = document.assignments.len();
        let completed_count = document
            .assignments
            .iter()
            .filter(|assignment| statuses.counts_in_grade(&assignment.status))
            .count();
        let completion_percent = if assignment_count == 0 {
            0
        } else {
            (completed_count as f64 / assignment_count as f64 * 100.0).round() as u32
        };

        let status_counts = statuses
            .definitions()
            .iter()
            .map(|definition| StatusCount {
                id: definition.id.clone(),
                label: definition.label.clone(),
                count: document
                    .assignments
                    .iter()
                    .filter(|assignment| assignment.status == definition.id)
                    .count(),
            })
            .collect();

        let class_breakdown = document
            .classes
            .iter()
            .map(|class| {
                let summary = self.grade_service.class_grade(
                    document,
                    statuses,
                    ClassGradeQuery {
                        class_id: class.id.clone(),
                        today: Some(today),
                    },
                );
                ClassGradeRow {
                    class_id: class.id.clone(),
                    name: class.name.clone(),
                    code: class.code.clone(),
                    credits: class.credits,
                    percent: summary.percent,
                    letter: summary.letter,
                }
            })
            .collect();

        let mut assignment_log: Vec<AssignmentLogEntry> = document
            .assignments
            .iter()
            .map(|assignment| {
                let class_code = document
                    .classes
                    .iter()
                    .find(|class| class.id == assignment.class_id)
                    .map(|class| class.code.clone())
                    .unwrap_or_default();
                AssignmentLogEntry {
                    due_date: assignment.due_date,
                    class_code,
                    name: assignment.name.clone(),
                    grade: assignment.grade,
                    total: assignment.total,
                }
            })
            .collect();
        // Most recent due date first; undated entries sink to the bottom.
        assignment_log.sort_by(|a, b| b.due_date.cmp(&a.due_date));

        info!(
            "Report: {} classes, {} assignments, GPA {}",
            document.classes.len(),
            assignment_count,
            gpa.formatted
        );

        ReportSummary {
            university_name: document.university_name.clone(),
            cumulative_gpa: gpa.gpa,
            total_credits,
            assignment_count,
            completed_count,
            completion_percent,
            status_counts,
            class_breakdown,
            assignment_log,
        }
    }
}
