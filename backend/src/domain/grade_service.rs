//! Grade computation service.
//!
//! Computes a single class's percent/letter/GPA from its assignments,
//! categories and rules, and aggregates class GPAs into the credit-weighted
//! cumulative GPA. All computation is synchronous and pure over the
//! document snapshot the caller supplies; nothing here reads or writes
//! storage, and nothing here returns an error — missing references and
//! degenerate inputs resolve to documented conventions instead.

use chrono::{Local, NaiveDate};
use log::debug;
use shared::{
    default_grading_scale, Assignment, Class, GradeSummary, GradingType, TrackerDocument,
};

use crate::domain::commands::grades::{ClassGradeQuery, CumulativeGpaQuery, CumulativeGpaResult};
use crate::domain::grade_rules;
use crate::domain::grade_scale;
use crate::domain::statuses::StatusRegistry;

/// Service for grade and GPA computation.
#[derive(Clone, Default)]
pub struct GradeService;

impl GradeService {
    /// Create a new GradeService instance.
    pub fn new() -> Self {
        Self
    }

    /// Compute one class's grade from the document snapshot.
    ///
    /// A class id that does not resolve yields the neutral
    /// `0% / "N/A" / 0.0` summary rather than an error.
    pub fn class_grade(
        &self,
        document: &TrackerDocument,
        statuses: &StatusRegistry,
        query: ClassGradeQuery,
    ) -> GradeSummary {
        let today = query.today.unwrap_or_else(|| Local::now().date_naive());

        let Some(class) = document.classes.iter().find(|c| c.id == query.class_id) else {
            debug!("Class {} not found, returning neutral grade", query.class_id);
            return GradeSummary::not_applicable();
        };

        let countable = countable_assignments(document, class, statuses, today);
        let retained = grade_rules::apply(countable, &class.rules);

        let earned_points: f64 = retained.iter().map(|a| a.grade).sum();
        let total_points: f64 = retained.iter().map(|a| a.total).sum();

        let percent = match class.grading_type {
            GradingType::Weighted => weighted_percent(class, &retained),
            GradingType::Points => {
                // An ungraded course reads as full marks, not as failing.
                if total_points == 0.0 {
                    100.0
                } else {
                    earned_points / total_points * 100.0
                }
            }
        };

        let scale = class
            .grading_scale
            .as_deref()
            .filter(|scale| !scale.is_empty())
            .unwrap_or_else(|| default_grading_scale());

        let (letter, gpa) = match grade_scale::resolve(percent, scale) {
            Some(entry) => (entry.letter.clone(), entry.gpa),
            None => ("N/A".to_string(), 0.0),
        };

        GradeSummary {
            percent,
            letter,
            gpa,
            earned_points,
            total_points,
        }
    }

    /// Credit-weighted cumulative GPA across every class in the document,
    /// rounded to two decimals. Zero total credits yields 0.00 by
    /// convention.
    pub fn cumulative_gpa(
        &self,
        document: &TrackerDocument,
        statuses: &StatusRegistry,
        query: CumulativeGpaQuery,
    ) -> CumulativeGpaResult {
        let today = query.today.unwrap_or_else(|| Local::now().date_naive());

        let mut quality_points = 0.0;
        let mut credits = 0.0;
        for class in &document.classes {
            let summary = self.class_grade(
                document,
                statuses,
                ClassGradeQuery {
                    class_id: class.id.clone(),
                    today: Some(today),
                },
            );
            quality_points += summary.gpa * class.credits;
            credits += class.credits;
        }

        let gpa = if credits == 0.0 {
            0.0
        } else {
            (quality_points / credits * 100.0).round() / 100.0
        };

        debug!("Cumulative GPA over {} credits: {:.2}", credits, gpa);

        CumulativeGpaResult {
            gpa,
            formatted: format!("{:.2}", gpa),
        }
    }
}

/// Select the class's countable assignments: those whose status counts in
/// the grade, plus past-due work regardless of status.
///
/// Counting overdue, never-submitted assignments (usually 0 points out of
/// their total) is a deliberate leniency policy: by the time a report is
/// requested, overdue work is assumed gradable as-is.
fn countable_assignments<'a>(
    document: &'a TrackerDocument,
    class: &Class,
    statuses: &StatusRegistry,
    today: NaiveDate,
) -> Vec<&'a Assignment> {
    document
        .assignments
        .iter()
        .filter(|assignment| assignment.class_id == class.id)
        .filter(|assignment| {
            statuses.counts_in_grade(&assignment.status)
                || assignment.due_date.is_some_and(|due| due < today)
        })
        .collect()
}

/// Weighted-mode percentage.
///
/// The denominator is the sum of weights actually used — categories with
/// no countable assignments (or a zero point total) contribute nothing to
/// either side, so a partially-graded term still resolves to a meaningful
/// percentage. No weight used at all reads as full marks.
fn weighted_percent(class: &Class, retained: &[&Assignment]) -> f64 {
    let mut weighted_score = 0.0;
    let mut weight_used = 0.0;

    for category in &class.categories {
        let in_category: Vec<&Assignment> = retained
            .iter()
            .copied()
            .filter(|assignment| assignment.category == category.name)
            .collect();
        if in_category.is_empty() {
            continue;
        }

        let points: f64 = in_category.iter().map(|a| a.grade).sum();
        let possible: f64 = in_category.iter().map(|a| a.total).sum();
        if possible > 0.0 {
            weighted_score += points / possible * category.weight;
            weight_used += category.weight;
        }
    }

    if weight_used > 0.0 {
        weighted_score / weight_used * 100.0
    } else {
        100.0
    }
}
