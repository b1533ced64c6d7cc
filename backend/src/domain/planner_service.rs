//! Daily workload planning.
//!
//! Derives the pool of outstanding work due within the next week and
//! selects a stable subset of it as "today's plan". The selection is
//! persisted with the date it was made for, and is only rebuilt when the
//! calendar day rolls over — re-reading the plan during the day always
//! returns the same set, minus whatever has been completed in the
//! meantime.
//!
//! Two properties hold simultaneously: nothing due tomorrow is ever
//! deferred, and the weekly load is spread as evenly as integer division
//! allows (at most `ceil(pool / 7)` picks per day, plus whatever the
//! mandatory tier forces in).

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use log::{debug, info};
use shared::{Assignment, Class, DailyPlan, GradingType, TrackerDocument};
use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::commands::planner::{TodaysPlanQuery, TodaysPlanResult};
use crate::domain::statuses::StatusRegistry;
use crate::storage::json::{DocumentRepository, JsonConnection};
use crate::storage::traits::DocumentStorage;

/// Rolling scheduling window, in days. Fixed, not configurable.
pub const PLANNING_HORIZON_DAYS: i64 = 7;

/// Service that resolves (and, once per day, regenerates) today's plan.
#[derive(Clone)]
pub struct PlannerService {
    document_repository: DocumentRepository,
}

impl PlannerService {
    /// Create a new PlannerService.
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        let document_repository = DocumentRepository::new((*connection).clone());
        Self {
            document_repository,
        }
    }

    /// Resolve today's plan, regenerating and persisting it if the stored
    /// plan was made for a different date.
    ///
    /// Regeneration is a single whole-record replace. Callers must
    /// serialize calls per document (one in-process planner per session);
    /// two racing regenerations resolve to last-write-wins, never to an
    /// interleaved record.
    pub fn todays_plan(&self, query: TodaysPlanQuery) -> Result<TodaysPlanResult> {
        let today = query.today.unwrap_or_else(|| Local::now().date_naive());

        let mut document = self.document_repository.load_document()?;
        let statuses = StatusRegistry::from_document(&document);

        let (plan, regenerated) = match document.daily_plan.clone() {
            Some(existing) if existing.date == Some(today) => {
                debug!("Plan for {} is fresh, reusing {} ids", today, existing.ids.len());
                (existing, false)
            }
            _ => {
                let fresh = build_plan(&document, &statuses, today);
                info!(
                    "Regenerated daily plan for {}: {} of {} pool items selected",
                    today,
                    fresh.ids.len(),
                    active_pool(&document, &statuses, today).len()
                );
                document.daily_plan = Some(fresh.clone());
                self.document_repository.save_document(&document)?;
                (fresh, true)
            }
        };

        let assignments = effective_plan_view(&document, &statuses, &plan)
            .into_iter()
            .cloned()
            .collect();

        Ok(TodaysPlanResult {
            date: today,
            assignments,
            regenerated,
        })
    }
}

/// The active workload pool: assignments due within the rolling window
/// (inclusive on both ends) whose status is still outstanding.
pub fn active_pool<'a>(
    document: &'a TrackerDocument,
    statuses: &StatusRegistry,
    today: NaiveDate,
) -> Vec<&'a Assignment> {
    let horizon_end = today + Duration::days(PLANNING_HORIZON_DAYS);

    document
        .assignments
        .iter()
        .filter(|assignment| !statuses.counts_in_grade(&assignment.status))
        .filter(|assignment| {
            assignment
                .due_date
                .is_some_and(|due| due >= today && due <= horizon_end)
        })
        .collect()
}

/// Build the plan for `today` from the current pool.
///
/// Quota is `ceil(pool / 7)`. Everything due tomorrow is included
/// unconditionally; the remaining slots are filled from the backlog (due
/// after tomorrow) ordered by due date, highest impact first within a day.
pub fn build_plan(
    document: &TrackerDocument,
    statuses: &StatusRegistry,
    today: NaiveDate,
) -> DailyPlan {
    let pool = active_pool(document, statuses, today);
    if pool.is_empty() {
        return DailyPlan::new(today, Vec::new());
    }

    let quota = pool.len().div_ceil(PLANNING_HORIZON_DAYS as usize);
    let tomorrow = today + Duration::days(1);

    let mandatory: Vec<&Assignment> = pool
        .iter()
        .copied()
        .filter(|assignment| assignment.due_date == Some(tomorrow))
        .collect();

    let mut backlog: Vec<(&Assignment, f64)> = pool
        .iter()
        .copied()
        .filter(|assignment| assignment.due_date.is_some_and(|due| due > tomorrow))
        .map(|assignment| (assignment, impact(assignment, document)))
        .collect();
    backlog.sort_by(|(a, a_impact), (b, b_impact)| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| b_impact.partial_cmp(a_impact).unwrap_or(Ordering::Equal))
    });

    let fill = quota.saturating_sub(mandatory.len());

    let mut ids: Vec<String> = mandatory
        .iter()
        .map(|assignment| assignment.id.clone())
        .collect();
    ids.extend(
        backlog
            .iter()
            .take(fill)
            .map(|(assignment, _)| assignment.id.clone()),
    );

    DailyPlan::new(today, ids)
}

/// The live "today's work" view: the plan's ids resolved against
/// assignments that still exist and are still outstanding. Completed or
/// deleted entries drop out of the view without touching the stored id
/// set.
pub fn effective_plan_view<'a>(
    document: &'a TrackerDocument,
    statuses: &StatusRegistry,
    plan: &DailyPlan,
) -> Vec<&'a Assignment> {
    plan.ids
        .iter()
        .filter_map(|id| document.assignments.iter().find(|a| &a.id == id))
        .filter(|assignment| !statuses.counts_in_grade(&assignment.status))
        .collect()
}

/// Backlog ranking score: points possible, scaled by the category's share
/// of the class weight in weighted classes. Used only for plan ordering,
/// never for grades.
fn impact(assignment: &Assignment, document: &TrackerDocument) -> f64 {
    let class = document
        .classes
        .iter()
        .find(|class| class.id == assignment.class_id);

    match class {
        Some(class) if class.grading_type == GradingType::Weighted => {
            let weight = category_weight(class, &assignment.category);
            assignment.total * (weight / 100.0)
        }
        _ => assignment.total,
    }
}

fn category_weight(class: &Class, category_name: &str) -> f64 {
    class
        .categories
        .iter()
        .find(|category| category.name == category_name)
        .map(|category| category.weight)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Category;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
    }

    fn due_in(days: i64) -> Option<NaiveDate> {
        Some(today() + Duration::days(days))
    }

    fn outstanding(id: &str, due: Option<NaiveDate>, total: f64) -> Assignment {
        Assignment {
            id: id.to_string(),
            class_id: "c1".to_string(),
            name: format!("Assignment {id}"),
            status: "TODO".to_string(),
            total,
            due_date: due,
            category: "Homework".to_string(),
            ..Assignment::default()
        }
    }

    fn registry(document: &TrackerDocument) -> StatusRegistry {
        StatusRegistry::from_document(document)
    }

    fn setup_service() -> (PlannerService, DocumentRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        let repository = DocumentRepository::new((*connection).clone());
        (PlannerService::new(connection), repository, temp_dir)
    }

    #[test]
    fn pool_window_is_inclusive_on_both_ends() {
        let mut document = TrackerDocument::default();
        document.assignments.push(outstanding("today", due_in(0), 10.0));
        document.assignments.push(outstanding("edge", due_in(7), 10.0));
        document.assignments.push(outstanding("beyond", due_in(8), 10.0));
        document.assignments.push(outstanding("past", due_in(-1), 10.0));
        document.assignments.push(outstanding("undated", None, 10.0));

        let statuses = registry(&document);
        let pool = active_pool(&document, &statuses, today());
        let ids: Vec<&str> = pool.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "edge"]);
    }

    #[test]
    fn completed_work_never_enters_the_pool() {
        let mut document = TrackerDocument::default();
        let mut done = outstanding("done", due_in(2), 10.0);
        done.status = "GRADED".to_string();
        document.assignments.push(done);
        document.assignments.push(outstanding("open", due_in(2), 10.0));

        let statuses = registry(&document);
        let pool = active_pool(&document, &statuses, today());
        let ids: Vec<&str> = pool.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["open"]);
    }

    #[test]
    fn quota_is_pool_size_over_seven_rounded_up() {
        let mut document = TrackerDocument::default();
        for index in 0..10 {
            document
                .assignments
                .push(outstanding(&format!("a{index}"), due_in(3), 10.0));
        }

        let statuses = registry(&document);
        let plan = build_plan(&document, &statuses, today());
        assert_eq!(plan.ids.len(), 2);
    }

    #[test]
    fn everything_due_tomorrow_is_planned_even_over_quota() {
        let mut document = TrackerDocument::default();
        for index in 0..3 {
            document
                .assignments
                .push(outstanding(&format!("urgent{index}"), due_in(1), 10.0));
        }
        for index in 0..7 {
            document
                .assignments
                .push(outstanding(&format!("later{index}"), due_in(4), 10.0));
        }

        // Pool of 10 suggests a quota of 2, but all 3 due-tomorrow items
        // must appear regardless.
        let statuses = registry(&document);
        let plan = build_plan(&document, &statuses, today());
        assert_eq!(plan.ids.len(), 3);
        assert!(plan.ids.iter().all(|id| id.starts_with("urgent")));
    }

    #[test]
    fn backlog_fills_remaining_quota_by_due_date_then_impact() {
        let mut document = TrackerDocument::default();
        for index in 0..8 {
            document
                .assignments
                .push(outstanding(&format!("pad{index}"), due_in(6), 1.0));
        }
        document.assignments.push(outstanding("urgent", due_in(1), 1.0));
        document.assignments.push(outstanding("soon-big", due_in(3), 50.0));
        document.assignments.push(outstanding("soon-small", due_in(3), 5.0));
        document.assignments.push(outstanding("later-huge", due_in(5), 500.0));

        // Pool of 12 -> quota 2: the mandatory item plus the highest-impact
        // assignment of the earliest backlog day.
        let statuses = registry(&document);
        let plan = build_plan(&document, &statuses, today());
        assert_eq!(plan.ids, vec!["urgent".to_string(), "soon-big".to_string()]);
    }

    #[test]
    fn weighted_category_share_scales_impact() {
        let mut document = TrackerDocument::default();
        document.classes.push(Class {
            id: "c1".to_string(),
            grading_type: GradingType::Weighted,
            categories: vec![
                Category {
                    name: "Homework".to_string(),
                    weight: 10.0,
                    default_time: 0,
                },
                Category {
                    name: "Exams".to_string(),
                    weight: 60.0,
                    default_time: 0,
                },
            ],
            ..Class::default()
        });

        // Same due date, same raw points: the exam's 60% category weight
        // outranks the homework's 10%.
        let mut homework = outstanding("homework", due_in(3), 100.0);
        homework.category = "Homework".to_string();
        let mut exam = outstanding("exam", due_in(3), 100.0);
        exam.category = "Exams".to_string();
        document.assignments.push(homework);
        document.assignments.push(exam);

        let statuses = registry(&document);
        let plan = build_plan(&document, &statuses, today());
        assert_eq!(plan.ids.first().unwrap(), "exam");
    }

    #[test]
    fn work_due_today_counts_toward_quota_but_is_not_replanned() {
        let mut document = TrackerDocument::default();
        document.assignments.push(outstanding("due-today", due_in(0), 10.0));
        document.assignments.push(outstanding("later", due_in(3), 10.0));

        // Due-today work was planned on a previous day; the plan only
        // selects from the mandatory (tomorrow) and backlog (after
        // tomorrow) tiers.
        let statuses = registry(&document);
        let plan = build_plan(&document, &statuses, today());
        assert_eq!(plan.ids, vec!["later".to_string()]);
    }

    #[test]
    fn empty_pool_builds_empty_plan() {
        let document = TrackerDocument::default();
        let statuses = registry(&document);

        let plan = build_plan(&document, &statuses, today());
        assert_eq!(plan.date, Some(today()));
        assert!(plan.ids.is_empty());
    }

    #[test]
    fn first_access_of_the_day_persists_the_plan() {
        let (service, repository, _temp_dir) = setup_service();

        let mut document = TrackerDocument::default();
        document.assignments.push(outstanding("a1", due_in(1), 10.0));
        repository.save_document(&document).unwrap();

        let result = service
            .todays_plan(TodaysPlanQuery {
                today: Some(today()),
            })
            .unwrap();
        assert!(result.regenerated);
        assert_eq!(result.assignments.len(), 1);

        let stored = repository.load_document().unwrap();
        let plan = stored.daily_plan.unwrap();
        assert_eq!(plan.date, Some(today()));
        assert_eq!(plan.ids, vec!["a1".to_string()]);
    }

    #[test]
    fn same_day_access_is_idempotent() {
        let (service, repository, _temp_dir) = setup_service();

        let mut document = TrackerDocument::default();
        for index in 0..5 {
            document
                .assignments
                .push(outstanding(&format!("a{index}"), due_in(2 + index), 10.0));
        }
        repository.save_document(&document).unwrap();

        let first = service
            .todays_plan(TodaysPlanQuery {
                today: Some(today()),
            })
            .unwrap();
        let second = service
            .todays_plan(TodaysPlanQuery {
                today: Some(today()),
            })
            .unwrap();

        assert!(first.regenerated);
        assert!(!second.regenerated);

        let first_ids: Vec<String> = first.assignments.iter().map(|a| a.id.clone()).collect();
        let second_ids: Vec<String> = second.assignments.iter().map(|a| a.id.clone()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn stale_plan_is_replaced_when_the_day_rolls_over() {
        let (service, repository, _temp_dir) = setup_service();

        let mut document = TrackerDocument::default();
        document.assignments.push(outstanding("a1", due_in(1), 10.0));
        document.daily_plan = Some(DailyPlan::new(
            today() - Duration::days(1),
            vec!["yesterday".to_string()],
        ));
        repository.save_document(&document).unwrap();

        let result = service
            .todays_plan(TodaysPlanQuery {
                today: Some(today()),
            })
            .unwrap();
        assert!(result.regenerated);

        let stored = repository.load_document().unwrap();
        assert_eq!(stored.daily_plan.unwrap().date, Some(today()));
    }

    #[test]
    fn completing_an_item_hides_it_without_rewriting_the_plan() {
        let (service, repository, _temp_dir) = setup_service();

        let mut document = TrackerDocument::default();
        document.assignments.push(outstanding("a1", due_in(1), 10.0));
        document.assignments.push(outstanding("a2", due_in(1), 10.0));
        repository.save_document(&document).unwrap();

        service
            .todays_plan(TodaysPlanQuery {
                today: Some(today()),
            })
            .unwrap();

        // The CRUD layer marks one item complete during the day.
        let mut updated = repository.load_document().unwrap();
        updated
            .assignments
            .iter_mut()
            .find(|a| a.id == "a1")
            .unwrap()
            .status = "GRADED".to_string();
        repository.save_document(&updated).unwrap();

        let result = service
            .todays_plan(TodaysPlanQuery {
                today: Some(today()),
            })
            .unwrap();
        assert!(!result.regenerated);
        let visible: Vec<String> = result.assignments.iter().map(|a| a.id.clone()).collect();
        assert_eq!(visible, vec!["a2".to_string()]);

        // The persisted id set still names both.
        let stored = repository.load_document().unwrap();
        assert_eq!(
            stored.daily_plan.unwrap().ids,
            vec!["a1".to_string(), "a2".to_string()]
        );
    }

    #[test]
    fn deleted_assignments_drop_out_of_the_view() {
        let mut document = TrackerDocument::default();
        document.assignments.push(outstanding("kept", due_in(1), 10.0));
        let plan = DailyPlan::new(
            today(),
            vec!["kept".to_string(), "deleted".to_string()],
        );

        let statuses = registry(&document);
        let view = effective_plan_view(&document, &statuses, &plan);
        let ids: Vec<&str> = view.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["kept"]);
    }
}
