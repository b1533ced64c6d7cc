//! Domain-level command and query types.
//!
//! These structs are the inputs and outputs of the domain services. A
//! frontend or API layer maps its own DTOs onto these; the services never
//! see transport types. Queries that depend on the current date carry an
//! optional override so callers (and tests) can pin "today" explicitly.

pub mod grades {
    use chrono::NaiveDate;

    /// Query for a single class's computed grade.
    #[derive(Debug, Clone)]
    pub struct ClassGradeQuery {
        pub class_id: String,
        /// Uses the local date when not provided.
        pub today: Option<NaiveDate>,
    }

    /// Query for the credit-weighted cumulative GPA.
    #[derive(Debug, Clone, Default)]
    pub struct CumulativeGpaQuery {
        pub today: Option<NaiveDate>,
    }

    /// Result of the cumulative GPA computation.
    #[derive(Debug, Clone)]
    pub struct CumulativeGpaResult {
        /// Rounded to two decimals; 0.0 when no class carries credits.
        pub gpa: f64,
        /// Display form, e.g. "3.43".
        pub formatted: String,
    }
}

pub mod planner {
    use chrono::NaiveDate;
    use shared::Assignment;

    /// Query for today's work plan.
    #[derive(Debug, Clone, Default)]
    pub struct TodaysPlanQuery {
        /// Uses the local date when not provided.
        pub today: Option<NaiveDate>,
    }

    /// Result of resolving today's plan.
    #[derive(Debug, Clone)]
    pub struct TodaysPlanResult {
        pub date: NaiveDate,
        /// Planned assignments still outstanding, in plan order.
        pub assignments: Vec<Assignment>,
        /// Whether this call regenerated (and persisted) the plan.
        pub regenerated: bool,
    }
}
