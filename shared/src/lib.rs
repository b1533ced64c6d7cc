//! Shared data model for the grade tracker.
//!
//! These types describe the persisted document (`database.json`) and the
//! values exchanged between the domain services and any frontend. The
//! document is written by earlier versions of the app with camelCase keys
//! and with numeric fields that may be raw form-input strings, so every
//! numeric field deserializes through the lenient helpers in [`lenient`].

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Status id assigned to newly created assignments.
pub const DEFAULT_STATUS: &str = "TODO";

/// Rule type identifier for drop-lowest grading rules.
///
/// Kept as a plain string (rather than a closed enum) so that rule types
/// introduced by newer versions of the app survive a whole-document save.
pub const RULE_DROP_LOWEST: &str = "DROP_LOWEST";

/// A single assignment belonging to a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assignment {
    pub id: String,
    /// ID of the class this assignment belongs to
    pub class_id: String,
    pub name: String,
    /// Status id resolved against the status registry
    pub status: String,
    /// Points earned; may exceed `total` for extra credit
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub grade: f64,
    /// Points possible
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub total: f64,
    /// Calendar due date (no time component); `None` when unset or malformed
    #[serde(deserialize_with = "lenient::date_or_none")]
    pub due_date: Option<NaiveDate>,
    /// Free-text label matched against the owning class's category list
    pub category: String,
    /// Estimated effort in minutes
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub estimated_time: u32,
    /// Optional reference URL
    pub link: Option<String>,
}

impl Default for Assignment {
    fn default() -> Self {
        Self {
            id: String::new(),
            class_id: String::new(),
            name: String::new(),
            status: DEFAULT_STATUS.to_string(),
            grade: 0.0,
            total: 0.0,
            due_date: None,
            category: String::new(),
            estimated_time: 0,
            link: None,
        }
    }
}

impl Assignment {
    /// Score ratio `grade / total`, defined as 0 when `total` is 0.
    pub fn score_ratio(&self) -> f64 {
        if self.total == 0.0 {
            0.0
        } else {
            self.grade / self.total
        }
    }
}

/// How a class aggregates its assignments into a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum GradingType {
    /// Straight earned-over-possible points
    #[default]
    #[serde(rename = "POINTS")]
    Points,
    /// Weighted category averages
    #[serde(rename = "WEIGHTED")]
    Weighted,
}

impl<'de> Deserialize<'de> for GradingType {
    /// Anything other than the literal `"WEIGHTED"` reads as [`Points`],
    /// the same way malformed numerics read as zero.
    ///
    /// [`Points`]: GradingType::Points
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some("WEIGHTED") => GradingType::Weighted,
            _ => GradingType::Points,
        })
    }
}

/// A grading category within a class (weighted mode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    pub name: String,
    /// Weight in percentage points; weights need not sum to 100
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub weight: f64,
    /// Default estimated minutes for new assignments in this category
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub default_time: u32,
}

/// A per-class grading policy rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GradeRule {
    #[serde(rename = "type")]
    pub rule_type: String,
    /// Category the rule applies to
    pub category: String,
    /// How many assignments to drop; see [`GradeRule::drop_count`]
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub count: Option<f64>,
}

impl GradeRule {
    /// Number of assignments a drop rule removes.
    ///
    /// Missing, non-numeric, zero, or negative counts all read as 1,
    /// matching how every stored document has been interpreted so far.
    pub fn drop_count(&self) -> usize {
        match self.count {
            Some(count) if count.is_finite() && count >= 1.0 => count as usize,
            _ => 1,
        }
    }
}

/// One threshold entry in a grading scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScaleEntry {
    pub letter: String,
    /// Minimum percentage (inclusive) for this tier
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub min: f64,
    /// GPA point value awarded at this tier
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub gpa: f64,
}

impl ScaleEntry {
    pub fn new(letter: &str, min: f64, gpa: f64) -> Self {
        Self {
            letter: letter.to_string(),
            min,
            gpa,
        }
    }
}

/// A class (course) the student is enrolled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Class {
    pub id: String,
    pub name: String,
    /// Short course code, e.g. "CS101"
    pub code: String,
    /// Credit hours, used only for the cumulative GPA
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub credits: f64,
    pub grading_type: GradingType,
    pub categories: Vec<Category>,
    pub rules: Vec<GradeRule>,
    /// Class-specific scale; the built-in default applies when absent
    pub grading_scale: Option<Vec<ScaleEntry>>,
}

/// A configurable assignment lifecycle state.
///
/// The set of statuses is data, not code: users can extend it at runtime,
/// and `counts_in_grade` decides whether assignments in that state are
/// included in grade computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusDefinition {
    pub id: String,
    pub label: String,
    pub counts_in_grade: bool,
}

impl StatusDefinition {
    pub fn new(id: &str, label: &str, counts_in_grade: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            counts_in_grade,
        }
    }
}

/// A standalone calendar event (not tied to an assignment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "lenient::date_or_none")]
    pub date: Option<NaiveDate>,
    /// "EVENT" or "EXAM"
    #[serde(rename = "type")]
    pub event_type: String,
    pub description: String,
}

/// The persisted daily plan: which assignments were selected as "today's
/// work", and for which calendar date that selection was made.
///
/// The record is a cache keyed by its date — it is replaced wholesale when
/// the date no longer matches today, and is otherwise immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyPlan {
    #[serde(deserialize_with = "lenient::date_or_none")]
    pub date: Option<NaiveDate>,
    pub ids: Vec<String>,
}

impl DailyPlan {
    /// Build a plan for `date`, de-duplicating `ids` while preserving order.
    pub fn new(date: NaiveDate, ids: Vec<String>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let ids = ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Self {
            date: Some(date),
            ids,
        }
    }
}

/// The whole persisted document. Persistence is whole-document replace:
/// there is no partial-field update contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerDocument {
    pub university_name: String,
    pub classes: Vec<Class>,
    pub assignments: Vec<Assignment>,
    pub events: Vec<CalendarEvent>,
    pub custom_statuses: Vec<StatusDefinition>,
    pub daily_plan: Option<DailyPlan>,
    /// Fields owned by other parts of the app (academic years, theme, ...)
    /// carried through load/save untouched so a whole-document replace
    /// never loses them.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for TrackerDocument {
    fn default() -> Self {
        Self {
            university_name: "My University".to_string(),
            classes: Vec::new(),
            assignments: Vec::new(),
            events: Vec::new(),
            custom_statuses: Vec::new(),
            daily_plan: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// A computed grade for a single class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSummary {
    pub percent: f64,
    pub letter: String,
    pub gpa: f64,
    pub earned_points: f64,
    pub total_points: f64,
}

impl GradeSummary {
    /// Neutral result for a class id that does not resolve.
    pub fn not_applicable() -> Self {
        Self {
            percent: 0.0,
            letter: "N/A".to_string(),
            gpa: 0.0,
            earned_points: 0.0,
            total_points: 0.0,
        }
    }
}

/// Type of calendar day cell for explicit rendering logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarDayType {
    /// Empty padding cell before the first day of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
}

/// A single cell in a month-grid calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// Day of month (0 for padding cells)
    pub day: u32,
    pub assignments: Vec<Assignment>,
    pub events: Vec<CalendarEvent>,
    pub day_type: CalendarDayType,
}

/// A calendar month with its day cells in grid order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub month: u32,
    pub year: i32,
    pub days: Vec<CalendarDay>,
    /// Weekday of the 1st (0 = Sunday .. 6 = Saturday)
    pub first_day_of_week: u32,
}

/// Count of assignments in one status, for the report view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub id: String,
    pub label: String,
    pub count: usize,
}

/// One class row in the report's grade breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassGradeRow {
    pub class_id: String,
    pub name: String,
    pub code: String,
    pub credits: f64,
    pub percent: f64,
    pub letter: String,
}

/// One line of the report's assignment log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentLogEntry {
    pub due_date: Option<NaiveDate>,
    pub class_code: String,
    pub name: String,
    pub grade: f64,
    pub total: f64,
}

/// The full computed performance report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub university_name: String,
    pub cumulative_gpa: f64,
    pub total_credits: f64,
    pub assignment_count: usize,
    pub completed_count: usize,
    /// `completed_count / assignment_count`, rounded to whole percent
    pub completion_percent: u32,
    pub status_counts: Vec<StatusCount>,
    pub class_breakdown: Vec<ClassGradeRow>,
    pub assignment_log: Vec<AssignmentLogEntry>,
}

static DEFAULT_GRADING_SCALE: Lazy<Vec<ScaleEntry>> = Lazy::new(|| {
    vec![
        ScaleEntry::new("A", 93.0, 4.0),
        ScaleEntry::new("A-", 90.0, 3.7),
        ScaleEntry::new("B+", 87.0, 3.3),
        ScaleEntry::new("B", 83.0, 3.0),
        ScaleEntry::new("B-", 80.0, 2.7),
        ScaleEntry::new("C+", 77.0, 2.3),
        ScaleEntry::new("C", 73.0, 2.0),
        ScaleEntry::new("C-", 70.0, 1.7),
        ScaleEntry::new("D+", 67.0, 1.3),
        ScaleEntry::new("D", 62.0, 1.0),
        ScaleEntry::new("D-", 60.0, 0.7),
        ScaleEntry::new("F", 0.0, 0.0),
    ]
});

static DEFAULT_STATUS_DEFINITIONS: Lazy<Vec<StatusDefinition>> = Lazy::new(|| {
    vec![
        StatusDefinition::new("TODO", "To Do", false),
        StatusDefinition::new("IN_PROGRESS", "In Progress", false),
        StatusDefinition::new("TURNED_IN", "Turned In", true),
        StatusDefinition::new("GRADED", "Graded", true),
    ]
});

/// The built-in 12-tier grading scale, used when a class has none.
pub fn default_grading_scale() -> &'static [ScaleEntry] {
    &DEFAULT_GRADING_SCALE
}

/// The built-in status taxonomy, overridable per document.
pub fn default_status_definitions() -> &'static [StatusDefinition] {
    &DEFAULT_STATUS_DEFINITIONS
}

pub mod lenient {
    //! Centralized "parse or zero" coercion for stored fields.
    //!
    //! Earlier versions of the app persisted numeric fields as the raw
    //! strings typed into form inputs, and dates as plain `YYYY-MM-DD`
    //! strings. Readers must accept numbers, numeric strings, or junk;
    //! anything unreadable coerces to zero (or `None` for dates) instead
    //! of failing the whole document.

    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn coerce_f64(value: &Value) -> f64 {
        match value {
            Value::Number(number) => number.as_f64().unwrap_or(0.0),
            Value::String(text) => text.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_f64(&value))
    }

    pub fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let number = coerce_f64(&value);
        if number.is_finite() && number > 0.0 {
            Ok(number as u32)
        } else {
            Ok(0)
        }
    }

    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        })
    }

    pub fn date_or_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok(),
            _ => None,
        })
    }
}
