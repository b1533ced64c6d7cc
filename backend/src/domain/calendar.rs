//! Calendar domain logic for the grade tracker.
//!
//! Builds the month-grid data behind the calendar view: assignments and
//! events grouped onto their dates, with padding cells so the grid starts
//! on the right weekday. Rendering is the caller's concern; all date
//! computation lives here.

use chrono::{Datelike, NaiveDate};
use log::debug;
use shared::{CalendarDay, CalendarDayType, CalendarMonth, TrackerDocument};

/// Calendar service that handles all calendar-related computation.
#[derive(Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    /// Create a new CalendarService instance.
    pub fn new() -> Self {
        Self
    }

    /// Generate a calendar month view with each day's assignments and
    /// events attached.
    pub fn generate_calendar_month(
        &self,
        month: u32,
        year: i32,
        document: &TrackerDocument,
    ) -> CalendarMonth {
        let days_in_month = self.days_in_month(month, year);
        let first_day = self.first_day_of_month(month, year);

        debug!(
            "Generating calendar for {}/{}: {} days, first weekday {}",
            month, year, days_in_month, first_day
        );

        let mut calendar_days = Vec::with_capacity((first_day + days_in_month) as usize);

        for _ in 0..first_day {
            calendar_days.push(CalendarDay {
                day: 0,
                assignments: Vec::new(),
                events: Vec::new(),
                day_type: CalendarDayType::PaddingBefore,
            });
        }

        for day in 1..=days_in_month {
            let date = NaiveDate::from_ymd_opt(year, month, day);

            let assignments = document
                .assignments
                .iter()
                .filter(|assignment| assignment.due_date == date && date.is_some())
                .cloned()
                .collect();
            let events = document
                .events
                .iter()
                .filter(|event| event.date == date && date.is_some())
                .cloned()
                .collect();

            calendar_days.push(CalendarDay {
                day,
                assignments,
                events,
                day_type: CalendarDayType::MonthDay,
            });
        }

        CalendarMonth {
            month,
            year,
            days: calendar_days,
            first_day_of_week: first_day,
        }
    }

    /// Get the number of days in a given month and year.
    pub fn days_in_month(&self, month: u32, year: i32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year.
    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the weekday of the first of the month (0 = Sunday .. 6 =
    /// Saturday). Invalid month/year combinations fall back to Sunday.
    pub fn first_day_of_month(&self, month: u32, year: i32) -> u32 {
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(date) => date.weekday().num_days_from_sunday(),
            None => 0,
        }
    }

    /// Human-readable month name.
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "Invalid Month",
        }
    }
}
