use std::fmt;

use chrono::{Duration, NaiveDate};

/// Days past today covered by a weekly report.
pub const WEEK_SPAN_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Weekly,
    Daily,
}

impl ReportMode {
    /// Weekly reports still go out when nothing is scheduled, daily ones stay quiet.
    pub fn sends_when_empty(self) -> bool {
        matches!(self, ReportMode::Weekly)
    }

    pub fn range_for(self, today: NaiveDate) -> DateRange {
        match self {
            ReportMode::Weekly => DateRange::week_from(today),
            ReportMode::Daily => DateRange::day(today),
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportMode::Weekly => f.write_str("weekly"),
            ReportMode::Daily => f.write_str("daily"),
        }
    }
}

/// Inclusive date window passed to the schedule lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn week_from(today: NaiveDate) -> Self {
        Self { start: today, end: today + Duration::days(WEEK_SPAN_DAYS) }
    }

    pub fn day(today: NaiveDate) -> Self {
        Self { start: today, end: today }
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}
