//! Period selection for filtering transactions by date range

use chrono::{Datelike, Days, Months, NaiveDate};
use ledgerdash_config::Period;
use serde::{Deserialize, Serialize};

/// Inclusive date range; `None` on a side means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub const UNBOUNDED: DateRange = DateRange { start: None, end: None };

    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Check if a date is within the range
    pub fn contains(&self, date: &NaiveDate) -> bool {
        match (self.start, self.end) {
            (None, None) => true,
            (Some(s), None) => *date >= s,
            (None, Some(e)) => *date <= e,
            (Some(s), Some(e)) => *date >= s && *date <= e,
        }
    }
}

/// A period selector together with the dates a custom period needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeContext {
    pub period: Period,
    /// Custom start date (when period is Custom)
    pub custom_start: Option<NaiveDate>,
    /// Custom end date (when period is Custom)
    pub custom_end: Option<NaiveDate>,
}

impl Default for TimeContext {
    fn default() -> Self {
        Self::new(Period::CurrentMonth)
    }
}

impl TimeContext {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            custom_start: None,
            custom_end: None,
        }
    }

    /// Create with custom date range. No normalization: start > end matches nothing.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            period: Period::Custom,
            custom_start: Some(start),
            custom_end: Some(end),
        }
    }

    /// Resolve the selector against the given reference date
    pub fn range(&self, today: NaiveDate) -> DateRange {
        match self.period {
            Period::CurrentMonth => month_range(first_of_month(today)),
            Period::PreviousMonth => {
                let start = first_of_month(today)
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(today);
                month_range(start)
            }
            Period::CurrentYear => DateRange {
                start: NaiveDate::from_ymd_opt(today.year(), 1, 1),
                end: NaiveDate::from_ymd_opt(today.year(), 12, 31),
            },
            // The day exactly one year back is excluded
            Period::Trailing12Months => DateRange {
                start: today
                    .checked_sub_months(Months::new(12))
                    .and_then(|d| d.checked_add_days(Days::new(1))),
                end: Some(today),
            },
            Period::AllTime => DateRange::UNBOUNDED,
            Period::Custom => DateRange {
                start: self.custom_start,
                end: self.custom_end,
            },
        }
    }

    /// Check if a date falls inside the resolved range
    pub fn contains(&self, date: &NaiveDate, today: NaiveDate) -> bool {
        self.range(today).contains(date)
    }

    /// Get a human-readable description of the period
    pub fn description(&self) -> String {
        match self.period {
            Period::CurrentMonth => "Current Month".to_string(),
            Period::PreviousMonth => "Previous Month".to_string(),
            Period::CurrentYear => "Current Year".to_string(),
            Period::Trailing12Months => "Last 12 Months".to_string(),
            Period::AllTime => "All Time".to_string(),
            Period::Custom => {
                if let (Some(start), Some(end)) = (self.custom_start, self.custom_end) {
                    format!("{} to {}", start, end)
                } else {
                    "Custom Range".to_string()
                }
            }
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_range(first: NaiveDate) -> DateRange {
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(first);
    DateRange::new(first, last)
}

/// Time filtering trait
pub trait TimeFilter {
    /// Check whether the item falls inside the resolved range
    fn filter_by_time(&self, range: &DateRange) -> bool;
}

impl TimeFilter for super::Transaction {
    fn filter_by_time(&self, range: &DateRange) -> bool {
        if range.is_unbounded() {
            return true;
        }
        // Unparsable dates never match a bounded range
        match self.date_naive() {
            Some(date) => range.contains(&date),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_month() {
        let range = TimeContext::new(Period::CurrentMonth).range(date(2024, 2, 14));
        assert_eq!(range, DateRange::new(date(2024, 2, 1), date(2024, 2, 29)));
    }

    #[test]
    fn test_current_month_december() {
        let range = TimeContext::new(Period::CurrentMonth).range(date(2023, 12, 31));
        assert_eq!(range, DateRange::new(date(2023, 12, 1), date(2023, 12, 31)));
    }

    #[test]
    fn test_previous_month_wraps_january() {
        let range = TimeContext::new(Period::PreviousMonth).range(date(2024, 1, 10));
        assert_eq!(range, DateRange::new(date(2023, 12, 1), date(2023, 12, 31)));
    }

    #[test]
    fn test_current_year() {
        let range = TimeContext::new(Period::CurrentYear).range(date(2024, 6, 30));
        assert_eq!(range, DateRange::new(date(2024, 1, 1), date(2024, 12, 31)));
    }

    #[test]
    fn test_trailing_12_months_clamps_day() {
        let range = TimeContext::new(Period::Trailing12Months).range(date(2024, 2, 29));
        assert_eq!(range, DateRange::new(date(2023, 3, 1), date(2024, 2, 29)));
    }

    #[test]
    fn test_trailing_12_months_excludes_year_ago_day() {
        let ctx = TimeContext::new(Period::Trailing12Months);
        let today = date(2024, 5, 10);
        assert!(!ctx.contains(&date(2023, 5, 10), today));
        assert!(ctx.contains(&date(2023, 5, 11), today));
        assert!(ctx.contains(&today, today));
        assert!(!ctx.contains(&date(2024, 5, 11), today));
    }

    #[test]
    fn test_all_time_unbounded() {
        let range = TimeContext::new(Period::AllTime).range(date(2024, 1, 1));
        assert!(range.is_unbounded());
        assert!(range.contains(&date(1990, 1, 1)));
    }

    #[test]
    fn test_custom_inverted_matches_nothing() {
        let ctx = TimeContext::custom(date(2024, 3, 31), date(2024, 3, 1));
        let today = date(2024, 5, 1);
        assert!(!ctx.contains(&date(2024, 3, 15), today));
        assert!(!ctx.contains(&date(2024, 3, 1), today));
        assert_eq!(ctx.description(), "2024-03-31 to 2024-03-01");
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 31));
        assert!(range.contains(&date(2024, 3, 1)));
        assert!(range.contains(&date(2024, 3, 31)));
        assert!(!range.contains(&date(2024, 4, 1)));
    }
}
