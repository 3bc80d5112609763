use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Time bucket a leaderboard is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsGranularity {
    Days,
    Weeks,
    Months,
    Years,
}

impl StatsGranularity {
    /// Storage and display name, e.g. `"weeks"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatsGranularity::Days => "days",
            StatsGranularity::Weeks => "weeks",
            StatsGranularity::Months => "months",
            StatsGranularity::Years => "years",
        }
    }

    /// The `interval` query value understood by the analytics API.
    #[must_use]
    pub fn interval(self) -> &'static str {
        match self {
            StatsGranularity::Days => "day",
            StatsGranularity::Weeks => "week",
            StatsGranularity::Months => "month",
            StatsGranularity::Years => "year",
        }
    }

    /// The current period containing `today`: from the first day of the
    /// period at midnight through the last second of `today`.
    #[must_use]
    pub fn current_period(self, today: NaiveDate) -> DateRange {
        let start = match self {
            StatsGranularity::Days => today,
            StatsGranularity::Weeks => {
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
            }
            StatsGranularity::Months => today.with_day(1).unwrap_or(today),
            StatsGranularity::Years => today.with_ordinal(1).unwrap_or(today),
        };
        DateRange {
            start: start.and_time(NaiveTime::MIN),
            end: today.and_time(end_of_day()),
        }
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

impl std::fmt::Display for StatsGranularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StatsGranularity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "days" | "day" => Ok(StatsGranularity::Days),
            "weeks" | "week" => Ok(StatsGranularity::Weeks),
            "months" | "month" => Ok(StatsGranularity::Months),
            "years" | "year" => Ok(StatsGranularity::Years),
            other => Err(CoreError::InvalidGranularity(other.to_string())),
        }
    }
}

/// Inclusive reporting window sent to the analytics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Formats a bound the way the analytics API expects (`YYYY-MM-DDTHH:MM:SS`).
    #[must_use]
    pub fn format_bound(bound: NaiveDateTime) -> String {
        bound.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// A single entry of the product leaderboard.
///
/// Identity is `(site_id, granularity, product_id)`; the leaderboard for one
/// `(site_id, granularity)` pair is replaced as a whole on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformerProduct {
    pub site_id: i64,
    pub granularity: StatsGranularity,
    pub product_id: i64,
    pub product_name: Option<String>,
    /// Currency symbol as rendered by the store, e.g. `"$"`.
    pub currency: Option<String>,
    /// Items sold in the period.
    pub quantity: Option<i64>,
    /// Net revenue in the period.
    pub total: Option<f64>,
}
