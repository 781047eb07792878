use crate::models::Sample;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub const CHOICES: [TimeWindow; 4] = [Self::Week, Self::Month, Self::Year, Self::All];

    pub fn days(self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::Year => Some(365),
            Self::All => None,
        }
    }

    /// Earliest timestamp inside the window, or `None` when unbounded.
    pub fn start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.days().map(|days| now - Duration::days(days))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::CHOICES
            .into_iter()
            .find(|window| window.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown window '{value}' (expected week, month, year or all)"))
    }
}

/// Returns the trailing part of a chronologically ordered history that falls
/// inside `window`.
pub fn filter_window(history: &[Sample], window: TimeWindow, now: DateTime<Utc>) -> &[Sample] {
    match window.start(now) {
        None => history,
        Some(start) => {
            let first_inside = history.partition_point(|sample| sample.timestamp < start);
            &history[first_inside..]
        }
    }
}
