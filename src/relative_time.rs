//! Human "time ago" labels for item cards.

use crate::models::{Item, ItemKind};
use chrono::{DateTime, Utc};

pub const NEVER_COMPLETED: &str = "Never completed";
pub const NEVER_UPDATED: &str = "Never updated";

const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2_520;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

pub fn placeholder(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Task => NEVER_COMPLETED,
        ItemKind::Tracking => NEVER_UPDATED,
    }
}

pub fn relative_label(kind: ItemKind, last_activity: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match last_activity {
        Some(at) => format_distance(at, now),
        None => placeholder(kind).to_string(),
    }
}

pub fn item_label(item: &Item, now: DateTime<Utc>) -> String {
    relative_label(item.kind, item.last_activity, now)
}

/// Distance between `at` and `now` with a direction suffix: "3 days ago" or
/// "in 5 minutes".
pub fn format_distance(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - at).num_seconds();
    let minutes = (seconds.unsigned_abs() as f64 / 60.0).round() as i64;
    let phrase = distance_phrase(minutes);
    if seconds >= 0 {
        format!("{phrase} ago")
    } else {
        format!("in {phrase}")
    }
}

fn distance_phrase(minutes: i64) -> String {
    match minutes {
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        m if m < 45 => format!("{m} minutes"),
        m if m < 90 => "about 1 hour".to_string(),
        m if m < MINUTES_IN_DAY => format!("about {} hours", rounded_div(m, 60)),
        m if m < MINUTES_IN_ALMOST_TWO_DAYS => "1 day".to_string(),
        m if m < MINUTES_IN_MONTH => format!("{} days", rounded_div(m, MINUTES_IN_DAY)),
        m if m < MINUTES_IN_TWO_MONTHS => {
            plural("about", rounded_div(m, MINUTES_IN_MONTH), "month")
        }
        m if m / MINUTES_IN_MONTH < 12 => {
            format!("{} months", rounded_div(m, MINUTES_IN_MONTH))
        }
        m => {
            let months = m / MINUTES_IN_MONTH;
            let years = months / 12;
            match months % 12 {
                0..=2 => plural("about", years, "year"),
                3..=8 => plural("over", years, "year"),
                _ => plural("almost", years + 1, "year"),
            }
        }
    }
}

fn rounded_div(value: i64, unit: i64) -> i64 {
    (value as f64 / unit as f64).round() as i64
}

fn plural(prefix: &str, count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{prefix} 1 {unit}")
    } else {
        format!("{prefix} {count} {unit}s")
    }
}
