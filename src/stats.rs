use crate::models::{Item, ItemKind, Sample};
use crate::window::{filter_window, TimeWindow};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Statistics for a tracking item over one window. `latest` is the most
/// recent reading (last in chronological order). Every optional field is
/// `None` when the window holds no samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingStats {
    pub samples: usize,
    pub latest: Option<f64>,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub trend: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStats {
    pub completions: usize,
    pub mean_interval_hours: Option<f64>,
    pub streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemStats {
    Tracking(TrackingStats),
    Task(TaskStats),
}

impl ItemStats {
    pub fn has_data(&self) -> bool {
        match self {
            Self::Tracking(stats) => stats.samples > 0,
            Self::Task(stats) => stats.completions > 0,
        }
    }
}

pub fn build_stats_at(now: DateTime<Utc>, item: &Item, window: TimeWindow) -> ItemStats {
    let samples = filter_window(&item.history, window, now);
    match item.kind {
        ItemKind::Tracking => ItemStats::Tracking(tracking_stats(samples)),
        ItemKind::Task => ItemStats::Task(task_stats(samples, item.streak)),
    }
}

pub fn tracking_stats(samples: &[Sample]) -> TrackingStats {
    let Some(last) = samples.last() else {
        return TrackingStats {
            samples: 0,
            latest: None,
            average: None,
            min: None,
            max: None,
            trend: None,
        };
    };

    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for sample in samples {
        sum += sample.value;
        min = min.min(sample.value);
        max = max.max(sample.value);
    }

    let trend = match samples {
        [.., previous, latest] => latest.value - previous.value,
        _ => 0.0,
    };

    TrackingStats {
        samples: samples.len(),
        latest: Some(last.value),
        average: Some(sum / samples.len() as f64),
        min: Some(min),
        max: Some(max),
        trend: Some(trend),
    }
}

/// Hours between each pair of consecutive samples.
pub fn completion_intervals(samples: &[Sample]) -> Vec<f64> {
    samples
        .windows(2)
        .map(|pair| (pair[1].timestamp - pair[0].timestamp).num_seconds() as f64 / 3600.0)
        .collect()
}

pub fn task_stats(samples: &[Sample], streak: u32) -> TaskStats {
    let intervals = completion_intervals(samples);
    let mean_interval_hours = if intervals.is_empty() {
        None
    } else {
        Some(intervals.iter().sum::<f64>() / intervals.len() as f64)
    };

    TaskStats {
        completions: samples.len(),
        mean_interval_hours,
        streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewItem;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()
    }

    fn item(kind: ItemKind, points: &[(i64, f64)]) -> Item {
        let mut item = Item::new(
            "id".into(),
            NewItem {
                name: "Item".into(),
                target: 7,
                kind,
                description: String::new(),
            },
            now() - Duration::days(400),
        );
        for (hours_ago, value) in points {
            item.push_sample(Sample {
                timestamp: now() - Duration::hours(*hours_ago),
                value: *value,
                note: None,
                previous_value: None,
            });
        }
        item
    }

    #[test]
    fn tracking_stats_over_three_readings() {
        let item = item(ItemKind::Tracking, &[(72, 10.0), (48, 20.0), (24, 30.0)]);
        let ItemStats::Tracking(stats) = build_stats_at(now(), &item, TimeWindow::All) else {
            panic!("expected tracking stats");
        };
        assert_eq!(stats.samples, 3);
        assert_eq!(stats.average, Some(20.0));
        assert_eq!(stats.trend, Some(10.0));
        assert_eq!(stats.latest, Some(30.0));
        assert_eq!(stats.min, Some(10.0));
        assert_eq!(stats.max, Some(30.0));
    }

    #[test]
    fn single_reading_has_zero_trend() {
        let stats = tracking_stats(&item(ItemKind::Tracking, &[(1, 4.0)]).history);
        assert_eq!(stats.trend, Some(0.0));
        assert_eq!(stats.latest, Some(4.0));
    }

    #[test]
    fn empty_window_reports_no_data_without_nan() {
        let item = item(ItemKind::Tracking, &[(24 * 60, 10.0)]);
        let stats = build_stats_at(now(), &item, TimeWindow::Week);
        assert!(!stats.has_data());
        let ItemStats::Tracking(stats) = stats else {
            panic!("expected tracking stats");
        };
        assert_eq!(stats.samples, 0);
        assert_eq!(stats.latest, None);
        assert_eq!(stats.average, None);
        assert_eq!(stats.trend, None);

        let task = item_with_streak(3);
        let ItemStats::Task(stats) = build_stats_at(now(), &task, TimeWindow::Week) else {
            panic!("expected task stats");
        };
        assert_eq!(stats.completions, 0);
        assert_eq!(stats.mean_interval_hours, None);
        assert_eq!(stats.streak, 3);
    }

    fn item_with_streak(streak: u32) -> Item {
        let mut task = item(ItemKind::Task, &[]);
        task.streak = streak;
        task
    }

    #[test]
    fn task_intervals_are_measured_inside_the_window() {
        let task = item(ItemKind::Task, &[(24 * 20, 1.0), (96, 1.0), (48, 1.0), (12, 1.0)]);
        let ItemStats::Task(stats) = build_stats_at(now(), &task, TimeWindow::Week) else {
            panic!("expected task stats");
        };
        assert_eq!(stats.completions, 3);
        assert_eq!(stats.mean_interval_hours, Some(42.0));
    }

    #[test]
    fn intervals_between_consecutive_samples() {
        let task = item(ItemKind::Task, &[(30, 1.0), (20, 1.0), (5, 1.0)]);
        assert_eq!(completion_intervals(&task.history), vec![10.0, 15.0]);
        assert!(completion_intervals(&task.history[..1]).is_empty());
    }
}
