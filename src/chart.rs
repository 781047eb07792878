//! Renderer-agnostic chart series. Coordinates are normalized to `[0, 1]`
//! with `y = 0` at the bottom of the plot.

use crate::models::{ItemKind, Sample};
use crate::stats::completion_intervals;
use chrono::{DateTime, Utc};
use serde::Serialize;

const MAX_HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub y_min: f64,
    pub y_max: f64,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start_hours: f64,
    pub end_hours: f64,
    pub count: usize,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSeries {
    Line(LineSeries),
    Histogram(Histogram),
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Line(series) => series.points.is_empty(),
            Self::Histogram(histogram) => histogram.bins.is_empty(),
        }
    }
}

pub fn chart_for(kind: ItemKind, samples: &[Sample]) -> ChartSeries {
    match kind {
        ItemKind::Tracking => ChartSeries::Line(line_series(samples)),
        ItemKind::Task => ChartSeries::Histogram(interval_histogram(&completion_intervals(samples))),
    }
}

pub fn line_series(samples: &[Sample]) -> LineSeries {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return LineSeries {
            y_min: 0.0,
            y_max: 0.0,
            points: Vec::new(),
        };
    };

    let mut y_min = samples.iter().map(|s| s.value).fold(0.0_f64, f64::min);
    let mut y_max = samples.iter().map(|s| s.value).fold(0.0_f64, f64::max);
    if y_min == y_max {
        y_min -= 1.0;
        y_max += 1.0;
    }
    let y_range = y_max - y_min;

    let span_ms = (last.timestamp - first.timestamp).num_milliseconds();
    let points = samples
        .iter()
        .map(|sample| {
            let x = if span_ms == 0 {
                0.5
            } else {
                (sample.timestamp - first.timestamp).num_milliseconds() as f64 / span_ms as f64
            };
            LinePoint {
                timestamp: sample.timestamp,
                value: sample.value,
                x,
                y: (sample.value - y_min) / y_range,
            }
        })
        .collect();

    LineSeries { y_min, y_max, points }
}

/// Buckets interval lengths (hours) into `ceil(sqrt(n))` equal-width bins.
pub fn interval_histogram(intervals: &[f64]) -> Histogram {
    if intervals.is_empty() {
        return Histogram { bins: Vec::new() };
    }

    let min = intervals.iter().copied().fold(f64::INFINITY, f64::min);
    let max = intervals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bin_count = if max > min {
        ((intervals.len() as f64).sqrt().ceil() as usize).clamp(1, MAX_HISTOGRAM_BINS)
    } else {
        1
    };
    let width = (max - min) / bin_count as f64;

    let mut counts = vec![0usize; bin_count];
    for value in intervals {
        let index = if width > 0.0 {
            (((value - min) / width).floor() as usize).min(bin_count - 1)
        } else {
            0
        };
        counts[index] += 1;
    }

    let tallest = counts.iter().copied().max().unwrap_or(1).max(1) as f64;
    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| HistogramBin {
            start_hours: min + width * index as f64,
            end_hours: if index + 1 == bin_count {
                max
            } else {
                min + width * (index + 1) as f64
            },
            count,
            height: count as f64 / tallest,
        })
        .collect();

    Histogram { bins }
}
