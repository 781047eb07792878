use crate::chart::{chart_for, ChartSeries};
use crate::models::{Item, ItemKind};
use crate::relative_time::item_label;
use crate::stats::{build_stats_at, ItemStats};
use crate::urgency::{tint, urgency};
use crate::window::{filter_window, TimeWindow};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything a front end needs to draw one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub target: u32,
    pub target_label: String,
    pub urgency: f64,
    pub tint: String,
    pub label: String,
    pub window: TimeWindow,
    pub stats: ItemStats,
    pub chart: ChartSeries,
}

pub fn target_label(kind: ItemKind, target: u32) -> String {
    match kind {
        ItemKind::Task => format!("Goal: {target} days"),
        ItemKind::Tracking => format!("Max: {target} items"),
    }
}

pub fn build_card(item: &Item, window: TimeWindow, now: DateTime<Utc>) -> ItemCard {
    let urgency = urgency(item.last_activity, now);
    let samples = filter_window(&item.history, window, now);

    ItemCard {
        id: item.id.clone(),
        name: item.name.clone(),
        description: item.description.clone(),
        kind: item.kind,
        target: item.target,
        target_label: target_label(item.kind, item.target),
        urgency,
        tint: tint(urgency),
        label: item_label(item, now),
        window,
        stats: build_stats_at(now, item, window),
        chart: chart_for(item.kind, samples),
    }
}

pub fn build_cards(items: &[Item], window: TimeWindow) -> Vec<ItemCard> {
    build_cards_at(Utc::now(), items, window)
}

pub fn build_cards_at(now: DateTime<Utc>, items: &[Item], window: TimeWindow) -> Vec<ItemCard> {
    items.iter().map(|item| build_card(item, window, now)).collect()
}
