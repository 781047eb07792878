use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    #[serde(rename = "task")]
    Task,
    #[serde(rename = "tracking-item", alias = "tracking")]
    Tracking,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task => f.write_str("task"),
            Self::Tracking => f.write_str("tracking-item"),
        }
    }
}

/// One history entry. Task samples always carry `value = 1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Value this sample replaced; only set on tracking updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ItemKind,
    pub target: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub history: Vec<Sample>,
}

impl Item {
    pub fn new(id: String, new: NewItem, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            kind: new.kind,
            target: new.target,
            created_at: now,
            last_activity: None,
            streak: 0,
            history: Vec::new(),
        }
    }

    pub fn is_task(&self) -> bool {
        self.kind == ItemKind::Task
    }

    /// Appends a sample, clamping its timestamp so history never goes
    /// backwards, and keeps `last_activity` pointing at it.
    pub fn push_sample(&mut self, mut sample: Sample) -> &Sample {
        if let Some(last) = self.history.last() {
            if sample.timestamp < last.timestamp {
                sample.timestamp = last.timestamp;
            }
        }
        self.last_activity = Some(sample.timestamp);
        self.history.push(sample);
        &self.history[self.history.len() - 1]
    }

    pub fn latest_value(&self) -> Option<f64> {
        self.history.last().map(|sample| sample.value)
    }
}

/// A validated creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub target: u32,
    pub kind: ItemKind,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub items: BTreeMap<String, Item>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    /// Raw JSON; checked by `target_from_json`.
    #[serde(default, alias = "expected_time")]
    pub target: Value,
    #[serde(default, alias = "item_type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub description: String,
}

impl From<&NewItem> for CreateItemRequest {
    fn from(new: &NewItem) -> Self {
        Self {
            name: new.name.clone(),
            target: Value::from(new.target),
            kind: new.kind,
            description: new.description.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateItemForm {
    pub name: String,
    pub target: String,
    #[serde(default)]
    pub kind: ItemKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteRequest {
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateValueRequest {
    pub value: f64,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogValueForm {
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub tasks: Vec<Item>,
    pub tracking_items: Vec<Item>,
    pub export_date: DateTime<Utc>,
}
