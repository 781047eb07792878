use crate::models::{AppData, ExportSnapshot, Item, ItemKind, NewItem, Sample};
use crate::validation::{validate_value, ValidationError};
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("item not found: {0}")]
    NotFound(String),
    #[error("cannot {action} a {kind} item")]
    WrongKind { action: &'static str, kind: ItemKind },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl AppData {
    /// Items ordered by creation time.
    pub fn list(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.values().cloned().collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        items
    }

    pub fn get(&self, id: &str) -> Result<&Item, ItemError> {
        self.items.get(id).ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    pub fn create_item(&mut self, new: NewItem, now: DateTime<Utc>) -> Item {
        let id = Uuid::new_v4().to_string();
        let item = Item::new(id.clone(), new, now);
        info!(id = %item.id, kind = %item.kind, "created '{}'", item.name);
        self.items.insert(id, item.clone());
        item
    }

    /// Appends a completion sample. The streak grows when the completion
    /// lands within `target` days of the previous one and restarts otherwise.
    pub fn complete_task(
        &mut self,
        id: &str,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Item, ItemError> {
        let item = self.item_mut(id, ItemKind::Task, "complete")?;

        let on_time = item
            .last_activity
            .is_some_and(|last| now - last <= Duration::days(i64::from(item.target)));
        item.streak = if on_time { item.streak.saturating_add(1) } else { 1 };
        item.push_sample(Sample {
            timestamp: now,
            value: 1.0,
            note: clean_note(note),
            previous_value: None,
        });

        info!(id = %item.id, streak = item.streak, "completed '{}'", item.name);
        Ok(item.clone())
    }

    pub fn log_value(
        &mut self,
        id: &str,
        value: f64,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Item, ItemError> {
        let value = validate_value(value)?;
        let item = self.item_mut(id, ItemKind::Tracking, "log a value for")?;
        let previous_value = item.latest_value();
        item.push_sample(Sample {
            timestamp: now,
            value,
            note: clean_note(note),
            previous_value,
        });

        info!(id = %item.id, value, "updated '{}'", item.name);
        Ok(item.clone())
    }

    pub fn export(&self, now: DateTime<Utc>) -> ExportSnapshot {
        let (tasks, tracking_items): (Vec<Item>, Vec<Item>) =
            self.list().into_iter().partition(Item::is_task);
        ExportSnapshot {
            tasks,
            tracking_items,
            export_date: now,
        }
    }

    fn item_mut(
        &mut self,
        id: &str,
        expected: ItemKind,
        action: &'static str,
    ) -> Result<&mut Item, ItemError> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
        if item.kind != expected {
            return Err(ItemError::WrongKind {
                action,
                kind: item.kind,
            });
        }
        Ok(item)
    }
}

fn clean_note(note: Option<String>) -> Option<String> {
    note.map(|note| note.trim().to_string()).filter(|note| !note.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 3, 7, 0, 0).unwrap()
    }

    fn new_item(name: &str, target: u32, kind: ItemKind) -> NewItem {
        NewItem {
            name: name.into(),
            target,
            kind,
            description: String::new(),
        }
    }

    #[test]
    fn created_items_get_unique_ids_and_empty_history() {
        let mut data = AppData::default();
        let a = data.create_item(new_item("Dishes", 1, ItemKind::Task), now());
        let b = data.create_item(new_item("Weight", 90, ItemKind::Tracking), now());
        assert_ne!(a.id, b.id);
        assert!(a.history.is_empty());
        assert_eq!(a.last_activity, None);
        assert_eq!(data.list().len(), 2);
    }

    #[test]
    fn streak_counts_on_time_completions_and_resets_when_late() {
        let mut data = AppData::default();
        let id = data.create_item(new_item("Laundry", 3, ItemKind::Task), now()).id;

        let first = data.complete_task(&id, None, now()).unwrap();
        assert_eq!(first.streak, 1);
        let second = data.complete_task(&id, None, now() + Duration::days(2)).unwrap();
        assert_eq!(second.streak, 2);
        let late = data.complete_task(&id, None, now() + Duration::days(10)).unwrap();
        assert_eq!(late.streak, 1);

        assert_eq!(late.history.len(), 3);
        assert_eq!(late.last_activity, Some(now() + Duration::days(10)));
    }

    #[test]
    fn logging_values_keeps_last_activity_in_sync() {
        let mut data = AppData::default();
        let id = data.create_item(new_item("Water", 8, ItemKind::Tracking), now()).id;
        data.log_value(&id, 2.0, Some(" morning ".into()), now()).unwrap();
        let item = data
            .log_value(&id, 4.0, Some("   ".into()), now() + Duration::hours(4))
            .unwrap();

        assert_eq!(item.latest_value(), Some(4.0));
        assert_eq!(item.last_activity, item.history.last().map(|s| s.timestamp));
        assert_eq!(item.history[0].note.as_deref(), Some("morning"));
        assert_eq!(item.history[1].note, None);
        assert_eq!(item.history[0].previous_value, None);
        assert_eq!(item.history[1].previous_value, Some(2.0));
    }

    #[test]
    fn actions_check_kind_and_existence() {
        let mut data = AppData::default();
        let task = data.create_item(new_item("Mop", 7, ItemKind::Task), now()).id;
        let tracker = data.create_item(new_item("Steps", 10, ItemKind::Tracking), now()).id;

        assert!(matches!(
            data.log_value(&task, 1.0, None, now()),
            Err(ItemError::WrongKind { .. })
        ));
        assert!(matches!(
            data.complete_task(&tracker, None, now()),
            Err(ItemError::WrongKind { .. })
        ));
        assert!(matches!(
            data.complete_task("missing", None, now()),
            Err(ItemError::NotFound(_))
        ));
        assert!(matches!(
            data.log_value(&tracker, -1.0, None, now()),
            Err(ItemError::Invalid(ValidationError::NonPositiveValue))
        ));
    }

    #[test]
    fn export_splits_items_by_kind() {
        let mut data = AppData::default();
        data.create_item(new_item("Mop", 7, ItemKind::Task), now());
        data.create_item(new_item("Steps", 10, ItemKind::Tracking), now());
        let snapshot = data.export(now());
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.tracking_items.len(), 1);
        assert_eq!(snapshot.export_date, now());
    }
}
