use crate::models::Item;
use crate::relative_time::item_label;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub const LABEL_REFRESH: Duration = Duration::from_secs(60);

/// Relative-time label per item id.
pub type Labels = BTreeMap<String, String>;

pub fn compute_labels(items: &[Item], now: DateTime<Utc>) -> Labels {
    items
        .iter()
        .map(|item| (item.id.clone(), item_label(item, now)))
        .collect()
}

/// One periodic tick that recomputes the labels of every displayed item.
/// The tick only runs while at least one item is displayed.
pub struct LabelTicker {
    period: Duration,
    items_tx: watch::Sender<Vec<Item>>,
    labels_tx: Arc<watch::Sender<Labels>>,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl LabelTicker {
    pub fn new(period: Duration) -> Self {
        let (items_tx, _) = watch::channel(Vec::new());
        let (labels_tx, _) = watch::channel(Labels::new());
        Self {
            period,
            items_tx,
            labels_tx: Arc::new(labels_tx),
            handle: None,
            cancel_token: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Labels> {
        self.labels_tx.subscribe()
    }

    pub fn labels(&self) -> Labels {
        self.labels_tx.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Replaces the displayed items and refreshes their labels right away.
    /// Must be called from within a tokio runtime.
    pub fn display(&mut self, items: Vec<Item>) {
        self.labels_tx.send_replace(compute_labels(&items, Utc::now()));
        let empty = items.is_empty();
        self.items_tx.send_replace(items);

        if empty {
            self.stop();
        } else if self.handle.is_none() {
            self.start();
        }
    }

    pub fn stop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        if self.handle.take().is_some() {
            debug!("label ticker stopped");
        }
    }

    fn start(&mut self) {
        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(label_loop(
            self.period,
            self.items_tx.subscribe(),
            Arc::clone(&self.labels_tx),
            cancel_token.clone(),
        ));
        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        debug!("label ticker started");
    }
}

impl Drop for LabelTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn label_loop(
    period: Duration,
    items: watch::Receiver<Vec<Item>>,
    labels: Arc<watch::Sender<Labels>>,
    cancel_token: CancellationToken,
) {
    let mut ticker = time::interval_at(time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let fresh = compute_labels(&items.borrow(), Utc::now());
                labels.send_replace(fresh);
            }
            _ = cancel_token.cancelled() => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemKind, NewItem, Sample};

    fn item(id: &str, kind: ItemKind, touched: bool) -> Item {
        let mut item = Item::new(
            id.into(),
            NewItem {
                name: id.into(),
                target: 7,
                kind,
                description: String::new(),
            },
            Utc::now(),
        );
        if touched {
            item.push_sample(Sample {
                timestamp: Utc::now(),
                value: 1.0,
                note: None,
                previous_value: None,
            });
        }
        item
    }

    #[tokio::test(start_paused = true)]
    async fn display_computes_labels_and_starts_one_tick() {
        let mut ticker = LabelTicker::new(LABEL_REFRESH);
        ticker.display(vec![
            item("a", ItemKind::Task, false),
            item("b", ItemKind::Tracking, false),
            item("c", ItemKind::Task, true),
        ]);

        assert!(ticker.is_running());
        let labels = ticker.labels();
        assert_eq!(labels["a"], "Never completed");
        assert_eq!(labels["b"], "Never updated");
        assert_eq!(labels["c"], "less than a minute ago");
    }

    #[tokio::test(start_paused = true)]
    async fn tick_republishes_labels() {
        let mut ticker = LabelTicker::new(LABEL_REFRESH);
        let mut rx = ticker.subscribe();
        ticker.display(vec![item("a", ItemKind::Task, false)]);
        rx.borrow_and_update();

        time::timeout(LABEL_REFRESH * 2, rx.changed())
            .await
            .expect("tick did not fire")
            .unwrap();
        assert_eq!(rx.borrow()["a"], "Never completed");
    }

    #[tokio::test(start_paused = true)]
    async fn displaying_nothing_cancels_the_tick() {
        let mut ticker = LabelTicker::new(LABEL_REFRESH);
        ticker.display(vec![item("a", ItemKind::Task, false)]);
        assert!(ticker.is_running());

        ticker.display(Vec::new());
        assert!(!ticker.is_running());
        assert!(ticker.labels().is_empty());
    }
}
