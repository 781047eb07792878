//! Client-side application state: the list of items a front end displays,
//! plus the operations that change it through an [`ItemService`].

use crate::client::{ClientError, ItemService};
use crate::models::{Item, ItemKind, NewItem};
use crate::validation::parse_value;
use std::future::Future;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Owned view state. A failed or cancelled request leaves `items` untouched
/// and `loading` always ends up `false`.
#[derive(Debug)]
pub struct Board {
    items: Vec<Item>,
    loading: watch::Sender<bool>,
    cancel: CancellationToken,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: watch::Sender::new(false),
            cancel: CancellationToken::new(),
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Follows the loading flag while a request is in flight, e.g. to show a
    /// spinner from another task.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Token that aborts in-flight requests when cancelled, e.g. when the view
    /// is torn down.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn refresh<S: ItemService>(&mut self, service: &S) -> Result<(), ClientError> {
        let items = self.run("fetch items", service.fetch_items()).await?;
        debug!("board refreshed with {} items", items.len());
        self.items = items;
        Ok(())
    }

    /// Validates raw form input and creates the item. Invalid input never
    /// reaches the service.
    pub async fn add<S: ItemService>(
        &mut self,
        service: &S,
        name: &str,
        target: &str,
        kind: ItemKind,
    ) -> Result<&Item, ClientError> {
        let new = NewItem::parse(name, target, kind)?;
        self.add_new(service, new).await
    }

    pub async fn add_new<S: ItemService>(&mut self, service: &S, new: NewItem) -> Result<&Item, ClientError> {
        let created = self.run("create item", service.create_item(&new)).await?;
        self.items.push(created);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Marks a task complete, then re-fetches the list so streaks and history
    /// come from the service.
    pub async fn complete<S: ItemService>(&mut self, service: &S, id: &str) -> Result<(), ClientError> {
        self.run("complete task", service.complete_task(id)).await?;
        self.refresh(service).await
    }

    pub async fn log_value<S: ItemService>(
        &mut self,
        service: &S,
        id: &str,
        raw_value: &str,
    ) -> Result<(), ClientError> {
        let value = parse_value(raw_value)?;
        let updated = self.run("log value", service.log_value(id, value)).await?;
        self.merge(updated);
        Ok(())
    }

    fn merge(&mut self, item: Item) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    async fn run<T>(
        &mut self,
        action: &str,
        request: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<T, ClientError> {
        self.loading.send_replace(true);
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            result = request => result,
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
        };
        self.loading.send_replace(false);
        if let Err(err) = &result {
            warn!("{action} failed: {err}");
        }
        result
    }
}
