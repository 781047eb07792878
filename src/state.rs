use crate::errors::AppError;
use crate::models::AppData;
use crate::storage::persist_data;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Runs `apply` against a copy of the store and swaps it in once the copy
    /// is on disk. The lock is held throughout, so writers never interleave
    /// and a failed write leaves memory as it was.
    pub async fn mutate<T, E>(&self, apply: impl FnOnce(&mut AppData) -> Result<T, E>) -> Result<T, AppError>
    where
        AppError: From<E>,
    {
        let mut data = self.data.lock().await;
        let mut draft = data.clone();
        let result = apply(&mut draft)?;
        persist_data(&self.data_path, &draft).await?;
        *data = draft;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemKind, NewItem};
    use axum::http::StatusCode;
    use chrono::Utc;

    fn new_task() -> NewItem {
        NewItem::parse("Dishes", "1", ItemKind::Task).unwrap()
    }

    #[tokio::test]
    async fn failed_write_leaves_the_store_untouched() {
        let mut path = std::env::temp_dir();
        path.push(format!("chore_tracker_missing_{}", std::process::id()));
        path.push("nested");
        path.push("state.json");
        let state = AppState::new(path, AppData::default());

        let err = state
            .mutate(|data| Ok::<_, AppError>(data.create_item(new_task(), Utc::now())))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(state.data.lock().await.items.is_empty());
    }

    #[tokio::test]
    async fn successful_write_is_visible_in_memory() {
        let mut path = std::env::temp_dir();
        path.push(format!("chore_tracker_state_{}.json", std::process::id()));
        let state = AppState::new(path.clone(), AppData::default());

        let item = state
            .mutate(|data| Ok::<_, AppError>(data.create_item(new_task(), Utc::now())))
            .await
            .unwrap();

        assert!(state.data.lock().await.items.contains_key(&item.id));
        let _ = std::fs::remove_file(path);
    }
}
