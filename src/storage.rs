use crate::errors::AppError;
use crate::models::AppData;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!("loaded {} items from {}", data.items.len(), path.display());
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

/// Writes the document next to `path` first and renames it into place so a
/// crash mid-write never leaves a truncated file behind.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, payload).await?;
    fs::rename(&staging, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemKind, NewItem};
    use chrono::Utc;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("chore_tracker_{tag}_{}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn persisted_items_load_back() {
        let path = temp_path("roundtrip");
        let mut data = AppData::default();
        let item = data.create_item(
            NewItem {
                name: "Dust shelves".into(),
                target: 14,
                kind: ItemKind::Task,
                description: String::new(),
            },
            Utc::now(),
        );
        data.complete_task(&item.id, Some("top shelf too".into()), Utc::now())
            .unwrap();

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.items.get(&item.id), data.items.get(&item.id));
    }

    #[tokio::test]
    async fn missing_or_corrupt_files_load_empty() {
        let missing = temp_path("missing");
        let _ = std::fs::remove_file(&missing);
        assert!(load_data(&missing).await.items.is_empty());

        let corrupt = temp_path("corrupt");
        std::fs::write(&corrupt, b"{ not json").unwrap();
        assert!(load_data(&corrupt).await.items.is_empty());
        let _ = std::fs::remove_file(&corrupt);
    }
}
