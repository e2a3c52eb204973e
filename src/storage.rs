use crate::errors::AppError;
use crate::models::JournalData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

pub async fn load_data(path: &Path) -> JournalData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<JournalData>(&bytes) {
            Ok(data) => {
                info!(entries = data.entries.len(), "loaded journal from {}", path.display());
                data
            }
            Err(err) => {
                error!("failed to parse journal file: {err}");
                JournalData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => JournalData::default(),
        Err(err) => {
            error!("failed to read journal file: {err}");
            JournalData::default()
        }
    }
}

/// Writes the journal to a sibling file and renames it over `path`, so a
/// failed write never leaves a truncated journal behind.
pub async fn persist_data(path: &Path, data: &JournalData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let staging = staging_path(path);
    fs::write(&staging, payload).await.map_err(AppError::internal)?;
    if let Err(err) = fs::rename(&staging, path).await {
        let _ = fs::remove_file(&staging).await;
        return Err(AppError::internal(err));
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "journal.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoredEntry;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("mood_journal_{}_{name}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn missing_file_loads_empty_journal() {
        let data = load_data(&temp_path("missing")).await;
        assert!(data.entries.is_empty());
        assert_eq!(data.next_id, 0);
    }

    #[tokio::test]
    async fn persisted_journal_loads_back() {
        let path = temp_path("persist");
        let data = JournalData {
            next_id: 2,
            entries: vec![StoredEntry {
                id: 1,
                user_alias: "river".into(),
                entry_text: "calm morning".into(),
                emotion_label: "joy".into(),
                emotion_scores: BTreeMap::from([("joy".to_string(), 0.9)]),
                created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            }],
        };

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.next_id, 2);
        assert_eq!(loaded.entries, data.entries);
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty_journal() {
        let path = temp_path("corrupt");
        std::fs::write(&path, b"{ not json").unwrap();
        let loaded = load_data(&path).await;
        let _ = std::fs::remove_file(&path);
        assert!(loaded.entries.is_empty());
    }

    #[tokio::test]
    async fn persist_replaces_existing_journal_without_leftovers() {
        let path = temp_path("replace");
        std::fs::write(&path, b"previous contents").unwrap();

        let data = JournalData {
            next_id: 7,
            entries: Vec::new(),
        };
        persist_data(&path, &data).await.unwrap();

        let loaded = load_data(&path).await;
        let staging_exists = staging_path(&path).exists();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.next_id, 7);
        assert!(!staging_exists);
    }

    #[tokio::test]
    async fn failed_persist_keeps_previous_journal() {
        let path = temp_path("blocked");
        std::fs::write(&path, br#"{"next_id": 3, "entries": []}"#).unwrap();
        // A directory at the staging location makes the write fail.
        std::fs::create_dir_all(staging_path(&path)).unwrap();

        let result = persist_data(&path, &JournalData::default()).await;
        let loaded = load_data(&path).await;
        let _ = std::fs::remove_dir(staging_path(&path));
        let _ = std::fs::remove_file(&path);

        assert!(result.is_err());
        assert_eq!(loaded.next_id, 3);
    }
}
