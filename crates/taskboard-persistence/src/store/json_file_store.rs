use crate::migration::Migrator;
use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{FormatVersion, PersistenceMetadata, PersistenceStore, StoreSnapshot};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskboard_core::{TaskboardError, TaskboardResult};
use uuid::Uuid;

/// Data file store. Saves are atomic and legacy files are migrated on load.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
}

/// Top-level layout of a current-format data file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: serde_json::Value,
}

impl JsonEnvelope {
    /// Wrap data written by a fresh instance.
    pub fn new(data: serde_json::Value) -> Self {
        Self::with_metadata(data, PersistenceMetadata::new(Uuid::new_v4()))
    }

    pub fn with_metadata(data: serde_json::Value, metadata: PersistenceMetadata) -> Self {
        Self {
            version: FormatVersion::CURRENT.as_u32(),
            metadata,
            data,
        }
    }

    pub fn empty() -> Self {
        Self::new(serde_json::json!({}))
    }

    pub fn to_json_string(&self) -> TaskboardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TaskboardError::Serialization(e.to_string()))
    }
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_instance_id(path, Uuid::new_v4())
    }

    pub fn with_instance_id(path: impl AsRef<Path>, instance_id: Uuid) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id,
        }
    }
}

#[async_trait::async_trait]
impl PersistenceStore for JsonFileStore {
    async fn save(&self, mut snapshot: StoreSnapshot) -> TaskboardResult<PersistenceMetadata> {
        snapshot.metadata.instance_id = self.instance_id;
        snapshot.metadata.saved_at = chrono::Utc::now();

        let data: serde_json::Value = serde_json::from_slice(&snapshot.data)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
        let envelope = JsonEnvelope::with_metadata(data, snapshot.metadata.clone());
        let json = envelope.to_json_string()?;

        AtomicWriter::write_atomic(&self.path, json.as_bytes()).await?;

        tracing::info!("Saved {} bytes to {}", json.len(), self.path.display());
        Ok(snapshot.metadata)
    }

    async fn load(&self) -> TaskboardResult<(StoreSnapshot, PersistenceMetadata)> {
        let current_version = Migrator::detect_version(&self.path).await?;
        if current_version < FormatVersion::CURRENT {
            tracing::info!(
                "Detected {:?} format at {}. Migrating...",
                current_version,
                self.path.display()
            );
            Migrator::migrate(current_version, FormatVersion::CURRENT, &self.path).await?;
        }

        let file_bytes = AtomicWriter::read_all(&self.path).await?;
        let envelope: JsonEnvelope = serde_json::from_slice(&file_bytes).map_err(|e| {
            TaskboardError::Serialization(format!(
                "Corrupt data file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if envelope.version != FormatVersion::CURRENT.as_u32() {
            return Err(TaskboardError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }

        let data = serde_json::to_vec(&envelope.data)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
        let snapshot = StoreSnapshot {
            data,
            metadata: envelope.metadata.clone(),
        };

        tracing::info!(
            "Loaded {} bytes from {}",
            file_bytes.len(),
            self.path.display()
        );
        Ok((snapshot, envelope.metadata))
    }

    async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn instance_id(&self) -> Uuid {
        self.instance_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn snapshot_of(data: &serde_json::Value) -> StoreSnapshot {
        StoreSnapshot {
            data: serde_json::to_vec(data).unwrap(),
            metadata: PersistenceMetadata::new(Uuid::nil()),
        }
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("taskboard.json");
        let store = JsonFileStore::new(&file_path);

        let data = json!({ "boards": [], "tasks": [] });
        let metadata = store.save(snapshot_of(&data)).await.unwrap();
        assert_eq!(metadata.format_version, 2);
        assert_eq!(metadata.instance_id, store.instance_id());

        let (loaded, loaded_metadata) = store.load().await.unwrap();
        assert_eq!(loaded_metadata.instance_id, store.instance_id());
        let loaded_data: serde_json::Value = serde_json::from_slice(&loaded.data).unwrap();
        assert_eq!(loaded_data, data);
    }

    #[tokio::test]
    async fn test_exists() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nonexistent.json"));

        assert!(!store.exists().await);
        store.save(snapshot_of(&json!({}))).await.unwrap();
        assert!(store.exists().await);
    }

    #[tokio::test]
    async fn test_load_corrupt_file_fails_without_touching_it() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("taskboard.json");
        tokio::fs::write(&file_path, "{ not json").await.unwrap();

        let err = JsonFileStore::new(&file_path).load().await.unwrap_err();

        assert!(matches!(err, TaskboardError::Serialization(_)));
        let content = tokio::fs::read_to_string(&file_path).await.unwrap();
        assert_eq!(content, "{ not json");
    }

    #[tokio::test]
    async fn test_load_rejects_future_version() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("taskboard.json");
        let mut envelope = JsonEnvelope::empty();
        envelope.version = 9;
        tokio::fs::write(&file_path, envelope.to_json_string().unwrap())
            .await
            .unwrap();

        let err = JsonFileStore::new(&file_path).load().await.unwrap_err();
        assert!(err.to_string().contains("Unsupported format version"));
    }

    #[tokio::test]
    async fn test_load_migrates_legacy_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("taskboard.json");
        tokio::fs::write(
            &file_path,
            json!({ "isDarkThemeActive": true, "boards": [], "tasks": [] }).to_string(),
        )
        .await
        .unwrap();

        let (loaded, _) = JsonFileStore::new(&file_path).load().await.unwrap();

        let data: serde_json::Value = serde_json::from_slice(&loaded.data).unwrap();
        assert_eq!(data["is_dark_theme_active"], true);
    }
}
