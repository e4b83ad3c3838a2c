use crate::traits::{PersistenceMetadata, PersistenceStore, StoreSnapshot};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use taskboard_core::{TaskboardError, TaskboardResult};
use uuid::Uuid;

/// Keeps the last saved snapshot in memory. Used by tests and dry runs.
#[derive(Debug)]
pub struct MemoryStore {
    path: PathBuf,
    instance_id: Uuid,
    latest: Mutex<Option<StoreSnapshot>>,
    save_count: AtomicUsize,
    fail_saves: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(":memory:"),
            instance_id: Uuid::new_v4(),
            latest: Mutex::new(None),
            save_count: AtomicUsize::new(0),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// Make every following save fail, to exercise error paths.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn latest_data(&self) -> Option<Vec<u8>> {
        self.lock().ok()?.as_ref().map(|s| s.data.clone())
    }

    fn lock(&self) -> TaskboardResult<std::sync::MutexGuard<'_, Option<StoreSnapshot>>> {
        self.latest
            .lock()
            .map_err(|_| TaskboardError::Internal("memory store lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl PersistenceStore for MemoryStore {
    async fn save(&self, mut snapshot: StoreSnapshot) -> TaskboardResult<PersistenceMetadata> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(TaskboardError::Io(std::io::Error::other(
                "simulated save failure",
            )));
        }

        snapshot.metadata.instance_id = self.instance_id;
        snapshot.metadata.saved_at = chrono::Utc::now();
        let metadata = snapshot.metadata.clone();
        *self.lock()? = Some(snapshot);
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(metadata)
    }

    async fn load(&self) -> TaskboardResult<(StoreSnapshot, PersistenceMetadata)> {
        let snapshot = self
            .lock()?
            .clone()
            .ok_or_else(|| TaskboardError::NotFound("Nothing saved yet".to_string()))?;
        let metadata = snapshot.metadata.clone();
        Ok((snapshot, metadata))
    }

    async fn exists(&self) -> bool {
        self.lock().map(|latest| latest.is_some()).unwrap_or(false)
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

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        assert!(!store.exists().await);
        assert!(store.load().await.is_err());

        store
            .save(StoreSnapshot {
                data: b"{}".to_vec(),
                metadata: PersistenceMetadata::new(Uuid::nil()),
            })
            .await
            .unwrap();

        assert!(store.exists().await);
        assert_eq!(store.save_count(), 1);
        let (snapshot, metadata) = store.load().await.unwrap();
        assert_eq!(snapshot.data, b"{}");
        assert_eq!(metadata.instance_id, store.instance_id());
    }

    #[tokio::test]
    async fn test_simulated_failure() {
        let store = MemoryStore::new();
        store.set_fail_saves(true);
        let result = store
            .save(StoreSnapshot {
                data: b"{}".to_vec(),
                metadata: PersistenceMetadata::new(Uuid::nil()),
            })
            .await;
        assert!(result.is_err());
        assert_eq!(store.save_count(), 0);
    }
}
