//! Keeps the data file in step with the store.
//!
//! [`load_snapshot`] runs once at startup. [`SaveWorker`] subscribes to the
//! store and persists every new state from a background task, so actions
//! never wait on disk.

use crate::serialization::JsonSerializer;
use crate::traits::{PersistenceMetadata, PersistenceStore, Serializer, StoreSnapshot};
use std::sync::Arc;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{ListenerId, Snapshot, Store};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Read the persisted state. Nothing stored yet means an empty workspace;
/// anything unreadable is an error so the file is never replaced by defaults.
pub async fn load_snapshot(store: &dyn PersistenceStore) -> TaskboardResult<Snapshot> {
    if !store.exists().await {
        tracing::debug!(
            "No data at {}, starting empty",
            store.path().display()
        );
        return Ok(Snapshot::default());
    }

    let (stored, metadata) = store.load().await?;
    let snapshot: Snapshot = JsonSerializer.deserialize(&stored.data)?;
    tracing::debug!(
        "Loaded snapshot saved at {} by instance {}",
        metadata.saved_at,
        metadata.instance_id
    );
    Ok(snapshot)
}

pub async fn save_snapshot(
    store: &dyn PersistenceStore,
    snapshot: &Snapshot,
) -> TaskboardResult<PersistenceMetadata> {
    let data = JsonSerializer.serialize(snapshot)?;
    store
        .save(StoreSnapshot {
            data,
            metadata: PersistenceMetadata::new(store.instance_id()),
        })
        .await
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveStats {
    /// States received from the store
    pub received: usize,
    /// States skipped because a newer one was already queued
    pub coalesced: usize,
    pub saved: usize,
    pub failed: usize,
}

/// Background saver attached to a [`Store`] subscription
pub struct SaveWorker {
    listener_id: ListenerId,
    handle: JoinHandle<SaveStats>,
}

impl SaveWorker {
    /// Subscribe to `store` and start saving. Must run inside a tokio runtime.
    pub fn attach(store: &mut Store, persistence: Arc<dyn PersistenceStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Snapshot>();

        let listener_id = store.subscribe(move |state| {
            if tx.send(state.clone()).is_err() {
                tracing::warn!("Save worker stopped; change not persisted");
            }
        });

        let handle = tokio::spawn(Self::run(persistence, rx));
        tracing::debug!("Save worker attached as listener {}", listener_id);

        Self {
            listener_id,
            handle,
        }
    }

    async fn run(
        persistence: Arc<dyn PersistenceStore>,
        mut rx: mpsc::UnboundedReceiver<Snapshot>,
    ) -> SaveStats {
        let mut stats = SaveStats::default();

        while let Some(mut latest) = rx.recv().await {
            stats.received += 1;
            while let Ok(newer) = rx.try_recv() {
                latest = newer;
                stats.received += 1;
                stats.coalesced += 1;
            }

            match save_snapshot(persistence.as_ref(), &latest).await {
                Ok(_) => stats.saved += 1,
                Err(e) => {
                    stats.failed += 1;
                    tracing::error!(
                        "Failed to save to {}: {}",
                        persistence.path().display(),
                        e
                    );
                }
            }
        }

        stats
    }

    /// Detach from the store, wait for queued saves and report what happened.
    pub async fn finish(self, store: &mut Store) -> TaskboardResult<SaveStats> {
        store.unsubscribe(self.listener_id);
        let stats = self
            .handle
            .await
            .map_err(|e| TaskboardError::Internal(format!("Save worker panicked: {}", e)))?;
        tracing::debug!(
            "Save worker finished: {} saved, {} coalesced, {} failed",
            stats.saved,
            stats.coalesced,
            stats.failed
        );
        Ok(stats)
    }
}
