use anyhow::Context as _;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskboard_core::AppConfig;
use taskboard_domain::{BoardId, StatusId, Store};
use taskboard_persistence::{load_snapshot, JsonFileStore, SaveWorker};

/// The store of one CLI invocation, wired to its data file.
///
/// Every successful action is queued for saving; [`CliContext::finish`]
/// waits for the saves before the process exits.
pub struct CliContext {
    store: Store,
    worker: SaveWorker,
    data_file: PathBuf,
    config: AppConfig,
}

impl CliContext {
    pub async fn load(data_file: PathBuf, config: AppConfig) -> anyhow::Result<Self> {
        let persistence = Arc::new(JsonFileStore::new(&data_file));
        let snapshot = load_snapshot(persistence.as_ref())
            .await
            .with_context(|| format!("Failed to load {}", data_file.display()))?;

        let mut store = Store::from_snapshot(snapshot);
        let worker = SaveWorker::attach(&mut store, persistence);

        Ok(Self {
            store,
            worker,
            data_file,
            config,
        })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Columns for a board created without any
    pub fn default_statuses(&self) -> Vec<String> {
        self.config.default_statuses.clone()
    }

    /// The board a column belongs to
    pub fn board_of_status(&self, status_id: StatusId) -> Option<BoardId> {
        self.store
            .state()
            .boards
            .iter()
            .find(|b| b.has_status(status_id))
            .map(|b| b.id)
    }

    /// Wait for pending saves. Fails when any change could not be written.
    pub async fn finish(self) -> anyhow::Result<()> {
        let Self {
            mut store,
            worker,
            data_file,
            ..
        } = self;

        let stats = worker.finish(&mut store).await?;
        if stats.failed > 0 {
            anyhow::bail!(
                "Failed to save changes to {} ({} of {} saves failed)",
                data_file.display(),
                stats.failed,
                stats.failed + stats.saved
            );
        }
        Ok(())
    }
}

impl Deref for CliContext {
    type Target = Store;

    fn deref(&self) -> &Store {
        &self.store
    }
}

impl DerefMut for CliContext {
    fn deref_mut(&mut self) -> &mut Store {
        &mut self.store
    }
}
