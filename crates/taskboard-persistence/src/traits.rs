use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use taskboard_core::TaskboardResult;
use uuid::Uuid;

/// Metadata written next to the data on every save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Version of the file envelope
    pub format_version: u32,
    /// ID of the process that performed the save
    pub instance_id: Uuid,
    pub saved_at: DateTime<Utc>,
    /// Version of the data schema inside the envelope
    pub schema_version: String,
}

impl PersistenceMetadata {
    pub fn new(instance_id: Uuid) -> Self {
        Self {
            format_version: FormatVersion::CURRENT.as_u32(),
            instance_id,
            saved_at: Utc::now(),
            schema_version: "2.0.0".to_string(),
        }
    }
}

/// Serialized state ready to hand to a store
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    /// JSON bytes of the whole workspace snapshot
    pub data: Vec<u8>,
    pub metadata: PersistenceMetadata,
}

/// Storage backend for the workspace state
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Save a snapshot, replacing whatever was stored before
    async fn save(&self, snapshot: StoreSnapshot) -> TaskboardResult<PersistenceMetadata>;

    /// Load the stored snapshot, migrating older formats first
    async fn load(&self) -> TaskboardResult<(StoreSnapshot, PersistenceMetadata)>;

    /// Whether anything has been stored yet
    async fn exists(&self) -> bool;

    fn path(&self) -> &Path;

    /// ID stamped into the metadata of every save
    fn instance_id(&self) -> Uuid;
}

/// Serialization strategy for persisted data
pub trait Serializer<T: Send + Sync>: Send + Sync {
    fn serialize(&self, data: &T) -> TaskboardResult<Vec<u8>>;

    fn deserialize(&self, bytes: &[u8]) -> TaskboardResult<T>;
}

/// On-disk format versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormatVersion {
    /// Bare `{isDarkThemeActive, boards, tasks}` object with camelCase keys
    V1,
    /// `{version, metadata, data}` envelope with snake_case keys
    V2,
}

impl FormatVersion {
    pub const CURRENT: FormatVersion = FormatVersion::V2;

    pub fn as_u32(self) -> u32 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }

    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_version_roundtrip() {
        assert_eq!(FormatVersion::from_u32(1), Some(FormatVersion::V1));
        assert_eq!(FormatVersion::from_u32(2), Some(FormatVersion::V2));
        assert_eq!(FormatVersion::from_u32(3), None);
        assert!(FormatVersion::V1 < FormatVersion::CURRENT);
    }

    #[test]
    fn test_new_metadata_uses_current_format() {
        let id = Uuid::new_v4();
        let metadata = PersistenceMetadata::new(id);
        assert_eq!(metadata.format_version, 2);
        assert_eq!(metadata.instance_id, id);
    }
}
