use crate::store::{AtomicWriter, JsonEnvelope};
use crate::traits::FormatVersion;
use serde_json::{Map, Value};
use std::path::Path;
use taskboard_core::{TaskboardError, TaskboardResult};

/// Root keys that mark a legacy export
const LEGACY_ROOT_KEYS: [&str; 3] = ["isDarkThemeActive", "boards", "tasks"];

/// Upgrades data files written by older versions in place
pub struct Migrator;

impl Migrator {
    /// Detect the version of a persisted file
    pub async fn detect_version(path: &Path) -> TaskboardResult<FormatVersion> {
        if !tokio::fs::try_exists(path).await? {
            return Ok(FormatVersion::CURRENT);
        }

        let content = tokio::fs::read_to_string(path).await?;
        let value: Value = serde_json::from_str(&content).map_err(|e| {
            TaskboardError::Serialization(format!("Corrupt data file {}: {}", path.display(), e))
        })?;

        // Current files carry a "version" field at the root
        if let Some(version) = value.get("version").and_then(|v| v.as_u64()) {
            return Ok(u32::try_from(version)
                .ok()
                .and_then(FormatVersion::from_u32)
                .unwrap_or(FormatVersion::CURRENT));
        }

        if LEGACY_ROOT_KEYS.iter().any(|key| value.get(key).is_some()) {
            return Ok(FormatVersion::V1);
        }

        Ok(FormatVersion::CURRENT)
    }

    pub async fn migrate(
        from: FormatVersion,
        to: FormatVersion,
        path: &Path,
    ) -> TaskboardResult<()> {
        if from == to {
            return Ok(());
        }

        match (from, to) {
            (FormatVersion::V1, FormatVersion::V2) => Self::migrate_v1_to_v2(path).await,
            _ => Err(TaskboardError::Serialization(format!(
                "Unsupported migration: {:?} -> {:?}",
                from, to
            ))),
        }
    }

    /// Convert a legacy export into a snake_case document.
    pub fn upgrade_v1_data(v1: &Value) -> Value {
        snake_case_keys(v1)
    }

    async fn migrate_v1_to_v2(path: &Path) -> TaskboardResult<()> {
        let content = tokio::fs::read_to_string(path).await?;
        let v1_data: Value = serde_json::from_str(&content)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;

        let backup_path = path.with_extension("v1.backup");
        tokio::fs::copy(path, &backup_path).await?;
        tracing::info!("Created backup at {}", backup_path.display());

        let upgraded = Self::upgrade_v1_data(&v1_data);
        let json = JsonEnvelope::new(upgraded.clone()).to_json_string()?;
        AtomicWriter::write_atomic(path, json.as_bytes()).await?;

        tracing::info!("Migrated {} from V1 to V2 format", path.display());

        match Self::verify_migration(path, &upgraded).await {
            Ok(()) => {
                if let Err(e) = tokio::fs::remove_file(&backup_path).await {
                    tracing::warn!(
                        "Migration successful but failed to remove backup at {}: {}",
                        backup_path.display(),
                        e
                    );
                } else {
                    tracing::info!("Migration verified, backup removed");
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    "Migration verification failed: {}. Backup preserved at {}",
                    e,
                    backup_path.display()
                );
                Err(e)
            }
        }
    }

    async fn verify_migration(path: &Path, expected_data: &Value) -> TaskboardResult<()> {
        let migrated_content = tokio::fs::read_to_string(path).await?;
        let migrated_value: Value = serde_json::from_str(&migrated_content).map_err(|e| {
            TaskboardError::Serialization(format!("Failed to parse migrated file: {}", e))
        })?;

        migrated_value
            .get("version")
            .and_then(|v| v.as_u64())
            .filter(|&v| v == u64::from(FormatVersion::V2.as_u32()))
            .ok_or_else(|| {
                TaskboardError::Serialization(
                    "Migrated file missing or invalid version field".to_string(),
                )
            })?;

        migrated_value
            .get("metadata")
            .filter(|m| m.is_object())
            .ok_or_else(|| {
                TaskboardError::Serialization(
                    "Migrated file missing or invalid metadata field".to_string(),
                )
            })?;

        let migrated_data = migrated_value.get("data").ok_or_else(|| {
            TaskboardError::Serialization("Migrated file missing data field".to_string())
        })?;

        if migrated_data != expected_data {
            return Err(TaskboardError::Serialization(
                "Migrated data does not match original data".to_string(),
            ));
        }

        tracing::debug!("Migration verification passed");
        Ok(())
    }
}

fn snake_case_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, v)| (to_snake_case(key), snake_case_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(snake_case_keys).collect()),
        other => other.clone(),
    }
}

fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taskboard_domain::Snapshot;
    use tempfile::tempdir;

    fn legacy_export() -> Value {
        json!({
            "isDarkThemeActive": true,
            "boards": [{
                "id": "7f9a2c1e-0d7b-4f5e-9a39-1b2c3d4e5f60",
                "title": "Platform Launch",
                "statuses": [{
                    "id": "0b1c2d3e-4f50-4a6b-8c7d-9e0f1a2b3c4d",
                    "name": "Todo",
                    "boardId": "7f9a2c1e-0d7b-4f5e-9a39-1b2c3d4e5f60"
                }]
            }],
            "tasks": [{
                "id": "5a6b7c8d-9e0f-4a1b-8c2d-3e4f5a6b7c8d",
                "boardId": "7f9a2c1e-0d7b-4f5e-9a39-1b2c3d4e5f60",
                "statusId": "0b1c2d3e-4f50-4a6b-8c7d-9e0f1a2b3c4d",
                "title": "Build UI",
                "description": "",
                "subtasks": [{
                    "id": "1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5d",
                    "taskId": "5a6b7c8d-9e0f-4a1b-8c2d-3e4f5a6b7c8d",
                    "title": "Sketch",
                    "isCompleted": true
                }]
            }]
        })
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("isDarkThemeActive"), "is_dark_theme_active");
        assert_eq!(to_snake_case("boardId"), "board_id");
        assert_eq!(to_snake_case("title"), "title");
    }

    #[test]
    fn test_upgraded_legacy_data_deserializes() {
        let upgraded = Migrator::upgrade_v1_data(&legacy_export());
        let snapshot: Snapshot = serde_json::from_value(upgraded).unwrap();

        assert!(snapshot.is_dark_theme_active);
        assert_eq!(snapshot.boards[0].title, "Platform Launch");
        assert_eq!(snapshot.boards[0].statuses[0].name, "Todo");
        assert!(snapshot.tasks[0].subtasks[0].is_completed);
        assert_eq!(snapshot.tasks[0].status_id, snapshot.boards[0].statuses[0].id);
    }

    #[tokio::test]
    async fn test_detect_v1_format() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("taskboard.json");
        tokio::fs::write(&file_path, legacy_export().to_string())
            .await
            .unwrap();

        let version = Migrator::detect_version(&file_path).await.unwrap();
        assert_eq!(version, FormatVersion::V1);
    }

    #[tokio::test]
    async fn test_detect_v2_format() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("taskboard.json");
        tokio::fs::write(&file_path, JsonEnvelope::empty().to_json_string().unwrap())
            .await
            .unwrap();

        let version = Migrator::detect_version(&file_path).await.unwrap();
        assert_eq!(version, FormatVersion::V2);
    }

    #[tokio::test]
    async fn test_detect_missing_file() {
        let dir = tempdir().unwrap();
        let version = Migrator::detect_version(&dir.path().join("none.json"))
            .await
            .unwrap();
        assert_eq!(version, FormatVersion::CURRENT);
    }

    #[tokio::test]
    async fn test_migrate_v1_to_v2() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("taskboard.json");
        tokio::fs::write(&file_path, legacy_export().to_string())
            .await
            .unwrap();

        Migrator::migrate(FormatVersion::V1, FormatVersion::V2, &file_path)
            .await
            .unwrap();

        let migrated = tokio::fs::read_to_string(&file_path).await.unwrap();
        let v2: Value = serde_json::from_str(&migrated).unwrap();

        assert_eq!(v2["version"], 2);
        assert!(v2["metadata"].is_object());
        assert_eq!(v2["data"]["is_dark_theme_active"], true);
        assert_eq!(
            v2["data"]["tasks"][0]["subtasks"][0]["is_completed"],
            true
        );
        assert!(
            !file_path.with_extension("v1.backup").exists(),
            "Backup should be removed after successful migration"
        );
    }

    #[tokio::test]
    async fn test_migration_leaves_only_the_data_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("taskboard.json");
        tokio::fs::write(&file_path, legacy_export().to_string())
            .await
            .unwrap();

        Migrator::migrate(FormatVersion::V1, FormatVersion::V2, &file_path)
            .await
            .unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("taskboard.json")]);
        assert_eq!(
            Migrator::detect_version(&file_path).await.unwrap(),
            FormatVersion::V2
        );
    }

    #[tokio::test]
    async fn test_unsupported_migration() {
        let dir = tempdir().unwrap();
        let err = Migrator::migrate(
            FormatVersion::V2,
            FormatVersion::V1,
            &dir.path().join("taskboard.json"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TaskboardError::Serialization(_)));
    }
}
