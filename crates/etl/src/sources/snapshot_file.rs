use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use storage::models::SourceSnapshot;
use tracing::info;

use crate::error::Result;
use crate::traits::SnapshotSource;

/// A snapshot saved as JSON, for offline runs.
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotSource for SnapshotFile {
    async fn fetch(&self) -> Result<SourceSnapshot> {
        info!("Loading snapshot from: {}", self.path.display());

        let json_content = tokio::fs::read_to_string(&self.path).await?;
        let snapshot: SourceSnapshot = serde_json::from_str(&json_content)?;

        Ok(snapshot)
    }

    fn name(&self) -> &'static str {
        "snapshot file"
    }
}

/// Writes `value` as pretty JSON, creating parent directories as needed.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json).await?;

    info!("Exported to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;

    #[tokio::test]
    async fn test_snapshot_round_trips_through_a_file() {
        let path = std::env::temp_dir().join(format!("mbld-snapshot-{}.json", std::process::id()));
        let snapshot = SourceSnapshot::default();

        write_json(&path, &snapshot).await.unwrap();
        let loaded = SnapshotFile::new(&path).fetch().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(loaded.results.is_empty());
        assert!(loaded.countries.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_a_snapshot_error() {
        let err = SnapshotFile::new("/nonexistent/mbld/snapshot.json")
            .fetch()
            .await
            .unwrap_err();

        assert!(matches!(err, EtlError::Snapshot(_)));
    }
}
