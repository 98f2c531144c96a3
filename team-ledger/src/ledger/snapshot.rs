//! Ledger snapshot persistence
//!
//! The persisted shape is plain JSON: periods keyed by id, each with its
//! player payments and their entries. Files are written to a sibling temp
//! file and renamed into place so a crash never leaves a half-written ledger.

use super::error::LedgerError;
use super::model::PaymentPeriod;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable ledger state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub periods: BTreeMap<String, PaymentPeriod>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Snapshot storage errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    #[error("Snapshot key {key} does not match period id {id}")]
    KeyMismatch { key: String, id: String },

    #[error("Invalid snapshot data: {0}")]
    Invalid(#[from] LedgerError),
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        let code = match &err {
            SnapshotError::Io(_) => ErrorCode::SystemBusy,
            SnapshotError::Serialization(_)
            | SnapshotError::UnsupportedVersion(_)
            | SnapshotError::KeyMismatch { .. }
            | SnapshotError::Invalid(_) => ErrorCode::StorageCorrupted,
        };
        tracing::error!(error = %err, error_code = ?code, "Snapshot error occurred");
        AppError::with_message(code, err.to_string())
    }
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

impl LedgerSnapshot {
    pub fn to_json(&self) -> SnapshotResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> SnapshotResult<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }

    /// Write atomically (temp file + rename)
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> SnapshotResult<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)?;
        }
        let json = self.to_json()?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), periods = self.periods.len(), "Ledger snapshot saved");
        Ok(())
    }

    /// Load a snapshot; a missing file is an empty ledger.
    pub fn load_from_file(path: impl AsRef<Path>) -> SnapshotResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No ledger snapshot found, starting empty");
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), periods = snapshot.periods.len(), "Ledger snapshot loaded");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_defaults() {
        let snapshot = LedgerSnapshot::from_json("{}").unwrap();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert!(snapshot.periods.is_empty());
    }

    #[test]
    fn test_future_version_rejected() {
        let err = LedgerSnapshot::from_json(r#"{"version": 99, "periods": {}}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::UnsupportedVersion(99)));
    }

    #[test]
    fn test_garbage_is_serialization_error() {
        let err = LedgerSnapshot::from_json("not json").unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::StorageCorrupted);
    }

    #[test]
    fn test_missing_file_is_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = LedgerSnapshot::load_from_file(dir.path().join("none.json")).unwrap();
        assert!(snapshot.periods.is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.json");
        LedgerSnapshot::default().save_to_file(&path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        let loaded = LedgerSnapshot::load_from_file(&path).unwrap();
        assert_eq!(loaded, LedgerSnapshot::default());
    }
}
