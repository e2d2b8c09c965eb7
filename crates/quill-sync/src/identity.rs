//! Persisted per-installation device identity.
//!
//! A uuid generated once and reused for every upload, so the aggregator can
//! de-duplicate per device without learning anything about the user.

use std::fs;
use std::io::Write;
use std::path::Path;

use quill_core::errors::{QuillResult, SyncError};

/// The device's stable random identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    id: String,
}

impl DeviceIdentity {
    /// Read the persisted id, or generate a v4 uuid and persist it.
    ///
    /// The write goes through a temp file rename; a crash mid-write never
    /// leaves a truncated identity behind.
    pub fn load_or_create(path: &Path) -> QuillResult<Self> {
        if let Ok(existing) = fs::read_to_string(path) {
            let trimmed = existing.trim();
            if !trimmed.is_empty() {
                return Ok(Self {
                    id: trimmed.to_string(),
                });
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| SyncError::Identity(e.to_string()))?;

        let mut file =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| SyncError::Identity(e.to_string()))?;
        file.write_all(id.as_bytes())
            .map_err(|e| SyncError::Identity(e.to_string()))?;
        file.persist(path)
            .map_err(|e| SyncError::Identity(e.to_string()))?;

        Ok(Self { id })
    }

    /// The identifier string sent with every upload.
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_generated_once_and_reused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device_id");

        let first = DeviceIdentity::load_or_create(&path).unwrap();
        let second = DeviceIdentity::load_or_create(&path).unwrap();
        assert_eq!(first, second);
        assert!(!first.as_str().is_empty());
    }

    #[test]
    fn distinct_installations_get_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let a = DeviceIdentity::load_or_create(&dir.path().join("a")).unwrap();
        let b = DeviceIdentity::load_or_create(&dir.path().join("b")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn blank_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device_id");
        fs::write(&path, "  \n").unwrap();
        let identity = DeviceIdentity::load_or_create(&path).unwrap();
        assert!(!identity.as_str().is_empty());
    }
}
