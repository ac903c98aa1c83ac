use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::debug;

use super::session::SessionData;

/// Durable single-slot storage for the most recent session.
///
/// `load` never fails: a missing, unreadable, or malformed record is
/// reported as absent so the caller re-authenticates instead of aborting.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<SessionData>;
    fn save(&self, data: &SessionData) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Session record stored as a single JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<SessionData> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                debug!(error = %e, path = %self.path.display(), "Failed to read session file");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(data) => Some(data),
            Err(e) => {
                debug!(error = %e, "Malformed session file, treating as absent");
                None
            }
        }
    }

    fn save(&self, data: &SessionData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create session cache directory")?;
        }
        let contents = serde_json::to_string_pretty(data)?;

        // Write-then-rename so a concurrently starting process never reads
        // a partially written record.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).context("Failed to write session file")?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e).context("Failed to replace session file");
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove session file"),
        }
    }
}

/// In-memory session slot. Clones share the slot, so a test can keep a
/// handle while the authenticator owns another.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<SessionData>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<SessionData> {
        self.slot.lock().ok()?.clone()
    }

    fn save(&self, data: &SessionData) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("session slot poisoned"))?;
        *slot = Some(data.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("session slot poisoned"))?;
        *slot = None;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_session() -> SessionData {
        SessionData {
            token: "abc123".to_string(),
            site_id: "site-1".to_string(),
            user_id: "user-1".to_string(),
            timestamp: Utc::now(),
        }
    }

    fn file_store() -> (tempfile::TempDir, FileSessionStore) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileSessionStore::new(dir.path().join("session.json"));
        (dir, store)
    }

    #[test]
    fn test_file_store_round_trip() {
        let (_dir, store) = file_store();
        let session = sample_session();
        store.save(&session).expect("save failed");

        let loaded = store.load().expect("expected a session");
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_file_store_missing_is_absent() {
        let (_dir, store) = file_store();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_malformed_is_absent() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").expect("write failed");

        let store = FileSessionStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_incomplete_record_is_absent() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"token": "abc123", "site_id": "site-1"}"#).expect("write failed");

        let store = FileSessionStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_save_overwrites() {
        let (_dir, store) = file_store();
        let first = sample_session();
        store.save(&first).expect("save failed");

        let mut second = sample_session();
        second.token = "def456".to_string();
        store.save(&second).expect("save failed");

        assert_eq!(store.load().expect("expected a session").token, "def456");
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let (_dir, store) = file_store();
        store.save(&sample_session()).expect("save failed");

        store.clear().expect("clear failed");
        assert!(store.load().is_none());

        // Clearing again with nothing on disk is still a success
        store.clear().expect("second clear failed");
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_failed_replace_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        // A directory at the session path makes the rename step fail
        let path = dir.path().join("session.json");
        fs::create_dir(&path).expect("create_dir failed");

        let store = FileSessionStore::new(path.clone());
        assert!(store.save(&sample_session()).is_err());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_memory_store_round_trip_and_clear() {
        let store = MemorySessionStore::new();
        assert!(store.load().is_none());

        let session = sample_session();
        store.save(&session).expect("save failed");
        assert_eq!(store.load(), Some(session));

        store.clear().expect("clear failed");
        assert!(store.load().is_none());
    }

    #[test]
    fn test_memory_store_clones_share_slot() {
        let store = MemorySessionStore::new();
        let handle = store.clone();
        store.save(&sample_session()).expect("save failed");
        assert!(handle.load().is_some());
    }
}
