//! Credential store implementations.
//!
//! - `FileCredentialStore`: durable JSON file, survives restarts on the same
//!   machine and profile.
//! - `MemoryCredentialStore`: process-local, for tests and one-shot sessions.

use serde::{Deserialize, Serialize};
use slip_core::credential::CredentialStore;
use slip_core::error::{Result, SlipError};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::paths::SlipPaths;

/// On-disk shape of `session.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Token store backed by a JSON file.
///
/// The file is read once at construction and cached. Writes go to disk first,
/// then to the cache, so a failed write leaves the previous token in effect.
///
/// # Security Note
///
/// The file holds a bearer credential in plaintext. On Unix it is written
/// with permissions 600.
pub struct FileCredentialStore {
    path: PathBuf,
    cached: RwLock<Option<String>>,
}

impl FileCredentialStore {
    /// Opens the store at the default location (`~/.config/slip/session.json`).
    pub fn open_default() -> Result<Self> {
        let path = SlipPaths::credentials_file()?;
        Ok(Self::open(path))
    }

    /// Opens the store at a custom path.
    ///
    /// A missing file means "no token". An unreadable or corrupt file is
    /// treated the same way and reported at `warn`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = match Self::read_file(&path) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(
                    "[FileCredentialStore] Ignoring unreadable session file {}: {}",
                    path.display(),
                    e
                );
                None
            }
        };

        tracing::debug!(
            "[FileCredentialStore] Opened {} (token: {})",
            path.display(),
            if token.is_some() { "present" } else { "none" }
        );

        Self {
            path,
            cached: RwLock::new(token),
        }
    }

    /// Returns the path to the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let stored: StoredSession = serde_json::from_str(&content)?;
        Ok(stored.token.filter(|t| !t.is_empty()))
    }

    /// Writes the session atomically: temp file in the same directory, then
    /// rename. On Unix the temp file is created with mode 600.
    fn write_file(&self, stored: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(stored)
            .map_err(|e| SlipError::storage(format!("Failed to serialize session: {}", e)))?;

        let tmp_path = self.temp_path();
        // The mode only applies on creation.
        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut tmp_file = options.open(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_cache(&self, token: Option<String>) -> Result<()> {
        let mut cached = self
            .cached
            .write()
            .map_err(|_| SlipError::internal("credential cache lock poisoned"))?;
        *cached = token;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn set(&self, token: &str) -> Result<()> {
        self.write_file(&StoredSession {
            token: Some(token.to_string()),
        })?;
        self.write_cache(Some(token.to_string()))?;
        tracing::debug!("[FileCredentialStore] Session token stored");
        Ok(())
    }

    fn get(&self) -> Option<String> {
        self.cached.read().ok().and_then(|t| t.clone())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        self.write_cache(None)?;
        tracing::debug!("[FileCredentialStore] Session token cleared");
        Ok(())
    }
}

/// Token store held in memory only.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn set(&self, token: &str) -> Result<()> {
        let mut current = self
            .token
            .write()
            .map_err(|_| SlipError::internal("credential lock poisoned"))?;
        *current = Some(token.to_string());
        Ok(())
    }

    fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn clear(&self) -> Result<()> {
        let mut current = self
            .token
            .write()
            .map_err(|_| SlipError::internal("credential lock poisoned"))?;
        *current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_means_no_token() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::open(temp_dir.path().join("session.json"));

        assert_eq!(store.get(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_token_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("session.json");

        let store = FileCredentialStore::open(&file_path);
        store.set("tok-123").unwrap();
        assert_eq!(store.get().as_deref(), Some("tok-123"));

        let reopened = FileCredentialStore::open(&file_path);
        assert_eq!(reopened.get().as_deref(), Some("tok-123"));
    }

    #[test]
    fn test_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.json");

        let store = FileCredentialStore::open(&file_path);
        store.set("tok-123").unwrap();
        store.clear().unwrap();

        assert_eq!(store.get(), None);
        assert!(!file_path.exists());
        assert_eq!(FileCredentialStore::open(&file_path).get(), None);

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.json");
        fs::write(&file_path, "{ invalid json").unwrap();

        let store = FileCredentialStore::open(&file_path);
        assert_eq!(store.get(), None);

        // A subsequent login overwrites the corrupt file
        store.set("fresh").unwrap();
        assert_eq!(FileCredentialStore::open(&file_path).get().as_deref(), Some("fresh"));
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.json");
        let store = FileCredentialStore::open(&file_path);
        store.set("tok").unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_set_replaces_loose_file_and_leftover_temp() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.json");
        let tmp_path = temp_dir.path().join("session.json.tmp");
        fs::write(&file_path, r#"{"token": "old"}"#).unwrap();
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o644)).unwrap();
        fs::write(&tmp_path, "partial").unwrap();
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileCredentialStore::open(&file_path);
        assert_eq!(store.get().as_deref(), Some("old"));
        store.set("new").unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!tmp_path.exists());
        assert_eq!(FileCredentialStore::open(&file_path).get().as_deref(), Some("new"));
    }

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get(), None);

        store.set("a").unwrap();
        store.set("b").unwrap();
        assert_eq!(store.get().as_deref(), Some("b"));

        store.clear().unwrap();
        assert!(!store.is_authenticated());

        let seeded = MemoryCredentialStore::with_token("seed");
        assert_eq!(seeded.get().as_deref(), Some("seed"));
    }
}
