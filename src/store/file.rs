//! Directory-backed store
//!
//! One JSON document per key, each wrapped with its expiry time. Lets the
//! CLI keep sessions between invocations.

use super::{SessionStore, StoreError, TargetCache};
use crate::core::Word;
use crate::game::Session;
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry<T> {
    expires_at: DateTime<Utc>,
    value: T,
}

/// Session store and target cache persisted under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Use `root` as the storage directory; it is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }

    fn read_entry<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: StoredEntry<T> = serde_json::from_str(&content)?;
        if Utc::now() >= entry.expires_at {
            log::debug!("discarding expired entry {}", path.display());
            if let Err(e) = fs::remove_file(&path) {
                log::warn!("failed to remove expired entry {}: {e}", path.display());
            }
            return Ok(None);
        }

        Ok(Some(entry.value))
    }

    fn write_entry<T: Serialize>(&self, key: &str, value: T, ttl: Duration) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;

        let entry = StoredEntry {
            expires_at: Utc::now() + ttl,
            value,
        };
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, serde_json::to_vec(&entry)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Session>, StoreError> {
        self.read_entry(key)
    }

    fn put(&self, key: &str, session: &Session, ttl: Duration) -> Result<(), StoreError> {
        self.write_entry(key, session, ttl)
    }
}

impl TargetCache for FileStore {
    fn get_targets(&self, seed: u32) -> Result<Option<Vec<Word>>, StoreError> {
        self.read_entry(&format!("targets:{seed}"))
    }

    fn put_targets(&self, seed: u32, targets: &[Word], ttl: Duration) -> Result<(), StoreError> {
        self.write_entry(&format!("targets:{seed}"), targets, ttl)
    }
}
