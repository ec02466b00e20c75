//! External collaborators consumed by the game engine
//!
//! The engine never touches storage directly. Word lookup, the session
//! key-value store and the optional daily target cache are traits injected
//! into [`GameService`](crate::service::GameService).

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::core::Word;
use crate::game::Session;
use chrono::Duration;

/// Error raised by a storage collaborator
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Lookup over the dictionary of valid five-letter words
///
/// Ids are 1-based and dense: every id in `1..=word_count()` resolves.
pub trait WordStore {
    /// Total number of words available
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn word_count(&self) -> Result<usize, StoreError>;

    /// Resolve ids to words
    ///
    /// Rows may come back in any order; ids without a word are omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn words_by_ids(&self, ids: &[usize]) -> Result<Vec<(usize, Word)>, StoreError>;

    /// Check whether `word` is in the dictionary
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn contains(&self, word: &str) -> Result<bool, StoreError>;
}

/// Key-value session storage with expiring keys
///
/// `put` is an unconditional overwrite: concurrent read-modify-write cycles
/// on the same key resolve as last-write-wins.
pub trait SessionStore {
    /// Fetch a session; expired or missing keys read as `None`
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or the record is corrupt.
    fn get(&self, key: &str) -> Result<Option<Session>, StoreError>;

    /// Store a session under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn put(&self, key: &str, session: &Session, ttl: Duration) -> Result<(), StoreError>;
}

/// Cache of resolved daily target sets, keyed by seed
pub trait TargetCache {
    /// # Errors
    ///
    /// Returns an error if the cache cannot be reached.
    fn get_targets(&self, seed: u32) -> Result<Option<Vec<Word>>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the cache cannot be reached.
    fn put_targets(&self, seed: u32, targets: &[Word], ttl: Duration) -> Result<(), StoreError>;
}

/// Target cache that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTargetCache;

impl TargetCache for NoTargetCache {
    fn get_targets(&self, _seed: u32) -> Result<Option<Vec<Word>>, StoreError> {
        Ok(None)
    }

    fn put_targets(&self, _seed: u32, _targets: &[Word], _ttl: Duration) -> Result<(), StoreError> {
        Ok(())
    }
}

impl<T: WordStore + ?Sized> WordStore for &T {
    fn word_count(&self) -> Result<usize, StoreError> {
        (**self).word_count()
    }

    fn words_by_ids(&self, ids: &[usize]) -> Result<Vec<(usize, Word)>, StoreError> {
        (**self).words_by_ids(ids)
    }

    fn contains(&self, word: &str) -> Result<bool, StoreError> {
        (**self).contains(word)
    }
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn get(&self, key: &str) -> Result<Option<Session>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, session: &Session, ttl: Duration) -> Result<(), StoreError> {
        (**self).put(key, session, ttl)
    }
}

impl<T: TargetCache + ?Sized> TargetCache for &T {
    fn get_targets(&self, seed: u32) -> Result<Option<Vec<Word>>, StoreError> {
        (**self).get_targets(seed)
    }

    fn put_targets(&self, seed: u32, targets: &[Word], ttl: Duration) -> Result<(), StoreError> {
        (**self).put_targets(seed, targets, ttl)
    }
}

/// Storage key for a session token
#[must_use]
pub fn session_key(token: &str) -> String {
    format!("session:{token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_is_prefixed() {
        assert_eq!(session_key("abc-123"), "session:abc-123");
    }

    #[test]
    fn no_target_cache_never_hits() {
        let cache = NoTargetCache;
        let targets = vec![Word::new("apple").unwrap()];

        cache
            .put_targets(20_240_101, &targets, Duration::hours(1))
            .unwrap();
        assert!(cache.get_targets(20_240_101).unwrap().is_none());
    }
}
