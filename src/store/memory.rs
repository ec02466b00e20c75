//! In-process store with wall-clock expiry

use super::{SessionStore, StoreError, TargetCache};
use crate::core::Word;
use crate::game::Session;
use chrono::{DateTime, Duration, Utc};
use rustc_hash::FxHashMap;
use std::sync::Mutex;

struct Entry<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

impl<T> Entry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Utc::now() + ttl,
        }
    }

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Memory-backed session store and target cache
///
/// Suitable for tests and single-process play. Entries vanish when the
/// process exits.
#[derive(Default)]
pub struct MemoryStore {
    sessions: Mutex<FxHashMap<String, Entry<Session>>>,
    targets: Mutex<FxHashMap<u32, Entry<Vec<Word>>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    #[must_use]
    pub fn session_count(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .lock()
            .map(|sessions| sessions.values().filter(|e| e.is_live(now)).count())
            .unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".to_string())
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Session>, StoreError> {
        let mut sessions = self.sessions.lock().map_err(poisoned)?;
        let now = Utc::now();

        if sessions.get(key).is_some_and(|entry| !entry.is_live(now)) {
            sessions.remove(key);
            return Ok(None);
        }

        Ok(sessions.get(key).map(|entry| entry.value.clone()))
    }

    fn put(&self, key: &str, session: &Session, ttl: Duration) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().map_err(poisoned)?;
        let now = Utc::now();
        sessions.retain(|_, entry| entry.is_live(now));
        sessions.insert(key.to_string(), Entry::new(session.clone(), ttl));
        Ok(())
    }
}

impl TargetCache for MemoryStore {
    fn get_targets(&self, seed: u32) -> Result<Option<Vec<Word>>, StoreError> {
        let mut targets = self.targets.lock().map_err(poisoned)?;
        let now = Utc::now();

        if targets.get(&seed).is_some_and(|entry| !entry.is_live(now)) {
            targets.remove(&seed);
            return Ok(None);
        }

        Ok(targets.get(&seed).map(|entry| entry.value.clone()))
    }

    fn put_targets(&self, seed: u32, targets: &[Word], ttl: Duration) -> Result<(), StoreError> {
        let mut cached = self.targets.lock().map_err(poisoned)?;
        let now = Utc::now();
        cached.retain(|_, entry| entry.is_live(now));
        cached.insert(seed, Entry::new(targets.to_vec(), ttl));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameMode;

    fn sample_session() -> Session {
        let targets = vec![Word::new("apple").unwrap(), Word::new("crane").unwrap()];
        Session::new(GameMode::Random, 42, targets)
    }

    #[test]
    fn put_then_get_returns_session() {
        let store = MemoryStore::new();
        let session = sample_session();

        store.put("session:a", &session, Duration::hours(24)).unwrap();
        let loaded = store.get("session:a").unwrap().unwrap();

        assert_eq!(loaded, session);
        assert_eq!(store.session_count(), 1);
    }

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryStore::new();
        assert!(store.get("session:nope").unwrap().is_none());
    }

    #[test]
    fn expired_session_reads_as_none() {
        let store = MemoryStore::new();
        let session = sample_session();

        store.put("session:a", &session, Duration::zero()).unwrap();
        assert!(store.get("session:a").unwrap().is_none());
        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn put_overwrites_previous_value() {
        let store = MemoryStore::new();
        let mut session = sample_session();
        store.put("session:a", &session, Duration::hours(1)).unwrap();

        session.record_guess(&Word::new("apple").unwrap());
        store.put("session:a", &session, Duration::hours(1)).unwrap();

        let loaded = store.get("session:a").unwrap().unwrap();
        assert_eq!(loaded.total_guesses(), 1);
    }

    #[test]
    fn target_cache_round_trip_and_expiry() {
        let store = MemoryStore::new();
        let targets = vec![Word::new("apple").unwrap()];

        store.put_targets(7, &targets, Duration::hours(1)).unwrap();
        assert_eq!(store.get_targets(7).unwrap(), Some(targets.clone()));
        assert!(store.get_targets(8).unwrap().is_none());

        store.put_targets(9, &targets, Duration::zero()).unwrap();
        assert!(store.get_targets(9).unwrap().is_none());
        assert!(!store.targets.lock().unwrap().contains_key(&9));
    }

    #[test]
    fn writes_sweep_expired_entries() {
        let store = MemoryStore::new();
        let session = sample_session();
        let targets = vec![Word::new("apple").unwrap()];

        store.put("session:old", &session, Duration::zero()).unwrap();
        store.put("session:new", &session, Duration::hours(1)).unwrap();
        assert_eq!(store.sessions.lock().unwrap().len(), 1);

        store.put_targets(1, &targets, Duration::zero()).unwrap();
        store.put_targets(2, &targets, Duration::hours(1)).unwrap();
        assert_eq!(store.targets.lock().unwrap().len(), 1);
    }

    #[test]
    fn expired_session_is_evicted_on_read() {
        let store = MemoryStore::new();
        store
            .put("session:a", &sample_session(), Duration::zero())
            .unwrap();

        assert!(store.get("session:a").unwrap().is_none());
        assert!(store.sessions.lock().unwrap().is_empty());
    }
}
