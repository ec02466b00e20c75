//! Target resolution: sampled ids to words

use super::sample_ids;
use crate::core::Word;
use crate::store::{StoreError, WordStore};
use rustc_hash::FxHashMap;

/// Failure to produce a full target set
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("Word list is empty or too small: need {needed}, have {available}")]
    TooFewWords { needed: usize, available: usize },
    #[error("Could not load enough words: resolved {resolved} of {needed}")]
    Unresolved { needed: usize, resolved: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolve `count` targets for `seed` from the word store
///
/// Targets keep the sampler's order, so board `i` is always the `i`-th
/// sampled id. Ids the store cannot resolve are dropped, and the call fails
/// if that leaves fewer than `count` words.
///
/// # Errors
///
/// Returns `TargetError` if the store is too small, cannot resolve enough
/// ids, or is unavailable.
pub fn resolve_targets<W: WordStore + ?Sized>(
    store: &W,
    seed: u32,
    count: usize,
) -> Result<Vec<Word>, TargetError> {
    let available = store.word_count()?;
    let ids = sample_ids(seed, count, available)
        .filter(|_| available > 0)
        .ok_or(TargetError::TooFewWords {
            needed: count,
            available,
        })?;

    let rows: FxHashMap<usize, Word> = store.words_by_ids(&ids)?.into_iter().collect();
    let targets: Vec<Word> = ids.iter().filter_map(|id| rows.get(id).cloned()).collect();

    if targets.len() != count {
        return Err(TargetError::Unresolved {
            needed: count,
            resolved: targets.len(),
        });
    }

    log::debug!("resolved {count} targets for seed {seed}");
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BOARD_COUNT;
    use crate::wordlists::{WordList, synthetic_words};
    use rustc_hash::FxHashSet;

    /// Store that loses every other id
    struct Lossy(WordList);

    impl WordStore for Lossy {
        fn word_count(&self) -> Result<usize, StoreError> {
            self.0.word_count()
        }

        fn words_by_ids(&self, ids: &[usize]) -> Result<Vec<(usize, Word)>, StoreError> {
            let rows = self.0.words_by_ids(ids)?;
            Ok(rows.into_iter().filter(|(id, _)| id % 2 == 0).collect())
        }

        fn contains(&self, word: &str) -> Result<bool, StoreError> {
            self.0.contains(word)
        }
    }

    struct Offline;

    impl WordStore for Offline {
        fn word_count(&self) -> Result<usize, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        fn words_by_ids(&self, _ids: &[usize]) -> Result<Vec<(usize, Word)>, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        fn contains(&self, _word: &str) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn daily_scenario_resolves_distinct_words() {
        let store = synthetic_words(2000);
        let targets = resolve_targets(&store, 20_240_101, BOARD_COUNT).unwrap();

        assert_eq!(targets.len(), BOARD_COUNT);
        let unique: FxHashSet<_> = targets.iter().collect();
        assert_eq!(unique.len(), BOARD_COUNT);
    }

    #[test]
    fn targets_follow_sampled_order() {
        let store = synthetic_words(2000);
        let targets = resolve_targets(&store, 20_240_101, BOARD_COUNT).unwrap();
        let ids = sample_ids(20_240_101, BOARD_COUNT, 2000).unwrap();

        for (target, id) in targets.iter().zip(ids) {
            assert_eq!(store.word_by_id(id), Some(target));
        }
    }

    #[test]
    fn same_seed_same_targets() {
        let store = synthetic_words(500);
        let a = resolve_targets(&store, 99, BOARD_COUNT).unwrap();
        let b = resolve_targets(&store, 99, BOARD_COUNT).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn small_store_is_rejected() {
        let store = synthetic_words(10);
        assert!(matches!(
            resolve_targets(&store, 1, BOARD_COUNT),
            Err(TargetError::TooFewWords {
                needed: 67,
                available: 10
            })
        ));
    }

    #[test]
    fn empty_store_is_rejected_even_for_zero_targets() {
        let store = synthetic_words(0);
        assert!(matches!(
            resolve_targets(&store, 1, 0),
            Err(TargetError::TooFewWords { .. })
        ));
    }

    #[test]
    fn unresolved_ids_fail_the_request() {
        let store = Lossy(synthetic_words(2000));
        assert!(matches!(
            resolve_targets(&store, 20_240_101, BOARD_COUNT),
            Err(TargetError::Unresolved { needed: 67, .. })
        ));
    }

    #[test]
    fn store_failures_propagate() {
        assert!(matches!(
            resolve_targets(&Offline, 1, BOARD_COUNT),
            Err(TargetError::Store(StoreError::Unavailable(_)))
        ));
    }
}
