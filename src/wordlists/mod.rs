//! Word lists
//!
//! Provides the bundled dictionary compiled into the binary and the
//! [`WordList`] type that serves it as a [`WordStore`].

mod embedded;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};

use crate::core::Word;
use crate::store::{StoreError, WordStore};
use rustc_hash::FxHashSet;

/// Sorted, de-duplicated dictionary of five-letter words
///
/// Word ids are 1-based positions in sorted order, so id `1` is the
/// alphabetically first word.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<Word>,
    lookup: FxHashSet<String>,
}

impl WordList {
    /// Build a list from already-validated words
    #[must_use]
    pub fn new(mut words: Vec<Word>) -> Self {
        words.sort_unstable_by(|a, b| a.text().cmp(b.text()));
        words.dedup();
        let lookup = words.iter().map(|w| w.text().to_string()).collect();
        Self { words, lookup }
    }

    /// Build a list from raw strings, skipping anything that is not a word
    pub fn from_strings<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(
            words
                .into_iter()
                .filter_map(|s| Word::new(s.trim()).ok())
                .collect(),
        )
    }

    /// The dictionary compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_strings(WORDS.iter().copied())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn into_words(self) -> Vec<Word> {
        self.words
    }

    /// Look up a word by its 1-based id
    #[must_use]
    pub fn word_by_id(&self, id: usize) -> Option<&Word> {
        id.checked_sub(1).and_then(|index| self.words.get(index))
    }

    #[must_use]
    pub fn contains_word(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }
}

impl WordStore for WordList {
    fn word_count(&self) -> Result<usize, StoreError> {
        Ok(self.len())
    }

    fn words_by_ids(&self, ids: &[usize]) -> Result<Vec<(usize, Word)>, StoreError> {
        Ok(ids
            .iter()
            .filter_map(|&id| self.word_by_id(id).map(|w| (id, w.clone())))
            .collect())
    }

    fn contains(&self, word: &str) -> Result<bool, StoreError> {
        Ok(self.contains_word(word))
    }
}

/// Dictionary of `n` generated words: "aaaaa", "aaaab", ... in id order
#[cfg(test)]
pub(crate) fn synthetic_words(n: usize) -> WordList {
    let words = (0..n)
        .map(|mut i| {
            let mut chars = [b'a'; 5];
            for slot in chars.iter_mut().rev() {
                *slot = b'a' + (i % 26) as u8;
                i /= 26;
            }
            Word::new(String::from_utf8_lossy(&chars).into_owned()).unwrap()
        })
        .collect();
    WordList::new(words)
}
