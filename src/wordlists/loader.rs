//! Word list loading utilities
//!
//! Load a custom dictionary from a newline-separated file.

use super::WordList;
use std::fs;
use std::io;
use std::path::Path;

/// Load a word list from a file
///
/// One word per line. Blank lines, `#` comments and invalid entries are
/// skipped; the result is sorted and de-duplicated.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use sixtysevendle::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/words.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<WordList> {
    let content = fs::read_to_string(path)?;
    Ok(parse_word_list(&content))
}

/// Parse newline-separated words into a list
#[must_use]
pub fn parse_word_list(content: &str) -> WordList {
    WordList::from_strings(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#')),
    )
}
