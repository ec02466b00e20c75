//! Guess feedback calculation and representation
//!
//! Each position of a guess is classified as:
//! - `Absent` (letter not available in the target)
//! - `Present` (letter in the target, wrong position)
//! - `Correct` (letter in the correct position)
//!
//! Unlike a packed base-3 code, feedback is kept as five explicit states so it
//! serializes directly as `["absent","present","correct",...]`.

use super::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single guessed letter
///
/// Ordering follows keyboard priority: `Absent < Present < Correct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterState {
    Absent,
    Present,
    Correct,
}

impl LetterState {
    /// Single-character code used by the text parser (`G`, `Y`, `-`)
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }

    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// Feedback for one guess against one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feedback([LetterState; 5]);

impl Feedback {
    /// All greens (perfect match)
    pub const SOLVED: Self = Self([LetterState::Correct; 5]);

    #[inline]
    #[must_use]
    pub const fn new(states: [LetterState; 5]) -> Self {
        Self(states)
    }

    #[inline]
    #[must_use]
    pub const fn states(&self) -> &[LetterState; 5] {
        &self.0
    }

    /// Check if this is a perfect match (all correct)
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|&s| s == LetterState::Correct)
    }

    /// Calculate the feedback when `guess` is played against `target`
    ///
    /// # Algorithm
    /// 1. First pass: mark exact position matches `Correct` and consume
    ///    that target position
    /// 2. Second pass: for every other guess position, scan the target
    ///    left-to-right and claim the first unconsumed matching letter as
    ///    `Present`; otherwise `Absent`
    ///
    /// Earlier guess positions claim matches before later ones, so a
    /// repeated letter is credited at most as often as it remains in the
    /// target.
    ///
    /// # Examples
    /// ```
    /// use sixtysevendle::core::{Feedback, Word};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let target = Word::new("slate").unwrap();
    ///
    /// assert_eq!(Feedback::calculate(&guess, &target).to_string(), "--G-G");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, target: &Word) -> Self {
        let guess = guess.chars();
        let target = target.chars();
        let mut result = [LetterState::Absent; 5];
        let mut consumed = [false; 5];

        // Index needed to compare guess[i] with target[i] and set result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..5 {
            if guess[i] == target[i] {
                result[i] = LetterState::Correct;
                consumed[i] = true;
            }
        }

        for i in 0..5 {
            if result[i] == LetterState::Correct {
                continue;
            }
            for j in 0..5 {
                if !consumed[j] && guess[i] == target[j] {
                    result[i] = LetterState::Present;
                    consumed[j] = true;
                    break;
                }
            }
        }

        Self(result)
    }

    /// Count the number of correct feedback squares
    #[must_use]
    pub fn count_correct(&self) -> usize {
        self.0.iter().filter(|&&s| s == LetterState::Correct).count()
    }

    /// Count the number of present feedback squares
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.0.iter().filter(|&&s| s == LetterState::Present).count()
    }

    /// Parse feedback from a string like "GY-GY" or "🟩🟨⬜🟩🟨"
    ///
    /// Accepts:
    /// - 'G'/'g'/🟩 for correct
    /// - 'Y'/'y'/🟨 for present
    /// - '-'/'_'/⬜ for absent
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 5 {
            return None;
        }

        let mut states = [LetterState::Absent; 5];
        for (slot, ch) in states.iter_mut().zip(chars) {
            *slot = match ch {
                'G' | 'g' | '🟩' => LetterState::Correct,
                'Y' | 'y' | '🟨' => LetterState::Present,
                '-' | '_' | '⬜' => LetterState::Absent,
                _ => return None,
            };
        }

        Some(Self(states))
    }

    /// Convert feedback to an emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|s| s.emoji()).collect()
    }
}

/// Evaluate `guess` against `target`
///
/// Free-function form of [`Feedback::calculate`].
#[must_use]
pub fn evaluate(guess: &Word, target: &Word) -> Feedback {
    Feedback::calculate(guess, target)
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in &self.0 {
            write!(f, "{}", state.code())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid feedback string: {s}"))
    }
}
