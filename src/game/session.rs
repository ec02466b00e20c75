//! Session state machine
//!
//! A session binds a token to a fixed target set and an append-only guess
//! history. Per-board rows are never stored; see [`GameState`] for how they
//! are derived.
//!
//! [`GameState`]: super::GameState

use super::{GameMode, GameState, MAX_GUESSES};
use crate::core::{Feedback, Word};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of one guess against one still-active board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResult {
    pub board_index: usize,
    pub states: Feedback,
    pub solved: bool,
}

/// Persisted record of one game
///
/// Invariants maintained by [`Session::record_guess`] and re-checked when a
/// record is deserialized:
/// - `solved` has one flag per target, set exactly when the target was guessed
/// - `solved_count` equals the number of `true` entries in `solved`
/// - `guesses.len() <= MAX_GUESSES`
/// - `game_over` is set once the budget is spent or every board is solved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SessionRecord")]
pub struct Session {
    session_id: String,
    token: String,
    mode: GameMode,
    seed: u32,
    targets: Vec<Word>,
    guesses: Vec<Word>,
    solved: Vec<bool>,
    solved_count: usize,
    created_at: i64,
    game_over: bool,
}

/// A stored session that breaks one of the record invariants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSession {
    #[error("session has no targets")]
    NoTargets,
    #[error("{flags} solved flags for {targets} targets")]
    SolvedLength { flags: usize, targets: usize },
    #[error("solved flag for board {0} disagrees with the guess history")]
    SolvedMismatch(usize),
    #[error("solvedCount is {stored} but {actual} boards are solved")]
    SolvedCount { stored: usize, actual: usize },
    #[error("{0} guesses exceed the budget of {max}", max = MAX_GUESSES)]
    OverBudget(usize),
    #[error("gameOver is {stored} but should be {expected}")]
    GameOverMismatch { stored: bool, expected: bool },
}

/// Unchecked wire form of [`Session`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    session_id: String,
    token: String,
    mode: GameMode,
    seed: u32,
    targets: Vec<Word>,
    guesses: Vec<Word>,
    solved: Vec<bool>,
    solved_count: usize,
    created_at: i64,
    game_over: bool,
}

impl TryFrom<SessionRecord> for Session {
    type Error = InvalidSession;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let targets = record.targets.len();
        if targets == 0 {
            return Err(InvalidSession::NoTargets);
        }
        if record.solved.len() != targets {
            return Err(InvalidSession::SolvedLength {
                flags: record.solved.len(),
                targets,
            });
        }
        if record.guesses.len() > MAX_GUESSES {
            return Err(InvalidSession::OverBudget(record.guesses.len()));
        }

        for (board, (target, &flag)) in record.targets.iter().zip(&record.solved).enumerate() {
            if flag != record.guesses.contains(target) {
                return Err(InvalidSession::SolvedMismatch(board));
            }
        }

        let actual = record.solved.iter().filter(|&&s| s).count();
        if record.solved_count != actual {
            return Err(InvalidSession::SolvedCount {
                stored: record.solved_count,
                actual,
            });
        }

        let expected = actual == targets || record.guesses.len() == MAX_GUESSES;
        if record.game_over != expected {
            return Err(InvalidSession::GameOverMismatch {
                stored: record.game_over,
                expected,
            });
        }

        Ok(Self {
            session_id: record.session_id,
            token: record.token,
            mode: record.mode,
            seed: record.seed,
            targets: record.targets,
            guesses: record.guesses,
            solved: record.solved,
            solved_count: record.solved_count,
            created_at: record.created_at,
            game_over: record.game_over,
        })
    }
}

impl Session {
    /// Start a fresh session over `targets`
    ///
    /// Issues a new random `session_id` and a separate random `token`.
    #[must_use]
    pub fn new(mode: GameMode, seed: u32, targets: Vec<Word>) -> Self {
        let solved = vec![false; targets.len()];

        Self {
            session_id: Uuid::new_v4().to_string(),
            token: Uuid::new_v4().to_string(),
            mode,
            seed,
            targets,
            guesses: Vec::new(),
            solved,
            solved_count: 0,
            created_at: Utc::now().timestamp_millis(),
            game_over: false,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    #[must_use]
    pub fn targets(&self) -> &[Word] {
        &self.targets
    }

    #[must_use]
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    #[must_use]
    pub fn solved(&self) -> &[bool] {
        &self.solved
    }

    #[must_use]
    pub const fn solved_count(&self) -> usize {
        self.solved_count
    }

    #[must_use]
    pub fn total_guesses(&self) -> usize {
        self.guesses.len()
    }

    #[must_use]
    pub fn remaining_guesses(&self) -> usize {
        MAX_GUESSES.saturating_sub(self.guesses.len())
    }

    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    /// Play `guess` against every unsolved board
    ///
    /// Returns one result per board that was still active for this guess;
    /// boards solved earlier are skipped. Returns an empty list without
    /// touching the session once the game is over.
    pub fn record_guess(&mut self, guess: &Word) -> Vec<GuessResult> {
        if self.game_over {
            return Vec::new();
        }

        let mut results = Vec::with_capacity(self.targets.len().saturating_sub(self.solved_count));

        for (board_index, (target, solved)) in
            self.targets.iter().zip(self.solved.iter_mut()).enumerate()
        {
            if *solved {
                continue;
            }

            let states = Feedback::calculate(guess, target);
            let hit = guess == target;
            if hit {
                *solved = true;
                self.solved_count += 1;
            }

            results.push(GuessResult {
                board_index,
                states,
                solved: hit,
            });
        }

        self.guesses.push(guess.clone());

        let out_of_guesses = self.guesses.len() >= MAX_GUESSES;
        let all_solved = self.solved_count >= self.targets.len();
        if out_of_guesses || all_solved {
            self.game_over = true;
        }

        log::debug!(
            "session {}: guess #{} '{}' hit {} board(s), {}/{} solved{}",
            self.session_id,
            self.guesses.len(),
            guess,
            results.iter().filter(|r| r.solved).count(),
            self.solved_count,
            self.targets.len(),
            if self.game_over { ", game over" } else { "" }
        );

        results
    }

    /// Full board state derived from targets and guesses alone
    #[must_use]
    pub fn reconstruct(&self) -> GameState {
        GameState::from_session(self)
    }
}
