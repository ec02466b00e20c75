//! Stateless reconstruction of board state
//!
//! Every board's rows are a pure function of `(targets, guesses)`: replay the
//! shared guess list against the board's target and stop at the first exact
//! match. Clients can resume from any point by asking for this view, and it
//! always agrees with what [`Session::record_guess`] reported step by step.

use super::{GameMode, MAX_GUESSES, Session};
use crate::core::{Feedback, LetterState, Word};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rows of one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub board_index: usize,
    pub guess_results: Vec<Feedback>,
    pub solved: bool,
}

impl BoardState {
    /// Replay `guesses` against `target`, freezing at the solving guess
    #[must_use]
    pub fn replay(board_index: usize, target: &Word, guesses: &[Word]) -> Self {
        let mut guess_results = Vec::new();
        let mut solved = false;

        for guess in guesses {
            guess_results.push(Feedback::calculate(guess, target));
            if guess == target {
                solved = true;
                break;
            }
        }

        Self {
            board_index,
            guess_results,
            solved,
        }
    }

    /// The guesses that produced this board's rows
    ///
    /// For a solved board this is the prefix up to the solving guess.
    #[must_use]
    pub fn guesses<'a>(&self, all_guesses: &'a [Word]) -> &'a [Word] {
        &all_guesses[..self.guess_results.len().min(all_guesses.len())]
    }

    /// Letter feedback for this board alone
    #[must_use]
    pub fn keyboard(&self, all_guesses: &[Word]) -> KeyboardState {
        let mut keyboard = KeyboardState::default();
        for (guess, feedback) in self.guesses(all_guesses).iter().zip(&self.guess_results) {
            keyboard.record(guess, feedback);
        }
        keyboard
    }
}

/// Full display state of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub mode: GameMode,
    pub board_count: usize,
    pub max_guesses: usize,
    pub guesses: Vec<Word>,
    pub boards: Vec<BoardState>,
    pub solved_count: usize,
    pub total_guesses: usize,
    pub game_over: bool,
}

impl GameState {
    /// Derive the display state from a session's targets and guesses
    ///
    /// Reads nothing else from the session besides its mode, so a record
    /// whose cached counters drifted still reconstructs correctly.
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let guesses = session.guesses();
        let boards: Vec<BoardState> = session
            .targets()
            .iter()
            .enumerate()
            .map(|(index, target)| BoardState::replay(index, target, guesses))
            .collect();

        let solved_count = boards.iter().filter(|b| b.solved).count();
        let total_guesses = guesses.len();
        let game_over = solved_count >= boards.len() || total_guesses >= MAX_GUESSES;

        Self {
            mode: session.mode(),
            board_count: boards.len(),
            max_guesses: MAX_GUESSES,
            guesses: guesses.to_vec(),
            boards,
            solved_count,
            total_guesses,
            game_over,
        }
    }

    #[must_use]
    pub fn board(&self, index: usize) -> Option<&BoardState> {
        self.boards.get(index)
    }

    /// Best known state of every letter across all boards
    #[must_use]
    pub fn keyboard(&self) -> KeyboardState {
        let mut keyboard = KeyboardState::default();
        for board in &self.boards {
            for (guess, feedback) in board.guesses(&self.guesses).iter().zip(&board.guess_results) {
                keyboard.record(guess, feedback);
            }
        }
        keyboard
    }
}

/// Per-letter keyboard highlight
///
/// A letter keeps the highest state it has ever been shown with:
/// `correct` beats `present` beats `absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyboardState(BTreeMap<char, LetterState>);

impl KeyboardState {
    /// Fold one guess row into the keyboard
    pub fn record(&mut self, guess: &Word, feedback: &Feedback) {
        for (&letter, &state) in guess.chars().iter().zip(feedback.states()) {
            self.0
                .entry(char::from(letter))
                .and_modify(|current| *current = (*current).max(state))
                .or_insert(state);
        }
    }

    #[must_use]
    pub fn get(&self, letter: char) -> Option<LetterState> {
        self.0.get(&letter.to_ascii_lowercase()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, LetterState)> + '_ {
        self.0.iter().map(|(&c, &s)| (c, s))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
