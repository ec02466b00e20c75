//! Formatting utilities for terminal output

use crate::core::{Feedback, LetterState, Word};
use crate::game::KeyboardState;
use colored::{ColoredString, Colorize};

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Color one letter tile by its state
#[must_use]
pub fn colorize_letter(letter: char, state: Option<LetterState>) -> ColoredString {
    let tile = format!(" {} ", letter.to_ascii_uppercase());
    match state {
        Some(LetterState::Correct) => tile.black().on_green().bold(),
        Some(LetterState::Present) => tile.black().on_yellow().bold(),
        Some(LetterState::Absent) => tile.white().on_bright_black(),
        None => tile.normal(),
    }
}

/// Render a guess as colored tiles
#[must_use]
pub fn colored_row(guess: &Word, feedback: &Feedback) -> String {
    guess
        .chars()
        .iter()
        .zip(feedback.states())
        .map(|(&c, &state)| colorize_letter(char::from(c), Some(state)).to_string())
        .collect()
}

/// Letters in QWERTY order paired with their best known state
#[must_use]
pub fn keyboard_layout(keyboard: &KeyboardState) -> Vec<Vec<(char, Option<LetterState>)>> {
    KEYBOARD_ROWS
        .iter()
        .map(|row| row.chars().map(|c| (c, keyboard.get(c))).collect())
        .collect()
}

/// 1-based board label, padded to the widest index
#[must_use]
pub fn board_label(board_index: usize, board_count: usize) -> String {
    let width = board_count.to_string().len();
    format!("#{:0width$}", board_index + 1)
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
