//! Terminal output formatting
//!
//! Display utilities for CLI results and board rendering.

pub mod display;
pub mod formatters;

pub use display::{
    print_board, print_guess_summary, print_keyboard, print_simulation, print_start, print_state,
    print_state_overview,
};
