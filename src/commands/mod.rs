//! Command implementations

pub mod play;
pub mod session;
pub mod simulate;

pub use play::{PlayCommand, parse_play_command, run_play};
pub use session::{GuessSummary, load_state, start_game, submit_guess};
pub use simulate::{GameOutcome, SimulationConfig, SimulationStats, run_simulation};
