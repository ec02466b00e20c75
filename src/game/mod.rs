//! Game engine
//!
//! Deterministic target sampling, the session state machine and the
//! stateless reconstruction of board state from a session's guess history.

pub mod sampler;
pub mod schedule;
mod session;
mod state;
mod targets;

pub use sampler::{Lcg, sample_ids};
pub use schedule::{daily_seed, random_seed, seconds_until_midnight_utc, session_ttl};
pub use session::{GuessResult, InvalidSession, Session};
pub use state::{BoardState, GameState, KeyboardState};
pub use targets::{TargetError, resolve_targets};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of boards (target words) per session
pub const BOARD_COUNT: usize = 67;

/// Shared guess budget across all boards
pub const MAX_GUESSES: usize = 73;

/// How a session's seed is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Seed derived from the UTC calendar date; everyone shares the targets
    Daily,
    /// Seed drawn from entropy per session
    Random,
}

impl GameMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized mode string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid mode: {0:?}")]
pub struct InvalidMode(pub String);

impl std::str::FromStr for GameMode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "random" => Ok(Self::Random),
            other => Err(InvalidMode(other.to_string())),
        }
    }
}
