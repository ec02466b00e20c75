//! One-shot session commands
//!
//! `start`, `guess` and `state` each run a single service call against a
//! persistent store, so a game can be played across separate invocations.

use crate::core::Feedback;
use crate::game::GameState;
use crate::service::{GameError, GameService, GuessResponse, StartResponse};
use crate::store::{SessionStore, TargetCache, WordStore};

/// Outcome of one submitted guess, with a summary for display
#[derive(Debug, Clone)]
pub struct GuessSummary {
    pub guess: String,
    pub response: GuessResponse,
    /// Boards this guess solved
    pub newly_solved: Vec<usize>,
    /// Unsolved board with the most greens, then yellows
    pub closest: Option<(usize, Feedback)>,
}

impl GuessSummary {
    fn new(guess: &str, response: GuessResponse) -> Self {
        let newly_solved = response
            .results
            .iter()
            .filter(|r| r.solved)
            .map(|r| r.board_index)
            .collect();

        let closest = response
            .results
            .iter()
            .filter(|r| !r.solved)
            .max_by_key(|r| {
                (
                    r.states.count_correct(),
                    r.states.count_present(),
                    std::cmp::Reverse(r.board_index),
                )
            })
            .map(|r| (r.board_index, r.states));

        Self {
            guess: guess.trim().to_lowercase(),
            response,
            newly_solved,
            closest,
        }
    }
}

/// Start a new session
///
/// # Errors
///
/// Returns the service error for an unknown mode or an unusable word store.
pub fn start_game<W, S, C>(
    service: &GameService<W, S, C>,
    mode: &str,
) -> Result<StartResponse, GameError>
where
    W: WordStore,
    S: SessionStore,
    C: TargetCache,
{
    service.start(mode)
}

/// Submit one guess and summarize the per-board results
///
/// # Errors
///
/// Returns the service error if the token is unknown, the game is over or
/// the guess is rejected.
pub fn submit_guess<W, S, C>(
    service: &GameService<W, S, C>,
    token: &str,
    guess: &str,
) -> Result<GuessSummary, GameError>
where
    W: WordStore,
    S: SessionStore,
    C: TargetCache,
{
    let response = service.guess(Some(token), guess)?;
    Ok(GuessSummary::new(guess, response))
}

/// Reconstruct the full state of a session
///
/// # Errors
///
/// Returns the service error if the token is missing or unknown.
pub fn load_state<W, S, C>(
    service: &GameService<W, S, C>,
    token: &str,
) -> Result<GameState, GameError>
where
    W: WordStore,
    S: SessionStore,
    C: TargetCache,
{
    service.state(Some(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BOARD_COUNT, Session};
    use crate::store::{MemoryStore, session_key};
    use crate::wordlists::synthetic_words;

    #[test]
    fn summary_lists_solved_boards() {
        let words = synthetic_words(2000);
        let sessions = MemoryStore::new();
        let service = GameService::new(&words, &sessions);

        let start = start_game(&service, "random").unwrap();
        let session: Session = sessions.get(&session_key(&start.token)).unwrap().unwrap();
        let target = session.targets()[5].text().to_uppercase();

        let summary = submit_guess(&service, &start.token, &target).unwrap();

        assert_eq!(summary.guess, target.to_lowercase());
        assert_eq!(summary.newly_solved, vec![5]);
        assert_eq!(summary.response.results.len(), BOARD_COUNT);
        let (closest, _) = summary.closest.unwrap();
        assert_ne!(closest, 5);
    }

    #[test]
    fn state_follows_guesses() {
        let words = synthetic_words(2000);
        let service = GameService::new(&words, MemoryStore::new());

        let start = start_game(&service, "daily").unwrap();
        submit_guess(&service, &start.token, "aaaaa").unwrap();
        submit_guess(&service, &start.token, "aaaab").unwrap();

        let state = load_state(&service, &start.token).unwrap();
        assert_eq!(state.total_guesses, 2);
        assert_eq!(state.boards.len(), BOARD_COUNT);
    }

    #[test]
    fn errors_pass_through() {
        let words = synthetic_words(2000);
        let service = GameService::new(&words, MemoryStore::new());

        assert!(matches!(
            submit_guess(&service, "missing", "aaaaa"),
            Err(GameError::SessionNotFound)
        ));
        assert!(matches!(
            start_game(&service, "weekly"),
            Err(GameError::InvalidMode(_))
        ));
    }
}
