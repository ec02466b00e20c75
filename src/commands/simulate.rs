//! Random-play simulation
//!
//! Plays whole games with uniformly random dictionary guesses and checks,
//! after every guess, that the reconstructed board state agrees with the
//! results the engine reported incrementally.

use crate::core::{Feedback, Word};
use crate::game::{
    BOARD_COUNT, GameMode, MAX_GUESSES, Session, resolve_targets, schedule::RANDOM_SEED_RANGE,
};
use crate::wordlists::WordList;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Configuration for a simulation run
pub struct SimulationConfig {
    pub games: usize,
    pub seed: u64,
    pub show_progress: bool,
}

impl SimulationConfig {
    #[must_use]
    pub const fn new(games: usize, seed: u64) -> Self {
        Self {
            games,
            seed,
            show_progress: true,
        }
    }
}

/// Outcome of one simulated game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub seed: u32,
    pub solved: usize,
    pub guesses: usize,
}

/// Aggregate statistics over all simulated games
#[derive(Debug)]
pub struct SimulationStats {
    pub games: Vec<GameOutcome>,
    /// Solved-board count -> number of games
    pub solved_distribution: BTreeMap<usize, usize>,
    pub states_checked: usize,
    pub total_time: Duration,
}

impl SimulationStats {
    #[must_use]
    pub fn average_solved(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        self.games.iter().map(|g| g.solved).sum::<usize>() as f64 / self.games.len() as f64
    }

    #[must_use]
    pub fn best(&self) -> Option<&GameOutcome> {
        self.games.iter().max_by_key(|g| g.solved)
    }

    #[must_use]
    pub fn wins(&self) -> usize {
        self.games.iter().filter(|g| g.solved == BOARD_COUNT).count()
    }
}

/// Play `config.games` random games over `words`
///
/// The same seed always replays the same games.
///
/// # Errors
///
/// Returns an error if the word list cannot supply a target set, or if a
/// reconstructed state ever disagrees with the incremental results.
pub fn run_simulation(words: &WordList, config: &SimulationConfig) -> Result<SimulationStats, String> {
    if words.is_empty() {
        return Err("word list is empty".to_string());
    }

    let mut rng = StdRng::seed_from_u64(config.seed);

    let pb = if config.show_progress {
        ProgressBar::new(config.games as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
    );

    let start = Instant::now();
    let mut games = Vec::with_capacity(config.games);
    let mut solved_distribution = BTreeMap::new();
    let mut states_checked = 0;

    for idx in 0..config.games {
        let seed = rng.random_range(0..RANDOM_SEED_RANGE);
        let targets = resolve_targets(words, seed, BOARD_COUNT).map_err(|e| e.to_string())?;
        let mut session = Session::new(GameMode::Random, seed, targets);

        states_checked += play_random_game(&mut session, words.words(), &mut rng)?;

        let outcome = GameOutcome {
            seed,
            solved: session.solved_count(),
            guesses: session.total_guesses(),
        };
        *solved_distribution.entry(outcome.solved).or_insert(0) += 1;
        games.push(outcome);

        if idx % 10 == 0 {
            let avg = games.iter().map(|g| g.solved).sum::<usize>() as f64 / games.len() as f64;
            pb.set_message(format!("Avg solved: {avg:.2}"));
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete!");

    Ok(SimulationStats {
        games,
        solved_distribution,
        states_checked,
        total_time: start.elapsed(),
    })
}

/// Guess randomly until the session ends, verifying every step
///
/// Returns the number of reconstructed states compared.
fn play_random_game(session: &mut Session, pool: &[Word], rng: &mut StdRng) -> Result<usize, String> {
    let mut rows: Vec<Vec<Feedback>> = vec![Vec::new(); session.targets().len()];
    let mut checked = 0;

    while !session.is_game_over() {
        let guess = &pool[rng.random_range(0..pool.len())];

        for result in session.record_guess(guess) {
            rows[result.board_index].push(result.states);
        }

        let state = session.reconstruct();
        for board in &state.boards {
            if board.guess_results != rows[board.board_index] {
                return Err(format!(
                    "seed {}: board {} diverged after guess #{}",
                    session.seed(),
                    board.board_index,
                    state.total_guesses
                ));
            }
        }
        if state.solved_count != session.solved_count() || state.game_over != session.is_game_over() {
            return Err(format!(
                "seed {}: counters diverged after guess #{}",
                session.seed(),
                state.total_guesses
            ));
        }
        checked += 1;
    }

    debug_assert!(session.total_guesses() <= MAX_GUESSES);
    Ok(checked)
}
