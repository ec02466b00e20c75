//! Sixtysevendle - CLI
//!
//! Play the 67-board word game from the terminal, one command per guess or
//! interactively.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sixtysevendle::{
    commands::{SimulationConfig, load_state, run_play, run_simulation, start_game, submit_guess},
    game::GameMode,
    output::{print_board, print_guess_summary, print_simulation, print_start, print_state},
    service::GameService,
    store::FileStore,
    wordlists::{WordList, loader::load_from_file},
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "sixtysevendle",
    about = "67 boards, 73 guesses: a multi-board word guessing game",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding saved sessions
    #[arg(long, global = true, default_value = ".sixtysevendle")]
    store: PathBuf,

    /// Word list file, one word per line (default: built-in list)
    #[arg(short = 'w', long, global = true)]
    words: Option<PathBuf>,

    /// Print machine-readable JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive play in the terminal (default)
    Play {
        /// Game mode: daily or random
        #[arg(short, long, default_value = "daily")]
        mode: GameMode,
    },

    /// Start a saved session and print its token
    Start {
        /// Game mode: daily or random
        mode: String,
    },

    /// Submit one guess to a saved session
    Guess {
        /// Session token printed by `start`
        token: String,

        /// Five-letter guess
        word: String,
    },

    /// Show the reconstructed state of a saved session
    State {
        /// Session token printed by `start`
        token: String,

        /// Show a single board (1-based) instead of the overview
        #[arg(short, long)]
        board: Option<usize>,
    },

    /// Play random games and verify state reconstruction
    Simulate {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "100")]
        games: usize,

        /// RNG seed for guess selection and target seeds
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
}

/// Load the word list from `path`, or the built-in list
fn load_words(path: Option<&Path>) -> Result<WordList> {
    let words = match path {
        Some(path) => load_from_file(path)
            .with_context(|| format!("failed to read word list {}", path.display()))?,
        None => WordList::embedded(),
    };
    log::debug!("loaded {} words", words.len());
    Ok(words)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let words = load_words(cli.words.as_deref())?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play {
        mode: GameMode::Daily,
    });

    match command {
        Commands::Play { mode } => run_play(&words, mode).map_err(|e| anyhow::anyhow!(e)),
        Commands::Simulate { games, seed } => {
            let stats = run_simulation(&words, &SimulationConfig::new(games, seed))
                .map_err(|e| anyhow::anyhow!(e))?;
            print_simulation(&stats);
            Ok(())
        }
        Commands::Start { mode } => {
            let service = saved_service(&words, &cli.store);
            let start = start_game(&service, &mode)?;
            if cli.json {
                print_json(&start)
            } else {
                print_start(&start);
                Ok(())
            }
        }
        Commands::Guess { token, word } => {
            let service = saved_service(&words, &cli.store);
            let summary = submit_guess(&service, &token, &word)?;
            if cli.json {
                print_json(&summary.response)
            } else {
                print_guess_summary(&summary);
                Ok(())
            }
        }
        Commands::State { token, board } => {
            let service = saved_service(&words, &cli.store);
            let state = load_state(&service, &token)?;
            match (cli.json, board) {
                (true, _) => print_json(&state),
                (false, Some(n)) => {
                    let board = n
                        .checked_sub(1)
                        .and_then(|i| state.board(i))
                        .with_context(|| format!("no board {n}; boards are 1-{}", state.board_count))?;
                    print_board(board, &state.guesses);
                    Ok(())
                }
                (false, None) => {
                    print_state(&state);
                    Ok(())
                }
            }
        }
    }
}

/// Service over the on-disk store, which also caches daily targets
fn saved_service<'a>(
    words: &'a WordList,
    root: &Path,
) -> GameService<&'a WordList, FileStore, FileStore> {
    GameService::new(words, FileStore::new(root)).with_target_cache(FileStore::new(root))
}
