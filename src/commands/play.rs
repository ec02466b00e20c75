//! Interactive terminal play
//!
//! Text-based game loop over an in-memory store. Every guess goes through the
//! same service calls as the one-shot commands.

use super::session::{load_state, start_game, submit_guess};
use crate::game::{BOARD_COUNT, GameMode};
use crate::output::{print_board, print_guess_summary, print_keyboard, print_state_overview};
use crate::service::{ErrorKind, GameService};
use crate::store::MemoryStore;
use crate::wordlists::WordList;
use colored::Colorize;
use std::io::{self, Write};

/// A line of user input in play mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Quit,
    New,
    Help,
    Keys,
    Overview,
    /// 1-based board number as typed
    Board(usize),
    Guess(String),
}

/// Interpret one input line
///
/// # Errors
///
/// Returns a message for a `board` command without a usable board number.
pub fn parse_play_command(input: &str) -> Result<PlayCommand, String> {
    let input = input.trim();
    let lower = input.to_lowercase();
    let mut parts = lower.split_whitespace();

    match (parts.next(), parts.next()) {
        (Some("quit" | "q" | "exit"), None) => Ok(PlayCommand::Quit),
        (Some("new" | "n"), None) => Ok(PlayCommand::New),
        (Some("help" | "?"), None) => Ok(PlayCommand::Help),
        (Some("keys" | "k"), None) => Ok(PlayCommand::Keys),
        (Some("boards" | "b"), None) => Ok(PlayCommand::Overview),
        (Some("board"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if (1..=BOARD_COUNT).contains(&n) => Ok(PlayCommand::Board(n)),
            _ => Err(format!("Board number must be 1-{BOARD_COUNT}")),
        },
        (Some("board"), None) => Err(format!("Usage: board <1-{BOARD_COUNT}>")),
        _ => Ok(PlayCommand::Guess(input.to_string())),
    }
}

/// Run the interactive game loop
///
/// # Errors
///
/// Returns an error on I/O failure or if a game cannot be started.
pub fn run_play(words: &WordList, mode: GameMode) -> Result<(), String> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║          Sixtysevendle - 67 boards, 73 shared guesses        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_help();

    let service = GameService::new(words, MemoryStore::new()).with_target_cache(MemoryStore::new());
    let mut token = new_game(&service, mode)?;

    loop {
        let Some(input) = get_user_input("Guess")? else {
            println!("\n👋 Thanks for playing!\n");
            return Ok(());
        };

        let command = match parse_play_command(&input) {
            Ok(command) => command,
            Err(msg) => {
                println!("❌ {msg}\n");
                continue;
            }
        };

        match command {
            PlayCommand::Quit => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            PlayCommand::New => token = new_game(&service, mode)?,
            PlayCommand::Help => print_help(),
            PlayCommand::Keys => {
                let state = load_state(&service, &token).map_err(|e| e.to_string())?;
                print_keyboard(&state.keyboard());
            }
            PlayCommand::Overview => {
                let state = load_state(&service, &token).map_err(|e| e.to_string())?;
                print_state_overview(&state);
            }
            PlayCommand::Board(n) => {
                let state = load_state(&service, &token).map_err(|e| e.to_string())?;
                if let Some(board) = state.board(n - 1) {
                    print_board(board, &state.guesses);
                }
            }
            PlayCommand::Guess(text) if text.is_empty() => {}
            PlayCommand::Guess(text) => match submit_guess(&service, &token, &text) {
                Ok(summary) => {
                    print_guess_summary(&summary);
                    if summary.response.game_over {
                        let state = load_state(&service, &token).map_err(|e| e.to_string())?;
                        print_state_overview(&state);
                        println!("Type 'new' for another game or 'quit' to exit.\n");
                    }
                }
                Err(e) if e.kind() == ErrorKind::Input => {
                    println!("❌ '{}' is not in the word list\n", text.trim());
                }
                Err(e) if e.kind() == ErrorKind::StateConflict => {
                    println!("🏁 This game is over. Type 'new' to start another.\n");
                }
                Err(e) => return Err(e.to_string()),
            },
        }
    }
}

fn new_game(
    service: &GameService<&WordList, MemoryStore, MemoryStore>,
    mode: GameMode,
) -> Result<String, String> {
    let start = start_game(service, mode.as_str()).map_err(|e| e.to_string())?;

    println!(
        "\n🔄 New {} game: {} boards, {} guesses\n",
        mode.to_string().bright_cyan().bold(),
        start.board_count,
        start.max_guesses
    );
    log::debug!("play session {} started", start.session_id);

    Ok(start.token)
}

fn print_help() {
    println!("Type a five-letter word to play it on every unsolved board.");
    println!("Commands: 'board <n>' show one board, 'boards' overview, 'keys' keyboard,");
    println!("          'new' new game, 'help', 'quit'\n");
}

/// Get user input with a prompt; `None` at end of input
fn get_user_input(prompt: &str) -> Result<Option<String>, String> {
    print!("{prompt}: ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;

    Ok((read > 0).then(|| input.trim().to_string()))
}
