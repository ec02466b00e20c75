//! Display functions for command results

use super::formatters::{
    board_label, colored_row, colorize_letter, create_progress_bar, keyboard_layout,
};
use crate::commands::{GuessSummary, SimulationStats};
use crate::core::Word;
use crate::game::{BOARD_COUNT, BoardState, GameState, KeyboardState};
use crate::service::StartResponse;
use colored::Colorize;

/// Print a freshly started session
pub fn print_start(start: &StartResponse) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "NEW GAME".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n   Session:   {}", start.session_id);
    println!("   Token:     {}", start.token.bright_yellow().bold());
    println!("   Boards:    {}", start.board_count);
    println!("   Guesses:   {}", start.max_guesses);
    println!("\nUse the token with `guess` and `state`.");
}

/// Print the outcome of one guess
pub fn print_guess_summary(summary: &GuessSummary) {
    let response = &summary.response;

    println!(
        "\n{} on {} active board(s)",
        summary.guess.to_uppercase().bright_white().bold(),
        response.results.len()
    );

    if summary.newly_solved.is_empty() {
        println!("   No board solved.");
    } else {
        let boards: Vec<String> = summary
            .newly_solved
            .iter()
            .map(|&i| board_label(i, BOARD_COUNT))
            .collect();
        println!("   {} {}", "Solved:".green().bold(), boards.join(" "));
    }

    if let Some((index, feedback)) = &summary.closest {
        println!(
            "   Closest:  {} {}",
            board_label(*index, BOARD_COUNT),
            feedback.to_emoji()
        );
    }

    println!(
        "   Progress: {}/{} solved, {} guess(es) used",
        response.solved_count.to_string().bright_cyan(),
        BOARD_COUNT,
        response.total_guesses
    );

    if response.game_over {
        println!("\n{}", "🏁 Game over".bright_yellow().bold());
    }
    println!();
}

/// Print one board's rows
pub fn print_board(board: &BoardState, guesses: &[Word]) {
    let status = if board.solved {
        "solved".green().bold()
    } else {
        "open".yellow()
    };
    println!(
        "\n{} ({status})",
        format!("Board {}", board.board_index + 1).bright_cyan().bold()
    );

    if board.guess_results.is_empty() {
        println!("   (no guesses yet)");
    }
    for (turn, (guess, feedback)) in board
        .guesses(guesses)
        .iter()
        .zip(&board.guess_results)
        .enumerate()
    {
        println!(
            "   {:>2}. {}",
            (turn + 1).to_string().bright_black(),
            colored_row(guess, feedback)
        );
    }
    println!();
}

/// Print the keyboard with each letter's best state
pub fn print_keyboard(keyboard: &KeyboardState) {
    println!();
    for (indent, row) in keyboard_layout(keyboard).into_iter().enumerate() {
        let keys: String = row
            .into_iter()
            .map(|(c, state)| colorize_letter(c, state).to_string())
            .collect();
        println!("   {}{keys}", " ".repeat(indent * 2));
    }
    println!();
}

/// Print a compact grid of all boards
pub fn print_state_overview(state: &GameState) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "GAME STATE:".bright_cyan().bold(),
        state.mode.to_string().to_uppercase().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    let bar = create_progress_bar(state.solved_count as f64, state.board_count as f64, 30);
    println!(
        "\n   Solved:  [{}] {}/{}",
        bar.green(),
        state.solved_count,
        state.board_count
    );
    println!(
        "   Guesses: {}/{}",
        state.total_guesses, state.max_guesses
    );

    println!();
    for chunk in state.boards.chunks(6) {
        let line: Vec<String> = chunk
            .iter()
            .map(|board| {
                let label = board_label(board.board_index, state.board_count);
                let last = board
                    .guess_results
                    .last()
                    .map_or_else(|| "·····".to_string(), |f| f.to_emoji());
                if board.solved {
                    format!("{} {last}", label.green())
                } else {
                    format!("{} {last}", label.bright_black())
                }
            })
            .collect();
        println!("   {}", line.join("  "));
    }

    if state.game_over {
        let verdict = if state.solved_count == state.board_count {
            "🎉 All boards solved!".bright_green().bold()
        } else {
            "🏁 Out of guesses".bright_yellow().bold()
        };
        println!("\n   {verdict}");
    }
    println!();
}

/// Print the full reconstructed state: overview, guesses and keyboard
pub fn print_state(state: &GameState) {
    print_state_overview(state);

    if !state.guesses.is_empty() {
        let guesses: Vec<String> = state.guesses.iter().map(|g| g.text().to_uppercase()).collect();
        println!("   Guesses: {}", guesses.join(" "));
    }
    print_keyboard(&state.keyboard());
}

/// Print the result of a simulation run
pub fn print_simulation(stats: &SimulationStats) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Summary:".bright_cyan().bold());
    println!("   Games played:     {}", stats.games.len());
    println!(
        "   Average solved:   {}",
        format!("{:.2}", stats.average_solved()).bright_yellow().bold()
    );
    if let Some(best) = stats.best() {
        println!(
            "   Best game:        {} boards (seed {})",
            best.solved.to_string().green(),
            best.seed
        );
    }
    println!("   Full clears:      {}", stats.wins());
    println!("   States verified:  {}", stats.states_checked);
    println!("   Time taken:       {:.2}s", stats.total_time.as_secs_f64());

    if stats.games.is_empty() {
        return;
    }

    println!("\n📈 {}", "Solved boards per game:".bright_cyan().bold());
    let total = stats.games.len() as f64;
    for (&solved, &count) in &stats.solved_distribution {
        let pct = (count as f64 / total) * 100.0;
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░".repeat(40_usize.saturating_sub(bar_width)).bright_black()
        );
        println!("   {solved:2}: {bar} {count:4} ({pct:5.1}%)");
    }
}
