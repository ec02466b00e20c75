//! Sixtysevendle
//!
//! Game engine for a multi-board word guessing game: 67 hidden five-letter
//! words, 73 shared guesses. Every guess is played on all unsolved boards.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sixtysevendle::service::GameService;
//! use sixtysevendle::store::MemoryStore;
//! use sixtysevendle::wordlists::WordList;
//!
//! let service = GameService::new(WordList::embedded(), MemoryStore::new());
//!
//! let start = service.start("daily").unwrap();
//! let reply = service.guess(Some(&start.token), "crane").unwrap();
//! println!("{} boards solved", reply.solved_count);
//!
//! let state = service.state(Some(&start.token)).unwrap();
//! println!("{} guesses so far", state.total_guesses);
//! ```

// Core domain types
pub mod core;

// Sampler, session engine and state reconstruction
pub mod game;

// Storage collaborators
pub mod store;

// Word lists
pub mod wordlists;

// Start / guess / state operations
pub mod service;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
