//! Wordle strategy analyzer
//!
//! Precomputes every guess/answer feedback pattern once, ranks opening guesses
//! by the candidates they leave, and plays every solution through a recursive
//! solver that learns how many guesses a candidate set of a given size costs.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wordle_adaptive::core::{Pattern, Word};
//!
//! let guess = Word::new("crane").unwrap();
//! let answer = Word::new("slate").unwrap();
//!
//! let pattern = Pattern::calculate(&guess, &answer);
//! println!("Pattern value: {}", pattern.value());
//! ```

// Core domain types
pub mod core;

// Word corpora
pub mod wordlists;

// Cached and learned tables
pub mod tables;

// Run configuration and shared state
pub mod config;
pub mod context;
pub mod error;

// Solving algorithms
pub mod solver;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

pub use error::{AnalysisError, Result};
