//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{print_corpus_summary, print_ranking, print_simulation_report, print_trace};
