//! Recursive self-play solving
//!
//! Partition scoring, the guess strategies built on it, and the solver that
//! plays games with them.

mod engine;
pub mod partition;
pub mod strategy;

pub use engine::{GameOutcome, Solver, Step};
pub use strategy::{AdaptiveStrategy, HardModeStrategy, OpenStrategy, Strategy, StrategyType};
