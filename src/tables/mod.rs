//! Precomputed and learned tables
//!
//! The pattern matrix and its frequency histogram are build-once caches keyed
//! by corpus size. The guess estimation table is learned across runs.

pub mod estimation;
pub mod frequency;
pub mod matrix;
pub(crate) mod snapshot;

pub use estimation::{Estimate, GuessEstimationTable, Observation, ObservationLog};
pub use frequency::PatternFrequencyTable;
pub use matrix::PatternMatrix;
