//! Error taxonomy for corpus loading, cache snapshots and solver runs
//!
//! Every loading failure is fatal before a run starts, and every solver anomaly
//! aborts the run: a silently skipped answer would corrupt aggregate averages.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the analyzer library
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("malformed corpus {path}:{line}: {reason}")]
    MalformedCorpus {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("{what} snapshot is {found}, expected {expected}")]
    CacheDimensionMismatch {
        what: &'static str,
        expected: String,
        found: String,
    },

    #[error("malformed {what} snapshot at line {line}: {reason}")]
    MalformedSnapshot {
        what: &'static str,
        line: usize,
        reason: String,
    },

    #[error("opening guess '{0}' is not in the guess corpus")]
    MissingOpeningGuess(String),

    #[error("answer '{0}' is not in the solution corpus")]
    UnknownAnswer(String),

    #[error("candidate set became empty while solving '{answer}'")]
    EmptyCandidateSet { answer: String },

    #[error("solver anomaly while solving '{answer}': {reason}")]
    SolverAnomaly { answer: String, reason: String },

    #[error("i/o error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the library
pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
