//! File layout and run defaults

use std::path::{Path, PathBuf};

/// Opening guess forced on every simulated game unless configured otherwise
pub const DEFAULT_OPENER: &str = "roate";

pub const PATTERN_MATRIX_FILE: &str = "output_pattern_matrix.txt";
pub const PATTERN_FREQ_FILE: &str = "output_pattern_freq_matrix.txt";
pub const GUESS_ESTIMATION_FILE: &str = "output_guess_estimation.txt";
pub const SUMMARY_FILE: &str = "output_solution.txt";

/// Where corpora are read from and where snapshots are cached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPaths {
    pub guesses: PathBuf,
    pub solutions: PathBuf,
    pub pattern_matrix: PathBuf,
    pub frequency_table: PathBuf,
    pub estimates: PathBuf,
    pub summary: PathBuf,
}

impl AnalysisPaths {
    /// Standard snapshot file names inside `cache_dir`
    #[must_use]
    pub fn new(guesses: impl Into<PathBuf>, solutions: impl Into<PathBuf>, cache_dir: &Path) -> Self {
        Self {
            guesses: guesses.into(),
            solutions: solutions.into(),
            pattern_matrix: cache_dir.join(PATTERN_MATRIX_FILE),
            frequency_table: cache_dir.join(PATTERN_FREQ_FILE),
            estimates: cache_dir.join(GUESS_ESTIMATION_FILE),
            summary: cache_dir.join(SUMMARY_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_in_cache_dir() {
        let paths = AnalysisPaths::new("words.txt", "solutions.txt", Path::new("out"));
        assert_eq!(paths.guesses, PathBuf::from("words.txt"));
        assert_eq!(paths.pattern_matrix, Path::new("out").join(PATTERN_MATRIX_FILE));
        assert_eq!(paths.estimates, Path::new("out").join(GUESS_ESTIMATION_FILE));
        assert_eq!(paths.summary, Path::new("out").join(SUMMARY_FILE));
    }
}
