//! Pattern matrix: the feedback code of every (guess, solution) pair
//!
//! Built once per corpus pair, then cached as a G-line snapshot of S codes
//! each. A cached snapshot is trusted as-is when its dimensions match and
//! rejected outright when they do not.

use super::snapshot;
use crate::core::{PATTERN_COUNT, Pattern};
use crate::error::{AnalysisError, Result};
use crate::wordlists::WordCorpus;
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

const WHAT: &str = "pattern matrix";

/// Row-major G×S table of pattern codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatrix {
    guesses: usize,
    solutions: usize,
    codes: Vec<Pattern>,
}

impl PatternMatrix {
    /// Compute every code, one guess row per parallel task
    #[must_use]
    pub fn build(guesses: &WordCorpus, solutions: &WordCorpus) -> Self {
        let start = Instant::now();
        let width = solutions.len();
        let mut codes = vec![Pattern::PERFECT; guesses.len() * width];

        if width > 0 {
            codes
                .par_chunks_mut(width)
                .zip(guesses.words().par_iter())
                .for_each(|(row, guess)| {
                    for (slot, answer) in row.iter_mut().zip(solutions.words()) {
                        *slot = Pattern::calculate(guess, answer);
                    }
                });
        }

        log::info!(
            "built {}x{} pattern matrix in {:.2}s",
            guesses.len(),
            width,
            start.elapsed().as_secs_f64()
        );

        Self {
            guesses: guesses.len(),
            solutions: width,
            codes,
        }
    }

    /// Number of guess rows (G)
    #[inline]
    #[must_use]
    pub const fn guess_count(&self) -> usize {
        self.guesses
    }

    /// Number of solution columns (S)
    #[inline]
    #[must_use]
    pub const fn solution_count(&self) -> usize {
        self.solutions
    }

    /// Code of `guess` played against `solution`
    #[inline]
    #[must_use]
    pub fn get(&self, guess: usize, solution: usize) -> Pattern {
        self.codes[guess * self.solutions + solution]
    }

    /// All codes for one guess, in solution order
    #[inline]
    #[must_use]
    pub fn row(&self, guess: usize) -> &[Pattern] {
        let start = guess * self.solutions;
        &self.codes[start..start + self.solutions]
    }

    /// Serialize as the snapshot text format
    ///
    /// # Errors
    /// Propagates writer errors.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        snapshot::write_rows(out, (0..self.guesses).map(|g| self.row(g)))
    }

    /// Parse a snapshot, requiring exactly `guesses` rows of `solutions` codes
    ///
    /// # Errors
    /// `CacheDimensionMismatch` on a wrong row count or row width,
    /// `MalformedSnapshot` on an unparsable or out-of-range code.
    pub fn parse(content: &str, guesses: usize, solutions: usize) -> Result<Self> {
        let mismatch = |found: String| AnalysisError::CacheDimensionMismatch {
            what: WHAT,
            expected: format!("{guesses}x{solutions}"),
            found,
        };

        let mut codes = Vec::with_capacity(guesses * solutions);
        let mut row_count = 0;
        for (line, text) in snapshot::rows(content) {
            row_count += 1;
            if row_count > guesses {
                continue;
            }

            let before = codes.len();
            for token in text.split_whitespace() {
                let raw: u8 = snapshot::parse_token(WHAT, line, token)?;
                let code = Pattern::new(raw).ok_or_else(|| AnalysisError::MalformedSnapshot {
                    what: WHAT,
                    line,
                    reason: format!("code {raw} is not below {PATTERN_COUNT}"),
                })?;
                codes.push(code);
            }

            let width = codes.len() - before;
            if width != solutions {
                return Err(mismatch(format!("{width} columns at line {line}")));
            }
        }

        if row_count != guesses {
            return Err(mismatch(format!("{row_count} rows")));
        }

        Ok(Self {
            guesses,
            solutions,
            codes,
        })
    }

    /// Load a cached matrix for the given corpora, if a snapshot exists
    ///
    /// # Errors
    /// I/O errors and any `parse` error.
    pub fn load(path: &Path, guesses: &WordCorpus, solutions: &WordCorpus) -> Result<Option<Self>> {
        let Some(content) = snapshot::read(path)? else {
            return Ok(None);
        };
        let start = Instant::now();
        let matrix = Self::parse(&content, guesses.len(), solutions.len())?;
        log::info!(
            "imported {}x{} pattern matrix from {} in {:.2}s",
            matrix.guesses,
            matrix.solutions,
            path.display(),
            start.elapsed().as_secs_f64()
        );
        Ok(Some(matrix))
    }

    /// Save the matrix snapshot atomically
    ///
    /// # Errors
    /// I/O errors while writing or renaming.
    pub fn save(&self, path: &Path) -> Result<()> {
        snapshot::write_atomic(path, |out| self.write_to(out))?;
        log::info!("wrote pattern matrix to {}", path.display());
        Ok(())
    }

    /// Load the cached matrix, or build and cache it
    ///
    /// With `use_cache` false any existing snapshot is ignored and replaced.
    ///
    /// # Errors
    /// Any `load` or `save` error; a mismatched snapshot is never rebuilt over.
    pub fn load_or_build(
        path: &Path,
        guesses: &WordCorpus,
        solutions: &WordCorpus,
        use_cache: bool,
    ) -> Result<Self> {
        if use_cache && let Some(matrix) = Self::load(path, guesses, solutions)? {
            return Ok(matrix);
        }
        let matrix = Self::build(guesses, solutions);
        matrix.save(path)?;
        Ok(matrix)
    }
}
