//! Pattern frequency table: per guess, how many solutions produce each code
//!
//! Derived from the pattern matrix. Looking up `count(g, matrix[g][s])` gives
//! the number of solutions left after guessing `g` when `s` is the answer,
//! which is all one-ply opener ranking needs.

use super::matrix::PatternMatrix;
use super::snapshot;
use crate::core::{PATTERN_COUNT, Pattern};
use crate::error::{AnalysisError, Result};
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::Path;

const WHAT: &str = "pattern frequency table";

/// G×243 histogram of pattern codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFrequencyTable {
    guesses: usize,
    solutions: usize,
    counts: Vec<u32>,
}

impl PatternFrequencyTable {
    /// Histogram every matrix row
    #[must_use]
    pub fn from_matrix(matrix: &PatternMatrix) -> Self {
        let mut counts = vec![0u32; matrix.guess_count() * PATTERN_COUNT];
        counts
            .par_chunks_mut(PATTERN_COUNT)
            .enumerate()
            .for_each(|(g, histogram)| {
                for code in matrix.row(g) {
                    histogram[code.index()] += 1;
                }
            });

        Self {
            guesses: matrix.guess_count(),
            solutions: matrix.solution_count(),
            counts,
        }
    }

    /// Number of guess rows
    #[inline]
    #[must_use]
    pub const fn guess_count(&self) -> usize {
        self.guesses
    }

    /// Number of solutions each row was counted over
    #[inline]
    #[must_use]
    pub const fn solution_count(&self) -> usize {
        self.solutions
    }

    /// Solutions producing `pattern` when `guess` is played
    #[inline]
    #[must_use]
    pub fn count(&self, guess: usize, pattern: Pattern) -> u32 {
        self.counts[guess * PATTERN_COUNT + pattern.index()]
    }

    /// The full 243-entry histogram of one guess
    #[inline]
    #[must_use]
    pub fn row(&self, guess: usize) -> &[u32] {
        let start = guess * PATTERN_COUNT;
        &self.counts[start..start + PATTERN_COUNT]
    }

    /// Serialize as the snapshot text format
    ///
    /// # Errors
    /// Propagates writer errors.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        snapshot::write_rows(out, (0..self.guesses).map(|g| self.row(g)))
    }

    /// Parse a snapshot of `guesses` rows whose histograms each sum to `solutions`
    ///
    /// # Errors
    /// `CacheDimensionMismatch` on a wrong shape or row total,
    /// `MalformedSnapshot` on an unparsable count.
    pub fn parse(content: &str, guesses: usize, solutions: usize) -> Result<Self> {
        let mismatch = |found: String| AnalysisError::CacheDimensionMismatch {
            what: WHAT,
            expected: format!("{guesses}x{PATTERN_COUNT} summing to {solutions} per row"),
            found,
        };

        let mut counts = Vec::with_capacity(guesses * PATTERN_COUNT);
        let mut row_count = 0;
        for (line, text) in snapshot::rows(content) {
            row_count += 1;
            if row_count > guesses {
                continue;
            }

            let before = counts.len();
            for token in text.split_whitespace() {
                counts.push(snapshot::parse_token::<u32>(WHAT, line, token)?);
            }

            let row = &counts[before..];
            if row.len() != PATTERN_COUNT {
                return Err(mismatch(format!("{} columns at line {line}", row.len())));
            }
            let total: u64 = row.iter().map(|&c| u64::from(c)).sum();
            if total != solutions as u64 {
                return Err(mismatch(format!("row total {total} at line {line}")));
            }
        }

        if row_count != guesses {
            return Err(mismatch(format!("{row_count} rows")));
        }

        Ok(Self {
            guesses,
            solutions,
            counts,
        })
    }

    /// Load the cached table, or derive it from the matrix and cache it
    ///
    /// # Errors
    /// I/O errors, or any `parse` error for an existing snapshot.
    pub fn load_or_build(path: &Path, matrix: &PatternMatrix, use_cache: bool) -> Result<Self> {
        if use_cache && let Some(content) = snapshot::read(path)? {
            let table = Self::parse(&content, matrix.guess_count(), matrix.solution_count())?;
            log::info!(
                "imported {}x{PATTERN_COUNT} pattern frequency table from {}",
                table.guesses,
                path.display()
            );
            return Ok(table);
        }

        let table = Self::from_matrix(matrix);
        snapshot::write_atomic(path, |out| table.write_to(out))?;
        log::info!("wrote pattern frequency table to {}", path.display());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::snapshot::testing::scratch_dir;
    use crate::wordlists::WordCorpus;

    fn toy_matrix() -> PatternMatrix {
        let words = WordCorpus::from_strs(&["abcde", "abcdf", "fghij", "fghik"]).unwrap();
        PatternMatrix::build(&words, &words)
    }

    #[test]
    fn rows_sum_to_solution_count() {
        let matrix = toy_matrix();
        let table = PatternFrequencyTable::from_matrix(&matrix);
        for g in 0..table.guess_count() {
            assert_eq!(table.row(g).iter().sum::<u32>(), 4);
        }
    }

    #[test]
    fn counts_match_matrix() {
        let matrix = toy_matrix();
        let table = PatternFrequencyTable::from_matrix(&matrix);

        // abcde sees itself (perfect), abcdf (four greens) and two all-gray words
        assert_eq!(table.count(0, Pattern::PERFECT), 1);
        assert_eq!(table.count(0, Pattern::new(0).unwrap()), 2);
        assert_eq!(table.count(0, matrix.get(0, 1)), 1);
    }

    #[test]
    fn every_count_is_the_partition_size() {
        let matrix = toy_matrix();
        let table = PatternFrequencyTable::from_matrix(&matrix);
        for g in 0..4 {
            for s in 0..4 {
                let code = matrix.get(g, s);
                let expected = matrix.row(g).iter().filter(|&&c| c == code).count();
                assert_eq!(table.count(g, code) as usize, expected);
            }
        }
    }

    #[test]
    fn parse_round_trip() {
        let table = PatternFrequencyTable::from_matrix(&toy_matrix());
        let mut bytes = Vec::new();
        table.write_to(&mut bytes).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(PatternFrequencyTable::parse(&text, 4, 4).unwrap(), table);
    }

    #[test]
    fn parse_rejects_wrong_width() {
        let err = PatternFrequencyTable::parse("1 2 3\n", 1, 6).unwrap_err();
        assert!(matches!(err, AnalysisError::CacheDimensionMismatch { .. }));
    }

    #[test]
    fn parse_rejects_wrong_row_total() {
        let table = PatternFrequencyTable::from_matrix(&toy_matrix());
        let mut bytes = Vec::new();
        table.write_to(&mut bytes).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let err = PatternFrequencyTable::parse(&text, 4, 5).unwrap_err();
        assert!(matches!(err, AnalysisError::CacheDimensionMismatch { .. }));
    }

    #[test]
    fn load_or_build_reuses_snapshot() {
        let dir = scratch_dir("freq_cache");
        let path = dir.join("freq.txt");
        let matrix = toy_matrix();

        let built = PatternFrequencyTable::load_or_build(&path, &matrix, true).unwrap();
        let loaded = PatternFrequencyTable::load_or_build(&path, &matrix, true).unwrap();
        assert_eq!(built, loaded);
    }
}
