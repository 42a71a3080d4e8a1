//! Guess estimation table
//!
//! Learned estimate of how many more guesses it takes to finish once `n`
//! candidates remain. Entry `n` holds a running mean and its sample count;
//! a zero count means there is no evidence for that size yet.
//!
//! The table is only ever written by a single owner. Solver runs record
//! [`Observation`]s into an [`ObservationLog`] and the owner applies the log
//! once the answer is resolved. Independently learned tables are combined
//! with [`GuessEstimationTable::merge`], which weights by sample count.

use super::snapshot;
use crate::error::{AnalysisError, Result};
use std::io::{self, Write};
use std::path::Path;

const WHAT: &str = "guess estimation table";

/// Running mean of guesses needed and the number of samples behind it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Estimate {
    pub average: f64,
    pub samples: u64,
}

impl Estimate {
    #[inline]
    #[must_use]
    pub const fn has_evidence(self) -> bool {
        self.samples > 0
    }
}

/// One resolved sub-problem: `guesses` were needed once `candidates` remained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub candidates: usize,
    pub guesses: u32,
}

/// Observations collected while solving, applied later by the table owner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationLog {
    entries: Vec<Observation>,
}

impl ObservationLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, candidates: usize, guesses: u32) {
        self.entries.push(Observation {
            candidates,
            guesses,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.entries.iter()
    }
}

/// Estimated remaining guesses indexed by candidate-set size
#[derive(Debug, Clone, PartialEq)]
pub struct GuessEstimationTable {
    entries: Vec<Estimate>,
}

impl GuessEstimationTable {
    /// A table of `len` entries with no evidence at all
    #[must_use]
    pub fn empty(len: usize) -> Self {
        Self {
            entries: vec![Estimate::default(); len],
        }
    }

    /// A fresh table with the two exact seeds
    ///
    /// One candidate takes exactly one guess; two candidates take 1.5 on
    /// average (guess one, then the other if needed).
    /// Seeds that do not fit in `len` entries are left out.
    #[must_use]
    pub fn seeded(len: usize) -> Self {
        let mut table = Self::empty(len);
        let seeds = [(1, 1.0), (2, 1.5)];
        for (n, average) in seeds {
            if let Some(entry) = table.entries.get_mut(n) {
                *entry = Estimate {
                    average,
                    samples: 1,
                };
            }
        }
        table
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Estimate for `n` candidates; sizes past the end have no evidence
    #[must_use]
    pub fn lookup(&self, n: usize) -> Estimate {
        self.entries.get(n).copied().unwrap_or_default()
    }

    /// Fold one observation into the running mean for `n`
    pub fn update(&mut self, n: usize, guesses: u32) {
        if n >= self.entries.len() {
            self.entries.resize(n + 1, Estimate::default());
        }
        let entry = &mut self.entries[n];
        let samples = entry.samples as f64;
        entry.average = (entry.average * samples + f64::from(guesses)) / (samples + 1.0);
        entry.samples += 1;
    }

    /// Apply every observation in a log, in order
    pub fn apply(&mut self, log: &ObservationLog) {
        for obs in log.iter() {
            self.update(obs.candidates, obs.guesses);
        }
    }

    /// Interpolated further-guess estimate for a fractional set size
    ///
    /// Blends the entries at `floor(x)` and `floor(x) + 1` by the fractional
    /// part of `x`. Returns `None` unless both entries have evidence.
    #[must_use]
    pub fn further_guesses(&self, x: f64) -> Option<f64> {
        let floor = x.floor();
        let frac = x - floor;
        let lo = self.lookup(floor as usize);
        let hi = self.lookup(floor as usize + 1);
        if !(lo.has_evidence() && hi.has_evidence()) {
            return None;
        }
        Some((1.0 - frac) * lo.average + frac * hi.average)
    }

    /// Combine another independently learned table into this one
    ///
    /// Each entry becomes the sample-weighted mean of both sides, which is
    /// what applying the other side's observations one by one would give.
    pub fn merge(&mut self, other: &Self) {
        if other.entries.len() > self.entries.len() {
            self.entries.resize(other.entries.len(), Estimate::default());
        }
        for (mine, theirs) in self.entries.iter_mut().zip(&other.entries) {
            if !theirs.has_evidence() {
                continue;
            }
            let total = mine.samples + theirs.samples;
            mine.average = (mine.average * mine.samples as f64
                + theirs.average * theirs.samples as f64)
                / total as f64;
            mine.samples = total;
        }
    }

    /// Serialize as `"<average> <samples>"` lines, line index = set size
    ///
    /// # Errors
    /// Propagates writer errors.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{:?} {}", entry.average, entry.samples)?;
        }
        Ok(())
    }

    /// Parse a snapshot that must hold exactly `len` entries
    ///
    /// # Errors
    /// `MalformedSnapshot` on a bad line, `CacheDimensionMismatch` on a wrong
    /// entry count.
    pub fn parse(content: &str, len: usize) -> Result<Self> {
        let mut entries = Vec::with_capacity(len);
        for (line, text) in snapshot::rows(content) {
            let mut tokens = text.split_whitespace();
            let (Some(average), Some(samples), None) = (tokens.next(), tokens.next(), tokens.next())
            else {
                return Err(AnalysisError::MalformedSnapshot {
                    what: WHAT,
                    line,
                    reason: "expected '<average> <samples>'".to_string(),
                });
            };
            entries.push(Estimate {
                average: snapshot::parse_token(WHAT, line, average)?,
                samples: snapshot::parse_token(WHAT, line, samples)?,
            });
        }

        if entries.len() != len {
            return Err(AnalysisError::CacheDimensionMismatch {
                what: WHAT,
                expected: format!("{len} entries"),
                found: format!("{} entries", entries.len()),
            });
        }

        Ok(Self { entries })
    }

    /// Load the persisted table, or start a seeded one of `len` entries
    ///
    /// # Errors
    /// I/O errors, or any `parse` error for an existing snapshot.
    pub fn load_or_seed(path: &Path, len: usize) -> Result<Self> {
        match snapshot::read(path)? {
            Some(content) => {
                let table = Self::parse(&content, len)?;
                log::info!(
                    "imported guess estimation table ({} entries) from {}",
                    table.len(),
                    path.display()
                );
                Ok(table)
            }
            None => {
                log::info!("starting a blank guess estimation table ({len} entries)");
                Ok(Self::seeded(len))
            }
        }
    }

    /// Save the whole table atomically
    ///
    /// # Errors
    /// I/O errors while writing or renaming.
    pub fn save(&self, path: &Path) -> Result<()> {
        snapshot::write_atomic(path, |out| self.write_to(out))?;
        log::info!("wrote guess estimation table to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::snapshot::testing::scratch_dir;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn seeded_entries() {
        let table = GuessEstimationTable::seeded(10);
        assert_eq!(table.len(), 10);
        assert_eq!(table.lookup(0), Estimate::default());
        assert_eq!(
            table.lookup(1),
            Estimate {
                average: 1.0,
                samples: 1
            }
        );
        assert_eq!(
            table.lookup(2),
            Estimate {
                average: 1.5,
                samples: 1
            }
        );
        assert!(!table.lookup(3).has_evidence());
    }

    #[test]
    fn single_update_from_empty() {
        let mut table = GuessEstimationTable::empty(10);
        table.update(5, 3);
        assert_eq!(
            table.lookup(5),
            Estimate {
                average: 3.0,
                samples: 1
            }
        );
    }

    #[test]
    fn updates_give_running_mean() {
        let mut table = GuessEstimationTable::empty(10);
        for v in [2, 3, 3, 4, 5] {
            table.update(7, v);
        }
        let estimate = table.lookup(7);
        assert_eq!(estimate.samples, 5);
        assert!(close(estimate.average, 17.0 / 5.0));
    }

    #[test]
    fn update_grows_table() {
        let mut table = GuessEstimationTable::empty(2);
        table.update(6, 4);
        assert_eq!(table.len(), 7);
        assert_eq!(table.lookup(6).samples, 1);
    }

    #[test]
    fn lookup_past_end_has_no_evidence() {
        let table = GuessEstimationTable::seeded(4);
        assert!(!table.lookup(100).has_evidence());
    }

    #[test]
    fn further_guesses_interpolates() {
        let table = GuessEstimationTable::seeded(5);
        assert!(close(table.further_guesses(1.0).unwrap(), 1.0));
        assert!(close(table.further_guesses(1.5).unwrap(), 1.25));
        assert!(close(table.further_guesses(1.25).unwrap(), 1.125));
    }

    #[test]
    fn further_guesses_requires_both_neighbours() {
        let mut table = GuessEstimationTable::seeded(6);
        // floor(2.0) + 1 = 3 has no evidence, even though the weight on it is zero
        assert_eq!(table.further_guesses(2.0), None);
        table.update(3, 2);
        assert!(table.further_guesses(2.0).is_some());
        assert_eq!(table.further_guesses(3.5), None);
    }

    #[test]
    fn merge_matches_sequential_application() {
        let mut sequential = GuessEstimationTable::seeded(8);
        let mut merged = GuessEstimationTable::seeded(8);
        let mut delta_a = GuessEstimationTable::empty(8);
        let mut delta_b = GuessEstimationTable::empty(8);

        for (n, v) in [(3, 2), (4, 3), (3, 3)] {
            sequential.update(n, v);
            delta_a.update(n, v);
        }
        for (n, v) in [(3, 4), (5, 3)] {
            sequential.update(n, v);
            delta_b.update(n, v);
        }

        delta_a.merge(&delta_b);
        merged.merge(&delta_a);

        for n in 0..8 {
            let (a, b) = (sequential.lookup(n), merged.lookup(n));
            assert_eq!(a.samples, b.samples, "samples at {n}");
            assert!(close(a.average, b.average), "average at {n}");
        }
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let mut table = GuessEstimationTable::seeded(5);
        table.update(3, 2);
        let before = table.clone();
        table.merge(&GuessEstimationTable::empty(5));
        assert_eq!(table, before);
    }

    #[test]
    fn apply_log_in_order() {
        let mut log = ObservationLog::new();
        log.record(3, 2);
        log.record(4, 3);
        log.record(3, 4);
        assert_eq!(log.len(), 3);

        let mut table = GuessEstimationTable::seeded(5);
        table.apply(&log);
        assert_eq!(table.lookup(3).samples, 2);
        assert!(close(table.lookup(3).average, 3.0));
        assert_eq!(table.lookup(4).samples, 1);
    }

    #[test]
    fn snapshot_round_trip() {
        let dir = scratch_dir("estimates");
        let path = dir.join("estimates.txt");
        let mut table = GuessEstimationTable::seeded(6);
        table.update(4, 3);
        table.update(4, 2);
        table.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("0.0 0\n1.0 1\n1.5 1\n"));

        let loaded = GuessEstimationTable::load_or_seed(&path, 6).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn load_missing_seeds() {
        let dir = scratch_dir("estimates_missing");
        let table = GuessEstimationTable::load_or_seed(&dir.join("none.txt"), 9).unwrap();
        assert_eq!(table, GuessEstimationTable::seeded(9));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let err = GuessEstimationTable::parse("0.0 0\n1.0 1\n", 3).unwrap_err();
        assert!(matches!(err, AnalysisError::CacheDimensionMismatch { .. }));
    }

    #[test]
    fn parse_rejects_malformed_line() {
        let err = GuessEstimationTable::parse("0.0 0\n1.0\n", 2).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedSnapshot { line: 2, .. }));
        let err = GuessEstimationTable::parse("0.0 x\n", 1).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedSnapshot { line: 1, .. }));
    }
}
