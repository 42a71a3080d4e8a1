//! Guess selection strategies
//!
//! Defines the Strategy trait and concrete implementations. Strategies are
//! only consulted once three or more candidates remain; smaller sets are
//! handled by the solver directly.

use super::partition::{Scored, best_candidate_guess, best_open_guess};
use crate::context::{AnalysisContext, Guess};
use crate::tables::GuessEstimationTable;

/// A strategy for picking the next guess for a candidate set
pub trait Strategy {
    /// Select a guess for `candidates` (solution indices, corpus order)
    ///
    /// Returns `None` only if `candidates` is empty.
    fn select_guess(
        &self,
        ctx: &AnalysisContext,
        candidates: &[usize],
        estimates: &GuessEstimationTable,
    ) -> Option<Guess>;
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyType {
    /// Evidence-gated choice between hard-mode and open guesses (default)
    Adaptive(AdaptiveStrategy),
    /// Always guess a remaining candidate
    HardMode(HardModeStrategy),
    /// Always guess the best partitioning word from the whole corpus
    Open(OpenStrategy),
}

impl Strategy for StrategyType {
    fn select_guess(
        &self,
        ctx: &AnalysisContext,
        candidates: &[usize],
        estimates: &GuessEstimationTable,
    ) -> Option<Guess> {
        match self {
            Self::Adaptive(s) => s.select_guess(ctx, candidates, estimates),
            Self::HardMode(s) => s.select_guess(ctx, candidates, estimates),
            Self::Open(s) => s.select_guess(ctx, candidates, estimates),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "adaptive", "hard", "open".
    /// Defaults to adaptive if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "hard" | "hard-mode" => Self::HardMode(HardModeStrategy),
            "open" => Self::Open(OpenStrategy),
            _ => Self::Adaptive(AdaptiveStrategy),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Adaptive(_) => "adaptive",
            Self::HardMode(_) => "hard",
            Self::Open(_) => "open",
        }
    }
}

/// Guess the candidate that leaves the smallest average partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HardModeStrategy;

impl Strategy for HardModeStrategy {
    fn select_guess(
        &self,
        ctx: &AnalysisContext,
        candidates: &[usize],
        _estimates: &GuessEstimationTable,
    ) -> Option<Guess> {
        best_candidate_guess(ctx, candidates).map(|s| s.guess)
    }
}

/// Guess any corpus word that leaves the smallest average partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenStrategy;

impl Strategy for OpenStrategy {
    fn select_guess(
        &self,
        ctx: &AnalysisContext,
        candidates: &[usize],
        _estimates: &GuessEstimationTable,
    ) -> Option<Guess> {
        best_open_guess(ctx, candidates).map(|s| s.guess)
    }
}

/// Weigh the best hard-mode guess against the best open guess
///
/// The hard-mode guess may itself be the answer, so only `(n-1)/n` of its
/// further-guess estimate is paid. The open guess always pays in full. The
/// open guess is taken only when the estimation table has evidence on both
/// sides of both average partition sizes and says it is strictly cheaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdaptiveStrategy;

impl AdaptiveStrategy {
    /// Decide between a hard-mode and an open guess for `n` candidates
    #[must_use]
    pub fn prefer_open(n: usize, hard: f64, open: f64, estimates: &GuessEstimationTable) -> bool {
        let (Some(hard_further), Some(open_further)) =
            (estimates.further_guesses(hard), estimates.further_guesses(open))
        else {
            return false;
        };

        let n = n as f64;
        let expected_hard = 1.0 + ((n - 1.0) / n) * hard_further;
        let expected_open = 1.0 + open_further;
        log::debug!("n={n} hard {expected_hard:.3} vs open {expected_open:.3}");

        expected_open < expected_hard
    }
}

impl Strategy for AdaptiveStrategy {
    fn select_guess(
        &self,
        ctx: &AnalysisContext,
        candidates: &[usize],
        estimates: &GuessEstimationTable,
    ) -> Option<Guess> {
        let hard = best_candidate_guess(ctx, candidates)?;

        // Without evidence around `h` the open guess can never win
        if estimates.further_guesses(hard.average_partition).is_none() {
            return Some(hard.guess);
        }

        let open: Scored = best_open_guess(ctx, candidates)?;
        if Self::prefer_open(
            candidates.len(),
            hard.average_partition,
            open.average_partition,
            estimates,
        ) {
            Some(open.guess)
        } else {
            Some(hard.guess)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::WordCorpus;

    fn toy() -> AnalysisContext {
        let words = WordCorpus::from_strs(&["abcde", "abcdf", "fghij", "fghik"]).unwrap();
        AnalysisContext::build(words.clone(), words)
    }

    fn trained() -> GuessEstimationTable {
        let mut table = GuessEstimationTable::seeded(12);
        table.update(3, 3);
        table
    }

    #[test]
    fn from_name_defaults_to_adaptive() {
        assert_eq!(StrategyType::from_name("hard").name(), "hard");
        assert_eq!(StrategyType::from_name("open").name(), "open");
        assert_eq!(StrategyType::from_name("adaptive").name(), "adaptive");
        assert_eq!(StrategyType::from_name("whatever").name(), "adaptive");
    }

    #[test]
    fn hard_mode_picks_a_candidate() {
        let ctx = toy();
        let table = GuessEstimationTable::seeded(5);
        let guess = HardModeStrategy.select_guess(&ctx, &[0, 1, 2, 3], &table);
        assert_eq!(guess, Some(Guess::Candidate(2)));
    }

    #[test]
    fn open_picks_from_corpus() {
        let ctx = toy();
        let table = GuessEstimationTable::seeded(5);
        let guess = OpenStrategy.select_guess(&ctx, &[0, 1, 2, 3], &table);
        assert_eq!(guess, Some(Guess::Open(2)));
    }

    #[test]
    fn prefers_hard_mode_without_evidence() {
        // Only the seeds exist, so entry 3 has no evidence around h = 2.5
        let table = GuessEstimationTable::seeded(12);
        assert!(!AdaptiveStrategy::prefer_open(10, 2.5, 1.0, &table));
    }

    #[test]
    fn prefers_open_when_evidence_says_cheaper() {
        // further(2.5) = 0.5×1.5 + 0.5×3.0 = 2.25 → hard = 1 + 0.9×2.25 = 3.025
        // further(1.0) = 1.0 → open = 2.0
        assert!(AdaptiveStrategy::prefer_open(10, 2.5, 1.0, &trained()));
    }

    #[test]
    fn gating_needs_both_neighbours_of_open() {
        // open = 3.0 needs entry 4, which has no evidence
        assert!(!AdaptiveStrategy::prefer_open(10, 2.5, 3.0, &trained()));
    }

    #[test]
    fn prefers_hard_mode_on_tie_or_worse() {
        // n = 3, h = o = 1.0: hard = 1 + (2/3)×1 ≈ 1.67, open = 2.0
        let table = GuessEstimationTable::seeded(5);
        assert!(!AdaptiveStrategy::prefer_open(3, 1.0, 1.0, &table));
    }

    #[test]
    fn adaptive_falls_back_to_hard_mode() {
        let ctx = toy();
        let table = GuessEstimationTable::seeded(5);
        let guess = AdaptiveStrategy.select_guess(&ctx, &[0, 1, 2], &table);
        assert_eq!(guess, Some(Guess::Candidate(0)));
    }

    /// Four candidates one letter apart, plus a corpus word that hits all four letters
    fn one_letter_apart() -> AnalysisContext {
        let guesses =
            WordCorpus::from_strs(&["mxxxx", "nxxxx", "oxxxx", "pxxxx", "mnopz"]).unwrap();
        let solutions = WordCorpus::from_strs(&["mxxxx", "nxxxx", "oxxxx", "pxxxx"]).unwrap();
        AnalysisContext::build(guesses, solutions)
    }

    #[test]
    fn adaptive_takes_open_guess_with_evidence() {
        let ctx = one_letter_apart();
        let candidates = [0, 1, 2, 3];

        let hard = best_candidate_guess(&ctx, &candidates).unwrap();
        let open = best_open_guess(&ctx, &candidates).unwrap();
        assert!((hard.average_partition - 2.0).abs() < f64::EPSILON);
        assert!((open.average_partition - 1.0).abs() < f64::EPSILON);

        // hard = 1 + 0.75 × 1.5 = 2.125, open = 1 + 1.0 = 2.0
        let mut table = GuessEstimationTable::seeded(5);
        table.update(3, 3);
        let choice = AdaptiveStrategy.select_guess(&ctx, &candidates, &table);
        assert_eq!(choice, Some(Guess::Open(4)));
    }

    #[test]
    fn adaptive_stays_hard_without_evidence_above_h() {
        let ctx = one_letter_apart();
        let table = GuessEstimationTable::seeded(5);
        let choice = AdaptiveStrategy.select_guess(&ctx, &[0, 1, 2, 3], &table);
        assert_eq!(choice, Some(Guess::Candidate(0)));
    }
}
