//! Opening-guess ranking
//!
//! One-ply ranking scores every guess by the total number of solutions left
//! after playing it, summed over every possible answer. The adaptive mode
//! re-ranks the best few by simulating full games with each as the opener.

use super::cancel::CancelToken;
use super::simulate::{SimulationConfig, play_frozen};
use crate::context::AnalysisContext;
use crate::core::PATTERN_COUNT;
use crate::error::Result;
use crate::solver::{Solver, Strategy};
use crate::tables::{GuessEstimationTable, PatternFrequencyTable, PatternMatrix, snapshot};
use rayon::prelude::*;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

/// How openers are scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RankingMode {
    /// Remaining totals from the frequency table
    Frequency,
    /// Remaining totals recounted from matrix rows
    Exhaustive,
    /// Mean guesses of a full simulation for the top openers
    Adaptive,
}

/// One opener with its score; lower is better
#[derive(Debug, Clone, PartialEq)]
pub struct OpenerScore {
    pub guess: usize,
    pub word: String,
    /// Average remaining candidates, or mean guesses in adaptive mode
    pub score: f64,
}

/// Ranked openers, best first
#[derive(Debug, Clone, PartialEq)]
pub struct OpenerRanking {
    pub mode: RankingMode,
    /// Remaining totals per guess, in guess-corpus order
    pub totals: Vec<u64>,
    pub ranked: Vec<OpenerScore>,
    pub elapsed: Duration,
    pub cancelled: bool,
}

impl OpenerRanking {
    #[must_use]
    pub fn best(&self, k: usize) -> &[OpenerScore] {
        &self.ranked[..k.min(self.ranked.len())]
    }

    /// Highest score; ties go to the earliest guess
    #[must_use]
    pub fn worst(&self) -> Option<&OpenerScore> {
        self.ranked
            .iter()
            .rev()
            .reduce(|worst, s| if s.score >= worst.score { s } else { worst })
    }

    /// Write the remaining totals as one space-separated line
    ///
    /// # Errors
    /// I/O errors while writing or renaming.
    pub fn save_summary(&self, path: &Path) -> Result<()> {
        snapshot::write_atomic(path, |out| {
            let line: Vec<String> = self.totals.iter().map(u64::to_string).collect();
            writeln!(out, "{}", line.join(" "))
        })?;
        log::info!("wrote opener summary to {}", path.display());
        Ok(())
    }
}

/// Remaining totals via the frequency table
///
/// Each worker takes a slice of answers and accumulates a full per-guess
/// vector; the vectors are summed element-wise.
#[must_use]
pub fn remaining_totals(matrix: &PatternMatrix, freq: &PatternFrequencyTable) -> Vec<u64> {
    let guesses = matrix.guess_count();
    (0..matrix.solution_count())
        .into_par_iter()
        .fold(
            || vec![0u64; guesses],
            |mut acc, s| {
                for (g, total) in acc.iter_mut().enumerate() {
                    *total += u64::from(freq.count(g, matrix.get(g, s)));
                }
                acc
            },
        )
        .reduce(
            || vec![0u64; guesses],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        )
}

/// Remaining totals recounted from each matrix row, without the frequency table
#[must_use]
pub fn remaining_totals_exhaustive(matrix: &PatternMatrix) -> Vec<u64> {
    (0..matrix.guess_count())
        .into_par_iter()
        .map(|g| {
            let row = matrix.row(g);
            let mut partition = [0u64; PATTERN_COUNT];
            for code in row {
                partition[code.index()] += 1;
            }
            row.iter().map(|code| partition[code.index()]).sum()
        })
        .collect()
}

/// Ascending by score, earliest guess first among equals
fn rank(ctx: &AnalysisContext, scores: impl Iterator<Item = (usize, f64)>) -> Vec<OpenerScore> {
    let mut ranked: Vec<OpenerScore> = scores
        .map(|(guess, score)| OpenerScore {
            guess,
            word: ctx.guesses().word(guess).to_string(),
            score,
        })
        .collect();
    ranked.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.guess.cmp(&b.guess)));
    ranked
}

fn rank_totals(ctx: &AnalysisContext, totals: &[u64]) -> Vec<OpenerScore> {
    let solutions = ctx.solutions().len() as f64;
    rank(
        ctx,
        totals
            .iter()
            .enumerate()
            .map(|(g, &total)| (g, total as f64 / solutions)),
    )
}

/// One-ply ranking of every guess
///
/// Exhaustive mode never reads `freq`; the other modes derive the table from
/// the matrix when none is given.
#[must_use]
pub fn rank_openers(
    ctx: &AnalysisContext,
    freq: Option<&PatternFrequencyTable>,
    mode: RankingMode,
) -> OpenerRanking {
    let start = Instant::now();
    let totals = match (mode, freq) {
        (RankingMode::Exhaustive, _) => remaining_totals_exhaustive(ctx.matrix()),
        (_, Some(freq)) => remaining_totals(ctx.matrix(), freq),
        (_, None) => remaining_totals(ctx.matrix(), &PatternFrequencyTable::from_matrix(ctx.matrix())),
    };
    log::info!("ranked {} openers in {:.2?}", totals.len(), start.elapsed());

    OpenerRanking {
        mode,
        ranked: rank_totals(ctx, &totals),
        totals,
        elapsed: start.elapsed(),
        cancelled: false,
    }
}

/// Re-rank the `top` best one-ply openers by simulated mean guesses
///
/// The estimation table is frozen for every opener so each is judged against
/// the same knowledge.
///
/// # Errors
/// Solver anomalies abort the ranking.
pub fn rank_openers_adaptive<S: Strategy + Sync>(
    solver: &Solver<S>,
    freq: &PatternFrequencyTable,
    estimates: &GuessEstimationTable,
    top: usize,
    cancel: &CancelToken,
) -> Result<OpenerRanking> {
    let ctx = solver.context();
    let start = Instant::now();
    let one_ply = rank_openers(ctx, Some(freq), RankingMode::Frequency);

    let mut simulated = Vec::new();
    let mut cancelled = false;
    for opener in one_ply.best(top) {
        if cancel.is_cancelled() {
            cancelled = true;
            break;
        }
        let config = SimulationConfig {
            opener: opener.guess,
            limit: None,
            show_progress: false,
        };
        let (played, _) = play_frozen(solver, estimates, &config, cancel)?;
        if played.len() < ctx.solutions().len() {
            cancelled = true;
            break;
        }

        let total: u64 = played.iter().map(|&(_, n)| u64::from(n)).sum();
        let mean = total as f64 / played.len() as f64;
        log::info!("{} averages {mean:.4} guesses", opener.word);
        simulated.push((opener.guess, mean));
    }

    Ok(OpenerRanking {
        mode: RankingMode::Adaptive,
        ranked: rank(ctx, simulated.into_iter()),
        totals: one_ply.totals,
        elapsed: start.elapsed(),
        cancelled,
    })
}
