//! Self-play over the solution corpus
//!
//! Every solution is played as the hidden answer with a forced opener. The
//! sequential run learns as it goes: each answer's observations are folded
//! into the estimation table before the next answer starts. The parallel run
//! reads a frozen table and merges the per-worker deltas once at the end.

use super::cancel::CancelToken;
use super::progress_bar;
use crate::error::Result;
use crate::solver::{Solver, Strategy};
use crate::tables::GuessEstimationTable;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Number of hardest answers kept in a report
const WORST_KEPT: usize = 10;

/// How a simulation run is set up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Guess index of the forced first word
    pub opener: usize,
    /// Play only the first `limit` solutions
    pub limit: Option<usize>,
    pub show_progress: bool,
}

/// Summary of a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub strategy: &'static str,
    pub opener: String,
    pub answers_total: usize,
    pub answers_played: usize,
    pub total_guesses: u64,
    pub distribution: BTreeMap<u32, usize>,
    pub worst: Vec<(String, u32)>,
    pub elapsed: Duration,
    pub cancelled: bool,
}

impl SimulationReport {
    /// Mean guesses per played answer
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.answers_played == 0 {
            0.0
        } else {
            self.total_guesses as f64 / self.answers_played as f64
        }
    }

    #[must_use]
    pub fn max_guesses(&self) -> u32 {
        self.distribution.keys().next_back().copied().unwrap_or(0)
    }

    fn from_games<S: Strategy>(
        solver: &Solver<S>,
        strategy: &'static str,
        config: &SimulationConfig,
        played: &[(usize, u32)],
        elapsed: Duration,
    ) -> Self {
        let ctx = solver.context();
        let answers_total = answer_count(solver, config);

        let mut distribution = BTreeMap::new();
        for &(_, guesses) in played {
            *distribution.entry(guesses).or_insert(0) += 1;
        }

        let mut worst: Vec<(String, u32)> = played
            .iter()
            .map(|&(answer, guesses)| (ctx.solutions().word(answer).to_string(), guesses))
            .collect();
        worst.sort_by_key(|(_, n)| std::cmp::Reverse(*n));
        worst.truncate(WORST_KEPT);

        Self {
            strategy,
            opener: ctx.guesses().word(config.opener).to_string(),
            answers_total,
            answers_played: played.len(),
            total_guesses: played.iter().map(|&(_, n)| u64::from(n)).sum(),
            distribution,
            worst,
            elapsed,
            cancelled: played.len() < answers_total,
        }
    }
}

fn answer_count<S: Strategy>(solver: &Solver<S>, config: &SimulationConfig) -> usize {
    let all = solver.context().solutions().len();
    config.limit.map_or(all, |limit| limit.min(all))
}

fn show_running_mean(pb: &ProgressBar, total: u64, played: usize) {
    if played % 10 == 0 && played > 0 {
        pb.set_message(format!("Avg: {:.3}", total as f64 / played as f64));
    }
}

/// Play every answer in order, learning after each one
///
/// On cancellation the table keeps the observations of every answer that
/// finished and the report is marked cancelled.
///
/// # Errors
/// Solver anomalies abort the run.
pub fn simulate<S: Strategy>(
    solver: &Solver<S>,
    strategy: &'static str,
    estimates: &mut GuessEstimationTable,
    config: &SimulationConfig,
    cancel: &CancelToken,
) -> Result<SimulationReport> {
    let count = answer_count(solver, config);
    let pb = progress_bar(count as u64, config.show_progress);
    let start = Instant::now();

    let mut played = Vec::with_capacity(count);
    let mut total = 0u64;

    for answer in 0..count {
        if cancel.is_cancelled() {
            log::warn!("simulation cancelled after {answer} of {count} answers");
            break;
        }

        let game = solver.play(answer, config.opener, estimates)?;
        estimates.apply(&game.observations);

        total += u64::from(game.guesses);
        played.push((answer, game.guesses));
        show_running_mean(&pb, total, played.len());
        pb.inc(1);
    }

    pb.finish_with_message("Complete!");
    Ok(SimulationReport::from_games(
        solver,
        strategy,
        config,
        &played,
        start.elapsed(),
    ))
}

/// Play every answer in parallel against a frozen table
///
/// Returns the games played in answer order and the observations they made,
/// folded into a table of their own.
///
/// # Errors
/// The first solver anomaly any worker hits.
pub fn play_frozen<S: Strategy + Sync>(
    solver: &Solver<S>,
    estimates: &GuessEstimationTable,
    config: &SimulationConfig,
    cancel: &CancelToken,
) -> Result<(Vec<(usize, u32)>, GuessEstimationTable)> {
    let count = answer_count(solver, config);
    let pb = progress_bar(count as u64, config.show_progress);
    let fresh = || (Vec::new(), GuessEstimationTable::empty(estimates.len()));

    let (mut played, delta) = (0..count)
        .into_par_iter()
        .try_fold(fresh, |(mut played, mut delta), answer| -> Result<_> {
            if !cancel.is_cancelled() {
                let game = solver.play(answer, config.opener, estimates)?;
                delta.apply(&game.observations);
                played.push((answer, game.guesses));
                pb.inc(1);
            }
            Ok((played, delta))
        })
        .try_reduce(fresh, |(mut played, mut delta), (more, other)| {
            played.extend(more);
            delta.merge(&other);
            Ok((played, delta))
        })?;

    pb.finish_with_message("Complete!");
    if played.len() < count {
        log::warn!("simulation cancelled after {} of {count} answers", played.len());
    }

    played.sort_unstable_by_key(|&(answer, _)| answer);
    Ok((played, delta))
}

/// Parallel simulation; the learned delta is merged into `estimates` at the end
///
/// # Errors
/// Solver anomalies abort the run and leave `estimates` untouched.
pub fn simulate_parallel<S: Strategy + Sync>(
    solver: &Solver<S>,
    strategy: &'static str,
    estimates: &mut GuessEstimationTable,
    config: &SimulationConfig,
    cancel: &CancelToken,
) -> Result<SimulationReport> {
    let start = Instant::now();
    let (played, delta) = play_frozen(solver, estimates, config, cancel)?;
    estimates.merge(&delta);

    Ok(SimulationReport::from_games(
        solver,
        strategy,
        config,
        &played,
        start.elapsed(),
    ))
}
