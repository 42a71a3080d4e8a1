//! Recursive self-play solver
//!
//! Plays one hidden answer at a time: force the opener, narrow the candidate
//! set by the observed pattern, and let the strategy pick guesses until the
//! answer is hit. Every resolved sub-problem of three or more candidates is
//! recorded as an observation for the estimation table.

use super::strategy::Strategy;
use crate::context::{AnalysisContext, Guess};
use crate::core::Pattern;
use crate::error::{AnalysisError, Result};
use crate::tables::{GuessEstimationTable, ObservationLog};

/// One guess played during a game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub guess: Guess,
    pub pattern: Pattern,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

/// Everything one simulated game produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameOutcome {
    pub guesses: u32,
    pub steps: Vec<Step>,
    pub observations: ObservationLog,
}

/// Self-play solver
///
/// Coordinates the solving process using a given strategy.
pub struct Solver<'a, S: Strategy> {
    strategy: S,
    ctx: &'a AnalysisContext,
}

impl<'a, S: Strategy> Solver<'a, S> {
    pub const fn new(strategy: S, ctx: &'a AnalysisContext) -> Self {
        Self { strategy, ctx }
    }

    #[must_use]
    pub const fn context(&self) -> &'a AnalysisContext {
        self.ctx
    }

    #[must_use]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Play a full game against `answer`, starting with the forced `opener`
    ///
    /// The estimation table is only read; observations are returned in the
    /// outcome for the caller to apply.
    ///
    /// # Errors
    /// `EmptyCandidateSet` or `SolverAnomaly` if the matrix and codec disagree.
    pub fn play(
        &self,
        answer: usize,
        opener: usize,
        estimates: &GuessEstimationTable,
    ) -> Result<GameOutcome> {
        let ctx = self.ctx;
        let mut game = GameOutcome::default();
        let guess = Guess::Open(opener);
        let observed = ctx.code(guess, answer);
        let candidates = ctx.candidates_after(opener, observed);

        game.steps.push(Step {
            guess,
            pattern: observed,
            candidates_before: ctx.solutions().len(),
            candidates_after: candidates.len(),
        });

        game.guesses = if ctx.is_answer(guess, answer) {
            1
        } else {
            1 + self.solve(answer, candidates, estimates, &mut game)?
        };
        Ok(game)
    }

    /// Guesses needed to reach `answer` from `candidates`
    ///
    /// Sets of one or two candidates are settled directly without asking the
    /// strategy. Larger sets record `(|S|, guesses)` into the game's log after
    /// the recursion below them resolves.
    ///
    /// # Errors
    /// `EmptyCandidateSet` or `SolverAnomaly` on an inconsistent state.
    pub fn solve(
        &self,
        answer: usize,
        candidates: Vec<usize>,
        estimates: &GuessEstimationTable,
        game: &mut GameOutcome,
    ) -> Result<u32> {
        let ctx = self.ctx;
        let n = candidates.len();

        if n == 0 {
            return Err(self.empty(answer));
        }
        if !candidates.contains(&answer) {
            return Err(self.anomaly(answer, "answer is not among the remaining candidates"));
        }

        if n <= 2 {
            for (i, &s) in candidates.iter().enumerate() {
                let guess = Guess::Candidate(s);
                let hit = ctx.is_answer(guess, answer);
                game.steps.push(Step {
                    guess,
                    pattern: ctx.code(guess, answer),
                    candidates_before: n - i,
                    candidates_after: if hit { 1 } else { n - i - 1 },
                });
                if hit {
                    return Ok(i as u32 + 1);
                }
            }
            return Err(self.anomaly(answer, "answer missed in a two-candidate set"));
        }

        let guess = self
            .strategy
            .select_guess(ctx, &candidates, estimates)
            .ok_or_else(|| self.anomaly(answer, "strategy returned no guess"))?;
        let observed = ctx.code(guess, answer);

        let used = if ctx.is_answer(guess, answer) {
            game.steps.push(Step {
                guess,
                pattern: observed,
                candidates_before: n,
                candidates_after: 1,
            });
            1
        } else {
            if observed.is_perfect() {
                return Err(self.anomaly(answer, "all-green pattern for a different word"));
            }

            let remaining = ctx.filter(&candidates, guess, observed);
            game.steps.push(Step {
                guess,
                pattern: observed,
                candidates_before: n,
                candidates_after: remaining.len(),
            });

            if remaining.is_empty() {
                return Err(self.empty(answer));
            }
            if remaining.len() == n {
                return Err(self.anomaly(
                    answer,
                    &format!("guess '{}' did not narrow {n} candidates", ctx.word(guess)),
                ));
            }

            1 + self.solve(answer, remaining, estimates, game)?
        };

        game.observations.record(n, used);
        Ok(used)
    }

    fn empty(&self, answer: usize) -> AnalysisError {
        AnalysisError::EmptyCandidateSet {
            answer: self.ctx.solutions().word(answer).to_string(),
        }
    }

    fn anomaly(&self, answer: usize, reason: &str) -> AnalysisError {
        AnalysisError::SolverAnomaly {
            answer: self.ctx.solutions().word(answer).to_string(),
            reason: reason.to_string(),
        }
    }
}
