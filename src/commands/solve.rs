//! Single-answer trace
//!
//! Plays one known answer and keeps every step for display.

use crate::context::Guess;
use crate::core::Pattern;
use crate::error::Result;
use crate::solver::{Solver, Strategy};
use crate::tables::GuessEstimationTable;

/// Result of tracing one answer
#[derive(Debug, Clone, PartialEq)]
pub struct SolveTrace {
    pub answer: String,
    pub strategy: &'static str,
    pub steps: Vec<TraceStep>,
    /// Sub-problems the game would teach the estimation table
    pub observations: usize,
}

/// A single guess in the trace
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStep {
    pub word: String,
    /// Whether the word came from outside the candidate set
    pub open: bool,
    pub pattern: Pattern,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

impl SolveTrace {
    #[must_use]
    pub fn guesses(&self) -> usize {
        self.steps.len()
    }
}

/// Trace the game for `answer` opened with `opener`
///
/// # Errors
/// `UnknownAnswer`, `MissingOpeningGuess` or any solver anomaly.
pub fn trace_answer<S: Strategy>(
    solver: &Solver<S>,
    strategy: &'static str,
    answer: &str,
    opener: &str,
    estimates: &GuessEstimationTable,
) -> Result<SolveTrace> {
    let ctx = solver.context();
    let answer_index = ctx.answer(answer)?;
    let opener_index = ctx.opener(opener)?;
    let game = solver.play(answer_index, opener_index, estimates)?;

    let steps = game
        .steps
        .iter()
        .map(|step| TraceStep {
            word: ctx.word(step.guess).to_string(),
            open: matches!(step.guess, Guess::Open(_)),
            pattern: step.pattern,
            candidates_before: step.candidates_before,
            candidates_after: step.candidates_after,
        })
        .collect();

    Ok(SolveTrace {
        answer: ctx.solutions().word(answer_index).to_string(),
        strategy,
        steps,
        observations: game.observations.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AnalysisContext;
    use crate::error::AnalysisError;
    use crate::solver::AdaptiveStrategy;
    use crate::wordlists::WordCorpus;

    fn toy() -> AnalysisContext {
        let words = WordCorpus::from_strs(&["abcde", "abcdf", "fghij", "fghik"]).unwrap();
        AnalysisContext::build(words.clone(), words)
    }

    #[test]
    fn trace_follows_the_game() {
        let ctx = toy();
        let solver = Solver::new(AdaptiveStrategy, &ctx);
        let table = GuessEstimationTable::seeded(ctx.estimation_len());

        let trace = trace_answer(&solver, "adaptive", "FGHIK", "abcde", &table).unwrap();
        assert_eq!(trace.answer, "fghik");
        assert_eq!(trace.guesses(), 3);

        let words: Vec<&str> = trace.steps.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(words, vec!["abcde", "fghij", "fghik"]);
        assert!(trace.steps[0].open);
        assert!(!trace.steps[1].open);
        assert_eq!(trace.steps[0].candidates_before, 4);
        assert_eq!(trace.steps[0].candidates_after, 2);
        assert!(trace.steps[2].pattern.is_perfect());
        assert_eq!(trace.observations, 0);
    }

    #[test]
    fn unknown_words_are_rejected() {
        let ctx = toy();
        let solver = Solver::new(AdaptiveStrategy, &ctx);
        let table = GuessEstimationTable::seeded(ctx.estimation_len());

        let err = trace_answer(&solver, "adaptive", "zzzzz", "abcde", &table).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownAnswer(_)));
        let err = trace_answer(&solver, "adaptive", "abcde", "roate", &table).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingOpeningGuess(_)));
    }
}
