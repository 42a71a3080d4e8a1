//! Partition-size scoring
//!
//! A guess splits the candidate set into one partition per distinct pattern
//! it can produce. The average partition size is `|S| / distinct`, so the best
//! guess is the one producing the most distinct patterns.

use crate::context::{AnalysisContext, Guess};
use crate::core::PATTERN_COUNT;
use rayon::prelude::*;

/// A guess with the average partition size it leaves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    pub guess: Guess,
    pub average_partition: f64,
}

/// Number of distinct patterns `guess` produces over `candidates`
#[must_use]
pub fn distinct_patterns(ctx: &AnalysisContext, guess: Guess, candidates: &[usize]) -> usize {
    let mut seen = [false; PATTERN_COUNT];
    let mut distinct = 0;
    for &s in candidates {
        let code = ctx.code(guess, s).index();
        if !seen[code] {
            seen[code] = true;
            distinct += 1;
        }
    }
    distinct
}

/// Best guess drawn from the candidate set itself (hard mode)
#[must_use]
pub fn best_candidate_guess(ctx: &AnalysisContext, candidates: &[usize]) -> Option<Scored> {
    best_of(
        ctx,
        candidates,
        candidates.par_iter().map(|&s| Guess::Candidate(s)),
    )
}

/// Best guess drawn from the whole guess corpus
#[must_use]
pub fn best_open_guess(ctx: &AnalysisContext, candidates: &[usize]) -> Option<Scored> {
    best_of(
        ctx,
        candidates,
        (0..ctx.guesses().len()).into_par_iter().map(Guess::Open),
    )
}

/// Most distinct patterns wins; ties go to the earliest guess in pool order
fn best_of<I>(ctx: &AnalysisContext, candidates: &[usize], pool: I) -> Option<Scored>
where
    I: IndexedParallelIterator<Item = Guess>,
{
    if candidates.is_empty() {
        return None;
    }

    pool.enumerate()
        .map(|(order, guess)| (order, guess, distinct_patterns(ctx, guess, candidates)))
        .reduce_with(|a, b| {
            if b.2 > a.2 || (b.2 == a.2 && b.0 < a.0) {
                b
            } else {
                a
            }
        })
        .map(|(_, guess, distinct)| Scored {
            guess,
            average_partition: candidates.len() as f64 / distinct as f64,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::WordCorpus;

    fn toy() -> AnalysisContext {
        let words = WordCorpus::from_strs(&["abcde", "abcdf", "fghij", "fghik"]).unwrap();
        AnalysisContext::build(words.clone(), words)
    }

    #[test]
    fn distinct_counts() {
        let ctx = toy();
        let all = [0, 1, 2, 3];
        // abcde: perfect, four greens, and all-gray twice
        assert_eq!(distinct_patterns(&ctx, Guess::Open(0), &all), 3);
        // fghij tells every candidate apart
        assert_eq!(distinct_patterns(&ctx, Guess::Open(2), &all), 4);
    }

    #[test]
    fn best_candidate_minimizes_average_partition() {
        let ctx = toy();
        let best = best_candidate_guess(&ctx, &[0, 1, 2, 3]).unwrap();
        assert_eq!(best.guess, Guess::Candidate(2));
        assert!((best.average_partition - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ties_go_to_first_in_corpus_order() {
        let ctx = toy();
        // Every member of {abcde, abcdf, fghij} separates all three
        let best = best_candidate_guess(&ctx, &[0, 1, 2]).unwrap();
        assert_eq!(best.guess, Guess::Candidate(0));

        let open = best_open_guess(&ctx, &[0, 1, 2]).unwrap();
        assert_eq!(open.guess, Guess::Open(0));
    }

    #[test]
    fn open_guess_can_come_from_outside_the_set() {
        let guesses = WordCorpus::from_strs(&["zzzzz", "bcdfg", "abcde"]).unwrap();
        let solutions = WordCorpus::from_strs(&["abxxx", "xbcxx", "xxcdx", "xxxdf"]).unwrap();
        let ctx = AnalysisContext::build(guesses, solutions);
        let candidates = [0, 1, 2, 3];

        let open = best_open_guess(&ctx, &candidates).unwrap();
        let hard = best_candidate_guess(&ctx, &candidates).unwrap();
        assert!(open.average_partition <= hard.average_partition);
        assert!(matches!(open.guess, Guess::Open(g) if g != 0));
    }

    #[test]
    fn empty_candidates_have_no_best_guess() {
        let ctx = toy();
        assert!(best_candidate_guess(&ctx, &[]).is_none());
        assert!(best_open_guess(&ctx, &[]).is_none());
    }
}
