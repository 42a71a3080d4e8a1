//! Immutable analysis context
//!
//! Both corpora and the pattern matrix, built once and passed by reference to
//! every solver and command. Nothing else holds word lists.

use crate::config::AnalysisPaths;
use crate::core::{Pattern, Word};
use crate::error::{AnalysisError, Result};
use crate::tables::PatternMatrix;
use crate::wordlists::{WordCorpus, loader};

/// A word that can be played, addressed in whichever corpus it comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    /// A member of the candidate set, by solution index
    Candidate(usize),
    /// Any word of the guess corpus, by guess index
    Open(usize),
}

/// Corpora plus the matrix relating them
#[derive(Debug)]
pub struct AnalysisContext {
    guesses: WordCorpus,
    solutions: WordCorpus,
    matrix: PatternMatrix,
    /// Guess-corpus row of each solution word, when it has one
    solution_rows: Vec<Option<usize>>,
}

impl AnalysisContext {
    /// Assemble a context from a matrix built for these corpora
    ///
    /// # Errors
    /// `CacheDimensionMismatch` if the matrix shape disagrees with the corpora.
    pub fn new(guesses: WordCorpus, solutions: WordCorpus, matrix: PatternMatrix) -> Result<Self> {
        if matrix.guess_count() != guesses.len() || matrix.solution_count() != solutions.len() {
            return Err(AnalysisError::CacheDimensionMismatch {
                what: "pattern matrix",
                expected: format!("{}x{}", guesses.len(), solutions.len()),
                found: format!("{}x{}", matrix.guess_count(), matrix.solution_count()),
            });
        }

        let solution_rows = solutions
            .words()
            .iter()
            .map(|w| guesses.index_of(w))
            .collect();

        Ok(Self {
            guesses,
            solutions,
            matrix,
            solution_rows,
        })
    }

    /// Build the matrix in memory, without touching any cache
    #[must_use]
    pub fn build(guesses: WordCorpus, solutions: WordCorpus) -> Self {
        let matrix = PatternMatrix::build(&guesses, &solutions);
        let solution_rows = solutions
            .words()
            .iter()
            .map(|w| guesses.index_of(w))
            .collect();
        Self {
            guesses,
            solutions,
            matrix,
            solution_rows,
        }
    }

    /// Load both corpora and the cached (or freshly built) matrix
    ///
    /// # Errors
    /// Any corpus or matrix loading error; all of them are fatal.
    pub fn load(paths: &AnalysisPaths, use_cache: bool) -> Result<Self> {
        let guesses = loader::load_from_file(&paths.guesses)?;
        let solutions = loader::load_from_file(&paths.solutions)?;
        let matrix = PatternMatrix::load_or_build(&paths.pattern_matrix, &guesses, &solutions, use_cache)?;
        Self::new(guesses, solutions, matrix)
    }

    #[inline]
    #[must_use]
    pub const fn guesses(&self) -> &WordCorpus {
        &self.guesses
    }

    #[inline]
    #[must_use]
    pub const fn solutions(&self) -> &WordCorpus {
        &self.solutions
    }

    #[inline]
    #[must_use]
    pub const fn matrix(&self) -> &PatternMatrix {
        &self.matrix
    }

    /// Estimation table length: every candidate-set size up to S
    #[must_use]
    pub fn estimation_len(&self) -> usize {
        self.solutions.len() + 1
    }

    /// Guess index of the configured opening word
    ///
    /// # Errors
    /// `MissingOpeningGuess` if the word is not in the guess corpus.
    pub fn opener(&self, word: &str) -> Result<usize> {
        self.guesses
            .find(word)
            .ok_or_else(|| AnalysisError::MissingOpeningGuess(word.to_string()))
    }

    /// Solution index of an answer word
    ///
    /// # Errors
    /// `UnknownAnswer` if the word is not in the solution corpus.
    pub fn answer(&self, word: &str) -> Result<usize> {
        self.solutions
            .find(word)
            .ok_or_else(|| AnalysisError::UnknownAnswer(word.to_string()))
    }

    /// The word a guess refers to
    #[must_use]
    pub fn word(&self, guess: Guess) -> &Word {
        match guess {
            Guess::Candidate(s) => self.solutions.word(s),
            Guess::Open(g) => self.guesses.word(g),
        }
    }

    /// Code produced by `guess` when `solution` is the answer
    ///
    /// Candidate guesses use their matrix row when the word is also in the
    /// guess corpus and fall back to the codec otherwise.
    #[must_use]
    pub fn code(&self, guess: Guess, solution: usize) -> Pattern {
        match guess {
            Guess::Open(g) => self.matrix.get(g, solution),
            Guess::Candidate(s) => match self.solution_rows[s] {
                Some(g) => self.matrix.get(g, solution),
                None => Pattern::calculate(self.solutions.word(s), self.solutions.word(solution)),
            },
        }
    }

    /// Whether playing `guess` wins outright when `answer` is hidden
    #[must_use]
    pub fn is_answer(&self, guess: Guess, answer: usize) -> bool {
        self.word(guess) == self.solutions.word(answer)
    }

    /// Candidates whose code against `guess` equals `observed`, order kept
    #[must_use]
    pub fn filter(&self, candidates: &[usize], guess: Guess, observed: Pattern) -> Vec<usize> {
        candidates
            .iter()
            .copied()
            .filter(|&s| self.code(guess, s) == observed)
            .collect()
    }

    /// Every solution consistent with `opener` producing `observed`
    #[must_use]
    pub fn candidates_after(&self, opener: usize, observed: Pattern) -> Vec<usize> {
        self.matrix
            .row(opener)
            .iter()
            .enumerate()
            .filter(|&(_, &code)| code == observed)
            .map(|(s, _)| s)
            .collect()
    }
}
