//! Word corpora
//!
//! A corpus is an ordered, immutable list of words. Index order is the corpus
//! order used for tie-breaking and for every table row/column.

pub mod loader;

use crate::core::{Word, WordError};
use rustc_hash::FxHashMap;

/// An ordered list of words with O(1) word → index lookup
#[derive(Debug, Clone)]
pub struct WordCorpus {
    words: Vec<Word>,
    index: FxHashMap<Word, usize>,
}

impl WordCorpus {
    /// Build a corpus from already validated words
    ///
    /// Duplicate words keep the index of their first occurrence for lookups.
    #[must_use]
    pub fn from_words(words: Vec<Word>) -> Self {
        let mut index = FxHashMap::default();
        for (i, word) in words.iter().enumerate() {
            index.entry(word.clone()).or_insert(i);
        }
        Self { words, index }
    }

    /// Build a corpus from string slices
    ///
    /// # Errors
    /// Returns the first `WordError` encountered.
    pub fn from_strs(words: &[&str]) -> Result<Self, WordError> {
        let words = words.iter().map(Word::new).collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_words(words))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at a corpus index
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[inline]
    #[must_use]
    pub fn word(&self, index: usize) -> &Word {
        &self.words[index]
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Index of a word, if present
    #[must_use]
    pub fn index_of(&self, word: &Word) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Index of a word given as text, if it is a valid word and present
    #[must_use]
    pub fn find(&self, text: &str) -> Option<usize> {
        Word::new(text).ok().and_then(|w| self.index_of(&w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_preserves_order() {
        let corpus = WordCorpus::from_strs(&["roate", "crane", "slate"]).unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.word(0).text(), "roate");
        assert_eq!(corpus.word(2).text(), "slate");
    }

    #[test]
    fn corpus_lookup() {
        let corpus = WordCorpus::from_strs(&["roate", "crane", "slate"]).unwrap();
        assert_eq!(corpus.find("crane"), Some(1));
        assert_eq!(corpus.find("CRANE"), Some(1));
        assert_eq!(corpus.find("zzzzz"), None);
        assert_eq!(corpus.find("bad"), None);
    }

    #[test]
    fn corpus_duplicates_keep_first_index() {
        let corpus = WordCorpus::from_strs(&["crane", "slate", "crane"]).unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.find("crane"), Some(0));
    }

    #[test]
    fn corpus_rejects_invalid_words() {
        assert!(WordCorpus::from_strs(&["crane", "abc"]).is_err());
    }
}
