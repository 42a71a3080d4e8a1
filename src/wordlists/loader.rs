//! Word list loading
//!
//! Corpus files are plain text, one word per line. Each line contributes its
//! first five characters, so trailing annotations or carriage returns are
//! ignored; anything shorter or non-alphabetic is rejected.

use super::WordCorpus;
use crate::core::{WORD_LEN, Word};
use crate::error::{AnalysisError, Result};
use std::fs;
use std::path::Path;

/// Load a corpus from a file
///
/// # Errors
///
/// Returns `AnalysisError::Io` if the file cannot be read, or
/// `AnalysisError::MalformedCorpus` for the first bad line or an empty file.
///
/// # Examples
/// ```no_run
/// use wordle_adaptive::wordlists::loader::load_from_file;
///
/// let corpus = load_from_file("input/wordle-solutions.txt").unwrap();
/// println!("Loaded {} words", corpus.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<WordCorpus> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
    let corpus = parse_corpus(path, &content)?;
    log::info!("loaded {} words from {}", corpus.len(), path.display());
    Ok(corpus)
}

/// Parse corpus text; `path` is only used in error messages
///
/// # Errors
///
/// Returns `AnalysisError::MalformedCorpus` for the first bad line or when no
/// words are present.
pub fn parse_corpus(path: &Path, content: &str) -> Result<WordCorpus> {
    let malformed = |line: usize, reason: String| AnalysisError::MalformedCorpus {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut words = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            continue;
        }

        let head: String = trimmed.chars().take(WORD_LEN).collect();
        let word = Word::new(&head).map_err(|e| malformed(i + 1, format!("'{trimmed}': {e}")))?;
        words.push(word);
    }

    if words.is_empty() {
        return Err(malformed(0, "no words found".to_string()));
    }

    Ok(WordCorpus::from_words(words))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<WordCorpus> {
        parse_corpus(Path::new("test.txt"), content)
    }

    #[test]
    fn parse_one_word_per_line() {
        let corpus = parse("roate\ncrane\nslate\n").unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.word(1).text(), "crane");
    }

    #[test]
    fn parse_truncates_to_five_characters() {
        let corpus = parse("roate\r\ncranes 12\nSLATE\n").unwrap();
        assert_eq!(corpus.word(0).text(), "roate");
        assert_eq!(corpus.word(1).text(), "crane");
        assert_eq!(corpus.word(2).text(), "slate");
    }

    #[test]
    fn parse_skips_blank_lines() {
        let corpus = parse("roate\n\n   \ncrane\n").unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn parse_rejects_short_line() {
        let err = parse("roate\nabc\n").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedCorpus { line: 2, .. }));
    }

    #[test]
    fn parse_rejects_non_alphabetic() {
        let err = parse("ro4te\n").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedCorpus { line: 1, .. }));
    }

    #[test]
    fn parse_rejects_empty_file() {
        assert!(matches!(
            parse("\n\n"),
            Err(AnalysisError::MalformedCorpus { .. })
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("wordle_adaptive_missing_corpus.txt");
        assert!(matches!(
            load_from_file(&path),
            Err(AnalysisError::Io { .. })
        ));
    }
}
