//! Feedback pattern calculation and representation
//!
//! A pattern encodes the feedback from a guess using base-3 digits:
//! - 0 = Gray (letter not in word, or all copies already accounted for)
//! - 1 = Yellow (letter in word, wrong position)
//! - 2 = Green (letter in correct position)
//!
//! The leftmost position is the most significant digit, so the value is
//! `Σ digit[pos] × 3^(4 - pos)` and fits in a single byte (0-242).

use super::word::{WORD_LEN, Word};
use std::fmt;

/// Number of distinct feedback patterns (3^5)
pub const PATTERN_COUNT: usize = 243;

/// Feedback pattern for a guess against an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern(u8);

impl Pattern {
    /// All greens (perfect match)
    pub const PERFECT: Self = Self(242);

    /// Create a new pattern from a raw value
    ///
    /// Returns `None` if the value is not a valid pattern code.
    #[inline]
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if (value as usize) < PATTERN_COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw pattern value (0-242)
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Raw value widened for table indexing
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a perfect match (all greens)
    #[inline]
    #[must_use]
    pub const fn is_perfect(self) -> bool {
        self.0 == Self::PERFECT.0
    }

    /// Calculate the pattern when `guess` is played against `answer`
    ///
    /// Greens are marked first. Then every non-green answer position, scanned
    /// left to right, claims the first still-gray guess position holding the
    /// same letter and turns it yellow. A claimed position cannot be reused,
    /// so a letter never earns more yellow+green marks than it has copies in
    /// the answer.
    ///
    /// # Examples
    /// ```
    /// use wordle_adaptive::core::{Word, Pattern};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let answer = Word::new("slate").unwrap();
    ///
    /// // C(gray) R(gray) A(green) N(gray) E(green)
    /// // 0×81 + 0×27 + 2×9 + 0×3 + 2×1 = 20
    /// assert_eq!(Pattern::calculate(&guess, &answer).value(), 20);
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, answer: &Word) -> Self {
        let guess = guess.chars();
        let answer = answer.chars();
        let mut digits = [0u8; WORD_LEN];

        // Allow: Index needed to compare guess[pos], answer[pos] and set digits[pos]
        #[allow(clippy::needless_range_loop)]
        for pos in 0..WORD_LEN {
            if guess[pos] == answer[pos] {
                digits[pos] = 2;
            }
        }

        for ans_pos in 0..WORD_LEN {
            if digits[ans_pos] == 2 {
                continue;
            }
            let letter = answer[ans_pos];
            if let Some(slot) = (0..WORD_LEN).find(|&g| digits[g] == 0 && guess[g] == letter) {
                digits[slot] = 1;
            }
        }

        Self::from_digits(digits)
    }

    /// Encode leftmost-first digits into a pattern
    #[must_use]
    pub fn from_digits(digits: [u8; WORD_LEN]) -> Self {
        Self(digits.iter().fold(0u8, |acc, &d| acc * 3 + d))
    }

    /// Decode into leftmost-first digits
    #[must_use]
    pub fn digits(self) -> [u8; WORD_LEN] {
        let mut digits = [0u8; WORD_LEN];
        let mut val = self.0;
        for slot in digits.iter_mut().rev() {
            *slot = val % 3;
            val /= 3;
        }
        digits
    }

    /// Count the number of green feedback squares
    #[must_use]
    pub fn count_greens(self) -> usize {
        self.digits().iter().filter(|&&d| d == 2).count()
    }

    /// Count the number of yellow feedback squares
    #[must_use]
    pub fn count_yellows(self) -> usize {
        self.digits().iter().filter(|&&d| d == 1).count()
    }

    /// Convert pattern to emoji string, leftmost position first
    #[must_use]
    pub fn to_emoji(self) -> String {
        self.digits()
            .iter()
            .map(|d| match d {
                2 => '🟩',
                1 => '🟨',
                _ => '⬜',
            })
            .collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Pattern {
    type Err = String;

    /// Parse a pattern from a string like "GY-GY" or "🟩🟨⬜🟩🟨"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != WORD_LEN {
            return Err(format!("Invalid pattern string: {s}"));
        }

        let mut digits = [0u8; WORD_LEN];
        for (slot, ch) in digits.iter_mut().zip(chars) {
            *slot = match ch {
                'G' | 'g' | '🟩' => 2,
                'Y' | 'y' | '🟨' => 1,
                '-' | '_' | '⬜' => 0,
                _ => return Err(format!("Invalid pattern string: {s}")),
            };
        }

        Ok(Self::from_digits(digits))
    }
}
