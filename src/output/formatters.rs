//! Formatting utilities for terminal output

/// Filled/empty bar of `width` cells for `value` out of `max`
///
/// Any nonzero value gets at least one filled cell.
#[must_use]
pub fn histogram_bar(value: usize, max: usize, width: usize) -> (String, String) {
    let filled = if max == 0 {
        0
    } else {
        (value * width / max).max(usize::from(value > 0)).min(width)
    };
    ("█".repeat(filled), "░".repeat(width - filled))
}

/// Share of `part` in `whole` as a percentage
#[must_use]
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[must_use]
pub const fn guesses_word(n: u32) -> &'static str {
    if n == 1 { "guess" } else { "guesses" }
}
