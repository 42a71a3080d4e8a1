//! Command implementations

pub mod cancel;
pub mod openers;
pub mod simulate;
pub mod solve;

pub use cancel::CancelToken;
pub use openers::{
    OpenerRanking, OpenerScore, RankingMode, rank_openers, rank_openers_adaptive,
    remaining_totals, remaining_totals_exhaustive,
};
pub use simulate::{SimulationConfig, SimulationReport, play_frozen, simulate, simulate_parallel};
pub use solve::{SolveTrace, TraceStep, trace_answer};

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for `len` steps, or a hidden one when `visible` is false
pub(crate) fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░");
    pb.set_style(style);
    pb
}
