//! Display functions for command results

use super::formatters::{guesses_word, histogram_bar, percent};
use crate::commands::{OpenerRanking, RankingMode, SimulationReport, SolveTrace};
use crate::context::AnalysisContext;
use colored::Colorize;

/// Number of openers listed as the best
pub const TOP_OPENERS: usize = 10;

fn header(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

/// Corpus sizes, printed before any run
pub fn print_corpus_summary(ctx: &AnalysisContext) {
    println!(
        "{} 5-letter words in dictionary, {} of them possible solutions",
        ctx.guesses().len().to_string().bright_yellow(),
        ctx.solutions().len().to_string().bright_yellow()
    );
}

/// Print a simulation summary
pub fn print_simulation_report(report: &SimulationReport) {
    header("SIMULATION RESULTS");

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Strategy:         {}", report.strategy);
    println!("   Opener:           {}", report.opener.to_uppercase());
    println!(
        "   Answers played:   {}/{}",
        report.answers_played, report.answers_total
    );
    println!("   Total guesses:    {}", report.total_guesses);
    println!(
        "   Average guesses:  {}",
        format!("{:.4}", report.mean()).bright_yellow().bold()
    );
    println!("   Time taken:       {:.2}s", report.elapsed.as_secs_f64());
    if report.cancelled {
        println!(
            "   {}",
            "Run cancelled: results cover the answers played so far".yellow()
        );
    }

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let max_count = report.distribution.values().copied().max().unwrap_or(0);
    for (&guesses, &count) in &report.distribution {
        let (filled, empty) = histogram_bar(count, max_count, 40);
        println!(
            "   {guesses}: {}{} {count:5} ({:5.1}%)",
            filled.green(),
            empty.bright_black(),
            percent(count, report.answers_played)
        );
    }

    if !report.worst.is_empty() {
        println!("\n😰 {}", "Hardest answers:".yellow().bold());
        for (word, guesses) in report.worst.iter().take(5) {
            println!(
                "   {} ({guesses} {})",
                word.to_uppercase().yellow(),
                guesses_word(*guesses)
            );
        }
    }
}

/// Print the best and worst openers of a ranking
pub fn print_ranking(ranking: &OpenerRanking, solutions: usize) {
    let unit = match ranking.mode {
        RankingMode::Adaptive => "guesses on average",
        RankingMode::Frequency | RankingMode::Exhaustive => "words remaining on average",
    };
    header("OPENING GUESSES");

    if ranking.mode != RankingMode::Adaptive
        && let Some(worst) = ranking.worst()
    {
        let eliminated = 100.0 * (1.0 - worst.score / solutions as f64);
        println!("\n🐢 {}", "Worst initial guess:".red().bold());
        println!(
            "   {} with {:.2} {unit} ({eliminated:.2}% eliminated)",
            worst.word.to_uppercase().red(),
            worst.score
        );
    }

    println!(
        "\n🏆 {}",
        format!("Top {} initial guesses:", TOP_OPENERS.min(ranking.ranked.len()))
            .green()
            .bold()
    );
    for (place, opener) in ranking.best(TOP_OPENERS).iter().enumerate() {
        println!(
            "   {:2}. {} {:.3} {unit}",
            place + 1,
            opener.word.to_uppercase().bright_green(),
            opener.score
        );
    }

    println!("\n   Time taken: {:.2}s", ranking.elapsed.as_secs_f64());
    if ranking.cancelled {
        println!(
            "   {}",
            "Run cancelled: only fully simulated openers are ranked".yellow()
        );
    }
}

/// Print every step of a traced game
pub fn print_trace(trace: &SolveTrace) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving: {} ({} strategy)",
        trace.answer.to_uppercase().bright_yellow().bold(),
        trace.strategy
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in trace.steps.iter().enumerate() {
        let source = if step.open { " (open)" } else { "" };
        println!(
            "\nTurn {}: {}{} {}",
            i + 1,
            step.word.to_uppercase(),
            source.bright_black(),
            step.pattern.to_emoji()
        );
        println!(
            "  Candidates: {} → {}",
            step.candidates_before, step.candidates_after
        );
    }

    println!();
    println!(
        "{}",
        format!("✅ Solved in {} guesses!", trace.guesses())
            .green()
            .bold()
    );
}
