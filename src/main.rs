//! Wordle strategy analyzer - CLI
//!
//! Builds the cached pattern tables, ranks opening guesses and runs the
//! self-learning solver over every solution.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use wordle_adaptive::{
    commands::{
        CancelToken, RankingMode, SimulationConfig, rank_openers, rank_openers_adaptive,
        simulate, simulate_parallel, trace_answer,
    },
    config::{AnalysisPaths, DEFAULT_OPENER},
    context::AnalysisContext,
    output::{print_corpus_summary, print_ranking, print_simulation_report, print_trace},
    solver::{Solver, StrategyType},
    tables::{GuessEstimationTable, PatternFrequencyTable},
};

#[derive(Parser)]
#[command(
    name = "wordle_adaptive",
    about = "Wordle strategy analyzer with cached pattern tables and a self-learning solver",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Guess corpus, one word per line
    #[arg(long, global = true, default_value = "input/wordle-words-adjusted.txt")]
    guesses: PathBuf,

    /// Solution corpus, one word per line
    #[arg(long, global = true, default_value = "input/wordle-solutions.txt")]
    solutions: PathBuf,

    /// Directory holding the cached tables and the opener summary
    #[arg(long, global = true, default_value = "output")]
    cache_dir: PathBuf,

    /// Rebuild the pattern matrix and frequency table instead of loading them
    #[arg(long, global = true)]
    no_cache: bool,

    /// Worker threads (default: one per core)
    #[arg(short, long, global = true)]
    jobs: Option<usize>,

    /// Strategy: adaptive (default), hard, open
    #[arg(short, long, global = true, default_value = "adaptive")]
    strategy: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Play every solution as the hidden answer and learn from the games
    Simulate {
        /// Forced first guess
        #[arg(short = 'f', long, default_value = DEFAULT_OPENER)]
        opener: String,

        /// Play only the first N solutions
        #[arg(short, long)]
        limit: Option<usize>,

        /// Play answers in parallel against a frozen estimation table
        #[arg(short, long)]
        parallel: bool,

        /// Stop after this many seconds, keeping what was learned
        #[arg(short, long)]
        time_limit: Option<u64>,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Rank every guess as an opener
    Rank {
        /// Scoring mode
        #[arg(short, long, value_enum, default_value_t = RankingMode::Frequency)]
        mode: RankingMode,

        /// Openers simulated in adaptive mode
        #[arg(short, long, default_value = "10")]
        top: usize,

        /// Stop adaptive ranking after this many seconds
        #[arg(long)]
        time_limit: Option<u64>,
    },

    /// Trace the solver on one answer
    Solve {
        /// The answer to solve
        answer: String,

        /// Forced first guess
        #[arg(short = 'f', long, default_value = DEFAULT_OPENER)]
        opener: String,
    },

    /// Build (or validate) every cached table and exit
    Build,
}

fn cancel_token(time_limit: Option<u64>) -> CancelToken {
    time_limit.map_or_else(CancelToken::new, |secs| {
        CancelToken::with_time_limit(Duration::from_secs(secs))
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("failed to configure the worker pool")?;
    }

    let paths = AnalysisPaths::new(&cli.guesses, &cli.solutions, &cli.cache_dir);
    let use_cache = !cli.no_cache;
    let ctx = AnalysisContext::load(&paths, use_cache)
        .context("failed to load corpora and pattern matrix")?;
    print_corpus_summary(&ctx);

    let strategy = StrategyType::from_name(&cli.strategy);
    let solver = Solver::new(strategy, &ctx);

    match cli.command {
        Commands::Build => run_build(&ctx, &paths, use_cache),
        Commands::Simulate {
            opener,
            limit,
            parallel,
            time_limit,
            quiet,
        } => {
            let config = SimulationConfig {
                opener: ctx.opener(&opener)?,
                limit,
                show_progress: !quiet,
            };
            run_simulate(&solver, &paths, &config, parallel, &cancel_token(time_limit))
        }
        Commands::Rank {
            mode,
            top,
            time_limit,
        } => run_rank(&solver, &paths, use_cache, mode, top, &cancel_token(time_limit)),
        Commands::Solve { answer, opener } => {
            let estimates = GuessEstimationTable::load_or_seed(&paths.estimates, ctx.estimation_len())
                .context("failed to load the guess estimation table")?;
            let trace = trace_answer(&solver, strategy.name(), &answer, &opener, &estimates)?;
            print_trace(&trace);
            Ok(())
        }
    }
}

fn run_build(ctx: &AnalysisContext, paths: &AnalysisPaths, use_cache: bool) -> Result<()> {
    PatternFrequencyTable::load_or_build(&paths.frequency_table, ctx.matrix(), use_cache)
        .context("failed to load the pattern frequency table")?;
    let estimates = GuessEstimationTable::load_or_seed(&paths.estimates, ctx.estimation_len())
        .context("failed to load the guess estimation table")?;
    estimates.save(&paths.estimates)?;
    println!("Cached tables are up to date in {}", paths.summary.with_file_name("").display());
    Ok(())
}

fn run_simulate(
    solver: &Solver<StrategyType>,
    paths: &AnalysisPaths,
    config: &SimulationConfig,
    parallel: bool,
    cancel: &CancelToken,
) -> Result<()> {
    let ctx = solver.context();
    let mut estimates = GuessEstimationTable::load_or_seed(&paths.estimates, ctx.estimation_len())
        .context("failed to load the guess estimation table")?;
    let name = solver.strategy().name();

    let report = if parallel {
        simulate_parallel(solver, name, &mut estimates, config, cancel)?
    } else {
        simulate(solver, name, &mut estimates, config, cancel)?
    };

    estimates
        .save(&paths.estimates)
        .context("failed to save the guess estimation table")?;
    print_simulation_report(&report);
    Ok(())
}

fn run_rank(
    solver: &Solver<StrategyType>,
    paths: &AnalysisPaths,
    use_cache: bool,
    mode: RankingMode,
    top: usize,
    cancel: &CancelToken,
) -> Result<()> {
    let ctx = solver.context();
    let ranking = match mode {
        RankingMode::Exhaustive => rank_openers(ctx, None, mode),
        RankingMode::Frequency => {
            let freq = PatternFrequencyTable::load_or_build(&paths.frequency_table, ctx.matrix(), use_cache)
                .context("failed to load the pattern frequency table")?;
            rank_openers(ctx, Some(&freq), mode)
        }
        RankingMode::Adaptive => {
            let freq = PatternFrequencyTable::load_or_build(&paths.frequency_table, ctx.matrix(), use_cache)
                .context("failed to load the pattern frequency table")?;
            let estimates = GuessEstimationTable::load_or_seed(&paths.estimates, ctx.estimation_len())
                .context("failed to load the guess estimation table")?;
            rank_openers_adaptive(solver, &freq, &estimates, top, cancel)?
        }
    };

    ranking
        .save_summary(&paths.summary)
        .context("failed to write the opener summary")?;
    print_ranking(&ranking, ctx.solutions().len());
    Ok(())
}
