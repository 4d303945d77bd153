//! Pension Rollover CLI
//!
//! Runs the Monte Carlo simulation for one account horizon and prints the
//! withdrawal distribution next to the pension benefit.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pension_rollover::simulation::{
    OutcomeSummary, DEFAULT_CONFIDENCE, DEFAULT_EXPENSE_RATIO, DEFAULT_TRIAL_COUNT,
};
use pension_rollover::{
    MarketAssumptions, MonteCarloEngine, SimulationConfig, SimulationSummary, TrialInput,
};

#[derive(Debug, Parser)]
#[command(name = "pension-rollover", version, about = "Compare a pension benefit against a target-date fund rollover")]
struct Args {
    /// Current age of the member
    #[arg(long)]
    current_age: u32,

    /// Years until the balance is rolled over
    #[arg(long, default_value_t = 0)]
    years_until_start: u32,

    /// Normal retirement age
    #[arg(long)]
    retirement_age: u32,

    /// Account balance at rollover
    #[arg(long)]
    principal: f64,

    /// Annual pension benefit to compare against
    #[arg(long)]
    benefit: Option<f64>,

    /// Number of Monte Carlo trials
    #[arg(long, default_value_t = DEFAULT_TRIAL_COUNT)]
    trials: usize,

    /// Base random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to available parallelism)
    #[arg(long)]
    threads: Option<usize>,

    /// Directory holding glide_path.csv, mean_returns.csv and sd_returns.csv
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// Confidence level for the margin of error on the mean
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let market = match &args.assumptions {
        Some(dir) => MarketAssumptions::from_csv_path(dir)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => MarketAssumptions::default_market(),
    };

    let config = SimulationConfig {
        trial_count: args.trials,
        seed: args.seed,
        expense_ratio: DEFAULT_EXPENSE_RATIO,
        worker_threads: args.threads,
    };

    let input = TrialInput::from_horizon(
        args.principal,
        args.current_age,
        args.years_until_start,
        args.retirement_age,
    );

    let engine = MonteCarloEngine::new(market, config);
    let result = engine.run(&input).context("running simulation")?;
    let summary = SimulationSummary::new(&result, args.confidence, args.benefit)
        .context("summarizing simulation")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, &input);
    }

    Ok(())
}

fn print_summary(summary: &SimulationSummary, input: &TrialInput) {
    const WIDTH: usize = 22;

    println!(
        "Monte Carlo simulation of a target-date fund rollover: {} trials, ages {}..={}",
        with_commas(summary.trial_count as f64),
        input.first_year,
        input.last_year
    );
    println!();

    print!("{:>WIDTH$}", "withdrawal rate");
    for outcome in &summary.outcomes {
        print!("{:>WIDTH$}", outcome.rate.label());
    }
    println!();

    for (i, (p, _)) in summary.outcomes[0].percentiles.iter().enumerate() {
        print!("{:>WIDTH$}", format!("{} percentile", ordinal((p * 100.0).round() as u32)));
        for outcome in &summary.outcomes {
            print!("{:>WIDTH$}", with_commas(outcome.percentiles[i].1));
        }
        println!();
    }

    let confidence_pct = (summary.outcomes[0].confidence * 100.0).round();
    print!("{:>WIDTH$}", format!("mean (w/ {confidence_pct}% C.I.)"));
    for outcome in &summary.outcomes {
        print!("{:>WIDTH$}", mean_cell(outcome));
    }
    println!();

    if summary.benefit.is_some() {
        print!("{:>WIDTH$}", "P(below pension)");
        for outcome in &summary.outcomes {
            let pct = outcome.probability_below_benefit.unwrap_or(0.0) * 100.0;
            print!("{:>WIDTH$}", format!("{pct:.1}%"));
        }
        println!();
    }

    println!();
    println!("Ruined trials: {}", with_commas(summary.ruined_trials as f64));
}

fn mean_cell(outcome: &OutcomeSummary) -> String {
    format!(
        "{} +/- {}",
        with_commas(outcome.mean),
        with_commas(outcome.margin_of_error)
    )
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, r) if r != 11 => "st",
        (2, r) if r != 12 => "nd",
        (3, r) if r != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Round to a whole dollar and group thousands
fn with_commas(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        format!("-{out}")
    } else {
        out
    }
}
