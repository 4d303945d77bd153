//! Monte Carlo simulation of a target-date fund rollover

mod state;
mod returns;
mod engine;
mod results;
mod summary;

pub use state::{TrialInput, TrialPath, TrialState};
pub use returns::draw_annual_return;
pub use engine::{
    MonteCarloEngine, SimulationConfig, run_simulation, DEFAULT_EXPENSE_RATIO, DEFAULT_TRIAL_COUNT,
};
pub use results::{SimulationResult, TrialOutcome, WithdrawalRate};
pub use summary::{OutcomeSummary, SimulationSummary, DEFAULT_CONFIDENCE, REPORTED_PERCENTILES};

use thiserror::Error;

use crate::statistics::StatisticsError;

/// Errors raised while running or summarizing a simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("trial count must be at least 1")]
    NoTrials,

    #[error("principal must be finite and non-negative, got {0}")]
    InvalidPrincipal(f64),

    #[error("invalid return distribution: mean={mean}, sd={sd}")]
    InvalidReturnDistribution { mean: f64, sd: f64 },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),

    #[error(transparent)]
    Statistics(#[from] StatisticsError),
}
