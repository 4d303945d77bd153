//! Pension Rollover - Monte Carlo outcome model for a pension-versus-rollover decision
//!
//! This library provides:
//! - Piecewise-linear market tables (glide path, historical mean and SD of returns)
//! - A parallel Monte Carlo engine compounding a rolled-over balance to retirement
//! - Sample statistics with normal-approximation confidence intervals
//! - Summaries comparing first-year withdrawals against a deterministic pension benefit

pub mod assumptions;
pub mod statistics;
pub mod simulation;

// Re-export commonly used types
pub use assumptions::{MarketAssumptions, PiecewiseLinear, InterpolationError};
pub use simulation::{
    MonteCarloEngine, SimulationConfig, SimulationError, SimulationResult, SimulationSummary,
    TrialInput, WithdrawalRate, run_simulation,
};
pub use statistics::StatisticsError;
