//! Distribution summaries for comparing a rollover against the pension benefit

use serde::{Deserialize, Serialize};

use crate::statistics;
use super::results::{SimulationResult, WithdrawalRate};
use super::SimulationError;

/// Percentiles reported for each withdrawal rate
pub const REPORTED_PERCENTILES: [f64; 4] = [0.01, 0.05, 0.25, 0.50];

/// Confidence level for the margin of error on the mean
pub const DEFAULT_CONFIDENCE: f64 = 0.99;

/// Summary of one withdrawal-rate sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub rate: WithdrawalRate,

    /// `(p, value)` pairs in `REPORTED_PERCENTILES` order
    pub percentiles: Vec<(f64, f64)>,

    pub mean: f64,
    pub margin_of_error: f64,
    pub confidence: f64,

    /// Share of trials paying strictly less than the pension benefit
    pub probability_below_benefit: Option<f64>,
}

impl OutcomeSummary {
    pub fn from_sample(
        rate: WithdrawalRate,
        sample: &[u64],
        confidence: f64,
        benefit: Option<f64>,
    ) -> Result<Self, SimulationError> {
        let percentiles = REPORTED_PERCENTILES
            .iter()
            .map(|&p| statistics::percentile(sample, p).map(|value| (p, value)))
            .collect::<Result<Vec<_>, _>>()?;

        let probability_below_benefit = benefit
            .map(|threshold| statistics::percent_below(sample, threshold))
            .transpose()?;

        Ok(Self {
            rate,
            percentiles,
            mean: statistics::mean(sample)?,
            margin_of_error: statistics::margin_of_error(sample, confidence)?,
            confidence,
            probability_below_benefit,
        })
    }
}

/// Summaries for all three withdrawal rates of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub trial_count: usize,
    pub ruined_trials: usize,
    pub benefit: Option<f64>,
    pub outcomes: Vec<OutcomeSummary>,
}

impl SimulationSummary {
    pub fn new(
        result: &SimulationResult,
        confidence: f64,
        benefit: Option<f64>,
    ) -> Result<Self, SimulationError> {
        let outcomes = WithdrawalRate::ALL
            .iter()
            .map(|&rate| {
                OutcomeSummary::from_sample(rate, result.withdrawals(rate), confidence, benefit)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            trial_count: result.trial_count(),
            ruined_trials: result.ruined_trials(),
            benefit,
            outcomes,
        })
    }

    pub fn outcome(&self, rate: WithdrawalRate) -> Option<&OutcomeSummary> {
        self.outcomes.iter().find(|o| o.rate == rate)
    }
}
