//! Trial outcomes and simulation result collections

use serde::{Deserialize, Serialize};

/// Fixed withdrawal rates applied to each terminal balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawalRate {
    /// 3.3%
    Conservative,
    /// 4%, the classic rule of thumb
    Standard,
    /// 5%
    Aggressive,
}

impl WithdrawalRate {
    pub const ALL: [WithdrawalRate; 3] = [
        WithdrawalRate::Conservative,
        WithdrawalRate::Standard,
        WithdrawalRate::Aggressive,
    ];

    pub fn fraction(self) -> f64 {
        match self {
            WithdrawalRate::Conservative => 0.033,
            WithdrawalRate::Standard => 0.04,
            WithdrawalRate::Aggressive => 0.05,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WithdrawalRate::Conservative => "3.3%",
            WithdrawalRate::Standard => "4%",
            WithdrawalRate::Aggressive => "5%",
        }
    }

    /// First-year withdrawal from a rounded terminal balance
    pub fn withdrawal(self, terminal_balance: u64) -> u64 {
        (self.fraction() * terminal_balance as f64).round() as u64
    }
}

/// Result of one trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// Unrounded balance when the trial stopped
    pub final_balance: f64,

    /// Whether the balance hit zero before the window ended
    pub ruined: bool,

    /// Annual returns applied
    pub years_elapsed: u32,

    /// Final balance rounded to the nearest dollar
    pub terminal_balance: u64,

    /// Withdrawals in `WithdrawalRate::ALL` order
    pub withdrawals: [u64; 3],
}

impl TrialOutcome {
    pub fn new(final_balance: f64, ruined: bool, years_elapsed: u32) -> Self {
        let terminal_balance = final_balance.round() as u64;
        let withdrawals = WithdrawalRate::ALL.map(|rate| rate.withdrawal(terminal_balance));
        Self {
            final_balance,
            ruined,
            years_elapsed,
            terminal_balance,
            withdrawals,
        }
    }

    pub fn withdrawal(&self, rate: WithdrawalRate) -> u64 {
        self.withdrawals[rate as usize]
    }
}

/// Withdrawal amounts from every trial of a run, one collection per rate
///
/// Entries are in trial-index order, but consumers should treat each
/// collection as an unordered sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    withdrawals_3_3: Vec<u64>,
    withdrawals_4: Vec<u64>,
    withdrawals_5: Vec<u64>,
    ruined_trials: usize,
}

impl SimulationResult {
    pub fn from_outcomes(outcomes: &[TrialOutcome]) -> Self {
        let mut withdrawals_3_3 = Vec::with_capacity(outcomes.len());
        let mut withdrawals_4 = Vec::with_capacity(outcomes.len());
        let mut withdrawals_5 = Vec::with_capacity(outcomes.len());
        let mut ruined_trials = 0;

        for outcome in outcomes {
            withdrawals_3_3.push(outcome.withdrawal(WithdrawalRate::Conservative));
            withdrawals_4.push(outcome.withdrawal(WithdrawalRate::Standard));
            withdrawals_5.push(outcome.withdrawal(WithdrawalRate::Aggressive));
            if outcome.ruined {
                ruined_trials += 1;
            }
        }

        Self {
            withdrawals_3_3,
            withdrawals_4,
            withdrawals_5,
            ruined_trials,
        }
    }

    pub fn withdrawals_3_3(&self) -> &[u64] {
        &self.withdrawals_3_3
    }

    pub fn withdrawals_4(&self) -> &[u64] {
        &self.withdrawals_4
    }

    pub fn withdrawals_5(&self) -> &[u64] {
        &self.withdrawals_5
    }

    pub fn withdrawals(&self, rate: WithdrawalRate) -> &[u64] {
        match rate {
            WithdrawalRate::Conservative => &self.withdrawals_3_3,
            WithdrawalRate::Standard => &self.withdrawals_4,
            WithdrawalRate::Aggressive => &self.withdrawals_5,
        }
    }

    pub fn trial_count(&self) -> usize {
        self.withdrawals_4.len()
    }

    pub fn ruined_trials(&self) -> usize {
        self.ruined_trials
    }
}
