//! Parallel Monte Carlo engine for rollover balances

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::assumptions::MarketAssumptions;
use super::results::{SimulationResult, TrialOutcome};
use super::state::{TrialInput, TrialPath};
use super::SimulationError;

/// Target-date fund expense ratio charged against every annual return
pub const DEFAULT_EXPENSE_RATIO: f64 = 0.0008;

/// Trial count used by the command-line tool
pub const DEFAULT_TRIAL_COUNT: usize = 100_000;

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of independent trials
    pub trial_count: usize,

    /// Base seed; trial `i` draws from a generator seeded with `seed + i`.
    /// If None, a seed is drawn from the thread-local generator.
    pub seed: Option<u64>,

    /// Annual fund expense ratio
    pub expense_ratio: f64,

    /// Dedicated worker pool size. If None, runs on rayon's global pool.
    pub worker_threads: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trial_count: DEFAULT_TRIAL_COUNT,
            seed: None,
            expense_ratio: DEFAULT_EXPENSE_RATIO,
            worker_threads: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_trials(mut self, trial_count: usize) -> Self {
        self.trial_count = trial_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }
}

/// Main simulation engine
pub struct MonteCarloEngine {
    market: MarketAssumptions,
    config: SimulationConfig,
}

impl MonteCarloEngine {
    /// Create a new engine with given market tables and config
    pub fn new(market: MarketAssumptions, config: SimulationConfig) -> Self {
        Self { market, config }
    }

    pub fn market(&self) -> &MarketAssumptions {
        &self.market
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run every trial and collect the three withdrawal samples
    pub fn run(&self, input: &TrialInput) -> Result<SimulationResult, SimulationError> {
        let outcomes = self.run_outcomes(input)?;
        Ok(SimulationResult::from_outcomes(&outcomes))
    }

    /// Run every trial, returning per-trial outcomes in trial-index order
    pub fn run_outcomes(&self, input: &TrialInput) -> Result<Vec<TrialOutcome>, SimulationError> {
        if self.config.trial_count == 0 {
            return Err(SimulationError::NoTrials);
        }
        input.validate()?;

        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        log::info!(
            "Running {} trials: principal={:.2}, ages {}..={}",
            self.config.trial_count,
            input.principal,
            input.first_year,
            input.last_year
        );
        log::debug!("Base seed {}", base_seed);

        let start = Instant::now();
        let outcomes = match self.config.worker_threads {
            Some(threads) => {
                log::debug!("Using dedicated pool of {} workers", threads);
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| SimulationError::WorkerPool(e.to_string()))?;
                pool.install(|| self.run_parallel(input, base_seed))?
            }
            None => {
                log::debug!("Using global pool of {} workers", rayon::current_num_threads());
                self.run_parallel(input, base_seed)?
            }
        };

        let ruined = outcomes.iter().filter(|o| o.ruined).count();
        log::info!(
            "Simulation complete in {:?}: {} of {} trials ruined",
            start.elapsed(),
            ruined,
            outcomes.len()
        );

        Ok(outcomes)
    }

    fn run_parallel(
        &self,
        input: &TrialInput,
        base_seed: u64,
    ) -> Result<Vec<TrialOutcome>, SimulationError> {
        (0..self.config.trial_count)
            .into_par_iter()
            .map(|trial| {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(trial as u64));
                self.run_trial(input, &mut rng)
            })
            .collect()
    }

    /// Run a single trial with the given random source
    pub fn run_trial<R: rand::Rng + ?Sized>(
        &self,
        input: &TrialInput,
        rng: &mut R,
    ) -> Result<TrialOutcome, SimulationError> {
        let mut path = TrialPath::new(input);
        path.run_to_end(&self.market, self.config.expense_ratio, rng)?;
        Ok(TrialOutcome::new(path.balance, path.is_ruined(), path.years_elapsed))
    }
}

/// Run a simulation with the default market and a random seed
pub fn run_simulation(
    trial_count: usize,
    principal: f64,
    first_year: u32,
    last_year: u32,
) -> Result<SimulationResult, SimulationError> {
    let config = SimulationConfig::default().with_trials(trial_count);
    let engine = MonteCarloEngine::new(MarketAssumptions::default_market(), config);
    engine.run(&TrialInput::new(principal, first_year, last_year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::PiecewiseLinear;

    fn seeded_engine(trials: usize, seed: u64) -> MonteCarloEngine {
        MonteCarloEngine::new(
            MarketAssumptions::default_market(),
            SimulationConfig::default().with_trials(trials).with_seed(seed),
        )
    }

    /// Default glide path with returns volatile enough to ruin some trials
    fn volatile_market() -> MarketAssumptions {
        let flat = |y: f64| PiecewiseLinear::new(&[(0.0, y), (100.0, y)]).unwrap();
        MarketAssumptions::new(
            crate::assumptions::tables::glide_path(),
            flat(0.0),
            flat(0.6),
        )
    }

    #[test]
    fn test_result_lengths_match_trial_count() {
        let engine = seeded_engine(500, 42);
        let result = engine.run(&TrialInput::new(100_000.0, 46, 65)).unwrap();
        assert_eq!(result.trial_count(), 500);
        assert_eq!(result.withdrawals_3_3().len(), 500);
        assert_eq!(result.withdrawals_4().len(), 500);
        assert_eq!(result.withdrawals_5().len(), 500);
    }

    #[test]
    fn test_zero_trials_fails_fast() {
        let engine = seeded_engine(0, 42);
        let result = engine.run(&TrialInput::new(100_000.0, 46, 65));
        assert_eq!(result, Err(SimulationError::NoTrials));
        assert!(run_simulation(0, 1.0, 1, 2).is_err());
    }

    #[test]
    fn test_negative_principal_rejected() {
        let engine = seeded_engine(10, 42);
        let result = engine.run(&TrialInput::new(-5.0, 46, 65));
        assert!(matches!(result, Err(SimulationError::InvalidPrincipal(_))));
    }

    #[test]
    fn test_same_seed_reproduces() {
        let input = TrialInput::new(80_000.0, 40, 65);
        let a = seeded_engine(200, 9).run(&input).unwrap();
        let b = seeded_engine(200, 9).run(&input).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_worker_count_does_not_change_results() {
        let input = TrialInput::new(80_000.0, 35, 65);
        let mut samples = Vec::new();
        for threads in [1, 2, 5] {
            let config = SimulationConfig::default()
                .with_trials(1_000)
                .with_seed(2024)
                .with_worker_threads(threads);
            let engine = MonteCarloEngine::new(MarketAssumptions::default_market(), config);
            let result = engine.run(&input).unwrap();
            let mut sorted: Vec<Vec<u64>> = vec![
                result.withdrawals_3_3().to_vec(),
                result.withdrawals_4().to_vec(),
                result.withdrawals_5().to_vec(),
            ];
            for s in &mut sorted {
                s.sort_unstable();
            }
            samples.push(sorted);
        }
        assert_eq!(samples[0], samples[1]);
        assert_eq!(samples[0], samples[2]);
    }

    #[test]
    fn test_scale_invariance() {
        let config = SimulationConfig::default().with_trials(2_000).with_seed(77);
        let engine = MonteCarloEngine::new(volatile_market(), config);

        let single = engine.run_outcomes(&TrialInput::new(50_000.0, 30, 65)).unwrap();
        let double = engine.run_outcomes(&TrialInput::new(100_000.0, 30, 65)).unwrap();

        assert!(single.iter().any(|o| o.ruined), "expected some ruined trials");
        assert!(single.iter().any(|o| !o.ruined), "expected some surviving trials");

        for (a, b) in single.iter().zip(&double) {
            assert_eq!(a.ruined, b.ruined);
            assert_eq!(a.years_elapsed, b.years_elapsed);
            if !a.ruined {
                assert_eq!(b.final_balance, 2.0 * a.final_balance);
            }
        }
    }

    #[test]
    fn test_ruined_trials_withdraw_nothing() {
        let config = SimulationConfig::default().with_trials(2_000).with_seed(5);
        let engine = MonteCarloEngine::new(volatile_market(), config);
        let input = TrialInput::new(50_000.0, 30, 65);
        let outcomes = engine.run_outcomes(&input).unwrap();

        let ruined: Vec<_> = outcomes.iter().filter(|o| o.ruined).collect();
        assert!(!ruined.is_empty());
        for outcome in ruined {
            assert_eq!(outcome.final_balance, 0.0);
            assert_eq!(outcome.withdrawals, [0, 0, 0]);
            assert!(outcome.years_elapsed <= input.horizon_years());
        }

        let result = SimulationResult::from_outcomes(&outcomes);
        assert_eq!(result.ruined_trials(), outcomes.iter().filter(|o| o.ruined).count());
    }

    #[test]
    fn test_empty_window_returns_principal() {
        let engine = seeded_engine(10, 1);
        let result = engine.run(&TrialInput::from_horizon(40_000.0, 66, 0, 65)).unwrap();
        assert!(result.withdrawals_4().iter().all(|&w| w == 1600));
        assert_eq!(result.ruined_trials(), 0);
    }

    #[test]
    fn test_default_market_growth_is_plausible() {
        // 20 years at roughly 9-10% mean: median 4% withdrawal well above the principal's 4%
        let engine = seeded_engine(2_000, 3);
        let result = engine.run(&TrialInput::new(100_000.0, 46, 65)).unwrap();
        let median = crate::statistics::median(result.withdrawals_4()).unwrap();
        assert!(median > 4_000.0 * 2.0, "median withdrawal {median}");
        assert!(median < 4_000.0 * 20.0, "median withdrawal {median}");
    }
}
