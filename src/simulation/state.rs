//! Trial inputs and per-trial state tracking

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::assumptions::MarketAssumptions;
use super::returns::draw_annual_return;
use super::SimulationError;

/// Starting balance and age window shared by every trial of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialInput {
    /// Balance rolled into the fund
    pub principal: f64,

    /// First attained age at which a return registers
    pub first_year: u32,

    /// Last attained age at which a return registers
    pub last_year: u32,
}

impl TrialInput {
    pub fn new(principal: f64, first_year: u32, last_year: u32) -> Self {
        Self {
            principal,
            first_year,
            last_year,
        }
    }

    /// Build the age window from an account horizon
    ///
    /// Returns register one year after the balance is invested. The last
    /// year never falls before the investment year, so a retirement age
    /// already passed gives an empty window rather than a negative one.
    pub fn from_horizon(
        principal: f64,
        current_age: u32,
        years_until_start: u32,
        retirement_age: u32,
    ) -> Self {
        let invested_at = current_age + years_until_start;
        Self {
            principal,
            first_year: invested_at + 1,
            last_year: retirement_age.max(invested_at),
        }
    }

    /// Number of annual returns a trial that is never ruined will compound
    pub fn horizon_years(&self) -> u32 {
        (self.last_year + 1).saturating_sub(self.first_year)
    }

    pub(crate) fn validate(&self) -> Result<(), SimulationError> {
        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(SimulationError::InvalidPrincipal(self.principal));
        }
        Ok(())
    }
}

/// Where a trial is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialState {
    /// Balance set to principal, no year compounded yet
    Initialized,
    /// Next return to apply is the one for `age`
    Advancing { age: u32 },
    /// Balance hit zero while compounding `age`; later years are skipped
    Ruined { age: u32 },
    /// Every year in the window compounded
    Completed,
}

impl TrialState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TrialState::Ruined { .. } | TrialState::Completed)
    }
}

/// Balance path of a single trial
#[derive(Debug, Clone)]
pub struct TrialPath {
    pub state: TrialState,

    /// Current balance, never negative
    pub balance: f64,

    /// Annual returns applied so far
    pub years_elapsed: u32,

    first_year: u32,
    last_year: u32,
}

impl TrialPath {
    pub fn new(input: &TrialInput) -> Self {
        Self {
            state: TrialState::Initialized,
            balance: input.principal,
            years_elapsed: 0,
            first_year: input.first_year,
            last_year: input.last_year,
        }
    }

    /// Move the trial one transition forward
    ///
    /// From `Initialized` this only enters the window (or completes it when
    /// empty). From `Advancing` it compounds one year. Terminal states are
    /// left unchanged.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        market: &MarketAssumptions,
        expense_ratio: f64,
        rng: &mut R,
    ) -> Result<(), SimulationError> {
        match self.state {
            TrialState::Initialized => {
                self.state = if self.first_year <= self.last_year {
                    TrialState::Advancing { age: self.first_year }
                } else {
                    TrialState::Completed
                };
            }
            TrialState::Advancing { age } => {
                let params = market.return_params(age);
                let r = draw_annual_return(params, rng)?;
                self.balance *= 1.0 + r - expense_ratio;
                self.years_elapsed += 1;

                self.state = if self.balance <= 0.0 {
                    self.balance = 0.0;
                    TrialState::Ruined { age }
                } else if age >= self.last_year {
                    TrialState::Completed
                } else {
                    TrialState::Advancing { age: age + 1 }
                };
            }
            TrialState::Ruined { .. } | TrialState::Completed => {}
        }
        Ok(())
    }

    /// Advance until the trial is ruined or completed
    pub fn run_to_end<R: Rng + ?Sized>(
        &mut self,
        market: &MarketAssumptions,
        expense_ratio: f64,
        rng: &mut R,
    ) -> Result<(), SimulationError> {
        while !self.state.is_terminal() {
            self.advance(market, expense_ratio, rng)?;
        }
        Ok(())
    }

    pub fn is_ruined(&self) -> bool {
        matches!(self.state, TrialState::Ruined { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::PiecewiseLinear;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Market with a fixed, certain return
    fn certain_market(annual_return: f64) -> MarketAssumptions {
        let flat = |y: f64| PiecewiseLinear::new(&[(0.0, y), (100.0, y)]).unwrap();
        MarketAssumptions::new(flat(50.0), flat(annual_return), flat(0.0))
    }

    #[test]
    fn test_horizon_from_account() {
        let input = TrialInput::from_horizon(50_000.0, 40, 5, 60);
        assert_eq!(input.first_year, 46);
        assert_eq!(input.last_year, 60);
        assert_eq!(input.horizon_years(), 15);
    }

    #[test]
    fn test_horizon_past_retirement_is_empty() {
        let input = TrialInput::from_horizon(50_000.0, 62, 3, 60);
        assert_eq!(input.first_year, 66);
        assert_eq!(input.last_year, 65);
        assert_eq!(input.horizon_years(), 0);
    }

    #[test]
    fn test_state_transitions() {
        let market = certain_market(0.10);
        let mut rng = StdRng::seed_from_u64(1);
        let mut path = TrialPath::new(&TrialInput::new(1000.0, 60, 61));

        path.advance(&market, 0.0, &mut rng).unwrap();
        assert_eq!(path.state, TrialState::Advancing { age: 60 });
        assert_eq!(path.balance, 1000.0);

        path.advance(&market, 0.0, &mut rng).unwrap();
        assert_eq!(path.state, TrialState::Advancing { age: 61 });

        path.advance(&market, 0.0, &mut rng).unwrap();
        assert_eq!(path.state, TrialState::Completed);
        assert_eq!(path.years_elapsed, 2);
        approx::assert_relative_eq!(path.balance, 1210.0, epsilon = 1e-9);

        // Terminal states do not move
        path.advance(&market, 0.0, &mut rng).unwrap();
        assert_eq!(path.years_elapsed, 2);
    }

    #[test]
    fn test_empty_window_keeps_principal() {
        let market = certain_market(0.10);
        let mut rng = StdRng::seed_from_u64(1);
        let mut path = TrialPath::new(&TrialInput::new(1234.4, 66, 65));
        path.run_to_end(&market, 0.0008, &mut rng).unwrap();
        assert_eq!(path.state, TrialState::Completed);
        assert_eq!(path.balance, 1234.4);
        assert_eq!(path.years_elapsed, 0);
    }

    #[test]
    fn test_ruin_stops_immediately() {
        let market = certain_market(-1.5);
        let mut rng = StdRng::seed_from_u64(1);
        let mut path = TrialPath::new(&TrialInput::new(1000.0, 30, 65));
        path.run_to_end(&market, 0.0008, &mut rng).unwrap();
        assert_eq!(path.state, TrialState::Ruined { age: 30 });
        assert!(path.is_ruined());
        assert_eq!(path.balance, 0.0);
        assert_eq!(path.years_elapsed, 1);
    }

    #[test]
    fn test_invalid_principal() {
        assert!(TrialInput::new(-1.0, 1, 2).validate().is_err());
        assert!(TrialInput::new(f64::NAN, 1, 2).validate().is_err());
        assert!(TrialInput::new(0.0, 1, 2).validate().is_ok());
    }
}
