//! Market assumptions: glide path and historical return tables

mod piecewise;
pub mod tables;
pub mod loader;

pub use piecewise::{InterpolationError, PiecewiseLinear};
pub use loader::LoadedTables;

use std::path::Path;

/// Normal distribution parameters for one year's return
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnParams {
    pub mean: f64,
    pub sd: f64,
}

/// Container for the tables a simulation reads
///
/// Built once and shared read-only by every trial.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketAssumptions {
    /// Attained age -> % allocation to stocks
    pub glide_path: PiecewiseLinear,
    /// % stocks -> mean annual return
    pub mean_returns: PiecewiseLinear,
    /// % stocks -> standard deviation of annual return
    pub sd_returns: PiecewiseLinear,
}

impl MarketAssumptions {
    pub fn new(
        glide_path: PiecewiseLinear,
        mean_returns: PiecewiseLinear,
        sd_returns: PiecewiseLinear,
    ) -> Self {
        Self {
            glide_path,
            mean_returns,
            sd_returns,
        }
    }

    /// Current glide path with the 1926-2021 mean and 1976-2012 SD tables
    pub fn default_market() -> Self {
        Self {
            glide_path: tables::glide_path(),
            mean_returns: tables::historical_mean_returns(),
            sd_returns: tables::historical_sd_returns(),
        }
    }

    /// Load tables from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let loaded = LoadedTables::load_from(path)?;

        Ok(Self {
            glide_path: loaded.glide_path,
            mean_returns: loaded.mean_returns,
            sd_returns: loaded.sd_returns,
        })
    }

    /// Stock allocation (percent) at an attained age
    pub fn stock_allocation(&self, age: u32) -> f64 {
        self.glide_path.evaluate(age as f64)
    }

    /// Return distribution for the allocation held at `age`
    pub fn return_params(&self, age: u32) -> ReturnParams {
        let allocation = self.stock_allocation(age);
        ReturnParams {
            mean: self.mean_returns.evaluate(allocation),
            sd: self.sd_returns.evaluate(allocation),
        }
    }
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self::default_market()
    }
}
