//! Random annual returns

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::assumptions::ReturnParams;
use super::SimulationError;

/// Draw one annual return from N(mean, sd)
pub fn draw_annual_return<R: Rng + ?Sized>(
    params: ReturnParams,
    rng: &mut R,
) -> Result<f64, SimulationError> {
    let normal = Normal::new(params.mean, params.sd).map_err(|_| {
        SimulationError::InvalidReturnDistribution {
            mean: params.mean,
            sd: params.sd,
        }
    })?;
    Ok(normal.sample(rng))
}
