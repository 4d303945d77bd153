//! Normal-approximation confidence intervals

use statrs::distribution::{ContinuousCDF, Normal};

use super::sample::{standard_deviation, SampleValue};
use super::StatisticsError;

/// Two-sided standard normal quantile for a confidence level in [0, 1)
///
/// `z = Φ⁻¹(1 - (1 - confidence) / 2)`
pub fn z_score(confidence_level: f64) -> Result<f64, StatisticsError> {
    if !(0.0..1.0).contains(&confidence_level) {
        return Err(StatisticsError::Domain {
            parameter: "confidence level",
            value: confidence_level,
        });
    }
    let standard = Normal::new(0.0, 1.0).map_err(|e| StatisticsError::Distribution(e.to_string()))?;
    let left_tail = (1.0 - confidence_level) / 2.0;
    Ok(standard.inverse_cdf(left_tail + confidence_level))
}

/// Half-width of the confidence interval around the sample mean
pub fn margin_of_error<T: SampleValue>(
    sample: &[T],
    confidence_level: f64,
) -> Result<f64, StatisticsError> {
    let z = z_score(confidence_level)?;
    let sd = standard_deviation(sample)?;
    Ok(z * sd / (sample.len() as f64).sqrt())
}
