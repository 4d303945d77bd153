//! Sample statistics for simulated withdrawal amounts
//!
//! Pure aggregates: results depend only on the multiset of values, never on
//! their order, so the output of a parallel run can be fed in directly.

mod sample;
mod confidence;

pub use sample::{
    SampleValue, mean, median, percent_below, percentile, standard_deviation, variance,
};
pub use confidence::{margin_of_error, z_score};

use thiserror::Error;

/// Errors raised by the statistics functions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatisticsError {
    #[error("{parameter} out of range: {value}")]
    Domain { parameter: &'static str, value: f64 },

    #[error("sample of size {actual} is too small, at least {required} values required")]
    InsufficientSample { required: usize, actual: usize },

    #[error("sample is empty")]
    EmptySample,

    #[error("normal distribution: {0}")]
    Distribution(String),
}
