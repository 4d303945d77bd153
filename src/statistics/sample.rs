//! Descriptive statistics over integer samples
//!
//! Every function borrows the sample and sorts a private copy when order
//! matters, so callers can share one collection across many queries.

use super::StatisticsError;

/// Integer types accepted as sample data
pub trait SampleValue: Copy + Ord {
    fn to_f64(self) -> f64;
}

macro_rules! impl_sample_value {
    ($($t:ty),*) => {
        $(
            impl SampleValue for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_sample_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

fn require_non_empty<T>(sample: &[T]) -> Result<(), StatisticsError> {
    if sample.is_empty() {
        Err(StatisticsError::EmptySample)
    } else {
        Ok(())
    }
}

fn sorted_copy<T: SampleValue>(sample: &[T]) -> Vec<T> {
    let mut sorted = sample.to_vec();
    sorted.sort_unstable();
    sorted
}

/// Arithmetic mean
pub fn mean<T: SampleValue>(sample: &[T]) -> Result<f64, StatisticsError> {
    require_non_empty(sample)?;
    let sum: f64 = sample.iter().map(|&x| x.to_f64()).sum();
    Ok(sum / sample.len() as f64)
}

/// The `100 * p`th percentile, `p` in [0, 1]
///
/// Uses rank `p * (n - 1)` and averages the sorted entries on either side
/// of it; an integral rank returns that entry.
pub fn percentile<T: SampleValue>(sample: &[T], p: f64) -> Result<f64, StatisticsError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(StatisticsError::Domain {
            parameter: "percentile",
            value: p,
        });
    }
    require_non_empty(sample)?;

    let sorted = sorted_copy(sample);
    let rank = p * (sorted.len() - 1) as f64;
    let below = rank.floor() as usize;
    let above = rank.ceil() as usize;
    Ok((sorted[below].to_f64() + sorted[above].to_f64()) / 2.0)
}

pub fn median<T: SampleValue>(sample: &[T]) -> Result<f64, StatisticsError> {
    percentile(sample, 0.5)
}

/// Unbiased sample variance (divides by n - 1)
pub fn variance<T: SampleValue>(sample: &[T]) -> Result<f64, StatisticsError> {
    if sample.len() < 2 {
        return Err(StatisticsError::InsufficientSample {
            required: 2,
            actual: sample.len(),
        });
    }
    let m = mean(sample)?;
    let sum_sq: f64 = sample
        .iter()
        .map(|&x| {
            let d = x.to_f64() - m;
            d * d
        })
        .sum();
    Ok(sum_sq / (sample.len() - 1) as f64)
}

/// Corrected sample standard deviation
pub fn standard_deviation<T: SampleValue>(sample: &[T]) -> Result<f64, StatisticsError> {
    Ok(variance(sample)?.sqrt())
}

/// Proportion of entries strictly less than `threshold`
pub fn percent_below<T: SampleValue>(sample: &[T], threshold: f64) -> Result<f64, StatisticsError> {
    require_non_empty(sample)?;
    let sorted = sorted_copy(sample);
    let count = sorted.partition_point(|&x| x.to_f64() < threshold);
    Ok(count as f64 / sorted.len() as f64)
}
