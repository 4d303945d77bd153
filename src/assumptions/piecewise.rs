//! Piecewise-linear functions over ordered control points
//!
//! The function is flat outside the original domain: at construction two
//! boundary entries are added at `f64::MIN` and `f64::MAX` carrying the
//! y-values of the smallest and largest original keys, so every finite
//! input has a stored key on each side.

use thiserror::Error;

/// Errors raised while building an interpolation table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpolationError {
    #[error("invalid interpolation domain: {0}")]
    InvalidDomain(String),
}

/// Piecewise-linear map from `f64` to `f64`
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseLinear {
    /// Control points sorted by key, boundary entries included
    points: Vec<(f64, f64)>,
}

impl PiecewiseLinear {
    /// Build a function through the given `(x, y)` control points
    ///
    /// Points may be given in any order. Fails when fewer than two points are
    /// supplied, when two points share a key, or when any coordinate is not
    /// finite.
    pub fn new(points: &[(f64, f64)]) -> Result<Self, InterpolationError> {
        if points.len() < 2 {
            return Err(InterpolationError::InvalidDomain(format!(
                "at least 2 control points required, got {}",
                points.len()
            )));
        }

        if let Some((x, y)) = points.iter().find(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(InterpolationError::InvalidDomain(format!(
                "control point ({x}, {y}) is not finite"
            )));
        }

        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        if let Some(pair) = sorted.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(InterpolationError::InvalidDomain(format!(
                "duplicate control point key {}",
                pair[0].0
            )));
        }

        let y_left = sorted[0].1;
        let y_right = sorted[sorted.len() - 1].1;

        // A caller key already sitting on a boundary is replaced, matching map-insert semantics
        sorted.retain(|(x, _)| *x != f64::MIN && *x != f64::MAX);
        let mut with_bounds = Vec::with_capacity(sorted.len() + 2);
        with_bounds.push((f64::MIN, y_left));
        with_bounds.extend(sorted);
        with_bounds.push((f64::MAX, y_right));

        Ok(Self { points: with_bounds })
    }

    /// Evaluate the function at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }

        // Index of the first stored key >= x
        let idx = self.points.partition_point(|(k, _)| *k < x);

        if idx >= self.points.len() {
            // Only reachable for x = +inf
            return self.points[self.points.len() - 1].1;
        }

        let (x2, y2) = self.points[idx];
        if x2 == x {
            return y2;
        }
        if idx == 0 {
            // Only reachable for x = -inf
            return y2;
        }

        let (x1, y1) = self.points[idx - 1];
        let slope = (y2 - y1) / (x2 - x1);
        y1 + slope * (x - x1)
    }

    /// Stored control points in key order, boundary entries included
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Original control points in key order, boundary entries excluded
    pub fn control_points(&self) -> &[(f64, f64)] {
        &self.points[1..self.points.len() - 1]
    }
}
