//! Standing market tables
//!
//! The current glide path, mean and SD tables drive the default market.
//! The two `_old`/`_rj` tables are kept for comparison runs only.

use super::piecewise::PiecewiseLinear;

/// Target-date fund glide path: attained age -> % allocation to stocks
const GLIDE_PATH: [(f64, f64); 5] = [
    (20.0, 90.0),
    (40.0, 90.0),
    (60.0, 60.0),
    (65.0, 50.0),
    (72.0, 30.0),
];

/// % stocks -> average annual return, 1926-2021
const HISTORICAL_MEAN_RETURNS: [(f64, f64); 9] = [
    (0.0, 0.063),
    (20.0, 0.075),
    (30.0, 0.081),
    (40.0, 0.087),
    (50.0, 0.093),
    (60.0, 0.099),
    (70.0, 0.105),
    (80.0, 0.111),
    (100.0, 0.123),
];

/// % stocks -> average annual return, earlier data set
const HISTORICAL_MEAN_RETURNS_OLD: [(f64, f64); 9] = [
    (0.0, 0.054),
    (20.0, 0.067),
    (30.0, 0.072),
    (40.0, 0.078),
    (50.0, 0.083),
    (60.0, 0.087),
    (70.0, 0.091),
    (80.0, 0.095),
    (100.0, 0.101),
];

/// % stocks -> standard deviation of annual returns, 1976-2012
const HISTORICAL_SD_RETURNS: [(f64, f64); 11] = [
    (0.0, 0.0629),
    (10.0, 0.0626),
    (20.0, 0.0663),
    (30.0, 0.0737),
    (40.0, 0.0840),
    (50.0, 0.0965),
    (60.0, 0.1107),
    (70.0, 0.1264),
    (80.0, 0.1433),
    (90.0, 0.1614),
    (100.0, 0.1807),
];

/// % stocks -> standard deviation of annual returns, Raymond James data set
const HISTORICAL_SD_RETURNS_RJ: [(f64, f64); 10] = [
    (0.0, 0.117),
    (20.0, 0.107),
    (28.0, 0.102),
    (30.0, 0.105),
    (40.0, 0.110),
    (50.0, 0.112),
    (60.0, 0.121),
    (70.0, 0.134),
    (80.0, 0.147),
    (100.0, 0.178),
];

fn build(points: &[(f64, f64)]) -> PiecewiseLinear {
    PiecewiseLinear::new(points).expect("standing tables have distinct finite keys")
}

pub fn glide_path() -> PiecewiseLinear {
    build(&GLIDE_PATH)
}

pub fn historical_mean_returns() -> PiecewiseLinear {
    build(&HISTORICAL_MEAN_RETURNS)
}

pub fn historical_mean_returns_old() -> PiecewiseLinear {
    build(&HISTORICAL_MEAN_RETURNS_OLD)
}

pub fn historical_sd_returns() -> PiecewiseLinear {
    build(&HISTORICAL_SD_RETURNS)
}

pub fn historical_sd_returns_rj() -> PiecewiseLinear {
    build(&HISTORICAL_SD_RETURNS_RJ)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_glide_path_shape() {
        let gp = glide_path();
        assert_eq!(gp.evaluate(18.0), 90.0);
        assert_eq!(gp.evaluate(40.0), 90.0);
        assert_relative_eq!(gp.evaluate(50.0), 75.0, epsilon = 1e-12);
        assert_relative_eq!(gp.evaluate(62.0), 56.0, epsilon = 1e-12);
        assert_eq!(gp.evaluate(72.0), 30.0);
        assert_eq!(gp.evaluate(95.0), 30.0);
    }

    #[test]
    fn test_return_tables_cover_full_allocation_range() {
        for table in [
            historical_mean_returns(),
            historical_mean_returns_old(),
            historical_sd_returns(),
            historical_sd_returns_rj(),
        ] {
            let keys: Vec<f64> = table.control_points().iter().map(|(x, _)| *x).collect();
            assert_eq!(keys.first(), Some(&0.0));
            assert_eq!(keys.last(), Some(&100.0));
        }
    }

    #[test]
    fn test_current_tables_at_sixty_percent() {
        assert_eq!(historical_mean_returns().evaluate(60.0), 0.099);
        assert_eq!(historical_sd_returns().evaluate(60.0), 0.1107);
        assert_relative_eq!(historical_mean_returns().evaluate(90.0), 0.117, epsilon = 1e-12);
    }
}
