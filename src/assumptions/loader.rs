//! CSV-based market table loader
//!
//! Loads glide path and return tables from CSV files in data/assumptions/.
//! Each file has a header row followed by `x,y` records.

use std::error::Error;
use std::fs::File;
use std::path::Path;

use super::piecewise::PiecewiseLinear;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

pub const GLIDE_PATH_FILE: &str = "glide_path.csv";
pub const MEAN_RETURNS_FILE: &str = "mean_returns.csv";
pub const SD_RETURNS_FILE: &str = "sd_returns.csv";

/// Load control points from a two-column CSV file
/// Returns Vec<(x, y)> in file order
pub fn load_control_points(path: &Path) -> Result<Vec<(f64, f64)>, Box<dyn Error>> {
    let file = File::open(path)
        .map_err(|e| format!("Unable to open {}: {}", path.display(), e))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut points = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.len() < 2 {
            return Err(format!(
                "{}: expected 2 columns, found {}",
                path.display(),
                record.len()
            )
            .into());
        }
        let x: f64 = record[0].trim().parse()?;
        let y: f64 = record[1].trim().parse()?;
        points.push((x, y));
    }

    Ok(points)
}

/// Load a control-point file and build the interpolation table from it
pub fn load_table(path: &Path) -> Result<PiecewiseLinear, Box<dyn Error>> {
    let points = load_control_points(path)?;
    let table = PiecewiseLinear::new(&points)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    log::debug!("Loaded {} control points from {}", points.len(), path.display());
    Ok(table)
}

/// All market tables loaded from one directory
pub struct LoadedTables {
    pub glide_path: PiecewiseLinear,
    pub mean_returns: PiecewiseLinear,
    pub sd_returns: PiecewiseLinear,
}

impl LoadedTables {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, Box<dyn Error>> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            glide_path: load_table(&path.join(GLIDE_PATH_FILE))?,
            mean_returns: load_table(&path.join(MEAN_RETURNS_FILE))?,
            sd_returns: load_table(&path.join(SD_RETURNS_FILE))?,
        })
    }
}
