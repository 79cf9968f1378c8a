//! Read-only queries over the cleaned asteroid table.
//!
//! Every analyzer validates its required columns first and returns a
//! [`DataError`] instead of a result when the gate fails. None of them mutate
//! the table, so they can run in any order.

pub mod stats;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::Table;
use crate::data::validate::require;
use crate::error::{DataError, Result};

pub use stats::Regression;

pub const NAME: &str = "Name";
pub const ABSOLUTE_MAGNITUDE: &str = "Absolute Magnitude";
pub const MISS_DIST_KM: &str = "Miss Dist.(kilometers)";
pub const ORBIT_ID: &str = "Orbit ID";
pub const DIAMETER_MIN_KM: &str = "Est Dia in KM(min)";
pub const DIAMETER_MAX_KM: &str = "Est Dia in KM(max)";
pub const HAZARDOUS: &str = "Hazardous";
pub const MILES_PER_HOUR: &str = "Miles per hour";

/// Name and magnitude of the asteroid with the largest `Absolute Magnitude`.
/// Ties go to the first row.
pub fn max_absolute_magnitude(table: &Table) -> Result<(String, f64)> {
    require(table, &[ABSOLUTE_MAGNITUDE, NAME])?;
    let (row, magnitude) = first_extreme(table, ABSOLUTE_MAGNITUDE, |a, b| a > b)?;
    Ok((name_at(table, row), magnitude))
}

/// Name of the asteroid with the smallest miss distance. Ties go to the
/// first row.
pub fn closest_to_earth(table: &Table) -> Result<String> {
    require(table, &[MISS_DIST_KM, NAME])?;
    let (row, _) = first_extreme(table, MISS_DIST_KM, |a, b| a < b)?;
    Ok(name_at(table, row))
}

/// Number of asteroids per `Orbit ID`. Empty cells are counted under
/// `<null>` so the counts always add up to the row count.
pub fn common_orbit(table: &Table) -> Result<BTreeMap<String, usize>> {
    require(table, &[ORBIT_ID])?;
    let mut counts = BTreeMap::new();
    for value in table.column(ORBIT_ID).into_iter().flatten() {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    Ok(counts)
}

/// How many asteroids have a maximum estimated diameter strictly above the
/// column mean.
pub fn above_mean_diameter(table: &Table) -> Result<usize> {
    require(table, &[DIAMETER_MAX_KM])?;
    let values: Vec<f64> = numeric(table, DIAMETER_MAX_KM).map(|(_, v)| v).collect();
    let mean =
        stats::mean(&values).ok_or_else(|| unusable(DIAMETER_MAX_KM))?;
    Ok(values.iter().filter(|&&v| v > mean).count())
}

/// Regress `Miles per hour` on `Miss Dist.(kilometers)`. Rows missing either
/// value are left out of both series.
pub fn linear_motion(table: &Table) -> Result<Regression> {
    require(table, &[MISS_DIST_KM, MILES_PER_HOUR])?;
    let pairs = paired(table, MISS_DIST_KM, MILES_PER_HOUR);
    if pairs.len() < 2 {
        return Err(DataError::InsufficientData(pairs.len()).logged());
    }
    let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.iter().map(|&(_, x, y)| (x, y)).unzip();
    stats::linear_regression(&xs, &ys)
        .ok_or_else(|| DataError::DegenerateRegression(MISS_DIST_KM.into()).logged())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HazardCounts {
    pub hazardous: usize,
    pub harmless: usize,
}

impl HazardCounts {
    pub fn total(&self) -> usize {
        self.hazardous + self.harmless
    }
}

/// Split of `Hazardous` flags; non-boolean cells are skipped.
pub fn hazard_counts(table: &Table) -> Result<HazardCounts> {
    require(table, &[HAZARDOUS])?;
    let mut counts = HazardCounts {
        hazardous: 0,
        harmless: 0,
    };
    for flag in table.column(HAZARDOUS).into_iter().flatten().filter_map(|v| v.as_bool()) {
        if flag {
            counts.hazardous += 1;
        } else {
            counts.harmless += 1;
        }
    }
    if counts.total() == 0 {
        return Err(unusable(HAZARDOUS));
    }
    Ok(counts)
}

/// Equal-width histogram; bin `i` covers `[start + i*width, start + (i+1)*width)`,
/// the last bin also includes its upper edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.bin_width
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Histogram of each asteroid's average estimated diameter (mean of the
/// min and max estimates) over `bins` equal-width bins.
pub fn diameter_histogram(table: &Table, bins: usize) -> Result<Histogram> {
    require(table, &[DIAMETER_MIN_KM, DIAMETER_MAX_KM])?;
    let values: Vec<f64> = paired(table, DIAMETER_MIN_KM, DIAMETER_MAX_KM)
        .into_iter()
        .map(|(_, lo, hi)| (lo + hi) / 2.0)
        .collect();
    histogram(&values, bins).ok_or_else(|| unusable(DIAMETER_MAX_KM))
}

fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    let bins = bins.max(1);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    let range = max - min;
    let bin_width = if range > 0.0 { range / bins as f64 } else { 1.0 };
    let mut counts = vec![0; bins];
    for &v in values {
        let idx = (((v - min) / bin_width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Some(Histogram {
        start: min,
        bin_width,
        counts,
    })
}

// ---------------------------------------------------------------------------
// Column helpers
// ---------------------------------------------------------------------------

/// `(row, value)` for every numeric cell of `column`.
fn numeric<'a>(table: &'a Table, column: &str) -> impl Iterator<Item = (usize, f64)> + 'a {
    table
        .column(column)
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(|(i, v)| v.as_f64().map(|f| (i, f)))
}

/// `(row, x, y)` for rows where both columns hold a number.
pub(crate) fn paired(table: &Table, x: &str, y: &str) -> Vec<(usize, f64, f64)> {
    let (Some(xi), Some(yi)) = (table.column_index(x), table.column_index(y)) else {
        return Vec::new();
    };
    table
        .rows()
        .iter()
        .enumerate()
        .filter_map(|(i, row)| Some((i, row[xi].as_f64()?, row[yi].as_f64()?)))
        .collect()
}

/// First row whose value beats every earlier one under `better`.
fn first_extreme(
    table: &Table,
    column: &str,
    better: impl Fn(f64, f64) -> bool,
) -> Result<(usize, f64)> {
    numeric(table, column)
        .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
            Some((_, b)) if !better(v, b) => best,
            _ => Some((i, v)),
        })
        .ok_or_else(|| unusable(column))
}

fn unusable(column: &str) -> DataError {
    DataError::NoUsableData(column.into()).logged()
}

fn name_at(table: &Table, row: usize) -> String {
    table
        .value(row, NAME)
        .map(|v| v.to_string())
        .unwrap_or_default()
}
