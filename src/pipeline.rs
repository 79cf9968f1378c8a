//! Runs the stages in order for one file and collects every analyzer's
//! outcome into a [`Report`].
//!
//! ```text
//! load_data ─▶ filter_by_date ─▶ drop_columns ─▶ analyzers (independent)
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::analysis::{self, HazardCounts, Histogram, Regression};
use crate::config::PipelineConfig;
use crate::data::clean::{drop_columns, filter_by_date};
use crate::data::loader::load_data;
use crate::data::model::{Table, TableDetails};
use crate::error::{DataError, ErrorCategory, Result};

/// The trimmed working table plus the shape summary of the projection.
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub table: Table,
    pub details: TableDetails,
}

/// Date-filter the raw table and drop the configured columns.
///
/// The date filter itself accepts an empty result; the projection step then
/// rejects it with [`DataError::EmptyTable`].
pub fn clean(raw: &Table, config: &PipelineConfig) -> Result<Cleaned> {
    let dated = filter_by_date(raw, config.cutoff)?;
    let details = drop_columns(&dated, &config.drop_columns)?;
    Ok(Cleaned {
        table: dated.without_columns(&config.drop_columns),
        details,
    })
}

/// Console line printed before exiting when [`clean`] fails.
pub fn clean_failure_message(err: &DataError) -> &'static str {
    match err.category() {
        ErrorCategory::EmptyInput => "No data available after filtering by date, exiting.",
        ErrorCategory::SchemaViolation => "Required columns are missing, exiting.",
        ErrorCategory::AbsentInput | ErrorCategory::MalformedInput => {
            "Could not clean data, exiting."
        }
    }
}

/// Load and clean in one step.
pub fn prepare(path: &Path, config: &PipelineConfig) -> Result<Cleaned> {
    let raw = load_data(path)?;
    clean(&raw, config)
}

/// Outcome of every analyzer for one run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub cutoff: NaiveDate,
    pub details: TableDetails,
    #[serde(serialize_with = "outcome")]
    pub max_absolute_magnitude: Result<(String, f64)>,
    #[serde(serialize_with = "outcome")]
    pub closest_to_earth: Result<String>,
    #[serde(serialize_with = "outcome")]
    pub common_orbit: Result<BTreeMap<String, usize>>,
    #[serde(serialize_with = "outcome")]
    pub above_mean_diameter: Result<usize>,
    #[serde(serialize_with = "outcome")]
    pub hazard_counts: Result<HazardCounts>,
    #[serde(serialize_with = "outcome")]
    pub diameter_histogram: Result<Histogram>,
    #[serde(serialize_with = "outcome")]
    pub linear_motion: Result<Regression>,
}

/// Run every analyzer against the cleaned table.
pub fn analyze(cleaned: &Cleaned, config: &PipelineConfig) -> Report {
    let table = &cleaned.table;
    Report {
        cutoff: config.cutoff,
        details: cleaned.details.clone(),
        max_absolute_magnitude: analysis::max_absolute_magnitude(table),
        closest_to_earth: analysis::closest_to_earth(table),
        common_orbit: analysis::common_orbit(table),
        above_mean_diameter: analysis::above_mean_diameter(table),
        hazard_counts: analysis::hazard_counts(table),
        diameter_histogram: analysis::diameter_histogram(table, config.histogram_bins),
        linear_motion: analysis::linear_motion(table),
    }
}

#[derive(Serialize)]
struct Failed {
    error: String,
}

fn outcome<T, S>(value: &Result<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Ok(v) => v.serialize(serializer),
        Err(e) => Failed {
            error: e.to_string(),
        }
        .serialize(serializer),
    }
}

fn line<T>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: &Result<T>,
    show: impl Fn(&T) -> String,
) -> fmt::Result {
    match value {
        Ok(v) => writeln!(f, "{label}: {}", show(v)),
        Err(e) => writeln!(f, "{label}: unavailable ({e})"),
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table details after removing columns: {}", self.details)?;
        line(
            f,
            "Asteroid with max absolute magnitude",
            &self.max_absolute_magnitude,
            |(name, mag)| format!("({name}, {mag})"),
        )?;
        line(
            f,
            "Name of closest asteroid to earth",
            &self.closest_to_earth,
            |name| name.clone(),
        )?;
        line(f, "Number of asteroids per Orbit ID", &self.common_orbit, |counts| {
            format!("{counts:?}")
        })?;
        line(
            f,
            "Number of asteroids with max diameter above average",
            &self.above_mean_diameter,
            |n| n.to_string(),
        )?;
        line(f, "Hazardous asteroids", &self.hazard_counts, |h| {
            format!("{} of {}", h.hazardous, h.total())
        })?;
        line(
            f,
            "Miss distance vs. speed",
            &self.linear_motion,
            |r: &Regression| {
                format!(
                    "slope={:.6e}, intercept={:.4}, r={:.4}, p={:.4e}, stderr={:.4e} (n={})",
                    r.slope, r.intercept, r.r_value, r.p_value, r.std_err, r.samples
                )
            },
        )
    }
}
