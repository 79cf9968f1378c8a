use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

/// Columns removed from the working table after the date filter.
pub const DEFAULT_DROP_COLUMNS: [&str; 3] = ["Orbiting Body", "Neo Reference ID", "Equinox"];
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Settings shared by the CLI run and the viewer's "Open…" reloads.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Inclusive lower bound on `Close Approach Date`.
    pub cutoff: NaiveDate,
    pub drop_columns: Vec<String>,
    pub histogram_bins: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cutoff: default_cutoff(),
            drop_columns: DEFAULT_DROP_COLUMNS.iter().map(|c| c.to_string()).collect(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

fn default_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default()
}

#[derive(Parser, Debug)]
#[command(name = "asteroid-scope")]
#[command(version, about = "Analyse near-Earth asteroid close-approach records", long_about = None)]
pub struct Cli {
    /// CSV file with asteroid records (".csv" is appended when missing)
    #[arg(default_value = "nasa.csv")]
    pub path: PathBuf,

    /// Keep approaches on or after this date (YYYY-MM-DD)
    #[arg(long, default_value = "2000-01-01")]
    pub cutoff: NaiveDate,

    /// Column to remove from the working table (repeatable)
    #[arg(long = "drop", value_name = "COLUMN", default_values = DEFAULT_DROP_COLUMNS)]
    pub drop_columns: Vec<String>,

    /// Number of bins for the diameter histogram
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
    pub bins: usize,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Open the chart viewer after printing the report
    #[arg(long)]
    pub plot: bool,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            cutoff: self.cutoff,
            drop_columns: self.drop_columns.clone(),
            histogram_bins: self.bins.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_defaults() {
        let cli = Cli::try_parse_from(["asteroid-scope"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("nasa.csv"));
        assert_eq!(cli.pipeline_config(), PipelineConfig::default());
        assert!(!cli.json && !cli.plot);
    }

    #[test]
    fn overrides_are_applied() {
        let cli = Cli::try_parse_from([
            "asteroid-scope",
            "data/neo",
            "--cutoff",
            "2010-06-15",
            "--drop",
            "Equinox",
            "--bins",
            "0",
            "--json",
        ])
        .unwrap();
        let config = cli.pipeline_config();
        assert_eq!(config.cutoff, NaiveDate::from_ymd_opt(2010, 6, 15).unwrap());
        assert_eq!(config.drop_columns, vec!["Equinox".to_string()]);
        assert_eq!(config.histogram_bins, 1);
        assert!(cli.json);
    }

    #[test]
    fn rejects_bad_cutoff() {
        assert!(Cli::try_parse_from(["asteroid-scope", "--cutoff", "yesterday"]).is_err());
    }
}
