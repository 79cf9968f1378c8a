use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::analysis::{self, HazardCounts, Histogram, Regression, HAZARDOUS, MILES_PER_HOUR, MISS_DIST_KM};
use crate::color::ColorMap;
use crate::config::PipelineConfig;
use crate::data::filter::{filtered_indices, init_filter_state, FilterState, MAX_FILTER_VALUES};
use crate::data::model::{Table, Value};
use crate::error::Result;
use crate::pipeline::{self, Cleaned};

// ---------------------------------------------------------------------------
// Chart selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    DiameterHistogram,
    OrbitCounts,
    HazardPie,
    Motion,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::DiameterHistogram,
        ChartKind::OrbitCounts,
        ChartKind::HazardPie,
        ChartKind::Motion,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::DiameterHistogram => "Diameter histogram",
            ChartKind::OrbitCounts => "Orbit IDs",
            ChartKind::HazardPie => "Hazardous",
            ChartKind::Motion => "Distance vs. speed",
        }
    }
}

// ---------------------------------------------------------------------------
// Chart data derived from the visible rows
// ---------------------------------------------------------------------------

/// One scatter point of the distance/speed chart.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionPoint {
    pub miss_dist_km: f64,
    pub miles_per_hour: f64,
    pub hazardous: Value,
}

/// Analyzer outputs recomputed for the currently visible rows.
#[derive(Debug)]
pub struct ChartData {
    pub rows: usize,
    pub histogram: Result<Histogram>,
    pub orbit_counts: Result<BTreeMap<String, usize>>,
    pub hazard: Result<HazardCounts>,
    pub motion: Vec<MotionPoint>,
    pub regression: Result<Regression>,
}

impl ChartData {
    pub fn from_table(table: &Table, bins: usize) -> Self {
        let motion = analysis::paired(table, MISS_DIST_KM, MILES_PER_HOUR)
            .into_iter()
            .map(|(row, x, y)| MotionPoint {
                miss_dist_km: x,
                miles_per_hour: y,
                hazardous: table.value(row, HAZARDOUS).cloned().unwrap_or(Value::Null),
            })
            .collect();
        ChartData {
            rows: table.len(),
            histogram: analysis::diameter_histogram(table, bins),
            orbit_counts: analysis::common_orbit(table),
            hazard: analysis::hazard_counts(table),
            motion,
            regression: analysis::linear_motion(table),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: PipelineConfig,

    /// File the current table came from.
    pub source: Option<PathBuf>,

    /// Cleaned table (None until a file loads successfully).
    pub cleaned: Option<Cleaned>,

    /// Distinct values of the low-cardinality columns offered as filters.
    pub unique_values: BTreeMap<String, BTreeSet<Value>>,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Indices of rows passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Charts for the visible rows (None when nothing is visible).
    pub charts: Option<ChartData>,

    /// Which chart the central panel shows.
    pub chart: ChartKind,

    /// Colours for the `Hazardous` flag.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            source: None,
            cleaned: None,
            unique_values: BTreeMap::new(),
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            charts: None,
            chart: ChartKind::DiameterHistogram,
            color_map: None,
            status_message: None,
        }
    }

    /// Ingest a cleaned table, initialise filters, colours and charts.
    pub fn set_cleaned(&mut self, source: PathBuf, cleaned: Cleaned) {
        self.unique_values = cleaned.table.unique_values(MAX_FILTER_VALUES);
        self.filters = init_filter_state(&self.unique_values);
        self.visible_indices = (0..cleaned.table.len()).collect();
        self.color_map = ColorMap::for_column(&cleaned.table, HAZARDOUS);
        self.charts = Some(ChartData::from_table(&cleaned.table, self.config.histogram_bins));

        self.source = Some(source);
        self.cleaned = Some(cleaned);
        self.status_message = None;
    }

    /// Run the whole pipeline on `path` and show the result.
    pub fn load_path(&mut self, path: &Path) {
        match pipeline::prepare(path, &self.config) {
            Ok(cleaned) => {
                log::info!(
                    "Viewer loaded {} rows from {}",
                    cleaned.table.len(),
                    path.display()
                );
                self.set_cleaned(path.to_path_buf(), cleaned);
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Recompute `visible_indices` and the charts after a filter change.
    pub fn refilter(&mut self) {
        let Some(cleaned) = &self.cleaned else {
            return;
        };
        self.visible_indices = filtered_indices(&cleaned.table, &self.unique_values, &self.filters);
        self.charts = if self.visible_indices.is_empty() {
            None
        } else {
            let visible = cleaned.table.select_rows(&self.visible_indices);
            Some(ChartData::from_table(&visible, self.config.histogram_bins))
        };
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: &str, value: &Value) {
        let selected = self.filters.entry(column.to_string()).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: &str) {
        if let Some(all_vals) = self.unique_values.get(column) {
            self.filters.insert(column.to_string(), all_vals.clone());
            self.refilter();
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: &str) {
        self.filters.insert(column.to_string(), BTreeSet::new());
        self.refilter();
    }
}
