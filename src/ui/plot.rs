use std::collections::BTreeMap;
use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::analysis::{HazardCounts, Histogram, Regression};
use crate::color::{generate_palette, ColorMap};
use crate::data::model::Value;
use crate::error::Result;
use crate::state::{AppState, ChartKind, MotionPoint};

/// Orbit bars beyond this many (by count) are not drawn.
const MAX_ORBIT_BARS: usize = 40;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the selected chart for the visible rows.
pub fn chart_panel(ui: &mut Ui, state: &AppState) {
    if state.cleaned.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to analyse  (File → Open…)");
        });
        return;
    }
    let Some(charts) = &state.charts else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No rows match the current filters");
        });
        return;
    };

    match state.chart {
        ChartKind::DiameterHistogram => {
            with_data(ui, &charts.histogram, diameter_histogram);
        }
        ChartKind::OrbitCounts => {
            with_data(ui, &charts.orbit_counts, orbit_counts);
        }
        ChartKind::HazardPie => {
            with_data(ui, &charts.hazard, |ui, counts| {
                hazard_pie(ui, counts, state.color_map.as_ref())
            });
        }
        ChartKind::Motion => {
            motion_scatter(
                ui,
                &charts.motion,
                charts.regression.as_ref().ok(),
                state.color_map.as_ref(),
            );
        }
    }
}

fn with_data<T>(ui: &mut Ui, data: &Result<T>, draw: impl FnOnce(&mut Ui, &T)) {
    match data {
        Ok(v) => draw(ui, v),
        Err(e) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new(format!("Chart unavailable: {e}")).color(Color32::RED));
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn diameter_histogram(ui: &mut Ui, hist: &Histogram) {
    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            Bar::new(hist.bin_center(i), n as f64)
                .width(hist.bin_width * 0.95)
                .name(format!("{:.3} km", hist.bin_center(i)))
        })
        .collect();

    Plot::new("diameter_histogram")
        .legend(Legend::default())
        .x_axis_label("Average estimated diameter (km)")
        .y_axis_label("Asteroids")
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Diameter")
                    .color(Color32::LIGHT_BLUE),
            );
        });
}

fn orbit_counts(ui: &mut Ui, counts: &BTreeMap<String, usize>) {
    let mut sorted: Vec<(String, usize)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted.truncate(MAX_ORBIT_BARS);

    let palette = generate_palette(sorted.len(), 200.0);
    let labels: Vec<String> = sorted.iter().map(|(id, _)| id.clone()).collect();
    let bars: Vec<Bar> = sorted
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, ((id, n), color))| {
            Bar::new(i as f64, *n as f64)
                .width(0.8)
                .name(format!("Orbit {id}"))
                .fill(color)
        })
        .collect();

    Plot::new("orbit_counts")
        .x_axis_label("Orbit ID")
        .y_axis_label("Asteroids")
        .x_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Orbit IDs"));
        });
}

fn hazard_pie(ui: &mut Ui, counts: &HazardCounts, colors: Option<&ColorMap>) {
    let total = counts.total() as f64;
    let slices = [
        (Value::Bool(true), "Hazardous", counts.hazardous),
        (Value::Bool(false), "Not hazardous", counts.harmless),
    ];

    Plot::new("hazard_pie")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for (value, label, n) in slices {
                if n == 0 {
                    continue;
                }
                let share = n as f64 / total;
                let sweep = share * TAU;
                let color = colors.map_or(Color32::GRAY, |cm| cm.color_for(&value));

                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(pie_slice(start, sweep)))
                        .name(label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = start + sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                    RichText::new(format!("{:.1}%", share * 100.0)).strong(),
                ));
                start += sweep;
            }
        });
}

/// Wedge of the unit circle from `start` spanning `sweep` radians.
fn pie_slice(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / TAU) * 120.0).ceil().max(2.0) as usize;
    let mut points = vec![[0.0, 0.0]];
    points.extend((0..=steps).map(|i| {
        let angle = start + sweep * i as f64 / steps as f64;
        [angle.cos(), angle.sin()]
    }));
    points
}

fn motion_scatter(
    ui: &mut Ui,
    points: &[MotionPoint],
    regression: Option<&Regression>,
    colors: Option<&ColorMap>,
) {
    // Group points by hazard flag so each group gets one legend entry.
    let mut groups: BTreeMap<&Value, Vec<[f64; 2]>> = BTreeMap::new();
    for p in points {
        groups
            .entry(&p.hazardous)
            .or_default()
            .push([p.miss_dist_km, p.miles_per_hour]);
    }

    let x_range = points
        .iter()
        .map(|p| p.miss_dist_km)
        .fold(None, |acc: Option<(f64, f64)>, x| match acc {
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
            None => Some((x, x)),
        });

    Plot::new("motion_scatter")
        .legend(Legend::default())
        .x_axis_label("Miss distance (km)")
        .y_axis_label("Miles per hour")
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for (value, pts) in groups {
                let color = colors.map_or(Color32::LIGHT_BLUE, |cm| cm.color_for(value));
                plot_ui.points(
                    Points::new(PlotPoints::new(pts))
                        .name(format!("Hazardous = {value}"))
                        .color(color)
                        .radius(2.0),
                );
            }

            if let (Some(reg), Some((lo, hi))) = (regression, x_range) {
                let line = PlotPoints::new(vec![[lo, reg.predict(lo)], [hi, reg.predict(hi)]]);
                plot_ui.line(
                    Line::new(line)
                        .name(format!("fit (r = {:.3}, p = {:.2e})", reg.r_value, reg.p_value))
                        .color(Color32::YELLOW)
                        .width(2.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_slice_starts_at_center_and_follows_arc() {
        let pts = pie_slice(0.0, TAU / 4.0);
        assert_eq!(pts[0], [0.0, 0.0]);
        assert!((pts[1][0] - 1.0).abs() < 1e-12);
        let [x, y] = pts[pts.len() - 1];
        assert!(x.abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
    }
}
