use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Value;
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Left side panel – summary and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: table summary, hazard legend, and row filters.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dataset");
    ui.separator();

    let Some(cleaned) = &state.cleaned else {
        ui.label("No dataset loaded.");
        return;
    };

    if let Some(source) = &state.source {
        ui.label(RichText::new(source.display().to_string()).small());
    }
    ui.label(format!(
        "{} rows × {} columns since {}",
        cleaned.details.rows, cleaned.details.columns, state.config.cutoff
    ));

    if let Some(cm) = &state.color_map {
        ui.add_space(4.0);
        ui.strong(format!("Colour by {}", cm.column));
        for (label, color) in cm.legend_entries() {
            ui.label(RichText::new(format!("■ {label}")).color(color));
        }
    }

    ui.separator();
    ui.heading("Filters");

    // Clone what we need so we can mutate state inside the loop.
    let unique = state.unique_values.clone();
    let mut toggled: Vec<(String, Value)> = Vec::new();
    let mut select_all: Option<String> = None;
    let mut select_none: Option<String> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (col, all_values) in &unique {
                let selected = state.filters.get(col);
                let n_selected = selected.map_or(all_values.len(), |s| s.len());
                let header_text = format!("{col}  ({n_selected}/{})", all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                select_all = Some(col.clone());
                            }
                            if ui.small_button("None").clicked() {
                                select_none = Some(col.clone());
                            }
                        });

                        for val in all_values {
                            let mut checked = selected.map_or(true, |s| s.contains(val));
                            let mut text = RichText::new(val.to_string());
                            if let Some(cm) = &state.color_map {
                                if cm.column == *col {
                                    text = text.color(cm.color_for(val));
                                }
                            }
                            if ui.checkbox(&mut checked, text).changed() {
                                toggled.push((col.clone(), val.clone()));
                            }
                        }
                    });
            }
        });

    // Apply changes after rendering so the filters are recomputed only once
    // per interaction instead of every frame.
    if let Some(col) = select_all {
        state.select_all(&col);
    }
    if let Some(col) = select_none {
        state.select_none(&col);
    }
    for (col, val) in toggled {
        state.toggle_filter_value(&col, &val);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for kind in ChartKind::ALL {
            if ui.selectable_label(state.chart == kind, kind.label()).clicked() {
                state.chart = kind;
            }
        }

        ui.separator();

        if let Some(cleaned) = &state.cleaned {
            ui.label(format!(
                "{} asteroids, {} visible",
                cleaned.table.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open asteroid data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
