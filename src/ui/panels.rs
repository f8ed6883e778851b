use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ClassColors;
use crate::data::model::CoverageBand;
use crate::format::{format_count, format_number_trimmed};
use crate::state::{AppState, Command, StatusMessage};

use super::UiEvent;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState, events: &mut Vec<UiEvent>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                events.push(UiEvent::OpenFile);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                events.push(UiEvent::Reload);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.inventory.is_some() {
            ui.label(format!("{} records", format_count(state.view.rows.len())));
            ui.separator();
        }

        if state.is_loading() {
            ui.spinner();
        }

        match &state.status {
            Some(StatusMessage::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            Some(StatusMessage::Info(msg)) => {
                ui.label(RichText::new(msg).weak());
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and classification summary
// ---------------------------------------------------------------------------

/// Render the left filter panel. `search_input` holds the text box contents
/// as typed (the query keeps it lower-cased).
pub fn side_panel(
    ui: &mut Ui,
    state: &AppState,
    colors: &ClassColors,
    search_input: &mut String,
    events: &mut Vec<UiEvent>,
) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Search ----
            ui.strong("Search");
            let response = ui.add(
                egui::TextEdit::singleline(search_input)
                    .hint_text("Código, clave o descripción"),
            );
            if response.changed() {
                events.push(UiEvent::Command(Command::SetSearch(search_input.clone())));
            }
            ui.add_space(6.0);

            // ---- Coverage band ----
            ui.strong("Cobertura (mes)");
            let current = state.query.coverage;
            egui::ComboBox::from_id_salt("coverage_band")
                .selected_text(current.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for band in CoverageBand::ALL {
                        if ui.selectable_label(current == band, band.label()).clicked()
                            && band != current
                        {
                            events.push(UiEvent::Command(Command::SetCoverage(band)));
                        }
                    }
                });
            ui.add_space(6.0);

            // ---- Classification chips ----
            ui.strong("Clasificación");
            if state.view.chips.is_empty() {
                ui.label(RichText::new("No classifications").weak());
            }
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for chip in &state.view.chips {
                    let text = RichText::new(format!(
                        "{}  {}",
                        chip.value,
                        format_count(chip.count)
                    ))
                    .color(colors.color_for(&chip.value));
                    if ui.selectable_label(chip.active, text).clicked() {
                        events.push(UiEvent::Command(Command::ToggleClassification(
                            chip.value.clone(),
                        )));
                    }
                }
            });
            ui.add_space(6.0);

            if ui.button("Clear filters").clicked() {
                search_input.clear();
                events.push(UiEvent::Command(Command::ClearFilters));
            }

            ui.separator();
            summary_pills(ui, state, colors);
        });
}

/// Per-classification count and inventory of the current view.
fn summary_pills(ui: &mut Ui, state: &AppState, colors: &ClassColors) {
    ui.strong("Summary");
    for group in &state.view.summary {
        egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label(RichText::new("●").color(colors.color_for(&group.label)));
                ui.label(format!("Clasif {}", group.label));
                ui.label(
                    RichText::new(format!(
                        "· {} prod · Inv {}",
                        format_count(group.count),
                        format_number_trimmed(group.inventory, 3)
                    ))
                    .weak(),
                );
            });
        });
    }
}

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

/// The four headline numbers above the table.
pub fn kpi_cards(ui: &mut Ui, state: &AppState) {
    let text = state.view.kpis.formatted();
    let cards = [
        ("Productos", text.products),
        ("Inventario total", text.inventory),
        ("Venta promedio mes", text.sales),
        ("Cobertura promedio (días)", text.avg_coverage_days),
    ];

    ui.horizontal(|ui: &mut Ui| {
        for (title, value) in cards {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_min_width(170.0);
                ui.vertical(|ui: &mut Ui| {
                    ui.label(RichText::new(title).weak());
                    ui.heading(value);
                });
            });
        }
    });
}
