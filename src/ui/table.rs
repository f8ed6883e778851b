use eframe::egui::{self, Align, Color32, Layout, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::color::{heat_color, ClassColors};
use crate::data::model::{Column, HeatLevel, Record};
use crate::format::format_number;
use crate::state::{AppState, Command};

use super::UiEvent;

const ROW_HEIGHT: f32 = 20.0;
const HEADER_HEIGHT: f32 = 24.0;

// ---------------------------------------------------------------------------
// Inventory table (central panel)
// ---------------------------------------------------------------------------

/// Render the filtered, sorted records. Header clicks emit `SortBy`.
pub fn inventory_table(
    ui: &mut Ui,
    state: &AppState,
    colors: &ClassColors,
    events: &mut Vec<UiEvent>,
) {
    let Some(inventory) = &state.inventory else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV to view the inventory  (File → Open CSV…)");
        });
        return;
    };
    let records = &inventory.records;
    let rows = &state.view.rows;

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center));
    for column in Column::ALL {
        builder = builder.column(match column {
            Column::DescProd => TableColumn::remainder().at_least(160.0),
            _ => TableColumn::auto().at_least(70.0),
        });
    }

    builder
        .header(HEADER_HEIGHT, |mut header| {
            for column in Column::ALL {
                header.col(|ui: &mut Ui| {
                    let mut title = column.label().to_string();
                    if state.sort.key == Some(column) {
                        title.push(' ');
                        title.push_str(state.sort.direction.arrow());
                    }
                    let clicked = ui
                        .add(egui::Button::new(RichText::new(title).strong()).frame(false))
                        .clicked();
                    if clicked {
                        events.push(UiEvent::Command(Command::SortBy {
                            column,
                            numeric_hint: column.is_numeric(),
                        }));
                    }
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let Some(record) = rows.get(row.index()).and_then(|&i| records.get(i)) else {
                    return;
                };
                for column in Column::ALL {
                    row.col(|ui: &mut Ui| cell(ui, record, column, colors));
                }
            });
        });
}

fn cell(ui: &mut Ui, record: &Record, column: Column, colors: &ClassColors) {
    match column {
        Column::Clasificacion => {
            let label = if record.clasificacion.is_empty() {
                "–"
            } else {
                record.clasificacion.as_str()
            };
            ui.label(
                RichText::new(format!(" {label} "))
                    .strong()
                    .color(Color32::WHITE)
                    .background_color(colors.color_for(&record.clasificacion)),
            );
        }
        Column::CoberturaDias30 => {
            let days = record.cobertura_dias_30;
            let text = RichText::new(format_number(days, 0))
                .color(heat_color(HeatLevel::for_days(days)));
            numeric_label(ui, text);
        }
        numeric if numeric.is_numeric() => {
            let text = format_number(numeric.numeric_value(record), numeric.display_decimals());
            numeric_label(ui, RichText::new(text));
        }
        text => {
            ui.label(text.text_value(record));
        }
    }
}

fn numeric_label(ui: &mut Ui, text: RichText) {
    ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
        ui.label(text);
    });
}
