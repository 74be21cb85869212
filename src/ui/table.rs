use eframe::egui::{self, Align, Layout, Sense, TextStyle, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::selection::ClickKind;
use crate::state::{AppState, SelectionChange};

/// Map the held modifier keys to the selection behaviour of a row click.
fn click_kind(modifiers: egui::Modifiers) -> ClickKind {
    if modifiers.shift {
        ClickKind::Extend
    } else if modifiers.command {
        ClickKind::Toggle
    } else {
        ClickKind::Replace
    }
}

/// Render the loaded dataset as a table with clickable, selectable rows.
pub fn data_table(ui: &mut Ui, state: &mut AppState) {
    let Some(ws) = &state.workspace else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Import a CSV file to view data  (File → Open…)");
        });
        return;
    };

    let dataset = ws.dataset();
    let selection = ws.selection();
    let generation = ws.generation;
    let kind = click_kind(ui.input(|i| i.modifiers));
    let row_height = ui.text_style_height(&TextStyle::Body) + 4.0;
    let mut clicked: Option<usize> = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .sense(Sense::click())
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(40.0))
        .columns(
            Column::auto().at_least(60.0).clip(true),
            dataset.columns().len(),
        )
        .header(row_height + 2.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("#");
            });
            for col in dataset.columns() {
                header.col(|ui: &mut Ui| {
                    ui.strong(&col.name);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, dataset.row_count(), |mut row| {
                let i = row.index();
                row.set_selected(selection.contains(i));
                row.col(|ui: &mut Ui| {
                    ui.label(i.to_string());
                });
                for col in dataset.columns() {
                    row.col(|ui: &mut Ui| {
                        if let Some(cell) = col.values.get(i) {
                            ui.label(cell.to_string());
                        }
                    });
                }
                if row.response().clicked() {
                    clicked = Some(i);
                }
            });
        });

    if let Some(row) = clicked {
        let change = SelectionChange {
            generation,
            row,
            kind,
        };
        if let Err(e) = state.apply_selection(change) {
            state.report(e);
        }
    }
}
