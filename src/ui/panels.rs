use eframe::egui::{self, Align2, Color32, RichText, TextEdit, Ui};

use crate::state::AppState;

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
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.menu_button("Selection", |ui: &mut Ui| {
            if ui.button("Select All").clicked() {
                if let Err(e) = state.select_all() {
                    state.report(e);
                }
                ui.close_menu();
            }
            if ui.button("Clear").clicked() {
                state.clear_selection();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ws) = &state.workspace {
            let ds = ws.dataset();
            ui.label(format!(
                "{} rows × {} columns, {} selected",
                ds.row_count(),
                ds.columns().len(),
                ws.selection().len()
            ));
            if let Some(src) = ws.source.as_ref().and_then(|p| p.file_name()) {
                ui.separator();
                ui.label(RichText::new(src.to_string_lossy()).weak());
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Control panel / status bar
// ---------------------------------------------------------------------------

/// Import / Clear / Quit buttons.
pub fn control_panel(ui: &mut Ui, state: &mut AppState) {
    ui.group(|ui: &mut Ui| {
        ui.label(RichText::new("Control Panel").strong());
        ui.horizontal(|ui: &mut Ui| {
            let size = egui::vec2(120.0, 28.0);
            if ui.add_sized(size, egui::Button::new("Import Data")).clicked() {
                open_file_dialog(state);
            }
            if ui.add_sized(size, egui::Button::new("Clear")).clicked() {
                state.clear_selection();
            }
            if ui.add_sized(size, egui::Button::new("Quit")).clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    });
}

pub fn status_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(&state.status_text);
    });
}

/// Read-only text area holding the selection summary.
pub fn results_area(ui: &mut Ui, state: &AppState) {
    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let mut text = state.results_text.as_str();
            ui.add(
                TextEdit::multiline(&mut text)
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY)
                    .hint_text("Results"),
            );
        });
}

/// Modal notice for the pending error, if any.
pub fn error_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.error_message.clone() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui: &mut Ui| {
            ui.label(RichText::new(message).color(Color32::RED));
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                state.dismiss_error();
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open Data (*.csv)")
        .add_filter("Text Files", &["csv"])
        .pick_file();

    match file {
        Some(path) => match state.import(&path) {
            Ok(()) => log::info!("Loaded: '{}'", path.display()),
            Err(e) => state.report(e),
        },
        None => log::info!("Nothing Loaded"),
    }
}
