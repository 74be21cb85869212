use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Tab {
    #[default]
    Data,
    Chart,
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SpineheadApp {
    pub state: AppState,
    tab: Tab,
}

impl SpineheadApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            tab: Tab::default(),
        }
    }
}

impl eframe::App for SpineheadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom: status bar, then the control panel above it ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.state);
        });
        egui::TopBottomPanel::bottom("control_panel").show(ctx, |ui| {
            panels::control_panel(ui, &mut self.state);
        });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Data, "Data");
                ui.selectable_value(&mut self.tab, Tab::Chart, "Chart");
            });
            ui.separator();

            match self.tab {
                Tab::Data => {
                    // Results below the table, with a draggable split.
                    egui::TopBottomPanel::bottom("results")
                        .resizable(true)
                        .default_height(220.0)
                        .show_inside(ui, |ui| {
                            panels::results_area(ui, &self.state);
                        });
                    table::data_table(ui, &mut self.state);
                }
                Tab::Chart => plot::group_means_chart(ui, &self.state),
            }
        });

        panels::error_window(ctx, &mut self.state);
    }
}
