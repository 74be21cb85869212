use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::data::summary::SelectionSummary;
use crate::state::AppState;

const BAR_COLORS: [Color32; 2] = [Color32::LIGHT_BLUE, Color32::from_rgb(240, 160, 80)];

// ---------------------------------------------------------------------------
// Group means chart (Chart tab)
// ---------------------------------------------------------------------------

/// Bar chart of the group means over the current selection.
pub fn group_means_chart(ui: &mut Ui, state: &AppState) {
    let means = match &state.summary {
        Some(summary @ SelectionSummary::Rows { .. }) => summary.means(),
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Select rows on the Data tab to compare group averages");
            });
            return;
        }
    };

    Plot::new("group_means")
        .legend(Legend::default())
        .y_axis_label("Average")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, m) in means.iter().enumerate() {
                let Some(value) = m.mean else { continue };
                let color = BAR_COLORS[i % BAR_COLORS.len()];
                let bar = Bar::new(i as f64, value).width(0.6).fill(color);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(&m.column).color(color));
            }
        });
}
