use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use spinehead::app::SpineheadApp;
use spinehead::state::AppState;

/// Browse a CSV table and compare the Group_1 / Group_2 averages over
/// selected rows.
#[derive(Parser)]
#[command(name = "spinehead", version, about, long_about = None)]
struct Args {
    /// CSV file to load at startup
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::default();
    if let Some(path) = &args.file {
        if let Err(e) = state.import(path) {
            state.report(e);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([700.0, 700.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Demo GUI - Spinehead",
        options,
        Box::new(|_cc| Ok(Box::new(SpineheadApp::new(state)))),
    )
}
