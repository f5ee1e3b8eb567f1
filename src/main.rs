mod app;
mod data;
mod graph;
mod interact;
mod layout;
mod util;

use std::path::PathBuf;

use clap::Parser;

use layout::{DEFAULT_ITERATIONS, LayoutConfig};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with the study records.
    #[arg(long, default_value = "studies.json")]
    data: PathBuf,

    /// Force-simulation round budget.
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Seed for the initial node placement.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let layout = LayoutConfig {
        iterations: args.iterations,
        seed: args.seed,
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "study-atlas",
        options,
        Box::new(move |cc| Ok(Box::new(app::StudyAtlasApp::new(cc, args.data.clone(), layout)))),
    )
}
