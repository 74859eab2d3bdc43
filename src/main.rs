mod config;
mod engine;
mod gui;
mod signal;
mod types;

use std::path::Path;

use anyhow::Context;
use eframe::egui;

use config::ScopeConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => ScopeConfig::load(Path::new(&path)).context("loading configuration")?,
        None => ScopeConfig::default(),
    };

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([config.graph_width + 280.0, config.graph_height + 60.0])
        .with_min_inner_size([640.0, 320.0])
        .with_title("Cardioscope v0.1");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Cardioscope",
        options,
        Box::new(move |_cc| Box::new(gui::CardioscopeApp::new(config))),
    )
    .map_err(|err| anyhow::anyhow!("failed to start ui: {err}"))
}
