mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use anyhow::{anyhow, Context, Result};
use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;
use view::RenderOptions;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env().context("reading dashboard configuration")?;
    log::debug!("Configuration: {config:?}");

    // The working set is loaded once; a bad file ends the session here.
    let working_set = data::loader::load_file(&config.data_path)
        .inspect_err(|e| log::error!("Failed to load listings: {e}"))
        .with_context(|| format!("loading listings from {}", config.data_path.display()))?;

    let state = AppState::new(working_set, RenderOptions::from_config(&config));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Texas Housing Market Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("UI error: {e}"))
}
