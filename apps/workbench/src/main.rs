mod config;
mod controller;
mod ui;

use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let loaded = config::load_settings();
    let settings = loaded.settings;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &loaded.source {
        Some(path) => tracing::info!(path = %path.display(), "settings resolved"),
        None => tracing::info!("settings resolved from defaults"),
    }
    for warning in &loaded.warnings {
        tracing::warn!(%warning, "setting ignored");
    }

    let initial_input = config::read_initial_input(&settings).unwrap_or_else(|err| {
        tracing::warn!(error = %format!("{err:#}"), "initial input not loaded");
        None
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Advent of Code Workbench")
            .with_inner_size([1180.0, 780.0])
            .with_min_inner_size([860.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Advent of Code Workbench",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(ui::theme::terminal_visuals());
            Ok(Box::new(ui::WorkbenchApp::new(&settings, initial_input)))
        }),
    )
}
