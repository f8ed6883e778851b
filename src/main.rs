use eframe::egui;
use inventory_dashboard::app::InventoryApp;
use inventory_dashboard::config::{self, Config};

fn main() -> eframe::Result {
    env_logger::init();

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration, using defaults: {e:#}");
            Config::default()
        }
    }
    .with_source_override(std::env::args().nth(1));

    let startup = config.csv_source();
    log::info!("Startup CSV: {startup}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Inventario – Cobertura de Inventario",
        options,
        Box::new(move |cc| Ok(Box::new(InventoryApp::new(&cc.egui_ctx, startup)))),
    )
}
