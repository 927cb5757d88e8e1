use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::InventoryApp;

#[derive(Parser, Debug)]
#[command(name = "stockroom", about = "Desktop inventory manager")]
struct Args {
    /// Overrides the configured inventory database URL.
    #[arg(long)]
    database_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let settings = config::load_settings(args.database_url);
    tracing::info!(database_url = %settings.database_url, "starting stockroom");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Stockroom Inventory")
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Stockroom Inventory",
        options,
        Box::new(|_cc| Ok(Box::new(InventoryApp::new(cmd_tx, ui_rx)))),
    )
}
