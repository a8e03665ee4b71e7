//! Flashpad desktop entry point

use eframe::egui;
use flashpad::app::FlashpadApp;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Flashpad...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Flashpad"),
        ..Default::default()
    };

    eframe::run_native(
        "Flashpad",
        native_options,
        Box::new(|cc| Ok(Box::new(FlashpadApp::new(cc)?))),
    )
}
