// Timeboard Demo Application
// Main entry point

use timeboard::ui_egui::SchedulerApp;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Timeboard demo");

    let app = SchedulerApp::new()?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 640.0])
            .with_min_inner_size([900.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Timeboard",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run the demo app: {err}"))
}
