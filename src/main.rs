use eframe::egui;

use sketchpilot::gui::SketchApp;
use sketchpilot::logging;
use sketchpilot::settings::Settings;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load("settings.json")?;
    logging::init(settings.debug_logging);
    tracing::info!(
        pointer_delay_ms = settings.pointer_delay_ms,
        settle_delay_secs = settings.settle_delay_secs,
        "starting sketchpilot"
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([600.0, 750.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SketchPilot",
        native_options,
        Box::new(move |_cc| Box::new(SketchApp::new(settings))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run the gui: {err}"))
}
