use std::time::{Duration, Instant};

use eframe::egui;

use crate::engine::calibration::PROMPT_BOTTOM_RIGHT;
use crate::engine::{
    parse_precision, CalibrationEvent, DrawingSession, EngineState, ImageSize, ZoneCalibrator,
};
use crate::pointer::{SystemPointer, SystemSampler};
use crate::settings::Settings;
use crate::vision;

/// Main application window: image entry and preview on top, calibration,
/// precision and draw controls below, with the instruction label doubling as
/// the progress display.
pub struct SketchApp {
    state: EngineState,
    calibrator: ZoneCalibrator,
    sampler: SystemSampler,
    pointer: SystemPointer,
    session: Option<DrawingSession>,
    image_path: String,
    precision_text: String,
    instructions: String,
    preview: Option<egui::TextureHandle>,
}

impl SketchApp {
    pub fn new(settings: Settings) -> Self {
        let sampler = SystemSampler::new();
        sampler.start_listener();

        Self {
            state: EngineState::default(),
            calibrator: ZoneCalibrator::new(settings.settle_delay()),
            sampler,
            pointer: SystemPointer::new(settings.pointer_delay()),
            session: None,
            image_path: settings.image_path.clone(),
            precision_text: settings.precision.to_string(),
            instructions: String::new(),
            preview: None,
        }
    }

    fn load_image(&mut self, ctx: &egui::Context) {
        match vision::trace_image(&self.image_path) {
            Ok(traced) => {
                let size = [traced.edges.width() as usize, traced.edges.height() as usize];
                let preview = egui::ColorImage::from_gray(size, traced.edges.as_raw());
                self.preview =
                    Some(ctx.load_texture("edge-preview", preview, egui::TextureOptions::NEAREST));
                self.instructions = format!(
                    "Loaded {} ({} contours)",
                    self.image_path,
                    traced.contours.len()
                );
                self.state.set_image(traced.size, traced.contours);
            }
            Err(err) => {
                tracing::error!("image trace failed: {err:#}");
                self.instructions = format!("{err:#}");
            }
        }
    }

    fn start_draw(&mut self) {
        let precision = parse_precision(&self.precision_text);
        let (Some(zone), Some(image_size)) = (self.state.zone, self.state.image_size) else {
            self.instructions =
                "Load an image and calibrate the drawing zone first.".to_string();
            return;
        };

        match DrawingSession::plan(&self.state.contours, image_size, zone, precision) {
            Ok(session) => {
                tracing::info!(precision, "drawing session started");
                self.instructions = session.progress().to_string();
                self.session = Some(session);
            }
            Err(err) => self.instructions = err.to_string(),
        }
    }

    /// Advance an active calibration run. Validation needs an image size for
    /// the aspect ratio; before any image is loaded a 1x1 placeholder is
    /// used, which leaves the accept/reject outcome unchanged.
    fn drive_calibration(&mut self, ctx: &egui::Context) {
        if !self.calibrator.is_active() {
            return;
        }

        let image_size = self.state.image_size.unwrap_or(ImageSize::new(1, 1));
        match self
            .calibrator
            .poll(Instant::now(), &mut self.sampler, image_size)
        {
            Some(CalibrationEvent::PromptBottomRight) => {
                self.instructions = PROMPT_BOTTOM_RIGHT.to_string();
            }
            Some(CalibrationEvent::Committed(zone)) => {
                self.state.zone = Some(zone);
                self.instructions = "All done!".to_string();
            }
            Some(CalibrationEvent::Rejected(err)) => {
                self.instructions = err.to_string();
            }
            Some(CalibrationEvent::SamplerUnavailable) => {
                self.instructions = "Could not read the cursor position.".to_string();
            }
            None => {}
        }
        // Keep polling even while no input events arrive.
        ctx.request_repaint_after(Duration::from_millis(50));
    }

    /// Draw exactly one stroke per frame so the window stays responsive and
    /// the progress label refreshes between strokes.
    fn drive_session(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.step(&mut self.pointer) {
            Ok(progress) => {
                self.instructions = progress.to_string();
                if session.is_finished() {
                    tracing::info!(%progress, "drawing session finished");
                    self.session = None;
                }
            }
            Err(err) => {
                tracing::error!("drawing aborted: {err:#}");
                self.instructions = format!("Drawing aborted: {err:#}");
                self.session = None;
            }
        }
        ctx.request_repaint();
    }
}

impl eframe::App for SketchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive_calibration(ctx);
        self.drive_session(ctx);

        egui::TopBottomPanel::top("image-entry").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Image:");
                ui.text_edit_singleline(&mut self.image_path);
                if ui.button("Load").clicked() {
                    self.load_image(ctx);
                }
            });
        });

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let busy = self.calibrator.is_active() || self.session.is_some();
                if ui
                    .add_enabled(!busy, egui::Button::new("Calibrate drawing zone"))
                    .clicked()
                {
                    self.instructions = self.calibrator.begin(Instant::now()).to_string();
                }

                ui.label("Precision (smaller = slower):");
                ui.add(egui::TextEdit::singleline(&mut self.precision_text).desired_width(60.0));

                if self.session.is_none() {
                    if ui.add_enabled(!busy, egui::Button::new("Draw!")).clicked() {
                        self.start_draw();
                    }
                } else if ui.button("Cancel").clicked() {
                    if let Some(session) = self.session.as_mut() {
                        session.cancel();
                    }
                }
            });
            ui.label(&self.instructions);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(texture) = &self.preview {
                ui.image(texture);
            } else {
                ui.label("No image loaded.");
            }
        });
    }
}
