use crate::engine::geometry::{Contour, ImageSize, Zone};

/// Inputs the engine draws from, owned and mutated only by the host app.
///
/// The zone stays `None` until a calibration run commits one; the image size
/// and contours are replaced together whenever a new image is traced.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    pub zone: Option<Zone>,
    pub image_size: Option<ImageSize>,
    pub contours: Vec<Contour>,
}

impl EngineState {
    pub fn set_image(&mut self, size: ImageSize, contours: Vec<Contour>) {
        self.image_size = Some(size);
        self.contours = contours;
    }

    /// True when both an image and a calibrated zone are present.
    pub fn ready_to_draw(&self) -> bool {
        self.zone.is_some() && self.image_size.is_some()
    }
}
