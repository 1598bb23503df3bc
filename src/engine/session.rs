use crate::engine::geometry::{CalibrationError, Contour, ImageSize, Point, Zone};
use crate::engine::strokes::{self, Stroke};

/// Pointer primitives the session drives. `move_to` travels with the pen up,
/// `drag_to` with the pen down, drawing a line from the previous position.
/// `rest` lifts the pen wherever it is; called at every stroke boundary.
pub trait PointerActuator {
    fn move_to(&mut self, point: Point) -> anyhow::Result<()>;
    fn drag_to(&mut self, point: Point) -> anyhow::Result<()>;
    fn rest(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Strokes finished so far out of the session's contour total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub finished: usize,
    pub total: usize,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.finished, self.total)
    }
}

/// One drawing run: the down-sampled strokes for the current image plus a
/// cursor into them. Built fresh per draw request and discarded afterwards;
/// it holds no state across images.
///
/// The host advances the session one stroke at a time ([`Self::step`]) and
/// hands control back to its display-refresh cycle in between, so progress
/// stays visible while the pointer is busy. Cancellation is cooperative and
/// takes effect at the next stroke boundary.
#[derive(Debug)]
pub struct DrawingSession {
    strokes: Vec<Stroke>,
    total: usize,
    next: usize,
    cancelled: bool,
}

impl DrawingSession {
    /// Plan a session from the current engine inputs. Fails only when the
    /// zone is degenerate, which calibration normally rules out beforehand.
    pub fn plan(
        contours: &[Contour],
        image_size: ImageSize,
        zone: Zone,
        precision: u32,
    ) -> Result<Self, CalibrationError> {
        let strokes: Vec<Stroke> = strokes::generate(contours, image_size, zone, precision)?
            .map(|planned| planned.stroke)
            .collect();
        // An image whose every contour was filtered out draws nothing; report
        // it as 0/0 rather than 0/<contours>.
        let total = if strokes.is_empty() { 0 } else { contours.len() };
        Ok(Self {
            strokes,
            total,
            next: 0,
            cancelled: false,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.cancelled || self.next >= self.strokes.len()
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn progress(&self) -> Progress {
        Progress {
            finished: self.next,
            total: self.total,
        }
    }

    /// Draw the next stroke: one pen-up move, then the pen-down drags, then a
    /// pen lift. Returns the progress after the stroke. On an actuator
    /// failure the session is left cancelled so the host cannot keep driving
    /// a broken pointer.
    pub fn step(&mut self, actuator: &mut dyn PointerActuator) -> anyhow::Result<Progress> {
        if self.is_finished() {
            return Ok(self.progress());
        }

        let stroke = &self.strokes[self.next];
        let result = Self::draw_stroke(stroke, actuator);
        if let Err(err) = result {
            self.cancelled = true;
            return Err(err);
        }

        self.next += 1;
        let progress = self.progress();
        tracing::debug!(%progress, points = stroke.len(), "stroke finished");
        Ok(progress)
    }

    fn draw_stroke(stroke: &Stroke, actuator: &mut dyn PointerActuator) -> anyhow::Result<()> {
        actuator.move_to(stroke.pen_up())?;
        for &point in stroke.pen_down() {
            actuator.drag_to(point)?;
        }
        actuator.rest()
    }
}
