use std::time::{Duration, Instant};

use crate::engine::geometry::{CalibrationError, ImageSize, Point, Zone, ZoneMapper};

/// Live pointer position source. The production implementation reads the OS
/// cursor; tests supply scripted positions.
pub trait PointerSampler {
    fn position(&mut self) -> Option<Point>;
}

/// Where a calibration run currently stands. Each corner is sampled only
/// after its settle deadline has elapsed, giving the user time to move the
/// cursor into place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    AwaitingTopLeft { deadline: Instant },
    AwaitingBottomRight { deadline: Instant, top_left: Point },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalibrationEvent {
    /// Top-left corner captured; prompt the user for the bottom-right one.
    PromptBottomRight,
    /// Both corners captured and the candidate rectangle validated.
    Committed(Zone),
    /// The candidate rectangle failed validation. The previously committed
    /// zone stays in effect.
    Rejected(CalibrationError),
    /// No pointer position is available on this platform or session.
    SamplerUnavailable,
}

pub const PROMPT_TOP_LEFT: &str = "Move the cursor to the top-left corner of the drawing zone...";
pub const PROMPT_BOTTOM_RIGHT: &str =
    "Move the cursor to the bottom-right corner of the drawing zone...";

/// Captures the two corners of the drawing zone from the live cursor.
///
/// The calibrator is polled from the single GUI thread once per frame; it
/// never sleeps and never runs concurrently with itself.
#[derive(Debug)]
pub struct ZoneCalibrator {
    settle_delay: Duration,
    phase: Phase,
}

impl ZoneCalibrator {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            settle_delay,
            phase: Phase::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Start a calibration run. Returns the first user prompt.
    pub fn begin(&mut self, now: Instant) -> &'static str {
        self.phase = Phase::AwaitingTopLeft {
            deadline: now + self.settle_delay,
        };
        PROMPT_TOP_LEFT
    }

    /// Advance the state machine. Emits an event when a settle deadline has
    /// elapsed and a corner was sampled; otherwise returns `None` and the
    /// caller polls again next frame.
    ///
    /// `image_size` is the size of the currently loaded image, used to
    /// validate the candidate zone before committing it.
    pub fn poll(
        &mut self,
        now: Instant,
        sampler: &mut dyn PointerSampler,
        image_size: ImageSize,
    ) -> Option<CalibrationEvent> {
        match self.phase {
            Phase::Idle => None,
            Phase::AwaitingTopLeft { deadline } => {
                if now < deadline {
                    return None;
                }
                let Some(top_left) = sampler.position() else {
                    self.phase = Phase::Idle;
                    return Some(CalibrationEvent::SamplerUnavailable);
                };
                self.phase = Phase::AwaitingBottomRight {
                    deadline: now + self.settle_delay,
                    top_left,
                };
                Some(CalibrationEvent::PromptBottomRight)
            }
            Phase::AwaitingBottomRight { deadline, top_left } => {
                if now < deadline {
                    return None;
                }
                let Some(bottom_right) = sampler.position() else {
                    self.phase = Phase::Idle;
                    return Some(CalibrationEvent::SamplerUnavailable);
                };
                self.phase = Phase::Idle;

                let candidate = Zone::new(top_left, bottom_right);
                match ZoneMapper::new(image_size, candidate) {
                    Ok(_) => {
                        tracing::info!(
                            top_left = ?candidate.top_left,
                            bottom_right = ?candidate.bottom_right,
                            "drawing zone calibrated"
                        );
                        Some(CalibrationEvent::Committed(candidate))
                    }
                    Err(err) => {
                        tracing::warn!(%err, "calibration rejected");
                        Some(CalibrationEvent::Rejected(err))
                    }
                }
            }
        }
    }
}
