//! The contour-to-stroke mapping engine.
//!
//! Pure logic only: geometry, down-sampling, the calibration state machine
//! and the drawing session. Pointer synthesis, image processing and the GUI
//! live outside this module and are reached through the traits defined here.

pub mod calibration;
pub mod geometry;
pub mod session;
pub mod state;
pub mod strokes;

pub use calibration::{CalibrationEvent, PointerSampler, ZoneCalibrator};
pub use geometry::{CalibrationError, Contour, ImageSize, Point, Zone};
pub use session::{DrawingSession, PointerActuator, Progress};
pub use state::EngineState;
pub use strokes::{parse_precision, DEFAULT_PRECISION};
