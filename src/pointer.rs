//! OS pointer collaborators: event synthesis for drawing and cursor
//! sampling for calibration.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use rdev::{listen, simulate, Button, EventType};

use crate::engine::{Point, PointerActuator, PointerSampler};

/// Synthesizes mouse events through `rdev`, pacing them with a fixed delay
/// so the receiving surface registers every move. Tracks the left-button
/// state itself: `move_to` travels pen-up, `drag_to` pen-down.
#[derive(Debug)]
pub struct SystemPointer {
    delay: Duration,
    button_down: bool,
}

impl SystemPointer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            button_down: false,
        }
    }

    fn send(&self, event: EventType) -> anyhow::Result<()> {
        simulate(&event).map_err(|_| anyhow!("failed to synthesize pointer event {event:?}"))?;
        thread::sleep(self.delay);
        Ok(())
    }
}

impl PointerActuator for SystemPointer {
    fn move_to(&mut self, point: Point) -> anyhow::Result<()> {
        if self.button_down {
            self.send(EventType::ButtonRelease(Button::Left))?;
            self.button_down = false;
        }
        self.send(EventType::MouseMove {
            x: point.x as f64,
            y: point.y as f64,
        })
    }

    fn drag_to(&mut self, point: Point) -> anyhow::Result<()> {
        if !self.button_down {
            self.send(EventType::ButtonPress(Button::Left))?;
            self.button_down = true;
        }
        self.send(EventType::MouseMove {
            x: point.x as f64,
            y: point.y as f64,
        })
    }

    fn rest(&mut self) -> anyhow::Result<()> {
        if self.button_down {
            self.send(EventType::ButtonRelease(Button::Left))?;
            self.button_down = false;
        }
        Ok(())
    }
}

/// Reads the live cursor position for calibration.
///
/// On Windows the position is read directly via `GetCursorPos`. Elsewhere a
/// background `rdev` listener records the last observed mouse-move; until
/// the first move arrives no position is available.
pub struct SystemSampler {
    last_seen: Arc<Mutex<Option<Point>>>,
}

impl SystemSampler {
    pub fn new() -> Self {
        Self {
            last_seen: Arc::new(Mutex::new(None)),
        }
    }

    /// Spawn the mouse-move listener thread. Call once at startup.
    pub fn start_listener(&self) {
        let last_seen = self.last_seen.clone();
        tracing::debug!("starting pointer position listener");
        thread::spawn(move || {
            let result = listen(move |event| {
                if let EventType::MouseMove { x, y } = event.event_type {
                    if let Ok(mut guard) = last_seen.lock() {
                        *guard = Some(Point::new(x as i32, y as i32));
                    }
                }
            });
            if let Err(err) = result {
                tracing::error!("pointer position listener stopped: {err:?}");
            }
        });
    }
}

impl Default for SystemSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerSampler for SystemSampler {
    fn position(&mut self) -> Option<Point> {
        #[cfg(windows)]
        {
            if let Some(point) = cursor_position_win32() {
                return Some(point);
            }
        }

        self.last_seen.lock().ok().and_then(|guard| *guard)
    }
}

#[cfg(windows)]
fn cursor_position_win32() -> Option<Point> {
    use windows::Win32::Foundation::POINT;
    use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

    let mut point = POINT::default();
    if unsafe { GetCursorPos(&mut point) }.is_ok() {
        Some(Point::new(point.x, point.y))
    } else {
        None
    }
}
