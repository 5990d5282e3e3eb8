//! Core traits that decouple handctl from any specific tracker, clock or
//! operating-system backend.
//!
//! The [`GestureController`](crate::controller::GestureController) only
//! depends on these abstractions.

use crate::action::{Action, Direction};
use crate::landmarks::LandmarkFrame;
use std::sync::mpsc;
use std::time::Instant;

/// Abstraction over whatever performs the actions: a compositor IPC
/// connection, an input-injection tool, a JSON stream, a test recorder.
///
/// Dispatch is best-effort.  The pipeline never waits for or rolls back on
/// the outcome of a call.
pub trait ActionDispatcher {
    /// The error type produced by this dispatcher.
    type Error: std::error::Error + Send + 'static;

    /// Move the pointer to the normalised position `(x, y)`.
    fn cursor_move(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;

    /// Press the primary button.
    fn mouse_down(&mut self) -> Result<(), Self::Error>;

    /// Release the primary button.
    fn mouse_up(&mut self) -> Result<(), Self::Error>;

    /// Press and release the primary button.
    fn click(&mut self) -> Result<(), Self::Error>;

    /// Switch to the neighbouring virtual desktop.
    fn switch_desktop(&mut self, direction: Direction) -> Result<(), Self::Error>;

    /// Perform one [`Action`].
    ///
    /// Positional button actions move the pointer first.  Override this when
    /// the backend can express an action more directly.
    fn dispatch(&mut self, action: &Action) -> Result<(), Self::Error> {
        match *action {
            Action::CursorMove { x, y } | Action::DragMove { x, y } => self.cursor_move(x, y),
            Action::MouseDown { x, y } => {
                self.cursor_move(x, y)?;
                self.mouse_down()
            }
            Action::MouseUp => self.mouse_up(),
            Action::Click { x, y } => {
                self.cursor_move(x, y)?;
                self.click()
            }
            Action::SwitchDesktop(dir) => self.switch_desktop(dir),
        }
    }
}

/// A source of [`LandmarkFrame`]s.
///
/// Implementations wrap the hand tracker's transport (a Unix socket, a
/// pipe, a replay file, …) and forward decoded frames into the provided
/// [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](FrameSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Frames are forwarded in arrival order; none is reordered.
/// * Loss of the tracker should be forwarded as [`LandmarkFrame::Absent`].
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait FrameSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start reading and forward every frame into `sink`.
    fn run(&mut self, sink: mpsc::Sender<LandmarkFrame>) -> Result<(), Self::Error>;
}

/// Monotonic time source for cooldown comparisons.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
