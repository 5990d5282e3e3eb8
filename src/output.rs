//! [`ActionDispatcher`] that writes actions as newline-delimited JSON.
//!
//! Lets any external actuator (an input-injection helper, a compositor
//! script, a recorder) consume the gesture stream:
//!
//! ```text
//! handctl | my-actuator
//! ```
//!
//! Each line is one serialised [`Action`], e.g.
//! `{"CursorMove":{"x":0.41,"y":0.63}}`.

use crate::action::{Action, Direction};
use crate::traits::ActionDispatcher;
use std::io::Write;

/// Errors produced by [`JsonLinesDispatcher`].
#[derive(Debug, thiserror::Error)]
pub enum JsonLinesError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json encode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes one JSON line per action to `W`.
pub struct JsonLinesDispatcher<W: Write> {
    out: W,
    last_cursor: (f64, f64),
}

impl<W: Write> JsonLinesDispatcher<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_cursor: (0.5, 0.5),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, action: &Action) -> Result<(), JsonLinesError> {
        serde_json::to_writer(&mut self.out, action)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> ActionDispatcher for JsonLinesDispatcher<W> {
    type Error = JsonLinesError;

    fn cursor_move(&mut self, x: f64, y: f64) -> Result<(), Self::Error> {
        self.last_cursor = (x, y);
        self.write(&Action::CursorMove { x, y })
    }

    fn mouse_down(&mut self) -> Result<(), Self::Error> {
        let (x, y) = self.last_cursor;
        self.write(&Action::MouseDown { x, y })
    }

    fn mouse_up(&mut self) -> Result<(), Self::Error> {
        self.write(&Action::MouseUp)
    }

    fn click(&mut self) -> Result<(), Self::Error> {
        let (x, y) = self.last_cursor;
        self.write(&Action::Click { x, y })
    }

    fn switch_desktop(&mut self, direction: Direction) -> Result<(), Self::Error> {
        self.write(&Action::SwitchDesktop(direction))
    }

    /// Actions are written verbatim rather than decomposed.
    fn dispatch(&mut self, action: &Action) -> Result<(), Self::Error> {
        match *action {
            Action::CursorMove { x, y }
            | Action::DragMove { x, y }
            | Action::MouseDown { x, y }
            | Action::Click { x, y } => self.last_cursor = (x, y),
            Action::MouseUp | Action::SwitchDesktop(_) => {}
        }
        self.write(action)
    }
}
