//! Action intents produced by the gesture pipeline.
//!
//! This module defines the vocabulary shared between the core and every
//! [`ActionDispatcher`](crate::traits::ActionDispatcher): [`Action`]
//! describes *that* something should happen, never *how* the operating
//! system performs it.
//!
//! Coordinates are normalised to `[0, 1]`; mapping to screen pixels is the
//! dispatcher's job.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Horizontal direction of a swipe / desktop switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Parse a direction string (case-insensitive).
fn parse_direction(s: &str) -> Option<Direction> {
    match s.trim().to_lowercase().as_str() {
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_direction(&s).ok_or_else(|| DeError::custom(format!("invalid direction: {:?}", s)))
    }
}

/// Every intent the arbiter can emit.
///
/// On the wire (see [`JsonLinesDispatcher`](crate::output::JsonLinesDispatcher))
/// these use serde's default external tagging:
///
/// ```json
/// {"CursorMove":{"x":0.41,"y":0.63}}
/// {"MouseDown":{"x":0.41,"y":0.63}}
/// "MouseUp"
/// {"SwitchDesktop":"Right"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Move the pointer.  Emitted for every frame in which a hand is seen,
    /// unless a [`DragMove`](Action::DragMove) already carries the position.
    CursorMove { x: f64, y: f64 },

    /// Press the synthetic mouse button at the given position.
    MouseDown { x: f64, y: f64 },

    /// Follow the hand while the button is held.
    DragMove { x: f64, y: f64 },

    /// Release the synthetic mouse button.
    MouseUp,

    /// Single left click (index-finger pointing).
    Click { x: f64, y: f64 },

    /// Switch to the neighbouring virtual desktop.
    SwitchDesktop(Direction),
}

impl Action {
    /// Whether this action changes the mouse-button state.
    pub fn is_button_edge(&self) -> bool {
        matches!(self, Action::MouseDown { .. } | Action::MouseUp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Left.to_string(), "left");
        assert_eq!(Direction::Right.to_string(), "right");
    }

    #[test]
    fn direction_parse_is_case_insensitive() {
        let d: Direction = serde_json::from_str(r#""RIGHT""#).unwrap();
        assert_eq!(d, Direction::Right);
        let d: Direction = serde_json::from_str(r#"" left ""#).unwrap();
        assert_eq!(d, Direction::Left);
        assert!(serde_json::from_str::<Direction>(r#""up""#).is_err());
    }

    #[test]
    fn action_wire_format() {
        assert_eq!(
            serde_json::to_string(&Action::SwitchDesktop(Direction::Right)).unwrap(),
            r#"{"SwitchDesktop":"Right"}"#
        );
        assert_eq!(serde_json::to_string(&Action::MouseUp).unwrap(), r#""MouseUp""#);
        let a: Action = serde_json::from_str(r#"{"MouseDown":{"x":0.5,"y":0.25}}"#).unwrap();
        assert_eq!(a, Action::MouseDown { x: 0.5, y: 0.25 });
    }

    #[test]
    fn button_edges() {
        assert!(Action::MouseUp.is_button_edge());
        assert!(Action::MouseDown { x: 0.0, y: 0.0 }.is_button_edge());
        assert!(!Action::DragMove { x: 0.0, y: 0.0 }.is_button_edge());
        assert!(!Action::SwitchDesktop(Direction::Left).is_button_edge());
    }
}
