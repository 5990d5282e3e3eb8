//! Hand landmark types and their wire format.
//!
//! The hand tracker (an external process) supplies one [`LandmarkFrame`] per
//! camera frame: either the 21 landmarks of the standard hand model, each a
//! normalised `(x, y)` in `[0, 1]` with `y` growing downward, or
//! [`LandmarkFrame::Absent`] when no hand was detected.
//!
//! On the wire a frame is a single JSON object:
//!
//! ```json
//! {"landmarks": [[0.51, 0.80], [0.47, 0.74], ...]}
//! {"landmarks": null}
//! {}
//! ```
//!
//! Points may be written as `[x, y]`, `[x, y, z]` or `{"x": .., "y": ..}`.
//! Depth is ignored.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Number of landmarks in the hand model.
pub const LANDMARK_COUNT: usize = 21;

pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
/// Base knuckle used to drive the cursor and to measure swipes.
pub const REFERENCE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// A normalised 2-D position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Flip horizontally inside the unit square.
    pub fn mirrored(self) -> Self {
        Self {
            x: 1.0 - self.x,
            y: self.y,
        }
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Point;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "array [x, y(, z)] or object {{x, y}}")
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Point, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let x: f64 = seq
                    .next_element()?
                    .ok_or_else(|| DeError::invalid_length(0, &self))?;
                let y: f64 = seq
                    .next_element()?
                    .ok_or_else(|| DeError::invalid_length(1, &self))?;
                while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
                Ok(Point { x, y })
            }
            fn visit_map<A>(self, mut map: A) -> Result<Point, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut x = None;
                let mut y = None;
                while let Some(k) = map.next_key::<String>()? {
                    match k.as_str() {
                        "x" => x = Some(map.next_value()?),
                        "y" => y = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }
                Ok(Point {
                    x: x.ok_or_else(|| DeError::missing_field("x"))?,
                    y: y.ok_or_else(|| DeError::missing_field("y"))?,
                })
            }
        }
        deserializer.deserialize_any(V)
    }
}

/// The full set of landmarks for one detected hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks([Point; LANDMARK_COUNT]);

impl HandLandmarks {
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self(points)
    }

    /// Position of landmark `index`.
    ///
    /// # Panics
    ///
    /// If `index >= LANDMARK_COUNT`.
    pub fn get(&self, index: usize) -> Point {
        self.0[index]
    }

    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.0
    }

    /// The point that drives the cursor and the swipe detector.
    pub fn reference(&self) -> Point {
        self.0[REFERENCE_MCP]
    }

    pub fn mirrored(&self) -> Self {
        Self(self.0.map(Point::mirrored))
    }
}

impl<'de> Deserialize<'de> for HandLandmarks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let points = Vec::<Point>::deserialize(deserializer)?;
        let len = points.len();
        let points: [Point; LANDMARK_COUNT] = points.try_into().map_err(|_| {
            DeError::custom(format!(
                "expected {} landmarks, got {}",
                LANDMARK_COUNT, len
            ))
        })?;
        Ok(Self(points))
    }
}

/// Tracker output for one camera frame.
#[derive(Debug, Clone, PartialEq)]
pub enum LandmarkFrame {
    /// A hand was detected.
    Hand(HandLandmarks),
    /// No hand in view (or tracking failed).
    Absent,
}

impl LandmarkFrame {
    pub fn hand(&self) -> Option<&HandLandmarks> {
        match self {
            LandmarkFrame::Hand(h) => Some(h),
            LandmarkFrame::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, LandmarkFrame::Absent)
    }

    pub fn mirrored(&self) -> Self {
        match self {
            LandmarkFrame::Hand(h) => LandmarkFrame::Hand(h.mirrored()),
            LandmarkFrame::Absent => LandmarkFrame::Absent,
        }
    }
}

/// One line of the frame wire protocol.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameMessage {
    #[serde(default)]
    pub landmarks: Option<HandLandmarks>,
}

impl From<FrameMessage> for LandmarkFrame {
    fn from(msg: FrameMessage) -> Self {
        match msg.landmarks {
            Some(h) => LandmarkFrame::Hand(h),
            None => LandmarkFrame::Absent,
        }
    }
}
