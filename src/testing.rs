//! Synthetic hands for unit tests.

use crate::landmarks::{
    HandLandmarks, Point, INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_PIP, MIDDLE_TIP,
    PINKY_PIP, PINKY_TIP, REFERENCE_MCP, RING_PIP, RING_TIP,
};

const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// A hand whose reference knuckle sits at `reference` and whose index,
/// middle, ring and pinky are extended according to `extended`.
pub(crate) fn hand_with(extended: [bool; 4], reference: Point) -> HandLandmarks {
    let mut points = [reference; LANDMARK_COUNT];
    for ((tip, pip), up) in FINGERS.iter().zip(extended) {
        points[*pip] = Point::new(reference.x, reference.y - 0.05);
        let dy = if up { -0.10 } else { 0.0 };
        points[*tip] = Point::new(reference.x, reference.y + dy);
    }
    points[REFERENCE_MCP] = reference;
    HandLandmarks::new(points)
}

pub(crate) fn fist_at(x: f64, y: f64) -> HandLandmarks {
    hand_with([false; 4], Point::new(x, y))
}

pub(crate) fn palm_at(x: f64, y: f64) -> HandLandmarks {
    hand_with([true; 4], Point::new(x, y))
}

/// Two fingers up: neither fist nor open palm, and not pointing.
pub(crate) fn neutral_at(x: f64, y: f64) -> HandLandmarks {
    hand_with([true, true, false, false], Point::new(x, y))
}

pub(crate) fn pointing_at(x: f64, y: f64) -> HandLandmarks {
    hand_with([true, false, false, false], Point::new(x, y))
}
