//! Exponential moving average over the cursor-driving point.

use crate::landmarks::Point;

/// `smoothed = alpha * raw + (1 - alpha) * previous`, per axis.
pub(crate) fn ema(raw: f64, previous: f64, alpha: f64) -> f64 {
    alpha * raw + (1.0 - alpha) * previous
}

/// Stateful EMA filter for a single tracked point.
///
/// The first sample is passed through unchanged, so there is no lag while
/// the filter warms up.
#[derive(Debug, Clone)]
pub struct Smoother {
    alpha: f64,
    current: Option<Point>,
}

impl Smoother {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            current: None,
        }
    }

    /// Feed a raw sample and return the new smoothed value.
    pub fn update(&mut self, raw: Point) -> Point {
        let next = match self.current {
            Some(prev) => Point::new(
                ema(raw.x, prev.x, self.alpha),
                ema(raw.y, prev.y, self.alpha),
            ),
            None => raw,
        };
        self.current = Some(next);
        next
    }

    /// Last smoothed value, if any sample was seen.
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(0.2)
    }
}
