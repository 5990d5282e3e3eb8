//! Horizontal swipe detection over the [`LandmarkBuffer`].
//!
//! # Rules
//!
//! 1. The buffer must be full before anything is evaluated (warm-up).
//! 2. `dx = newest - oldest`.  `dx > threshold` is a right-swipe candidate,
//!    `dx < -threshold` a left-swipe candidate.
//! 3. A candidate is suppressed while the pose is [`HandPose::Fist`].
//! 4. A candidate is suppressed while `now` is before the cooldown deadline.
//! 5. An emitted swipe arms the cooldown and clears the buffer, so one
//!    physical motion cannot fire twice.

use crate::action::Direction;
use crate::buffer::LandmarkBuffer;
use crate::classifier::HandPose;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Stateful swipe detector.  Owns the landmark history and the cooldown.
#[derive(Debug, Clone)]
pub struct SwipeDetector {
    buffer: LandmarkBuffer,
    threshold: f64,
    cooldown: Duration,
    cooldown_until: Option<Instant>,
}

impl SwipeDetector {
    pub fn new(buffer_len: usize, threshold: f64, cooldown: Duration) -> Self {
        Self {
            buffer: LandmarkBuffer::new(buffer_len),
            threshold,
            cooldown,
            cooldown_until: None,
        }
    }

    /// Record the reference landmark's x for this frame.
    pub fn push(&mut self, x: f64) {
        self.buffer.push(x);
    }

    /// Drop the accumulated history (cooldown is kept).
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Push `x` and evaluate.
    pub fn update(&mut self, x: f64, pose: HandPose, now: Instant) -> Option<Direction> {
        self.push(x);
        self.detect(pose, now)
    }

    /// Evaluate the current buffer without adding a sample.
    pub fn detect(&mut self, pose: HandPose, now: Instant) -> Option<Direction> {
        let dir = self.candidate()?;

        if pose == HandPose::Fist {
            debug!("swipe {} suppressed: fist", dir);
            return None;
        }
        if self.is_cooling_down(now) {
            debug!("swipe {} suppressed: cooldown", dir);
            return None;
        }

        info!("swipe {}", dir);
        self.cooldown_until = Some(now + self.cooldown);
        self.buffer.clear();
        Some(dir)
    }

    /// Direction indicated by the buffer, ignoring pose and cooldown.
    fn candidate(&self) -> Option<Direction> {
        if !self.buffer.is_full() {
            return None;
        }
        let dx = self.buffer.newest()? - self.buffer.oldest()?;
        if dx > self.threshold {
            Some(Direction::Right)
        } else if dx < -self.threshold {
            Some(Direction::Left)
        } else {
            None
        }
    }

    pub fn is_cooling_down(&self, now: Instant) -> bool {
        self.cooldown_until.is_some_and(|deadline| now < deadline)
    }

    pub fn buffer(&self) -> &LandmarkBuffer {
        &self.buffer
    }
}

impl Default for SwipeDetector {
    fn default() -> Self {
        Self::new(8, 0.20, Duration::from_millis(500))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(33);

    fn at(t0: Instant, frame: u32) -> Instant {
        t0 + FRAME * frame
    }

    #[test]
    fn warming_up_returns_none() {
        let mut det = SwipeDetector::default();
        let t0 = Instant::now();
        for i in 0..7 {
            // Large jumps: would be a swipe if the buffer were full.
            let x = i as f64 * 0.2;
            assert_eq!(det.update(x, HandPose::OpenPalm, at(t0, i)), None);
        }
        assert_eq!(
            det.update(1.4, HandPose::OpenPalm, at(t0, 7)),
            Some(Direction::Right)
        );
    }

    #[test]
    fn detects_left_swipe() {
        let mut det = SwipeDetector::default();
        let t0 = Instant::now();
        let mut out = None;
        for i in 0..8 {
            out = det.update(0.8 - i as f64 * 0.05, HandPose::Neutral, at(t0, i));
        }
        assert_eq!(out, Some(Direction::Left));
    }

    #[test]
    fn small_motion_is_ignored() {
        let mut det = SwipeDetector::default();
        let t0 = Instant::now();
        for i in 0..30 {
            let x = 0.5 + (i % 8) as f64 * 0.02;
            assert_eq!(det.update(x, HandPose::OpenPalm, at(t0, i)), None);
        }
    }

    #[test]
    fn exactly_threshold_is_not_a_swipe() {
        let mut det = SwipeDetector::new(5, 0.25, Duration::from_millis(500));
        let t0 = Instant::now();
        for (i, x) in [0.0, 0.0, 0.0, 0.0, 0.25].into_iter().enumerate() {
            assert_eq!(det.update(x, HandPose::OpenPalm, at(t0, i as u32)), None);
        }
    }

    #[test]
    fn continuous_motion_fires_once_per_cooldown() {
        let mut det = SwipeDetector::default();
        let t0 = Instant::now();
        let step = 0.25 / 7.0;
        let mut fired = Vec::new();
        for i in 0..40 {
            if let Some(dir) = det.update(i as f64 * step, HandPose::OpenPalm, at(t0, i)) {
                fired.push((i, dir));
            }
        }
        // First window completes on frame 7 (t = 231 ms).  The cooldown holds
        // until 731 ms, so the next emission is on frame 23 (t = 759 ms).
        assert_eq!(fired[0], (7, Direction::Right));
        assert_eq!(fired[1], (23, Direction::Right));
        for pair in fired.windows(2) {
            let gap = FRAME * (pair[1].0 - pair[0].0);
            assert!(gap >= Duration::from_millis(500));
        }
    }

    #[test]
    fn emission_clears_buffer() {
        let mut det = SwipeDetector::default();
        let t0 = Instant::now();
        for i in 0..8 {
            det.update(i as f64 * 0.05, HandPose::OpenPalm, at(t0, i));
        }
        assert!(det.buffer().is_empty());
        assert!(det.is_cooling_down(at(t0, 8)));
        assert!(!det.is_cooling_down(at(t0, 7) + Duration::from_millis(500)));
    }

    #[test]
    fn fist_never_swipes() {
        let mut det = SwipeDetector::default();
        let t0 = Instant::now();
        for i in 0..50 {
            let x = (i % 16) as f64 * 0.06;
            assert_eq!(det.update(x, HandPose::Fist, at(t0, i)), None);
        }
        assert!(!det.is_cooling_down(at(t0, 50)));
    }

    #[test]
    fn suppressed_candidate_does_not_arm_cooldown() {
        let mut det = SwipeDetector::default();
        let t0 = Instant::now();
        for i in 0..8 {
            det.update(i as f64 * 0.05, HandPose::Fist, at(t0, i));
        }
        // Same buffer, hand opens: the swipe fires now.
        assert_eq!(det.detect(HandPose::OpenPalm, at(t0, 8)), Some(Direction::Right));
    }
}
