//! The per-frame gesture cycle.
//!
//! [`Pipeline::process`] takes one [`LandmarkFrame`] and a timestamp and
//! returns the actions for that frame.  It performs no I/O; the caller
//! supplies frames and consumes actions (see
//! [`GestureController`](crate::controller::GestureController)).
//!
//! Stages run in a fixed order: classify → detect swipe → smooth →
//! arbitrate.

use crate::action::Action;
use crate::arbiter::{DragState, FrameObservation, GestureArbiter};
use crate::classifier::{GestureClassifier, HandPose};
use crate::config::GestureConfig;
use crate::landmarks::{LandmarkFrame, Point};
use crate::smoother::Smoother;
use crate::swipe::SwipeDetector;
use log::debug;
use std::borrow::Cow;
use std::time::Instant;

/// Owns every piece of gesture state.
#[derive(Debug, Clone)]
pub struct Pipeline {
    classifier: GestureClassifier,
    swipe: SwipeDetector,
    smoother: Smoother,
    arbiter: GestureArbiter,
    mirror_x: bool,
}

impl Pipeline {
    /// Build a pipeline from (already validated) settings.
    pub fn new(config: &GestureConfig) -> Self {
        let arbiter = if config.click_enabled {
            GestureArbiter::new().with_click(config.click_cooldown())
        } else {
            GestureArbiter::new()
        };
        Self {
            classifier: GestureClassifier::new(config.open_palm_quorum),
            swipe: SwipeDetector::new(
                config.buffer_len,
                config.swipe_threshold,
                config.swipe_cooldown(),
            ),
            smoother: Smoother::new(config.smoothing_alpha),
            arbiter,
            mirror_x: config.mirror_x,
        }
    }

    /// Run one frame through the pipeline.
    pub fn process(&mut self, frame: &LandmarkFrame, now: Instant) -> Vec<Action> {
        let frame: Cow<'_, LandmarkFrame> = if self.mirror_x {
            Cow::Owned(frame.mirrored())
        } else {
            Cow::Borrowed(frame)
        };

        let classification = self.classifier.classify(&frame);
        let pose = classification.pose;

        let (swipe, cursor) = match frame.hand() {
            Some(hand) => {
                let reference = hand.reference();
                // Motion during a drag (or with a closed fist) never
                // accumulates towards a swipe, nor arms its cooldown.
                let swipe = if pose == HandPose::Fist || self.arbiter.is_dragging() {
                    self.swipe.reset();
                    None
                } else {
                    self.swipe.update(reference.x, pose, now)
                };
                (swipe, Some(self.smoother.update(reference)))
            }
            None => {
                debug!("no hand");
                self.swipe.reset();
                (None, None)
            }
        };

        self.arbiter.step(&FrameObservation {
            pose,
            pointing: classification.is_index_pointing(),
            swipe,
            cursor,
            now,
        })
    }

    /// Actions to emit before shutting down (releases a held button).
    pub fn finish(&mut self) -> Vec<Action> {
        self.arbiter.finish()
    }

    pub fn drag_state(&self) -> DragState {
        self.arbiter.state()
    }

    /// Last smoothed cursor point.
    pub fn cursor(&self) -> Option<Point> {
        self.smoother.current()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&GestureConfig::default())
    }
}
