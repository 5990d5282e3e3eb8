//! The driver that ties the pipeline, a clock and a dispatcher together.
//!
//! [`GestureController`] pulls a timestamp from its [`Clock`], runs the
//! [`Pipeline`] for each incoming frame and hands the resulting actions to
//! the [`ActionDispatcher`].

use crate::action::Action;
use crate::arbiter::DragState;
use crate::landmarks::LandmarkFrame;
use crate::pipeline::Pipeline;
use crate::traits::{ActionDispatcher, Clock, SystemClock};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

/// How often [`GestureController::run`] re-checks the stop flag while no
/// frames arrive.
const STOP_POLL: Duration = Duration::from_millis(100);

/// Runs the gesture pipeline against a concrete backend.
///
/// Generic over the [`ActionDispatcher`], so it is independent of any
/// operating system or compositor.
///
/// # Typical usage
///
/// ```ignore
/// let mut controller = GestureController::new(Pipeline::default(), dispatcher);
/// controller.run(frame_rx, &stop);
/// ```
pub struct GestureController<D: ActionDispatcher, C: Clock = SystemClock> {
    pipeline: Pipeline,
    dispatcher: D,
    clock: C,
}

impl<D: ActionDispatcher> GestureController<D, SystemClock> {
    pub fn new(pipeline: Pipeline, dispatcher: D) -> Self {
        Self::with_clock(pipeline, dispatcher, SystemClock)
    }
}

impl<D: ActionDispatcher, C: Clock> GestureController<D, C> {
    pub fn with_clock(pipeline: Pipeline, dispatcher: D, clock: C) -> Self {
        Self {
            pipeline,
            dispatcher,
            clock,
        }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn drag_state(&self) -> DragState {
        self.pipeline.drag_state()
    }

    /// Process a single frame and dispatch its actions.
    ///
    /// Returns the actions that were produced.  A failed dispatch is logged
    /// and otherwise ignored: pipeline state follows the sensed gestures,
    /// not the outcome of the operating-system call.
    pub fn handle(&mut self, frame: &LandmarkFrame) -> Vec<Action> {
        let now = self.clock.now();
        let actions = self.pipeline.process(frame, now);
        self.dispatch_all(&actions);
        actions
    }

    /// Release anything still held.  Call once, after the last frame.
    pub fn shutdown(&mut self) -> Vec<Action> {
        let actions = self.pipeline.finish();
        self.dispatch_all(&actions);
        actions
    }

    /// Process frames until `stop` is set or every sender is dropped, then
    /// shut down.
    pub fn run(&mut self, frames: mpsc::Receiver<LandmarkFrame>, stop: &AtomicBool) {
        info!("gesture controller running");
        while !stop.load(Ordering::SeqCst) {
            match frames.recv_timeout(STOP_POLL) {
                Ok(frame) => {
                    self.handle(&frame);
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    info!("frame source closed");
                    break;
                }
            }
        }
        info!("shutting down");
        self.shutdown();
    }

    fn dispatch_all(&mut self, actions: &[Action]) {
        for action in actions {
            if action.is_button_edge() {
                info!("dispatch {:?}", action);
            } else {
                debug!("dispatch {:?}", action);
            }
            if let Err(e) = self.dispatcher.dispatch(action) {
                warn!("dispatch of {:?} failed: {}", action, e);
            }
        }
    }
}
