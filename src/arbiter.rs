//! The gesture arbiter: one authoritative decision per frame.
//!
//! # States
//!
//! ```text
//!            Fist (MouseDown)
//!   Idle ─────────────────────────▶ Dragging ──┐ Fist (DragMove)
//!     ▲                               │  ▲      │ Neutral / no hand (hold)
//!     └───────────────────────────────┘  └──────┘
//!            OpenPalm (MouseUp)
//! ```
//!
//! * A drag is released **only** by an open palm.  A neutral pose or a
//!   missing hand while dragging holds the button, so brief occlusion does
//!   not drop whatever is being dragged.
//! * Swipes and clicks are only considered while `Idle`.
//! * A [`CursorMove`](Action::CursorMove) is emitted for every frame in which
//!   a hand was seen, before any other action of that frame, except while a
//!   fist keeps dragging: then the [`DragMove`](Action::DragMove) alone
//!   carries the position.  Frames without a hand emit no cursor move, so
//!   the pointer freezes in place.

use crate::action::{Action, Direction};
use crate::classifier::HandPose;
use crate::landmarks::Point;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Whether the synthetic mouse button is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Everything the arbiter needs to know about one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameObservation {
    pub pose: HandPose,
    /// Index finger up, others folded.
    pub pointing: bool,
    /// Output of the swipe detector.
    pub swipe: Option<Direction>,
    /// Smoothed cursor point; `None` when no hand was seen this frame.
    pub cursor: Option<Point>,
    pub now: Instant,
}

/// Click behaviour, see [`GestureArbiter::with_click`].
#[derive(Debug, Clone, Copy)]
struct ClickPolicy {
    cooldown: Duration,
    last: Option<Instant>,
}

/// Drag/swipe/click state machine.
#[derive(Debug, Clone, Default)]
pub struct GestureArbiter {
    state: DragState,
    last_cursor: Option<Point>,
    was_pointing: bool,
    click: Option<ClickPolicy>,
}

impl GestureArbiter {
    /// An arbiter with clicking disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable index-pointing clicks, at most one per `cooldown`.
    pub fn with_click(mut self, cooldown: Duration) -> Self {
        self.click = Some(ClickPolicy {
            cooldown,
            last: None,
        });
        self
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Decide what happens this frame.
    pub fn step(&mut self, obs: &FrameObservation) -> Vec<Action> {
        let mut actions = Vec::new();

        let drag_continues = self.is_dragging() && obs.pose == HandPose::Fist;
        if let Some(p) = obs.cursor {
            self.last_cursor = Some(p);
            if !drag_continues {
                actions.push(Action::CursorMove { x: p.x, y: p.y });
            }
        }
        let at = self.last_cursor.unwrap_or(Point::new(0.5, 0.5));

        match (self.state, obs.pose) {
            (DragState::Idle, HandPose::Fist) => {
                info!("drag start at ({:.3}, {:.3})", at.x, at.y);
                self.state = DragState::Dragging;
                actions.push(Action::MouseDown { x: at.x, y: at.y });
            }
            (DragState::Dragging, HandPose::Fist) => {
                actions.push(Action::DragMove { x: at.x, y: at.y });
            }
            (DragState::Dragging, HandPose::OpenPalm) => {
                info!("drag released");
                self.state = DragState::Idle;
                actions.push(Action::MouseUp);
            }
            (DragState::Dragging, HandPose::Neutral) => {
                debug!("neutral while dragging: holding");
            }
            (DragState::Idle, _) => {
                if let Some(dir) = obs.swipe {
                    actions.push(Action::SwitchDesktop(dir));
                } else if self.should_click(obs) {
                    info!("click at ({:.3}, {:.3})", at.x, at.y);
                    actions.push(Action::Click { x: at.x, y: at.y });
                }
            }
        }

        self.was_pointing = obs.pointing;
        actions
    }

    /// Rising edge of pointing, outside the click cooldown.  Records the
    /// click time when it returns `true`.
    fn should_click(&mut self, obs: &FrameObservation) -> bool {
        let Some(policy) = self.click.as_mut() else {
            return false;
        };
        if !obs.pointing || self.was_pointing {
            return false;
        }
        if policy
            .last
            .is_some_and(|last| obs.now < last + policy.cooldown)
        {
            debug!("click suppressed: cooldown");
            return false;
        }
        policy.last = Some(obs.now);
        true
    }

    /// Release a held button before the pipeline stops.
    pub fn finish(&mut self) -> Vec<Action> {
        if self.is_dragging() {
            info!("releasing drag on shutdown");
            self.state = DragState::Idle;
            vec![Action::MouseUp]
        } else {
            Vec::new()
        }
    }
}
