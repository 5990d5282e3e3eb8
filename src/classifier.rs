//! Per-frame hand pose classification.
//!
//! A finger counts as *extended* when its tip sits above its PIP joint,
//! i.e. the tip's `y` is numerically smaller (image coordinates grow
//! downward).  Only index, middle, ring and pinky vote; the thumb's geometry
//! does not fit the tip-above-knuckle rule.
//!
//! | Extended fingers   | Pose                  |
//! |--------------------|-----------------------|
//! | 0                  | [`HandPose::Fist`]    |
//! | ≥ quorum (def. 3)  | [`HandPose::OpenPalm`]|
//! | otherwise          | [`HandPose::Neutral`] |
//!
//! Classification is stateless: the same frame always yields the same pose.

use crate::landmarks::{
    HandLandmarks, LandmarkFrame, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP,
    PINKY_TIP, RING_PIP, RING_TIP,
};
use std::fmt;

/// Discrete hand pose for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandPose {
    Fist,
    OpenPalm,
    Neutral,
}

impl fmt::Display for HandPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandPose::Fist => write!(f, "fist"),
            HandPose::OpenPalm => write!(f, "open-palm"),
            HandPose::Neutral => write!(f, "neutral"),
        }
    }
}

/// Extension state of the four voting fingers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    /// Derive finger states from a detected hand.
    pub fn from_landmarks(hand: &HandLandmarks) -> Self {
        let extended = |tip: usize, pip: usize| hand.get(tip).y < hand.get(pip).y;
        Self {
            index: extended(INDEX_TIP, INDEX_PIP),
            middle: extended(MIDDLE_TIP, MIDDLE_PIP),
            ring: extended(RING_TIP, RING_PIP),
            pinky: extended(PINKY_TIP, PINKY_PIP),
        }
    }

    pub fn extended_count(&self) -> usize {
        [self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|e| **e)
            .count()
    }

    /// Index finger up, the other three folded.
    pub fn is_index_pointing(&self) -> bool {
        self.index && !self.middle && !self.ring && !self.pinky
    }
}

/// What the classifier saw in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub pose: HandPose,
    /// `None` when no hand was detected.
    pub fingers: Option<FingerStates>,
}

impl Classification {
    pub fn is_index_pointing(&self) -> bool {
        self.fingers.is_some_and(|f| f.is_index_pointing())
    }
}

/// Rule-based pose classifier.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    open_palm_quorum: usize,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(3)
    }
}

impl GestureClassifier {
    /// `open_palm_quorum` is the number of extended fingers (of four) needed
    /// for [`HandPose::OpenPalm`].
    pub fn new(open_palm_quorum: usize) -> Self {
        Self { open_palm_quorum }
    }

    /// Classify a frame.  An absent hand is [`HandPose::Neutral`].
    pub fn classify(&self, frame: &LandmarkFrame) -> Classification {
        match frame.hand() {
            Some(hand) => {
                let fingers = FingerStates::from_landmarks(hand);
                Classification {
                    pose: self.pose_for(&fingers),
                    fingers: Some(fingers),
                }
            }
            None => Classification {
                pose: HandPose::Neutral,
                fingers: None,
            },
        }
    }

    /// Apply the count thresholds to precomputed finger states.
    pub fn pose_for(&self, fingers: &FingerStates) -> HandPose {
        match fingers.extended_count() {
            0 => HandPose::Fist,
            n if n >= self.open_palm_quorum => HandPose::OpenPalm,
            _ => HandPose::Neutral,
        }
    }
}
