//! Gesture detectors.
//!
//! Shape detectors (open palm, V sign, pointing) look at a single frame.
//! Trajectory detectors (circle, thrust) read the bounded pointer history and
//! decline to match until it holds enough samples.  Pinch, swipe and wave
//! carry a small amount of cross-frame state, kept in their own structs.

use tracing::debug;

use super::config::GestureConfig;
use super::history::GestureHistory;
use super::landmarks::{HandLandmark, HandLandmarks};

// ── Shape detectors ────────────────────────────────────────

/// Open palm: all four fingers have their tips above their PIP joints.
pub fn is_open_palm(hand: &HandLandmarks) -> bool {
    HandLandmark::finger_tip_pip_pairs()
        .iter()
        .all(|(tip, pip)| hand.is_extended(*tip, *pip))
}

/// V sign: index and middle up and spread apart, ring curled.
pub fn is_v_sign(hand: &HandLandmarks, config: &GestureConfig) -> bool {
    let index_up = hand.is_extended(HandLandmark::IndexTip, HandLandmark::IndexPip);
    let middle_up = hand.is_extended(HandLandmark::MiddleTip, HandLandmark::MiddlePip);
    let ring_down = hand.get(HandLandmark::RingTip).y > hand.get(HandLandmark::RingPip).y;
    let spread = hand.distance(HandLandmark::IndexTip, HandLandmark::MiddleTip);
    index_up && middle_up && ring_down && spread > config.v_spread
}

/// Index finger extended (laser pointer feedback).
pub fn is_index_pointing(hand: &HandLandmarks) -> bool {
    hand.is_extended(HandLandmark::IndexTip, HandLandmark::IndexPip)
}

// ── Pinch latch ────────────────────────────────────────────

/// Result of feeding one frame to the pinch latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchTransition {
    /// Not pinching, still not pinching.
    Idle,
    /// Latch just engaged.
    Engaged,
    /// Still pinching.
    Held,
    /// Latch just released.
    Released,
}

/// Two-threshold pinch latch.
///
/// Engages below `pinch_engage`, releases above `pinch_release`; distances in
/// between keep the current state.
#[derive(Debug, Clone, Default)]
pub struct PinchLatch {
    pinching: bool,
}

impl PinchLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pinching(&self) -> bool {
        self.pinching
    }

    /// Feed a thumb–index distance.
    pub fn update(&mut self, distance: f32, config: &GestureConfig) -> PinchTransition {
        if self.pinching {
            if distance > config.pinch_release {
                self.pinching = false;
                PinchTransition::Released
            } else {
                PinchTransition::Held
            }
        } else if distance < config.pinch_engage {
            self.pinching = true;
            PinchTransition::Engaged
        } else {
            PinchTransition::Idle
        }
    }

    /// Feed a hand: measures thumb tip to index tip.
    pub fn update_hand(&mut self, hand: &HandLandmarks, config: &GestureConfig) -> PinchTransition {
        let d = hand.distance(HandLandmark::ThumbTip, HandLandmark::IndexTip);
        self.update(d, config)
    }

    /// Force release.  Returns true if the latch was engaged.
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.pinching, false)
    }
}

// ── Trajectory detectors ───────────────────────────────────

/// Circle: the history's bounding box is large enough and roughly square.
///
/// This is a bounding-box heuristic, not an angular-sweep test, so squarish
/// zig-zags are accepted too.
pub fn detect_circle(history: &GestureHistory, config: &GestureConfig) -> bool {
    if history.len() < config.circle_min_samples {
        return false;
    }

    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;
    for s in history.iter() {
        min_x = min_x.min(s.x);
        max_x = max_x.max(s.x);
        min_y = min_y.min(s.y);
        max_y = max_y.max(s.y);
    }

    let width = max_x - min_x;
    let height = max_y - min_y;
    if width <= 0.0 || height <= 0.0 {
        return false;
    }
    if width < config.circle_min_size_px || height < config.circle_min_size_px {
        return false;
    }

    let ratio = width / height;
    if ratio < config.circle_min_ratio || ratio > config.circle_max_ratio {
        return false;
    }

    debug!("Circle detected: {:.0}x{:.0}px ratio={:.2}", width, height, ratio);
    true
}

/// Thrust: the pointer traveled far between the lookback sample and now.
pub fn detect_thrust(history: &GestureHistory, config: &GestureConfig) -> bool {
    if history.len() < config.thrust_min_samples {
        return false;
    }
    let (Some(last), Some(prev)) = (
        history.last(),
        history.nth_from_end(config.thrust_lookback),
    ) else {
        return false;
    };

    let dist = last.distance_to(prev);
    if dist > config.thrust_distance_px {
        debug!("Thrust detected: {:.0}px", dist);
        true
    } else {
        false
    }
}

// ── Swipe ──────────────────────────────────────────────────

/// Direction of a horizontal swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Next,
    Prev,
    None,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
            Self::None => "none",
        }
    }
}

/// Classify one frame of hand-center motion in raw (camera) x.
///
/// The camera is mirrored: the user moving their hand right-to-left makes
/// camera x decrease, which means "next".
pub fn classify_swipe(previous_x: f32, current_x: f32, threshold: f32) -> SwipeDirection {
    let dx = current_x - previous_x;
    if dx < -threshold {
        SwipeDirection::Next
    } else if dx > threshold {
        SwipeDirection::Prev
    } else {
        SwipeDirection::None
    }
}

/// Remembers the previous frame's hand-center x for swipe classification.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    last_x: Option<f32>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current hand-center x.  The first frame after a reset never swipes.
    pub fn update(&mut self, x: f32, threshold: f32) -> SwipeDirection {
        let dir = match self.last_x {
            Some(prev) => classify_swipe(prev, x, threshold),
            None => SwipeDirection::None,
        };
        self.last_x = Some(x);
        dir
    }

    /// Forget the reference point.
    pub fn reset(&mut self) {
        self.last_x = None;
    }

    pub fn last_x(&self) -> Option<f32> {
        self.last_x
    }
}

// ── Wave ───────────────────────────────────────────────────

/// Decaying accumulator of horizontal pointer motion.
#[derive(Debug, Clone, Default)]
pub struct WaveMomentum {
    momentum: f32,
    last_x: Option<f32>,
}

impl WaveMomentum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current screen x.  Returns true while |momentum| exceeds the threshold.
    pub fn update(&mut self, x: f32, config: &GestureConfig) -> bool {
        let fired = match self.last_x {
            Some(prev) => {
                let dx = x - prev;
                self.momentum = self.momentum * config.wave_decay + dx;
                self.momentum.abs() > config.wave_threshold_px
            }
            None => false,
        };
        self.last_x = Some(x);
        fired
    }

    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ── Tests ──────────────────────────────────────────────────
