//! Hand landmark data structures.
//!
//! Models the 21 keypoints a single-hand tracker reports per frame, in
//! normalized image space (x, y in [0, 1], y grows downward, mirrored
//! camera convention).  Compiled unconditionally (no tracker dependency).

use tracing::debug;

// ── Landmark definitions ───────────────────────────────────

/// The 21 hand keypoints, in tracker index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

impl HandLandmark {
    /// Convert landmark enum to array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// String representation for status output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbCmc => "thumb-cmc",
            Self::ThumbMcp => "thumb-mcp",
            Self::ThumbIp => "thumb-ip",
            Self::ThumbTip => "thumb-tip",
            Self::IndexMcp => "index-mcp",
            Self::IndexPip => "index-pip",
            Self::IndexDip => "index-dip",
            Self::IndexTip => "index-tip",
            Self::MiddleMcp => "middle-mcp",
            Self::MiddlePip => "middle-pip",
            Self::MiddleDip => "middle-dip",
            Self::MiddleTip => "middle-tip",
            Self::RingMcp => "ring-mcp",
            Self::RingPip => "ring-pip",
            Self::RingDip => "ring-dip",
            Self::RingTip => "ring-tip",
            Self::PinkyMcp => "pinky-mcp",
            Self::PinkyPip => "pinky-pip",
            Self::PinkyDip => "pinky-dip",
            Self::PinkyTip => "pinky-tip",
        }
    }

    /// (tip, PIP) pairs for the four non-thumb fingers.
    pub fn finger_tip_pip_pairs() -> [(HandLandmark, HandLandmark); 4] {
        [
            (Self::IndexTip, Self::IndexPip),
            (Self::MiddleTip, Self::MiddlePip),
            (Self::RingTip, Self::RingPip),
            (Self::PinkyTip, Self::PinkyPip),
        ]
    }
}

// ── Landmark point ─────────────────────────────────────────

/// A single tracked keypoint in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Planar distance between two landmarks in normalized units.
///
/// Depth is ignored: the tracker's z is relative and much noisier than x/y.
pub fn planar_distance(a: &Landmark, b: &Landmark) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

// ── Validated hand ─────────────────────────────────────────

/// One hand's complete, validated landmark set.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Validate a raw landmark slice from the tracker.
    ///
    /// Returns `None` for anything other than exactly 21 finite points, so a
    /// malformed set is handled the same way as "no hand detected".
    pub fn from_points(points: &[Landmark]) -> Option<Self> {
        if points.len() != LANDMARK_COUNT {
            debug!(
                "Hand landmarks: expected {} points, got {}",
                LANDMARK_COUNT,
                points.len(),
            );
            return None;
        }
        if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
            debug!("Hand landmarks: non-finite coordinate at index {}", bad);
            return None;
        }
        let mut out = [Landmark::default(); LANDMARK_COUNT];
        out.copy_from_slice(points);
        Some(Self { points: out })
    }

    /// Get a single landmark.
    pub fn get(&self, landmark: HandLandmark) -> &Landmark {
        &self.points[landmark.index()]
    }

    /// Planar distance between two landmarks of this hand.
    pub fn distance(&self, a: HandLandmark, b: HandLandmark) -> f32 {
        planar_distance(self.get(a), self.get(b))
    }

    /// Whether a fingertip sits above its PIP joint (finger extended).
    pub fn is_extended(&self, tip: HandLandmark, pip: HandLandmark) -> bool {
        self.get(tip).y < self.get(pip).y
    }

    /// All points in tracker index order.
    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}

// ── Test helpers ───────────────────────────────────────────

/// Build a hand with every finger extended (tips above PIPs), palm centered.
#[cfg(test)]
pub(crate) fn make_hand() -> HandLandmarks {
    let mut points = [Landmark::new(0.5, 0.6, 0.0); LANDMARK_COUNT];
    points[HandLandmark::Wrist.index()] = Landmark::new(0.5, 0.8, 0.0);
    points[HandLandmark::ThumbTip.index()] = Landmark::new(0.35, 0.55, 0.0);
    points[HandLandmark::MiddleMcp.index()] = Landmark::new(0.5, 0.6, 0.0);
    for (i, (tip, pip)) in HandLandmark::finger_tip_pip_pairs().iter().enumerate() {
        let x = 0.4 + 0.07 * i as f32;
        points[pip.index()] = Landmark::new(x, 0.5, 0.0);
        points[tip.index()] = Landmark::new(x, 0.35, 0.0);
    }
    HandLandmarks::from_points(&points).unwrap()
}

/// Overwrite one landmark of a test hand.
#[cfg(test)]
pub(crate) fn set_landmark(hand: &mut HandLandmarks, landmark: HandLandmark, x: f32, y: f32) {
    hand.points[landmark.index()] = Landmark::new(x, y, 0.0);
}

// ── Tests ──────────────────────────────────────────────────
