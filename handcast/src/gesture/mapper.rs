//! Normalized landmark → screen pixel mapping.

use super::landmarks::Landmark;

/// Screen dimensions in pixels, read fresh each frame so resizes apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A pointer position in screen pixels, stamped with its frame time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: f64,
}

impl PointerSample {
    /// Euclidean distance to another sample, in pixels.
    pub fn distance_to(&self, other: &PointerSample) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Map a landmark to screen space.
///
/// The camera feed is mirrored relative to the user, so x is flipped:
/// `x = (1 - lm.x) * width`, `y = lm.y * height`.
pub fn map_landmark(landmark: &Landmark, viewport: Viewport, timestamp_ms: f64) -> PointerSample {
    PointerSample {
        x: (1.0 - landmark.x) * viewport.width,
        y: landmark.y * viewport.height,
        timestamp_ms,
    }
}

/// Pointer feedback published to the presentation layer every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerState {
    /// No hand this frame.
    Inactive,
    /// Index fingertip position; `pointing` when the index finger is extended.
    Active { x: f32, y: f32, pointing: bool },
}

impl PointerState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Render as an s-expression plist.
    pub fn to_sexp(&self) -> String {
        match self {
            Self::Inactive => "(:active nil)".to_string(),
            Self::Active { x, y, pointing } => format!(
                "(:active t :x {:.1} :y {:.1} :pointing {})",
                x,
                y,
                if *pointing { "t" } else { "nil" },
            ),
        }
    }
}
