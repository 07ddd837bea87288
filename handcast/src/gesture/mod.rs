//! Gesture recognition core: landmarks in, debounced commands out.
//!
//! Provides:
//! - `landmarks`: 21-point hand model and validation
//! - `mapper`: normalized → mirrored screen coordinates, pointer state
//! - `history`: bounded pointer trajectory buffer
//! - `detectors`: shape, pinch, trajectory, swipe and wave detectors
//! - `cooldown`: per-channel debounce locks
//! - `config`: thresholds with s-expression overrides
//! - `recognizer`: per-session state machine driven once per frame

pub mod config;
pub mod cooldown;
pub mod detectors;
pub mod history;
pub mod landmarks;
pub mod mapper;
pub mod recognizer;

pub use config::GestureConfig;
pub use cooldown::{Channel, CooldownController};
pub use landmarks::{HandLandmark, HandLandmarks, Landmark, LANDMARK_COUNT};
pub use mapper::{PointerState, Viewport};
pub use recognizer::{Gesture, GestureProfile, GestureRecognizer};
