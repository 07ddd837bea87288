//! Demo applications driven by recognized commands.
//!
//! Each demo owns its presentation state and implements
//! [`CommandDispatcher`]; the recognizer never touches it directly.

pub mod flow;
pub mod slides;
pub mod spell;

pub use flow::FlowEditor;
pub use slides::SlideDeck;
pub use spell::SpellCaster;

use crate::dispatch::CommandDispatcher;
use crate::gesture::mapper::Viewport;
use crate::gesture::recognizer::GestureProfile;

/// A demo application: a dispatcher with a matching recognition profile.
pub trait DemoApp: CommandDispatcher {
    /// Gesture profile the demo expects.
    fn profile(&self) -> GestureProfile;

    /// Screen size changed.
    fn set_viewport(&mut self, _viewport: Viewport) {}

    /// Generate s-expression for demo status at `now_ms`.
    fn status_sexp(&self, now_ms: f64) -> String;
}
