//! Command dispatch, the boundary between recognition and the application.
//!
//! The recognizer emits [`GestureCommand`]s; whatever owns the visual or
//! application state implements [`CommandDispatcher`] to act on them.

use crate::gesture::mapper::PointerState;

/// Application commands a recognized, debounced gesture can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    SpellIncendio,
    SpellStupefy,
    SpellProtego,
    SlideNext,
    SlidePrev,
    NodePinchStart,
    NodePinchMove,
    NodePinchEnd,
    VAction,
    WaveReset,
}

impl CommandKind {
    /// String representation for event output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpellIncendio => "spell-incendio",
            Self::SpellStupefy => "spell-stupefy",
            Self::SpellProtego => "spell-protego",
            Self::SlideNext => "slide-next",
            Self::SlidePrev => "slide-prev",
            Self::NodePinchStart => "node-pinch-start",
            Self::NodePinchMove => "node-pinch-move",
            Self::NodePinchEnd => "node-pinch-end",
            Self::VAction => "v-action",
            Self::WaveReset => "wave-reset",
        }
    }

    /// Whether the command carries the pointer position.
    pub fn carries_position(&self) -> bool {
        matches!(
            self,
            Self::SpellIncendio
                | Self::SpellStupefy
                | Self::SpellProtego
                | Self::NodePinchStart
                | Self::NodePinchMove
        )
    }
}

/// Screen-space pointer position attached to a command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// A command ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureCommand {
    pub kind: CommandKind,
    /// Pointer position when the command carries one.
    pub position: Option<Position>,
    /// Frame time the command was produced at.
    pub timestamp_ms: f64,
}

impl GestureCommand {
    /// Render as an s-expression event.
    pub fn to_sexp(&self) -> String {
        match self.position {
            Some(p) => format!(
                "(:type :event :command :{} :t {:.0} :x {:.1} :y {:.1})",
                self.kind.as_str(),
                self.timestamp_ms,
                p.x,
                p.y,
            ),
            None => format!(
                "(:type :event :command :{} :t {:.0})",
                self.kind.as_str(),
                self.timestamp_ms,
            ),
        }
    }
}

/// Receives commands and pointer feedback from the recognizer.
///
/// Calls are fire-and-forget and arrive synchronously inside the frame
/// callback, so implementations must not block.
pub trait CommandDispatcher {
    fn on_gesture(&mut self, command: &GestureCommand);

    /// Pointer feedback, delivered every frame.
    fn on_pointer(&mut self, _pointer: &PointerState) {}
}

/// Dispatcher that keeps everything it receives.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    pub commands: Vec<GestureCommand>,
    pub last_pointer: Option<PointerState>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds(&self) -> Vec<CommandKind> {
        self.commands.iter().map(|c| c.kind).collect()
    }

    pub fn count(&self, kind: CommandKind) -> usize {
        self.commands.iter().filter(|c| c.kind == kind).count()
    }
}

impl CommandDispatcher for RecordingDispatcher {
    fn on_gesture(&mut self, command: &GestureCommand) {
        self.commands.push(command.clone());
    }

    fn on_pointer(&mut self, pointer: &PointerState) {
        self.last_pointer = Some(*pointer);
    }
}
