//! Slide presenter demo: swipes page through a deck, the index finger is a laser.

use tracing::info;

use super::DemoApp;
use crate::dispatch::{CommandDispatcher, CommandKind, GestureCommand, Position};
use crate::gesture::mapper::PointerState;
use crate::gesture::recognizer::GestureProfile;

/// Slide deck state.
#[derive(Debug, Clone)]
pub struct SlideDeck {
    len: usize,
    current: usize,
    /// Laser dot, shown only while the index finger points.
    laser: Option<Position>,
}

impl SlideDeck {
    /// A deck of `len` slides (at least one).
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            current: 0,
            laser: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.len
    }

    pub fn laser(&self) -> Option<Position> {
        self.laser
    }

    pub fn next(&mut self) {
        if self.current + 1 < self.len {
            self.current += 1;
        }
    }

    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1);
    }
}

impl CommandDispatcher for SlideDeck {
    fn on_gesture(&mut self, command: &GestureCommand) {
        match command.kind {
            CommandKind::SlideNext => self.next(),
            CommandKind::SlidePrev => self.prev(),
            _ => return,
        }
        info!("Slide {}/{}", self.current + 1, self.len);
    }

    fn on_pointer(&mut self, pointer: &PointerState) {
        self.laser = match *pointer {
            PointerState::Active {
                x,
                y,
                pointing: true,
            } => Some(Position { x, y }),
            _ => None,
        };
    }
}

impl DemoApp for SlideDeck {
    fn profile(&self) -> GestureProfile {
        GestureProfile::slides()
    }

    fn status_sexp(&self, _now_ms: f64) -> String {
        let laser = match self.laser {
            Some(p) => format!("(:x {:.1} :y {:.1})", p.x, p.y),
            None => "nil".to_string(),
        };
        format!(
            "(:demo :slides :slide {} :count {} :laser {})",
            self.current, self.len, laser
        )
    }
}
