//! Flow editor demo: pinch-drag workflow nodes around a canvas.
//!
//! Nodes are 260×100px boxes.  A pinch grabs whichever node is under the
//! pointer (topmost wins) and keeps the grab offset while dragging; a V
//! sign logs a diagnostics command; a wave snaps every node back to its
//! initial position.

use tracing::{debug, info};

use super::DemoApp;
use crate::dispatch::{CommandDispatcher, CommandKind, GestureCommand, Position};
use crate::gesture::mapper::{PointerState, Viewport};
use crate::gesture::recognizer::GestureProfile;

pub const NODE_WIDTH: f32 = 260.0;
pub const NODE_HEIGHT: f32 = 100.0;
/// Margins keeping a node fully on screen.
const MARGIN_X: f32 = 280.0;
const MARGIN_Y: f32 = 200.0;
const LOG_CAPACITY: usize = 50;

/// Initial layout: (id, title, x, y).
const INITIAL_NODES: [(&str, &str, f32, f32); 6] = [
    ("prep-water", "Fill Kettle", 360.0, 220.0),
    ("grind-beans", "Grind Beans", 640.0, 220.0),
    ("bloom-stage", "Bloom 30s", 940.0, 160.0),
    ("pulse-pour", "Pulse Pour", 1180.0, 260.0),
    ("drawdown", "Drawdown", 1380.0, 360.0),
    ("serve-cup", "Serve Cup", 1580.0, 240.0),
];

/// One workflow node on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    pub id: &'static str,
    pub title: &'static str,
    pub x: f32,
    pub y: f32,
}

impl FlowNode {
    fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + NODE_WIDTH && y >= self.y && y <= self.y + NODE_HEIGHT
    }
}

/// Active drag: node index and pointer offset from the node origin.
#[derive(Debug, Clone, Copy)]
struct Drag {
    node: usize,
    offset_x: f32,
    offset_y: f32,
}

/// Flow editor state.
#[derive(Debug, Clone)]
pub struct FlowEditor {
    nodes: Vec<FlowNode>,
    viewport: Viewport,
    drag: Option<Drag>,
    selected: Option<usize>,
    pointer: Option<Position>,
    log: Vec<(String, String)>,
}

impl FlowEditor {
    pub fn new(viewport: Viewport) -> Self {
        let nodes = INITIAL_NODES
            .iter()
            .map(|&(id, title, x, y)| FlowNode { id, title, x, y })
            .collect();
        let mut editor = Self {
            nodes,
            viewport,
            drag: None,
            selected: None,
            pointer: None,
            log: Vec::new(),
        };
        editor.reset_layout();
        editor.push_log("SYSTEM_INIT", "NEURAL LINK ESTABLISHED");
        editor
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn selected(&self) -> Option<&FlowNode> {
        self.selected.map(|i| &self.nodes[i])
    }

    pub fn dragging(&self) -> Option<&FlowNode> {
        self.drag.map(|d| &self.nodes[d.node])
    }

    /// Activity log, newest last.
    pub fn log(&self) -> &[(String, String)] {
        &self.log
    }

    /// Move a node, clamped to the visible canvas.
    fn position_node(&mut self, index: usize, x: f32, y: f32) {
        let max_x = (self.viewport.width - MARGIN_X).max(0.0);
        let max_y = (self.viewport.height - MARGIN_Y).max(0.0);
        let node = &mut self.nodes[index];
        node.x = x.clamp(0.0, max_x);
        node.y = y.clamp(0.0, max_y);
    }

    /// Snap every node back to its initial position.
    pub fn reset_layout(&mut self) {
        for (i, (_, _, x, y)) in INITIAL_NODES.iter().enumerate() {
            self.position_node(i, *x, *y);
        }
    }

    /// Topmost node under a point.
    fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self.nodes.iter().rposition(|n| n.contains(x, y))
    }

    fn push_log(&mut self, kind: &str, message: &str) {
        if self.log.len() == LOG_CAPACITY {
            self.log.remove(0);
        }
        self.log.push((kind.to_string(), message.to_string()));
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index);
        let message = format!("TARGET: {}", self.nodes[index].title);
        self.push_log("NODE_SELECT", &message);
    }

    /// Pinch held at (x, y): grab a node if none is held, otherwise drag it.
    fn pinch_at(&mut self, x: f32, y: f32) {
        match self.drag {
            Some(drag) => {
                self.position_node(drag.node, x - drag.offset_x, y - drag.offset_y);
            }
            None => {
                if let Some(index) = self.hit_test(x, y) {
                    let node = &self.nodes[index];
                    self.drag = Some(Drag {
                        node: index,
                        offset_x: x - node.x,
                        offset_y: y - node.y,
                    });
                    debug!("Grabbed node {}", node.id);
                    self.select(index);
                }
            }
        }
    }
}

impl CommandDispatcher for FlowEditor {
    fn on_gesture(&mut self, command: &GestureCommand) {
        match command.kind {
            CommandKind::NodePinchStart | CommandKind::NodePinchMove => {
                if let Some(p) = command.position {
                    self.pinch_at(p.x, p.y);
                }
            }
            CommandKind::NodePinchEnd => {
                self.drag = None;
            }
            CommandKind::VAction => {
                info!("V gesture: system diagnostics");
                self.push_log("SYS_CMD", "V_GESTURE_DETECTED >> JOHNNY_MODE");
            }
            CommandKind::WaveReset => {
                info!("Wave: resetting workflow layout");
                self.push_log("SYS_CMD", "WAVE_DETECTED >> RESET_FLOW");
                self.reset_layout();
            }
            other => debug!("Flow demo ignoring {}", other.as_str()),
        }
    }

    fn on_pointer(&mut self, pointer: &PointerState) {
        self.pointer = match *pointer {
            PointerState::Active { x, y, .. } => Some(Position { x, y }),
            PointerState::Inactive => None,
        };
    }
}

impl DemoApp for FlowEditor {
    fn profile(&self) -> GestureProfile {
        GestureProfile::flow()
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn status_sexp(&self, _now_ms: f64) -> String {
        let nodes: Vec<String> = self
            .nodes
            .iter()
            .map(|n| format!("(:id \"{}\" :x {:.1} :y {:.1})", n.id, n.x, n.y))
            .collect();
        let pointer = match self.pointer {
            Some(p) => format!("(:x {:.1} :y {:.1})", p.x, p.y),
            None => "nil".to_string(),
        };
        let id_or_nil = |n: Option<&FlowNode>| {
            n.map(|n| format!("\"{}\"", n.id))
                .unwrap_or_else(|| "nil".to_string())
        };
        format!(
            "(:demo :flow :pointer {} :selected {} :dragging {} :log-entries {} :nodes ({}))",
            pointer,
            id_or_nil(self.selected()),
            id_or_nil(self.dragging()),
            self.log.len(),
            nodes.join(" "),
        )
    }
}
