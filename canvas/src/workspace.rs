use glam::Vec2;

use crate::camera::{Camera, Viewport};
use crate::connect::ConnectMode;
use crate::doc::{self, CanvasDoc};
use crate::edge::{EdgeId, RelationshipKind};
use crate::node::{NodeId, NodeKind};

/// Screen padding around content for `fit_all`.
pub const FIT_PADDING: f32 = 48.0;
/// Per-wheel-notch zoom ratio.
pub const WHEEL_ZOOM_STEP: f32 = 1.1;

/// Modifier context the host captures with each pointer-down.
/// `over_editable` suppresses the pan shortcut while a text input or
/// rich editor under the pointer has focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerModifiers {
    pub pan_key: bool,
    pub over_editable: bool,
}

/// The gesture currently in progress. A tagged union rather than a
/// pair of `active` booleans so panning and dragging are mutually
/// exclusive by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
    #[default]
    Idle,
    Panning {
        anchor_screen: Vec2,
        anchor_camera: Vec2,
    },
    DraggingNode {
        node_id: NodeId,
        anchor_screen: Vec2,
        anchor_node: Vec2,
    },
}

/// Outbound notifications, drained by the host once per event turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkspaceEvent {
    SelectionChanged(Option<NodeId>),
    NodeAdded(NodeId),
    NodeDuplicated { source: NodeId, copy: NodeId },
    NodeRemoved(NodeId),
    EdgeAdded(EdgeId),
    EdgeRemoved(EdgeId),
    EdgeClicked(EdgeId),
}

/// One canvas surface: document, camera, selection, connect-mode and
/// the pointer interaction state machine. All mutation is synchronous
/// and single-threaded; handlers never span event-loop turns.
#[derive(Debug, Default)]
pub struct Workspace {
    pub doc: CanvasDoc,
    pub camera: Camera,
    pub viewport: Viewport,
    pointer: PointerState,
    connect: ConnectMode,
    selected: Option<NodeId>,
    events: Vec<WorkspaceEvent>,
}

impl Workspace {
    pub fn new(doc: CanvasDoc) -> Self {
        Self {
            doc,
            ..Default::default()
        }
    }

    pub fn pointer_state(&self) -> PointerState {
        self.pointer
    }

    pub fn connect_mode(&self) -> ConnectMode {
        self.connect
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn drain_events(&mut self) -> Vec<WorkspaceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Re-queried by the host on every resize notification.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Topmost node whose projected rectangle contains `screen_pos`.
    /// Nodes later in the document draw (and therefore hit) on top.
    pub fn node_at_screen(&self, screen_pos: Vec2) -> Option<NodeId> {
        self.doc
            .nodes
            .iter()
            .rev()
            .find(|node| {
                self.camera
                    .world_rect_to_screen(node.rect())
                    .contains(screen_pos)
            })
            .map(|node| node.id)
    }

    // --- pointer interaction state machine -------------------------

    /// Transition table, first match wins:
    /// 1. pan key held (and not over an editable target) -> Panning
    /// 2. hit on a node -> connect completion / select + DraggingNode
    /// 3. background -> clear selection, stay Idle
    pub fn pointer_down(&mut self, screen_pos: Vec2, modifiers: PointerModifiers) {
        if self.pointer != PointerState::Idle {
            // A down without a matching up; recover before handling.
            self.pointer = PointerState::Idle;
        }

        if modifiers.pan_key && !modifiers.over_editable {
            self.pointer = PointerState::Panning {
                anchor_screen: screen_pos,
                anchor_camera: self.camera.pos,
            };
            return;
        }

        if let Some(node_id) = self.node_at_screen(screen_pos) {
            if self.connect.is_active() {
                self.complete_connect(node_id);
            }
            self.select(Some(node_id));
            self.doc.raise_node(node_id);
            let anchor_node = self
                .doc
                .node_by_id(node_id)
                .map(|node| node.pos)
                .unwrap_or(Vec2::ZERO);
            self.pointer = PointerState::DraggingNode {
                node_id,
                anchor_screen: screen_pos,
                anchor_node,
            };
            return;
        }

        if !self.connect.is_active() {
            self.select(None);
        }
    }

    pub fn pointer_move(&mut self, screen_pos: Vec2) {
        match self.pointer {
            PointerState::Idle => {}
            PointerState::Panning {
                anchor_screen,
                anchor_camera,
            } => {
                self.camera.pos = anchor_camera - (screen_pos - anchor_screen) / self.camera.zoom;
            }
            PointerState::DraggingNode {
                node_id,
                anchor_screen,
                anchor_node,
            } => {
                let delta = (screen_pos - anchor_screen) / self.camera.zoom;
                // Infinite canvas: no coordinate clamp.
                let moved = self.doc.update_node(node_id, |node| {
                    node.pos = anchor_node + delta;
                });
                if !moved {
                    // Node deleted from another panel mid-drag.
                    self.pointer = PointerState::Idle;
                }
            }
        }
    }

    /// Always lands in `Idle`, even if no matching down was seen —
    /// the pointer can leave the window mid-gesture.
    pub fn pointer_up(&mut self) {
        self.pointer = PointerState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.pointer = PointerState::Idle;
    }

    /// Releasing the pan key ends an in-flight pan immediately.
    pub fn pan_key_released(&mut self) {
        if matches!(self.pointer, PointerState::Panning { .. }) {
            self.pointer = PointerState::Idle;
        }
    }

    /// Wheel zoom, anchored to the cursor. Handled in every state and
    /// never transitions the machine.
    pub fn wheel(&mut self, screen_pos: Vec2, delta: f32) {
        let factor = if delta > 0.0 {
            1.0 / WHEEL_ZOOM_STEP
        } else {
            WHEEL_ZOOM_STEP
        };
        self.camera.zoom_at(screen_pos, factor);
    }

    // --- selection -------------------------------------------------

    pub fn select(&mut self, node_id: Option<NodeId>) {
        let node_id = node_id.filter(|id| self.doc.contains_node(*id));
        if self.selected != node_id {
            self.selected = node_id;
            self.events.push(WorkspaceEvent::SelectionChanged(node_id));
        }
    }

    // --- connect-mode ----------------------------------------------

    pub fn start_connect(&mut self, from: NodeId) {
        if !self.doc.contains_node(from) {
            log::warn!("Ignored connect start from missing node {}", from);
            return;
        }
        self.connect.start(from);
    }

    pub fn set_connect_label(&mut self, label: RelationshipKind) {
        self.connect.set_label(label);
    }

    pub fn cancel_connect(&mut self) {
        self.connect.cancel();
    }

    /// Clicking the source again cancels; a vanished source cancels
    /// silently; anything else creates the edge.
    fn complete_connect(&mut self, target: NodeId) {
        let (Some(from), Some(label)) = (self.connect.source(), self.connect.label()) else {
            return;
        };
        self.connect.cancel();

        if from == target || !self.doc.contains_node(from) {
            return;
        }
        if let Some(edge_id) = self.doc.add_edge(from, target, label) {
            self.events.push(WorkspaceEvent::EdgeAdded(edge_id));
        }
    }

    // --- toolbar / inspector APIs ----------------------------------

    /// Adds a node near the viewport center, with placement jitter so
    /// repeated adds fan out. The new node becomes the selection.
    pub fn add_node(&mut self, kind: NodeKind, title: impl Into<String>) -> NodeId {
        let center = self.camera.screen_to_world(self.viewport.size * 0.5);
        self.add_node_at(kind, doc::jitter(center), title)
    }

    pub fn add_node_at(&mut self, kind: NodeKind, pos: Vec2, title: impl Into<String>) -> NodeId {
        let id = self.doc.add_node(kind, pos, title);
        self.events.push(WorkspaceEvent::NodeAdded(id));
        self.select(Some(id));
        id
    }

    pub fn duplicate_selected(&mut self) -> Option<NodeId> {
        let source = self.selected?;
        let copy = self.doc.duplicate_node(source)?;
        self.events
            .push(WorkspaceEvent::NodeDuplicated { source, copy });
        self.select(Some(copy));
        Some(copy)
    }

    /// Deletes a node, its edges, and every piece of transient state
    /// referencing it: selection, an in-flight drag, and an active
    /// connect session.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        if !self.doc.delete_node(id) {
            return false;
        }
        if self.selected == Some(id) {
            self.selected = None;
            self.events.push(WorkspaceEvent::SelectionChanged(None));
        }
        if self.connect.source() == Some(id) {
            self.connect.cancel();
        }
        if let PointerState::DraggingNode { node_id, .. } = self.pointer {
            if node_id == id {
                self.pointer = PointerState::Idle;
            }
        }
        self.events.push(WorkspaceEvent::NodeRemoved(id));
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => self.delete_node(id),
            None => false,
        }
    }

    /// Inspector edits (title, metadata). `false` for a stale id.
    pub fn update_node(&mut self, id: NodeId, update: impl FnOnce(&mut crate::node::Node)) -> bool {
        self.doc.update_node(id, update)
    }

    pub fn update_edge(&mut self, id: EdgeId, update: impl FnOnce(&mut crate::edge::Edge)) -> bool {
        self.doc.update_edge(id, update)
    }

    /// Forwarded by the rendering collaborator; re-emitted for the
    /// edge-editing modal.
    pub fn edge_clicked(&mut self, id: EdgeId) {
        if self.doc.edge_by_id(id).is_some() {
            self.events.push(WorkspaceEvent::EdgeClicked(id));
        }
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> bool {
        if self.doc.delete_edge(id) {
            self.events.push(WorkspaceEvent::EdgeRemoved(id));
            true
        } else {
            false
        }
    }

    // --- camera commands -------------------------------------------

    pub fn center_on_node(&mut self, id: NodeId) {
        let Some(node) = self.doc.node_by_id(id) else {
            return;
        };
        let center = node.rect().center();
        self.camera.center_on(center, self.viewport);
    }

    pub fn fit_all(&mut self) {
        match self.doc.content_bounds() {
            Some(bounds) => self.camera.fit_to_content(bounds, self.viewport, FIT_PADDING),
            None => self.camera.reset(),
        }
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
    }
}
