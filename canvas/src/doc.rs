use anyhow::{anyhow, bail, Result};
use glam::Vec2;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::camera::Rect;
use crate::edge::{Edge, EdgeId, RelationshipKind};
use crate::node::{Node, NodeId, NodeKind};
use common::{id_type, is_debug, FileFormat};

id_type!(CanvasId);

/// World-space shift applied to a duplicated node.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(32.0, 32.0);
/// Half-extent of the random placement jitter for repeated adds.
pub const ADD_JITTER: f32 = 24.0;

/// The canonical node/edge collections of one canvas. Serializes as
/// plain data; camera state deliberately lives outside this type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CanvasDoc {
    pub id: CanvasId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<Edge>,
}

impl Default for CanvasDoc {
    fn default() -> Self {
        Self {
            id: CanvasId::unique(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl CanvasDoc {
    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        assert!(!id.is_nil());
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn node_by_id_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        assert!(!id.is_nil());
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub fn edge_by_id(&self, id: EdgeId) -> Option<&Edge> {
        assert!(!id.is_nil());
        self.edges.iter().find(|edge| edge.id == id)
    }

    pub fn edge_by_id_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        assert!(!id.is_nil());
        self.edges.iter_mut().find(|edge| edge.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    pub fn add_node(&mut self, kind: NodeKind, pos: Vec2, title: impl Into<String>) -> NodeId {
        let node = Node::new(kind, pos, title);
        let id = node.id;
        log::debug!("Adding {:?} node {} at {}", kind, id, pos);
        self.nodes.push(node);
        id
    }

    /// Partial update through a closure; `false` for a stale id.
    pub fn update_node(&mut self, id: NodeId, update: impl FnOnce(&mut Node)) -> bool {
        match self.node_by_id_mut(id) {
            Some(node) => {
                update(node);
                true
            }
            None => false,
        }
    }

    /// Copies a node with a fresh id, offset by `DUPLICATE_OFFSET`.
    /// Transient result fields do not survive the copy.
    pub fn duplicate_node(&mut self, id: NodeId) -> Option<NodeId> {
        let source = self.node_by_id(id)?;
        let mut copy = source.clone();
        copy.id = NodeId::unique();
        copy.pos += DUPLICATE_OFFSET;
        copy.meta.clear_transient();
        let copy_id = copy.id;
        log::debug!("Duplicated node {} into {}", id, copy_id);
        self.nodes.push(copy);
        Some(copy_id)
    }

    /// Removes the node and every edge touching it. `false` for a
    /// stale id.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        assert!(!id.is_nil());
        if !self.contains_node(id) {
            return false;
        }

        self.nodes.retain(|node| node.id != id);
        let edges_before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(id));
        log::debug!(
            "Removed node {} and {} incident edge(s)",
            id,
            edges_before - self.edges.len()
        );
        true
    }

    /// Moves the node to the end of the draw order so it renders and
    /// hit-tests on top.
    pub fn raise_node(&mut self, id: NodeId) {
        let Some(index) = self.nodes.iter().position(|node| node.id == id) else {
            return;
        };
        if index + 1 != self.nodes.len() {
            let node = self.nodes.remove(index);
            self.nodes.push(node);
        }
    }

    /// Rejects self-loops and unknown endpoints; both are caller
    /// races, not programmer errors.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        label: RelationshipKind,
    ) -> Option<EdgeId> {
        if from == to {
            log::warn!("Rejected self-loop edge on node {}", from);
            return None;
        }
        if !self.contains_node(from) || !self.contains_node(to) {
            log::warn!("Rejected edge {} -> {}: missing endpoint", from, to);
            return None;
        }

        let edge = Edge::new(from, to, label);
        let id = edge.id;
        log::debug!("Adding edge {} ({} -{}-> {})", id, from, label, to);
        self.edges.push(edge);
        Some(id)
    }

    pub fn update_edge(&mut self, id: EdgeId, update: impl FnOnce(&mut Edge)) -> bool {
        match self.edge_by_id_mut(id) {
            Some(edge) => {
                update(edge);
                true
            }
            None => false,
        }
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> bool {
        let before = self.edges.len();
        self.edges.retain(|edge| edge.id != id);
        before != self.edges.len()
    }

    pub fn edges_touching(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |edge| edge.touches(id))
    }

    /// Union of all node rectangles; `None` for an empty canvas.
    pub fn content_bounds(&self) -> Option<Rect> {
        let mut nodes = self.nodes.iter();
        let first = nodes.next()?.rect();
        Some(nodes.fold(first, |bounds, node| bounds.union(node.rect())))
    }

    pub fn validate(&self) -> Result<()> {
        if !is_debug() {
            return Ok(());
        }

        let mut seen = HashMap::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if node.id.is_nil() {
                return Err(anyhow!("node has a nil id"));
            }
            if !node.pos.is_finite() {
                return Err(anyhow!("node position must be finite"));
            }
            if node.size.x <= 0.0 || node.size.y <= 0.0 {
                return Err(anyhow!("node size must be positive"));
            }
            let prior = seen.insert(node.id, ());
            if prior.is_some() {
                return Err(anyhow!("duplicate node id detected: {}", node.id));
            }
        }

        for edge in &self.edges {
            if edge.id.is_nil() {
                return Err(anyhow!("edge has a nil id"));
            }
            if edge.from == edge.to {
                return Err(anyhow!("edge {} is a self-loop", edge.id));
            }
            if !seen.contains_key(&edge.from) || !seen.contains_key(&edge.to) {
                return Err(anyhow!("edge {} references a missing node", edge.id));
            }
        }

        Ok(())
    }

    pub fn serialize(&self, format: FileFormat) -> String {
        self.validate().unwrap();
        common::serialize(self, format)
    }

    pub fn deserialize(format: FileFormat, input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            bail!("canvas input is empty");
        }
        let doc: CanvasDoc = common::deserialize(input, format)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn serialize_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = FileFormat::from_file_name(path.to_string_lossy().as_ref())?;
        std::fs::write(path, self.serialize(format)).map_err(anyhow::Error::from)
    }

    pub fn deserialize_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_file_name(path.to_string_lossy().as_ref())?;
        let payload = std::fs::read_to_string(path)?;
        Self::deserialize(format, &payload)
    }
}

/// Random placement offset so repeated toolbar adds do not stack
/// cards exactly on top of each other.
pub fn jitter(pos: Vec2) -> Vec2 {
    use rand::Rng;
    let mut rng = rand::rng();
    pos + Vec2::new(
        rng.random_range(-ADD_JITTER..=ADD_JITTER),
        rng.random_range(-ADD_JITTER..=ADD_JITTER),
    )
}
