use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::camera::Rect;
use common::id_type;

id_type!(NodeId);

pub const QUERY_NODE_SIZE: Vec2 = Vec2::new(220.0, 140.0);
pub const NOTE_NODE_SIZE: Vec2 = Vec2::new(180.0, 120.0);

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Query,
    Note,
}

/// Last-run status of a query node. Note nodes report `Idle`.
/// The engine only consumes this for minimap coloring; the query
/// runner collaborator owns the transitions.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Debug,
    Default,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Kind-specific payload. Opaque to the interaction machinery beyond
/// `status()`; the inspector collaborator edits it wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeMeta {
    Query {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datasource: Option<String>,
        sql: String,
        status: RunStatus,
        /// Cached result rows from the last successful run. Transient:
        /// cleared when the node is duplicated.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cached_rows: Option<serde_json::Value>,
    },
    Note {
        text: String,
    },
}

impl NodeMeta {
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Query => NodeMeta::Query {
                datasource: None,
                sql: String::new(),
                status: RunStatus::Idle,
                cached_rows: None,
            },
            NodeKind::Note => NodeMeta::Note {
                text: String::new(),
            },
        }
    }

    pub fn status(&self) -> RunStatus {
        match self {
            NodeMeta::Query { status, .. } => *status,
            NodeMeta::Note { .. } => RunStatus::Idle,
        }
    }

    /// Drops fields that must not survive duplication.
    pub fn clear_transient(&mut self) {
        if let NodeMeta::Query {
            status,
            cached_rows,
            ..
        } = self
        {
            *status = RunStatus::Idle;
            *cached_rows = None;
        }
    }
}

/// A card on the canvas. `pos` is the top-left corner in world space
/// (unbounded plane); `size` is fixed at creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub title: String,
    pub pos: Vec2,
    pub size: Vec2,
    pub meta: NodeMeta,
}

impl Node {
    pub fn new(kind: NodeKind, pos: Vec2, title: impl Into<String>) -> Self {
        let size = match kind {
            NodeKind::Query => QUERY_NODE_SIZE,
            NodeKind::Note => NOTE_NODE_SIZE,
        };
        Self {
            id: NodeId::unique(),
            kind,
            title: title.into(),
            pos,
            size,
            meta: NodeMeta::for_kind(kind),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }

    pub fn status(&self) -> RunStatus {
        self.meta.status()
    }
}
