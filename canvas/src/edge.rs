use serde::{Deserialize, Serialize};

use crate::node::NodeId;
use common::id_type;

id_type!(EdgeId);

/// Closed set of relationship labels an edge can carry.
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
    strum_macros::EnumIter,
    strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RelationshipKind {
    Motivates,
    Explains,
    Contradicts,
    #[default]
    Supports,
    DerivesFrom,
    Questions,
}

/// Directed labeled edge between two nodes. Endpoints are guaranteed
/// to exist by `CanvasDoc` (cascade delete on node removal).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub label: RelationshipKind,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, label: RelationshipKind) -> Self {
        Self {
            id: EdgeId::unique(),
            from,
            to,
            label,
        }
    }

    pub fn touches(&self, node_id: NodeId) -> bool {
        self.from == node_id || self.to == node_id
    }
}
