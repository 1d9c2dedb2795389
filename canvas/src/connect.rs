use crate::edge::RelationshipKind;
use crate::node::NodeId;

/// Label a fresh connect session starts with.
pub const DEFAULT_CONNECT_LABEL: RelationshipKind = RelationshipKind::Supports;

/// Short-lived modal state: while `Active`, the next node click
/// creates a directed edge from `from`. At most one session exists
/// because the workspace holds exactly one of these.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectMode {
    #[default]
    Inactive,
    Active {
        from: NodeId,
        label: RelationshipKind,
    },
}

impl ConnectMode {
    pub fn start(&mut self, from: NodeId) {
        assert!(!from.is_nil());
        *self = ConnectMode::Active {
            from,
            label: DEFAULT_CONNECT_LABEL,
        };
    }

    pub fn cancel(&mut self) {
        *self = ConnectMode::Inactive;
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ConnectMode::Active { .. })
    }

    pub fn source(&self) -> Option<NodeId> {
        match self {
            ConnectMode::Active { from, .. } => Some(*from),
            ConnectMode::Inactive => None,
        }
    }

    pub fn label(&self) -> Option<RelationshipKind> {
        match self {
            ConnectMode::Active { label, .. } => Some(*label),
            ConnectMode::Inactive => None,
        }
    }

    /// Mutable while active (driven by the label selector UI);
    /// ignored otherwise.
    pub fn set_label(&mut self, new_label: RelationshipKind) {
        if let ConnectMode::Active { label, .. } = self {
            *label = new_label;
        }
    }
}
