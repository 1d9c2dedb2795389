pub mod camera;
pub mod connect;
pub mod doc;
pub mod edge;
pub mod minimap;
pub mod node;
pub mod routing;
pub mod timeline;
pub mod workspace;


pub mod prelude {
    pub use crate::camera::{Camera, Rect, Viewport, MAX_ZOOM, MIN_ZOOM};
    pub use crate::connect::{ConnectMode, DEFAULT_CONNECT_LABEL};
    pub use crate::doc::{CanvasDoc, CanvasId};
    pub use crate::edge::{Edge, EdgeId, RelationshipKind};
    pub use crate::minimap::MinimapProjection;
    pub use crate::node::{Node, NodeId, NodeKind, NodeMeta, RunStatus};
    pub use crate::routing::EdgePath;
    pub use crate::workspace::{
        PointerModifiers, PointerState, Workspace, WorkspaceEvent,
    };
}
