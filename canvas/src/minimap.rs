use glam::Vec2;

use crate::camera::{Camera, Rect, Viewport};
use crate::doc::CanvasDoc;
use crate::node::{NodeId, RunStatus};

/// World-space padding added around content bounds.
pub const BOUNDS_PADDING: f32 = 120.0;
/// Extents shown when the canvas has no nodes, so the minimap never
/// collapses to a point.
pub const EMPTY_BOUNDS: Rect = Rect::from_min_max(
    Vec2::new(-400.0, -300.0),
    Vec2::new(400.0, 300.0),
);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeThumb {
    pub id: NodeId,
    /// Minimap-local pixels.
    pub rect: Rect,
    /// Last-run status, for thumbnail coloring.
    pub status: RunStatus,
}

/// A scaled overview of the whole world: node thumbnails plus the
/// current viewport rectangle, with click-to-navigate back-mapping.
/// Rebuilt from scratch whenever the document or camera changes.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimapProjection {
    /// World-space bounds the minimap covers. Always contains both
    /// the content and the current viewport, so panning far away
    /// never clips the view indicator.
    pub bounds: Rect,
    /// World units -> minimap pixels.
    pub scale: f32,
    pub nodes: Vec<NodeThumb>,
    /// Viewport indicator in minimap-local pixels.
    pub view_rect: Rect,
}

impl MinimapProjection {
    pub fn build(
        doc: &CanvasDoc,
        camera: &Camera,
        viewport: Viewport,
        minimap_size: Vec2,
    ) -> Self {
        let view_world = viewport.world_rect(camera);
        let bounds = doc
            .content_bounds()
            .map(|content| content.expand(BOUNDS_PADDING))
            .unwrap_or(EMPTY_BOUNDS)
            .union(view_world);

        let scale = uniform_scale(minimap_size, bounds.size());
        let to_local = |rect: Rect| Rect {
            min: (rect.min - bounds.min) * scale,
            max: (rect.max - bounds.min) * scale,
        };

        let nodes = doc
            .nodes
            .iter()
            .map(|node| NodeThumb {
                id: node.id,
                rect: to_local(node.rect()),
                status: node.status(),
            })
            .collect();

        Self {
            bounds,
            scale,
            nodes,
            view_rect: to_local(view_world),
        }
    }

    /// Maps a minimap click back to the camera position it selects.
    /// The caller assigns the result to `camera.pos`; zoom is left
    /// untouched.
    pub fn navigate(&self, local_point: Vec2) -> Vec2 {
        local_point / self.scale + self.bounds.min
    }
}

fn uniform_scale(minimap_size: Vec2, world_size: Vec2) -> f32 {
    assert!(
        world_size.x > 0.0 && world_size.y > 0.0,
        "minimap bounds must have positive area"
    );
    if minimap_size.x <= 0.0 || minimap_size.y <= 0.0 {
        // Host has not laid the minimap out yet.
        return 1.0;
    }
    (minimap_size / world_size).min_element()
}
