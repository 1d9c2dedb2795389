use common::float_ext::FloatExt;
use glam::Vec2;
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 3.0;

/// Axis-aligned rectangle in whichever space the caller is working in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn union(&self, other: Rect) -> Rect {
        Rect {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn expand(&self, amount: f32) -> Rect {
        assert!(amount.is_finite(), "expand amount must be finite");
        Rect {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    /// Zero or negative area on either axis.
    pub fn is_degenerate(&self) -> bool {
        let size = self.size();
        size.x <= 0.0 || size.y <= 0.0
    }
}

/// Observed size of the hosting container, in screen pixels.
/// Zero before first layout; fit/center operations skip it then.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// The world-space rectangle currently visible through `camera`.
    pub fn world_rect(&self, camera: &Camera) -> Rect {
        Rect::from_min_size(camera.pos, self.size / camera.zoom)
    }
}

/// `pos` is the world point shown at the viewport's top-left corner.
/// Ephemeral view state; never serialized with the canvas document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.pos) * self.zoom
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.zoom + self.pos
    }

    pub fn world_rect_to_screen(&self, rect: Rect) -> Rect {
        Rect {
            min: self.world_to_screen(rect.min),
            max: self.world_to_screen(rect.max),
        }
    }

    /// Multiplies zoom by `factor` (clamped to `[MIN_ZOOM, MAX_ZOOM]`)
    /// while keeping the world point under `screen_point` fixed on
    /// screen.
    pub fn zoom_at(&mut self, screen_point: Vec2, factor: f32) {
        assert!(
            factor.is_finite() && factor > 0.0,
            "zoom factor must be finite and positive"
        );

        let clamped = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if clamped.approximately_eq(self.zoom) {
            return;
        }

        let anchor = self.screen_to_world(screen_point);
        self.zoom = clamped;
        self.pos = anchor - screen_point / self.zoom;
    }

    /// Repositions so `world_point` lands at the viewport center.
    /// No-op before first layout.
    pub fn center_on(&mut self, world_point: Vec2, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.pos = world_point - viewport.size * 0.5 / self.zoom;
    }

    /// Zooms and pans so `bounds` fills the viewport minus `padding`
    /// on each side. Degenerate bounds or an unmeasured viewport are
    /// skipped.
    pub fn fit_to_content(&mut self, bounds: Rect, viewport: Viewport, padding: f32) {
        assert!(
            padding.is_finite() && padding >= 0.0,
            "fit padding must be finite and non-negative"
        );
        if bounds.is_degenerate() || viewport.is_empty() {
            return;
        }

        let available = viewport.size - Vec2::splat(padding * 2.0);
        if available.x <= 0.0 || available.y <= 0.0 {
            return;
        }

        let fit = available / bounds.size();
        self.zoom = fit.min_element().clamp(MIN_ZOOM, MAX_ZOOM);
        self.center_on(bounds.center(), viewport);
    }

    pub fn reset(&mut self) {
        *self = Camera::default();
    }
}
