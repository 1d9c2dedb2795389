use glam::Vec2;

use crate::camera::Rect;

/// Horizontal control-point reach, floor and |dx|/2 growth. Keeps the
/// curve smooth for overlapping and right-to-left layouts alike.
pub const MIN_CONTROL_OFFSET: f32 = 60.0;
/// Vertical lift so the label does not sit on the stroke.
pub const LABEL_LIFT: f32 = 12.0;
/// Polyline resolution used for hit-testing and rendering.
pub const SAMPLE_POINTS: usize = 33;

/// Cubic Bézier route between two node cards: source anchored at its
/// right-center, target at its left-center. The anchors are fixed by
/// convention; the path does not reroute based on relative position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePath {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
    pub label_anchor: Vec2,
}

pub fn route(from_rect: Rect, to_rect: Rect) -> EdgePath {
    let start = right_center(from_rect);
    let end = left_center(to_rect);
    let offset = control_offset(start, end);

    EdgePath {
        p0: start,
        p1: start + Vec2::new(offset, 0.0),
        p2: end - Vec2::new(offset, 0.0),
        p3: end,
        label_anchor: (start + end) * 0.5 - Vec2::new(0.0, LABEL_LIFT),
    }
}

pub fn right_center(rect: Rect) -> Vec2 {
    Vec2::new(rect.max.x, rect.center().y)
}

pub fn left_center(rect: Rect) -> Vec2 {
    Vec2::new(rect.min.x, rect.center().y)
}

fn control_offset(start: Vec2, end: Vec2) -> f32 {
    let dx = (end.x - start.x).abs();
    (dx * 0.5).max(MIN_CONTROL_OFFSET)
}

impl EdgePath {
    pub fn point_at(&self, t: f32) -> Vec2 {
        let one_minus = 1.0 - t;
        let a = one_minus * one_minus * one_minus;
        let b = 3.0 * one_minus * one_minus * t;
        let c = 3.0 * one_minus * t * t;
        let d = t * t * t;
        self.p0 * a + self.p1 * b + self.p2 * c + self.p3 * d
    }

    /// Fills `points` with evenly spaced curve samples.
    pub fn sample(&self, points: &mut [Vec2]) {
        assert!(points.len() >= 3, "bezier steps must be greater than 2");
        let steps = (points.len() - 1) as f32;
        for (index, point) in points.iter_mut().enumerate() {
            *point = self.point_at(index as f32 / steps);
        }
    }

    pub fn sampled(&self) -> Vec<Vec2> {
        let mut points = vec![Vec2::ZERO; SAMPLE_POINTS];
        self.sample(&mut points);
        points
    }
}

/// True when `pos` lies within `width` of the sampled polyline.
pub fn hit_test(samples: &[Vec2], pos: Vec2, width: f32) -> bool {
    assert!(width.is_finite() && width >= 0.0);
    if width <= 0.0 || samples.len() < 2 {
        return false;
    }
    let threshold_sq = width * width;
    samples
        .windows(2)
        .any(|segment| distance_sq_point_segment(pos, segment[0], segment[1]) <= threshold_sq)
}

fn distance_sq_point_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let ap = point - a;
    let ab_len_sq = ab.length_squared();
    if ab_len_sq <= f32::EPSILON {
        return ap.length_squared();
    }
    let t = (ap.dot(ab) / ab_len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (point - closest).length_squared()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_at(x: f32, y: f32) -> Rect {
        Rect::from_min_size(Vec2::new(x, y), Vec2::new(200.0, 100.0))
    }

    #[test]
    fn anchors_follow_fixed_convention() {
        let from = rect_at(0.0, 0.0);
        let to = rect_at(500.0, 300.0);
        let path = route(from, to);

        assert_eq!(path.p0, Vec2::new(200.0, 50.0));
        assert_eq!(path.p3, Vec2::new(500.0, 350.0));
        // Control points reach horizontally only.
        assert_eq!(path.p1.y, path.p0.y);
        assert_eq!(path.p2.y, path.p3.y);
    }

    #[test]
    fn control_offset_grows_with_distance() {
        let near = route(rect_at(0.0, 0.0), rect_at(220.0, 0.0));
        assert_eq!(near.p1.x - near.p0.x, MIN_CONTROL_OFFSET);

        let far = route(rect_at(0.0, 0.0), rect_at(1000.0, 0.0));
        // dx = 800, offset = 400.
        assert_eq!(far.p1.x - far.p0.x, 400.0);

        // Right-to-left still reaches outward from each anchor.
        let reversed = route(rect_at(600.0, 0.0), rect_at(0.0, 0.0));
        assert!(reversed.p1.x > reversed.p0.x);
        assert!(reversed.p2.x < reversed.p3.x);
    }

    #[test]
    fn label_sits_above_midpoint() {
        let path = route(rect_at(0.0, 0.0), rect_at(400.0, 200.0));
        let midpoint = (path.p0 + path.p3) * 0.5;
        assert_eq!(path.label_anchor, midpoint - Vec2::new(0.0, LABEL_LIFT));
    }

    #[test]
    fn samples_start_and_end_on_anchors() {
        let path = route(rect_at(0.0, 0.0), rect_at(400.0, 120.0));
        let samples = path.sampled();
        assert_eq!(samples.len(), SAMPLE_POINTS);
        assert!((samples[0] - path.p0).length() < 1e-4);
        assert!((samples[SAMPLE_POINTS - 1] - path.p3).length() < 1e-4);
    }

    #[test]
    fn hit_test_near_and_far() {
        let path = route(rect_at(0.0, 0.0), rect_at(400.0, 0.0));
        let samples = path.sampled();

        // The curve is horizontal here; points on it hit, points far
        // off it miss.
        assert!(hit_test(&samples, Vec2::new(300.0, 50.0), 6.0));
        assert!(!hit_test(&samples, Vec2::new(300.0, 500.0), 6.0));
        assert!(!hit_test(&samples, Vec2::new(300.0, 50.0), 0.0));
    }
}
