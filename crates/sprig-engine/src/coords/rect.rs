use super::Vec2;

/// Axis-aligned rectangle in pixels (top-left origin).
///
/// Used for sprite placement, atlas regions measured in texels, and camera
/// scissor viewports.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }

    /// Rect of `size` whose center sits at `center`.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    #[inline]
    pub fn translated(self, by: Vec2) -> Self {
        Self {
            origin: self.origin + by,
            size: self.size,
        }
    }

    /// Returns the same area with non-negative width and height.
    #[inline]
    pub fn normalized(self) -> Self {
        let min = Vec2::new(
            self.origin.x.min(self.origin.x + self.size.x),
            self.origin.y.min(self.origin.y + self.size.y),
        );
        let size = Vec2::new(self.size.x.abs(), self.size.y.abs());
        Self { origin: min, size }
    }

    /// Overlapping area of both rects, or `None` when they only touch or are disjoint.
    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let min = Vec2::new(a.min().x.max(b.min().x), a.min().y.max(b.min().y));
        let max = Vec2::new(a.max().x.min(b.max().x), a.max().y.min(b.max().y));

        let r = Rect::from_min_max(min, max);
        if r.is_empty() { None } else { Some(r) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn min_max_round_trip() {
        let rect = Rect::from_min_max(Vec2::new(2.0, 3.0), Vec2::new(10.0, 7.0));
        assert_eq!(rect, r(2.0, 3.0, 8.0, 4.0));
        assert_eq!(rect.max(), Vec2::new(10.0, 7.0));
    }

    #[test]
    fn from_center_size_places_center() {
        let rect = Rect::from_center_size(Vec2::new(50.0, 40.0), Vec2::new(20.0, 10.0));
        assert_eq!(rect.origin, Vec2::new(40.0, 35.0));
        assert_eq!(rect.center(), Vec2::new(50.0, 40.0));
    }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_keeps_positive_rect() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_flips_negative_extent() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlap() {
        let i = r(0.0, 0.0, 10.0, 10.0).intersect(r(5.0, 5.0, 10.0, 10.0));
        assert_eq!(i, Some(r(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn intersect_shared_edge_is_none() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersect(r(10.0, 0.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn empty_when_any_axis_is_zero() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
