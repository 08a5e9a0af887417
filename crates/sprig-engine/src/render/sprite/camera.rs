use crate::coords::{Rect, Transform2D, Vec2, Viewport};

/// 2D camera producing the per-draw view transform.
///
/// World space and screen space are both in pixels with +Y down; the camera
/// centers `center` on its viewport (or the whole surface), then rotates and
/// zooms around that point.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// Screen region the camera draws into. Also applied as a scissor rect.
    /// `None` = whole surface.
    pub viewport: Option<Rect>,
    /// World point shown at the viewport center.
    pub center: Vec2,
    /// Zoom factor; 2.0 makes one world pixel cover two screen pixels.
    pub scale: f32,
    /// Rotation in radians applied around `center`.
    pub rotation: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            viewport: None,
            center: Vec2::zero(),
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Camera2D {
    /// Camera whose world space coincides with screen pixels of `surface`.
    pub fn screen(surface: Viewport) -> Self {
        Self {
            center: surface.center(),
            ..Self::default()
        }
    }

    /// World → screen transform for a surface of size `surface`.
    pub fn transform(&self, surface: Viewport) -> Transform2D {
        let anchor = self
            .viewport
            .map(|r| r.center())
            .unwrap_or_else(|| surface.center());
        Transform2D::translation(-self.center.x, -self.center.y)
            .then_rotate(self.rotation)
            .then_scale(self.scale, self.scale)
            .then_translate(anchor)
    }

    /// Maps a screen pixel back into world space.
    ///
    /// Returns `None` when `scale` is zero (or otherwise degenerate).
    pub fn screen_to_world(&self, surface: Viewport, point: Vec2) -> Option<Vec2> {
        self.transform(surface)
            .inverse()
            .map(|inv| inv.transform_point(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn default_camera_centers_world_origin() {
        let t = Camera2D::default().transform(SURFACE);
        assert_eq!(t.transform_point(Vec2::zero()), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn screen_camera_is_identity() {
        let t = Camera2D::screen(SURFACE).transform(SURFACE);
        assert_eq!(t.transform_point(Vec2::new(17.0, 33.0)), Vec2::new(17.0, 33.0));
    }

    #[test]
    fn scale_zooms_around_center() {
        let cam = Camera2D { center: Vec2::new(100.0, 100.0), scale: 2.0, ..Camera2D::default() };
        let t = cam.transform(SURFACE);
        assert_eq!(t.transform_point(Vec2::new(100.0, 100.0)), Vec2::new(400.0, 300.0));
        assert_eq!(t.transform_point(Vec2::new(110.0, 100.0)), Vec2::new(420.0, 300.0));
    }

    #[test]
    fn viewport_moves_anchor() {
        let cam = Camera2D { viewport: Some(Rect::new(0.0, 0.0, 200.0, 100.0)), ..Camera2D::default() };
        assert_eq!(cam.transform(SURFACE).transform_point(Vec2::zero()), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn screen_to_world_inverts_transform() {
        let cam = Camera2D { center: Vec2::new(50.0, -20.0), scale: 4.0, rotation: 0.3, viewport: None };
        let world = Vec2::new(61.0, -12.0);
        let screen = cam.transform(SURFACE).transform_point(world);
        let back = cam.screen_to_world(SURFACE, screen).unwrap();
        assert!((back.x - world.x).abs() < 1e-2 && (back.y - world.y).abs() < 1e-2);
    }

    #[test]
    fn zero_scale_has_no_world_point() {
        let cam = Camera2D { scale: 0.0, ..Camera2D::default() };
        assert!(cam.screen_to_world(SURFACE, Vec2::zero()).is_none());
    }
}
