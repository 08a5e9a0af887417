use super::{Rect, Vec2};

/// Normalized texture rectangle `(u_min, v_min, u_max, v_max)`.
///
/// `u_max < u_min` (or `v_max < v_min`) is a valid value: the sprite is
/// sampled mirrored along that axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UvRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for UvRect {
    fn default() -> Self {
        Self::full()
    }
}

impl UvRect {
    #[inline]
    pub const fn new(u_min: f32, v_min: f32, u_max: f32, v_max: f32) -> Self {
        Self {
            min: Vec2::new(u_min, v_min),
            max: Vec2::new(u_max, v_max),
        }
    }

    /// The whole texture.
    #[inline]
    pub const fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Converts an atlas region measured in texels into normalized coordinates.
    ///
    /// A zero-sized texture yields the full rect.
    pub fn from_pixel_rect(region: Rect, texture_width: u32, texture_height: u32) -> Self {
        if texture_width == 0 || texture_height == 0 {
            return Self::full();
        }
        let size = Vec2::new(texture_width as f32, texture_height as f32);
        Self {
            min: region.min().div_elem(size),
            max: region.max().div_elem(size),
        }
    }

    #[inline]
    pub fn flipped_x(self) -> Self {
        Self::new(self.max.x, self.min.y, self.min.x, self.max.y)
    }

    #[inline]
    pub fn flipped_y(self) -> Self {
        Self::new(self.min.x, self.max.y, self.max.x, self.min.y)
    }

    #[inline]
    pub fn is_flipped_x(self) -> bool {
        self.max.x < self.min.x
    }

    #[inline]
    pub fn is_flipped_y(self) -> bool {
        self.max.y < self.min.y
    }

    /// UV at a quad corner in `{0, 1}²`; interior values interpolate.
    #[inline]
    pub fn at(self, corner: Vec2) -> Vec2 {
        self.min.lerp(self.max, corner)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_maps_corners_to_themselves() {
        let uv = UvRect::full();
        assert_eq!(uv.at(Vec2::new(0.0, 0.0)), Vec2::new(0.0, 0.0));
        assert_eq!(uv.at(Vec2::new(1.0, 1.0)), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn flipped_x_swaps_u_only() {
        let uv = UvRect::full().flipped_x();
        assert_eq!(uv.to_array(), [1.0, 0.0, 0.0, 1.0]);
        assert!(uv.is_flipped_x());
        assert!(!uv.is_flipped_y());
        assert_eq!(uv.at(Vec2::new(1.0, 1.0)), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn flipping_twice_is_identity() {
        let uv = UvRect::new(0.25, 0.5, 0.75, 1.0);
        assert_eq!(uv.flipped_y().flipped_y(), uv);
    }

    #[test]
    fn pixel_region_is_normalized() {
        let uv = UvRect::from_pixel_rect(Rect::new(16.0, 32.0, 16.0, 16.0), 64, 128);
        assert_eq!(uv, UvRect::new(0.25, 0.25, 0.5, 0.375));
    }

    #[test]
    fn zero_sized_texture_falls_back_to_full() {
        assert_eq!(UvRect::from_pixel_rect(Rect::new(0.0, 0.0, 4.0, 4.0), 0, 8), UvRect::full());
    }
}
