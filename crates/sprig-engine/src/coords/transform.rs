use super::{Rect, Vec2};

/// 2×3 affine transform (2×2 linear part plus translation).
///
/// Points are treated as row vectors:
///
/// ```text
/// x' = x * m11 + y * m21 + m31
/// y' = x * m12 + y * m22 + m32
/// ```
///
/// `a.then(&b)` applies `a` first and `b` second.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2D {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
    pub m31: f32,
    pub m32: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    #[inline]
    pub const fn new(m11: f32, m12: f32, m21: f32, m22: f32, m31: f32, m32: f32) -> Self {
        Self { m11, m12, m21, m22, m31, m32 }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn translation(x: f32, y: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    #[inline]
    pub const fn scale(x: f32, y: f32) -> Self {
        Self::new(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    /// Rotation by `radians`. With +Y down this turns clockwise on screen.
    #[inline]
    pub fn rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Maps the unit square onto `rect`.
    #[inline]
    pub fn rect_transform(rect: Rect) -> Self {
        Self::scale(rect.size.x, rect.size.y).then_translate(rect.origin)
    }

    /// Builds a transform from the two-row instance encoding.
    #[inline]
    pub const fn from_rows(row0: [f32; 3], row1: [f32; 3]) -> Self {
        Self::new(row0[0], row1[0], row0[1], row1[1], row0[2], row1[2])
    }

    /// Applies `self`, then `other`.
    #[inline]
    pub fn then(&self, other: &Transform2D) -> Self {
        Self::new(
            self.m11 * other.m11 + self.m12 * other.m21,
            self.m11 * other.m12 + self.m12 * other.m22,
            self.m21 * other.m11 + self.m22 * other.m21,
            self.m21 * other.m12 + self.m22 * other.m22,
            self.m31 * other.m11 + self.m32 * other.m21 + other.m31,
            self.m31 * other.m12 + self.m32 * other.m22 + other.m32,
        )
    }

    #[inline]
    pub fn then_translate(&self, v: Vec2) -> Self {
        self.then(&Self::translation(v.x, v.y))
    }

    #[inline]
    pub fn then_scale(&self, x: f32, y: f32) -> Self {
        self.then(&Self::scale(x, y))
    }

    #[inline]
    pub fn then_rotate(&self, radians: f32) -> Self {
        self.then(&Self::rotation(radians))
    }

    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x * self.m11 + p.y * self.m21 + self.m31,
            p.x * self.m12 + p.y * self.m22 + self.m32,
        )
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    /// Inverse transform, or `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self::new(
            self.m22 * inv,
            -self.m12 * inv,
            -self.m21 * inv,
            self.m11 * inv,
            (self.m21 * self.m32 - self.m22 * self.m31) * inv,
            (self.m12 * self.m31 - self.m11 * self.m32) * inv,
        ))
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.to_cols().iter().flatten().all(|v| v.is_finite())
    }

    /// Per-instance encoding: one row per output axis, `(linear x, linear y, translation)`.
    #[inline]
    pub const fn to_rows(&self) -> ([f32; 3], [f32; 3]) {
        (
            [self.m11, self.m21, self.m31],
            [self.m12, self.m22, self.m32],
        )
    }

    /// Uniform encoding: three columns of a WGSL `mat3x2<f32>`.
    #[inline]
    pub const fn to_cols(&self) -> [[f32; 2]; 3] {
        [[self.m11, self.m12], [self.m21, self.m22], [self.m31, self.m32]]
    }

    /// Column-major 3×3 homogeneous form with bottom row `(0, 0, 1)`.
    #[inline]
    pub const fn to_homogeneous(&self) -> [[f32; 3]; 3] {
        [
            [self.m11, self.m12, 0.0],
            [self.m21, self.m22, 0.0],
            [self.m31, self.m32, 1.0],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn identity_leaves_points() {
        let p = Vec2::new(3.5, -2.0);
        assert_eq!(Transform2D::identity().transform_point(p), p);
    }

    #[test]
    fn then_applies_left_first() {
        let t = Transform2D::scale(2.0, 3.0).then_translate(Vec2::new(10.0, 20.0));
        assert_eq!(t.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 23.0));

        let t = Transform2D::translation(10.0, 20.0).then_scale(2.0, 3.0);
        assert_eq!(t.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(22.0, 63.0));
    }

    #[test]
    fn quarter_turn_maps_x_to_y() {
        let t = Transform2D::rotation(core::f32::consts::FRAC_PI_2);
        assert!(approx(t.transform_point(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0)));
        assert!(approx(t.transform_point(Vec2::new(0.0, 1.0)), Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn rect_transform_maps_unit_corners() {
        let t = Transform2D::rect_transform(Rect::new(4.0, 6.0, 16.0, 8.0));
        assert_eq!(t.transform_point(Vec2::zero()), Vec2::new(4.0, 6.0));
        assert_eq!(t.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(20.0, 14.0));
    }

    #[test]
    fn rows_round_trip() {
        let t = Transform2D::rotation(0.3).then_scale(2.0, 5.0).then_translate(Vec2::new(7.0, -1.0));
        let (row0, row1) = t.to_rows();
        assert_eq!(Transform2D::from_rows(row0, row1), t);
        // Each row produces one output axis.
        let p = Vec2::new(1.5, 2.5);
        let q = t.transform_point(p);
        assert!((row0[0] * p.x + row0[1] * p.y + row0[2] - q.x).abs() < 1e-5);
        assert!((row1[0] * p.x + row1[1] * p.y + row1[2] - q.y).abs() < 1e-5);
    }

    #[test]
    fn determinant_of_scale() {
        assert_eq!(Transform2D::scale(2.0, -3.0).determinant(), -6.0);
    }

    #[test]
    fn inverse_undoes_transform() {
        let t = Transform2D::rotation(1.1).then_scale(3.0, 0.5).then_translate(Vec2::new(-4.0, 9.0));
        let inv = t.inverse().unwrap();
        let p = Vec2::new(12.0, -7.5);
        assert!(approx(inv.transform_point(t.transform_point(p)), p));
    }

    #[test]
    fn singular_has_no_inverse() {
        assert!(Transform2D::scale(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn non_finite_is_detected() {
        assert!(Transform2D::identity().is_finite());
        assert!(!Transform2D::scale(f32::NAN, 1.0).is_finite());
    }
}
