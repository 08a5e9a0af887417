use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Transform2D, UvRect};
use crate::paint::Color;

/// Per-sprite instance record, uploaded at vertex-instance rate.
///
/// Buffer layout is four attributes: two 3-float transform rows, the
/// 4-float UV rect and the 4-float tint.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub transform_row0: [f32; 3],
    pub transform_row1: [f32; 3],
    pub uv_rect: [f32; 4],
    pub color: [f32; 4],
}

impl SpriteInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3, // transform_row0
        1 => Float32x3, // transform_row1
        2 => Float32x4, // uv_rect
        3 => Float32x4  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Sprite whose unit quad is mapped through `transform`.
    #[inline]
    pub fn new(transform: Transform2D, uv: UvRect, color: Color) -> Self {
        let (transform_row0, transform_row1) = transform.to_rows();
        Self {
            transform_row0,
            transform_row1,
            uv_rect: uv.to_array(),
            color: color.to_array(),
        }
    }

    /// Axis-aligned sprite covering `rect`.
    #[inline]
    pub fn from_rect(rect: Rect, uv: UvRect, color: Color) -> Self {
        Self::new(Transform2D::rect_transform(rect), uv, color)
    }

    #[inline]
    pub fn transform(&self) -> Transform2D {
        Transform2D::from_rows(self.transform_row0, self.transform_row1)
    }

    #[inline]
    pub fn uv(&self) -> UvRect {
        let [u0, v0, u1, v1] = self.uv_rect;
        UvRect::new(u0, v0, u1, v1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;

    #[test]
    fn record_is_fourteen_floats() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 14 * 4);
    }

    #[test]
    fn attribute_offsets_follow_field_order() {
        let layout = SpriteInstance::layout();
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(layout.array_stride, 56);

        let offsets: Vec<(u32, u64)> = layout
            .attributes
            .iter()
            .map(|a| (a.shader_location, a.offset))
            .collect();
        assert_eq!(offsets, vec![(0, 0), (1, 12), (2, 24), (3, 40)]);
    }

    #[test]
    fn bytes_follow_field_order() {
        let inst = SpriteInstance::new(
            Transform2D::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0),
            UvRect::new(0.1, 0.2, 0.3, 0.4),
            Color::new(0.5, 0.6, 0.7, 0.8),
        );
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&inst));
        assert_eq!(
            floats,
            &[1.0, 3.0, 5.0, 2.0, 4.0, 6.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]
        );
    }

    #[test]
    fn from_rect_places_unit_quad() {
        let inst = SpriteInstance::from_rect(Rect::new(10.0, 20.0, 32.0, 16.0), UvRect::full(), Color::WHITE);
        let t = inst.transform();
        assert_eq!(t.transform_point(Vec2::new(0.0, 0.0)), Vec2::new(10.0, 20.0));
        assert_eq!(t.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(42.0, 36.0));
        assert_eq!(inst.uv(), UvRect::full());
    }
}
