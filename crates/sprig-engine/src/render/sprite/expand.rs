//! Host-side mirror of `vs_main`.
//!
//! Same math as the vertex stage, step for step, so sprite placement can be
//! queried on the CPU (picking, layout checks) and tested without a GPU.

use crate::coords::{Transform2D, Vec2};

use super::{FrameUniforms, SpriteInstance};

/// Vertices emitted per instance.
pub const VERTICES_PER_SPRITE: u32 = 4;

/// One vertex-stage output.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ExpandedVertex {
    pub clip_position: [f32; 4],
    pub uv: Vec2,
    pub color: [f32; 4],
}

/// Unit-quad corner for `vertex_index`: `(index & 1, (index >> 1) & 1)`.
#[inline]
pub fn quad_corner(vertex_index: u32) -> Vec2 {
    Vec2::new((vertex_index & 1) as f32, ((vertex_index >> 1) & 1) as f32)
}

/// Floors a pixel position to the pixel grid.
#[inline]
pub fn snap_to_pixel(position: Vec2) -> Vec2 {
    position.floor()
}

/// Maps a pixel position (top-left origin, +Y down) to clip space (+Y up).
#[inline]
pub fn pixel_to_clip(position: Vec2, screen_resolution: Vec2) -> Vec2 {
    let clip = (position * 2.0).div_elem(screen_resolution) - Vec2::splat(1.0);
    Vec2::new(clip.x, -clip.y)
}

/// Pixel-space position of `corner` after the model and view transforms, before snapping.
#[inline]
pub fn transformed_corner(model: &Transform2D, view: &Transform2D, corner: Vec2) -> Vec2 {
    let m = mat3_mul(&view.to_homogeneous(), &model.to_homogeneous());
    mat3_apply(&m, corner)
}

/// Runs the vertex stage for one vertex of one instance.
pub fn expand_vertex(
    instance: &SpriteInstance,
    frame: &FrameUniforms,
    vertex_index: u32,
) -> ExpandedVertex {
    let corner = quad_corner(vertex_index);
    let position = transformed_corner(&instance.transform(), &frame.view(), corner);
    let clip = pixel_to_clip(snap_to_pixel(position), Vec2::from(frame.screen_resolution));

    ExpandedVertex {
        clip_position: [clip.x, clip.y, 0.0, 1.0],
        uv: instance.uv().at(corner),
        color: instance.color,
    }
}

/// All four vertices of one instance in strip order.
pub fn expand_quad(instance: &SpriteInstance, frame: &FrameUniforms) -> [ExpandedVertex; 4] {
    [0, 1, 2, 3].map(|i| expand_vertex(instance, frame, i))
}

// ── homogeneous 3×3 (column-major, like WGSL) ─────────────────────────────
//
// `vs_main` promotes both transforms to `mat3x3` and multiplies them; these
// helpers reproduce that product instead of going through `Transform2D::then`
// so the mirror follows the shader's operation order.

type Mat3 = [[f32; 3]; 3];

fn mat3_mul(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [[0.0f32; 3]; 3];
    for (col, out_col) in out.iter_mut().enumerate() {
        for (row, v) in out_col.iter_mut().enumerate() {
            *v = (0..3).map(|k| a[k][row] * b[col][k]).sum();
        }
    }
    out
}

fn mat3_apply(m: &Mat3, p: Vec2) -> Vec2 {
    let v = [p.x, p.y, 1.0];
    let x: f32 = (0..3).map(|k| m[k][0] * v[k]).sum();
    let y: f32 = (0..3).map(|k| m[k][1] * v[k]).sum();
    Vec2::new(x, y)
}
