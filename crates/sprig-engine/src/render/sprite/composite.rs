//! Host-side mirror of `fs_main`.

use crate::coords::Vec2;

/// Fragment output: sampled texel times tint, component-wise (alpha included).
#[inline]
pub fn composite(texel: [f32; 4], tint: [f32; 4]) -> [f32; 4] {
    [
        texel[0] * tint[0],
        texel[1] * tint[1],
        texel[2] * tint[2],
        texel[3] * tint[3],
    ]
}

/// CPU copy of a texture's level 0, sampled like the default sprite sampler
/// (nearest filtering, clamp-to-edge).
#[derive(Debug, Clone, PartialEq)]
pub struct TexelGrid {
    width: u32,
    height: u32,
    texels: Vec<[f32; 4]>,
}

impl TexelGrid {
    /// Builds a grid from tightly packed RGBA8 bytes, normalized to `[0, 1]`.
    ///
    /// Returns `None` if `bytes` does not hold exactly `width * height` texels
    /// or either dimension is zero.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if width == 0 || height == 0 || bytes.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        let texels = bytes
            .chunks_exact(4)
            .map(|px| {
                [
                    px[0] as f32 / 255.0,
                    px[1] as f32 / 255.0,
                    px[2] as f32 / 255.0,
                    px[3] as f32 / 255.0,
                ]
            })
            .collect();
        Some(Self { width, height, texels })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> [f32; 4] {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.texels[(y * self.width + x) as usize]
    }

    /// Level-0 nearest sample at normalized `uv`.
    pub fn sample_level0(&self, uv: Vec2) -> [f32; 4] {
        let x = (uv.x * self.width as f32).floor().max(0.0) as u32;
        let y = (uv.y * self.height as f32).floor().max(0.0) as u32;
        self.texel(x, y)
    }

    /// Runs the fragment stage: sample at `uv`, then tint.
    #[inline]
    pub fn shade(&self, uv: Vec2, tint: [f32; 4]) -> [f32; 4] {
        composite(self.sample_level0(uv), tint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2x2: red, green / blue, half-transparent white
    fn grid() -> TexelGrid {
        TexelGrid::from_rgba8(
            2,
            2,
            &[
                255, 0, 0, 255, /**/ 0, 255, 0, 255, //
                0, 0, 255, 255, /**/ 255, 255, 255, 0,
            ],
        )
        .unwrap()
    }

    #[test]
    fn white_tint_returns_raw_texel() {
        let g = grid();
        for (u, v) in [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)] {
            let uv = Vec2::new(u, v);
            assert_eq!(g.shade(uv, [1.0; 4]), g.sample_level0(uv));
        }
    }

    #[test]
    fn zero_tint_alpha_is_transparent() {
        let g = grid();
        for (u, v) in [(0.1, 0.1), (0.9, 0.1), (0.1, 0.9)] {
            assert_eq!(g.shade(Vec2::new(u, v), [1.0, 1.0, 1.0, 0.0])[3], 0.0);
        }
    }

    #[test]
    fn tint_recolors_component_wise() {
        assert_eq!(composite([1.0, 0.5, 0.25, 1.0], [0.5, 0.5, 1.0, 0.5]), [0.5, 0.25, 0.25, 0.5]);
    }

    #[test]
    fn sampling_clamps_outside_unit_range() {
        let g = grid();
        assert_eq!(g.sample_level0(Vec2::new(-0.5, -0.5)), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(g.sample_level0(Vec2::new(1.0, 0.0)), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(g.sample_level0(Vec2::new(3.0, 3.0)), [1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn mismatched_byte_count_is_rejected() {
        assert!(TexelGrid::from_rgba8(2, 2, &[0; 12]).is_none());
        assert!(TexelGrid::from_rgba8(0, 2, &[]).is_none());
    }
}
