use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};

use crate::coords::{Rect, UvRect};

/// Identity of an uploaded sprite texture; draw calls split when it changes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Sampler parameters shared by every sprite texture.
///
/// Nearest filtering keeps pixel art crisp; the shader always samples level 0.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplerSettings {
    pub filter: wgpu::FilterMode,
    pub address_mode: wgpu::AddressMode,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            filter: wgpu::FilterMode::Nearest,
            address_mode: wgpu::AddressMode::ClampToEdge,
        }
    }
}

/// Bind group layout (group 1: texture + sampler) and the shared sampler.
pub struct TextureConfig {
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl TextureConfig {
    pub fn new(device: &wgpu::Device, settings: SamplerSettings) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprig sprite texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprig sprite sampler"),
            address_mode_u: settings.address_mode,
            address_mode_v: settings.address_mode,
            address_mode_w: settings.address_mode,
            mag_filter: settings.filter,
            min_filter: settings.filter,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            bind_group_layout,
            sampler,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }
}

/// A texture uploaded for sprite drawing, with its bind group ready for group 1.
#[derive(Clone)]
pub struct SpriteTexture {
    id: TextureId,
    width: u32,
    height: u32,
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl SpriteTexture {
    /// Uploads tightly packed sRGB RGBA8 pixels.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &TextureConfig,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self> {
        anyhow::ensure!(width > 0 && height > 0, "texture `{label}` has zero size");
        let expected = width as usize * height as usize * 4;
        anyhow::ensure!(
            pixels.len() == expected,
            "texture `{label}`: expected {expected} bytes for {width}x{height} RGBA8, got {}",
            pixels.len()
        );

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &config.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&config.sampler),
                },
            ],
        });

        log::debug!("uploaded sprite texture `{label}` ({width}x{height})");

        Ok(Self {
            id: TextureId::next(),
            width,
            height,
            texture,
            bind_group,
        })
    }

    /// Decodes an encoded image (PNG, JPEG, ...) and uploads it.
    pub fn from_image_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &TextureConfig,
        label: &str,
        bytes: &[u8],
    ) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .with_context(|| format!("failed to decode image `{label}`"))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Self::from_rgba8(device, queue, config, label, width, height, image.as_raw())
    }

    #[inline]
    pub fn id(&self) -> TextureId {
        self.id
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// UV rect for a region of this texture given in texels.
    #[inline]
    pub fn uv_for(&self, region: Rect) -> UvRect {
        UvRect::from_pixel_rect(region, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_ids_are_unique() {
        let a = TextureId::next();
        let b = TextureId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn default_sampler_is_nearest_clamped() {
        let s = SamplerSettings::default();
        assert_eq!(s.filter, wgpu::FilterMode::Nearest);
        assert_eq!(s.address_mode, wgpu::AddressMode::ClampToEdge);
    }
}
