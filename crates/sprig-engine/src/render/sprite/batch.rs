use std::collections::HashMap;
use std::ops::Range;

use crate::coords::{Rect, Transform2D, UvRect};
use crate::paint::Color;

use super::{InstanceBuffer, SpriteInstance, SpriteTexture, TextureId};

/// Vertex buffer a [`DrawCall`] reads its instances from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawSource {
    /// The renderer's per-frame batch buffer.
    Batch,
    /// The n-th caller-owned buffer passed to [`SpriteBatch::draw_buffer`].
    External(u32),
}

/// A contiguous run of instances sharing one texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub texture: TextureId,
    pub source: DrawSource,
    /// Relative to the start of this frame's batch for `Batch`, absolute for `External`.
    pub range: Range<u32>,
}

/// Records instances in submission order and cuts a new [`DrawCall`] each time
/// the texture changes.
///
/// Sorting is the caller's business: instances are never reordered, so a
/// texture that alternates A, B, A yields three calls.
#[derive(Debug, Default)]
pub struct BatchBuilder {
    instances: Vec<SpriteInstance>,
    calls: Vec<DrawCall>,
    current: Option<TextureId>,
    run_start: usize,
    dropped: usize,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded data, keeping allocations.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.calls.clear();
        self.current = None;
        self.run_start = 0;
        self.dropped = 0;
    }

    pub fn set_texture(&mut self, texture: TextureId) {
        if self.current == Some(texture) {
            return;
        }
        self.flush();
        self.current = Some(texture);
    }

    /// Appends an instance for the current texture.
    ///
    /// Returns `false` (and drops the instance) when no texture is set.
    pub fn push(&mut self, instance: SpriteInstance) -> bool {
        if self.current.is_none() {
            self.dropped += 1;
            return false;
        }
        self.instances.push(instance);
        true
    }

    /// Closes the open run. Called automatically by `set_texture` and `finish`.
    fn flush(&mut self) {
        let Some(texture) = self.current else { return };
        let end = self.instances.len();
        if self.run_start < end {
            self.calls.push(DrawCall {
                texture,
                source: DrawSource::Batch,
                range: (self.run_start as u32)..(end as u32),
            });
        }
        self.run_start = end;
    }

    /// Inserts a draw of `count` instances from external buffer `index`.
    ///
    /// The open run is closed first so submission order is kept. The bound
    /// texture is left as it was; batching resumes with it afterwards.
    pub fn push_external(&mut self, texture: TextureId, index: u32, count: u32) {
        if count == 0 {
            return;
        }
        self.flush();
        self.calls.push(DrawCall {
            texture,
            source: DrawSource::External(index),
            range: 0..count,
        });
    }

    /// Closes the open run and returns the recorded instances and calls.
    pub fn finish(&mut self) -> (&[SpriteInstance], &[DrawCall]) {
        self.flush();
        (&self.instances, &self.calls)
    }

    #[inline]
    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }

    /// Instances discarded because no texture was bound.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Drawing interface handed to the [`SpriteRenderer::render`](super::SpriteRenderer::render) closure.
pub struct SpriteBatch<'a> {
    pub(super) builder: &'a mut BatchBuilder,
    pub(super) bind_groups: &'a mut HashMap<TextureId, wgpu::BindGroup>,
    pub(super) externals: &'a mut Vec<wgpu::Buffer>,
}

impl SpriteBatch<'_> {
    fn register(&mut self, texture: &SpriteTexture) {
        self.bind_groups
            .entry(texture.id())
            .or_insert_with(|| texture.bind_group().clone());
    }

    /// Binds `texture` for subsequent sprites.
    pub fn set_texture(&mut self, texture: &SpriteTexture) {
        self.register(texture);
        self.builder.set_texture(texture.id());
    }

    /// Draws every instance in a caller-owned buffer with `texture`, in
    /// submission order relative to sprites drawn through this batch.
    ///
    /// The buffer is read as `0..buffer.len()`; fill it with
    /// [`InstanceBuffer::write`]. Empty or unallocated buffers are skipped.
    pub fn draw_buffer(&mut self, texture: &SpriteTexture, buffer: &InstanceBuffer<SpriteInstance>) {
        let Some(raw) = buffer.buffer() else { return };
        if buffer.is_empty() {
            return;
        }
        self.register(texture);
        let index = self.externals.len() as u32;
        self.externals.push(raw.clone());
        self.builder
            .push_external(texture.id(), index, buffer.len() as u32);
    }

    /// Draws a raw instance with the current texture.
    #[inline]
    pub fn draw(&mut self, instance: SpriteInstance) {
        self.builder.push(instance);
    }

    /// Draws the unit quad mapped through `transform`.
    #[inline]
    pub fn draw_transformed(&mut self, transform: Transform2D, uv: UvRect, color: Color) {
        self.draw(SpriteInstance::new(transform, uv, color));
    }

    /// Draws an axis-aligned sprite covering `rect`.
    #[inline]
    pub fn draw_rect(&mut self, rect: Rect, uv: UvRect, color: Color) {
        self.draw(SpriteInstance::from_rect(rect, uv, color));
    }
}
