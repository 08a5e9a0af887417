use std::collections::HashMap;

use crate::coords::{Rect, Viewport};
use crate::render::{RenderCtx, RenderTarget};

use super::batch::{BatchBuilder, DrawSource, SpriteBatch};
use super::buffer::InstanceBuffer;
use super::pipeline::{frame_bind_group_layout, SpritePipeline, FRAME_GROUP, TEXTURE_GROUP};
use super::uniforms::FrameSlots;
use super::{Camera2D, FrameUniforms, SamplerSettings, SpriteInstance, TextureConfig, TextureId};

/// Per-call counters returned by [`SpriteRenderer::render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub draw_calls: u32,
    pub instances: u32,
}

/// Instanced textured-quad renderer.
///
/// GPU objects are created lazily: the pipeline on first use per surface
/// format, the uniform ring and instance buffer on demand. `render` may be
/// called several times per frame (one camera each); every call gets its own
/// uniform slot and instance region, both recycled when
/// [`RenderCtx::frame_index`] changes.
pub struct SpriteRenderer {
    texture_config: TextureConfig,
    frame_layout: wgpu::BindGroupLayout,
    slots: FrameSlots,

    pipeline: Option<SpritePipeline>,
    instances: InstanceBuffer<SpriteInstance>,
    last_frame: Option<u64>,

    builder: BatchBuilder,
    bind_groups: HashMap<TextureId, wgpu::BindGroup>,
    externals: Vec<wgpu::Buffer>,

    warned_untextured: bool,
}

impl SpriteRenderer {
    pub fn new(device: &wgpu::Device, sampler: SamplerSettings) -> Self {
        Self {
            texture_config: TextureConfig::new(device, sampler),
            frame_layout: frame_bind_group_layout(device),
            slots: FrameSlots::new(device),
            pipeline: None,
            instances: InstanceBuffer::new("sprig sprite instances"),
            last_frame: None,
            builder: BatchBuilder::new(),
            bind_groups: HashMap::new(),
            externals: Vec::new(),
            warned_untextured: false,
        }
    }

    /// Layout + sampler that textures drawn by this renderer must be created with.
    #[inline]
    pub fn texture_config(&self) -> &TextureConfig {
        &self.texture_config
    }

    /// Records sprites through `f` and draws them into `target` as seen by `camera`.
    ///
    /// The pass loads existing contents; clear the target beforehand if needed.
    /// Sprites are drawn in submission order with one instanced draw per run of
    /// equal textures, and one per [`SpriteBatch::draw_buffer`].
    pub fn render<F>(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &Camera2D,
        f: F,
    ) -> DrawStats
    where
        F: FnOnce(&mut SpriteBatch<'_>),
    {
        self.builder.clear();
        self.bind_groups.clear();
        self.externals.clear();
        {
            let mut batch = SpriteBatch {
                builder: &mut self.builder,
                bind_groups: &mut self.bind_groups,
                externals: &mut self.externals,
            };
            f(&mut batch);
        }

        if self.builder.dropped() > 0 && !self.warned_untextured {
            log::debug!(
                "SpriteRenderer: {} sprite(s) drawn before set_texture; ignored",
                self.builder.dropped()
            );
            self.warned_untextured = true;
        }

        let (instances, calls) = self.builder.finish();
        if calls.is_empty() || !ctx.viewport.is_valid() {
            return DrawStats::default();
        }

        let Some(scissor) = camera_scissor(camera.viewport, ctx.surface_size, ctx.scale_factor)
        else {
            return DrawStats::default();
        };

        if self
            .pipeline
            .as_ref()
            .is_none_or(|p| p.format() != ctx.surface_format)
        {
            self.pipeline = Some(SpritePipeline::new(
                ctx.device,
                ctx.surface_format,
                &self.frame_layout,
                &self.texture_config,
            ));
        }
        let Some(pipeline) = self.pipeline.as_ref() else { return DrawStats::default() };

        if starts_frame(&mut self.last_frame, ctx.frame_index) {
            self.instances.reset();
            self.slots.reset();
        }

        let view = camera
            .transform(ctx.viewport)
            .then_scale(ctx.scale_factor, ctx.scale_factor);
        let [surface_w, surface_h] = ctx.surface_size;
        let uniforms = FrameUniforms::new(view, Viewport::new(surface_w as f32, surface_h as f32));
        let Some((frame_bind_group, frame_offset)) =
            self.slots
                .push(ctx.device, ctx.queue, &self.frame_layout, &uniforms)
        else {
            return DrawStats::default();
        };

        let base = self.instances.append(ctx.device, ctx.queue, instances).start;

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("sprig sprite pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline.raw());
        rpass.set_bind_group(FRAME_GROUP, frame_bind_group, &[frame_offset]);
        let (sx, sy, sw, sh) = scissor;
        rpass.set_scissor_rect(sx, sy, sw, sh);

        let mut bound: Option<DrawSource> = None;
        let mut stats = DrawStats::default();
        for call in calls {
            let Some(bind_group) = self.bind_groups.get(&call.texture) else { continue };

            let (vbo, range) = match call.source {
                DrawSource::Batch => (
                    self.instances.buffer(),
                    (base + call.range.start)..(base + call.range.end),
                ),
                DrawSource::External(i) => (self.externals.get(i as usize), call.range.clone()),
            };
            let Some(vbo) = vbo else { continue };
            if bound != Some(call.source) {
                rpass.set_vertex_buffer(0, vbo.slice(..));
                bound = Some(call.source);
            }

            rpass.set_bind_group(TEXTURE_GROUP, bind_group, &[]);
            rpass.draw(0..4, range.clone());
            stats.draw_calls += 1;
            stats.instances += range.end - range.start;
        }
        stats
    }
}

/// Marks `index` as the current frame; true when it differs from the last one seen.
fn starts_frame(last: &mut Option<u64>, index: u64) -> bool {
    if *last == Some(index) {
        return false;
    }
    *last = Some(index);
    true
}

/// Converts the camera's logical viewport into a physical scissor rect,
/// clamped to the surface. `None` when nothing would be visible.
///
/// Edges are rounded to the nearest physical pixel.
fn camera_scissor(
    region: Option<Rect>,
    surface: [u32; 2],
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let [surface_w, surface_h] = surface;
    if surface_w == 0 || surface_h == 0 {
        return None;
    }
    let Some(region) = region else {
        return Some((0, 0, surface_w, surface_h));
    };

    let bounds = Rect::new(0.0, 0.0, surface_w as f32, surface_h as f32);
    let region = region.normalized();
    let physical = Rect::from_min_max(region.min() * scale, region.max() * scale);
    let clipped = physical.intersect(bounds)?;

    let x = (clipped.min().x.round() as u32).min(surface_w);
    let y = (clipped.min().y.round() as u32).min(surface_h);
    let x2 = (clipped.max().x.round() as u32).min(surface_w);
    let y2 = (clipped.max().y.round() as u32).min(surface_h);
    let (w, h) = (x2.saturating_sub(x), y2.saturating_sub(y));

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}
