use bytemuck::{Pod, Zeroable};

use crate::coords::{Transform2D, Viewport};

/// Per-draw uniform block shared by every instance.
///
/// Matches the WGSL struct `{ view_matrix: mat3x2<f32>, screen_resolution: vec2<f32> }`:
/// 24 bytes of matrix columns followed by 8 bytes of resolution.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_matrix: [[f32; 2]; 3],
    pub screen_resolution: [f32; 2],
}

impl FrameUniforms {
    /// `screen_resolution` is clamped to at least one pixel per axis so the
    /// shader never divides by zero on a minimized surface.
    pub fn new(view: Transform2D, viewport: Viewport) -> Self {
        Self {
            view_matrix: view.to_cols(),
            screen_resolution: [viewport.width.max(1.0), viewport.height.max(1.0)],
        }
    }

    #[inline]
    pub fn view(&self) -> Transform2D {
        let [[m11, m12], [m21, m22], [m31, m32]] = self.view_matrix;
        Transform2D::new(m11, m12, m21, m22, m31, m32)
    }

    pub(super) fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<FrameUniforms>() as u64)
            .expect("FrameUniforms has non-zero size by construction")
    }
}

/// Ring of `FrameUniforms` slots in one uniform buffer, bound with a dynamic
/// offset.
///
/// Each `render` call takes the next slot so passes recorded into the same
/// encoder keep their own camera. Slots are reused after [`reset`](Self::reset).
pub(super) struct FrameSlots {
    stride: u64,
    capacity: u32,
    next: u32,
    buffer: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,
}

impl FrameSlots {
    const MIN_SLOTS: u32 = 8;

    pub(super) fn new(device: &wgpu::Device) -> Self {
        Self {
            stride: slot_stride(device.limits().min_uniform_buffer_offset_alignment),
            capacity: 0,
            next: 0,
            buffer: None,
            bind_group: None,
        }
    }

    #[inline]
    pub(super) fn reset(&mut self) {
        self.next = 0;
    }

    /// Writes `uniforms` into a fresh slot and returns the bind group with
    /// the dynamic offset to bind it at.
    pub(super) fn push(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        uniforms: &FrameUniforms,
    ) -> Option<(&wgpu::BindGroup, u32)> {
        let (slot, realloc) = self.take_slot();
        if let Some(capacity) = realloc {
            log::debug!("frame uniform ring grows to {capacity} slots");
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("sprig sprite frame ubo"),
                size: self.stride * capacity as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("sprig sprite frame bg"),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &buffer,
                        offset: 0,
                        size: Some(FrameUniforms::min_binding_size()),
                    }),
                }],
            }));
            self.buffer = Some(buffer);
        }

        let offset = self.stride * slot as u64;
        queue.write_buffer(self.buffer.as_ref()?, offset, bytemuck::bytes_of(uniforms));
        Some((self.bind_group.as_ref()?, offset as u32))
    }

    /// Claims the next slot index; `Some(capacity)` when a larger buffer is
    /// needed, in which case numbering restarts at zero.
    fn take_slot(&mut self) -> (u32, Option<u32>) {
        if self.next < self.capacity {
            let slot = self.next;
            self.next += 1;
            return (slot, None);
        }
        self.capacity = (self.capacity * 2).max(Self::MIN_SLOTS);
        self.next = 1;
        (0, Some(self.capacity))
    }
}

/// Distance between slots: the block size rounded up to the device's
/// uniform offset alignment.
fn slot_stride(alignment: u32) -> u64 {
    let size = std::mem::size_of::<FrameUniforms>() as u64;
    let align = u64::from(alignment.max(1));
    size.div_ceil(align) * align
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::new(Transform2D::identity(), Viewport::new(1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_thirty_two_bytes() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 32);
        assert_eq!(FrameUniforms::min_binding_size().get(), 32);
    }

    #[test]
    fn view_round_trips_through_columns() {
        let view = Transform2D::rotation(0.5).then_translate(crate::coords::Vec2::new(3.0, 4.0));
        let u = FrameUniforms::new(view, Viewport::new(800.0, 600.0));
        assert_eq!(u.view(), view);
        assert_eq!(u.screen_resolution, [800.0, 600.0]);
    }

    #[test]
    fn slot_stride_honors_alignment() {
        assert_eq!(slot_stride(256), 256);
        assert_eq!(slot_stride(16), 32);
        assert_eq!(slot_stride(0), 32);
    }

    fn slots() -> FrameSlots {
        FrameSlots {
            stride: 256,
            capacity: 0,
            next: 0,
            buffer: None,
            bind_group: None,
        }
    }

    #[test]
    fn calls_in_one_frame_get_distinct_slots() {
        let mut s = slots();
        assert_eq!(s.take_slot(), (0, Some(8)));
        assert_eq!(s.take_slot(), (1, None));
        assert_eq!(s.take_slot(), (2, None));
    }

    #[test]
    fn full_ring_doubles_and_restarts() {
        let mut s = slots();
        for _ in 0..8 {
            s.take_slot();
        }
        assert_eq!(s.take_slot(), (0, Some(16)));
        assert_eq!(s.take_slot(), (1, None));
    }

    #[test]
    fn reset_reuses_slots() {
        let mut s = slots();
        s.take_slot();
        s.take_slot();
        s.reset();
        assert_eq!(s.take_slot(), (0, None));
    }

    #[test]
    fn zero_viewport_is_clamped() {
        let u = FrameUniforms::new(Transform2D::identity(), Viewport::new(0.0, 0.0));
        assert_eq!(u.screen_resolution, [1.0, 1.0]);
    }
}
