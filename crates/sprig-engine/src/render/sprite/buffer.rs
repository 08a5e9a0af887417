use std::marker::PhantomData;
use std::ops::Range;

use bytemuck::Pod;

/// Smallest capacity an instance buffer is created with.
const MIN_CAPACITY: usize = 64;

/// Growable GPU vertex buffer holding `T` records.
///
/// Records are appended behind a cursor with `queue.write_buffer`, so several
/// passes recorded into one encoder each keep their own region. Queue writes
/// all land before the encoder runs; reusing a region within a frame would
/// leak the later contents into the earlier pass. Call [`reset`](Self::reset)
/// once per frame, or use [`write`](Self::write) for a buffer that is filled
/// once and drawn as a whole.
///
/// When an append does not fit, a fresh buffer replaces the old one and the
/// cursor restarts at zero. Passes that already bound the old buffer keep it
/// alive.
pub struct InstanceBuffer<T: Pod> {
    label: &'static str,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    len: usize,
    _marker: PhantomData<T>,
}

/// Where an append lands.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placement {
    base: usize,
    /// Capacity of the replacement buffer, if one is needed.
    realloc: Option<usize>,
}

impl<T: Pod> InstanceBuffer<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            buffer: None,
            capacity: 0,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Records held by the current buffer since the last reset.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }

    /// Rewinds the cursor. Earlier contents stay until overwritten.
    #[inline]
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Replaces the contents with `data`, drawable as `0..data.len()`.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        self.reset();
        self.append(device, queue, data);
    }

    /// Uploads `data` after the cursor and returns the record range it occupies.
    pub fn append(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) -> Range<u32> {
        if data.is_empty() {
            return (self.len as u32)..(self.len as u32);
        }

        let placement = self.place(data.len());
        if let Some(new_cap) = placement.realloc {
            log::debug!("{}: new instance buffer with capacity {new_cap}", self.label);
            self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (new_cap * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }

        if let Some(buffer) = self.buffer.as_ref() {
            let offset = (placement.base * std::mem::size_of::<T>()) as u64;
            queue.write_buffer(buffer, offset, bytemuck::cast_slice(data));
        }
        (placement.base as u32)..((placement.base + data.len()) as u32)
    }

    /// Advances the cursor by `count`, switching to a larger buffer if needed.
    fn place(&mut self, count: usize) -> Placement {
        let end = self.len + count;
        if end <= self.capacity {
            let base = self.len;
            self.len = end;
            return Placement { base, realloc: None };
        }

        let new_cap = grown_capacity(end);
        self.capacity = new_cap;
        self.len = count;
        Placement {
            base: 0,
            realloc: Some(new_cap),
        }
    }
}

fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(MIN_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf() -> InstanceBuffer<[f32; 4]> {
        InstanceBuffer::new("test")
    }

    #[test]
    fn capacity_has_floor() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(64), 64);
    }

    #[test]
    fn capacity_rounds_to_power_of_two() {
        assert_eq!(grown_capacity(65), 128);
        assert_eq!(grown_capacity(1000), 1024);
    }

    #[test]
    fn new_buffer_is_unallocated() {
        let b = buf();
        assert!(b.is_empty());
        assert_eq!(b.capacity(), 0);
        assert!(b.buffer().is_none());
    }

    #[test]
    fn first_append_allocates() {
        let mut b = buf();
        assert_eq!(b.place(10), Placement { base: 0, realloc: Some(64) });
        assert_eq!(b.len(), 10);
    }

    #[test]
    fn appends_within_a_frame_do_not_overlap() {
        let mut b = buf();
        b.place(10);
        assert_eq!(b.place(20), Placement { base: 10, realloc: None });
        assert_eq!(b.place(5), Placement { base: 30, realloc: None });
        assert_eq!(b.len(), 35);
    }

    #[test]
    fn overflow_moves_to_fresh_buffer_at_zero() {
        let mut b = buf();
        b.place(50);
        assert_eq!(b.place(30), Placement { base: 0, realloc: Some(128) });
        assert_eq!(b.len(), 30);
        assert_eq!(b.capacity(), 128);
    }

    #[test]
    fn reset_reuses_buffer_from_start() {
        let mut b = buf();
        b.place(40);
        b.reset();
        assert_eq!(b.place(40), Placement { base: 0, realloc: None });
    }
}
