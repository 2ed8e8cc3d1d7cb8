//! GPU resource manager
//!
//! Owns the device-side twins of every [`StructuredBuffer`] and keeps them in
//! sync: pending mirror ranges are drained onto the queue in program order,
//! and scheduled temporal-pair rotations become device-side buffer copies.
//! All GPU work is enqueued onto the single command stream and never waited
//! on; ordering falls out of submission order.

use rustc_hash::FxHashMap;
use wgpu::util::DeviceExt;

use crate::gpu::buffer::{StructuredBuffer, TemporalPair};
use crate::gpu::context::GpuContext;

struct GpuBuffer {
    buffer: wgpu::Buffer,
    size: u64,
}

pub struct ResourceManager {
    device: wgpu::Device,
    queue: wgpu::Queue,
    gpu_buffers: FxHashMap<u64, GpuBuffer>,
}

impl ResourceManager {
    #[must_use]
    pub fn new(ctx: &GpuContext) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            gpu_buffers: FxHashMap::default(),
        }
    }

    /// Creates the device buffer on first sight and flushes pending ranges.
    pub fn prepare_buffer(&mut self, buffer: &mut StructuredBuffer, usage: wgpu::BufferUsages) {
        if let Some(gpu_buffer) = self.gpu_buffers.get(&buffer.id()) {
            for range in buffer.take_pending_uploads() {
                self.queue.write_buffer(
                    &gpu_buffer.buffer,
                    range.start as u64,
                    &buffer.as_bytes()[range],
                );
            }
            return;
        }

        log::debug!(
            "Creating GPU buffer {:?} ({} bytes)",
            buffer.label(),
            buffer.size()
        );
        let raw = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(buffer.label()),
                contents: buffer.as_bytes(),
                usage,
            });
        self.gpu_buffers.insert(
            buffer.id(),
            GpuBuffer {
                buffer: raw,
                size: buffer.size(),
            },
        );
        // Creation uploaded the whole mirror.
        buffer.take_pending_uploads();
    }

    /// Flushes both slots of a temporal pair and applies a scheduled
    /// current→previous device copy.
    ///
    /// The current slot is flushed before the copy is recorded, so the copy
    /// observes this frame's data (queue writes are ordered before any
    /// subsequently submitted command buffer).
    pub fn sync_pair(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        pair: &mut TemporalPair,
        usage: wgpu::BufferUsages,
    ) {
        self.prepare_buffer(pair.current_mut(), usage);
        self.prepare_buffer(pair.previous_mut(), usage);

        if pair.take_pending_copy() {
            let current = self.gpu_buffers.get(&pair.current().id());
            let previous = self.gpu_buffers.get(&pair.previous().id());
            if let (Some(current), Some(previous)) = (current, previous) {
                encoder.copy_buffer_to_buffer(
                    &current.buffer,
                    0,
                    &previous.buffer,
                    0,
                    current.size,
                );
            }
        }
    }

    /// The device buffer backing a structured buffer, if created.
    #[must_use]
    pub fn buffer(&self, id: u64) -> Option<&wgpu::Buffer> {
        self.gpu_buffers.get(&id).map(|gpu_buffer| &gpu_buffer.buffer)
    }
}
