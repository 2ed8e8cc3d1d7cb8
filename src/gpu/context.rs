//! Headless GPU context.
//!
//! [`GpuContext`] holds the core wgpu handles (device and queue) without any
//! window surface: the animation engine only submits buffer uploads, buffer
//! copies and compute work, so presentation is someone else's concern.

use crate::errors::{Result, RigError};

/// Core wgpu context holding GPU handles.
pub struct GpuContext {
    /// The wgpu device for resource creation
    pub device: wgpu::Device,
    /// The command queue for submitting work
    pub queue: wgpu::Queue,
}

impl GpuContext {
    pub async fn new() -> Result<Self> {
        let instance = wgpu::Instance::default();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RigError::AdapterRequestFailed(e.to_string()))?;

        log::debug!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            })
            .await?;

        Ok(Self { device, queue })
    }

    /// Blocking variant of [`GpuContext::new`] for non-async callers.
    pub fn new_blocking() -> Result<Self> {
        pollster::block_on(Self::new())
    }

    #[must_use]
    pub fn create_encoder(&self, label: &str) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) })
    }

    /// Submits one encoder's worth of recorded commands.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        self.queue.submit(Some(encoder.finish()));
    }
}
