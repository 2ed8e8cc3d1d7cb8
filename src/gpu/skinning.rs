//! Skinning compute pass
//!
//! Owns the compute pipeline that deforms skinning-eligible vertices on the
//! GPU. The controller computes and uploads the matrices; this pass binds the
//! buffers, writes the per-dispatch parameters and fires the dispatch. The
//! deformation result is never read back — correctness of the kernel output
//! is the downstream consumers' contract.

use std::borrow::Cow;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::animation::controller::AnimationController;
use crate::gpu::context::GpuContext;
use crate::gpu::resources::ResourceManager;

const WORKGROUP_SIZE: u32 = 64;

const STORAGE_USAGE: wgpu::BufferUsages =
    wgpu::BufferUsages::STORAGE.union(wgpu::BufferUsages::COPY_DST);

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct SkinningParams {
    vertex_count: u32,
    init_prev: u32,
    pad0: u32,
    pad1: u32,
}

/// GPU compute pass executing the skinning kernel.
pub struct SkinningPass {
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    bind_group: wgpu::BindGroup,
    params_buffer: wgpu::Buffer,
    skinned_vertex_buffer: wgpu::Buffer,
}

impl SkinningPass {
    /// Builds the pass for a controller with skinning data.
    ///
    /// Returns `None` when the controller has no skinning data — the dispatch
    /// path is skipped entirely in that case.
    #[must_use]
    pub fn new(
        ctx: &GpuContext,
        store: &mut ResourceManager,
        controller: &mut AnimationController,
    ) -> Option<Self> {
        // Materialize every buffer the kernel binds.
        if let Some(prev) = controller.prev_vertex_buffer_mut() {
            store.prepare_buffer(prev, STORAGE_USAGE);
        }
        let (static_vertex_bytes, buffer_ids) = {
            let skinning = controller.skinning_mut()?;
            store.prepare_buffer(&mut skinning.skinning_vertex_buffer, STORAGE_USAGE);
            store.prepare_buffer(&mut skinning.static_vertex_buffer, STORAGE_USAGE);
            store.prepare_buffer(&mut skinning.skinning_matrices_buffer, STORAGE_USAGE);
            store.prepare_buffer(
                &mut skinning.inv_transpose_skinning_matrices_buffer,
                STORAGE_USAGE,
            );
            store.prepare_buffer(&mut skinning.mesh_bind_matrices_buffer, STORAGE_USAGE);
            store.prepare_buffer(&mut skinning.mesh_inv_bind_matrices_buffer, STORAGE_USAGE);

            (
                skinning.static_vertex_buffer.as_bytes().to_vec(),
                [
                    skinning.skinning_vertex_buffer.id(),
                    skinning.static_vertex_buffer.id(),
                    skinning.skinning_matrices_buffer.id(),
                    skinning.inv_transpose_skinning_matrices_buffer.id(),
                    skinning.mesh_bind_matrices_buffer.id(),
                    skinning.mesh_inv_bind_matrices_buffer.id(),
                ],
            )
        };
        let prev_vertex_id = controller.prev_vertex_buffer().map(|buffer| buffer.id())?;

        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Skinning Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("skinning.wgsl"))),
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Skinning Layout"),
            entries: &[
                uniform_entry(0),
                storage_entry(1, true),
                storage_entry(2, true),
                storage_entry(3, false),
                storage_entry(4, false),
                storage_entry(5, true),
                storage_entry(6, true),
                storage_entry(7, true),
                storage_entry(8, true),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Skinning Pipeline Layout"),
            bind_group_layouts: &[Some(&layout)],
            immediate_size: 0,
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Skinning Compute Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("SkinningPass::params"),
            contents: bytemuck::bytes_of(&SkinningParams::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // The deformed output starts as a copy of the bind-pose data.
        let skinned_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("SkinningPass::skinned_vertex_data"),
            contents: &static_vertex_bytes,
            usage: wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::VERTEX
                | wgpu::BufferUsages::COPY_SRC,
        });

        let [skinning_vertex_id, static_vertex_id, skinning_matrices_id, inv_transpose_skinning_id, mesh_bind_id, mesh_inv_bind_id] =
            buffer_ids;

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Skinning Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_buffer.as_entire_binding(),
                },
                buffer_binding(1, store.buffer(skinning_vertex_id)?),
                buffer_binding(2, store.buffer(static_vertex_id)?),
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: skinned_vertex_buffer.as_entire_binding(),
                },
                buffer_binding(4, store.buffer(prev_vertex_id)?),
                buffer_binding(5, store.buffer(skinning_matrices_id)?),
                buffer_binding(6, store.buffer(inv_transpose_skinning_id)?),
                buffer_binding(7, store.buffer(mesh_bind_id)?),
                buffer_binding(8, store.buffer(mesh_inv_bind_id)?),
            ],
        });

        Some(Self {
            queue: ctx.queue.clone(),
            pipeline,
            bind_group,
            params_buffer,
            skinned_vertex_buffer,
        })
    }

    /// The deformed vertex stream, for downstream geometry consumers.
    #[must_use]
    pub fn skinned_vertex_buffer(&self) -> &wgpu::Buffer {
        &self.skinned_vertex_buffer
    }

    /// Executes the dispatch recorded by the controller's last update.
    ///
    /// No-op when no dispatch is pending. Fire-and-forget: nothing is read
    /// back and nothing waits on the GPU.
    pub fn execute(
        &self,
        store: &mut ResourceManager,
        encoder: &mut wgpu::CommandEncoder,
        controller: &mut AnimationController,
    ) {
        let Some(dispatch) = controller.take_pending_dispatch() else {
            return;
        };

        if let Some(skinning) = controller.skinning_mut() {
            store.prepare_buffer(&mut skinning.skinning_matrices_buffer, STORAGE_USAGE);
            store.prepare_buffer(
                &mut skinning.inv_transpose_skinning_matrices_buffer,
                STORAGE_USAGE,
            );
        }
        if let Some(prev) = controller.prev_vertex_buffer_mut() {
            store.prepare_buffer(prev, STORAGE_USAGE);
        }

        let params = SkinningParams {
            vertex_count: dispatch.vertex_count,
            init_prev: u32::from(dispatch.init_prev),
            pad0: 0,
            pad1: 0,
        };
        self.queue
            .write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));

        let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("Skinning"),
            timestamp_writes: None,
        });
        cpass.set_pipeline(&self.pipeline);
        cpass.set_bind_group(0, &self.bind_group, &[]);
        cpass.dispatch_workgroups(dispatch.vertex_count.div_ceil(WORKGROUP_SIZE), 1, 1);
    }
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn buffer_binding(binding: u32, buffer: &wgpu::Buffer) -> wgpu::BindGroupEntry<'_> {
    wgpu::BindGroupEntry {
        binding,
        resource: buffer.as_entire_binding(),
    }
}
