//! GPU resource management
//!
//! The device-facing half of the engine:
//! - `buffer`: CPU-mirrored structured buffers and temporal pairs
//! - `context`: headless wgpu device/queue bring-up
//! - `resources`: device buffer registry and upload/copy flushing
//! - `skinning`: the skinning compute pass
//!
//! The animation controller records its GPU work (pending upload ranges, a
//! scheduled pair copy, a dispatch request) against the CPU mirrors;
//! [`submit_frame`] flushes it all onto the command stream in program order.

pub mod buffer;
pub mod context;
pub mod resources;
pub mod skinning;

pub use buffer::{StructuredBuffer, TemporalPair};
pub use context::GpuContext;
pub use resources::ResourceManager;
pub use skinning::SkinningPass;

use crate::animation::controller::AnimationController;

/// Usage flags for the temporally double-buffered matrix sets: sampled as
/// storage, uploaded by range, and rotated via device-side copies.
pub const MATRIX_BUFFER_USAGE: wgpu::BufferUsages = wgpu::BufferUsages::STORAGE
    .union(wgpu::BufferUsages::COPY_DST)
    .union(wgpu::BufferUsages::COPY_SRC);

/// Submits one frame of recorded GPU work.
///
/// Flushes the temporal matrix pairs (uploads, then any scheduled
/// current→previous copy) and executes the skinning dispatch if one was
/// recorded. Everything lands on the single command stream in program order;
/// nothing waits on the GPU.
pub fn submit_frame(
    ctx: &GpuContext,
    store: &mut ResourceManager,
    controller: &mut AnimationController,
    skinning_pass: Option<&SkinningPass>,
) {
    let mut encoder = ctx.create_encoder("AnimationController::frame");

    if let Some(pair) = controller.world_matrix_buffers_mut() {
        store.sync_pair(&mut encoder, pair, MATRIX_BUFFER_USAGE);
    }
    if let Some(pair) = controller.inv_transpose_world_matrix_buffers_mut() {
        store.sync_pair(&mut encoder, pair, MATRIX_BUFFER_USAGE);
    }

    if let Some(pass) = skinning_pass {
        pass.execute(store, &mut encoder, controller);
    }

    ctx.submit(encoder);
}
