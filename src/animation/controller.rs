//! Per-frame animation update engine.
//!
//! [`AnimationController`] turns per-node local transforms and keyframed
//! clips into world-space matrices and GPU-resident skinning matrices, once
//! per frame, while keeping a previous-frame snapshot of every temporal
//! buffer for motion-vector rendering.
//!
//! # Data flow
//!
//! ```text
//! SceneGraph edits ─┐
//! Animation clips ──┼─> local matrices ─> world + inverse-transpose matrices
//!                   │                        │
//!                   │                        ├─> temporal buffer pairs (GPU)
//!                   │                        └─> skinning matrices ─> compute dispatch
//! VertexCache ──────┴─> shared previous-position storage
//! ```
//!
//! Matrix recomputation is incremental: a per-node changed flag is raised by
//! sampling and edits, inherited from parent to child during the single
//! linear propagation pass, and drives run-coalesced partial buffer uploads.
//! The first update and every enable/disable transition instead force a full
//! refresh so no stale GPU data can ever be read.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::animation::clip::{Animation, Behavior};
use crate::animation::vertex_cache::{CachedCurve, CachedMesh, CurveTessellation, VertexCache};
use crate::gpu::buffer::{StructuredBuffer, TemporalPair};
use crate::scene::graph::SceneGraph;

/// Buffer slot names published to the downstream shading system.
pub const WORLD_MATRICES: &str = "world_matrices";
pub const INVERSE_TRANSPOSE_WORLD_MATRICES: &str = "inverse_transpose_world_matrices";
pub const PREV_WORLD_MATRICES: &str = "prev_world_matrices";
pub const PREV_INVERSE_TRANSPOSE_WORLD_MATRICES: &str = "prev_inverse_transpose_world_matrices";

const MAT4_SIZE: usize = size_of::<Mat4>();

/// A vertex of the unskinned bind-pose mesh data.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StaticVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec4,
    pub tex_crd: Vec2,
}

/// Per-vertex skinning attributes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SkinningVertex {
    /// Index of the driven vertex in the static vertex data.
    pub static_index: u32,
    pub bone_ids: [u32; 4],
    pub bone_weights: [f32; 4],
    /// Node whose mesh bind matrix applies to this vertex.
    pub bind_matrix_id: u32,
}

/// Previous-frame vertex position, shared between the skinning dispatch and
/// the vertex-cache subsystem.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PrevVertex {
    pub position: Vec3,
}

/// The four buffer ids the shading system should read this frame.
///
/// When animation is disabled or no clips exist, the previous slots alias the
/// current ones so motion vectors collapse to zero without extra computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixBindings {
    pub world_matrices: u64,
    pub inverse_transpose_world_matrices: u64,
    pub prev_world_matrices: u64,
    pub prev_inverse_transpose_world_matrices: u64,
}

impl MatrixBindings {
    /// Slot name / buffer id pairs, for name-keyed binding systems.
    #[must_use]
    pub fn slots(&self) -> [(&'static str, u64); 4] {
        [
            (WORLD_MATRICES, self.world_matrices),
            (
                INVERSE_TRANSPOSE_WORLD_MATRICES,
                self.inverse_transpose_world_matrices,
            ),
            (PREV_WORLD_MATRICES, self.prev_world_matrices),
            (
                PREV_INVERSE_TRANSPOSE_WORLD_MATRICES,
                self.prev_inverse_transpose_world_matrices,
            ),
        ]
    }
}

/// A recorded request for one skinning compute dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinningDispatch {
    pub vertex_count: u32,
    /// Seed previous positions from the freshly skinned ones (first update
    /// and enable/disable transitions).
    pub init_prev: bool,
}

/// CPU arrays and buffers backing the skinning dispatch. Present only when
/// skinning vertex data was registered at construction.
pub(crate) struct SkinningData {
    pub skinning_matrices: Vec<Mat4>,
    pub inv_transpose_skinning_matrices: Vec<Mat4>,
    pub skinning_matrices_buffer: StructuredBuffer,
    pub inv_transpose_skinning_matrices_buffer: StructuredBuffer,
    pub mesh_bind_matrices_buffer: StructuredBuffer,
    pub mesh_inv_bind_matrices_buffer: StructuredBuffer,
    pub skinning_vertex_buffer: StructuredBuffer,
    pub static_vertex_buffer: StructuredBuffer,
    pub dispatch_size: u32,
}

/// Hierarchical transform/animation update engine.
pub struct AnimationController {
    animations: Vec<Animation>,

    // Per-node working arrays, pre-sized at construction.
    nodes_edited: Vec<bool>,
    local_matrices: Vec<Mat4>,
    global_matrices: Vec<Mat4>,
    inv_transpose_global_matrices: Vec<Mat4>,
    matrices_changed: Vec<bool>,

    world_matrix_buffers: Option<TemporalPair>,
    inv_transpose_world_matrix_buffers: Option<TemporalPair>,
    prev_vertex_buffer: Option<StructuredBuffer>,
    skinning: Option<SkinningData>,
    vertex_cache: Option<Box<dyn VertexCache>>,

    bindings: Option<MatrixBindings>,
    pending_dispatch: Option<SkinningDispatch>,

    global_animation_length: f64,
    time: f64,
    prev_time: f64,
    enabled: bool,
    prev_enabled: bool,
    loop_animations: bool,
    first_update: bool,
}

impl AnimationController {
    /// Builds the controller for a scene graph.
    ///
    /// `prev_vertex_count` sizes the shared previous-position buffer: skinned
    /// vertices first, cached mesh/curve vertices after them. The skinned
    /// region is seeded from the static bind-pose positions here; cached
    /// regions are seeded on registration.
    ///
    /// # Panics
    ///
    /// Panics if an animation targets a node outside the graph.
    #[must_use]
    pub fn new(
        graph: &SceneGraph,
        skinning_vertex_data: &[SkinningVertex],
        static_vertex_data: &[StaticVertex],
        prev_vertex_count: u32,
        animations: Vec<Animation>,
    ) -> Self {
        let node_count = graph.len();
        for animation in &animations {
            assert!(
                animation.node().index() < node_count,
                "animation {:?} targets node {} outside the scene graph ({node_count} nodes)",
                animation.name(),
                animation.node().index()
            );
        }

        let world_matrix_buffers = (node_count > 0).then(|| {
            TemporalPair::new("AnimationController::world_matrices", MAT4_SIZE, node_count)
        });
        let inv_transpose_world_matrix_buffers = (node_count > 0).then(|| {
            TemporalPair::new(
                "AnimationController::inv_transpose_world_matrices",
                MAT4_SIZE,
                node_count,
            )
        });

        // The previous-position buffer carries skinned vertices first,
        // followed by cached mesh/curve vertices. Seed the skinned region
        // from bind-pose positions so the buffer holds valid data before the
        // skinning dispatch first runs; cached regions are seeded in
        // `add_vertex_caches`.
        let prev_vertex_buffer = (prev_vertex_count > 0).then(|| {
            let mut prev_vertex_data = vec![PrevVertex::zeroed(); prev_vertex_count as usize];
            for (prev, vertex) in prev_vertex_data.iter_mut().zip(skinning_vertex_data) {
                prev.position = static_vertex_data[vertex.static_index as usize].position;
            }
            StructuredBuffer::from_slice("AnimationController::prev_vertex_data", &prev_vertex_data)
        });

        let skinning = Self::create_skinning_data(graph, skinning_vertex_data, static_vertex_data);

        let global_animation_length = animations
            .iter()
            .fold(0.0_f64, |length, animation| length.max(animation.duration()));

        Self {
            animations,
            nodes_edited: vec![false; node_count],
            local_matrices: vec![Mat4::IDENTITY; node_count],
            global_matrices: vec![Mat4::IDENTITY; node_count],
            inv_transpose_global_matrices: vec![Mat4::IDENTITY; node_count],
            matrices_changed: vec![false; node_count],
            world_matrix_buffers,
            inv_transpose_world_matrix_buffers,
            prev_vertex_buffer,
            skinning,
            vertex_cache: None,
            bindings: None,
            pending_dispatch: None,
            global_animation_length,
            time: 0.0,
            prev_time: 0.0,
            enabled: true,
            prev_enabled: true,
            loop_animations: true,
            first_update: true,
        }
    }

    fn create_skinning_data(
        graph: &SceneGraph,
        skinning_vertex_data: &[SkinningVertex],
        static_vertex_data: &[StaticVertex],
    ) -> Option<SkinningData> {
        if skinning_vertex_data.is_empty() {
            return None;
        }

        let node_count = graph.len();
        let mut mesh_bind_matrices = vec![Mat4::IDENTITY; node_count];
        let mut mesh_inv_bind_matrices = vec![Mat4::IDENTITY; node_count];
        for (i, node) in graph.nodes().iter().enumerate() {
            mesh_bind_matrices[i] = node.mesh_bind;
            mesh_inv_bind_matrices[i] = node.mesh_bind.inverse();
        }

        Some(SkinningData {
            skinning_matrices: vec![Mat4::IDENTITY; node_count],
            inv_transpose_skinning_matrices: vec![Mat4::IDENTITY; node_count],
            skinning_matrices_buffer: StructuredBuffer::new(
                "AnimationController::skinning_matrices",
                MAT4_SIZE,
                node_count,
            ),
            inv_transpose_skinning_matrices_buffer: StructuredBuffer::new(
                "AnimationController::inv_transpose_skinning_matrices",
                MAT4_SIZE,
                node_count,
            ),
            mesh_bind_matrices_buffer: StructuredBuffer::from_slice(
                "AnimationController::mesh_bind_matrices",
                &mesh_bind_matrices,
            ),
            mesh_inv_bind_matrices_buffer: StructuredBuffer::from_slice(
                "AnimationController::mesh_inv_bind_matrices",
                &mesh_inv_bind_matrices,
            ),
            skinning_vertex_buffer: StructuredBuffer::from_slice(
                "AnimationController::skinning_vertex_data",
                skinning_vertex_data,
            ),
            static_vertex_buffer: StructuredBuffer::from_slice(
                "AnimationController::static_vertex_data",
                static_vertex_data,
            ),
            dispatch_size: skinning_vertex_data.len() as u32,
        })
    }

    /// Registers baked vertex-animation regions and their playback subsystem.
    ///
    /// Seeds the cached regions of the shared previous-position buffer from
    /// the static bind-pose positions, then reconciles looping: a baked clip
    /// shorter than the skeleton animation must repeat, so its pre-infinity
    /// behavior is forced to [`Behavior::Cycle`]; a clip matching the scene
    /// length keeps the subsystem's own default and will not wrap a seam.
    pub fn add_vertex_caches(
        &mut self,
        cached_curves: &[CachedCurve],
        cached_meshes: &[CachedMesh],
        static_positions: &[Vec3],
        mut cache: Box<dyn VertexCache>,
    ) {
        let mut prev_vertex_data: Vec<PrevVertex> = Vec::new();
        for mesh in cached_meshes {
            for i in 0..mesh.vertex_count {
                prev_vertex_data.push(PrevVertex {
                    position: static_positions[(mesh.vertex_offset + i) as usize],
                });
            }
        }
        for curve in cached_curves {
            if curve.tessellation != CurveTessellation::LinearSweptSphere {
                for i in 0..curve.vertex_count {
                    prev_vertex_data.push(PrevVertex {
                        position: static_positions[(curve.vertex_offset + i) as usize],
                    });
                }
            }
        }

        if !prev_vertex_data.is_empty() {
            // Cached regions are laid out contiguously after the skinned
            // vertices; the first region's offset locates the whole block.
            let first_element = cached_meshes
                .first()
                .map(|mesh| mesh.prev_offset)
                .or_else(|| {
                    cached_curves
                        .iter()
                        .find(|curve| curve.tessellation != CurveTessellation::LinearSweptSphere)
                        .map(|curve| curve.prev_offset)
                })
                .unwrap_or(0);
            let byte_offset = first_element as usize * size_of::<PrevVertex>();

            if let Some(prev_buffer) = self.prev_vertex_buffer.as_mut() {
                prev_buffer.set_blob(bytemuck::cast_slice(&prev_vertex_data), byte_offset);
            } else {
                log::warn!(
                    "Registered vertex caches but no previous-position storage was allocated"
                );
            }
        }

        if cache.global_animation_length() < self.global_animation_length {
            cache.set_pre_infinity_behavior(Behavior::Cycle);
        }
        self.vertex_cache = Some(cache);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggles global animation looping, forwarding to the vertex cache.
    pub fn set_looped(&mut self, looped: bool) {
        self.loop_animations = looped;
        if let Some(cache) = self.vertex_cache.as_mut() {
            cache.set_looped(looped);
        }
    }

    #[must_use]
    pub fn is_looped(&self) -> bool {
        self.loop_animations
    }

    #[must_use]
    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    #[must_use]
    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    /// Length of the global animation loop: the longest clip duration.
    #[must_use]
    pub fn global_animation_length(&self) -> f64 {
        self.global_animation_length
    }

    /// Runs one frame of the update state machine.
    ///
    /// Returns whether any visible state changed, so the caller can skip
    /// redundant downstream rendering work.
    ///
    /// # Panics
    ///
    /// Panics if the graph's node count changed since construction.
    pub fn update(&mut self, graph: &mut SceneGraph, current_time: f64) -> bool {
        assert_eq!(
            graph.len(),
            self.local_matrices.len(),
            "scene graph size changed after controller construction"
        );

        self.matrices_changed.fill(false);

        // Poll edited scene nodes. The flags are consumed now so the steady
        // branch condition sees them, but the transform values are applied
        // after clip sampling: an edit wins over animation for the frame it
        // lands in.
        let mut edited = false;
        for i in 0..graph.len() {
            self.nodes_edited[i] = graph.take_edited(i);
            edited |= self.nodes_edited[i];
        }

        let mut changed = false;
        let time = if self.loop_animations && self.global_animation_length > 0.0 {
            current_time % self.global_animation_length
        } else {
            current_time
        };

        // Reinitialize on the first update and whenever the controller was
        // enabled or disabled since the last call: all data for the current
        // and previous frame is rebuilt, including transformation matrices
        // and dynamic vertex data.
        if self.first_update || self.enabled != self.prev_enabled {
            self.matrices_changed.fill(true);
            self.init_local_matrices(graph);
            if self.enabled {
                self.sample_local_matrices(graph, time);
                self.time = time;
                self.prev_time = time;
            }
            self.update_world_matrices(graph, true);
            self.upload_world_matrices(true);

            if !graph.is_empty() {
                if let Some(pair) = self.world_matrix_buffers.as_mut() {
                    pair.copy_current_to_previous();
                }
                if let Some(pair) = self.inv_transpose_world_matrix_buffers.as_mut() {
                    pair.copy_current_to_previous();
                }
                self.bind_buffers();
                self.request_skinning_dispatch(true);
            }

            if self.vertex_cache.is_some() {
                let cache_time = self.vertex_cache_time(current_time, time);
                let animate = self.enabled;
                if let Some(cache) = self.vertex_cache.as_mut() {
                    if animate && cache.has_animations() {
                        cache.animate(cache_time);
                    }
                    cache.copy_to_prev_vertices();
                }
            }

            self.first_update = false;
            self.prev_enabled = self.enabled;
            changed = true;
        }

        // Incremental update: runs when a node was edited this call, or when
        // animation is enabled and the processed time differs from either of
        // the last two recorded values (the extra frame lets the previous
        // buffers settle after the last advance).
        if edited || (self.enabled && (time != self.time || self.time != self.prev_time)) {
            if edited || self.has_animations() {
                if let Some(pair) = self.world_matrix_buffers.as_mut() {
                    pair.swap();
                }
                if let Some(pair) = self.inv_transpose_world_matrix_buffers.as_mut() {
                    pair.swap();
                }
                self.sample_local_matrices(graph, time);
                self.update_world_matrices(graph, false);
                self.upload_world_matrices(false);
                self.bind_buffers();
                self.request_skinning_dispatch(false);
                changed = true;
            }

            let cache_time = self.vertex_cache_time(current_time, time);
            if let Some(cache) = self.vertex_cache.as_mut() {
                if cache.has_animations() {
                    cache.animate(cache_time);
                    changed = true;
                }
            }

            self.prev_time = self.time;
            self.time = time;
        }

        changed
    }

    /// The vertex cache follows the wrapped skeleton time, unless the
    /// skeleton has no clips at all, in which case the raw input time drives
    /// the baked playback directly.
    fn vertex_cache_time(&self, current_time: f64, time: f64) -> f64 {
        if self.global_animation_length == 0.0 {
            current_time
        } else {
            time
        }
    }

    fn init_local_matrices(&mut self, graph: &SceneGraph) {
        for (local, node) in self.local_matrices.iter_mut().zip(graph.nodes()) {
            *local = node.transform;
        }
    }

    /// Samples every clip at `time`, then applies polled node edits on top.
    fn sample_local_matrices(&mut self, graph: &SceneGraph, time: f64) {
        for animation in &self.animations {
            let index = animation.node().index();
            self.local_matrices[index] = animation.sample(time);
            self.matrices_changed[index] = true;
        }
        self.apply_edits(graph);
    }

    fn apply_edits(&mut self, graph: &SceneGraph) {
        for (i, node) in graph.nodes().iter().enumerate() {
            if self.nodes_edited[i] {
                self.local_matrices[i] = node.transform;
                self.matrices_changed[i] = true;
                self.nodes_edited[i] = false;
            }
        }
    }

    /// Composes world matrices in a single pass over the arena.
    ///
    /// Parents precede children by construction, so the changed flag is
    /// inherited down the hierarchy as a prefix and each node's parent world
    /// matrix is final when the node is visited. With `update_all` every node
    /// is recomputed regardless of its flag.
    fn update_world_matrices(&mut self, graph: &SceneGraph, update_all: bool) {
        for (i, node) in graph.nodes().iter().enumerate() {
            if let Some(parent) = node.parent {
                self.matrices_changed[i] =
                    self.matrices_changed[i] || self.matrices_changed[parent.index()];
            }

            if !self.matrices_changed[i] && !update_all {
                continue;
            }

            self.global_matrices[i] = self.local_matrices[i];
            if let Some(parent) = node.parent {
                self.global_matrices[i] =
                    self.global_matrices[parent.index()] * self.global_matrices[i];
            }

            self.inv_transpose_global_matrices[i] = self.global_matrices[i].inverse().transpose();

            if let Some(skinning) = self.skinning.as_mut() {
                let skinning_matrix = self.global_matrices[i] * node.local_to_bind_space;
                skinning.skinning_matrices[i] = skinning_matrix;
                skinning.inv_transpose_skinning_matrices[i] =
                    skinning_matrix.inverse().transpose();
            }
        }
    }

    /// Pushes world matrices into the current buffer slots.
    ///
    /// Steady-state frames upload one coalesced range per contiguous run of
    /// changed nodes instead of one write per node.
    fn upload_world_matrices(&mut self, upload_all: bool) {
        let (Some(world), Some(inv_transpose)) = (
            self.world_matrix_buffers.as_mut(),
            self.inv_transpose_world_matrix_buffers.as_mut(),
        ) else {
            return;
        };

        if upload_all {
            world.current_mut().write_all(&self.global_matrices);
            inv_transpose
                .current_mut()
                .write_all(&self.inv_transpose_global_matrices);
            return;
        }

        let mut i = 0;
        while i < self.global_matrices.len() {
            // Detect a run of consecutive matrices with the same flag value.
            let offset = i;
            let run_changed = self.matrices_changed[i];
            while i < self.global_matrices.len() && self.matrices_changed[i] == run_changed {
                i += 1;
            }

            if run_changed {
                let byte_offset = offset * MAT4_SIZE;
                world.current_mut().set_blob(
                    bytemuck::cast_slice(&self.global_matrices[offset..i]),
                    byte_offset,
                );
                inv_transpose.current_mut().set_blob(
                    bytemuck::cast_slice(&self.inv_transpose_global_matrices[offset..i]),
                    byte_offset,
                );
            }
        }
    }

    /// Publishes the four matrix buffer slots for the shading system.
    fn bind_buffers(&mut self) {
        let (Some(world), Some(inv_transpose)) = (
            self.world_matrix_buffers.as_ref(),
            self.inv_transpose_world_matrix_buffers.as_ref(),
        ) else {
            return;
        };

        let use_prev = self.enabled && self.has_animations();
        self.bindings = Some(MatrixBindings {
            world_matrices: world.current().id(),
            inverse_transpose_world_matrices: inv_transpose.current().id(),
            prev_world_matrices: if use_prev {
                world.previous().id()
            } else {
                world.current().id()
            },
            prev_inverse_transpose_world_matrices: if use_prev {
                inv_transpose.previous().id()
            } else {
                inv_transpose.current().id()
            },
        });
    }

    /// Re-uploads the skinning matrix arrays and records a dispatch request.
    ///
    /// Skinned node counts are small relative to total nodes, so the upload
    /// is always full; no run coalescing here. No-op without skinning data.
    fn request_skinning_dispatch(&mut self, init_prev: bool) {
        let Some(skinning) = self.skinning.as_mut() else {
            return;
        };
        skinning
            .skinning_matrices_buffer
            .write_all(&skinning.skinning_matrices);
        skinning
            .inv_transpose_skinning_matrices_buffer
            .write_all(&skinning.inv_transpose_skinning_matrices);
        self.pending_dispatch = Some(SkinningDispatch {
            vertex_count: skinning.dispatch_size,
            init_prev,
        });
    }

    /// Sum of all GPU buffer footprints owned by the controller, in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> u64 {
        let mut bytes = 0;
        if let Some(pair) = &self.world_matrix_buffers {
            bytes += pair.size();
        }
        if let Some(pair) = &self.inv_transpose_world_matrix_buffers {
            bytes += pair.size();
        }
        if let Some(skinning) = &self.skinning {
            bytes += skinning.skinning_matrices_buffer.size();
            bytes += skinning.inv_transpose_skinning_matrices_buffer.size();
            bytes += skinning.mesh_bind_matrices_buffer.size();
            bytes += skinning.mesh_inv_bind_matrices_buffer.size();
            bytes += skinning.skinning_vertex_buffer.size();
            bytes += skinning.static_vertex_buffer.size();
        }
        if let Some(buffer) = &self.prev_vertex_buffer {
            bytes += buffer.size();
        }
        if let Some(cache) = &self.vertex_cache {
            bytes += cache.memory_usage();
        }
        bytes
    }

    // ========================================================================
    // Frame-state accessors
    // ========================================================================

    /// Buffer slots published by the most recent update, if any ran.
    #[must_use]
    pub fn matrix_bindings(&self) -> Option<MatrixBindings> {
        self.bindings
    }

    #[must_use]
    pub fn local_matrices(&self) -> &[Mat4] {
        &self.local_matrices
    }

    #[must_use]
    pub fn global_matrices(&self) -> &[Mat4] {
        &self.global_matrices
    }

    #[must_use]
    pub fn inv_transpose_global_matrices(&self) -> &[Mat4] {
        &self.inv_transpose_global_matrices
    }

    /// Per-node changed flags from the most recent update.
    #[must_use]
    pub fn matrices_changed(&self) -> &[bool] {
        &self.matrices_changed
    }

    #[must_use]
    pub fn world_matrix_buffers(&self) -> Option<&TemporalPair> {
        self.world_matrix_buffers.as_ref()
    }

    pub fn world_matrix_buffers_mut(&mut self) -> Option<&mut TemporalPair> {
        self.world_matrix_buffers.as_mut()
    }

    #[must_use]
    pub fn inv_transpose_world_matrix_buffers(&self) -> Option<&TemporalPair> {
        self.inv_transpose_world_matrix_buffers.as_ref()
    }

    pub fn inv_transpose_world_matrix_buffers_mut(&mut self) -> Option<&mut TemporalPair> {
        self.inv_transpose_world_matrix_buffers.as_mut()
    }

    #[must_use]
    pub fn prev_vertex_buffer(&self) -> Option<&StructuredBuffer> {
        self.prev_vertex_buffer.as_ref()
    }

    pub(crate) fn prev_vertex_buffer_mut(&mut self) -> Option<&mut StructuredBuffer> {
        self.prev_vertex_buffer.as_mut()
    }

    #[must_use]
    pub fn has_skinning(&self) -> bool {
        self.skinning.is_some()
    }

    /// Per-node skinning matrices, when skinning data is present.
    #[must_use]
    pub fn skinning_matrices(&self) -> Option<&[Mat4]> {
        self.skinning
            .as_ref()
            .map(|skinning| skinning.skinning_matrices.as_slice())
    }

    #[must_use]
    pub fn inv_transpose_skinning_matrices(&self) -> Option<&[Mat4]> {
        self.skinning
            .as_ref()
            .map(|skinning| skinning.inv_transpose_skinning_matrices.as_slice())
    }

    pub(crate) fn skinning_mut(&mut self) -> Option<&mut SkinningData> {
        self.skinning.as_mut()
    }

    /// The dispatch recorded by the most recent update, if any.
    #[must_use]
    pub fn pending_dispatch(&self) -> Option<SkinningDispatch> {
        self.pending_dispatch
    }

    /// Drains the recorded dispatch request.
    pub fn take_pending_dispatch(&mut self) -> Option<SkinningDispatch> {
        self.pending_dispatch.take()
    }
}
