//! Baked per-vertex animation integration.
//!
//! Meshes and curves animated by precomputed vertex streams (rather than a
//! skeleton plus skinning) are owned by an external subsystem. The engine
//! only decides when that subsystem runs, owns the shared previous-position
//! storage, and reconciles looping behavior between the baked clips and the
//! skeleton-driven animation — the playback itself stays behind the
//! [`VertexCache`] trait.

use crate::animation::clip::Behavior;

/// Tessellation mode of a cached curve.
///
/// Linear-swept-sphere curves are ray-traced from their control points and
/// need no previous-position storage; every other mode is tessellated into a
/// mesh and participates like a cached mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveTessellation {
    LinearSweptSphere,
    PolyTube,
}

/// A mesh region animated by a baked vertex stream.
#[derive(Debug, Clone, Copy)]
pub struct CachedMesh {
    /// First vertex in the static vertex data.
    pub vertex_offset: u32,
    pub vertex_count: u32,
    /// Element offset of this region in the shared previous-position buffer.
    pub prev_offset: u32,
}

/// A curve region animated by a baked vertex stream.
#[derive(Debug, Clone, Copy)]
pub struct CachedCurve {
    pub tessellation: CurveTessellation,
    /// First vertex in the static vertex data.
    pub vertex_offset: u32,
    pub vertex_count: u32,
    /// Element offset of this region in the shared previous-position buffer.
    pub prev_offset: u32,
}

/// The external baked vertex-animation subsystem.
pub trait VertexCache {
    /// Length in seconds of the longest baked clip.
    fn global_animation_length(&self) -> f64;

    /// Whether any baked clips are registered.
    fn has_animations(&self) -> bool;

    /// Overrides the sampling policy applied before the baked time range.
    fn set_pre_infinity_behavior(&mut self, behavior: Behavior);

    /// Forwards the global looping toggle.
    fn set_looped(&mut self, looped: bool);

    /// Advances the baked playback to `time`.
    fn animate(&mut self, time: f64);

    /// Copies the current baked vertex data into previous-position storage.
    fn copy_to_prev_vertices(&mut self);

    /// GPU memory owned by the subsystem, in bytes.
    fn memory_usage(&self) -> u64;
}
