//! Animation
//!
//! Keyframed per-node animation and the per-frame update engine:
//! - `tracks`: generic keyframe channel sampling
//! - `clip`: a per-node animation clip with infinity behaviors
//! - `controller`: the per-frame transform/skinning update state machine
//! - `vertex_cache`: integration seam for baked per-vertex animation

pub mod clip;
pub mod controller;
pub mod tracks;
pub mod vertex_cache;

pub use clip::{Animation, Behavior};
pub use controller::{AnimationController, MatrixBindings};
pub use tracks::{InterpolationMode, KeyframeTrack};
pub use vertex_cache::VertexCache;
