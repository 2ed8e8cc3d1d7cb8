#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod errors;
pub mod scene;
pub mod animation;
pub mod gpu;

pub use animation::{Animation, AnimationController, Behavior, MatrixBindings};
pub use animation::controller::{PrevVertex, SkinningVertex, StaticVertex};
pub use animation::vertex_cache::{CachedCurve, CachedMesh, CurveTessellation, VertexCache};
pub use errors::{Result, RigError};
pub use gpu::{GpuContext, ResourceManager, SkinningPass, StructuredBuffer, TemporalPair};
pub use scene::{NodeId, SceneGraph, SceneNode, Trs};
