//! Scene graph store
//!
//! The ordered node arena the animation engine runs against:
//! - `SceneGraph`: node sequence with parent links, bind transforms and
//!   edit notifications
//! - `SceneNode`: a single hierarchy entry
//! - `NodeId`: strongly-typed node index
//! - `Trs`: decomposed local transform value

pub mod graph;
pub mod transform;

pub use graph::{NodeId, SceneGraph, SceneNode};
pub use transform::Trs;
