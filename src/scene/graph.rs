//! Scene graph store.
//!
//! An ordered node arena. Nodes are identified by their dense index, and the
//! sequence is required to list every parent before its children, so a single
//! linear pass over the arena visits the hierarchy in dependency order. The
//! ordering is validated once at construction, never re-derived per frame.

use glam::Mat4;

use crate::scene::transform::Trs;

/// Strongly-typed index of a node in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single entry in the transform hierarchy.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Parent node, `None` for roots. Must precede this node in the arena.
    pub parent: Option<NodeId>,
    /// Authoritative local transform.
    pub transform: Mat4,
    /// Maps this node's local space into the skinning bind space.
    pub local_to_bind_space: Mat4,
    /// Bind transform of the mesh attached to this node (mesh → bind space).
    pub mesh_bind: Mat4,
}

impl SceneNode {
    #[must_use]
    pub fn new(parent: Option<NodeId>, transform: Mat4) -> Self {
        Self {
            parent,
            transform,
            local_to_bind_space: Mat4::IDENTITY,
            mesh_bind: Mat4::IDENTITY,
        }
    }

    #[must_use]
    pub fn with_bind_transforms(mut self, local_to_bind_space: Mat4, mesh_bind: Mat4) -> Self {
        self.local_to_bind_space = local_to_bind_space;
        self.mesh_bind = mesh_bind;
        self
    }
}

/// Ordered node sequence with edit notifications.
///
/// Local transform overrides land here via [`SceneGraph::set_local_transform`]
/// and raise a per-node edited flag. The animation engine polls and clears the
/// flags once per frame.
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    edited: Vec<bool>,
}

impl SceneGraph {
    /// Builds the store from an ordered node sequence.
    ///
    /// # Panics
    ///
    /// Panics if the node count exceeds 32-bit addressing or if any node
    /// appears before its parent. Both indicate a malformed scene.
    #[must_use]
    pub fn new(nodes: Vec<SceneNode>) -> Self {
        assert!(
            u32::try_from(nodes.len()).is_ok(),
            "scene graph exceeds 32-bit node addressing ({} nodes)",
            nodes.len()
        );
        for (i, node) in nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                assert!(
                    parent.index() < i,
                    "scene graph node {i} is listed before its parent {}",
                    parent.index()
                );
            }
        }

        let edited = vec![false; nodes.len()];
        Self { nodes, edited }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.index()]
    }

    #[must_use]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Overrides a node's local transform from a decomposed TRS value and
    /// marks the node edited for the next animation update.
    pub fn set_local_transform(&mut self, node: NodeId, transform: &Trs) {
        self.nodes[node.index()].transform = transform.to_matrix();
        self.edited[node.index()] = true;
    }

    /// Returns and clears the edited flag for one node.
    pub(crate) fn take_edited(&mut self, index: usize) -> bool {
        std::mem::take(&mut self.edited[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn construction_accepts_parent_before_child() {
        let root = SceneNode::new(None, Mat4::IDENTITY);
        let child = SceneNode::new(Some(NodeId::new(0)), Mat4::IDENTITY);
        let graph = SceneGraph::new(vec![root, child]);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    #[should_panic(expected = "listed before its parent")]
    fn construction_rejects_child_before_parent() {
        let child = SceneNode::new(Some(NodeId::new(1)), Mat4::IDENTITY);
        let root = SceneNode::new(None, Mat4::IDENTITY);
        let _ = SceneGraph::new(vec![child, root]);
    }

    #[test]
    fn edit_sets_flag_and_transform_until_polled() {
        let mut graph = SceneGraph::new(vec![SceneNode::new(None, Mat4::IDENTITY)]);

        let trs = Trs::from_translation(Vec3::new(1.0, 2.0, 3.0));
        graph.set_local_transform(NodeId::new(0), &trs);

        assert_eq!(graph.node(NodeId::new(0)).transform, trs.to_matrix());
        assert!(graph.take_edited(0));
        assert!(!graph.take_edited(0));
    }
}
