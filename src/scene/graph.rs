// scene/graph.rs
use super::Transform;
use glam::{Quat, Vec3};

/// Index of a node inside one scene graph's arena.
///
/// Ids stay valid for the lifetime of the graph; removed slots are
/// tombstoned, never reused, so a stale id can be detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub struct SceneNode {
    transform: Transform,
    parent: Option<NodeId>,
}

impl SceneNode {
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn translation(&self) -> Vec3 {
        self.transform.translation
    }

    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.transform.translation = translation;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }
}

/// A tree of transformable nodes, stored in a flat arena.
///
/// The root node exists from construction and cannot be removed.
pub struct SceneGraph {
    nodes: Vec<Option<SceneNode>>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(SceneNode {
                transform: Transform::IDENTITY,
                parent: None,
            })],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn create_child(&mut self, parent: NodeId) -> NodeId {
        assert!(
            self.contains(parent),
            "create_child: invalid parent node {:?}",
            parent
        );
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(SceneNode {
            transform: Transform::IDENTITY,
            parent: Some(parent),
        }));
        id
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        self.nodes
            .get(id.index())
            .and_then(|slot| slot.as_ref())
            .unwrap_or_else(|| panic!("node: invalid node {:?}", id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        self.nodes
            .get_mut(id.index())
            .and_then(|slot| slot.as_mut())
            .unwrap_or_else(|| panic!("node_mut: invalid node {:?}", id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.index()), Some(Some(_)))
    }

    /// Tombstone a node. The root is never removable.
    pub fn remove_node(&mut self, id: NodeId) {
        assert!(id.index() != 0, "remove_node: cannot remove the root node");
        assert!(self.contains(id), "remove_node: invalid node {:?}", id);
        self.nodes[id.index()] = None;
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_graph_has_only_root() {
        let graph = SceneGraph::new();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.node(graph.root()).parent().is_none());
    }

    #[test]
    fn create_child_links_parent() {
        let mut graph = SceneGraph::new();
        let child = graph.create_child(graph.root());
        assert_eq!(graph.node(child).parent(), Some(graph.root()));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn removed_node_is_gone_and_id_not_reused() {
        let mut graph = SceneGraph::new();
        let a = graph.create_child(graph.root());
        graph.remove_node(a);
        assert!(!graph.contains(a));
        let b = graph.create_child(graph.root());
        assert_ne!(a, b);
    }

    #[test]
    fn node_transform_round_trips() {
        let mut graph = SceneGraph::new();
        let child = graph.create_child(graph.root());
        let t = Vec3::new(1.0, 2.0, 3.0);
        let r = Quat::from_rotation_y(0.5);
        graph.node_mut(child).set_translation(t);
        graph.node_mut(child).set_rotation(r);
        assert_eq!(graph.node(child).translation(), t);
        assert_eq!(graph.node(child).rotation(), r);
    }

    #[test]
    #[should_panic]
    fn stale_node_id_panics() {
        let mut graph = SceneGraph::new();
        let a = graph.create_child(graph.root());
        graph.remove_node(a);
        graph.node(a);
    }
}
