// scene/store.rs
use super::SceneGraph;

/// Opaque identifier for a scene graph owned by a [`SceneGraphStore`].
///
/// Components hold these small ids instead of references into the store,
/// so the store's backing vector may grow without invalidating anyone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneGraphId(usize);

/// Central owner of all scene graphs. Graphs are created up front and live
/// as long as the store; there is no removal.
#[derive(Default)]
pub struct SceneGraphStore {
    graphs: Vec<SceneGraph>,
}

impl SceneGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init_scene_graph(&mut self) -> SceneGraphId {
        let id = SceneGraphId(self.graphs.len());
        self.graphs.push(SceneGraph::new());
        id
    }

    pub fn graph(&self, id: SceneGraphId) -> &SceneGraph {
        &self.graphs[id.0]
    }

    pub fn graph_mut(&mut self, id: SceneGraphId) -> &mut SceneGraph {
        &mut self.graphs[id.0]
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_returns_distinct_ids() {
        let mut store = SceneGraphStore::new();
        let a = store.init_scene_graph();
        let b = store.init_scene_graph();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn graphs_are_independent() {
        let mut store = SceneGraphStore::new();
        let a = store.init_scene_graph();
        let b = store.init_scene_graph();
        let root_a = store.graph(a).root();
        store.graph_mut(a).create_child(root_a);
        assert_eq!(store.graph(a).node_count(), 2);
        assert_eq!(store.graph(b).node_count(), 1);
    }
}
