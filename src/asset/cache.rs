// asset/cache.rs
use super::{AssetInfo, RenderAssetInstanceCreation};
use crate::error::ReplayError;
use crate::gfx::LightSetup;
use crate::scene::{NodeId, SceneGraphId, SceneGraphStore, Transform};
use glam::Vec3;
use std::collections::HashMap;

/// A render asset held by the cache. Mesh/texture decoding happens in an
/// external loader; the cache only tracks identity and reuse.
#[derive(Debug)]
struct LoadedAsset {
    info: AssetInfo,
    instance_count: usize,
}

/// One placement of an asset into a specific scene graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstancePlacement {
    pub scene_graph_id: SceneGraphId,
    pub node: NodeId,
}

/// Shared loader/deduplicator of render assets, plus the global light
/// setup. One cache is shared by every environment; environments hold
/// graph ids and node ids, never cache contents.
#[derive(Default)]
pub struct ResourceCache {
    assets: HashMap<String, LoadedAsset>,
    outstanding_instances: usize,
    light_setup: LightSetup,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load (or reuse) the asset named by `info` and instantiate it into
    /// whichever of the two scene graphs the creation flags select. When
    /// the two ids are equal the instance is placed once.
    ///
    /// Returns the placements created, primary graph first.
    pub fn load_and_create_render_asset_instance(
        &mut self,
        info: &AssetInfo,
        creation: &RenderAssetInstanceCreation,
        store: &mut SceneGraphStore,
        scene_graph_id: SceneGraphId,
        semantic_scene_graph_id: SceneGraphId,
    ) -> Result<Vec<InstancePlacement>, ReplayError> {
        if info.filepath.is_empty() {
            return Err(ReplayError::Asset(
                "cannot instantiate asset with empty filepath".to_string(),
            ));
        }

        let asset = self
            .assets
            .entry(info.filepath.clone())
            .or_insert_with(|| {
                log::debug!("loading render asset {}", info.filepath);
                LoadedAsset {
                    info: info.clone(),
                    instance_count: 0,
                }
            });
        debug_assert_eq!(asset.info, *info);

        let mut target_graphs = Vec::with_capacity(2);
        if creation.is_rgbd {
            target_graphs.push(scene_graph_id);
        }
        if creation.is_semantic && semantic_scene_graph_id != scene_graph_id {
            target_graphs.push(semantic_scene_graph_id);
        } else if creation.is_semantic && !creation.is_rgbd {
            // Semantic-only instance in a shared graph still needs a node.
            target_graphs.push(scene_graph_id);
        }
        if target_graphs.is_empty() {
            return Err(ReplayError::Asset(format!(
                "instance of \"{}\" is neither RGBD nor semantic",
                creation.filepath
            )));
        }

        let mut placements = Vec::with_capacity(target_graphs.len());
        for graph_id in target_graphs {
            let graph = store.graph_mut(graph_id);
            let node = graph.create_child(graph.root());
            if let Some(scale) = creation.scale {
                let mut transform = Transform::IDENTITY;
                transform.scale = Vec3::from_array(scale);
                graph.node_mut(node).set_transform(transform);
            }
            placements.push(InstancePlacement {
                scene_graph_id: graph_id,
                node,
            });
            asset.instance_count += 1;
            self.outstanding_instances += 1;
        }
        Ok(placements)
    }

    /// Release one placement previously returned by
    /// [`load_and_create_render_asset_instance`].
    ///
    /// [`load_and_create_render_asset_instance`]: Self::load_and_create_render_asset_instance
    pub fn remove_instance(&mut self, placement: InstancePlacement, store: &mut SceneGraphStore) {
        store
            .graph_mut(placement.scene_graph_id)
            .remove_node(placement.node);
        assert!(
            self.outstanding_instances > 0,
            "remove_instance: no outstanding instances"
        );
        self.outstanding_instances -= 1;
    }

    pub fn set_light_setup(&mut self, lights: LightSetup) {
        self.light_setup = lights;
    }

    pub fn light_setup(&self) -> &LightSetup {
        &self.light_setup
    }

    /// Number of distinct assets loaded so far (dedupe is by filepath).
    pub fn loaded_asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Instances created and not yet removed, across all environments.
    pub fn outstanding_instances(&self) -> usize {
        self.outstanding_instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creation(filepath: &str) -> RenderAssetInstanceCreation {
        RenderAssetInstanceCreation {
            filepath: filepath.to_string(),
            scale: None,
            is_rgbd: true,
            is_semantic: false,
            is_static: false,
            light_setup_key: None,
        }
    }

    #[test]
    fn same_asset_loads_once() {
        let mut cache = ResourceCache::new();
        let mut store = SceneGraphStore::new();
        let graph = store.init_scene_graph();
        let info = AssetInfo {
            filepath: "chair.glb".to_string(),
        };
        for _ in 0..3 {
            cache
                .load_and_create_render_asset_instance(
                    &info,
                    &creation("chair.glb"),
                    &mut store,
                    graph,
                    graph,
                )
                .expect("instantiate");
        }
        assert_eq!(cache.loaded_asset_count(), 1);
        assert_eq!(cache.outstanding_instances(), 3);
    }

    #[test]
    fn semantic_instance_lands_in_both_graphs_when_separate() {
        let mut cache = ResourceCache::new();
        let mut store = SceneGraphStore::new();
        let graph = store.init_scene_graph();
        let semantic = store.init_scene_graph();
        let info = AssetInfo {
            filepath: "wall.glb".to_string(),
        };
        let mut c = creation("wall.glb");
        c.is_semantic = true;
        let placements = cache
            .load_and_create_render_asset_instance(&info, &c, &mut store, graph, semantic)
            .expect("instantiate");
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].scene_graph_id, graph);
        assert_eq!(placements[1].scene_graph_id, semantic);
        assert_eq!(store.graph(graph).node_count(), 2);
        assert_eq!(store.graph(semantic).node_count(), 2);
    }

    #[test]
    fn semantic_instance_in_shared_graph_is_placed_once() {
        let mut cache = ResourceCache::new();
        let mut store = SceneGraphStore::new();
        let graph = store.init_scene_graph();
        let info = AssetInfo {
            filepath: "wall.glb".to_string(),
        };
        let mut c = creation("wall.glb");
        c.is_semantic = true;
        let placements = cache
            .load_and_create_render_asset_instance(&info, &c, &mut store, graph, graph)
            .expect("instantiate");
        assert_eq!(placements.len(), 1);
        assert_eq!(cache.outstanding_instances(), 1);
    }

    #[test]
    fn remove_instance_releases_node_and_count() {
        let mut cache = ResourceCache::new();
        let mut store = SceneGraphStore::new();
        let graph = store.init_scene_graph();
        let info = AssetInfo {
            filepath: "chair.glb".to_string(),
        };
        let placements = cache
            .load_and_create_render_asset_instance(
                &info,
                &creation("chair.glb"),
                &mut store,
                graph,
                graph,
            )
            .expect("instantiate");
        cache.remove_instance(placements[0], &mut store);
        assert_eq!(cache.outstanding_instances(), 0);
        assert_eq!(store.graph(graph).node_count(), 1);
    }

    #[test]
    fn empty_filepath_is_rejected() {
        let mut cache = ResourceCache::new();
        let mut store = SceneGraphStore::new();
        let graph = store.init_scene_graph();
        let info = AssetInfo {
            filepath: String::new(),
        };
        let result = cache.load_and_create_render_asset_instance(
            &info,
            &creation(""),
            &mut store,
            graph,
            graph,
        );
        assert!(result.is_err());
    }
}
