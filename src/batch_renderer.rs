// batch_renderer.rs
//
// The orchestration layer: N independent replay environments sharing one
// resource cache, one scene graph store, and one GPU renderer.

use crate::asset::{AssetInfo, InstancePlacement, RenderAssetInstanceCreation, ResourceCache};
use crate::config::BatchRendererConfiguration;
use crate::error::ReplayError;
use crate::gfx::{LightSetup, Renderer, RendererFlags, WindowlessContext};
use crate::replay::{Keyframe, Player, ReplayContext};
use crate::scene::{NodeId, SceneGraph, SceneGraphId, SceneGraphStore};
use crate::sensor::{self, SensorSuite};
use glam::{Quat, Vec3};

/// Per-environment bundle: replay state, graph ids, and sensors.
/// Created once at construction; the count never changes afterwards.
struct EnvironmentRecord {
    player: Player,
    scene_graph_id: SceneGraphId,
    semantic_scene_graph_id: SceneGraphId,
    sensor_parent_node: NodeId,
    sensor_suite: SensorSuite,
}

/// Explicit replay context for one environment. Built fresh for each
/// player call so the mutable borrows of the shared cache and store stay
/// scoped to that call, with the environment's graph ids carried along
/// instead of captured.
struct EnvironmentReplayContext<'a> {
    cache: &'a mut ResourceCache,
    store: &'a mut SceneGraphStore,
    scene_graph_id: SceneGraphId,
    semantic_scene_graph_id: SceneGraphId,
}

impl ReplayContext for EnvironmentReplayContext<'_> {
    fn create_render_asset_instance(
        &mut self,
        info: &AssetInfo,
        creation: &RenderAssetInstanceCreation,
    ) -> Result<Vec<InstancePlacement>, ReplayError> {
        self.cache.load_and_create_render_asset_instance(
            info,
            creation,
            self.store,
            self.scene_graph_id,
            self.semantic_scene_graph_id,
        )
    }

    fn remove_instance(&mut self, placement: InstancePlacement) {
        self.cache.remove_instance(placement, self.store);
    }

    fn set_instance_pose(
        &mut self,
        placement: InstancePlacement,
        translation: Vec3,
        rotation: Quat,
    ) {
        let node = self
            .store
            .graph_mut(placement.scene_graph_id)
            .node_mut(placement.node);
        node.set_translation(translation);
        node.set_rotation(rotation);
    }

    fn set_light_setup(&mut self, lights: LightSetup) {
        self.cache.set_light_setup(lights);
    }
}

/// Replays recorded keyframes into N parallel environments against a
/// single shared GPU backend.
///
/// All operations are synchronous and expect a single logical control
/// thread; there is no internal locking. Environment indices are a
/// caller contract: out-of-range indices panic rather than return an
/// error.
pub struct ReplayBatchRenderer {
    envs: Vec<EnvironmentRecord>,
    scene_graph_store: SceneGraphStore,
    resource_cache: ResourceCache,
    renderer: Option<Renderer>,
}

impl ReplayBatchRenderer {
    pub fn new(config: BatchRendererConfiguration) -> Result<Self, ReplayError> {
        config.validate()?;

        let mut scene_graph_store = SceneGraphStore::new();
        let resource_cache = ResourceCache::new();
        let mut envs = Vec::with_capacity(config.num_environments);

        for env_index in 0..config.num_environments {
            let scene_graph_id = scene_graph_store.init_scene_graph();
            let semantic_scene_graph_id = if config.force_separate_semantic_scene_graph {
                scene_graph_store.init_scene_graph()
            } else {
                scene_graph_id
            };

            let graph = scene_graph_store.graph_mut(scene_graph_id);
            let sensor_parent_node = graph.create_child(graph.root());
            let sensor_suite = sensor::create_sensors(
                graph,
                sensor_parent_node,
                &config.sensor_specifications,
            )?;

            log::debug!(
                "environment {}: graph {:?}, semantic graph {:?}, {} sensor(s)",
                env_index,
                scene_graph_id,
                semantic_scene_graph_id,
                sensor_suite.len()
            );

            envs.push(EnvironmentRecord {
                player: Player::new(),
                scene_graph_id,
                semantic_scene_graph_id,
                sensor_parent_node,
                sensor_suite,
            });
        }

        let renderer = if config.create_renderer {
            let context = WindowlessContext::new(config.gpu_device_id)?;

            let mut flags = RendererFlags::empty();
            if config.enable_background_renderer {
                flags |= RendererFlags::BACKGROUND_RENDERER;
            }
            if config.leave_context_with_background_renderer {
                flags |= RendererFlags::LEAVE_CONTEXT_WITH_BACKGROUND_RENDERER;
            }
            if !flags.contains(RendererFlags::BACKGROUND_RENDERER) && config.num_environments > 1 {
                log::debug!(
                    "ReplayBatchRenderer created without a background renderer. \
                     Multiple environments require a background renderer."
                );
            }

            let renderer = Renderer::new(context, flags)?;
            renderer.acquire_gpu_context();
            Some(renderer)
        } else {
            log::debug!("create_renderer disabled; running without a GPU backend");
            None
        };

        Ok(Self {
            envs,
            scene_graph_store,
            resource_cache,
            renderer,
        })
    }

    pub fn num_environments(&self) -> usize {
        self.envs.len()
    }

    /// Parse `serialized` and make it the environment's single current
    /// keyframe, instantiating its assets into the environment's scene
    /// graph(s). Any previously held keyframe and its instances are
    /// discarded first.
    pub fn set_environment_keyframe(
        &mut self,
        env_index: usize,
        serialized: &str,
    ) -> Result<(), ReplayError> {
        self.check_env_index(env_index);
        let keyframe =
            Keyframe::from_string(serialized).map_err(|err| ReplayError::KeyframeParse {
                env_index,
                message: err.to_string(),
            })?;

        let env = &mut self.envs[env_index];
        let mut ctx = EnvironmentReplayContext {
            cache: &mut self.resource_cache,
            store: &mut self.scene_graph_store,
            scene_graph_id: env.scene_graph_id,
            semantic_scene_graph_id: env.semantic_scene_graph_id,
        };
        env.player.set_single_keyframe(keyframe, &mut ctx)
    }

    /// Position every sensor of the environment from the user transforms
    /// of its current keyframe, looked up as `prefix + sensor_name`.
    ///
    /// Sensors updated before a missing-transform failure keep their new
    /// pose; callers needing atomicity must pre-validate the keyframe.
    pub fn set_sensor_transforms_from_keyframe(
        &mut self,
        env_index: usize,
        prefix: &str,
    ) -> Result<(), ReplayError> {
        self.check_env_index(env_index);
        let env = &self.envs[env_index];
        if env.player.num_keyframes() != 1 {
            return Err(ReplayError::NoKeyframe { env_index });
        }
        for (sensor_name, sensor) in &env.sensor_suite {
            let user_name = format!("{}{}", prefix, sensor_name);
            let (translation, rotation) = env.player.user_transform(&user_name).ok_or(
                ReplayError::MissingUserTransform {
                    env_index,
                    name: user_name,
                },
            )?;
            let node = self
                .scene_graph_store
                .graph_mut(env.scene_graph_id)
                .node_mut(sensor.node());
            node.set_rotation(rotation);
            node.set_translation(translation);
        }
        Ok(())
    }

    /// Instantiate an asset directly into environment `env_index`'s scene
    /// graph(s) through the shared cache. During keyframe replay this
    /// same routing happens through the player's replay context.
    pub fn load_and_create_render_asset_instance(
        &mut self,
        env_index: usize,
        info: &AssetInfo,
        creation: &RenderAssetInstanceCreation,
    ) -> Result<Vec<InstancePlacement>, ReplayError> {
        self.check_env_index(env_index);
        let env = &self.envs[env_index];
        self.resource_cache.load_and_create_render_asset_instance(
            info,
            creation,
            &mut self.scene_graph_store,
            env.scene_graph_id,
            env.semantic_scene_graph_id,
        )
    }

    pub fn environment_sensor_parent_node(&self, env_index: usize) -> NodeId {
        self.check_env_index(env_index);
        self.envs[env_index].sensor_parent_node
    }

    pub fn environment_sensors(&self, env_index: usize) -> &SensorSuite {
        self.check_env_index(env_index);
        &self.envs[env_index].sensor_suite
    }

    pub fn scene_graph_id(&self, env_index: usize) -> SceneGraphId {
        self.check_env_index(env_index);
        self.envs[env_index].scene_graph_id
    }

    pub fn semantic_scene_graph_id(&self, env_index: usize) -> SceneGraphId {
        self.check_env_index(env_index);
        self.envs[env_index].semantic_scene_graph_id
    }

    pub fn scene_graph(&self, env_index: usize) -> &SceneGraph {
        self.scene_graph_store.graph(self.scene_graph_id(env_index))
    }

    pub fn semantic_scene_graph(&self, env_index: usize) -> &SceneGraph {
        self.scene_graph_store
            .graph(self.semantic_scene_graph_id(env_index))
    }

    pub fn resource_cache(&self) -> &ResourceCache {
        &self.resource_cache
    }

    pub fn renderer(&self) -> Option<&Renderer> {
        self.renderer.as_ref()
    }

    /// Tear down all environments: close every player (releasing its
    /// asset instances from the shared cache) and delete every sensor,
    /// in environment index order. Idempotent; also runs on drop. The
    /// shared cache itself outlives this call and is only dropped with
    /// the renderer.
    pub fn close(&mut self) {
        for env_index in 0..self.envs.len() {
            let env = &mut self.envs[env_index];
            let mut ctx = EnvironmentReplayContext {
                cache: &mut self.resource_cache,
                store: &mut self.scene_graph_store,
                scene_graph_id: env.scene_graph_id,
                semantic_scene_graph_id: env.semantic_scene_graph_id,
            };
            env.player.close(&mut ctx);

            let graph = self.scene_graph_store.graph_mut(env.scene_graph_id);
            for s in env.sensor_suite.values() {
                sensor::delete_sensor(graph, s);
            }
            env.sensor_suite.clear();
        }
    }

    fn check_env_index(&self, env_index: usize) {
        assert!(
            env_index < self.envs.len(),
            "environment index {} out of range (num_environments = {})",
            env_index,
            self.envs.len()
        );
    }
}

impl Drop for ReplayBatchRenderer {
    fn drop(&mut self) {
        log::debug!("deconstructing ReplayBatchRenderer");
        self.close();
        let outstanding = self.resource_cache.outstanding_instances();
        if outstanding > 0 {
            // Instances created outside a player are the caller's to release.
            log::warn!("{} asset instance(s) still outstanding at teardown", outstanding);
        }
    }
}
