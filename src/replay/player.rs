// replay/player.rs
use super::keyframe::{InstanceKey, Keyframe};
use crate::asset::{AssetInfo, InstancePlacement, RenderAssetInstanceCreation};
use crate::error::ReplayError;
use crate::gfx::LightSetup;
use glam::{Quat, Vec3};
use std::collections::HashMap;

/// The environment-side operations a [`Player`] drives while replaying a
/// keyframe. The orchestrator passes an explicit context per call instead
/// of the player capturing references at construction, which keeps the
/// borrow of the shared cache and scene-graph store local to each replay.
pub trait ReplayContext {
    fn create_render_asset_instance(
        &mut self,
        info: &AssetInfo,
        creation: &RenderAssetInstanceCreation,
    ) -> Result<Vec<InstancePlacement>, ReplayError>;

    fn remove_instance(&mut self, placement: InstancePlacement);

    fn set_instance_pose(&mut self, placement: InstancePlacement, translation: Vec3, rotation: Quat);

    fn set_light_setup(&mut self, lights: LightSetup);
}

/// Stateful replay engine for one environment.
///
/// Holds at most one "current" keyframe. Each [`set_single_keyframe`]
/// fully replaces the previous one: every instance the prior keyframe
/// created is removed before the new keyframe's directives run, so a
/// keyframe is always a complete snapshot, never a delta on top of stale
/// state.
///
/// [`set_single_keyframe`]: Self::set_single_keyframe
#[derive(Default)]
pub struct Player {
    keyframe: Option<Keyframe>,
    instances: HashMap<InstanceKey, Vec<InstancePlacement>>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyframes currently held: 0 before the first apply, 1 after.
    pub fn num_keyframes(&self) -> usize {
        usize::from(self.keyframe.is_some())
    }

    /// Look up a named user transform in the current keyframe.
    pub fn user_transform(&self, name: &str) -> Option<(Vec3, Quat)> {
        let kf = self.keyframe.as_ref()?;
        kf.user_transforms
            .get(name)
            .map(|ut| (ut.translation_vec(), ut.rotation_quat()))
    }

    /// Asset instances currently alive from the held keyframe.
    pub fn num_instances(&self) -> usize {
        self.instances.values().map(Vec::len).sum()
    }

    /// Replace all replay state with `keyframe`, applying its directives
    /// through `ctx`.
    ///
    /// On a creation failure the player ends up holding zero keyframes;
    /// instances created before the failure stay recorded and are released
    /// by the next successful apply or by [`close`].
    ///
    /// [`close`]: Self::close
    pub fn set_single_keyframe(
        &mut self,
        keyframe: Keyframe,
        ctx: &mut dyn ReplayContext,
    ) -> Result<(), ReplayError> {
        self.clear_frame(ctx);

        for creation in &keyframe.creations {
            if self.instances.contains_key(&creation.instance_key) {
                return Err(ReplayError::Asset(format!(
                    "keyframe contains duplicate instance key {}",
                    creation.instance_key
                )));
            }
            let placements =
                ctx.create_render_asset_instance(&creation.asset, &creation.creation)?;
            self.instances.insert(creation.instance_key, placements);
        }

        for key in &keyframe.deletions {
            match self.instances.remove(key) {
                Some(placements) => {
                    for placement in placements {
                        ctx.remove_instance(placement);
                    }
                }
                None => log::warn!("keyframe deletes unknown instance key {}", key),
            }
        }

        for update in &keyframe.state_updates {
            match self.instances.get(&update.instance_key) {
                Some(placements) => {
                    let translation = Vec3::from_array(update.state.translation);
                    let rotation = Quat::from_array(update.state.rotation);
                    for placement in placements {
                        ctx.set_instance_pose(*placement, translation, rotation);
                    }
                }
                None => log::warn!(
                    "keyframe updates unknown instance key {}",
                    update.instance_key
                ),
            }
        }

        if let Some(lights) = &keyframe.lights {
            ctx.set_light_setup(LightSetup {
                lights: lights.clone(),
            });
        }

        self.keyframe = Some(keyframe);
        Ok(())
    }

    /// Release all instances and the held keyframe.
    pub fn close(&mut self, ctx: &mut dyn ReplayContext) {
        self.clear_frame(ctx);
    }

    fn clear_frame(&mut self, ctx: &mut dyn ReplayContext) {
        for (_, placements) in self.instances.drain() {
            for placement in placements {
                ctx.remove_instance(placement);
            }
        }
        self.keyframe = None;
    }
}
