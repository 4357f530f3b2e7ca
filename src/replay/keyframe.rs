// replay/keyframe.rs
use crate::asset::{AssetInfo, RenderAssetInstanceCreation};
use crate::gfx::LightInfo;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key identifying one asset instance across the directives of a keyframe
/// stream. Assigned by whatever recorded the keyframe.
pub type InstanceKey = u64;

/// A named pose recorded at capture time, used to reposition sensors
/// during replay. Rotation is a quaternion as `[x, y, z, w]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTransform {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
}

impl UserTransform {
    pub fn translation_vec(&self) -> Vec3 {
        Vec3::from_array(self.translation)
    }

    pub fn rotation_quat(&self) -> Quat {
        Quat::from_array(self.rotation)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceCreation {
    pub instance_key: InstanceKey,
    pub asset: AssetInfo,
    pub creation: RenderAssetInstanceCreation,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceState {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdate {
    pub instance_key: InstanceKey,
    pub state: InstanceState,
}

/// One serialized snapshot of asset placements, poses, and lighting.
///
/// The wire format is JSON with camelCase keys; every field is optional
/// so partial keyframes from older recorders still parse.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Keyframe {
    pub creations: Vec<InstanceCreation>,
    pub deletions: Vec<InstanceKey>,
    pub state_updates: Vec<StateUpdate>,
    pub lights: Option<Vec<LightInfo>>,
    pub user_transforms: HashMap<String, UserTransform>,
}

impl Keyframe {
    pub fn from_string(serialized: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(serialized)
    }

    pub fn to_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_a_valid_keyframe() {
        let kf = Keyframe::from_string("{}").expect("parse");
        assert!(kf.creations.is_empty());
        assert!(kf.user_transforms.is_empty());
        assert!(kf.lights.is_none());
    }

    #[test]
    fn full_keyframe_parses() {
        let json = r#"{
            "creations": [
                {"instanceKey": 7,
                 "asset": {"filepath": "chair.glb"},
                 "creation": {"filepath": "chair.glb", "isSemantic": true}}
            ],
            "deletions": [3],
            "stateUpdates": [
                {"instanceKey": 7,
                 "state": {"translation": [1.0, 0.0, 0.0],
                           "rotation": [0.0, 0.0, 0.0, 1.0]}}
            ],
            "lights": [{"vector": [0.0, -1.0, 0.0], "model": "directional"}],
            "userTransforms": {
                "sensor_rgb": {"translation": [0.0, 1.5, 0.0],
                               "rotation": [0.0, 0.0, 0.0, 1.0]}
            }
        }"#;
        let kf = Keyframe::from_string(json).expect("parse");
        assert_eq!(kf.creations.len(), 1);
        assert_eq!(kf.creations[0].instance_key, 7);
        assert_eq!(kf.deletions, vec![3]);
        assert_eq!(kf.state_updates.len(), 1);
        assert_eq!(kf.lights.as_ref().map(Vec::len), Some(1));
        let ut = &kf.user_transforms["sensor_rgb"];
        assert_eq!(ut.translation_vec(), Vec3::new(0.0, 1.5, 0.0));
        assert_eq!(ut.rotation_quat(), Quat::IDENTITY);
    }

    #[test]
    fn malformed_blob_is_a_parse_error() {
        assert!(Keyframe::from_string("not json").is_err());
        assert!(Keyframe::from_string(r#"{"creations": 5}"#).is_err());
    }
}
