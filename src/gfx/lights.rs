// gfx/lights.rs
use serde::{Deserialize, Serialize};

/// How a light's `vector` field is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LightPositionModel {
    /// `vector` is a world-space position.
    #[default]
    Global,
    /// `vector` is a direction the light travels (directional light).
    Directional,
}

/// One light as recorded in a keyframe.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightInfo {
    pub vector: [f32; 3],
    #[serde(default = "LightInfo::default_color")]
    pub color: [f32; 3],
    #[serde(default)]
    pub model: LightPositionModel,
}

impl LightInfo {
    fn default_color() -> [f32; 3] {
        [1.0, 1.0, 1.0]
    }
}

/// The global light setup shared by every environment's render pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LightSetup {
    pub lights: Vec<LightInfo>,
}

impl LightSetup {
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_info_defaults_fill_in() {
        let light: LightInfo =
            serde_json::from_str(r#"{"vector": [0.0, 1.0, 0.0]}"#).expect("parse");
        assert_eq!(light.color, [1.0, 1.0, 1.0]);
        assert_eq!(light.model, LightPositionModel::Global);
    }

    #[test]
    fn directional_model_round_trips() {
        let light = LightInfo {
            vector: [0.0, -1.0, 0.0],
            color: [0.5, 0.5, 0.5],
            model: LightPositionModel::Directional,
        };
        let json = serde_json::to_string(&light).expect("serialize");
        let back: LightInfo = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, light);
    }
}
