// asset/info.rs
use serde::{Deserialize, Serialize};

/// Identity of a render asset as recorded at keyframe-capture time.
/// The filepath doubles as the dedupe key in the [`ResourceCache`].
///
/// [`ResourceCache`]: super::ResourceCache
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    pub filepath: String,
}

/// Parameters for instantiating a loaded asset into an environment's
/// scene graph(s).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderAssetInstanceCreation {
    pub filepath: String,
    #[serde(default)]
    pub scale: Option<[f32; 3]>,
    /// Instance belongs in the visual (RGB/depth) scene graph.
    #[serde(default = "RenderAssetInstanceCreation::default_true")]
    pub is_rgbd: bool,
    /// Instance belongs in the semantic scene graph.
    #[serde(default)]
    pub is_semantic: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub light_setup_key: Option<String>,
}

impl RenderAssetInstanceCreation {
    fn default_true() -> bool {
        true
    }
}
