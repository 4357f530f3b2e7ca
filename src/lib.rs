pub mod asset;
pub mod batch_renderer;
pub mod config;
pub mod error;
pub mod gfx;
pub mod replay;
pub mod scene;
pub mod sensor;

pub use asset::{AssetInfo, RenderAssetInstanceCreation, ResourceCache};
pub use batch_renderer::ReplayBatchRenderer;
pub use config::BatchRendererConfiguration;
pub use error::ReplayError;
pub use replay::{Keyframe, Player};
pub use scene::{NodeId, SceneGraph, SceneGraphId, SceneGraphStore, Transform};
pub use sensor::{SensorSpec, SensorSuite, SensorType};

pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}
