pub mod cache;
pub mod info;

pub use cache::{InstancePlacement, ResourceCache};
pub use info::{AssetInfo, RenderAssetInstanceCreation};
