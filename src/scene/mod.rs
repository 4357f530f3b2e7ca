// scene/mod.rs

pub mod graph;
pub mod store;
pub mod transform;

pub use graph::{NodeId, SceneGraph, SceneNode};
pub use store::{SceneGraphId, SceneGraphStore};
pub use transform::Transform;
