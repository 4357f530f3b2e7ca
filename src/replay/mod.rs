// replay/mod.rs

pub mod keyframe;
pub mod player;

pub use keyframe::{InstanceKey, Keyframe, UserTransform};
pub use player::{Player, ReplayContext};
