// error.rs
use std::fmt;

/// Errors surfaced by the batch renderer and its replay machinery.
///
/// Out-of-range environment indices are not represented here; those are
/// caller bugs and fail hard via assertions instead.
#[derive(Debug)]
pub enum ReplayError {
    /// Malformed configuration detected before any resource was created.
    Config(String),
    /// A serialized keyframe could not be parsed.
    KeyframeParse { env_index: usize, message: String },
    /// Sensor transforms were requested before any keyframe was applied.
    NoKeyframe { env_index: usize },
    /// A named user transform was absent from the current keyframe.
    MissingUserTransform { env_index: usize, name: String },
    /// The resource cache rejected an asset load or instantiation.
    Asset(String),
    /// GPU context or renderer creation failed; the renderer is unusable.
    Gpu(String),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Config(msg) => write!(f, "configuration error: {}", msg),
            ReplayError::KeyframeParse { env_index, message } => write!(
                f,
                "failed to parse keyframe for environment {}: {}",
                env_index, message
            ),
            ReplayError::NoKeyframe { env_index } => write!(
                f,
                "set_sensor_transforms_from_keyframe: for environment {}, \
                 you have not yet called set_environment_keyframe",
                env_index
            ),
            ReplayError::MissingUserTransform { env_index, name } => write!(
                f,
                "set_sensor_transforms_from_keyframe: couldn't find user transform \
                 \"{}\" for environment {}",
                name, env_index
            ),
            ReplayError::Asset(msg) => write!(f, "asset error: {}", msg),
            ReplayError::Gpu(msg) => write!(f, "GPU error: {}", msg),
        }
    }
}

impl std::error::Error for ReplayError {}
