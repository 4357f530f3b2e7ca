// config.rs
use crate::error::ReplayError;
use crate::sensor::SensorSpec;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Construction-time configuration for [`ReplayBatchRenderer`].
///
/// [`ReplayBatchRenderer`]: crate::ReplayBatchRenderer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRendererConfiguration {
    #[serde(default = "BatchRendererConfiguration::default_num_environments")]
    pub num_environments: usize,
    /// Instantiated once per environment, in order.
    #[serde(default)]
    pub sensor_specifications: Vec<SensorSpec>,
    /// Give every environment a second scene graph dedicated to semantic
    /// geometry even when the visual graph could hold it.
    #[serde(default)]
    pub force_separate_semantic_scene_graph: bool,
    #[serde(default)]
    pub gpu_device_id: i32,
    #[serde(default = "BatchRendererConfiguration::default_true")]
    pub enable_background_renderer: bool,
    #[serde(default)]
    pub leave_context_with_background_renderer: bool,
    /// Skip GPU context and renderer creation entirely. Replay and scene
    /// state still work; only observation rendering is unavailable. Used
    /// by pure-logic tests and by tools that only inspect replayed state.
    #[serde(default = "BatchRendererConfiguration::default_true")]
    pub create_renderer: bool,
}

impl Default for BatchRendererConfiguration {
    fn default() -> Self {
        Self {
            num_environments: Self::default_num_environments(),
            sensor_specifications: Vec::new(),
            force_separate_semantic_scene_graph: false,
            gpu_device_id: 0,
            enable_background_renderer: true,
            leave_context_with_background_renderer: false,
            create_renderer: true,
        }
    }
}

impl BatchRendererConfiguration {
    fn default_num_environments() -> usize {
        1
    }

    fn default_true() -> bool {
        true
    }

    pub fn validate(&self) -> Result<(), ReplayError> {
        if self.num_environments == 0 {
            return Err(ReplayError::Config(
                "num_environments must be positive".to_string(),
            ));
        }
        if self.leave_context_with_background_renderer && !self.enable_background_renderer {
            return Err(ReplayError::Config(
                "leave_context_with_background_renderer requires enable_background_renderer"
                    .to_string(),
            ));
        }
        let mut names: Vec<&str> = self
            .sensor_specifications
            .iter()
            .map(|spec| spec.uuid.as_str())
            .collect();
        names.sort_unstable();
        for pair in names.windows(2) {
            if pair[0] == pair[1] {
                return Err(ReplayError::Config(format!(
                    "duplicate sensor uuid \"{}\" in sensor specifications",
                    pair[0]
                )));
            }
        }
        Ok(())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            warn!("failed to read {:?}: {}", path, err);
            ReplayError::Config(format!("cannot read {:?}: {}", path, err))
        })?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|err| ReplayError::Config(format!("cannot parse {:?}: {}", path, err)))?;
        config.validate()?;
        info!("loaded batch renderer configuration from {:?}", path);
        Ok(config)
    }
}
