// sensor/spec.rs
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SensorType {
    #[default]
    Color,
    Depth,
    Semantic,
}

/// Description of one sensor to instantiate per environment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSpec {
    /// Unique name within an environment, e.g. "rgb" or "left_depth".
    pub uuid: String,
    #[serde(default)]
    pub sensor_type: SensorType,
    #[serde(default = "SensorSpec::default_resolution")]
    pub resolution: [u32; 2],
    /// Initial pose relative to the sensor-parent node.
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles (XYZ, radians) for the initial orientation.
    #[serde(default)]
    pub orientation: [f32; 3],
}

impl SensorSpec {
    pub fn new(uuid: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            uuid: uuid.into(),
            sensor_type,
            resolution: Self::default_resolution(),
            position: [0.0; 3],
            orientation: [0.0; 3],
        }
    }

    fn default_resolution() -> [u32; 2] {
        [640, 480]
    }
}
