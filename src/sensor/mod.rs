// sensor/mod.rs

pub mod spec;

pub use spec::{SensorSpec, SensorType};

use crate::error::ReplayError;
use crate::scene::{NodeId, SceneGraph};
use glam::{EulerRot, Quat, Vec3};
use std::collections::BTreeMap;

/// A sensor wired into a scene graph. The node is owned by the graph; the
/// sensor only remembers which node carries its pose.
#[derive(Debug)]
pub struct Sensor {
    spec: SensorSpec,
    node: NodeId,
}

impl Sensor {
    pub fn spec(&self) -> &SensorSpec {
        &self.spec
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Per-environment sensors, keyed by unique name.
pub type SensorSuite = BTreeMap<String, Sensor>;

/// Instantiate sensors from `specs`, each on a fresh node under `parent`.
///
/// Fails on an empty or duplicate sensor name before touching the graph
/// for the offending spec.
pub fn create_sensors(
    graph: &mut SceneGraph,
    parent: NodeId,
    specs: &[SensorSpec],
) -> Result<SensorSuite, ReplayError> {
    let mut suite = SensorSuite::new();
    for spec in specs {
        if spec.uuid.is_empty() {
            return Err(ReplayError::Config(
                "sensor specification has an empty uuid".to_string(),
            ));
        }
        if suite.contains_key(&spec.uuid) {
            return Err(ReplayError::Config(format!(
                "duplicate sensor uuid \"{}\"",
                spec.uuid
            )));
        }
        let node = graph.create_child(parent);
        let [rx, ry, rz] = spec.orientation;
        graph
            .node_mut(node)
            .set_translation(Vec3::from_array(spec.position));
        graph
            .node_mut(node)
            .set_rotation(Quat::from_euler(EulerRot::XYZ, rx, ry, rz));
        suite.insert(
            spec.uuid.clone(),
            Sensor {
                spec: spec.clone(),
                node,
            },
        );
    }
    Ok(suite)
}

/// Release a sensor's node from its graph.
pub fn delete_sensor(graph: &mut SceneGraph, sensor: &Sensor) {
    graph.remove_node(sensor.node);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_sensors_matches_specs() {
        let mut graph = SceneGraph::new();
        let parent = graph.create_child(graph.root());
        let specs = vec![
            SensorSpec::new("rgb", SensorType::Color),
            SensorSpec::new("depth", SensorType::Depth),
        ];
        let suite = create_sensors(&mut graph, parent, &specs).expect("create");
        assert_eq!(suite.len(), 2);
        assert!(suite.contains_key("rgb"));
        assert!(suite.contains_key("depth"));
        for sensor in suite.values() {
            assert_eq!(graph.node(sensor.node()).parent(), Some(parent));
        }
    }

    #[test]
    fn duplicate_uuid_is_rejected() {
        let mut graph = SceneGraph::new();
        let parent = graph.create_child(graph.root());
        let specs = vec![
            SensorSpec::new("rgb", SensorType::Color),
            SensorSpec::new("rgb", SensorType::Depth),
        ];
        assert!(create_sensors(&mut graph, parent, &specs).is_err());
    }

    #[test]
    fn initial_pose_comes_from_spec() {
        let mut graph = SceneGraph::new();
        let parent = graph.create_child(graph.root());
        let mut spec = SensorSpec::new("rgb", SensorType::Color);
        spec.position = [0.0, 1.5, 0.0];
        let suite = create_sensors(&mut graph, parent, &[spec]).expect("create");
        let node = suite["rgb"].node();
        assert_eq!(graph.node(node).translation(), Vec3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn delete_sensor_removes_node() {
        let mut graph = SceneGraph::new();
        let parent = graph.create_child(graph.root());
        let suite = create_sensors(
            &mut graph,
            parent,
            &[SensorSpec::new("rgb", SensorType::Color)],
        )
        .expect("create");
        delete_sensor(&mut graph, &suite["rgb"]);
        assert!(!graph.contains(suite["rgb"].node()));
    }
}
