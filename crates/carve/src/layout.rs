//! Spatial embedding handed to carving by the layout stage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CarveError;
use crate::graph::DungeonGraph;
use crate::types::{ConnectorId, Path, Pose, Rect, RoomId};

/// Room poses and corridor paths inside a bounding rectangle.
///
/// Both maps are ordered by id, so every walk over a layout visits entries in the same
/// order and carving output does not depend on insertion history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub poses: BTreeMap<RoomId, Pose>,
    #[serde(default)]
    pub corridor_paths: BTreeMap<ConnectorId, Path>,
    pub bounds: Rect,
}

impl Layout {
    pub fn new(bounds: Rect) -> Self {
        Self { poses: BTreeMap::new(), corridor_paths: BTreeMap::new(), bounds }
    }

    pub fn with_pose(mut self, room: impl Into<RoomId>, pose: Pose) -> Self {
        self.poses.insert(room.into(), pose);
        self
    }

    pub fn with_path(mut self, connector: impl Into<ConnectorId>, path: Path) -> Self {
        self.corridor_paths.insert(connector.into(), path);
        self
    }

    pub fn has_positive_bounds(&self) -> bool {
        self.bounds.width > 0 && self.bounds.height > 0
    }

    /// Checks that every graph room has a pose and every graph connector has a path.
    pub fn covers(&self, graph: &dyn DungeonGraph) -> Result<(), CarveError> {
        if let Some(room) = graph.room_ids().into_iter().find(|id| !self.poses.contains_key(id)) {
            return Err(CarveError::MissingPose(room));
        }
        if let Some(connector) =
            graph.connector_ids().into_iter().find(|id| !self.corridor_paths.contains_key(id))
        {
            return Err(CarveError::MissingPath(connector));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Connector, MemoryGraph, Room};
    use crate::types::{ConnectorType, RoomSize};

    fn graph() -> MemoryGraph {
        let mut graph = MemoryGraph::new();
        graph
            .add_room(Room::new("a", RoomSize::S))
            .add_room(Room::new("b", RoomSize::S))
            .add_connector(Connector::new("ab", "a", "b", ConnectorType::Corridor));
        graph
    }

    #[test]
    fn layout_covering_the_graph_passes() {
        let layout = Layout::new(Rect::new(0, 0, 30, 30))
            .with_pose("a", Pose::at(5, 5))
            .with_pose("b", Pose::at(20, 20))
            .with_path("ab", [(5, 5), (20, 5), (20, 20)].into_iter().collect());
        assert_eq!(layout.covers(&graph()), Ok(()));
    }

    #[test]
    fn missing_pose_or_path_is_reported_by_id() {
        let no_pose = Layout::new(Rect::new(0, 0, 30, 30)).with_pose("a", Pose::at(5, 5));
        assert_eq!(no_pose.covers(&graph()), Err(CarveError::MissingPose("b".to_string())));

        let no_path = no_pose.with_pose("b", Pose::at(20, 20));
        assert_eq!(no_path.covers(&graph()), Err(CarveError::MissingPath("ab".to_string())));
    }

    #[test]
    fn layouts_deserialize_from_structured_data() {
        let layout: Layout = serde_json::from_str(
            r#"{
                "poses": {"a": {"x": 5, "y": 5, "rotation": 90, "footprint_id": "oval"}},
                "corridor_paths": {"ab": {"points": [{"x": 5, "y": 5}, {"x": 9, "y": 5}]}},
                "bounds": {"x": 0, "y": 0, "width": 12, "height": 12}
            }"#,
        )
        .expect("layout json should parse");
        assert!(layout.has_positive_bounds());
        assert_eq!(layout.poses["a"].footprint_id.as_deref(), Some("oval"));
        assert_eq!(layout.corridor_paths["ab"].len(), 2);
    }
}
