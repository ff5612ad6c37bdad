//! Read-only view of the abstract dungeon graph that carving depends on.
//!
//! Carving never sees a concrete graph type. Whatever the upstream generator produces is
//! wrapped by a thin adapter implementing [`DungeonGraph`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{ConnectorId, ConnectorType, Gate, RoomId, RoomSize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub size: RoomSize,
}

impl Room {
    pub fn new(id: impl Into<RoomId>, size: RoomSize) -> Self {
        Self { id: id.into(), size }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub id: ConnectorId,
    pub from: RoomId,
    pub to: RoomId,
    #[serde(rename = "type")]
    pub connector_type: ConnectorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<Gate>,
}

impl Connector {
    pub fn new(
        id: impl Into<ConnectorId>,
        from: impl Into<RoomId>,
        to: impl Into<RoomId>,
        connector_type: ConnectorType,
    ) -> Self {
        Self { id: id.into(), from: from.into(), to: to.into(), connector_type, gate: None }
    }

    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }
}

/// Capability set carving needs from a graph: lookup by id and full id enumeration.
pub trait DungeonGraph {
    fn room(&self, id: &str) -> Option<&Room>;
    fn connector(&self, id: &str) -> Option<&Connector>;
    fn room_ids(&self) -> Vec<RoomId>;
    fn connector_ids(&self) -> Vec<ConnectorId>;
}

/// In-memory graph keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryGraph {
    rooms: BTreeMap<RoomId, Room>,
    connectors: BTreeMap<ConnectorId, Connector>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a room with the same id.
    pub fn add_room(&mut self, room: Room) -> &mut Self {
        self.rooms.insert(room.id.clone(), room);
        self
    }

    /// Inserts or replaces a connector with the same id.
    pub fn add_connector(&mut self, connector: Connector) -> &mut Self {
        self.connectors.insert(connector.id.clone(), connector);
        self
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.values()
    }
}

impl DungeonGraph for MemoryGraph {
    fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id)
    }

    fn connector(&self, id: &str) -> Option<&Connector> {
        self.connectors.get(id)
    }

    fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().cloned().collect()
    }

    fn connector_ids(&self) -> Vec<ConnectorId> {
        self.connectors.keys().cloned().collect()
    }
}
