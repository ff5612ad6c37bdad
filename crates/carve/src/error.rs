//! Error taxonomy for every carving layer.
//!
//! Lower layers report the first failure they hit. Higher layers wrap it with the room,
//! connector or segment that was being processed and keep the cause as `source`.

use thiserror::Error;
use toml::de::Error as TomlError;

use crate::types::{ConnectorId, RoomId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds { x: i32, y: i32, width: usize, height: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StampError {
    #[error("room is absent")]
    InvalidRoom,
    #[error("unsupported shape `{0}`")]
    UnsupportedShape(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("path has {points} point(s), at least 2 are required")]
    InsufficientPoints { points: usize },
    #[error("segment {index} could not be routed")]
    Segment {
        index: usize,
        #[source]
        source: GridError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileMapError {
    #[error(
        "tile map dimensions must be positive, got {width}x{height} cells of {tile_width}x{tile_height}px"
    )]
    InvalidDimensions { width: i32, height: i32, tile_width: u32, tile_height: u32 },
    #[error("layer `{0}` already exists")]
    DuplicateLayer(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarveError {
    #[error("no graph was supplied")]
    MissingGraph,
    #[error("no layout was supplied")]
    MissingLayout,
    #[error("layout bounds must be positive, got {width}x{height}")]
    InvalidBounds { width: i32, height: i32 },
    #[error("graph room `{0}` has no pose in the layout")]
    MissingPose(RoomId),
    #[error("graph connector `{0}` has no corridor path in the layout")]
    MissingPath(ConnectorId),
    #[error("room `{0}` is not in the graph")]
    RoomNotFound(RoomId),
    #[error("connector `{0}` is not in the graph")]
    ConnectorNotFound(ConnectorId),
    #[error("failed to stamp room `{room}`")]
    Stamp {
        room: RoomId,
        #[source]
        source: StampError,
    },
    #[error("failed to route connector `{connector}`")]
    Route {
        connector: ConnectorId,
        #[source]
        source: RouteError,
    },
    #[error("door for connector `{connector}` at ({x}, {y}) has no pixel position")]
    DoorOutOfRange { connector: ConnectorId, x: i32, y: i32 },
    #[error(transparent)]
    TileMap(#[from] TileMapError),
    #[error("carve invariant violated during {stage}")]
    Invariant {
        stage: &'static str,
        #[source]
        source: GridError,
    },
    #[error("carve was cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("carver name must not be empty")]
    EmptyName,
    #[error("carver `{0}` is already registered")]
    DuplicateName(String),
    #[error("carver `{0}` is not registered")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse carve config")]
    Parse(#[from] TomlError),
    #[error("invalid carve config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
