pub mod carving;
pub mod config;
pub mod corridor;
pub mod error;
pub mod graph;
pub mod grid;
pub mod jitter;
pub mod layout;
pub mod registry;
pub mod shapes;
pub mod tilemap;
pub mod types;

pub use carving::{CancelToken, CarveRequest, Carver, OrganicCarver, StandardCarver, carve};
pub use config::{CarveConfig, OrganicSettings};
pub use error::*;
pub use graph::{Connector, DungeonGraph, MemoryGraph, Room};
pub use grid::Grid;
pub use layout::Layout;
pub use registry::CarverRegistry;
pub use tilemap::{Layer, LayerContent, LayerKind, MapObject, TileMap};
pub use types::*;
