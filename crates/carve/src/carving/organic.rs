use xxhash_rust::xxh3::xxh3_64;

use crate::corridor::{route_natural_corridor, route_smooth_corridor};
use crate::error::{CarveError, RouteError, StampError};
use crate::graph::{Connector, Room};
use crate::grid::Grid;
use crate::jitter::SeededJitter;
use crate::shapes::stamp_room_shaped;
use crate::tilemap::TileMap;
use crate::types::{Path, Pose, Rect};

use super::pipeline::{Rasterizer, TileSize, run};
use super::{CarveRequest, Carver, DEFAULT_TILE_SIZE};

pub const DEFAULT_CORRIDOR_WIDTH: u32 = 3;

/// Shaped rooms and jittered wide corridors.
///
/// Rooms follow `pose.footprint_id` (`rect`, `oval`, `cross`, `L`). Each corridor draws its
/// width jitter from its own stream of `seed`, keyed by connector id, so a corridor's shape
/// does not depend on which other corridors exist.
#[derive(Clone, Debug)]
pub struct OrganicCarver {
    tile_width: u32,
    tile_height: u32,
    seed: u64,
    corridor_width: u32,
    smooth_corners: bool,
}

impl OrganicCarver {
    pub const NAME: &'static str = "organic";

    pub fn new(seed: u64) -> Self {
        Self {
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
            seed,
            corridor_width: DEFAULT_CORRIDOR_WIDTH,
            smooth_corners: true,
        }
    }

    pub fn with_tile_size(mut self, tile_width: u32, tile_height: u32) -> Self {
        self.tile_width = tile_width;
        self.tile_height = tile_height;
        self
    }

    pub fn with_corridor_width(mut self, corridor_width: u32) -> Self {
        self.corridor_width = corridor_width;
        self
    }

    pub fn with_smooth_corners(mut self, smooth_corners: bool) -> Self {
        self.smooth_corners = smooth_corners;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for OrganicCarver {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Rasterizer for OrganicCarver {
    fn stamp(&self, room: &Room, pose: &Pose, floor: &mut Grid) -> Result<Rect, StampError> {
        stamp_room_shaped(Some(room), pose, floor)
    }

    fn route(
        &self,
        connector: &Connector,
        path: &Path,
        floor: &mut Grid,
    ) -> Result<(), RouteError> {
        if self.smooth_corners {
            route_smooth_corridor(path, floor)?;
        }
        let jitter = SeededJitter::for_stream(self.seed, xxh3_64(connector.id.as_bytes()));
        let width = i32::try_from(self.corridor_width).unwrap_or(i32::MAX);
        route_natural_corridor(path, width, floor, jitter)
    }
}

impl Carver for OrganicCarver {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn carve(&self, request: &CarveRequest<'_>) -> Result<TileMap, CarveError> {
        let tile_size = TileSize { width: self.tile_width, height: self.tile_height };
        run(Self::NAME, self, &tile_size, request)
    }
}
