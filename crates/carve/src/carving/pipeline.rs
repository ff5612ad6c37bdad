//! Single-pass carve shared by every strategy: validate, stamp, route, wall, door, assemble.

use tracing::{debug, info, warn};

use crate::corridor::route_corridor;
use crate::error::{CarveError, GridError, RouteError, StampError};
use crate::graph::{Connector, DungeonGraph, Room};
use crate::grid::Grid;
use crate::layout::Layout;
use crate::shapes::stamp_room;
use crate::tilemap::{DOORS_LAYER, FLOOR_LAYER, LayerContent, LayerKind, TileMap, WALLS_LAYER};
use crate::types::{Path, Point, Pose, Rect, TileType};

use super::doors::place_doors;
use super::walls::synthesize_walls;
use super::{CarveRequest, Carver, DEFAULT_TILE_SIZE};

/// Per-strategy rasterization of rooms and corridors. Coordinates are grid-local.
pub(super) trait Rasterizer {
    fn stamp(&self, room: &Room, pose: &Pose, floor: &mut Grid) -> Result<Rect, StampError>;

    fn route(&self, connector: &Connector, path: &Path, floor: &mut Grid)
    -> Result<(), RouteError>;
}

pub(super) struct TileSize {
    pub(super) width: u32,
    pub(super) height: u32,
}

pub(super) fn run<R: Rasterizer>(
    carver: &str,
    rasterizer: &R,
    tile_size: &TileSize,
    request: &CarveRequest<'_>,
) -> Result<TileMap, CarveError> {
    let (graph, layout) = request.inputs()?;
    let bounds = layout.bounds;
    if !layout.has_positive_bounds() {
        return Err(CarveError::InvalidBounds { width: bounds.width, height: bounds.height });
    }
    layout.covers(graph)?;

    let mut tile_map =
        TileMap::new(bounds.width, bounds.height, tile_size.width, tile_size.height)?;
    let mut floor = Grid::new(tile_map.width, tile_map.height);
    let mut walls = Grid::new(tile_map.width, tile_map.height);
    let origin = Point::new(bounds.x, bounds.y);

    let result = stamp_rooms(rasterizer, graph, layout, origin, request, &mut floor)
        .and_then(|()| route_corridors(rasterizer, graph, layout, origin, request, &mut floor));
    if let Err(CarveError::Cancelled) = &result {
        warn!(carver, "carve cancelled, discarding partial tile map");
    }
    result?;

    let added_walls = synthesize_walls(&floor, &mut walls)
        .map_err(|source| CarveError::Invariant { stage: "wall synthesis", source })?;
    let doors = place_doors(graph, layout, tile_size.width, tile_size.height)?;

    info!(
        carver,
        width = tile_map.width,
        height = tile_map.height,
        floor_tiles = floor.count(TileType::Floor.code()),
        wall_tiles = added_walls,
        doors = doors.len(),
        "carved tile map"
    );

    tile_map.add_layer(FLOOR_LAYER, LayerKind::Grid)?.content = LayerContent::Grid(floor);
    tile_map.add_layer(WALLS_LAYER, LayerKind::Grid)?.content = LayerContent::Grid(walls);
    tile_map.add_layer(DOORS_LAYER, LayerKind::Object)?.content =
        LayerContent::Object { objects: doors };
    Ok(tile_map)
}

fn stamp_rooms<R: Rasterizer>(
    rasterizer: &R,
    graph: &dyn DungeonGraph,
    layout: &Layout,
    origin: Point,
    request: &CarveRequest<'_>,
    floor: &mut Grid,
) -> Result<(), CarveError> {
    for (room_id, pose) in &layout.poses {
        request.check_cancelled()?;
        let room = graph.room(room_id).ok_or_else(|| CarveError::RoomNotFound(room_id.clone()))?;
        let rect = to_local(Point::new(pose.x, pose.y), origin, floor)
            .map_err(StampError::from)
            .and_then(|local| {
                rasterizer.stamp(room, &Pose { x: local.x, y: local.y, ..pose.clone() }, floor)
            })
            .map_err(|source| CarveError::Stamp { room: room_id.clone(), source })?;
        debug!(room = %room_id, size = ?room.size, x = rect.x, y = rect.y, "stamped room");
    }
    Ok(())
}

fn route_corridors<R: Rasterizer>(
    rasterizer: &R,
    graph: &dyn DungeonGraph,
    layout: &Layout,
    origin: Point,
    request: &CarveRequest<'_>,
    floor: &mut Grid,
) -> Result<(), CarveError> {
    for (connector_id, path) in &layout.corridor_paths {
        request.check_cancelled()?;
        let connector = graph
            .connector(connector_id)
            .ok_or_else(|| CarveError::ConnectorNotFound(connector_id.clone()))?;
        path_to_local(path, origin, floor)
            .and_then(|local| rasterizer.route(connector, &local, floor))
            .map_err(|source| CarveError::Route { connector: connector_id.clone(), source })?;
        debug!(connector = %connector_id, points = path.len(), "routed corridor");
    }
    Ok(())
}

/// Grid-local position of `point`. Offsets that overflow `i32` cannot land on the grid.
fn to_local(point: Point, origin: Point, floor: &Grid) -> Result<Point, GridError> {
    match (point.x.checked_sub(origin.x), point.y.checked_sub(origin.y)) {
        (Some(x), Some(y)) => Ok(Point::new(x, y)),
        _ => Err(GridError::OutOfBounds {
            x: point.x,
            y: point.y,
            width: floor.width(),
            height: floor.height(),
        }),
    }
}

fn path_to_local(path: &Path, origin: Point, floor: &Grid) -> Result<Path, RouteError> {
    let points = path
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            to_local(*point, origin, floor)
                .map_err(|source| RouteError::Segment { index: i.saturating_sub(1), source })
        })
        .collect::<Result<_, _>>()?;
    Ok(Path::new(points))
}

/// Rectangular rooms and single-width corridors.
#[derive(Clone, Debug)]
pub struct StandardCarver {
    tile_width: u32,
    tile_height: u32,
}

impl StandardCarver {
    pub const NAME: &'static str = "standard";

    pub fn new(tile_width: u32, tile_height: u32) -> Self {
        Self { tile_width, tile_height }
    }
}

impl Default for StandardCarver {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE, DEFAULT_TILE_SIZE)
    }
}

impl Rasterizer for StandardCarver {
    fn stamp(&self, room: &Room, pose: &Pose, floor: &mut Grid) -> Result<Rect, StampError> {
        stamp_room(Some(room), pose, floor)
    }

    fn route(
        &self,
        _connector: &Connector,
        path: &Path,
        floor: &mut Grid,
    ) -> Result<(), RouteError> {
        route_corridor(path, floor)
    }
}

impl Carver for StandardCarver {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn carve(&self, request: &CarveRequest<'_>) -> Result<TileMap, CarveError> {
        let tile_size = TileSize { width: self.tile_width, height: self.tile_height };
        run(Self::NAME, self, &tile_size, request)
    }
}
