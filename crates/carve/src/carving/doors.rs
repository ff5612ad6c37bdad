use serde_json::{Value, json};

use crate::error::CarveError;
use crate::graph::{Connector, DungeonGraph};
use crate::layout::Layout;
use crate::tilemap::MapObject;
use crate::types::{ConnectorType, Point};

pub const DOOR_OBJECT_TYPE: &str = "door";

/// Door markers at both ends of every corridor connector's path.
///
/// Connectors are visited in id order and each contributes its first point then its last,
/// so ids run 1, 2, ... in connector-then-endpoint order. Positions are pixel offsets from
/// the layout origin. Other connector types and paths shorter than two points get no doors.
pub fn place_doors(
    graph: &dyn DungeonGraph,
    layout: &Layout,
    tile_width: u32,
    tile_height: u32,
) -> Result<Vec<MapObject>, CarveError> {
    let mut doors = Vec::new();
    for (connector_id, path) in &layout.corridor_paths {
        let connector = graph
            .connector(connector_id)
            .ok_or_else(|| CarveError::ConnectorNotFound(connector_id.clone()))?;
        if connector.connector_type != ConnectorType::Corridor || path.len() < 2 {
            continue;
        }
        let (Some(first), Some(last)) = (path.first(), path.last()) else {
            continue;
        };
        for (endpoint, point) in [("from", first), ("to", last)] {
            let pixel_x = to_pixel(point.x, layout.bounds.x, tile_width);
            let pixel_y = to_pixel(point.y, layout.bounds.y, tile_height);
            let (Some(x), Some(y)) = (pixel_x, pixel_y) else {
                return Err(CarveError::DoorOutOfRange {
                    connector: connector_id.clone(),
                    x: point.x,
                    y: point.y,
                });
            };
            let id = doors.len() as u32 + 1;
            doors.push(door(id, connector, endpoint, Point::new(x, y), tile_width, tile_height));
        }
    }
    Ok(doors)
}

/// Pixel offset of a tile coordinate from `origin`, if it fits in `i32`.
fn to_pixel(tile: i32, origin: i32, tile_size: u32) -> Option<i32> {
    tile.checked_sub(origin)?.checked_mul(i32::try_from(tile_size).ok()?)
}

fn door(
    id: u32,
    connector: &Connector,
    endpoint: &str,
    pixel: Point,
    tile_width: u32,
    tile_height: u32,
) -> MapObject {
    let mut object =
        MapObject::new(id, format!("{}:{endpoint}", connector.id), DOOR_OBJECT_TYPE);
    object.x = pixel.x;
    object.y = pixel.y;
    object.width = tile_width;
    object.height = tile_height;

    let gate = match &connector.gate {
        Some(gate) => json!({ "type": gate.gate_type, "value": gate.value }),
        None => Value::Null,
    };
    object.properties.insert("connector_id".to_string(), json!(connector.id));
    object.properties.insert("from_room".to_string(), json!(connector.from));
    object.properties.insert("to_room".to_string(), json!(connector.to));
    object.properties.insert("gate".to_string(), gate);
    object.properties.insert("endpoint".to_string(), json!(endpoint));
    object
}
