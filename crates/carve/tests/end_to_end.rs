use std::sync::Arc;

use carve::carving::{CancelToken, CarveRequest, Carver, StandardCarver};
use carve::tilemap::{DOORS_LAYER, FLOOR_LAYER, WALLS_LAYER};
use carve::{
    CarveConfig, CarveError, CarverRegistry, Connector, ConnectorType, Gate, LayerKind, Layout,
    MemoryGraph, Path, Pose, Rect, Room, RoomSize, TileMap, TileType, carve,
};
use serde_json::json;

const FLOOR: u32 = TileType::Floor.code();
const WALL: u32 = TileType::Wall.code();

fn two_room_graph() -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    graph
        .add_room(Room::new("entrance", RoomSize::M))
        .add_room(Room::new("vault", RoomSize::M))
        .add_connector(Connector::new("hall", "entrance", "vault", ConnectorType::Corridor));
    graph
}

fn l_corridor() -> Path {
    [(20, 20), (40, 20), (40, 60), (60, 60)].into_iter().collect()
}

fn two_room_layout() -> Layout {
    Layout::new(Rect::new(0, 0, 100, 100))
        .with_pose("entrance", Pose::at(20, 20))
        .with_pose("vault", Pose::at(60, 60))
        .with_path("hall", l_corridor())
}

fn assert_enclosed(map: &TileMap) {
    let floor = map.grid(FLOOR_LAYER).expect("floor layer");
    let walls = map.grid(WALLS_LAYER).expect("walls layer");
    for y in 0..floor.height() as i32 {
        for x in 0..floor.width() as i32 {
            if floor.get(x, y) != FLOOR {
                continue;
            }
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    if floor.in_bounds(nx, ny) {
                        assert!(
                            floor.get(nx, ny) != 0 || walls.get(nx, ny) == WALL,
                            "floor ({x}, {y}) leaks at ({nx}, {ny})"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_two_rooms_and_an_l_corridor_carve_floor_walls_and_two_doors() {
    let map = carve(&two_room_graph(), &two_room_layout()).expect("valid carve");

    assert_eq!((map.width, map.height), (100, 100));
    let floor = map.grid(FLOOR_LAYER).expect("floor layer");
    let walls = map.grid(WALLS_LAYER).expect("walls layer");
    assert!(floor.count(FLOOR) > 2 * 49);
    assert!(walls.count(WALL) > 0);
    assert_eq!(floor.get(20, 20), FLOOR);
    assert_eq!(floor.get(40, 40), FLOOR);
    assert_eq!(floor.get(60, 60), FLOOR);

    let doors = map.objects(DOORS_LAYER).expect("doors layer");
    assert_eq!(doors.len(), 2);
    assert_eq!((doors[0].id, doors[0].x, doors[0].y), (1, 320, 320));
    assert_eq!((doors[1].id, doors[1].x, doors[1].y), (2, 960, 960));
    assert_eq!(doors[0].property("from_room"), Some(&json!("entrance")));
    assert_eq!(doors[1].property("to_room"), Some(&json!("vault")));
    assert_enclosed(&map);
}

#[test]
fn test_every_floor_tile_is_reachable_from_the_entrance() {
    let map = carve(&two_room_graph(), &two_room_layout()).expect("valid carve");
    let mut reached = map.grid(FLOOR_LAYER).expect("floor layer").clone();
    reached.flood_fill(20, 20, 9).expect("entrance is in bounds");
    assert_eq!(reached.count(FLOOR), 0);
    assert_eq!(reached.get(60, 60), 9);
}

#[test]
fn test_identical_inputs_produce_identical_maps() {
    let graph = two_room_graph();
    let layout = two_room_layout();
    let first = carve(&graph, &layout).expect("valid carve");
    let second = carve(&graph, &layout).expect("valid carve");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.grid(FLOOR_LAYER), second.grid(FLOOR_LAYER));
    assert_eq!(first.grid(WALLS_LAYER), second.grid(WALLS_LAYER));
}

#[test]
fn test_stamping_order_does_not_change_the_wall_layer() {
    let graph = two_room_graph();
    let forward = carve(&graph, &two_room_layout()).expect("valid carve");

    // Reversed path points route the same tiles but visit them in the opposite order.
    let reversed: Path = l_corridor().points.into_iter().rev().collect::<Vec<_>>().into();
    let layout = two_room_layout().with_path("hall", reversed);
    let backward = carve(&graph, &layout).expect("valid carve");
    assert_eq!(forward.grid(WALLS_LAYER), backward.grid(WALLS_LAYER));
}

#[test]
fn test_gates_and_non_corridor_connectors() {
    let mut graph = two_room_graph();
    graph
        .add_room(Room::new("shrine", RoomSize::XS))
        .add_connector(
            Connector::new("hall", "entrance", "vault", ConnectorType::Corridor)
                .gated(Gate::new("key", "bronze")),
        )
        .add_connector(Connector::new("warp", "vault", "shrine", ConnectorType::Teleporter));
    let layout = two_room_layout()
        .with_pose("shrine", Pose::at(85, 15))
        .with_path("warp", [(60, 60), (85, 15)].into_iter().collect());

    let map = carve(&graph, &layout).expect("valid carve");
    let doors = map.objects(DOORS_LAYER).expect("doors layer");
    assert_eq!(doors.len(), 2);
    assert!(doors.iter().all(|door| door.property("connector_id") == Some(&json!("hall"))));
    assert_eq!(doors[0].property("gate"), Some(&json!({"type": "key", "value": "bronze"})));
    assert_eq!(map.grid(FLOOR_LAYER).expect("floor layer").get(85, 15), FLOOR);
}

#[test]
fn test_invalid_inputs_fail_without_a_partial_map() {
    let graph = two_room_graph();

    let missing_pose = Layout::new(Rect::new(0, 0, 100, 100))
        .with_pose("entrance", Pose::at(20, 20))
        .with_path("hall", l_corridor());
    assert_eq!(carve(&graph, &missing_pose), Err(CarveError::MissingPose("vault".to_string())));

    let off_map = two_room_layout().with_path("hall", [(20, 20), (140, 20)].into_iter().collect());
    assert!(matches!(
        carve(&graph, &off_map),
        Err(CarveError::Route { connector, .. }) if connector == "hall"
    ));

    let mut empty_bounds = two_room_layout();
    empty_bounds.bounds = Rect::new(0, 0, 100, -1);
    assert_eq!(
        carve(&graph, &empty_bounds),
        Err(CarveError::InvalidBounds { width: 100, height: -1 })
    );
}

#[test]
fn test_cancelled_carve_returns_cancelled() {
    let graph = two_room_graph();
    let layout = two_room_layout();
    let token = CancelToken::new();
    let request = CarveRequest::new().graph(&graph).layout(&layout).cancel(&token);

    assert!(StandardCarver::default().carve(&request).is_ok());
    token.clone().cancel();
    assert_eq!(StandardCarver::default().carve(&request), Err(CarveError::Cancelled));
}

#[test]
fn test_configured_registry_drives_the_carve() {
    let config = CarveConfig::from_toml_str(
        r#"
            carver = "organic"
            tile_width = 32
            tile_height = 24

            [organic]
            seed = 1234
            corridor_width = 4
        "#,
    )
    .expect("valid config");
    let registry = CarverRegistry::from_config(&config).expect("built-in carvers");
    let carver: Arc<dyn Carver> = registry.get(&config.carver).expect("organic is registered");

    let graph = two_room_graph();
    let layout = two_room_layout();
    let request = CarveRequest::new().graph(&graph).layout(&layout);
    let organic = carver.carve(&request).expect("valid carve");
    let standard = registry.get("standard").expect("standard").carve(&request).expect("carve");

    assert_eq!((organic.tile_width, organic.tile_height), (32, 24));
    let doors = organic.objects(DOORS_LAYER).expect("doors layer");
    assert_eq!((doors[1].x, doors[1].y), (60 * 32, 60 * 24));
    let floor_tiles = |map: &TileMap| map.grid(FLOOR_LAYER).expect("floor layer").count(FLOOR);
    assert!(floor_tiles(&organic) > floor_tiles(&standard));
    assert_enclosed(&organic);
    assert_eq!(organic, carver.carve(&request).expect("valid carve"));
}

#[test]
fn test_callers_can_layer_extra_content_on_the_result() {
    let mut map = carve(&two_room_graph(), &two_room_layout()).expect("valid carve");
    let decor = map.add_layer("decor", LayerKind::Grid).expect("new layer");
    assert_eq!(decor.id, 4);

    let value = serde_json::to_value(&map).expect("tile map serializes");
    assert_eq!(value["layers"]["doors"]["content"]["kind"], json!("object"));
    assert_eq!(value["layers"]["doors"]["content"]["objects"][0]["type"], json!("door"));
    assert_eq!(value["tile_width"], json!(16));
}
