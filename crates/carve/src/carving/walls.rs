use crate::error::GridError;
use crate::grid::{Grid, NEIGHBORS_8};
use crate::types::TileType;

/// Marks every empty 8-neighbour of a floor cell as wall. Returns the number of walls added.
///
/// One dilation pass over the finished floor, so the wall set does not depend on the order rooms
/// and corridors were stamped in. Running it again on the same floor adds nothing.
///
/// Neighbours outside the grid are skipped. Floor on the border is closed by the grid edge
/// rather than by a wall tile.
pub fn synthesize_walls(floor: &Grid, walls: &mut Grid) -> Result<usize, GridError> {
    let empty = TileType::Empty.code();
    let wall = TileType::Wall.code();
    let mut added = 0;

    for y in 0..floor.height() as i32 {
        for x in 0..floor.width() as i32 {
            if floor.get(x, y) != TileType::Floor.code() {
                continue;
            }
            for (dx, dy) in NEIGHBORS_8 {
                let (nx, ny) = (x + dx, y + dy);
                if !floor.in_bounds(nx, ny) || floor.get(nx, ny) != empty {
                    continue;
                }
                if walls.get(nx, ny) != wall {
                    walls.set(nx, ny, wall)?;
                    added += 1;
                }
            }
        }
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const FLOOR: u32 = TileType::Floor.code();
    const WALL: u32 = TileType::Wall.code();

    #[test]
    fn single_floor_cell_gets_a_ring_of_eight() {
        let mut floor = Grid::new(5, 5);
        floor.set(2, 2, FLOOR).expect("in bounds");
        let mut walls = Grid::new(5, 5);
        assert_eq!(synthesize_walls(&floor, &mut walls), Ok(8));
        assert_eq!(walls.count(WALL), 8);
        assert_eq!(walls.get(2, 2), 0);
    }

    #[test]
    fn floor_on_the_border_only_walls_in_bounds_neighbours() {
        let mut floor = Grid::new(3, 3);
        floor.set(0, 0, FLOOR).expect("in bounds");
        let mut walls = Grid::new(3, 3);
        assert_eq!(synthesize_walls(&floor, &mut walls), Ok(3));
    }

    #[test]
    fn second_pass_adds_nothing() {
        let mut floor = Grid::new(12, 10);
        floor.fill_rect(2, 2, 4, 3, FLOOR).expect("in bounds");
        floor.draw_line(5, 3, 9, 7, FLOOR).expect("in bounds");
        let mut walls = Grid::new(12, 10);
        let first = synthesize_walls(&floor, &mut walls).expect("same dimensions");
        let snapshot = walls.clone();
        assert!(first > 0);
        assert_eq!(synthesize_walls(&floor, &mut walls), Ok(0));
        assert_eq!(walls, snapshot);
    }

    #[test]
    fn mismatched_wall_grid_reports_out_of_bounds() {
        let mut floor = Grid::new(6, 6);
        floor.set(4, 4, FLOOR).expect("in bounds");
        let mut walls = Grid::new(3, 3);
        assert!(matches!(
            synthesize_walls(&floor, &mut walls),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    proptest! {
        #[test]
        fn every_floor_cell_is_enclosed(
            cells in proptest::collection::vec((0_i32..16, 0_i32..16), 0..40)
        ) {
            let mut floor = Grid::new(16, 16);
            for (x, y) in cells {
                floor.set(x, y, FLOOR).expect("in bounds");
            }
            let mut walls = Grid::new(16, 16);
            synthesize_walls(&floor, &mut walls).expect("same dimensions");

            for y in 0..16 {
                for x in 0..16 {
                    if floor.get(x, y) != FLOOR {
                        continue;
                    }
                    for (dx, dy) in NEIGHBORS_8 {
                        let (nx, ny) = (x + dx, y + dy);
                        if floor.in_bounds(nx, ny) {
                            prop_assert!(floor.get(nx, ny) != 0 || walls.get(nx, ny) == WALL);
                        }
                    }
                }
            }
        }
    }
}
