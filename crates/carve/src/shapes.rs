//! Room footprint stamping: fixed size-class rectangles plus named alternative shapes.

use std::fmt;
use std::str::FromStr;

use crate::error::StampError;
use crate::graph::Room;
use crate::grid::Grid;
use crate::types::{Pose, Rect, RoomSize, Rotation, TileType};

/// Footprint extents `(width, height)` after rotation.
pub fn room_footprint(size: RoomSize, rotation: Rotation) -> (i32, i32) {
    let side = size.footprint();
    // Footprints are square today; the swap keeps rotation correct if that ever changes.
    let (width, height) = (side, side);
    if rotation.swaps_extents() { (height, width) } else { (width, height) }
}

/// Footprint rectangle for a room of `size` centered on `pose`.
///
/// The top-left corner is `center - extent / 2`. The half extent is computed with integer
/// division on a non-negative value, so even-sized rooms extend one tile further towards
/// negative coordinates than towards positive ones, regardless of where the center lies.
pub fn footprint_rect(size: RoomSize, pose: &Pose) -> Rect {
    let (width, height) = room_footprint(size, pose.rotation);
    Rect::new(pose.x - width / 2, pose.y - height / 2, width, height)
}

/// Fills the room's rectangular footprint with floor.
pub fn stamp_room(room: Option<&Room>, pose: &Pose, grid: &mut Grid) -> Result<Rect, StampError> {
    let room = room.ok_or(StampError::InvalidRoom)?;
    let rect = footprint_rect(room.size, pose);
    grid.fill_rect(rect.x, rect.y, rect.width, rect.height, TileType::Floor.code())?;
    Ok(rect)
}

/// Like [`stamp_room`] but dispatches `pose.footprint_id` through [`stamp_shape`].
/// Poses without a footprint id get the plain rectangle.
pub fn stamp_room_shaped(
    room: Option<&Room>,
    pose: &Pose,
    grid: &mut Grid,
) -> Result<Rect, StampError> {
    let room = room.ok_or(StampError::InvalidRoom)?;
    let rect = footprint_rect(room.size, pose);
    let kind = pose.footprint_id.as_deref().unwrap_or("rect");
    stamp_shape(kind, rect.x, rect.y, rect.width, rect.height, grid)?;
    Ok(rect)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rect,
    Oval,
    Cross,
    L,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Oval => "oval",
            Self::Cross => "cross",
            Self::L => "L",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = StampError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "rect" => Ok(Self::Rect),
            "oval" => Ok(Self::Oval),
            "cross" => Ok(Self::Cross),
            "L" | "l" => Ok(Self::L),
            other => Err(StampError::UnsupportedShape(other.to_string())),
        }
    }
}

/// Stamps a named shape inside the `w`x`h` box at `(x, y)`.
pub fn stamp_shape(
    kind: &str,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    grid: &mut Grid,
) -> Result<(), StampError> {
    let kind: ShapeKind = kind.parse()?;
    grid.check_rect(x, y, w, h)?;
    if w <= 0 || h <= 0 {
        return Ok(());
    }

    let floor = TileType::Floor.code();
    match kind {
        ShapeKind::Rect => grid.fill_rect(x, y, w, h, floor)?,
        ShapeKind::Oval => stamp_oval(x, y, w, h, grid)?,
        ShapeKind::Cross => {
            let bar_height = (h / 3).max(1);
            let bar_width = (w / 3).max(1);
            grid.fill_rect(x, y + (h - bar_height) / 2, w, bar_height, floor)?;
            grid.fill_rect(x + (w - bar_width) / 2, y, bar_width, h, floor)?;
        }
        ShapeKind::L => {
            let arm_height = (h / 2).max(1);
            let arm_width = (w / 2).max(1);
            grid.fill_rect(x, y + h - arm_height, w, arm_height, floor)?;
            grid.fill_rect(x, y, arm_width, h - arm_height, floor)?;
        }
    }
    Ok(())
}

fn stamp_oval(x: i32, y: i32, w: i32, h: i32, grid: &mut Grid) -> Result<(), StampError> {
    let radius_x = f64::from(w) / 2.0;
    let radius_y = f64::from(h) / 2.0;
    for row in 0..h {
        for column in 0..w {
            // Sample at cell centers so the ellipse is symmetric inside its box.
            let dx = (f64::from(column) + 0.5 - radius_x) / radius_x;
            let dy = (f64::from(row) + 0.5 - radius_y) / radius_y;
            if dx * dx + dy * dy <= 1.0 {
                grid.set(x + column, y + row, TileType::Floor.code())?;
            }
        }
    }
    Ok(())
}
