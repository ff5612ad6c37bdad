use std::fmt;

use serde::{Deserialize, Serialize};

pub type RoomId = String;
pub type ConnectorId = String;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height - 1
    }

    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    pub fn area(self) -> i32 {
        self.width.max(0) * self.height.max(0)
    }
}

/// Quarter-turn orientation of a placed room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Quarter turns swap the footprint's width and height.
    pub fn swaps_extents(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = String;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
            .ok_or_else(|| format!("rotation {degrees} must be one of 0, 90, 180, 270"))
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pose {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footprint_id: Option<String>,
}

impl Pose {
    pub fn at(x: i32, y: i32) -> Self {
        Self { x, y, rotation: Rotation::Deg0, footprint_id: None }
    }

    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_footprint(mut self, footprint_id: impl Into<String>) -> Self {
        self.footprint_id = Some(footprint_id.into());
        self
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Ordered polyline. Point order is traversal order and is never rearranged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<Point>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Consecutive point pairs in traversal order.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

impl From<Vec<Point>> for Path {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<(i32, i32)> for Path {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(x, y)| Point::new(x, y)).collect())
    }
}

/// Room size classes. The side lengths are a fixed contract shared with pacing code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomSize {
    XS,
    S,
    M,
    L,
    XL,
}

impl RoomSize {
    pub const ALL: [Self; 5] = [Self::XS, Self::S, Self::M, Self::L, Self::XL];

    /// Side length of the square footprint in tiles.
    pub fn footprint(self) -> i32 {
        match self {
            Self::XS => 3,
            Self::S => 5,
            Self::M => 7,
            Self::L => 10,
            Self::XL => 15,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConnectorType {
    Door,
    Corridor,
    Ladder,
    Teleporter,
    Hidden,
    OneWay,
}

/// Access requirement on a connector. Carving only forwards it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gate {
    #[serde(rename = "type")]
    pub gate_type: String,
    pub value: String,
}

impl Gate {
    pub fn new(gate_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self { gate_type: gate_type.into(), value: value.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileType {
    Empty,
    Floor,
    Wall,
    Door,
}

impl TileType {
    pub const fn code(self) -> u32 {
        match self {
            Self::Empty => 0,
            Self::Floor => 1,
            Self::Wall => 2,
            Self::Door => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Floor),
            2 => Some(Self::Wall),
            3 => Some(Self::Door),
            _ => None,
        }
    }
}
