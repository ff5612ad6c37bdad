//! Bounds-checked primitives over a flat row-major buffer of tile codes.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    width: usize,
    height: usize,
    data: Vec<u32>,
}

/// Unchecked wire form. Deserialized grids go through [`Grid::from_data`].
#[derive(Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    data: Vec<u32>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = String;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let len = raw.data.len();
        Self::from_data(raw.width, raw.height, raw.data).ok_or_else(|| {
            format!("grid data has {len} cells, expected {}x{}", raw.width, raw.height)
        })
    }
}

impl Grid {
    /// Zero-filled grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, data: vec![0; width * height] }
    }

    /// Wraps an existing buffer. Returns `None` when `data.len() != width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<u32>) -> Option<Self> {
        (width.checked_mul(height) == Some(data.len())).then_some(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u32> {
        self.data
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Total read: out-of-bounds cells read as 0.
    pub fn get(&self, x: i32, y: i32) -> u32 {
        if !self.in_bounds(x, y) {
            return 0;
        }
        self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: i32, y: i32, value: u32) -> Result<(), GridError> {
        self.check(x, y)?;
        let index = self.index(x, y);
        self.data[index] = value;
        Ok(())
    }

    /// Fills the rectangle. The whole rectangle is validated before any cell is written.
    pub fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        value: u32,
    ) -> Result<(), GridError> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        self.check_rect(x, y, w, h)?;
        for row in y..y + h {
            let start = self.index(x, row);
            self.data[start..start + w as usize].fill(value);
        }
        Ok(())
    }

    /// Draws the one-tile-thick perimeter of the rectangle.
    pub fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        value: u32,
    ) -> Result<(), GridError> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        self.check_rect(x, y, w, h)?;
        let right = x + w - 1;
        let bottom = y + h - 1;
        for column in x..=right {
            self.put(column, y, value);
            self.put(column, bottom, value);
        }
        for row in y..=bottom {
            self.put(x, row, value);
            self.put(right, row, value);
        }
        Ok(())
    }

    /// Bresenham line including both endpoints. Paints `max(|dx|, |dy|) + 1` cells.
    pub fn draw_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        value: u32,
    ) -> Result<(), GridError> {
        self.check(x0, y0)?;
        self.check(x1, y1)?;

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };
        let mut error = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.put(x, y, value);
            if x == x1 && y == y1 {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += step_x;
            }
            if doubled <= dx {
                error += dx;
                y += step_y;
            }
        }
        Ok(())
    }

    /// Counts cardinal (and optionally diagonal) neighbours equal to `target`.
    /// Out-of-bounds neighbours never match.
    pub fn count_neighbors(&self, x: i32, y: i32, target: u32, include_diagonal: bool) -> u8 {
        let offsets: &[(i32, i32)] =
            if include_diagonal { &NEIGHBORS_8 } else { &NEIGHBORS_4 };
        offsets
            .iter()
            .filter(|(dx, dy)| self.in_bounds(x + dx, y + dy) && self.get(x + dx, y + dy) == target)
            .count() as u8
    }

    /// Breadth-first 4-connected fill of the region sharing the start cell's value.
    pub fn flood_fill(&mut self, x: i32, y: i32, new_value: u32) -> Result<(), GridError> {
        self.check(x, y)?;
        let original = self.get(x, y);
        if original == new_value {
            return Ok(());
        }

        self.put(x, y, new_value);
        let mut open = VecDeque::from([(x, y)]);
        while let Some((cx, cy)) = open.pop_front() {
            for (dx, dy) in NEIGHBORS_4 {
                let (nx, ny) = (cx + dx, cy + dy);
                if self.in_bounds(nx, ny) && self.get(nx, ny) == original {
                    self.put(nx, ny, new_value);
                    open.push_back((nx, ny));
                }
            }
        }
        Ok(())
    }

    pub fn count(&self, value: u32) -> usize {
        self.data.iter().filter(|&&cell| cell == value).count()
    }

    /// Validates that a non-empty rectangle lies fully inside the grid.
    pub fn check_rect(&self, x: i32, y: i32, w: i32, h: i32) -> Result<(), GridError> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        self.check(x, y)?;
        self.check(x.saturating_add(w - 1), y.saturating_add(h - 1))
    }

    fn check(&self, x: i32, y: i32) -> Result<(), GridError> {
        if self.in_bounds(x, y) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds { x, y, width: self.width, height: self.height })
        }
    }

    /// Unchecked write; callers validate first.
    fn put(&mut self, x: i32, y: i32, value: u32) {
        let index = self.index(x, y);
        self.data[index] = value;
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y as usize) * self.width + (x as usize)
    }
}

pub(crate) const NEIGHBORS_4: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

pub(crate) const NEIGHBORS_8: [(i32, i32); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];
