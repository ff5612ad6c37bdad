//! Corridor rasterization along layout paths.

pub mod geometry;

pub use geometry::{PathSplit, path_length, simplify_path, split_path_at_midpoint};

use crate::error::{GridError, RouteError};
use crate::grid::Grid;
use crate::jitter::JitterSource;
use crate::types::{Path, Point, TileType};

/// Single-width corridor: one Bresenham line per consecutive point pair.
pub fn route_corridor(path: &Path, grid: &mut Grid) -> Result<(), RouteError> {
    ensure_routable(path)?;
    for (index, (from, to)) in path.segments().enumerate() {
        grid.draw_line(from.x, from.y, to.x, to.y, TileType::Floor.code())
            .map_err(|source| RouteError::Segment { index, source })?;
    }
    Ok(())
}

/// `width` parallel lines per segment, offset across the segment's dominant axis.
pub fn route_wide_corridor(path: &Path, width: i32, grid: &mut Grid) -> Result<(), RouteError> {
    ensure_routable(path)?;
    let width = width.max(1);
    for (index, (from, to)) in path.segments().enumerate() {
        draw_wide_segment(from, to, width, grid)
            .map_err(|source| RouteError::Segment { index, source })?;
    }
    Ok(())
}

/// Plain route plus one diagonal tile inside every true corner.
pub fn route_smooth_corridor(path: &Path, grid: &mut Grid) -> Result<(), RouteError> {
    route_corridor(path, grid)?;
    for (index, window) in path.points.windows(3).enumerate() {
        let (previous, vertex, next) = (window[0], window[1], window[2]);
        let incoming = direction(previous, vertex);
        let outgoing = direction(vertex, next);
        if incoming.x == outgoing.x || incoming.y == outgoing.y {
            continue;
        }
        let x = vertex.x + (outgoing.x - incoming.x).signum();
        let y = vertex.y + (outgoing.y - incoming.y).signum();
        grid.set(x, y, TileType::Floor.code())
            .map_err(|source| RouteError::Segment { index: index + 1, source })?;
    }
    Ok(())
}

/// Wide route whose width wobbles by at most one tile per segment.
///
/// The jitter source is the only source of variation; a deterministic source gives a
/// deterministic corridor.
pub fn route_natural_corridor<J: JitterSource>(
    path: &Path,
    base_width: i32,
    grid: &mut Grid,
    mut jitter: J,
) -> Result<(), RouteError> {
    ensure_routable(path)?;
    for (index, (from, to)) in path.segments().enumerate() {
        let mut width = base_width;
        if base_width > 1 {
            width = width.saturating_add(jitter.next_below(3) as i32 - 1);
        }
        draw_wide_segment(from, to, width.max(1), grid)
            .map_err(|source| RouteError::Segment { index, source })?;
    }
    Ok(())
}

fn ensure_routable(path: &Path) -> Result<(), RouteError> {
    if path.len() < 2 {
        return Err(RouteError::InsufficientPoints { points: path.len() });
    }
    Ok(())
}

fn draw_wide_segment(from: Point, to: Point, width: i32, grid: &mut Grid) -> Result<(), GridError> {
    grid.check_rect(from.x, from.y, 1, 1)?;
    grid.check_rect(to.x, to.y, 1, 1)?;
    let horizontal = (to.x - from.x).abs() > (to.y - from.y).abs();
    let floor = TileType::Floor.code();
    for lane in 0..width {
        let offset = lane - width / 2;
        if horizontal {
            let (y0, y1) = (from.y.saturating_add(offset), to.y.saturating_add(offset));
            grid.draw_line(from.x, y0, to.x, y1, floor)?;
        } else {
            let (x0, x1) = (from.x.saturating_add(offset), to.x.saturating_add(offset));
            grid.draw_line(x0, from.y, x1, to.y, floor)?;
        }
    }
    Ok(())
}

fn direction(from: Point, to: Point) -> Point {
    Point::new((to.x - from.x).signum(), (to.y - from.y).signum())
}
