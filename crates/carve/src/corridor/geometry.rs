//! Pure path geometry shared by routing and downstream placement.

use crate::types::{Path, Point};

/// Drops interior points collinear with their neighbours. Endpoints are always kept.
pub fn simplify_path(path: &Path) -> Path {
    if path.len() < 3 {
        return path.clone();
    }

    let points = &path.points;
    let mut simplified = Vec::with_capacity(points.len());
    simplified.push(points[0]);
    for window in points.windows(3) {
        let (previous, current, next) = (window[0], window[1], window[2]);
        let incoming = (current.x - previous.x, current.y - previous.y);
        let outgoing = (next.x - current.x, next.y - current.y);
        let cross = i64::from(incoming.0) * i64::from(outgoing.1)
            - i64::from(incoming.1) * i64::from(outgoing.0);
        if cross != 0 {
            simplified.push(current);
        }
    }
    simplified.push(points[points.len() - 1]);
    Path::new(simplified)
}

/// Sum of Manhattan distances between consecutive points.
pub fn path_length(path: &Path) -> i32 {
    path.segments().map(|(from, to)| from.manhattan(to)).sum()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSplit {
    pub first: Path,
    pub second: Path,
    pub midpoint: Point,
}

/// Splits a path at half its Manhattan length. Both halves share the midpoint.
///
/// Segments are assumed axis-aligned: the midpoint moves along x whenever the straddling
/// segment changes x, so a diagonal segment yields a point off the segment.
///
/// Paths with fewer than two points come back whole, with an empty second half and a zero
/// midpoint. Callers must check `second.is_empty()`.
pub fn split_path_at_midpoint(path: &Path) -> PathSplit {
    if path.len() < 2 {
        return PathSplit { first: path.clone(), second: Path::empty(), midpoint: Point::default() };
    }

    let half = path_length(path) / 2;
    let points = &path.points;
    let mut walked = 0;
    for (index, (from, to)) in path.segments().enumerate() {
        let segment = from.manhattan(to);
        if walked + segment < half {
            walked += segment;
            continue;
        }

        let remaining = half - walked;
        let midpoint = if from.x != to.x {
            Point::new(from.x + (to.x - from.x).signum() * remaining, from.y)
        } else {
            Point::new(from.x, from.y + (to.y - from.y).signum() * remaining)
        };

        let mut first: Vec<Point> = points[..=index].to_vec();
        if first.last() != Some(&midpoint) {
            first.push(midpoint);
        }
        let mut second = vec![midpoint];
        second.extend(points[index + 1..].iter().copied().skip_while(|&point| point == midpoint));
        return PathSplit { first: Path::new(first), second: Path::new(second), midpoint };
    }

    // Only reachable if lengths overflowed; fall back to the last point as the junction.
    let last = points[points.len() - 1];
    PathSplit { first: path.clone(), second: Path::new(vec![last]), midpoint: last }
}
