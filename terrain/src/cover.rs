//! Finding the tiles a path crosses.

use crate::{
    constants::MAX_ZOOM,
    math::{to_world_pixel, world_size, GreatCircle},
};
use geo::geometry::{Coord, LineString, Point};
use itertools::Itertools;
use rgbtile::{TileIndex, TILE_SIZE};

/// Reports which tiles a path intersects.
pub trait TileCover {
    /// Returns every tile at `zoom` that `path` passes through.
    ///
    /// Order matters: when more than one returned tile contains a
    /// sample, the first one listed supplies its elevation.
    fn tiles(&self, path: &LineString, zoom: u8) -> Vec<TileIndex>;
}

/// Covers each segment's great circle with a grid walk in Mercator
/// tile space.
///
/// Segments crossing the antimeridian are walked the short way round.
/// Zoom levels above [MAX_ZOOM] cover nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineCover;

/// Maximum distance, in tiles, between densified points.
const MAX_CHORD: f64 = 1.0 / 8.0;

impl TileCover for LineCover {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn tiles(&self, path: &LineString, zoom: u8) -> Vec<TileIndex> {
        if zoom > MAX_ZOOM {
            return Vec::new();
        }
        let size = f64::from(TILE_SIZE);
        let tiles_per_side = 1_i64 << zoom;
        let world = world_size(zoom) / size;

        let to_tile_space = |coord: Coord| {
            let px = to_world_pixel(coord, zoom);
            Coord {
                x: px.x / size,
                y: px.y / size,
            }
        };
        // Shifts `next` by whole worlds to within half a world of `prev`.
        let unwrap = |prev: Coord, next: Coord| Coord {
            x: next.x - world * ((next.x - prev.x) / world).round(),
            y: next.y,
        };

        let mut visited = Vec::new();
        if let [only] = path.0.as_slice() {
            walk(to_tile_space(*only), to_tile_space(*only), &mut visited);
        }
        for line in path.lines() {
            let great_circle = GreatCircle::new(Point::from(line.start), Point::from(line.end));
            let start = to_tile_space(line.start);
            let end = unwrap(start, to_tile_space(line.end));
            let chords = ((end - start).x.hypot((end - start).y) / MAX_CHORD)
                .ceil()
                .max(1.0) as u32;
            let mut prev = start;
            for i in 1..=chords {
                let next = if i == chords {
                    to_tile_space(line.end)
                } else {
                    let fraction = f64::from(i) / f64::from(chords);
                    to_tile_space(great_circle.point_at(fraction).into())
                };
                let next = unwrap(prev, next);
                walk(prev, next, &mut visited);
                prev = next;
            }
        }

        visited
            .into_iter()
            .map(|(x, y)| (x.rem_euclid(tiles_per_side), y))
            .filter(|&(_, y)| (0..tiles_per_side).contains(&y))
            .unique()
            .map(|(x, y)| TileIndex::new(x as u32, y as u32, zoom))
            .collect()
    }
}

/// Appends every grid cell the straight line from `from` to `to`
/// passes through, in order, including both end cells.
#[allow(clippy::cast_possible_truncation)]
fn walk(from: Coord, to: Coord, visited: &mut Vec<(i64, i64)>) {
    let (mut x, mut y) = (from.x.floor() as i64, from.y.floor() as i64);
    let (end_x, end_y) = (to.x.floor() as i64, to.y.floor() as i64);
    visited.push((x, y));

    let Coord { x: dx, y: dy } = to - from;
    let (step_x, t_delta_x, mut t_max_x) = axis(from.x, dx);
    let (step_y, t_delta_y, mut t_max_y) = axis(from.y, dy);

    for _ in 0..(end_x - x).abs() + (end_y - y).abs() {
        if x != end_x && (y == end_y || t_max_x < t_max_y) {
            x += step_x;
            t_max_x += t_delta_x;
        } else {
            y += step_y;
            t_max_y += t_delta_y;
        }
        visited.push((x, y));
    }
}

/// Returns (step, parametric distance per cell, parametric distance to
/// the first cell boundary) along one axis.
fn axis(start: f64, delta: f64) -> (i64, f64, f64) {
    let cell = start.floor();
    if delta > 0.0 {
        (1, 1.0 / delta, (cell + 1.0 - start) / delta)
    } else if delta < 0.0 {
        (-1, -1.0 / delta, (cell - start) / delta)
    } else {
        (0, f64::INFINITY, f64::INFINITY)
    }
}
