//! Distances along paths.

use crate::math::GreatCircle;
use geo::geometry::{Coord, LineString, Point};

/// Measures a path and locates points along it.
pub trait PathMeasure {
    /// Total length of `path` in meters.
    fn length_m(&self, path: &LineString) -> f64;

    /// Returns the coordinate `meters` along `path` from its start.
    ///
    /// Distances before the start or past the end clamp to the first or
    /// last coordinate.
    fn point_at(&self, path: &LineString, meters: f64) -> Coord;
}

/// Great-circle measurement on a spherical earth.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl PathMeasure for Haversine {
    fn length_m(&self, path: &LineString) -> f64 {
        path.lines()
            .map(|line| GreatCircle::new(line.start.into(), line.end.into()).length_m())
            .sum()
    }

    fn point_at(&self, path: &LineString, meters: f64) -> Coord {
        let (Some(first), Some(last)) = (path.0.first(), path.0.last()) else {
            return Coord { x: 0.0, y: 0.0 };
        };
        if meters <= 0.0 {
            return *first;
        }

        let mut walked_m = 0.0;
        for line in path.lines() {
            let segment = GreatCircle::new(Point::from(line.start), Point::from(line.end));
            let segment_m = segment.length_m();
            if segment_m > 0.0 && walked_m + segment_m >= meters {
                let fraction = (meters - walked_m) / segment_m;
                return if fraction >= 1.0 {
                    line.end
                } else {
                    segment.point_at(fraction).into()
                };
            }
            walked_m += segment_m;
        }
        *last
    }
}
