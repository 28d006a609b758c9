//! Spherical (Web) Mercator.

use crate::constants::EARTH_CIRCUMFERENCE;
use geo::geometry::Coord;
use rgbtile::TILE_SIZE;
use std::f64::consts::PI;

/// Returns the width (and height), in pixels, of the whole world at
/// `zoom`.
pub fn world_size(zoom: u8) -> f64 {
    f64::from(TILE_SIZE) * 2_f64.powi(i32::from(zoom))
}

/// Projects a (lon, lat) degree coordinate into continuous global pixel
/// space at `zoom`.
///
/// Inputs are not range checked; latitudes beyond ±85.0511° land
/// outside the tile pyramid.
pub fn project(Coord { x: lon, y: lat }: Coord, zoom: u8) -> Coord {
    let world = world_size(zoom);
    Coord {
        x: (lon + 180.0) / 360.0 * world,
        y: (1.0 - lat.to_radians().tan().asinh() / PI) / 2.0 * world,
    }
}

/// Projects like [project], then wraps x across the antimeridian and
/// clamps y so the result always lies on a tile of the pyramid.
///
/// Longitude 180° maps to x = 0, and the southern edge maps to the last
/// pixel row.
pub fn to_world_pixel(coord: Coord, zoom: u8) -> Coord {
    let world = world_size(zoom);
    let last = world * (1.0 - f64::EPSILON);
    let Coord { x, y } = project(coord, zoom);
    Coord {
        x: x.rem_euclid(world).min(last),
        y: y.clamp(0.0, last),
    }
}

/// Returns the ground distance, in meters, spanned by one pixel at
/// latitude `lat` (degrees) and `zoom`.
pub fn pixel_ground_size(lat: f64, zoom: u8) -> f64 {
    EARTH_CIRCUMFERENCE * lat.to_radians().cos() / world_size(zoom)
}
