/// Default zoom level tiles are fetched and points projected at.
pub const ZOOM: u8 = 15;

/// Deepest zoom level a profile can be built at.
pub const MAX_ZOOM: u8 = 22;

/// Equatorial circumference of the WGS84 ellipsoid, in meters.
pub const EARTH_CIRCUMFERENCE: f64 = 40_075_016.686;

/// Mean earth radius, in meters, used for great-circle math.
///
/// Matches the radius used by the [geo] crate's haversine routines.
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;
