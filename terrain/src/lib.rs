//! # Terrain Profiles
//!
//! `terrain` samples a path, fetches the RGB terrain tiles under it,
//! and decodes an elevation for every sample.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use std::time::Duration;
//! use terrain::{geo::line_string, Credentials, HttpTileSource, MinSpacing, Profile};
//!
//! let tiles = HttpTileSource::mapbox(Duration::from_secs(30))?;
//! let profile = Profile::builder()
//!     .path(line_string![(x: -71.3083, y: 44.2831), (x: -71.2972, y: 44.2563)])
//!     .samples(100)
//!     .min_spacing(MinSpacing::Auto)
//!     .build(&tiles, &Credentials::new("pk.my-token"))
//!     .await?;
//! println!("{} samples", profile.len());
//! # Ok(())
//! # }
//! ```

mod constants;
mod cover;
mod error;
mod geodesy;
mod index;
pub mod math;
mod planner;
mod profile;

pub use crate::{
    constants::{EARTH_CIRCUMFERENCE, MAX_ZOOM, MEAN_EARTH_RADIUS, ZOOM},
    cover::{LineCover, TileCover},
    error::TerrainError,
    geodesy::{Haversine, PathMeasure},
    index::{CoverageIndex, SamplePoint, TileDescriptor},
    planner::{plan, MinSpacing},
    profile::{Profile, ProfileBuilder},
};
pub use geo;
pub use geojson;
pub use rgbtile::{
    self, decode, Credentials, HttpTileSource, PixelGrid, RgbTileError, TileFetcher, TileIndex,
    MAPBOX_TERRAIN_RGB, TILE_SIZE,
};
