use geo::geometry::Coord;
use rgbtile::{RgbTileError, TileIndex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("path needs at least 2 coordinates, got {0}")]
    TooFewCoords(usize),

    #[error("path has zero length")]
    ZeroLength,

    #[error("profile needs at least 2 samples, got {0}")]
    TooFewSamples(usize),

    #[error("zoom must be at most {}, got {0}", crate::MAX_ZOOM)]
    InvalidZoom(u8),

    #[error("minimum spacing must be positive, got {0}")]
    InvalidSpacing(f64),

    #[error("fetching tile {index}: {source}")]
    Fetch {
        index: TileIndex,
        #[source]
        source: RgbTileError,
    },

    #[error("no fetched tile covers {coord:?} (pixel {pixel:?})")]
    CoverageMismatch { coord: Coord, pixel: Coord },
}
