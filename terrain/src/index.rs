//! Matching sample points to the tiles that hold their pixels.

use crate::{math::to_world_pixel, TerrainError};
use geo::geometry::Coord;
use rgbtile::{PixelGrid, TileIndex, TILE_SIZE};

/// A location along the path being profiled.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePoint {
    /// Longitude/latitude in degrees.
    pub coord: Coord,

    /// Distance from the start of the path in meters.
    pub distance_m: f64,

    /// Global Mercator pixel coordinates at the run's zoom.
    pub pixel: Coord,

    /// Decoded elevation in meters; `None` until resolved.
    pub elevation_m: Option<f64>,
}

impl SamplePoint {
    /// Returns an unresolved sample projected into pixel space at
    /// `zoom`.
    ///
    /// Points on the antimeridian or the pyramid's southern edge land on
    /// the tile they border, never outside the world.
    pub fn new(coord: Coord, distance_m: f64, zoom: u8) -> Self {
        Self {
            coord,
            distance_m,
            pixel: to_world_pixel(coord, zoom),
            elevation_m: None,
        }
    }
}

/// A required tile and, once fetched, its pixels.
#[derive(Debug)]
pub struct TileDescriptor {
    index: TileIndex,
    origin: Coord,
    grid: Option<PixelGrid>,
}

impl TileDescriptor {
    pub fn new(index: TileIndex) -> Self {
        let (x, y) = index.pixel_origin();
        Self {
            index,
            origin: Coord { x, y },
            grid: None,
        }
    }

    pub fn index(&self) -> TileIndex {
        self.index
    }

    /// Global pixel coordinates of the top-left corner.
    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn grid(&self) -> Option<&PixelGrid> {
        self.grid.as_ref()
    }

    pub fn set_grid(&mut self, grid: PixelGrid) {
        debug_assert!(self.grid.is_none(), "tile {} fetched twice", self.index);
        self.grid = Some(grid);
    }

    /// Returns true if `pixel` lies in this tile's half-open
    /// `[origin, origin + 256)` square.
    ///
    /// Half-open bounds give every pixel on a shared edge to exactly one
    /// tile: the one to its east or south.
    pub fn contains(&self, pixel: Coord) -> bool {
        let size = f64::from(TILE_SIZE);
        (self.origin.x..self.origin.x + size).contains(&pixel.x)
            && (self.origin.y..self.origin.y + size).contains(&pixel.y)
    }
}

/// Fetched tiles of one profile run, in tile-cover order.
#[derive(Debug)]
pub struct CoverageIndex {
    tiles: Vec<TileDescriptor>,
}

impl CoverageIndex {
    pub fn new(tiles: Vec<TileDescriptor>) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> &[TileDescriptor] {
        &self.tiles
    }

    /// Returns the first fetched tile containing `point` and the
    /// point's integer pixel offset within it.
    pub fn resolve(&self, point: &SamplePoint) -> Result<(&PixelGrid, u32, u32), TerrainError> {
        self.tiles
            .iter()
            .filter(|tile| tile.contains(point.pixel))
            .find_map(|tile| {
                let grid = tile.grid()?;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let col = (point.pixel.x - tile.origin.x).floor() as u32;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let row = (point.pixel.y - tile.origin.y).floor() as u32;
                Some((grid, col, row))
            })
            .ok_or(TerrainError::CoverageMismatch {
                coord: point.coord,
                pixel: point.pixel,
            })
    }

    /// Decodes the elevation under `point`.
    pub fn elevation(&self, point: &SamplePoint) -> Result<f64, TerrainError> {
        let (grid, col, row) = self.resolve(point)?;
        grid.elevation(col, row).ok_or(TerrainError::CoverageMismatch {
            coord: point.coord,
            pixel: point.pixel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CoverageIndex, SamplePoint, TileDescriptor};
    use crate::TerrainError;
    use geo::coord;
    use rgbtile::{PixelGrid, TileIndex};

    fn fetched(x: u32, y: u32, rgb: [u8; 3]) -> TileDescriptor {
        let mut tile = TileDescriptor::new(TileIndex::new(x, y, 15));
        tile.set_grid(PixelGrid::uniform(256, 256, rgb));
        tile
    }

    fn at_pixel(x: f64, y: f64) -> SamplePoint {
        SamplePoint {
            pixel: coord!(x: x, y: y),
            ..SamplePoint::new(coord!(x: 0.0, y: 0.0), 0.0, 15)
        }
    }

    #[test]
    fn test_origin() {
        let tile = TileDescriptor::new(TileIndex::new(16_384, 16_383, 15));
        assert_eq!(tile.origin(), coord!(x: 4_194_304.0, y: 4_194_048.0));
    }

    #[test]
    fn test_half_open_edges() {
        let tile = TileDescriptor::new(TileIndex::new(1, 1, 15));
        assert!(tile.contains(coord!(x: 256.0, y: 256.0)));
        assert!(tile.contains(coord!(x: 511.999, y: 300.0)));
        assert!(!tile.contains(coord!(x: 512.0, y: 300.0)));
        assert!(!tile.contains(coord!(x: 300.0, y: 512.0)));
        assert!(!tile.contains(coord!(x: 255.999, y: 300.0)));
    }

    #[test]
    fn test_resolve_offsets() {
        let index = CoverageIndex::new(vec![fetched(0, 0, [0, 0, 0]), fetched(1, 0, [0, 0, 1])]);
        let (grid, col, row) = index.resolve(&at_pixel(300.7, 12.2)).unwrap();
        assert_eq!((col, row), (44, 12));
        assert_eq!(grid.get(col, row), Some([0, 0, 1]));
    }

    #[test]
    fn test_shared_edge_goes_east() {
        let index = CoverageIndex::new(vec![fetched(0, 0, [0, 0, 0]), fetched(1, 0, [0, 0, 1])]);
        let (grid, col, row) = index.resolve(&at_pixel(256.0, 0.0)).unwrap();
        assert_eq!((col, row), (0, 0));
        assert_eq!(grid.get(col, row), Some([0, 0, 1]));
    }

    #[test]
    fn test_first_listed_wins() {
        let first = fetched(0, 0, [1, 0, 0]);
        let second = fetched(0, 0, [2, 0, 0]);
        let index = CoverageIndex::new(vec![first, second]);
        let (grid, ..) = index.resolve(&at_pixel(5.0, 5.0)).unwrap();
        assert_eq!(grid.get(0, 0), Some([1, 0, 0]));
    }

    #[test]
    fn test_unfetched_tiles_are_skipped() {
        let pending = TileDescriptor::new(TileIndex::new(0, 0, 15));
        let index = CoverageIndex::new(vec![pending, fetched(0, 0, [0, 0, 7])]);
        let (grid, ..) = index.resolve(&at_pixel(5.0, 5.0)).unwrap();
        assert_eq!(grid.get(0, 0), Some([0, 0, 7]));
    }

    #[test]
    fn test_mismatch() {
        let index = CoverageIndex::new(vec![fetched(0, 0, [0, 0, 0])]);
        assert!(matches!(
            index.resolve(&at_pixel(600.0, 5.0)),
            Err(TerrainError::CoverageMismatch { .. })
        ));
    }

    #[test]
    fn test_world_edges_resolve() {
        let east = SamplePoint::new(coord!(x: 180.0, y: 10.0), 0.0, 15);
        let row = (east.pixel.y / 256.0).floor();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = CoverageIndex::new(vec![fetched(0, row as u32, [0, 0, 3])]);
        let (grid, col, _) = index.resolve(&east).unwrap();
        assert_eq!(col, 0);
        assert_eq!(grid.get(0, 0), Some([0, 0, 3]));

        let south = SamplePoint::new(coord!(x: -180.0, y: -85.051_128_779_806_59), 0.0, 15);
        let index = CoverageIndex::new(vec![fetched(0, 32_767, [0, 0, 4])]);
        let (_, col, row) = index.resolve(&south).unwrap();
        assert_eq!((col, row), (0, 255));
    }

    #[test]
    fn test_elevation() {
        let index = CoverageIndex::new(vec![fetched(0, 0, [10, 0, 0])]);
        assert_eq!(index.elevation(&at_pixel(128.0, 128.0)).unwrap(), 55_536.0);
    }
}
