//! RGB-encoded terrain tiles.
//!
//! Each pixel of a terrain tile packs an elevation into its red, green,
//! and blue channels as a 24-bit big-endian integer of decimeters above
//! -10 km.
//!
//! # References
//!
//! 1. [Mapbox Terrain-RGB](https://docs.mapbox.com/data/tilesets/reference/mapbox-terrain-rgb-v1/)
//! 1. [Slippy map tilenames](https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames)

mod error;
mod fetch;
mod http;

pub use crate::{
    error::RgbTileError,
    fetch::{Credentials, TileFetcher},
    http::{HttpTileSource, MAPBOX_TERRAIN_RGB},
};
use std::fmt;

/// Width and height, in pixels, of every tile.
pub const TILE_SIZE: u32 = 256;

/// Elevation of an all-zero pixel, in meters.
const BASE_ELEVATION_M: f64 = -10_000.0;

/// Meters per unit of the packed 24-bit value.
const RESOLUTION_M: f64 = 0.1;

/// Returns the elevation, in meters, encoded by one pixel.
pub fn decode(red: u8, green: u8, blue: u8) -> f64 {
    let packed = (u32::from(red) << 16) | (u32::from(green) << 8) | u32::from(blue);
    BASE_ELEVATION_M + f64::from(packed) * RESOLUTION_M
}

/// A tile's position in the XYZ tiling scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileIndex {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileIndex {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Returns the global pixel coordinates of this tile's top-left
    /// corner at its own zoom level.
    pub fn pixel_origin(&self) -> (f64, f64) {
        (
            f64::from(self.x) * f64::from(TILE_SIZE),
            f64::from(self.y) * f64::from(TILE_SIZE),
        )
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Decoded RGB pixels of one tile, stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    samples: Box<[u8]>,
}

impl PixelGrid {
    /// Returns a grid backed by packed RGB8 `samples`.
    pub fn from_rgb8(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, RgbTileError> {
        let expected = width as usize * height as usize * 3;
        if samples.len() != expected {
            return Err(RgbTileError::BufferLen {
                len: samples.len(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            samples: samples.into_boxed_slice(),
        })
    }

    /// Decodes a PNG image into a grid, dropping any alpha channel.
    pub fn from_png(bytes: &[u8]) -> Result<Self, RgbTileError> {
        let image =
            image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?.into_rgb8();
        let (width, height) = image.dimensions();
        Self::from_rgb8(width, height, image.into_raw())
    }

    /// Returns a grid where every pixel is `rgb`.
    pub fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let samples = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            width,
            height,
            samples,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the `[red, green, blue]` pixel at (`col`, `row`), if
    /// in bounds.
    pub fn get(&self, col: u32, row: u32) -> Option<[u8; 3]> {
        if col < self.width && row < self.height {
            let start = (row as usize * self.width as usize + col as usize) * 3;
            let px = &self.samples[start..start + 3];
            Some([px[0], px[1], px[2]])
        } else {
            None
        }
    }

    /// Returns the decoded elevation at (`col`, `row`), if in bounds.
    pub fn elevation(&self, col: u32, row: u32) -> Option<f64> {
        self.get(col, row).map(|[r, g, b]| decode(r, g, b))
    }
}

impl fmt::Debug for PixelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, PixelGrid, RgbTileError, TileIndex, TILE_SIZE};
    use approx::assert_relative_eq;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_decode_bounds() {
        assert_relative_eq!(decode(0, 0, 0), -10_000.0);
        assert_relative_eq!(decode(255, 255, 255), 1_667_721.5);
    }

    #[test]
    fn test_decode_sea_level() {
        // 100_000 decimeters above the -10 km base.
        assert_relative_eq!(decode(1, 134, 160), 0.0, epsilon = 1e-9);
        assert_relative_eq!(decode(10, 0, 0), 55_536.0);
    }

    #[test]
    fn test_decode_monotonic() {
        let mut prev = f64::MIN;
        for packed in (0_u32..1 << 24).step_by(4099) {
            let [_, r, g, b] = packed.to_be_bytes();
            let elevation = decode(r, g, b);
            assert!(elevation >= prev, "{packed}: {elevation} < {prev}");
            prev = elevation;
        }
    }

    #[test]
    fn test_pixel_origin() {
        let index = TileIndex::new(9_650, 12_320, 15);
        assert_eq!(index.pixel_origin(), (2_470_400.0, 3_153_920.0));
        assert_eq!(index.to_string(), "15/9650/12320");
    }

    #[test]
    fn test_grid_lookup() {
        let mut samples = vec![0; 2 * 2 * 3];
        // (col 1, row 0)
        samples[3..6].copy_from_slice(&[1, 2, 3]);
        // (col 0, row 1)
        samples[6..9].copy_from_slice(&[4, 5, 6]);
        let grid = PixelGrid::from_rgb8(2, 2, samples).unwrap();
        assert_eq!(grid.get(1, 0), Some([1, 2, 3]));
        assert_eq!(grid.get(0, 1), Some([4, 5, 6]));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn test_grid_bad_len() {
        assert!(matches!(
            PixelGrid::from_rgb8(2, 2, vec![0; 11]),
            Err(RgbTileError::BufferLen { len: 11, .. })
        ));
    }

    #[test]
    fn test_from_png() {
        let img = RgbImage::from_pixel(TILE_SIZE, TILE_SIZE, Rgb([10, 0, 0]));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        let grid = PixelGrid::from_png(&png).unwrap();
        assert_eq!(grid.width(), TILE_SIZE);
        assert_eq!(grid.height(), TILE_SIZE);
        assert_eq!(grid, PixelGrid::uniform(TILE_SIZE, TILE_SIZE, [10, 0, 0]));
        assert_relative_eq!(grid.elevation(255, 255).unwrap(), 55_536.0);
    }
}
