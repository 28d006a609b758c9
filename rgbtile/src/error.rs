use crate::TileIndex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RgbTileError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("tile {index} request failed with status {status}")]
    Status { index: TileIndex, status: u16 },

    #[error("{0}")]
    Image(#[from] image::ImageError),

    #[error("invalid tile dimensions {width}x{height}")]
    Dimensions { width: u32, height: u32 },

    #[error("pixel buffer len {len} does not match {width}x{height} RGB")]
    BufferLen { len: usize, width: u32, height: u32 },

    #[error("{0}")]
    Provider(String),
}
