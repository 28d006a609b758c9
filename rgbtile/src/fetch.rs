use crate::{PixelGrid, RgbTileError, TileIndex};
use std::{fmt, future::Future};

/// Opaque access token handed through to a [TileFetcher].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

/// Keeps tokens out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(..)")
    }
}

/// Source of decoded terrain tiles.
///
/// Implementations must be usable from many concurrent fetches at
/// once; a profile run issues every fetch before awaiting any of
/// them.
pub trait TileFetcher: Send + Sync {
    /// Retrieves and decodes the tile at `index`.
    fn fetch(
        &self,
        index: TileIndex,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<PixelGrid, RgbTileError>> + Send;
}
