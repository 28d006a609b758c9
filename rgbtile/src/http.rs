//! Terrain tiles over HTTP.

use crate::{Credentials, PixelGrid, RgbTileError, TileFetcher, TileIndex, TILE_SIZE};
use log::{debug, warn};
use std::time::Duration;

/// Mapbox Terrain-RGB raw PNG endpoint.
pub const MAPBOX_TERRAIN_RGB: &str =
    "https://api.mapbox.com/v4/mapbox.terrain-rgb/{z}/{x}/{y}.pngraw?access_token={token}";

/// Fetches PNG-encoded terrain tiles from a URL template.
///
/// The template's `{z}`, `{x}`, `{y}`, and `{token}` placeholders are
/// substituted per request.
#[derive(Debug, Clone)]
pub struct HttpTileSource {
    url_template: String,
    client: reqwest::Client,
}

impl HttpTileSource {
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Result<Self, RgbTileError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url_template: url_template.into(),
            client,
        })
    }

    /// Returns a source for Mapbox Terrain-RGB tiles.
    pub fn mapbox(timeout: Duration) -> Result<Self, RgbTileError> {
        Self::new(MAPBOX_TERRAIN_RGB, timeout)
    }

    fn url(&self, index: TileIndex, credentials: &Credentials) -> String {
        self.url_template
            .replace("{z}", &index.z.to_string())
            .replace("{x}", &index.x.to_string())
            .replace("{y}", &index.y.to_string())
            .replace("{token}", credentials.token())
    }
}

impl TileFetcher for HttpTileSource {
    async fn fetch(
        &self,
        index: TileIndex,
        credentials: &Credentials,
    ) -> Result<PixelGrid, RgbTileError> {
        debug!("fetching tile {index}");
        let response = self.client.get(self.url(index, credentials)).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("tile {index}: HTTP {status}");
            return Err(RgbTileError::Status {
                index,
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().await?;
        let grid = PixelGrid::from_png(&bytes)?;
        if grid.width() != TILE_SIZE || grid.height() != TILE_SIZE {
            return Err(RgbTileError::Dimensions {
                width: grid.width(),
                height: grid.height(),
            });
        }
        debug!("tile {index}: {} bytes", bytes.len());
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::{Credentials, HttpTileSource, TileIndex};
    use std::time::Duration;

    #[test]
    fn test_mapbox_url() {
        let src = HttpTileSource::mapbox(Duration::from_secs(1)).unwrap();
        let url = src.url(TileIndex::new(9_650, 12_320, 15), &Credentials::new("pk.test"));
        assert_eq!(
            url,
            "https://api.mapbox.com/v4/mapbox.terrain-rgb/15/9650/12320.pngraw?access_token=pk.test"
        );
    }

    #[test]
    fn test_custom_template() {
        let src =
            HttpTileSource::new("http://localhost/{z}-{x}-{y}.png", Duration::from_secs(1)).unwrap();
        let url = src.url(TileIndex::new(1, 2, 3), &Credentials::default());
        assert_eq!(url, "http://localhost/3-1-2.png");
    }

    #[test]
    fn test_credentials_not_logged() {
        let creds = Credentials::new("sk.secret");
        assert!(!format!("{creds:?}").contains("secret"));
        assert_eq!(creds.token(), "sk.secret");
    }
}
