//! Background tile layer.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use imagery_common::tile::{TileCoord, MAX_ZOOM};
use imagery_common::{ViewerError, ViewerResult};

/// Configuration for an XYZ tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    /// Subdomains substituted for `{s}`
    pub subdomains: Vec<String>,
    /// Attribution text
    pub attribution: String,
    /// Maximum zoom level for this tile source
    pub max_zoom: u32,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self::openstreetmap()
    }
}

impl TileLayer {
    /// Standard OpenStreetMap tiles.
    pub fn openstreetmap() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            attribution: "© OpenStreetMap contributors".to_string(),
            max_zoom: MAX_ZOOM,
        }
    }

    /// Subdomain for a tile, spread by `(x + y) mod n`.
    pub fn subdomain(&self, coord: &TileCoord) -> &str {
        if self.subdomains.is_empty() {
            return "";
        }
        let index = (coord.x as usize + coord.y as usize) % self.subdomains.len();
        &self.subdomains[index]
    }

    pub fn tile_url(&self, coord: &TileCoord) -> String {
        self.url_template
            .replace("{s}", self.subdomain(coord))
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}

/// Downloads background tiles. No authentication is involved.
pub struct TileClient {
    client: Client,
    layer: TileLayer,
}

impl TileClient {
    pub fn new(layer: TileLayer, user_agent: &str) -> ViewerResult<Self> {
        // The OSM tile policy requires an identifying user agent.
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ViewerError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, layer })
    }

    pub fn layer(&self) -> &TileLayer {
        &self.layer
    }

    #[instrument(skip(self), fields(tile = %coord))]
    pub async fn fetch_tile(&self, coord: &TileCoord) -> ViewerResult<Bytes> {
        if coord.z > self.layer.max_zoom {
            return Err(ViewerError::invalid_parameter(
                "zoom",
                format!("{} exceeds tile layer maximum {}", coord.z, self.layer.max_zoom),
            ));
        }

        let url = self.layer.tile_url(coord);
        debug!(url = %url, "Fetching tile");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ViewerError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ViewerError::Http {
                status: status.as_u16(),
                message: status.canonical_reason().map(str::to_string),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| ViewerError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_url() {
        let layer = TileLayer::openstreetmap();
        assert_eq!(
            layer.tile_url(&TileCoord::new(5, 5, 12)),
            "https://c.tile.openstreetmap.org/5/5/12.png"
        );
        assert_eq!(
            layer.tile_url(&TileCoord::new(0, 0, 0)),
            "https://a.tile.openstreetmap.org/0/0/0.png"
        );
    }

    #[test]
    fn test_template_without_subdomains() {
        let layer = TileLayer {
            url_template: "http://localhost/{z}/{x}/{y}.png".to_string(),
            subdomains: Vec::new(),
            attribution: String::new(),
            max_zoom: 3,
        };
        assert_eq!(
            layer.tile_url(&TileCoord::new(3, 1, 2)),
            "http://localhost/3/1/2.png"
        );
    }

    #[tokio::test]
    async fn test_fetch_rejects_zoom_above_max() {
        let layer = TileLayer {
            max_zoom: 2,
            ..TileLayer::openstreetmap()
        };
        let client = TileClient::new(layer, "map-view-tests").unwrap();
        let err = client.fetch_tile(&TileCoord::new(3, 0, 0)).await.unwrap_err();
        assert!(matches!(err, ViewerError::InvalidParameter { .. }));
    }
}
