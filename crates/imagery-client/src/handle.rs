//! In-memory handles to fetched imagery.

use std::io::Cursor;
use std::path::Path;

use bytes::Bytes;
use tracing::{debug, info};
use uuid::Uuid;

use imagery_common::ViewerResult;

/// A fetched image kept in memory, addressable by a `blob:` URL.
///
/// The bytes are exactly the response payload; nothing is re-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    id: Uuid,
    bytes: Bytes,
    content_type: Option<String>,
    dimensions: Option<(u32, u32)>,
}

impl ImageHandle {
    /// Wrap a payload. Dimensions are read from the image header when the
    /// payload is a raster format we can recognise.
    pub fn from_payload(bytes: Bytes, content_type: Option<String>) -> Self {
        let dimensions = read_dimensions(&bytes);
        if dimensions.is_none() {
            debug!(len = bytes.len(), "Payload dimensions unknown");
        }

        Self {
            id: Uuid::new_v4(),
            bytes,
            content_type,
            dimensions,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Object-URL style reference to this image.
    pub fn url(&self) -> String {
        format!("blob:{}", self.id)
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    /// Write the payload to disk unchanged.
    pub async fn save(&self, path: &Path) -> ViewerResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, &self.bytes).await?;
        info!(path = %path.display(), bytes = self.bytes.len(), "Saved image");
        Ok(())
    }
}

fn read_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::io::Reader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}
