//! Fetch request construction.

use imagery_common::{GeoPoint, ImageryLayer, ObservationDate};

/// Parameters the user chose, without the credential.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageryParams {
    pub point: GeoPoint,
    pub date: ObservationDate,
    pub layer: Option<ImageryLayer>,
}

/// A single outbound imagery request. Built fresh for every fetch.
#[derive(Clone, PartialEq)]
pub struct FetchRequest {
    pub point: GeoPoint,
    pub date: ObservationDate,
    pub layer: Option<ImageryLayer>,
    pub api_key: String,
}

impl FetchRequest {
    pub fn new(params: &ImageryParams, api_key: String) -> Self {
        Self {
            point: params.point,
            date: params.date,
            layer: params.layer,
            api_key,
        }
    }

    /// Query string pairs in the order the provider documents them.
    pub fn query_pairs(&self, dim: f64) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("lat", self.point.lat.to_string()),
            ("lon", self.point.lon.to_string()),
            ("dim", dim.to_string()),
            ("date", self.date.as_param()),
            ("api_key", self.api_key.clone()),
        ];
        if let Some(layer) = self.layer {
            pairs.push(("layer", layer.as_param().to_string()));
        }
        pairs
    }
}

// The key must not end up in logs.
impl std::fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchRequest")
            .field("point", &self.point)
            .field("date", &self.date)
            .field("layer", &self.layer)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
