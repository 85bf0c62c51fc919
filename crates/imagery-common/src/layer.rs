//! Imagery dataset layers offered by the provider.

use serde::{Deserialize, Serialize};

use crate::ViewerError;

/// Dataset selector sent as the `layer` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageryLayer {
    #[default]
    Natural,
    Vegetation,
    Thermal,
}

impl ImageryLayer {
    pub const ALL: [ImageryLayer; 3] = [
        ImageryLayer::Natural,
        ImageryLayer::Vegetation,
        ImageryLayer::Thermal,
    ];

    /// Value used on the wire.
    pub fn as_param(&self) -> &'static str {
        match self {
            ImageryLayer::Natural => "natural",
            ImageryLayer::Vegetation => "vegetation",
            ImageryLayer::Thermal => "thermal",
        }
    }

    /// Human-readable title for selectors and listings.
    pub fn title(&self) -> &'static str {
        match self {
            ImageryLayer::Natural => "Natural Color",
            ImageryLayer::Vegetation => "Vegetation Index (NDVI)",
            ImageryLayer::Thermal => "Thermal Infrared",
        }
    }
}

impl std::fmt::Display for ImageryLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_param())
    }
}

impl std::str::FromStr for ImageryLayer {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ImageryLayer::ALL
            .into_iter()
            .find(|layer| layer.as_param().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ViewerError::invalid_parameter(
                    "layer",
                    format!("'{}' is not one of natural, vegetation, thermal", wanted),
                )
            })
    }
}
