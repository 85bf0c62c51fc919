//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// A geographic bounding box in degrees (x = longitude, y = latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Square footprint of `dim` degrees centred on a point.
    ///
    /// This is the area the imagery provider covers for a given `dim`.
    pub fn around(center: &GeoPoint, dim: f64) -> Self {
        let half = dim / 2.0;
        Self {
            min_x: center.lon - half,
            min_y: center.lat - half,
            max_x: center.lon + half,
            max_y: center.lat + half,
        }
    }

    /// Width of the bounding box in degrees.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in degrees.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.4},{:.4},{:.4},{:.4}",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}
