//! Common types and utilities shared across the earth imagery crates.

pub mod bbox;
pub mod coord;
pub mod error;
pub mod layer;
pub mod tile;
pub mod time;

pub use bbox::BoundingBox;
pub use coord::{format_coordinate, parse_latitude, parse_longitude, GeoPoint};
pub use error::{FailureKind, ViewerError, ViewerResult};
pub use layer::ImageryLayer;
pub use tile::TileCoord;
pub use time::ObservationDate;
