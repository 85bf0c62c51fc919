//! Slippy-map (XYZ) tile coordinates and Web Mercator projection.
//!
//! Tiles follow the OSM convention: top-left origin, 2^z tiles per side,
//! 256-pixel tiles.

use serde::{Deserialize, Serialize};

use crate::coord::{MAX_LONGITUDE, MIN_LONGITUDE};
use crate::{BoundingBox, GeoPoint};

/// Pixel width and height of a single tile.
pub const TILE_SIZE: u32 = 256;

/// Highest zoom served by the public OSM tile servers.
pub const MAX_ZOOM: u32 = 19;

/// Latitude limit of the square Web Mercator world.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

/// A tile coordinate (z/x/y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column (x)
    pub x: u32,
    /// Row (y)
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// `z/x/y` path fragment.
    pub fn path(&self) -> String {
        format!("{}/{}/{}", self.z, self.x, self.y)
    }

    /// Geographic bounds of this tile.
    pub fn bounds(&self) -> BoundingBox {
        tile_to_latlon_bounds(self)
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Number of tiles along each axis at a zoom level.
pub fn tiles_per_side(zoom: u32) -> u32 {
    1u32 << zoom
}

/// Width of the whole world in pixels at a zoom level.
pub fn world_size(zoom: u32) -> f64 {
    TILE_SIZE as f64 * tiles_per_side(zoom) as f64
}

/// Bring any longitude back into [-180, 180].
pub fn wrap_longitude(lon: f64) -> f64 {
    if (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lon) {
        return lon;
    }
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Clamp a latitude into the Web Mercator square.
pub fn clamp_latitude(lat: f64) -> f64 {
    lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
}

/// Project a point to global pixel coordinates at a zoom level.
pub fn project(point: &GeoPoint, zoom: u32) -> (f64, f64) {
    let size = world_size(zoom);
    let lat_rad = clamp_latitude(point.lat).to_radians();

    let x = (point.lon + 180.0) / 360.0 * size;
    let y = (1.0 - lat_rad.tan().asinh() / std::f64::consts::PI) / 2.0 * size;
    (x, y)
}

/// Inverse of [`project`]. The longitude is wrapped, so pixels outside the
/// world still map to a valid point.
pub fn unproject(x: f64, y: f64, zoom: u32) -> GeoPoint {
    let size = world_size(zoom);

    let lon = wrap_longitude(x / size * 360.0 - 180.0);
    let lat = (std::f64::consts::PI * (1.0 - 2.0 * y / size))
        .sinh()
        .atan()
        .to_degrees();

    GeoPoint {
        lat: clamp_latitude(lat),
        lon,
    }
}

/// Convert lat/lon to Web Mercator tile coordinates.
pub fn latlon_to_tile(lat: f64, lon: f64, zoom: u32) -> TileCoord {
    let n = tiles_per_side(zoom);
    let point = GeoPoint {
        lat: clamp_latitude(lat),
        lon: wrap_longitude(lon),
    };
    let (px, py) = project(&point, zoom);

    let max_index = (n - 1) as f64;
    let x = (px / TILE_SIZE as f64).floor().clamp(0.0, max_index) as u32;
    let y = (py / TILE_SIZE as f64).floor().clamp(0.0, max_index) as u32;

    TileCoord { z: zoom, x, y }
}

/// Convert Web Mercator tile coordinates to lat/lon bounds.
pub fn tile_to_latlon_bounds(coord: &TileCoord) -> BoundingBox {
    let n = tiles_per_side(coord.z) as f64;

    let lon_min = coord.x as f64 / n * 360.0 - 180.0;
    let lon_max = (coord.x + 1) as f64 / n * 360.0 - 180.0;

    let lat_max = (std::f64::consts::PI * (1.0 - 2.0 * coord.y as f64 / n))
        .sinh()
        .atan()
        .to_degrees();
    let lat_min = (std::f64::consts::PI * (1.0 - 2.0 * (coord.y + 1) as f64 / n))
        .sinh()
        .atan()
        .to_degrees();

    BoundingBox::new(lon_min, lat_min, lon_max, lat_max)
}
