//! Map viewport in Web Mercator pixel space.

use imagery_common::tile::{self, TileCoord, MAX_ZOOM, TILE_SIZE};
use imagery_common::GeoPoint;
use serde::{Deserialize, Serialize};

/// The visible part of the map: a centre, a zoom and a pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(center: GeoPoint, zoom: u32, width: u32, height: u32) -> Self {
        Self {
            center,
            zoom: zoom.min(MAX_ZOOM),
            width,
            height,
        }
    }

    pub fn set_center(&mut self, center: GeoPoint) {
        self.center = center;
    }

    /// Set the zoom, clamped to the tile server's range.
    pub fn set_zoom(&mut self, zoom: u32) {
        self.zoom = zoom.min(MAX_ZOOM);
    }

    /// Global pixel position of the viewport's top-left corner.
    fn origin(&self) -> (f64, f64) {
        let (cx, cy) = tile::project(&self.center, self.zoom);
        (cx - self.width as f64 / 2.0, cy - self.height as f64 / 2.0)
    }

    /// Geographic position under a viewport pixel.
    pub fn pixel_to_geo(&self, x: f64, y: f64) -> GeoPoint {
        let (ox, oy) = self.origin();
        tile::unproject(ox + x, oy + y, self.zoom)
    }

    /// Viewport pixel of a geographic position. May lie outside the
    /// viewport.
    pub fn geo_to_pixel(&self, point: &GeoPoint) -> (f64, f64) {
        let (ox, oy) = self.origin();
        let (px, py) = tile::project(point, self.zoom);
        (px - ox, py - oy)
    }

    pub fn contains_pixel(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64
    }

    /// Tiles needed to cover the viewport, row by row.
    ///
    /// Columns wrap around the antimeridian; rows beyond the poles are
    /// skipped.
    pub fn visible_tiles(&self) -> Vec<TileCoord> {
        let n = tile::tiles_per_side(self.zoom) as i64;
        let size = TILE_SIZE as f64;
        let (ox, oy) = self.origin();

        let first_col = (ox / size).floor() as i64;
        let last_col = ((ox + self.width as f64 - 1.0) / size).floor() as i64;
        let first_row = ((oy / size).floor() as i64).max(0);
        let last_row = (((oy + self.height as f64 - 1.0) / size).floor() as i64).min(n - 1);

        let mut tiles = Vec::new();
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                let coord = TileCoord::new(self.zoom, col.rem_euclid(n) as u32, row as u32);
                if !tiles.contains(&coord) {
                    tiles.push(coord);
                }
            }
        }
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(lat: f64, lon: f64, zoom: u32) -> Viewport {
        Viewport::new(GeoPoint::new(lat, lon).unwrap(), zoom, 512, 256)
    }

    #[test]
    fn test_center_pixel_is_center() {
        let vp = viewport(37.7749, -122.4194, 5);
        let point = vp.pixel_to_geo(256.0, 128.0);
        assert!((point.lat - 37.7749).abs() < 1e-9);
        assert!((point.lon - -122.4194).abs() < 1e-9);
    }

    #[test]
    fn test_geo_to_pixel_inverse() {
        let vp = viewport(10.0, 20.0, 6);
        let point = vp.pixel_to_geo(40.0, 200.0);
        let (x, y) = vp.geo_to_pixel(&point);
        assert!((x - 40.0).abs() < 1e-6);
        assert!((y - 200.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut vp = viewport(0.0, 0.0, 40);
        assert_eq!(vp.zoom, MAX_ZOOM);
        vp.set_zoom(3);
        assert_eq!(vp.zoom, 3);
    }

    #[test]
    fn test_visible_tiles_zoom_zero() {
        // A 512px viewport is wider than the 256px world; the single tile
        // is listed once.
        let vp = viewport(0.0, 0.0, 0);
        assert_eq!(vp.visible_tiles(), vec![TileCoord::new(0, 0, 0)]);
    }

    #[test]
    fn test_visible_tiles_wrap_antimeridian() {
        let vp = Viewport::new(GeoPoint::new(0.0, 180.0).unwrap(), 2, 256, 256);
        let tiles = vp.visible_tiles();
        let cols: Vec<u32> = tiles.iter().map(|t| t.x).collect();
        assert!(cols.contains(&3));
        assert!(cols.contains(&0));
        assert!(tiles.iter().all(|t| t.x < 4 && t.y < 4));
    }
}
