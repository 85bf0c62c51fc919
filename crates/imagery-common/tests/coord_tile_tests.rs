//! Coordinate parsing and tile math across the public API.

use imagery_common::tile::{latlon_to_tile, project, tile_to_latlon_bounds, unproject, MAX_ZOOM};
use imagery_common::{GeoPoint, ImageryLayer, ViewerError};
use test_utils::fixtures::{inputs, places};
use test_utils::{assert_approx_eq, assert_latlon_approx_eq};

// ============================================================================
// Coordinate parsing
// ============================================================================

#[test]
fn test_default_inputs_parse() {
    let point = GeoPoint::parse(inputs::DEFAULT_LAT, inputs::DEFAULT_LON).unwrap();
    let (lat, lon) = places::SAN_FRANCISCO;
    assert_latlon_approx_eq!((point.lat, point.lon), (lat, lon), 1e-12);
}

#[test]
fn test_malformed_inputs_rejected() {
    for raw in inputs::MALFORMED_COORDINATES {
        let result = GeoPoint::parse(raw, inputs::DEFAULT_LON);
        assert!(
            matches!(
                result,
                Err(ViewerError::InvalidCoordinate {
                    field: "latitude",
                    ..
                })
            ),
            "expected '{}' to be rejected",
            raw
        );
    }
}

#[test]
fn test_out_of_range_latitudes_rejected() {
    for raw in inputs::OUT_OF_RANGE_LATITUDES {
        assert!(GeoPoint::parse(raw, "0").is_err(), "'{}' accepted", raw);
    }
}

#[test]
fn test_longitude_bounds_inclusive() {
    assert!(GeoPoint::parse("0", "180").is_ok());
    assert!(GeoPoint::parse("0", "-180").is_ok());
    assert!(GeoPoint::parse("0", "180.5").is_err());
}

#[test]
fn test_to_strings_precision() {
    let point = GeoPoint::new(37.77492912, -122.41941551).unwrap();
    assert_eq!(
        point.to_strings(4),
        ("37.7749".to_string(), "-122.4194".to_string())
    );
    assert_eq!(
        point.to_strings(6),
        ("37.774929".to_string(), "-122.419416".to_string())
    );
}

// ============================================================================
// Tile math
// ============================================================================

#[test]
fn test_tile_bounds_contain_point() {
    for (lat, lon) in [places::SAN_FRANCISCO, places::NEW_YORK, places::FIJI] {
        for zoom in [0, 4, 10, MAX_ZOOM] {
            let tile = latlon_to_tile(lat, lon, zoom);
            let bounds = tile_to_latlon_bounds(&tile);
            assert!(
                bounds.contains_point(lon, lat),
                "{:?} not in {} at zoom {}",
                (lat, lon),
                bounds,
                zoom
            );
        }
    }
}

#[test]
fn test_project_unproject_consistent() {
    let (lat, lon) = places::NEW_YORK;
    let point = GeoPoint::new(lat, lon).unwrap();
    let (x, y) = project(&point, 7);
    let back = unproject(x, y, 7);
    assert_latlon_approx_eq!((back.lat, back.lon), (lat, lon), 1e-9);
}

#[test]
fn test_pole_is_clamped() {
    let (lat, lon) = places::NORTH_POLE;
    let (_, y) = project(&GeoPoint { lat, lon }, 3);
    assert_approx_eq!(y, 0.0, 1e-6);
}

#[test]
fn test_zoom_zero_covers_world() {
    let bounds = tile_to_latlon_bounds(&latlon_to_tile(0.0, 0.0, 0));
    assert_approx_eq!(bounds.min_x, -180.0, 1e-9);
    assert_approx_eq!(bounds.max_x, 180.0, 1e-9);
    assert_approx_eq!(bounds.max_y, 85.0511287798, 1e-6);
}

#[test]
fn test_layer_titles_distinct() {
    let titles: Vec<_> = ImageryLayer::ALL.iter().map(|l| l.title()).collect();
    assert_eq!(
        titles,
        ["Natural Color", "Vegetation Index (NDVI)", "Thermal Infrared"]
    );
}
