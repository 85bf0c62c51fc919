//! Common test fixtures for earth-viewer tests.
//!
//! Places are `(lat, lon)` in decimal degrees.

/// Well-known places.
pub mod places {
    /// Default viewer position.
    pub const SAN_FRANCISCO: (f64, f64) = (37.7749, -122.4194);

    pub const NEW_YORK: (f64, f64) = (40.7128, -74.0060);

    pub const NULL_ISLAND: (f64, f64) = (0.0, 0.0);

    /// Close to the antimeridian.
    pub const FIJI: (f64, f64) = (-17.7134, 178.065);

    /// Beyond the Web Mercator latitude limit.
    pub const NORTH_POLE: (f64, f64) = (90.0, 0.0);
}

/// Raw strings as the user would type them.
pub mod inputs {
    pub const DEFAULT_LAT: &str = "37.7749";
    pub const DEFAULT_LON: &str = "-122.4194";
    pub const DEFAULT_DATE: &str = "2025-01-15";

    /// Inputs that must never make it into a request.
    pub const MALFORMED_COORDINATES: [&str; 6] = ["", "  ", "abc", "NaN", "inf", "12.3.4"];

    pub const OUT_OF_RANGE_LATITUDES: [&str; 2] = ["90.0001", "-91"];
}

/// Test-only credential value.
pub const TEST_API_KEY: &str = "DEMO_KEY_FOR_TESTS";
