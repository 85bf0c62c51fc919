//! Headless slippy map.
//!
//! Holds the viewport and tile layer, projects clicks to coordinates and
//! places the marker. Rendering is left to whoever consumes [`MapFrame`].

pub mod tiles;
pub mod viewport;
pub mod widget;

pub use tiles::{TileClient, TileLayer};
pub use viewport::Viewport;
pub use widget::{MapClick, MapClicks, MapFrame, MapWidget, Marker};
