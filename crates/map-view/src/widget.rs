//! Map widget: viewport, marker and click events.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::Stream;
use tracing::debug;

use imagery_common::tile::TileCoord;
use imagery_common::{GeoPoint, ViewerError, ViewerResult};

use crate::tiles::TileLayer;
use crate::viewport::Viewport;

pub const DEFAULT_ZOOM: u32 = 5;
pub const DEFAULT_WIDTH: u32 = 768;
pub const DEFAULT_HEIGHT: u32 = 320;
pub const DEFAULT_PRECISION: usize = 6;

/// Decimal places accepted for click coordinates.
pub const PRECISION_RANGE: std::ops::RangeInclusive<usize> = 4..=6;

/// A click, already converted to the strings written into the inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct MapClick {
    pub point: GeoPoint,
    pub lat: String,
    pub lon: String,
}

/// Stream of clicks from a [`MapWidget`] subscription.
pub struct MapClicks {
    rx: UnboundedReceiver<MapClick>,
}

impl Stream for MapClicks {
    type Item = MapClick;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: GeoPoint,
    /// Viewport pixel of the marker tip
    pub pixel: (f64, f64),
    /// Whether the pixel falls inside the viewport
    pub visible: bool,
}

/// Everything needed to draw the map once.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFrame {
    pub viewport: Viewport,
    pub marker: Option<Marker>,
    pub tiles: Vec<(TileCoord, String)>,
    pub attribution: String,
}

pub struct MapWidget {
    viewport: Viewport,
    layer: TileLayer,
    precision: usize,
    subscriber: Option<UnboundedSender<MapClick>>,
}

impl MapWidget {
    pub fn new(center: GeoPoint, layer: TileLayer) -> Self {
        Self {
            viewport: Viewport::new(center, DEFAULT_ZOOM, DEFAULT_WIDTH, DEFAULT_HEIGHT),
            layer,
            precision: DEFAULT_PRECISION,
            subscriber: None,
        }
    }

    pub fn with_zoom(mut self, zoom: u32) -> Self {
        self.set_zoom(zoom);
        self
    }

    pub fn with_precision(mut self, precision: usize) -> ViewerResult<Self> {
        if !PRECISION_RANGE.contains(&precision) {
            return Err(ViewerError::invalid_parameter(
                "precision",
                format!(
                    "{} decimal places is outside {}..={}",
                    precision,
                    PRECISION_RANGE.start(),
                    PRECISION_RANGE.end()
                ),
            ));
        }
        self.precision = precision;
        Ok(self)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layer(&self) -> &TileLayer {
        &self.layer
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn set_zoom(&mut self, zoom: u32) {
        self.viewport.set_zoom(zoom.min(self.layer.max_zoom));
    }

    pub fn recenter(&mut self, center: GeoPoint) {
        self.viewport.set_center(center);
    }

    /// Subscribe to clicks. A widget has one subscriber; subscribing again
    /// ends the previous stream.
    pub fn subscribe(&mut self) -> MapClicks {
        let (tx, rx) = mpsc::unbounded();
        self.subscriber = Some(tx);
        MapClicks { rx }
    }

    /// Click at a viewport pixel.
    ///
    /// The click is delivered to the subscriber, if any, and also returned.
    pub fn click(&self, x: f64, y: f64) -> ViewerResult<MapClick> {
        if !self.viewport.contains_pixel(x, y) {
            return Err(ViewerError::invalid_parameter(
                "click",
                format!(
                    "({}, {}) is outside the {}x{} map",
                    x, y, self.viewport.width, self.viewport.height
                ),
            ));
        }

        let point = self.viewport.pixel_to_geo(x, y);
        let (lat, lon) = point.to_strings(self.precision);
        let click = MapClick { point, lat, lon };

        if let Some(tx) = &self.subscriber {
            if tx.unbounded_send(click.clone()).is_err() {
                debug!("Click subscriber gone");
            }
        }
        Ok(click)
    }

    /// Frame for the current viewport with the marker at `marker`.
    ///
    /// `None` hides the marker; the viewport is left where it was.
    pub fn frame(&self, marker: Option<GeoPoint>) -> MapFrame {
        let marker = marker.map(|position| {
            let pixel = self.viewport.geo_to_pixel(&position);
            Marker {
                position,
                pixel,
                visible: self.viewport.contains_pixel(pixel.0, pixel.1),
            }
        });

        let tiles = self
            .viewport
            .visible_tiles()
            .into_iter()
            .map(|coord| (coord, self.layer.tile_url(&coord)))
            .collect();

        MapFrame {
            viewport: self.viewport,
            marker,
            tiles,
            attribution: self.layer.attribution.clone(),
        }
    }
}
