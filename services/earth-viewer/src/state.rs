//! View state: raw inputs plus the loading / error / image tri-state.

use imagery_client::{FetchResult, ImageHandle, ImageryParams};
use imagery_common::{GeoPoint, ImageryLayer, ObservationDate, ViewerResult};

pub const DEFAULT_LATITUDE: &str = "37.7749";
pub const DEFAULT_LONGITUDE: &str = "-122.4194";
pub const DEFAULT_DATE: &str = "2025-01-15";

/// State owned by the view.
///
/// Inputs are kept exactly as typed. They are parsed only when the marker
/// is drawn or a fetch starts. At most one of loading, error and image is
/// active at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    latitude: String,
    longitude: String,
    date: String,
    layer: Option<ImageryLayer>,
    loading: bool,
    error: Option<String>,
    image: Option<ImageHandle>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE.to_string(),
            longitude: DEFAULT_LONGITUDE.to_string(),
            date: DEFAULT_DATE.to_string(),
            layer: Some(ImageryLayer::default()),
            loading: false,
            error: None,
            image: None,
        }
    }
}

impl ViewState {
    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    pub fn longitude(&self) -> &str {
        &self.longitude
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn layer(&self) -> Option<ImageryLayer> {
        self.layer
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    pub fn set_latitude(&mut self, raw: impl Into<String>) {
        self.latitude = raw.into();
    }

    pub fn set_longitude(&mut self, raw: impl Into<String>) {
        self.longitude = raw.into();
    }

    pub fn set_date(&mut self, raw: impl Into<String>) {
        self.date = raw.into();
    }

    /// Select a layer by name. Unknown names leave the current layer.
    pub fn set_layer(&mut self, raw: &str) -> ViewerResult<()> {
        self.layer = Some(raw.parse()?);
        Ok(())
    }

    /// Send requests without a `layer` parameter.
    pub fn clear_layer(&mut self) {
        self.layer = None;
    }

    pub fn coordinates(&self) -> ViewerResult<GeoPoint> {
        GeoPoint::parse(&self.latitude, &self.longitude)
    }

    /// Where the marker goes, or `None` while the inputs don't parse.
    pub fn marker(&self) -> Option<GeoPoint> {
        self.coordinates().ok()
    }

    /// Validated request parameters for the current inputs.
    pub fn params(&self) -> ViewerResult<ImageryParams> {
        Ok(ImageryParams {
            point: self.coordinates()?,
            date: ObservationDate::parse(&self.date)?,
            layer: self.layer,
        })
    }

    pub(crate) fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
        self.image = None;
    }

    pub(crate) fn settle(&mut self, result: FetchResult) {
        self.loading = false;
        match result {
            FetchResult::Success(handle) => {
                self.error = None;
                self.image = Some(handle);
            }
            FetchResult::Failure(failure) => {
                self.image = None;
                self.error = Some(failure.message);
            }
        }
    }
}
