//! Input/state controller.
//!
//! Every fetch trigger gets a fresh [`RequestToken`]. Earlier requests are
//! never aborted; their results are dropped on arrival if a newer trigger
//! happened in the meantime.

use imagery_client::{FetchResult, ImageryClient, ImageryParams};
use imagery_common::{GeoPoint, ViewerResult};
use map_view::{MapClick, MapClicks, MapFrame, MapWidget};
use tracing::{debug, info, warn};

use crate::state::ViewState;

/// Sequence number of a fetch trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happened when a fetch was triggered.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchStart {
    /// A request should be issued with these parameters.
    Pending {
        token: RequestToken,
        params: ImageryParams,
    },
    /// The inputs did not validate; the error is already in the state.
    Rejected { token: RequestToken },
}

impl FetchStart {
    pub fn token(&self) -> RequestToken {
        match self {
            FetchStart::Pending { token, .. } | FetchStart::Rejected { token } => *token,
        }
    }
}

/// Whether a settled result reached the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    Stale,
}

pub struct Controller {
    state: ViewState,
    map: MapWidget,
    last_token: u64,
}

impl Controller {
    pub fn new(state: ViewState, map: MapWidget) -> Self {
        Self {
            state,
            map,
            last_token: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn map(&self) -> &MapWidget {
        &self.map
    }

    /// Token of the most recent trigger, if any.
    pub fn latest_token(&self) -> Option<RequestToken> {
        (self.last_token > 0).then_some(RequestToken(self.last_token))
    }

    pub fn set_latitude(&mut self, raw: impl Into<String>) {
        self.state.set_latitude(raw);
    }

    pub fn set_longitude(&mut self, raw: impl Into<String>) {
        self.state.set_longitude(raw);
    }

    pub fn set_date(&mut self, raw: impl Into<String>) {
        self.state.set_date(raw);
    }

    pub fn set_layer(&mut self, raw: &str) -> ViewerResult<()> {
        self.state.set_layer(raw)
    }

    pub fn clear_layer(&mut self) {
        self.state.clear_layer();
    }

    pub fn set_zoom(&mut self, zoom: u32) {
        self.map.set_zoom(zoom);
    }

    /// The widget's click stream; see [`MapWidget::subscribe`].
    pub fn subscribe_clicks(&mut self) -> MapClicks {
        self.map.subscribe()
    }

    /// Click the map at a viewport pixel.
    pub fn click(&self, x: f64, y: f64) -> ViewerResult<MapClick> {
        self.map.click(x, y)
    }

    /// Write a click's coordinates into the inputs.
    pub fn apply_click(&mut self, click: &MapClick) {
        debug!(lat = %click.lat, lon = %click.lon, "Map clicked");
        self.state.set_latitude(click.lat.clone());
        self.state.set_longitude(click.lon.clone());
    }

    /// The map as it should be drawn now, marker taken from the inputs.
    pub fn map_frame(&self) -> MapFrame {
        self.map.frame(self.state.marker())
    }

    /// Trigger a fetch.
    ///
    /// Loading is set before this returns. Invalid inputs settle the
    /// trigger at once with an error and nothing is sent.
    pub fn begin_fetch(&mut self) -> FetchStart {
        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.state.begin_loading();

        match self.state.params() {
            Ok(params) => {
                self.recenter(params.point);
                info!(token = %token, lat = params.point.lat, lon = params.point.lon, date = %params.date, "Fetch triggered");
                FetchStart::Pending { token, params }
            }
            Err(err) => {
                warn!(token = %token, error = %err, "Fetch rejected");
                self.state.settle(FetchResult::failure(&err));
                FetchStart::Rejected { token }
            }
        }
    }

    /// Apply a settled result if it belongs to the latest trigger.
    pub fn complete_fetch(&mut self, token: RequestToken, result: FetchResult) -> Settlement {
        if token.0 != self.last_token {
            debug!(token = %token, latest = self.last_token, "Discarding stale fetch result");
            return Settlement::Stale;
        }
        info!(token = %token, success = result.is_success(), "Fetch settled");
        self.state.settle(result);
        Settlement::Applied
    }

    /// Trigger a fetch and wait for it.
    pub async fn fetch(&mut self, client: &ImageryClient) -> Settlement {
        match self.begin_fetch() {
            FetchStart::Pending { token, params } => {
                let result = client.fetch_image(&params).await;
                self.complete_fetch(token, result)
            }
            FetchStart::Rejected { .. } => Settlement::Applied,
        }
    }

    fn recenter(&mut self, point: GeoPoint) {
        self.map.recenter(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagery_client::testing::ScriptedTransport;
    use imagery_client::{ClientConfig, RawResponse, StaticCredential};
    use map_view::TileLayer;
    use std::sync::Arc;

    fn controller() -> Controller {
        let state = ViewState::default();
        let centre = state.marker().unwrap();
        Controller::new(state, MapWidget::new(centre, TileLayer::openstreetmap()))
    }

    #[test]
    fn test_tokens_increase() {
        let mut controller = controller();
        assert_eq!(controller.latest_token(), None);
        let a = controller.begin_fetch().token();
        let b = controller.begin_fetch().token();
        assert!(b > a);
        assert_eq!(controller.latest_token(), Some(b));
    }

    #[test]
    fn test_begin_fetch_sets_loading() {
        let mut controller = controller();
        let start = controller.begin_fetch();
        assert!(matches!(start, FetchStart::Pending { .. }));
        assert!(controller.state().is_loading());
    }

    #[test]
    fn test_invalid_coordinates_rejected_without_loading() {
        let mut controller = controller();
        controller.set_latitude("north");
        let start = controller.begin_fetch();
        assert!(matches!(start, FetchStart::Rejected { .. }));
        assert!(!controller.state().is_loading());
        assert!(controller.state().error().unwrap().contains("latitude"));
    }

    #[test]
    fn test_begin_fetch_recenters_map() {
        let mut controller = controller();
        controller.set_latitude("51.5074");
        controller.set_longitude("-0.1278");
        controller.begin_fetch();
        assert_eq!(
            controller.map().viewport().center,
            GeoPoint { lat: 51.5074, lon: -0.1278 }
        );
    }

    #[tokio::test]
    async fn test_fetch_round_trip() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond_with(RawResponse::new(test_utils::png_bytes(2, 2), None)),
        );
        let client = ImageryClient::new(
            ClientConfig::default(),
            transport,
            Arc::new(StaticCredential::new("key")),
        );

        let mut controller = controller();
        assert_eq!(controller.fetch(&client).await, Settlement::Applied);
        assert!(!controller.state().is_loading());
        assert!(controller.state().image().is_some());
    }
}
