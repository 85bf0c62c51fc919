//! The imagery fetch client.

use std::sync::Arc;

use tracing::{error, info, instrument};

use imagery_common::{FailureKind, ViewerError, ViewerResult};

use crate::config::ClientConfig;
use crate::credentials::{CredentialProvider, EnvCredential};
use crate::handle::ImageHandle;
use crate::request::{FetchRequest, ImageryParams};
use crate::transport::{ImageryTransport, ReqwestTransport};

/// Why a fetch did not produce an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FailureKind,
    /// Text shown to the user
    pub message: String,
}

impl From<&ViewerError> for FetchFailure {
    fn from(err: &ViewerError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
        }
    }
}

/// Settled outcome of a fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Success(ImageHandle),
    Failure(FetchFailure),
}

impl FetchResult {
    pub fn failure(err: &ViewerError) -> Self {
        FetchResult::Failure(FetchFailure::from(err))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }
}

impl From<ViewerResult<ImageHandle>> for FetchResult {
    fn from(result: ViewerResult<ImageHandle>) -> Self {
        match result {
            Ok(handle) => FetchResult::Success(handle),
            Err(err) => FetchResult::failure(&err),
        }
    }
}

/// Issues imagery requests. Cheap to clone.
#[derive(Clone)]
pub struct ImageryClient {
    transport: Arc<dyn ImageryTransport>,
    credentials: Arc<dyn CredentialProvider>,
    config: ClientConfig,
}

impl ImageryClient {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn ImageryTransport>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            transport,
            credentials,
            config,
        }
    }

    /// Client talking to the configured endpoint over HTTP, with the key
    /// taken from the environment.
    pub fn from_config(config: ClientConfig) -> ViewerResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(
            config,
            Arc::new(transport),
            Arc::new(EnvCredential::default()),
        ))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch an image, collapsing any error into a user-facing failure.
    ///
    /// Failures are logged here; callers only display them.
    pub async fn fetch_image(&self, params: &ImageryParams) -> FetchResult {
        let result = self.try_fetch(params).await;
        if let Err(err) = &result {
            match err.kind() {
                FailureKind::UnknownFailure => error!("Unknown error fetching NASA data"),
                _ => error!(error = %err, "Error fetching NASA data"),
            }
        }
        result.into()
    }

    /// Fetch an image, keeping the typed error.
    #[instrument(
        skip(self, params),
        fields(
            lat = params.point.lat,
            lon = params.point.lon,
            date = %params.date,
            layer = ?params.layer,
        )
    )]
    pub async fn try_fetch(&self, params: &ImageryParams) -> ViewerResult<ImageHandle> {
        let api_key = self
            .credentials
            .api_key()
            .ok_or(ViewerError::MissingCredential)?;

        let request = FetchRequest::new(params, api_key);
        info!(endpoint = %self.config.endpoint, "Requesting satellite image");

        let response = self
            .transport
            .get(&self.config.endpoint, &request.query_pairs(self.config.dim))
            .await?;

        if response.body.is_empty() {
            return Err(ViewerError::EmptyPayload);
        }

        let handle = ImageHandle::from_payload(response.body, response.content_type);
        info!(
            bytes = handle.len(),
            dimensions = ?handle.dimensions(),
            url = %handle.url(),
            "Satellite image received"
        );
        Ok(handle)
    }
}
