//! Fetch client behaviour against a scripted transport.

use std::sync::Arc;

use bytes::Bytes;
use imagery_client::testing::ScriptedTransport;
use imagery_client::{
    ClientConfig, FetchResult, ImageryClient, ImageryParams, RawResponse, StaticCredential,
};
use imagery_common::{FailureKind, GeoPoint, ImageryLayer, ObservationDate, ViewerError};
use test_utils::fixtures::{inputs, TEST_API_KEY};
use test_utils::png_bytes;

fn default_params(layer: Option<ImageryLayer>) -> ImageryParams {
    ImageryParams {
        point: GeoPoint::parse(inputs::DEFAULT_LAT, inputs::DEFAULT_LON).unwrap(),
        date: ObservationDate::parse(inputs::DEFAULT_DATE).unwrap(),
        layer,
    }
}

fn client_with(transport: Arc<ScriptedTransport>, key: StaticCredential) -> ImageryClient {
    ImageryClient::new(ClientConfig::default(), transport, Arc::new(key))
}

#[tokio::test]
async fn test_success_wraps_exact_payload() {
    let payload = png_bytes(2, 2);
    let transport = Arc::new(
        ScriptedTransport::new().respond_with(RawResponse::new(payload.clone(), Some("image/png"))),
    );
    let client = client_with(transport.clone(), StaticCredential::new(TEST_API_KEY));

    match client.fetch_image(&default_params(None)).await {
        FetchResult::Success(handle) => {
            assert_eq!(handle.bytes(), &Bytes::from(payload));
            assert_eq!(handle.dimensions(), Some((2, 2)));
        }
        other => panic!("expected success, got {:?}", other),
    }
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_request_parameters() {
    let transport =
        Arc::new(ScriptedTransport::new().respond_with(RawResponse::new(png_bytes(1, 1), None)));
    let client = client_with(transport.clone(), StaticCredential::new(TEST_API_KEY));

    client
        .fetch_image(&default_params(Some(ImageryLayer::Vegetation)))
        .await;

    let requests = transport.requests();
    let request = &requests[0];
    assert_eq!(request.url, "https://api.nasa.gov/planetary/earth/imagery");
    assert_eq!(request.param("lat"), Some("37.7749"));
    assert_eq!(request.param("lon"), Some("-122.4194"));
    assert_eq!(request.param("dim"), Some("0.1"));
    assert_eq!(request.param("date"), Some("2025-01-15"));
    assert_eq!(request.param("api_key"), Some(TEST_API_KEY));
    assert_eq!(request.param("layer"), Some("vegetation"));
}

#[tokio::test]
async fn test_layer_omitted_when_unset() {
    let transport =
        Arc::new(ScriptedTransport::new().respond_with(RawResponse::new(png_bytes(1, 1), None)));
    let client = client_with(transport.clone(), StaticCredential::new(TEST_API_KEY));

    client.fetch_image(&default_params(None)).await;

    assert_eq!(transport.requests()[0].param("layer"), None);
}

#[tokio::test]
async fn test_missing_credential_makes_no_call() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client_with(transport.clone(), StaticCredential::missing());

    let err = client.try_fetch(&default_params(None)).await.unwrap_err();
    assert!(matches!(err, ViewerError::MissingCredential));
    assert_eq!(transport.request_count(), 0);

    match client.fetch_image(&default_params(None)).await {
        FetchResult::Failure(failure) => {
            assert_eq!(failure.kind, FailureKind::MissingCredential);
            assert!(failure.message.contains("Missing NASA API Key"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_http_failure_message_surfaces() {
    let transport = Arc::new(ScriptedTransport::new().fail_with(ViewerError::Http {
        status: 404,
        message: Some("No imagery for specified date.".to_string()),
    }));
    let client = client_with(transport, StaticCredential::new(TEST_API_KEY));

    match client.fetch_image(&default_params(None)).await {
        FetchResult::Failure(failure) => {
            assert_eq!(failure.kind, FailureKind::TransportFailure);
            assert!(failure.message.starts_with("Failed to fetch satellite image: "));
            assert!(failure.message.contains("No imagery for specified date."));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_body_is_failure() {
    let transport =
        Arc::new(ScriptedTransport::new().respond_with(RawResponse::new(Vec::new(), None)));
    let client = client_with(transport, StaticCredential::new(TEST_API_KEY));

    let err = client.try_fetch(&default_params(None)).await.unwrap_err();
    assert!(matches!(err, ViewerError::EmptyPayload));
}

#[tokio::test]
async fn test_no_retry_after_failure() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .fail_with(ViewerError::Transport("connection reset".to_string()))
            .respond_with(RawResponse::new(png_bytes(1, 1), None)),
    );
    let client = client_with(transport.clone(), StaticCredential::new(TEST_API_KEY));

    assert!(!client.fetch_image(&default_params(None)).await.is_success());
    assert_eq!(transport.request_count(), 1);
}
