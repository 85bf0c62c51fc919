//! Scripted transport for exercising the client without a network.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use imagery_common::{ViewerError, ViewerResult};

use crate::transport::{ImageryTransport, RawResponse};

/// A request as the transport saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Vec<(&'static str, String)>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

struct Scripted {
    delay: Duration,
    result: ViewerResult<RawResponse>,
}

/// Answers requests from a queue, in order, and records every call.
///
/// Requests beyond the end of the script fail with a transport error.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, response: RawResponse) -> Self {
        self.push(Duration::ZERO, Ok(response))
    }

    pub fn fail_with(self, err: ViewerError) -> Self {
        self.push(Duration::ZERO, Err(err))
    }

    /// Queue a result that settles only after `delay`.
    pub fn respond_after(self, delay: Duration, result: ViewerResult<RawResponse>) -> Self {
        self.push(delay, result)
    }

    fn push(self, delay: Duration, result: ViewerResult<RawResponse>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Scripted { delay, result });
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl ImageryTransport for ScriptedTransport {
    async fn get(&self, url: &str, query: &[(&'static str, String)]) -> ViewerResult<RawResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                url: url.to_string(),
                query: query.to_vec(),
            });

        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        match next {
            Some(Scripted { delay, result }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Err(ViewerError::Transport(
                "no scripted response left".to_string(),
            )),
        }
    }
}
