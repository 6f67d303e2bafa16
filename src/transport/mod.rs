//! Outbound HTTP seam shared by the email and chat integrations.

use async_trait::async_trait;
use serde_json::Value;

/// A JSON POST to a provider.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl OutboundRequest {
    pub fn new(url: impl Into<String>, body: Value) -> Self {
        Self { url: url.into(), headers: Vec::new(), body }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Status and raw body of a provider response. Interpreting the body is left
/// to the caller.
#[derive(Debug, Clone)]
pub struct OutboundResponse {
    pub status: u16,
    pub body: String,
}

impl OutboundResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network-level failure: the provider could not be reached or the body could
/// not be read.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// The URL is stripped first: provider keys may ride in the query string.
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::new(err.without_url().to_string())
    }
}

#[async_trait]
pub trait OutboundHttpClient: Send + Sync {
    async fn post_json(&self, request: OutboundRequest) -> Result<OutboundResponse, TransportError>;
}

/// [`OutboundHttpClient`] backed by a shared `reqwest` connection pool.
#[derive(Clone, Default)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self { inner: reqwest::Client::new() }
    }
}

#[async_trait]
impl OutboundHttpClient for ReqwestClient {
    async fn post_json(&self, request: OutboundRequest) -> Result<OutboundResponse, TransportError> {
        let mut builder = self.inner.post(&request.url).json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(OutboundResponse { status, body })
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays canned responses in order and records every request it sees.
    #[derive(Default)]
    pub struct ScriptedClient {
        replies: Mutex<VecDeque<Result<OutboundResponse, TransportError>>>,
        requests: Mutex<Vec<OutboundRequest>>,
    }

    impl ScriptedClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Ok(OutboundResponse { status, body: body.into() }));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.replies.lock().unwrap().push_back(Err(TransportError::new(message)));
            self
        }

        pub fn requests(&self) -> Vec<OutboundRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OutboundHttpClient for ScriptedClient {
        async fn post_json(
            &self,
            request: OutboundRequest,
        ) -> Result<OutboundResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new("no scripted response left")))
        }
    }
}
