//! Peer transport
//!
//! A single request/response exchange with a peer service. Retry and outcome
//! classification live in [`crate::remote`]; a transport only reports what
//! happened on one attempt.

use crate::client::BearerToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One outbound request. The caller's credential travels with every request.
#[derive(Debug, Clone)]
pub struct RemoteRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Vec<u8>>,
    pub bearer: BearerToken,
}

/// Status and raw body of one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RemoteResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to obtain any response at all
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request to {path} failed: {message}")]
    Request { path: String, message: String },
}

/// Transport trait
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Perform exactly one attempt
    async fn send(&self, request: &RemoteRequest) -> Result<RemoteResponse, TransportError>;
}

/// reqwest-backed transport rooted at a peer's base URL
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// No request timeout is configured: the retry budget bounds each call.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &RemoteRequest) -> Result<RemoteResponse, TransportError> {
        let url = self.url(&request.path);
        let to_error = |e: reqwest::Error| TransportError::Request {
            path: request.path.clone(),
            message: e.to_string(),
        };

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };

        let mut builder = builder.bearer_auth(request.bearer.as_str());
        if let Some(body) = &request.body {
            builder = builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send().await.map_err(to_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(to_error)?;

        Ok(RemoteResponse::new(status, body.to_vec()))
    }
}
