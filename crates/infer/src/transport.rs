//! The HTTP round trip, behind a trait so the rest of the run can be driven
//! without a network.

use std::time::Duration;

use reqwest::{blocking::Client, header::CONTENT_TYPE};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct TransportError(#[from] reqwest::Error);

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends one JSON request body and returns whatever came back.
///
/// Implementations return the body for every HTTP status; only failures to
/// exchange bytes at all are errors.
pub trait Transport {
    /// # Errors
    ///
    /// The request could not be sent or the response could not be read.
    fn post_json(&self, url: &str, api_key: &str, body: Vec<u8>) -> Result<HttpResponse, TransportError>;
}

/// Blocking `reqwest` client authenticating with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// The TLS backend or client could not be initialised.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("infer/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, api_key: &str, body: Vec<u8>) -> Result<HttpResponse, TransportError> {
        debug!(url, bytes = body.len(), "POST");
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        debug!(status, bytes = body.len(), "response");
        Ok(HttpResponse { status, body })
    }
}
