//! Reqwest-backed remote gateway adapter.
//!
//! This adapter owns transport details only: endpoint resolution against the
//! configured base path, header merging, HTTP status classification, and
//! envelope decoding. Every fault becomes a failure envelope; nothing here
//! returns an error to the caller.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::domain::Envelope;
use crate::domain::ports::{ApiRequest, HttpMethod, RemoteGateway, SERVICE_UNAVAILABLE};

const CONTENT_TYPE: &str = "content-type";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Remote gateway performing one HTTP attempt per call against a fixed base.
#[derive(Debug, Clone)]
pub struct HttpRemoteGateway {
    client: Client,
    base: url::Url,
}

impl HttpRemoteGateway {
    /// Build a gateway for an absolute API base, e.g. `https://club.example/api`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: url::Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, base })
    }
}

#[async_trait]
impl RemoteGateway for HttpRemoteGateway {
    async fn call(&self, request: ApiRequest) -> Envelope<Value> {
        let url = match join_endpoint(&self.base, &request.path) {
            Ok(url) => url,
            Err(error) => return Envelope::failure(format!("invalid endpoint path: {error}")),
        };

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        for (name, value) in merge_headers(&request.headers) {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = match serde_json::to_string(body) {
                Ok(encoded) => builder.body(encoded),
                Err(error) => {
                    return Envelope::failure(format!("request body failed to encode: {error}"));
                }
            };
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(error) => {
                debug!(path = %request.path, %error, "transport failure");
                return Envelope::failure(transport_message(&error));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return status_failure(status);
        }

        match response.bytes().await {
            Ok(body) => decode_envelope(body.as_ref()),
            Err(error) => Envelope::failure(transport_message(&error)),
        }
    }
}

/// Append a resource-relative path to the base, preserving the base path
/// segments regardless of a trailing slash.
fn join_endpoint(base: &url::Url, path: &str) -> Result<url::Url, url::ParseError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url::Url::parse(&joined)
}

/// Default headers merged with the caller's; on a name conflict the caller's
/// value wins.
fn merge_headers(headers: &[(String, String)]) -> Vec<(String, String)> {
    let mut merged = Vec::with_capacity(headers.len() + 1);
    if !headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE))
    {
        merged.push((CONTENT_TYPE.to_owned(), JSON_MEDIA_TYPE.to_owned()));
    }
    merged.extend_from_slice(headers);
    merged
}

/// Classify a non-success HTTP status into a failure envelope.
fn status_failure(status: reqwest::StatusCode) -> Envelope<Value> {
    Envelope::failure(format!("API request failed: {}", status.as_u16()))
}

/// Classify a reqwest fault: unreachable-service faults get the canned
/// fallback message, anything else keeps its own description.
fn transport_message(error: &reqwest::Error) -> String {
    if error.is_connect() || error.is_timeout() {
        SERVICE_UNAVAILABLE.to_owned()
    } else {
        error.to_string()
    }
}

/// Decode a response body that is expected to already be envelope-shaped.
fn decode_envelope(body: &[u8]) -> Envelope<Value> {
    match serde_json::from_slice::<Envelope<Value>>(body) {
        Ok(envelope) => envelope,
        Err(error) => Envelope::failure(format!("invalid response payload: {error}")),
    }
}
