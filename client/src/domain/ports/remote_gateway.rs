//! Port for the remote API transport.
//!
//! Every remote endpoint is reached through [`RemoteGateway::call`], which
//! resolves to an [`Envelope`] and never to an error: transport faults,
//! non-success statuses, and malformed bodies all become failure envelopes.
//! A single attempt is the full retry policy.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Envelope;

/// Canned failure message for unreachable-service transport faults.
pub const SERVICE_UNAVAILABLE: &str = "service unavailable, falling back to local storage";

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Read a resource.
    Get,
    /// Mutate a resource.
    Post,
}

/// A resource-relative request to the remote API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Path relative to the configured base, e.g. `works/submitted`.
    pub path: String,
    /// Request method.
    pub method: HttpMethod,
    /// Optional JSON body.
    pub body: Option<Value>,
    /// Extra headers; they win over the adapter defaults on conflict.
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// Build a GET request for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Get,
            body: None,
            headers: Vec::new(),
        }
    }

    /// Build a POST request for `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Post,
            body: None,
            headers: Vec::new(),
        }
    }

    /// Attach a JSON body.
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a header, overriding the adapter default of the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Remote API transport port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Issue one request and classify the outcome into an envelope.
    async fn call(&self, request: ApiRequest) -> Envelope<Value>;
}

/// Gateway double behaving like an unreachable backend.
///
/// Every call fails with [`SERVICE_UNAVAILABLE`], which forces callers down
/// their local fallback paths. Tests and offline builds select it explicitly.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnreachableRemoteGateway;

#[async_trait]
impl RemoteGateway for UnreachableRemoteGateway {
    async fn call(&self, _request: ApiRequest) -> Envelope<Value> {
        Envelope::failure(SERVICE_UNAVAILABLE)
    }
}
