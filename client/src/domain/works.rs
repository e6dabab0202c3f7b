//! Works service: submitted and featured galleries, plus submission.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::fallback::read_with_fallback;
use crate::domain::mirror::LocalMirror;
use crate::domain::ports::{ApiRequest, KeyValueStore, RemoteGateway};
use crate::domain::{Envelope, Work, keys};

/// Best-available access to the club's photographic works.
#[derive(Debug, Clone)]
pub struct WorksCatalogue<G, S> {
    gateway: Arc<G>,
    mirror: LocalMirror<S>,
}

impl<G, S> WorksCatalogue<G, S>
where
    G: RemoteGateway,
    S: KeyValueStore,
{
    /// Compose the service from its transport and mirror.
    pub fn new(gateway: Arc<G>, mirror: LocalMirror<S>) -> Self {
        Self { gateway, mirror }
    }

    /// Works awaiting review; falls back to the mirrored copy when the
    /// remote is unreachable.
    pub async fn submitted(&self) -> Envelope<Vec<Work>> {
        read_with_fallback(
            self.gateway.as_ref(),
            &self.mirror,
            ApiRequest::get("works/submitted"),
            keys::SUBMITTED_WORKS,
        )
        .await
    }

    /// Works promoted to the front page; same fallback policy.
    pub async fn featured(&self) -> Envelope<Vec<Work>> {
        read_with_fallback(
            self.gateway.as_ref(),
            &self.mirror,
            ApiRequest::get("works/featured"),
            keys::FEATURED_WORKS,
        )
        .await
    }

    /// Submit a work for review. The payload passes through untouched.
    ///
    /// Remote-only: a transport failure surfaces as a failure envelope and
    /// leaves every mirror key unchanged.
    pub async fn submit(&self, work: Value) -> Envelope<Value> {
        self.gateway
            .as_ref()
            .call(ApiRequest::post("works/submit").with_json(work))
            .await
    }
}
