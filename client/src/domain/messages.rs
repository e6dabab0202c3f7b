//! Message-board service.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::fallback::read_with_fallback;
use crate::domain::mirror::LocalMirror;
use crate::domain::ports::{ApiRequest, KeyValueStore, RemoteGateway};
use crate::domain::{Envelope, Message, keys};

/// Best-available access to the club message board.
#[derive(Debug, Clone)]
pub struct MessageBoard<G, S> {
    gateway: Arc<G>,
    mirror: LocalMirror<S>,
}

impl<G, S> MessageBoard<G, S>
where
    G: RemoteGateway,
    S: KeyValueStore,
{
    /// Compose the service from its transport and mirror.
    pub fn new(gateway: Arc<G>, mirror: LocalMirror<S>) -> Self {
        Self { gateway, mirror }
    }

    /// All board entries; falls back to the mirrored copy when the remote
    /// is unreachable.
    pub async fn list(&self) -> Envelope<Vec<Message>> {
        read_with_fallback(
            self.gateway.as_ref(),
            &self.mirror,
            ApiRequest::get("messages"),
            keys::MESSAGES,
        )
        .await
    }

    /// Post a new entry. Remote-only; a failure leaves the mirror untouched.
    pub async fn post(&self, message: Value) -> Envelope<Value> {
        self.gateway
            .as_ref()
            .call(ApiRequest::post("messages").with_json(message))
            .await
    }
}
