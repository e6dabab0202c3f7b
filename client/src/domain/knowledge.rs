//! Photography knowledge-base reads.

use std::sync::Arc;

use crate::domain::fallback::read_with_fallback;
use crate::domain::mirror::LocalMirror;
use crate::domain::ports::{ApiRequest, KeyValueStore, RemoteGateway};
use crate::domain::{Envelope, KnowledgeItem, keys};

/// Read-only access to the knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeBase<G, S> {
    gateway: Arc<G>,
    mirror: LocalMirror<S>,
}

impl<G, S> KnowledgeBase<G, S>
where
    G: RemoteGateway,
    S: KeyValueStore,
{
    /// Compose the service from its transport and mirror.
    pub fn new(gateway: Arc<G>, mirror: LocalMirror<S>) -> Self {
        Self { gateway, mirror }
    }

    /// All knowledge-base articles; falls back to the mirrored copy when
    /// the remote is unreachable.
    pub async fn list(&self) -> Envelope<Vec<KnowledgeItem>> {
        read_with_fallback(
            self.gateway.as_ref(),
            &self.mirror,
            ApiRequest::get("knowledge"),
            keys::PHOTOGRAPHY_KNOWLEDGE,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::domain::ports::{MemoryStore, MockRemoteGateway};

    #[tokio::test]
    async fn articles_are_mirrored_under_the_knowledge_key() {
        let mut gateway = MockRemoteGateway::new();
        gateway
            .expect_call()
            .withf(|request| request.path == "knowledge")
            .returning(|_| Envelope::success(json!([{ "id": "k1", "title": "光圈" }])));
        let mirror = LocalMirror::new(Arc::new(MemoryStore::new()));

        let base = KnowledgeBase::new(Arc::new(gateway), mirror.clone());
        let articles = base.list().await.into_data().expect("articles");

        assert_eq!(articles.len(), 1);
        assert!(
            mirror.peek::<Vec<KnowledgeItem>>(keys::PHOTOGRAPHY_KNOWLEDGE).is_some(),
            "articles must be mirrored for offline reads"
        );
    }
}
