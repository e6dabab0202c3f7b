//! Remote-backed implementation of the sync-provider port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::keys;
use crate::domain::knowledge::KnowledgeBase;
use crate::domain::messages::MessageBoard;
use crate::domain::mirror::LocalMirror;
use crate::domain::ports::{KeyValueStore, RemoteGateway, SyncProvider, SyncReport};
use crate::domain::voting::VotingDesk;
use crate::domain::works::WorksCatalogue;

/// Refreshes every read-only collection through its resource service, so a
/// single pass leaves the local mirror tracking the last confirmed server
/// state.
#[derive(Debug, Clone)]
pub struct RemoteSyncProvider<G, S> {
    works: WorksCatalogue<G, S>,
    messages: MessageBoard<G, S>,
    voting: VotingDesk<G, S>,
    knowledge: KnowledgeBase<G, S>,
}

impl<G, S> RemoteSyncProvider<G, S>
where
    G: RemoteGateway,
    S: KeyValueStore,
{
    /// Compose a provider over the shared transport and mirror.
    pub fn new(gateway: Arc<G>, mirror: LocalMirror<S>) -> Self {
        Self {
            works: WorksCatalogue::new(Arc::clone(&gateway), mirror.clone()),
            messages: MessageBoard::new(Arc::clone(&gateway), mirror.clone()),
            voting: VotingDesk::new(Arc::clone(&gateway), mirror.clone()),
            knowledge: KnowledgeBase::new(gateway, mirror),
        }
    }
}

#[async_trait]
impl<G, S> SyncProvider for RemoteSyncProvider<G, S>
where
    G: RemoteGateway,
    S: KeyValueStore,
{
    async fn refresh(&self) -> SyncReport {
        let mut report = SyncReport::default();
        let passes = [
            (keys::SUBMITTED_WORKS, self.works.submitted().await.is_success()),
            (keys::FEATURED_WORKS, self.works.featured().await.is_success()),
            (keys::MESSAGES, self.messages.list().await.is_success()),
            (
                keys::VOTING_ACTIVITIES,
                self.voting.activities().await.is_success(),
            ),
            (
                keys::PHOTOGRAPHY_KNOWLEDGE,
                self.knowledge.list().await.is_success(),
            ),
        ];
        for (key, refreshed) in passes {
            if refreshed {
                report.refreshed.push(key);
            } else {
                report.failed.push(key);
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::domain::Envelope;
    use crate::domain::mirror::LocalMirror;
    use crate::domain::ports::{MemoryStore, MockRemoteGateway};

    #[tokio::test]
    async fn refresh_reports_each_collection_separately() {
        let mut gateway = MockRemoteGateway::new();
        gateway
            .expect_call()
            .withf(|request| request.path == "messages")
            .returning(|_| Envelope::failure("API request failed: 502"));
        gateway
            .expect_call()
            .withf(|request| request.path != "messages")
            .returning(|_| Envelope::success(json!([])));

        let gateway = Arc::new(gateway);
        let mirror = LocalMirror::new(Arc::new(MemoryStore::new()));
        let provider = RemoteSyncProvider::new(Arc::clone(&gateway), mirror.clone());

        let report = provider.refresh().await;
        assert_eq!(report.failed, vec![keys::MESSAGES]);
        assert_eq!(report.refreshed.len(), 4);
        assert!(!report.is_complete());
        assert!(
            mirror.peek::<serde_json::Value>(keys::FEATURED_WORKS).is_some(),
            "refreshed collections must land in the mirror"
        );
    }
}
