//! Voting service: activities and ballot casting.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::domain::fallback::read_with_fallback;
use crate::domain::mirror::LocalMirror;
use crate::domain::ports::{ApiRequest, KeyValueStore, RemoteGateway};
use crate::domain::{Envelope, VotingActivity, keys};

/// Best-available access to voting activities.
#[derive(Debug, Clone)]
pub struct VotingDesk<G, S> {
    gateway: Arc<G>,
    mirror: LocalMirror<S>,
}

impl<G, S> VotingDesk<G, S>
where
    G: RemoteGateway,
    S: KeyValueStore,
{
    /// Compose the service from its transport and mirror.
    pub fn new(gateway: Arc<G>, mirror: LocalMirror<S>) -> Self {
        Self { gateway, mirror }
    }

    /// All voting activities; falls back to the mirrored copy when the
    /// remote is unreachable.
    pub async fn activities(&self) -> Envelope<Vec<VotingActivity>> {
        read_with_fallback(
            self.gateway.as_ref(),
            &self.mirror,
            ApiRequest::get("voting/activities"),
            keys::VOTING_ACTIVITIES,
        )
        .await
    }

    /// Cast a vote for `work_id` within the given activity. Remote-only;
    /// ballots are never queued locally.
    pub async fn vote(&self, activity_id: &str, work_id: &str) -> Envelope<Value> {
        self.gateway
            .as_ref()
            .call(
                ApiRequest::post(format!("voting/activities/{activity_id}/vote"))
                    .with_json(json!({ "workId": work_id })),
            )
            .await
    }
}
