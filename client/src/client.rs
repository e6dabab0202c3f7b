//! Composition root: one value bundling every service for an application
//! instance.

use std::sync::Arc;

use crate::config::ClientSettings;
use crate::domain::mirror::LocalMirror;
use crate::domain::ports::{KeyValueStore, RemoteGateway};
use crate::domain::{
    KnowledgeBase, MessageBoard, RemoteSyncProvider, Session, UsersDirectory, VotingDesk,
    WorksCatalogue,
};
use crate::outbound::{HttpRemoteGateway, JsonFileStore};

/// All services of the data-access layer, wired over one transport and one
/// mirror. Constructed once per application instance; session initialisation
/// (hydration and admin self-heal) happens here.
#[derive(Debug)]
pub struct ClubClient<G, S> {
    /// Works galleries and submission.
    pub works: WorksCatalogue<G, S>,
    /// Message board.
    pub messages: MessageBoard<G, S>,
    /// Voting activities and ballots.
    pub voting: VotingDesk<G, S>,
    /// Knowledge base.
    pub knowledge: KnowledgeBase<G, S>,
    /// Authenticated-session owner.
    pub session: Session<G, S>,
    gateway: Arc<G>,
    mirror: LocalMirror<S>,
}

impl<G, S> ClubClient<G, S>
where
    G: RemoteGateway,
    S: KeyValueStore,
{
    /// Wire every service over a shared transport and backing store.
    pub fn new(gateway: Arc<G>, store: Arc<S>) -> Self {
        let mirror = LocalMirror::new(store);
        let directory = UsersDirectory::new(Arc::clone(&gateway), mirror.clone());
        Self {
            works: WorksCatalogue::new(Arc::clone(&gateway), mirror.clone()),
            messages: MessageBoard::new(Arc::clone(&gateway), mirror.clone()),
            voting: VotingDesk::new(Arc::clone(&gateway), mirror.clone()),
            knowledge: KnowledgeBase::new(Arc::clone(&gateway), mirror.clone()),
            session: Session::initialize(directory, mirror.clone()),
            gateway,
            mirror,
        }
    }

    /// Build the remote-backed sync provider over the same transport and
    /// mirror as the services.
    pub fn sync_provider(&self) -> RemoteSyncProvider<G, S> {
        RemoteSyncProvider::new(Arc::clone(&self.gateway), self.mirror.clone())
    }
}

impl ClubClient<HttpRemoteGateway, JsonFileStore> {
    /// Wire the production adapters from deployment settings and an origin.
    ///
    /// # Errors
    ///
    /// Returns an error when the origin and base path do not form a valid
    /// URL or the HTTP client cannot be constructed.
    pub fn from_settings(
        settings: &ClientSettings,
        origin: &url::Url,
    ) -> Result<Self, BuildError> {
        let base = settings.api_url(origin)?;
        let gateway = Arc::new(HttpRemoteGateway::new(base)?);
        let store = Arc::new(JsonFileStore::open(settings.store_path()));
        Ok(Self::new(gateway, store))
    }
}

/// Faults raised while wiring the production adapters.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Origin and base path did not combine into a valid URL.
    #[error("invalid API base: {0}")]
    InvalidBase(#[from] url::ParseError),
    /// The HTTP client could not be constructed.
    #[error("http client construction failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}
