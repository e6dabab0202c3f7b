//! Outbound ports for the data-access core.
//!
//! Each port is an object-safe trait with a test-only `mockall` automock and,
//! where useful, a hand-written double for explicit substitution.

mod key_value_store;
mod remote_gateway;
mod sync_provider;

#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{KeyValueStore, MemoryStore, StoreError};
#[cfg(test)]
pub use remote_gateway::MockRemoteGateway;
pub use remote_gateway::{
    ApiRequest, HttpMethod, RemoteGateway, SERVICE_UNAVAILABLE, UnreachableRemoteGateway,
};
#[cfg(test)]
pub use sync_provider::MockSyncProvider;
pub use sync_provider::{NoOpSyncProvider, SyncProvider, SyncReport};
