//! Outbound adapters implementing the domain ports.

pub mod http;
pub mod store;

pub use self::http::HttpRemoteGateway;
pub use self::store::JsonFileStore;
