//! Domain core: the envelope contract, resource services, and the session.
//!
//! Everything here depends only on the outbound ports; adapters live in
//! `crate::outbound`.

pub mod envelope;
mod fallback;
pub mod keys;
pub mod knowledge;
pub mod messages;
pub mod mirror;
pub mod ports;
pub mod resources;
pub mod session;
pub mod sync;
pub mod user;
pub mod users;
pub mod voting;
pub mod works;

pub use self::envelope::{Envelope, EnvelopeShapeError};
pub use self::knowledge::KnowledgeBase;
pub use self::messages::MessageBoard;
pub use self::mirror::LocalMirror;
pub use self::resources::{KnowledgeItem, Message, VotingActivity, Work};
pub use self::session::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_PHONE, DEFAULT_ADMIN_USERNAME, RegistrationError, Session,
};
pub use self::sync::RemoteSyncProvider;
pub use self::user::{Role, StoredUser, User, UserType};
pub use self::users::{Registration, UsersDirectory};
pub use self::voting::VotingDesk;
pub use self::works::WorksCatalogue;
