//! Session and identity lifecycle.
//!
//! The session owns the authenticated-user state for one application
//! instance. It is remote-first: login and registration try the backend
//! through the users service and, when the network path fails, fall back to
//! the locally mirrored roster. Network faults never surface as errors here;
//! the one deliberate error channel is registration validation, whose caller
//! needs the specific reason rather than a boolean.

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::mirror::LocalMirror;
use crate::domain::ports::{KeyValueStore, RemoteGateway};
use crate::domain::user::{
    Role, StoredUser, User, UserType, is_valid_phone, is_valid_student_name, is_valid_teacher_name,
};
use crate::domain::users::{Registration, UsersDirectory};
use crate::domain::{Envelope, keys};

/// Reserved phone number of the bootstrap administrator.
pub const DEFAULT_ADMIN_PHONE: &str = "13800000000";
/// Default password of the bootstrap administrator; operational policy is to
/// change it after first login.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
/// Display name of the bootstrap administrator.
pub const DEFAULT_ADMIN_USERNAME: &str = "管理员";

/// Validation failures raised by the local registration path.
///
/// Each variant names the specific reason so callers can display it; every
/// other failure mode in this module folds into a boolean instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// The phone number is not an 11-digit CN mobile.
    #[error("phone number must be an 11-digit CN mobile number: {phone}")]
    InvalidPhone {
        /// The rejected input.
        phone: String,
    },
    /// A student username must follow the year/class/name convention.
    #[error("student username must look like 2025届1班张三: {username}")]
    InvalidStudentName {
        /// The rejected input.
        username: String,
    },
    /// A teacher username must be a pure Chinese-character name.
    #[error("teacher username must be a Chinese-character name: {username}")]
    InvalidTeacherName {
        /// The rejected input.
        username: String,
    },
    /// The phone number is already registered locally.
    #[error("phone number is already registered: {phone}")]
    DuplicatePhone {
        /// The conflicting input.
        phone: String,
    },
}

/// Authenticated-session owner for one application instance.
#[derive(Debug)]
pub struct Session<G, S> {
    directory: UsersDirectory<G, S>,
    mirror: LocalMirror<S>,
    user: Option<User>,
}

impl<G, S> Session<G, S>
where
    G: RemoteGateway,
    S: KeyValueStore,
{
    /// Hydrate a session: adopt the mirrored current user when present and
    /// make sure the local roster carries its bootstrap administrator.
    pub fn initialize(directory: UsersDirectory<G, S>, mirror: LocalMirror<S>) -> Self {
        let user = mirror.peek::<User>(keys::CURRENT_USER);
        if let Some(hydrated) = &user {
            debug!(phone = %hydrated.phone, "session hydrated from local mirror");
        }
        let session = Self {
            directory,
            mirror,
            user,
        };
        session.ensure_admin_exists();
        session
    }

    /// Append the bootstrap administrator when the roster lacks one.
    ///
    /// Runs on every initialisation, before and independent of any
    /// authentication, and is idempotent: the roster ends up with exactly one
    /// record carrying the reserved admin phone.
    fn ensure_admin_exists(&self) {
        let mut roster: Vec<StoredUser> = self.mirror.get(keys::USERS, Vec::new());
        let has_admin = roster.iter().any(|record| {
            record.user.role == Role::Admin && record.user.phone == DEFAULT_ADMIN_PHONE
        });
        if has_admin {
            return;
        }
        roster.push(bootstrap_admin());
        self.mirror.set(keys::USERS, &roster);
        info!("bootstrap administrator restored to the local roster");
    }

    /// Whether a user is currently authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The authenticated user, if any. Never carries a password.
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether the authenticated user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.role == Role::Admin)
    }

    /// Authenticate remote-first, then against the local roster.
    ///
    /// Wrong credentials are `false`, never an error; so is a corrupt or
    /// unavailable local store.
    pub async fn login(&mut self, phone: &str, password: &str) -> bool {
        match self.directory.login(phone, password).await {
            Envelope::Success(user) => {
                self.adopt(user);
                true
            }
            Envelope::Failure(message) => {
                debug!(error = %message, "remote login failed; checking local roster");
                self.login_from_roster(phone, password)
            }
        }
    }

    fn login_from_roster(&mut self, phone: &str, password: &str) -> bool {
        let roster: Vec<StoredUser> = self.mirror.get(keys::USERS, Vec::new());
        match roster
            .into_iter()
            .find(|record| record.matches(phone, password))
        {
            Some(record) => {
                self.adopt(record.into_user());
                true
            }
            None => false,
        }
    }

    /// Register remote-first; on remote failure, validate and create a local
    /// roster record.
    ///
    /// # Errors
    ///
    /// Local validation failures return a [`RegistrationError`] naming the
    /// reason. Remote failures are not errors: they route to the local path.
    pub async fn register(&mut self, registration: Registration) -> Result<(), RegistrationError> {
        match self.directory.register(&registration).await {
            Envelope::Success(user) => {
                self.adopt(user);
                Ok(())
            }
            Envelope::Failure(message) => {
                debug!(error = %message, "remote registration failed; registering locally");
                self.register_locally(registration)
            }
        }
    }

    fn register_locally(&mut self, registration: Registration) -> Result<(), RegistrationError> {
        validate_registration(&registration)?;

        // One get+mutate+set sequence; no await between roster read and write.
        let mut roster: Vec<StoredUser> = self.mirror.get(keys::USERS, Vec::new());
        if roster
            .iter()
            .any(|record| record.user.phone == registration.phone)
        {
            return Err(RegistrationError::DuplicatePhone {
                phone: registration.phone,
            });
        }

        let record = StoredUser {
            user: User {
                id: Uuid::new_v4().to_string(),
                username: registration.username,
                phone: registration.phone,
                role: Role::User,
                user_type: Some(registration.user_type),
                created_at: chrono::Utc::now(),
            },
            password: registration.password,
        };
        roster.push(record.clone());
        self.mirror.set(keys::USERS, &roster);

        self.adopt(record.into_user());
        Ok(())
    }

    /// Drop the authenticated user and its mirrored copy. The roster is
    /// untouched.
    pub fn logout(&mut self) {
        self.user = None;
        self.mirror.remove(keys::CURRENT_USER);
    }

    fn adopt(&mut self, user: User) {
        self.mirror.set(keys::CURRENT_USER, &user);
        self.user = Some(user);
    }
}

fn validate_registration(registration: &Registration) -> Result<(), RegistrationError> {
    match registration.user_type {
        UserType::Student if !is_valid_student_name(&registration.username) => {
            return Err(RegistrationError::InvalidStudentName {
                username: registration.username.clone(),
            });
        }
        UserType::Teacher if !is_valid_teacher_name(&registration.username) => {
            return Err(RegistrationError::InvalidTeacherName {
                username: registration.username.clone(),
            });
        }
        _ => {}
    }
    if !is_valid_phone(&registration.phone) {
        return Err(RegistrationError::InvalidPhone {
            phone: registration.phone.clone(),
        });
    }
    Ok(())
}

fn bootstrap_admin() -> StoredUser {
    StoredUser {
        user: User {
            id: Uuid::new_v4().to_string(),
            username: DEFAULT_ADMIN_USERNAME.to_owned(),
            phone: DEFAULT_ADMIN_PHONE.to_owned(),
            role: Role::Admin,
            user_type: None,
            created_at: chrono::Utc::now(),
        },
        password: DEFAULT_ADMIN_PASSWORD.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for session state transitions; the cross-component
    //! behaviour suite lives under `tests/`.

    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::domain::ports::{
        MemoryStore, MockRemoteGateway, SERVICE_UNAVAILABLE, UnreachableRemoteGateway,
    };

    fn offline_session() -> Session<UnreachableRemoteGateway, MemoryStore> {
        let gateway = Arc::new(UnreachableRemoteGateway);
        let mirror = LocalMirror::new(Arc::new(MemoryStore::new()));
        Session::initialize(
            UsersDirectory::new(Arc::clone(&gateway), mirror.clone()),
            mirror,
        )
    }

    fn roster_of<S: crate::domain::ports::KeyValueStore>(
        mirror: &LocalMirror<S>,
    ) -> Vec<StoredUser> {
        mirror.get(keys::USERS, Vec::new())
    }

    #[test]
    fn initialisation_heals_an_empty_roster_with_one_admin() {
        let session = offline_session();
        let roster = roster_of(&session.mirror);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].user.phone, DEFAULT_ADMIN_PHONE);
        assert_eq!(roster[0].user.role, Role::Admin);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn repeated_initialisation_never_duplicates_the_admin() {
        let gateway = Arc::new(UnreachableRemoteGateway);
        let mirror = LocalMirror::new(Arc::new(MemoryStore::new()));
        for _ in 0..3 {
            let _session = Session::initialize(
                UsersDirectory::new(Arc::clone(&gateway), mirror.clone()),
                mirror.clone(),
            );
        }
        let admins = roster_of(&mirror)
            .into_iter()
            .filter(|record| record.user.role == Role::Admin)
            .count();
        assert_eq!(admins, 1, "self-healing must be idempotent");
    }

    #[test]
    fn initialisation_hydrates_a_mirrored_session_user() {
        let gateway = Arc::new(UnreachableRemoteGateway);
        let mirror = LocalMirror::new(Arc::new(MemoryStore::new()));
        let user: User = serde_json::from_value(json!({
            "id": "u-1",
            "username": "2025届1班张三",
            "phone": "13800138001",
            "role": "user",
            "createdAt": "2026-03-01T09:00:00Z"
        }))
        .expect("fixture user");
        mirror.set(keys::CURRENT_USER, &user);

        let session = Session::initialize(
            UsersDirectory::new(Arc::clone(&gateway), mirror.clone()),
            mirror,
        );
        assert!(session.is_authenticated());
        assert_eq!(session.current_user(), Some(&user));
    }

    #[tokio::test]
    async fn offline_login_matches_roster_credentials_exactly() {
        let mut session = offline_session();
        assert!(
            session.login(DEFAULT_ADMIN_PHONE, DEFAULT_ADMIN_PASSWORD).await,
            "bootstrap admin must be able to log in offline"
        );
        assert!(session.is_admin());

        session.logout();
        assert!(
            !session.login(DEFAULT_ADMIN_PHONE, "wrong").await,
            "wrong password must fold to false, not an error"
        );
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn remote_login_wins_over_the_roster() {
        let mut gateway = MockRemoteGateway::new();
        gateway.expect_call().times(1).returning(|_| {
            Envelope::success(json!({
                "id": "u-9",
                "username": "2025届1班李四",
                "phone": "13800138009",
                "role": "user",
                "createdAt": "2026-03-01T09:00:00Z"
            }))
        });
        let gateway = Arc::new(gateway);
        let mirror = LocalMirror::new(Arc::new(MemoryStore::new()));
        let mut session = Session::initialize(
            UsersDirectory::new(Arc::clone(&gateway), mirror.clone()),
            mirror,
        );

        assert!(session.login("13800138009", "remote-pw").await);
        assert_eq!(
            session.current_user().map(|user| user.id.as_str()),
            Some("u-9")
        );
    }

    #[tokio::test]
    async fn local_registration_validates_before_writing() {
        let mut session = offline_session();

        let error = session
            .register(Registration::student("13800138000", "张三", "pw"))
            .await
            .expect_err("missing year/class markers must be rejected");
        assert!(matches!(error, RegistrationError::InvalidStudentName { .. }));

        let error = session
            .register(Registration::student("12345", "2025届1班张三", "pw"))
            .await
            .expect_err("bad phone must be rejected");
        assert!(matches!(error, RegistrationError::InvalidPhone { .. }));

        assert_eq!(
            roster_of(&session.mirror).len(),
            1,
            "failed validation must not grow the roster"
        );
    }

    #[tokio::test]
    async fn local_registration_authenticates_and_persists() {
        let mut session = offline_session();
        session
            .register(Registration::student("13800138001", "2025届1班张三", "pw"))
            .await
            .expect("valid registration succeeds locally");

        assert!(session.is_authenticated());
        assert!(!session.is_admin());
        let roster = roster_of(&session.mirror);
        assert_eq!(roster.len(), 2);
        assert!(
            session
                .mirror
                .peek::<User>(keys::CURRENT_USER)
                .is_some_and(|user| user.phone == "13800138001"),
            "the new member must be persisted as the session user"
        );

        let error = session
            .register(Registration::student("13800138001", "2025届2班王五", "pw2"))
            .await
            .expect_err("re-registering the same phone must fail");
        assert!(matches!(error, RegistrationError::DuplicatePhone { .. }));
    }

    #[tokio::test]
    async fn teacher_names_use_their_own_rule() {
        let mut session = offline_session();
        let error = session
            .register(Registration::teacher("13800138002", "Smith", "pw"))
            .await
            .expect_err("latin teacher names must be rejected");
        assert!(matches!(error, RegistrationError::InvalidTeacherName { .. }));

        session
            .register(Registration::teacher("13800138002", "王老师", "pw"))
            .await
            .expect("chinese teacher name succeeds");
    }

    #[tokio::test]
    async fn logout_clears_the_session_but_not_the_roster() {
        let mut session = offline_session();
        assert!(session.login(DEFAULT_ADMIN_PHONE, DEFAULT_ADMIN_PASSWORD).await);

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.mirror.peek::<User>(keys::CURRENT_USER).is_none());
        assert_eq!(roster_of(&session.mirror).len(), 1, "roster must survive logout");
    }

    #[tokio::test]
    async fn remote_registration_failure_message_is_not_surfaced_as_an_error() {
        let mut gateway = MockRemoteGateway::new();
        gateway
            .expect_call()
            .returning(|_| Envelope::failure(SERVICE_UNAVAILABLE));
        let gateway = Arc::new(gateway);
        let mirror = LocalMirror::new(Arc::new(MemoryStore::new()));
        let mut session = Session::initialize(
            UsersDirectory::new(Arc::clone(&gateway), mirror.clone()),
            mirror,
        );

        session
            .register(Registration::student("13800138003", "2026届3班赵六", "pw"))
            .await
            .expect("remote failure routes to the local path");
        assert!(session.is_authenticated());
    }
}
