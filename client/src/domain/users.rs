//! Users service: remote authentication endpoints.
//!
//! The session manager sits on top of this service and owns the local
//! fallback paths; this module only shapes the remote calls.

use std::sync::Arc;

use serde_json::json;

use crate::domain::fallback::read_with_fallback;
use crate::domain::mirror::LocalMirror;
use crate::domain::ports::{ApiRequest, KeyValueStore, RemoteGateway};
use crate::domain::user::{User, UserType};
use crate::domain::{Envelope, keys};

/// A registration request as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// 11-digit CN mobile number.
    pub phone: String,
    /// Display name; the validation rule depends on `user_type`.
    pub username: String,
    /// Plaintext credential.
    pub password: String,
    /// Member kind; students are the default.
    pub user_type: UserType,
}

impl Registration {
    /// Build a student registration, the common case.
    pub fn student(
        phone: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            phone: phone.into(),
            username: username.into(),
            password: password.into(),
            user_type: UserType::Student,
        }
    }

    /// Build a teacher registration.
    pub fn teacher(
        phone: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user_type: UserType::Teacher,
            ..Self::student(phone, username, password)
        }
    }
}

/// Remote access to the `user/*` endpoints.
#[derive(Debug, Clone)]
pub struct UsersDirectory<G, S> {
    gateway: Arc<G>,
    mirror: LocalMirror<S>,
}

impl<G, S> UsersDirectory<G, S>
where
    G: RemoteGateway,
    S: KeyValueStore,
{
    /// Compose the service from its transport and mirror.
    pub fn new(gateway: Arc<G>, mirror: LocalMirror<S>) -> Self {
        Self { gateway, mirror }
    }

    /// Authenticate against the remote backend.
    pub async fn login(&self, phone: &str, password: &str) -> Envelope<User> {
        let request = ApiRequest::post("user/login")
            .with_json(json!({ "phone": phone, "password": password }));
        decode_user(self.gateway.as_ref().call(request).await)
    }

    /// Register against the remote backend.
    pub async fn register(&self, registration: &Registration) -> Envelope<User> {
        let request = ApiRequest::post("user/register").with_json(json!({
            "phone": registration.phone,
            "username": registration.username,
            "password": registration.password,
            "userType": registration.user_type,
        }));
        decode_user(self.gateway.as_ref().call(request).await)
    }

    /// Fetch the server's view of the authenticated user; falls back to the
    /// mirrored session user when the remote is unreachable.
    pub async fn current(&self) -> Envelope<User> {
        read_with_fallback(
            self.gateway.as_ref(),
            &self.mirror,
            ApiRequest::get("user/current"),
            keys::CURRENT_USER,
        )
        .await
    }
}

fn decode_user(envelope: Envelope<serde_json::Value>) -> Envelope<User> {
    match envelope {
        Envelope::Success(payload) => match serde_json::from_value(payload) {
            Ok(user) => Envelope::Success(user),
            Err(error) => Envelope::failure(format!("malformed user payload: {error}")),
        },
        Envelope::Failure(message) => Envelope::Failure(message),
    }
}
