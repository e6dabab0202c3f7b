//! Dual-backend data-access layer for the photography club website.
//!
//! Every domain operation goes to the remote API first and, for reads, falls
//! back to a durable local mirror when the network path fails. The crate is
//! organised hexagonally:
//!
//! - [`domain`] holds the envelope contract, the per-resource services, the
//!   session manager, and the outbound port traits they depend on.
//! - [`outbound`] holds the production adapters: a reqwest HTTP gateway and a
//!   JSON-file key-value store.
//! - [`config`] loads deployment settings from the environment.
//!
//! [`ClubClient`] wires the whole layer together for one application
//! instance.

pub mod client;
pub mod config;
pub mod domain;
pub mod outbound;

pub use client::{BuildError, ClubClient};
pub use config::ClientSettings;
pub use domain::{Envelope, Registration, RegistrationError, Session};
