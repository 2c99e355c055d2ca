//! Session Client Library
//!
//! Authenticates against a JSON username/password login endpoint, keeps the
//! returned session cookie in an owned jar scoped to the target API, and
//! performs CSRF-guarded authenticated reads.
//!
//! # Architecture
//!
//! - [`auth`] - Credentials and the URL-scoped session cookie jar
//! - [`session`] - Login, authentication state, and authenticated GET

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod session;
mod user_agent;

// Re-export commonly used types
pub use auth::{Credentials, SessionJar};
pub use session::{
    CSRF_COOKIE, FetchOutcome, LOGIN_REJECTED_MARKER, SESSION_COOKIE, SessionClient,
    SessionConfig, SessionError,
};
