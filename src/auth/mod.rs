//! Credentials and session cookie storage.
//!
//! This module provides the login credential pair and the URL-scoped cookie
//! jar the session client owns.

mod cookies;
mod credentials;

pub use cookies::SessionJar;
pub use credentials::Credentials;
