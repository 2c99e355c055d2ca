//! Cookie-session authentication against a JSON login endpoint.
//!
//! # Flow
//!
//! 1. [`SessionClient::login`] posts `{"UserName", "UserPassword"}` as JSON.
//!    A 200 body containing `"Code":1` is a rejection; otherwise the
//!    `.ASPXAUTH` cookie is copied into the jar under the target base URL.
//! 2. [`SessionClient::is_authenticated`] checks the jar for that cookie.
//! 3. [`SessionClient::authenticated_get`] sends the jar's cookies and echoes
//!    the `BPMCSRF` cookie as a header of the same name.
//!
//! # Example
//!
//! ```no_run
//! use session_client::{Credentials, SessionClient, SessionConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = SessionClient::new(SessionConfig::new(
//!     Credentials::new("Supervisor", "Supervisor"),
//!     "https://app.example.com/ServiceModel/AuthService.svc/Login",
//!     "https://app.example.com/0/odata/",
//! ))?;
//! client.login().await?;
//! assert!(client.is_authenticated());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;

pub use client::{FetchOutcome, SessionClient, SessionConfig};
pub use constants::{CSRF_COOKIE, LOGIN_REJECTED_MARKER, SESSION_COOKIE};
pub use error::SessionError;

// Note: no module-local Result alias; use `Result<T, SessionError>` explicitly.
