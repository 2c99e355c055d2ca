//! Error types for the session module.
//!
//! Only hard failures live here. A non-200 status from either endpoint is not
//! an error: `login` ignores it and reads report it through
//! [`FetchOutcome`](super::FetchOutcome).

use thiserror::Error;

/// Errors that can occur while logging in or issuing authenticated requests.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The login endpoint answered 200 but its body carried the rejection code.
    #[error("unauthorized {username} for {url}{}", message_suffix(.message.as_deref()))]
    Unauthorized {
        /// The username that was rejected.
        username: String,
        /// The target base URL the session was meant for.
        url: String,
        /// Server-supplied rejection message, when the body had one.
        message: Option<String>,
    },

    /// Login was accepted but the response did not set the session cookie.
    #[error("login response from {url} did not set the {cookie} cookie")]
    MissingSessionCookie {
        /// The login URL.
        url: String,
        /// The expected cookie name.
        cookie: &'static str,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
        /// The parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl SessionError {
    /// Creates an unauthorized error.
    pub fn unauthorized(
        username: impl Into<String>,
        url: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        Self::Unauthorized {
            username: username.into(),
            url: url.into(),
            message,
        }
    }

    /// Maps a transport error, separating timeouts from other network failures.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    /// Returns true when the server explicitly rejected the credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

fn message_suffix(message: Option<&str>) -> String {
    message.map_or_else(String::new, |message| format!(": {message}"))
}
