//! Login credentials for the session client.

use std::fmt;

/// Username/password pair supplied at construction.
///
/// Credentials are immutable for the lifetime of the owning client. The
/// password is redacted in Debug output so it never reaches the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates a new credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// Passwords are sensitive; avoid logging the return value.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Custom Debug impl that redacts the password.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
