//! Constants for the session module (cookie names, login protocol markers).

/// Session-identity cookie set by a successful login.
pub const SESSION_COOKIE: &str = ".ASPXAUTH";

/// CSRF cookie whose value is echoed back in a request header of the same name.
pub const CSRF_COOKIE: &str = "BPMCSRF";

/// Substring the login endpoint embeds in a 200 response to reject credentials.
pub const LOGIN_REJECTED_MARKER: &str = "\"Code\":1";
