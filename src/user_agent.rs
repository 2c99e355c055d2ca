//! Default User-Agent for session traffic.

/// Default User-Agent for login and authenticated requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("session-client/{version}")
}
