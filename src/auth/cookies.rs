//! URL-scoped session cookie jar.
//!
//! Wraps `reqwest::cookie::Jar` so the session client owns an explicit jar
//! instead of relying on a client-wide cookie store. Cookies are stored and
//! looked up per URL using the jar's RFC 6265 domain/path matching.

use std::fmt;
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};
use tracing::{debug, instrument};
use url::Url;

/// Cookie jar owned by a single session.
///
/// Values are never exposed through Debug output; cookie values are
/// session secrets.
#[derive(Default)]
pub struct SessionJar {
    inner: Arc<Jar>,
}

impl SessionJar {
    /// Creates an empty jar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `name=value` scoped to `url`.
    ///
    /// No attributes are attached: the cookie becomes a host-only session
    /// cookie for `url`'s host with the default path derived from `url`.
    /// This is how a cookie received from one origin is copied to another.
    #[instrument(level = "debug", skip(self, value), fields(url = %url))]
    pub fn insert(&self, name: &str, value: &str, url: &Url) {
        self.inner.add_cookie_str(&format!("{name}={value}"), url);
        debug!(name, "stored cookie");
    }

    /// Stores every `Set-Cookie` header from a response under the
    /// response's own scope.
    ///
    /// Returns the number of `Set-Cookie` headers seen.
    #[instrument(level = "debug", skip(self, headers), fields(url = %url))]
    pub fn capture_set_cookies(&self, headers: &HeaderMap, url: &Url) -> usize {
        let mut count = 0;
        let mut set_cookies = headers.get_all(SET_COOKIE).iter().inspect(|_| count += 1);
        self.inner.set_cookies(&mut set_cookies, url);
        debug!(count, "captured response cookies");
        count
    }

    /// Returns the `Cookie` header value the jar would send to `url`.
    #[must_use]
    pub fn cookie_header(&self, url: &Url) -> Option<HeaderValue> {
        self.inner.cookies(url)
    }

    /// Returns the value of cookie `name` as it would be sent to `url`.
    ///
    /// Cookie values are sensitive; avoid logging the return value.
    #[must_use]
    pub fn get(&self, name: &str, url: &Url) -> Option<String> {
        let header = self.cookie_header(url)?;
        find_cookie_value(header.to_str().ok()?, name).map(str::to_string)
    }

    /// Returns whether cookie `name` would be sent to `url`.
    #[must_use]
    pub fn contains(&self, name: &str, url: &Url) -> bool {
        self.get(name, url).is_some()
    }
}

// Custom Debug impl that redacts stored cookies.
impl fmt::Debug for SessionJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionJar")
            .field("cookies", &"[REDACTED]")
            .finish()
    }
}

/// Finds `name` in a `Cookie` header (`a=1; b=2`).
fn find_cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(cookie_name, _)| *cookie_name == name)
        .map(|(_, value)| value)
}
