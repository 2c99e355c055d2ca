//! Cookie-session HTTP client.
//!
//! This module provides the `SessionClient` struct which logs in against a
//! JSON login endpoint, keeps the returned session cookie in an owned jar
//! scoped to the target API, and issues authenticated reads that echo the
//! CSRF cookie back as a header.

use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::constants::{CSRF_COOKIE, LOGIN_REJECTED_MARKER, SESSION_COOKIE};
use super::error::SessionError;
use crate::auth::{Credentials, SessionJar};
use crate::user_agent;

/// Construction parameters for a [`SessionClient`].
///
/// Timeouts default to `None`, leaving the transport defaults in place.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Login credentials.
    pub credentials: Credentials,
    /// Login endpoint (receives the JSON credential POST).
    pub login_url: String,
    /// Base URL of the target API; the session cookie is scoped here.
    pub base_url: String,
    /// Optional TCP connect timeout.
    pub connect_timeout: Option<Duration>,
    /// Optional read timeout, applied to the whole request.
    pub read_timeout: Option<Duration>,
}

impl SessionConfig {
    /// Creates a config with no timeouts.
    #[must_use]
    pub fn new(
        credentials: Credentials,
        login_url: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            login_url: login_url.into(),
            base_url: base_url.into(),
            connect_timeout: None,
            read_timeout: None,
        }
    }

    /// Sets the TCP connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the read timeout.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }
}

/// Result of an authenticated read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The server answered 200 with this body.
    Body(String),
    /// No session cookie is present; no request was sent.
    NotAuthenticated,
    /// The server answered with a status other than 200.
    HttpStatus(StatusCode),
}

impl FetchOutcome {
    /// Returns the body for a 200 response, `None` otherwise.
    #[must_use]
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Body(body) => Some(body),
            Self::NotAuthenticated | Self::HttpStatus(_) => None,
        }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "UserName")]
    user_name: &'a str,
    #[serde(rename = "UserPassword")]
    user_password: &'a str,
}

#[derive(Deserialize)]
struct LoginRejection {
    #[serde(rename = "Message")]
    message: Option<String>,
}

/// Session wrapper around a single login and subsequent authenticated reads.
///
/// Calls are strictly sequential: `login` takes `&mut self`, and every
/// request is awaited and its body fully read before the call returns.
///
/// # Example
///
/// ```no_run
/// use session_client::{Credentials, SessionClient, SessionConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SessionConfig::new(
///     Credentials::new("Supervisor", "Supervisor"),
///     "https://app.example.com/ServiceModel/AuthService.svc/Login",
///     "https://app.example.com/0/odata/",
/// );
/// let mut client = SessionClient::new(config)?;
/// client.login().await?;
/// if let Some(body) = client
///     .authenticated_get("https://app.example.com/0/odata/Contact?$top=1")
///     .await?
/// {
///     println!("{body}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionClient {
    credentials: Credentials,
    login_url: Url,
    base_url: Url,
    jar: SessionJar,
    client: Client,
}

impl SessionClient {
    /// Creates a client with an empty jar.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidUrl`] when the login or base URL does not
    /// parse, or [`SessionError::ClientBuild`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let login_url = parse_url(&config.login_url)?;
        let base_url = parse_url(&config.base_url)?;
        let client = build_client(config.connect_timeout, config.read_timeout)
            .map_err(SessionError::ClientBuild)?;

        Ok(Self {
            credentials: config.credentials,
            login_url,
            base_url,
            jar: SessionJar::new(),
            client,
        })
    }

    /// Posts the credentials to the login endpoint and stores the session cookie.
    ///
    /// Response cookies are captured into a fresh jar under the login URL's
    /// scope, then the session cookie is copied into that jar under the base
    /// URL. The fresh jar replaces the current one only when login succeeds.
    ///
    /// A status other than 200 is not an error: the call returns `Ok(())` and
    /// the session is left as it was. Check [`is_authenticated`](Self::is_authenticated).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unauthorized`] when the 200 body contains the
    /// rejection code, [`SessionError::MissingSessionCookie`] when an accepted
    /// login sets no session cookie, and [`SessionError::Network`] or
    /// [`SessionError::Timeout`] on transport failure.
    #[instrument(skip(self), fields(login_url = %self.login_url, username = %self.credentials.username()))]
    pub async fn login(&mut self) -> Result<(), SessionError> {
        let payload = LoginRequest {
            user_name: self.credentials.username(),
            user_password: self.credentials.password(),
        };

        let response = self
            .client
            .post(self.login_url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| SessionError::transport(self.login_url.as_str(), e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "login returned non-OK status; session unchanged");
            return Ok(());
        }

        let jar = SessionJar::new();
        jar.capture_set_cookies(response.headers(), &self.login_url);
        let session_cookie = response
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string());

        let body = response
            .text()
            .await
            .map_err(|e| SessionError::transport(self.login_url.as_str(), e))?;

        if body.contains(LOGIN_REJECTED_MARKER) {
            return Err(SessionError::unauthorized(
                self.credentials.username(),
                self.base_url.as_str(),
                rejection_message(&body),
            ));
        }

        let Some(session_cookie) = session_cookie else {
            return Err(SessionError::MissingSessionCookie {
                url: self.login_url.to_string(),
                cookie: SESSION_COOKIE,
            });
        };

        jar.insert(SESSION_COOKIE, &session_cookie, &self.base_url);
        self.jar = jar;
        info!(base_url = %self.base_url, "login accepted");
        Ok(())
    }

    /// Returns true iff the jar holds a non-empty session cookie for the base URL.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.jar
            .get(SESSION_COOKIE, &self.base_url)
            .is_some_and(|value| !value.is_empty())
    }

    /// Issues an authenticated GET and reports the outcome as a typed value.
    ///
    /// Sends every jar cookie that matches `url`, plus a `BPMCSRF` header when
    /// the jar holds that cookie for the base URL. `url` is not required to be
    /// under the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidUrl`] when `url` does not parse, and
    /// [`SessionError::Network`] or [`SessionError::Timeout`] on transport failure.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<FetchOutcome, SessionError> {
        if !self.is_authenticated() {
            return Ok(FetchOutcome::NotAuthenticated);
        }

        let target = parse_url(url)?;
        let mut request = self.client.get(target.clone());
        if let Some(cookies) = self.jar.cookie_header(&target) {
            request = request.header(COOKIE, cookies);
        }
        if let Some(token) = self.csrf_token() {
            debug!("attaching CSRF header");
            request = request.header(CSRF_COOKIE, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SessionError::transport(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok(FetchOutcome::HttpStatus(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SessionError::transport(url, e))?;
        debug!(bytes = body.len(), "fetched response body");
        Ok(FetchOutcome::Body(body))
    }

    /// Issues an authenticated GET and returns the body on HTTP 200.
    ///
    /// Returns `Ok(None)` with a warning, and without escalating, when the
    /// session is not authenticated (no request is sent) or when the server
    /// answers with any other status.
    ///
    /// # Errors
    ///
    /// Same as [`fetch`](Self::fetch).
    pub async fn authenticated_get(&self, url: &str) -> Result<Option<String>, SessionError> {
        let outcome = self.fetch(url).await?;
        match &outcome {
            FetchOutcome::Body(_) => {}
            FetchOutcome::NotAuthenticated => {
                warn!(url, "not authenticated; call login() before authenticated requests");
            }
            FetchOutcome::HttpStatus(status) => {
                warn!(url, status = status.as_u16(), "failed to fetch data");
            }
        }
        Ok(outcome.into_body())
    }

    /// Returns the session cookie jar.
    #[must_use]
    pub fn jar(&self) -> &SessionJar {
        &self.jar
    }

    /// Returns the target base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the login endpoint URL.
    #[must_use]
    pub fn login_url(&self) -> &Url {
        &self.login_url
    }

    /// Returns the username this session logs in as.
    #[must_use]
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    fn csrf_token(&self) -> Option<String> {
        self.jar.get(CSRF_COOKIE, &self.base_url)
    }
}

fn parse_url(url: &str) -> Result<Url, SessionError> {
    Url::parse(url).map_err(|e| SessionError::invalid_url(url, e))
}

fn build_client(
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .gzip(true)
        .user_agent(user_agent::default_user_agent());
    if let Some(connect_timeout) = connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }
    if let Some(read_timeout) = read_timeout {
        builder = builder.timeout(read_timeout);
    }
    builder.build()
}

/// Extracts the server's `Message` from a rejected login body, if any.
fn rejection_message(body: &str) -> Option<String> {
    serde_json::from_str::<LoginRejection>(body)
        .ok()
        .and_then(|rejection| rejection.message)
        .filter(|message| !message.is_empty())
}
