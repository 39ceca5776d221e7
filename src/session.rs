//! Anonymous session handling with cookies.
//!
//! A session is not a stored entity: it is just the set of transactions that
//! share a session identifier. The identifier travels in a cookie, and
//! possession of a well-formed cookie value is the only access control.

use std::fmt::Display;

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

use crate::Error;

/// The name of the cookie holding the session identifier.
pub const SESSION_COOKIE: &str = "sessionId";

/// How long a session cookie stays valid on the client.
pub(crate) const SESSION_COOKIE_DURATION: Duration = Duration::days(7);

/// The identifier scoping transactions to one anonymous session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh, random session identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session identifier from its cookie text form.
    ///
    /// # Errors
    /// Returns an error if `value` is not a well-formed UUID.
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value).map(Self)
    }

    /// The underlying UUID, for binding to database queries.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for SessionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Read the active session identifier from the request's cookies.
///
/// # Errors
/// Returns [Error::SessionCookieMissing] if the cookie is absent or its value
/// is not a well-formed session identifier.
pub(crate) fn get_session_id_from_cookies(jar: &CookieJar) -> Result<SessionId, Error> {
    match jar.get(SESSION_COOKIE) {
        Some(cookie) => {
            SessionId::parse(cookie.value_trimmed()).map_err(|_| Error::SessionCookieMissing)
        }
        None => Err(Error::SessionCookieMissing),
    }
}

/// Resolve the session identifier for a write request.
///
/// Returns the identifier from the cookie jar when one is present, otherwise
/// a freshly generated identifier. The flag is true when the identifier is
/// new and the caller must set the session cookie on its response.
pub(crate) fn resolve_or_create_session(jar: &CookieJar) -> (SessionId, bool) {
    match get_session_id_from_cookies(jar) {
        Ok(session_id) => (session_id, false),
        Err(_) => (SessionId::generate(), true),
    }
}

/// Add the session cookie to the cookie jar.
///
/// The cookie is scoped to the whole site, lives for
/// [SESSION_COOKIE_DURATION], and is hidden from client-side scripts. It is
/// only marked `Secure` when `secure` is true, i.e. in production deployments
/// served over HTTPS.
///
/// Returns the cookie jar with the cookie added.
pub(crate) fn set_session_cookie(jar: CookieJar, session_id: SessionId, secure: bool) -> CookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, session_id.to_string()))
            .path("/")
            .max_age(SESSION_COOKIE_DURATION)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure),
    )
}

/// Middleware function that checks for a session cookie on read endpoints.
///
/// The session identifier is placed into the request and the request executed
/// normally if the cookie holds a well-formed identifier, otherwise a 401
/// response is returned and the downstream handler never runs.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(session_id): Extension<SessionId>` to receive the identifier.
pub async fn session_guard(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let session_id = match get_session_id_from_cookies(&jar) {
        Ok(session_id) => session_id,
        Err(error) => return error.into_response(),
    };

    request.extensions_mut().insert(session_id);

    next.run(request).await
}
