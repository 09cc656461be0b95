//! Hooks the gateway runs around every request.
//!
//! The chain is an explicit ordered list, not hidden interception: request
//! hooks may edit outgoing headers, response hooks observe the settled
//! status. Neither side can swallow a response or an error, so whatever a
//! hook does, the caller still sees exactly what the backend answered.

use std::sync::Arc;

use http::{HeaderMap, HeaderValue, Method, StatusCode};
use tracing::debug;

use crate::cookies::{self, CookieRead};
use crate::session::SessionContext;

/// Header the CSRF token is echoed in (double-submit pattern).
pub const CSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Transforms an outgoing request before dispatch.
pub trait RequestHook: Send + Sync {
    /// Edit the headers of the request about to go out.
    fn on_request(&self, method: &Method, headers: &mut HeaderMap);
}

/// Observes the status of a settled response before the caller gets it.
pub trait ResponseHook: Send + Sync {
    /// The response's status; side effects only, no rewriting.
    fn on_response(&self, status: StatusCode);
}

/// Echoes the CSRF cookie as the `X-XSRF-TOKEN` header.
///
/// The cookie value is percent-decoded before echoing, since the backend
/// compares against the decoded token. When the cookie has not been issued
/// yet the request simply goes out bare; the priming endpoint itself is
/// reached exactly that way.
pub struct CsrfHeader {
    cookies: Arc<dyn CookieRead>,
}

impl CsrfHeader {
    /// Hook reading from the given cookie store.
    #[must_use]
    pub fn new(cookies: Arc<dyn CookieRead>) -> Self {
        Self { cookies }
    }
}

impl RequestHook for CsrfHeader {
    fn on_request(&self, _method: &Method, headers: &mut HeaderMap) {
        if let Some(token) = cookies::csrf_token(self.cookies.as_ref()) {
            match HeaderValue::from_str(&token) {
                Ok(value) => {
                    headers.insert(CSRF_HEADER, value);
                }
                Err(_) => {
                    debug!("csrf cookie value not usable as a header; sending without it");
                }
            }
        }
    }
}

/// Drops the locally cached identity whenever the backend answers 401.
///
/// The error itself still propagates to whoever made the call; this hook
/// never navigates or retries. It exists so every surface of the app
/// agrees the session is gone the moment the backend says so.
pub struct SessionReset {
    session: SessionContext,
}

impl SessionReset {
    /// Hook clearing the given session context.
    #[must_use]
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }
}

impl ResponseHook for SessionReset {
    fn on_response(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            self.session.clear_user();
        }
    }
}
