//! Cookie access behind a small read capability, so CSRF extraction and
//! the request hooks can be exercised without a live cookie jar.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use percent_encoding::percent_decode_str;
use reqwest::cookie::{CookieStore, Jar};
use url::Url;

/// Name of the cookie the backend issues on the CSRF priming endpoint.
pub const CSRF_COOKIE_NAME: &str = "XSRF-TOKEN";

/// Read-only view over whatever store holds the session's cookies.
pub trait CookieRead: Send + Sync {
    /// Current value of the named cookie, exactly as stored.
    fn read(&self, name: &str) -> Option<String>;
}

/// [`CookieRead`] backed by the reqwest jar the gateway sends and receives
/// cookies through.
#[derive(Debug)]
pub struct JarCookies {
    jar: Arc<Jar>,
    origin: Url,
}

impl JarCookies {
    /// Wrap a jar, scoped to the origin cookies were stored under.
    #[must_use]
    pub fn new(jar: Arc<Jar>, origin: Url) -> Self {
        Self { jar, origin }
    }
}

impl CookieRead for JarCookies {
    fn read(&self, name: &str) -> Option<String> {
        let header = self.jar.cookies(&self.origin)?;
        let raw = header.to_str().ok()?;

        for pair in raw.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            if let (Some(key), Some(value)) = (parts.next(), parts.next()) {
                if key.trim() == name {
                    return Some(value.trim().to_string());
                }
            }
        }
        None
    }
}

/// In-memory [`CookieRead`] for tests and embedders without a jar.
#[derive(Debug, Default)]
pub struct MemoryCookies {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryCookies {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a cookie value.
    pub fn set(&self, name: &str, value: &str) {
        if let Ok(mut guard) = self.values.lock() {
            guard.insert(name.to_string(), value.to_string());
        }
    }

    /// Drop a cookie, if present.
    pub fn remove(&self, name: &str) {
        if let Ok(mut guard) = self.values.lock() {
            guard.remove(name);
        }
    }
}

impl CookieRead for MemoryCookies {
    fn read(&self, name: &str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|guard| guard.get(name).cloned())
    }
}

/// The CSRF token to echo back, or `None` when the priming cookie has not
/// been issued yet.
///
/// Backends store the token URL-encoded in the cookie but compare against
/// the decoded form, so the value is percent-decoded here. Values that are
/// not valid percent-encoding pass through unchanged.
#[must_use]
pub fn csrf_token(store: &dyn CookieRead) -> Option<String> {
    let raw = store.read(CSRF_COOKIE_NAME)?;
    let decoded = percent_decode_str(&raw)
        .decode_utf8()
        .map(|value| value.into_owned())
        .ok();
    Some(decoded.unwrap_or(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemoryCookies::new();
        store.set("ourspace_session", "abc123");

        assert_eq!(store.read("ourspace_session"), Some("abc123".to_string()));
        assert_eq!(store.read("missing"), None);

        store.remove("ourspace_session");
        assert_eq!(store.read("ourspace_session"), None);
    }

    #[test]
    fn csrf_token_decodes_url_encoding() {
        let store = MemoryCookies::new();
        store.set(CSRF_COOKIE_NAME, "spooky%3D%3Dtoken");

        assert_eq!(csrf_token(&store), Some("spooky==token".to_string()));
    }

    #[test]
    fn csrf_token_passes_plain_values_through() {
        let store = MemoryCookies::new();
        store.set(CSRF_COOKIE_NAME, "plain-token");

        assert_eq!(csrf_token(&store), Some("plain-token".to_string()));
    }

    #[test]
    fn csrf_token_absent_when_cookie_missing() {
        let store = MemoryCookies::new();
        store.set("ourspace_session", "abc123");

        assert_eq!(csrf_token(&store), None);
    }

    #[test]
    fn jar_cookies_reads_named_cookie() {
        let origin = Url::parse("http://localhost:8000").unwrap();
        let jar = Arc::new(Jar::default());
        jar.add_cookie_str("XSRF-TOKEN=tok%3D; Path=/", &origin);
        jar.add_cookie_str("ourspace_session=sess; Path=/", &origin);

        let store = JarCookies::new(jar, origin);

        assert_eq!(store.read("XSRF-TOKEN"), Some("tok%3D".to_string()));
        assert_eq!(store.read("ourspace_session"), Some("sess".to_string()));
        assert_eq!(store.read("missing"), None);
        assert_eq!(csrf_token(&store), Some("tok=".to_string()));
    }
}
