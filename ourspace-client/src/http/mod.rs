//! The HTTP gateway every backend call goes through.
//!
//! One `reqwest` client configured once: JSON headers, a shared cookie jar
//! for the session, and the hook chain from [`middleware`]. Paths are
//! joined onto the configured base URL the same way the web surfaces do
//! it, so the same relative endpoints work everywhere.

pub mod middleware;

use std::sync::Arc;

use http::{HeaderMap, HeaderName, HeaderValue, Method, header};
use reqwest::cookie::Jar;
use reqwest::{Client, Response};
use serde::Serialize;
use shared::models::ErrorBody;
use tracing::debug;
use url::Url;

use crate::cookies::JarCookies;
use crate::error::ApiError;
use crate::session::SessionContext;
use middleware::{CsrfHeader, RequestHook, ResponseHook, SessionReset};

const USER_AGENT: &str = concat!("ourspace-client/", env!("CARGO_PKG_VERSION"));

/// Configured HTTP transport plus the hook chain around it.
pub struct Gateway {
    http: Client,
    base_url: Url,
    request_hooks: Vec<Arc<dyn RequestHook>>,
    response_hooks: Vec<Arc<dyn ResponseHook>>,
}

impl Gateway {
    /// Build a gateway for `base_url`, sending cookies from `jar` and
    /// reporting unauthorized responses into `session`.
    ///
    /// The standard chain is installed: the CSRF cookie echo on the way
    /// out, the session reset on the way back.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error when the client cannot be
    /// constructed.
    pub fn new(
        base_url: Url,
        jar: Arc<Jar>,
        session: SessionContext,
    ) -> reqwest::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );

        let http = Client::builder()
            .cookie_provider(jar.clone())
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()?;

        let reader = JarCookies::new(jar, base_url.clone());

        Ok(Self {
            http,
            base_url,
            request_hooks: vec![Arc::new(CsrfHeader::new(Arc::new(reader)))],
            response_hooks: vec![Arc::new(SessionReset::new(session))],
        })
    }

    /// Append a hook to the end of the outgoing chain.
    pub fn install_request_hook(&mut self, hook: Arc<dyn RequestHook>) {
        self.request_hooks.push(hook);
    }

    /// Append a hook to the end of the response chain.
    pub fn install_response_hook(&mut self, hook: Arc<dyn ResponseHook>) {
        self.response_hooks.push(hook);
    }

    /// The base URL requests are joined onto.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issue a GET and classify any rejection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures and non-success
    /// statuses.
    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        self.dispatch::<()>(Method::GET, path, None).await
    }

    /// Issue a JSON POST and classify any rejection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures and non-success
    /// statuses.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, ApiError> {
        self.dispatch(Method::POST, path, Some(body)).await
    }

    async fn dispatch<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(path)?;
        debug!(method = %method, url = %url, "dispatching request");

        let headers = self.apply_request_hooks(&method);
        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        for hook in &self.response_hooks {
            hook.on_response(status);
        }

        if status.is_success() {
            return Ok(response);
        }

        debug!(status = %status, "backend rejected request");
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, ErrorBody::from_json(&body)))
    }

    fn apply_request_hooks(&self, method: &Method) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for hook in &self.request_hooks {
            hook.on_request(method, &mut headers);
        }
        headers
    }

    /// Join a path onto the base URL, tolerating stray slashes on either
    /// side, the same way web clients concatenate onto their base.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|_| ApiError::Misconfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn gateway(base: &str) -> Gateway {
        Gateway::new(
            Url::parse(base).unwrap(),
            Arc::new(Jar::default()),
            SessionContext::new(),
        )
        .unwrap()
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let gw = gateway("http://localhost:8000");

        assert_eq!(
            gw.endpoint("/sanctum/csrf-cookie").unwrap().as_str(),
            "http://localhost:8000/sanctum/csrf-cookie"
        );
        assert_eq!(
            gw.endpoint("login").unwrap().as_str(),
            "http://localhost:8000/login"
        );
    }

    #[test]
    fn endpoint_preserves_base_path_segments() {
        let gw = gateway("http://host.example/backend/");

        assert_eq!(
            gw.endpoint("/api/couple/invite").unwrap().as_str(),
            "http://host.example/backend/api/couple/invite"
        );
    }

    struct Marker(&'static str);

    impl RequestHook for Marker {
        fn on_request(&self, _method: &Method, headers: &mut HeaderMap) {
            let order = headers.len().to_string();
            headers.insert(
                HeaderName::from_static(self.0),
                HeaderValue::from_str(&order).unwrap(),
            );
        }
    }

    #[test]
    fn request_hooks_run_in_install_order() {
        let mut gw = gateway("http://localhost:8000");
        gw.install_request_hook(Arc::new(Marker("x-first")));
        gw.install_request_hook(Arc::new(Marker("x-second")));

        let headers = gw.apply_request_hooks(&Method::POST);

        // No CSRF cookie in the jar, so the markers are the whole chain.
        assert_eq!(headers.get("x-first").unwrap(), "0");
        assert_eq!(headers.get("x-second").unwrap(), "1");
    }

    struct StatusRecorder(Mutex<Vec<u16>>);

    impl ResponseHook for StatusRecorder {
        fn on_response(&self, status: http::StatusCode) {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(status.as_u16());
            }
        }
    }

    #[test]
    fn response_hooks_observe_without_rewriting() {
        let recorder = Arc::new(StatusRecorder(Mutex::new(Vec::new())));
        let mut gw = gateway("http://localhost:8000");
        gw.install_response_hook(recorder.clone());

        for hook in &gw.response_hooks {
            hook.on_response(http::StatusCode::UNAUTHORIZED);
        }

        assert_eq!(*recorder.0.lock().unwrap(), vec![401]);
    }
}
