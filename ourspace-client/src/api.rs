//! Backend operations: the startup identity check and the user-driven
//! submission flows.
//!
//! Every flow that changes who is signed in runs as one sequential chain
//! and takes `&mut self`, so a second identity-affecting call cannot start
//! while one is in flight. Reads like [`OurSpaceClient::fetch_current_user`]
//! stay `&self`.

use std::sync::Arc;

use reqwest::cookie::Jar;
use shared::config::ClientConfig;
use shared::models::{
    CoupleId, CurrentUser, InviteRequest, InviteResponse, LinkRequest, LinkResponse, LoginRequest,
    PairingCode, RegisterRequest,
};
use tracing::debug;

use crate::error::ApiError;
use crate::http::Gateway;
use crate::session::{SessionContext, SessionState};

/// Issues the CSRF cookie; called at the head of every submission chain.
pub const CSRF_COOKIE_ROUTE: &str = "/sanctum/csrf-cookie";

/// Credential sign-in.
pub const LOGIN_ROUTE: &str = "/login";

/// Account creation; signs the new account in as a side effect.
pub const REGISTER_ROUTE: &str = "/register";

/// The identity endpoint: who does the current session belong to.
pub const CURRENT_USER_ROUTE: &str = "/user";

/// Partner invitation. Sits under `/api` unlike its sibling routes; the
/// backend grew that way and the contract keeps it.
pub const INVITE_ROUTE: &str = "/api/couple/invite";

/// Pairing-code redemption.
pub const LINK_ROUTE: &str = "/couple/link";

/// High-level client tying the gateway to the session it maintains.
pub struct OurSpaceClient {
    gateway: Gateway,
    session: SessionContext,
}

impl OurSpaceClient {
    /// Client with a fresh, empty cookie jar.
    ///
    /// # Errors
    ///
    /// Returns the configuration error for an unusable base URL, or the
    /// `reqwest` build failure, both via [`ApiError`].
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_jar(config, Arc::new(Jar::default()))
    }

    /// Client reusing an existing cookie jar, e.g. one restored from disk.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`OurSpaceClient::new`].
    pub fn with_jar(config: &ClientConfig, jar: Arc<Jar>) -> Result<Self, ApiError> {
        let origin = config.origin().map_err(|_| ApiError::Misconfigured)?;
        let session = SessionContext::new();
        let gateway = Gateway::new(origin, jar, session.clone()).map_err(ApiError::Network)?;
        Ok(Self { gateway, session })
    }

    /// Shared handle to the session this client maintains.
    #[must_use]
    pub fn session(&self) -> SessionContext {
        self.session.clone()
    }

    /// A copy of the current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session.snapshot()
    }

    /// The gateway, for installing additional hooks.
    pub fn gateway_mut(&mut self) -> &mut Gateway {
        &mut self.gateway
    }

    /// Passive startup identity check.
    ///
    /// Asks the backend who the stored session belongs to and settles the
    /// session out of `Loading`. Every failure, 401 included, resolves to
    /// `Unauthenticated`; nothing here surfaces an error, because an
    /// anonymous visitor is a normal outcome, not a problem.
    pub async fn bootstrap(&mut self) -> SessionState {
        match self.fetch_current_user().await {
            Ok(user) => self.session.set_user(user),
            Err(err) => {
                debug!(error = %err, "identity check failed; starting unauthenticated");
                self.session.update(SessionState::Unauthenticated);
            }
        }
        self.session.snapshot()
    }

    /// Sign in: prime the CSRF cookie, submit credentials, then fetch the
    /// verified identity the session is replaced with.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] from whichever step failed; the session is
    /// only updated after the whole chain succeeds.
    pub async fn login(&mut self, credentials: &LoginRequest) -> Result<CurrentUser, ApiError> {
        self.prime_csrf().await?;
        self.gateway.post(LOGIN_ROUTE, credentials).await?;
        let user = self.fetch_current_user().await?;
        self.session.set_user(user.clone());
        Ok(user)
    }

    /// Create an account and sign it in, mirroring the login chain.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] from whichever step failed; field-level
    /// validation problems arrive as [`ApiError::Validation`].
    pub async fn register(
        &mut self,
        registration: &RegisterRequest,
    ) -> Result<CurrentUser, ApiError> {
        self.prime_csrf().await?;
        self.gateway.post(REGISTER_ROUTE, registration).await?;
        let user = self.fetch_current_user().await?;
        self.session.set_user(user.clone());
        Ok(user)
    }

    /// Invite a partner by email; yields the pairing code to hand over.
    ///
    /// The session is deliberately not touched: the inviter stays unpaired
    /// until the partner redeems the code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the invite is rejected or the response
    /// cannot be decoded.
    pub async fn invite_partner(&mut self, invite: &InviteRequest) -> Result<PairingCode, ApiError> {
        self.prime_csrf().await?;
        let response = self.gateway.post(INVITE_ROUTE, invite).await?;
        let minted: InviteResponse = response.json().await.map_err(ApiError::Decode)?;
        Ok(minted.code)
    }

    /// Redeem a pairing code. On success only `couple_id` on the current
    /// session changes; name, email, and everything else stay as they are.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the code is rejected or the response
    /// cannot be decoded.
    pub async fn link_partner(&mut self, link: &LinkRequest) -> Result<CoupleId, ApiError> {
        self.prime_csrf().await?;
        let response = self.gateway.post(LINK_ROUTE, link).await?;
        let linked: LinkResponse = response.json().await.map_err(ApiError::Decode)?;
        self.session.set_couple_id(linked.couple_id);
        Ok(linked.couple_id)
    }

    /// Fetch the identity behind the current session, without touching the
    /// session state.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when there is no valid session,
    /// and the usual classifications otherwise.
    pub async fn fetch_current_user(&self) -> Result<CurrentUser, ApiError> {
        let response = self.gateway.get(CURRENT_USER_ROUTE).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// Issue the CSRF cookie so the header hook has something to echo.
    /// Only the request's success matters; the cookie lands in the jar as
    /// a side effect of the response.
    async fn prime_csrf(&self) -> Result<(), ApiError> {
        self.gateway.get(CSRF_COOKIE_ROUTE).await?;
        Ok(())
    }
}
