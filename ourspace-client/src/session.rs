//! Session state and the shared context it lives in.
//!
//! The state machine is deliberately small: a fresh start is `Loading`
//! until the identity check settles, and every later transition happens
//! only on the back of a completed backend call. Routing never guesses.

use std::sync::{Arc, RwLock};

use shared::models::{CoupleId, CurrentUser};
use tracing::debug;

/// Authentication state the rest of the application keys off.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// The startup identity check has not settled yet.
    #[default]
    Loading,
    /// No valid session; the visitor has to sign in or register.
    Unauthenticated,
    /// A backend-verified identity. Pairing progress lives on
    /// [`CurrentUser::couple_id`].
    Authenticated(CurrentUser),
}

/// Which screen a routing layer should show for a given session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Neutral waiting view while the bootstrap is in flight.
    Waiting,
    /// Sign-in (with a path to registration).
    Login,
    /// Signed in but unpaired: invite a partner or redeem a code.
    PartnerLink,
    /// Signed in and paired: the couple's shared home.
    Dashboard,
}

impl SessionState {
    /// The screen this state routes to.
    #[must_use]
    pub fn screen(&self) -> Screen {
        match self {
            Self::Loading => Screen::Waiting,
            Self::Unauthenticated => Screen::Login,
            Self::Authenticated(user) if user.is_linked() => Screen::Dashboard,
            Self::Authenticated(_) => Screen::PartnerLink,
        }
    }

    /// The verified identity, when there is one.
    #[must_use]
    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Whether a verified identity is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Shared handle to the single authoritative session value.
///
/// Clones observe the same state; all writes funnel through the methods
/// here, and only this crate's flows (plus the unauthorized-response hook)
/// perform them.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<SessionState>>,
}

impl SessionContext {
    /// A fresh context in the `Loading` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner
            .read()
            .map_or(SessionState::Loading, |guard| guard.clone())
    }

    /// The screen the current state routes to.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.snapshot().screen()
    }

    /// Replace the state wholesale.
    pub(crate) fn update(&self, next: SessionState) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = next;
        }
    }

    /// Install a verified identity.
    pub(crate) fn set_user(&self, user: CurrentUser) {
        self.update(SessionState::Authenticated(user));
    }

    /// Record a completed pairing. Only `couple_id` changes; the rest of
    /// the identity is left untouched. A no-op unless authenticated.
    pub(crate) fn set_couple_id(&self, couple_id: CoupleId) {
        if let Ok(mut guard) = self.inner.write() {
            if let SessionState::Authenticated(user) = &mut *guard {
                user.couple_id = Some(couple_id);
            }
        }
    }

    /// Forget a cached identity after the backend rejected the session.
    ///
    /// Touches nothing unless the state is `Authenticated`: a bootstrap
    /// still in `Loading` is left to settle on its own, and repeated 401s
    /// while already signed out stay no-ops.
    pub(crate) fn clear_user(&self) {
        if let Ok(mut guard) = self.inner.write() {
            if matches!(*guard, SessionState::Authenticated(_)) {
                debug!("dropping cached identity after unauthorized response");
                *guard = SessionState::Unauthenticated;
            }
        }
    }
}
