#![cfg_attr(not(test), forbid(unsafe_code))]

//! Client core for the OurSpace backend.
//!
//! Everything the user-facing surfaces share lives here: one configured
//! HTTP gateway (session cookies plus the CSRF double-submit header), the
//! session bootstrap that decides which screen a fresh start lands on, and
//! the submission flows for signing in, registering, and pairing partners.

pub mod api;
pub mod cookies;
pub mod error;
pub mod http;
pub mod session;

pub use api::OurSpaceClient;
pub use error::ApiError;
pub use session::{Screen, SessionContext, SessionState};
