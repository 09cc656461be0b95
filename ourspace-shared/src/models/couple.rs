use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::CoupleId;

/// Short shareable code that lets a partner join an existing account's
/// couple. The backend mints it; clients treat the value as opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PairingCode(String);

/// Why a typed-in pairing code was rejected before reaching the backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairingCodeError {
    /// Nothing left after trimming whitespace.
    #[error("pairing code must not be empty")]
    Empty,

    /// Longer than codes the backend ever mints.
    #[error("pairing code must be at most {} characters", PairingCode::MAX_LEN)]
    TooLong,
}

impl PairingCode {
    /// Longest code the backend mints; entry forms cap input at this.
    pub const MAX_LEN: usize = 8;

    /// Normalize a typed-in code: surrounding whitespace is dropped and
    /// letters are uppercased, matching how codes are displayed.
    ///
    /// # Errors
    ///
    /// Returns [`PairingCodeError`] when the trimmed input is empty or
    /// longer than [`Self::MAX_LEN`].
    pub fn parse(input: &str) -> Result<Self, PairingCodeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PairingCodeError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(PairingCodeError::TooLong);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// The code exactly as it will be sent to the backend.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ask the backend to invite a partner by email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InviteRequest {
    /// The partner's email address.
    pub email: String,
}

/// The backend's answer to an invite: the code to hand to the partner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InviteResponse {
    /// Pairing code the partner redeems.
    pub code: PairingCode,
}

/// Redeem a pairing code on the second account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkRequest {
    /// Pairing code received from the inviting partner.
    pub code: PairingCode,
}

/// The backend's answer to a successful link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkResponse {
    /// The couple record both accounts now share.
    pub couple_id: CoupleId,
}
