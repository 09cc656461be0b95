use serde::{Deserialize, Serialize};
use std::fmt;

use super::Timestamp;

/// Identifier of the couple record two linked accounts share.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CoupleId(pub i64);

impl fmt::Display for CoupleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The signed-in account, as the identity endpoint returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    /// Unique identifier for the user.
    pub id: i64,

    /// The user's display name.
    pub name: String,

    /// The user's email address.
    pub email: String,

    /// The shared couple record, or `None` until a partner is linked.
    #[serde(default)]
    pub couple_id: Option<CoupleId>,

    /// When the account was created. Older backends omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl CurrentUser {
    /// Whether this account already belongs to a couple.
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.couple_id.is_some()
    }
}
