pub mod auth;
pub mod couple;
pub mod errors;
pub mod timestamp;
pub mod user;

pub use auth::{LoginRequest, RegisterRequest};
pub use couple::{
    InviteRequest, InviteResponse, LinkRequest, LinkResponse, PairingCode, PairingCodeError,
};
pub use errors::ErrorBody;
pub use timestamp::Timestamp;
pub use user::{CoupleId, CurrentUser};
