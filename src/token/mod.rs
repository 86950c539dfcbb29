//! Access tokens for joining media rooms.

mod access;
mod grants;

pub use access::{issue_token, AccessToken, Credentials, GrantSigner, TokenError, TokenIssuer};
pub use grants::{Claims, VideoGrants};
