//! Access token minting: HS256 JWTs signed with the API secret.

use std::fmt;
use std::time::Duration;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use thiserror::Error;
use time::OffsetDateTime;

use super::grants::{Claims, VideoGrants};
use crate::config::DEFAULT_TOKEN_TTL;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(&'static str),

    #[error("token ttl of {0:?} is out of range")]
    TtlOutOfRange(Duration),

    #[error("token encode error: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// API key/secret pair issued by the media service.
#[derive(Clone, Default)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn validate(&self) -> Result<(), TokenError> {
        if self.api_key.trim().is_empty() {
            return Err(TokenError::InvalidCredentials("api key is missing"));
        }
        if self.api_secret.trim().is_empty() {
            return Err(TokenError::InvalidCredentials("api secret is missing"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Builder for a single signed token.
#[derive(Debug, Clone)]
pub struct AccessToken {
    credentials: Credentials,
    identity: String,
    name: String,
    grants: VideoGrants,
    ttl: Duration,
}

impl AccessToken {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            identity: String::new(),
            name: String::new(),
            grants: VideoGrants::default(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_grants(mut self, grants: VideoGrants) -> Self {
        self.grants = grants;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn to_jwt(&self) -> Result<String, TokenError> {
        self.to_jwt_at(OffsetDateTime::now_utc())
    }

    /// Sign with `issued_at` as the `nbf` timestamp.
    pub fn to_jwt_at(&self, issued_at: OffsetDateTime) -> Result<String, TokenError> {
        self.credentials.validate()?;

        let nbf = issued_at.unix_timestamp();
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| nbf.checked_add(ttl))
            .ok_or(TokenError::TtlOutOfRange(self.ttl))?;
        let claims = Claims {
            iss: self.credentials.api_key.clone(),
            sub: self.identity.clone(),
            name: self.name.clone(),
            nbf,
            exp,
            jti: self.identity.clone(),
            video: self.grants.clone(),
        };
        let key = EncodingKey::from_secret(self.credentials.api_secret.as_bytes());
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &key)?)
    }
}

/// Mint a token letting `identity` join `room`.
pub fn issue_token(
    identity: &str,
    room: &str,
    credentials: &Credentials,
    ttl: Duration,
) -> Result<String, TokenError> {
    AccessToken::new(credentials.clone())
        .with_identity(identity)
        .with_name(identity)
        .with_grants(VideoGrants::join(room))
        .with_ttl(ttl)
        .to_jwt()
}

/// Signs room-join grants; the seam handlers depend on.
pub trait GrantSigner: Send + Sync {
    fn sign_grant(&self, identity: &str, room: &str) -> Result<String, TokenError>;
}

/// [`GrantSigner`] backed by a fixed key/secret pair.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    credentials: Credentials,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(credentials: Credentials, ttl: Duration) -> Self {
        Self { credentials, ttl }
    }

    /// Short-lived server API token allowed to list rooms.
    pub fn room_list_token(&self) -> Result<String, TokenError> {
        AccessToken::new(self.credentials.clone())
            .with_grants(VideoGrants::list_rooms())
            .with_ttl(Duration::from_secs(10 * 60))
            .to_jwt()
    }
}

impl GrantSigner for TokenIssuer {
    fn sign_grant(&self, identity: &str, room: &str) -> Result<String, TokenError> {
        issue_token(identity, room, &self.credentials, self.ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

    fn creds() -> Credentials {
        Credentials::new("APIkey123", "topsecret")
    }

    fn claims_of(token: &str, secret: &str) -> jsonwebtoken::errors::Result<Claims> {
        let key = DecodingKey::from_secret(secret.as_bytes());
        decode::<Claims>(token, &key, &Validation::new(Algorithm::HS256)).map(|data| data.claims)
    }

    #[test]
    fn header_is_hs256_jwt() {
        let token = issue_token("alice", "room-1", &creds(), DEFAULT_TOKEN_TTL).unwrap();
        let header = decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(header.typ.as_deref(), Some("JWT"));
    }

    #[test]
    fn claims_carry_identity_and_join_grant() {
        let token = issue_token("alice", "room-1", &creds(), Duration::from_secs(120)).unwrap();
        let claims = claims_of(&token, "topsecret").unwrap();
        assert_eq!(claims.iss, "APIkey123");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.jti, "alice");
        assert_eq!(claims.exp - claims.nbf, 120);
        assert_eq!(claims.video, VideoGrants::join("room-1"));
    }

    #[test]
    fn signature_only_verifies_with_secret() {
        let token = issue_token("alice", "room-1", &creds(), DEFAULT_TOKEN_TTL).unwrap();
        assert!(claims_of(&token, "topsecret").is_ok());
        assert!(claims_of(&token, "othersecret").is_err());
    }

    #[test]
    fn same_instant_gives_identical_tokens() {
        let at = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let build = || {
            AccessToken::new(creds())
                .with_identity("bob")
                .with_name("bob")
                .with_grants(VideoGrants::join("room-x"))
                .to_jwt_at(at)
                .unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn empty_key_or_secret_is_rejected() {
        for bad in [Credentials::new("", "secret"), Credentials::new("key", "  ")] {
            let err = issue_token("alice", "room-1", &bad, DEFAULT_TOKEN_TTL).unwrap_err();
            assert!(matches!(err, TokenError::InvalidCredentials(_)));
        }
    }

    #[test]
    fn oversized_ttl_is_an_error_not_an_overflow() {
        for ttl in [Duration::from_secs(u64::MAX), Duration::from_secs(i64::MAX as u64)] {
            let err = issue_token("alice", "room-1", &creds(), ttl).unwrap_err();
            assert!(matches!(err, TokenError::TtlOutOfRange(_)));
        }
    }

    #[test]
    fn room_list_token_has_only_list_grant() {
        let issuer = TokenIssuer::new(creds(), DEFAULT_TOKEN_TTL);
        let claims = claims_of(&issuer.room_list_token().unwrap(), "topsecret").unwrap();
        assert_eq!(claims.video, VideoGrants::list_rooms());
        assert!(claims.sub.is_empty());
    }

    #[test]
    fn debug_redacts_secret() {
        let shown = format!("{:?}", creds());
        assert!(shown.contains("APIkey123"));
        assert!(!shown.contains("topsecret"));
    }
}
