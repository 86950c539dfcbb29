//! Configuration from env vars (port, media service URL, credentials, limits).

use std::{
    env,
    net::{Ipv4Addr, SocketAddr},
    str::FromStr,
    time::Duration,
};

use crate::token::Credentials;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_IDENTITY: &str = "my name";
pub const DEFAULT_LIVEKIT_URL: &str = "http://localhost:7880";
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(6 * 60 * 60);
pub const DEFAULT_ROOM_LIST_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_NAME_ATTEMPTS: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL of the media service API (`ws`/`wss` are accepted).
    pub livekit_url: String,
    pub credentials: Credentials,
    pub token_ttl: Duration,
    /// Timeout for the room listing call.
    pub room_list_timeout: Duration,
    /// Upper bound on candidates tried before giving up on naming.
    pub max_name_attempts: usize,
    /// Identity used when the caller doesn't pass `name`.
    pub default_identity: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            livekit_url: DEFAULT_LIVEKIT_URL.to_string(),
            credentials: Credentials::default(),
            token_ttl: DEFAULT_TOKEN_TTL,
            room_list_timeout: DEFAULT_ROOM_LIST_TIMEOUT,
            max_name_attempts: DEFAULT_MAX_NAME_ATTEMPTS,
            default_identity: DEFAULT_IDENTITY.to_string(),
        }
    }
}

impl Config {
    /// Load from the process environment. Unparsable numbers fall back to defaults.
    ///
    /// Missing credentials are not an error here; issuance reports them per request.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            livekit_url: lookup("LIVEKIT_URL").unwrap_or(defaults.livekit_url),
            credentials: Credentials::new(
                lookup("LIVEKIT_API_KEY").unwrap_or_default(),
                lookup("LIVEKIT_API_SECRET").unwrap_or_default(),
            ),
            token_ttl: Duration::from_secs(parse_or(
                &lookup,
                "TOKEN_TTL_SECS",
                defaults.token_ttl.as_secs(),
            )),
            room_list_timeout: Duration::from_millis(parse_or(
                &lookup,
                "ROOM_LIST_TIMEOUT_MS",
                defaults.room_list_timeout.as_millis() as u64,
            )),
            max_name_attempts: parse_or(&lookup, "ROOM_NAME_MAX_ATTEMPTS", defaults.max_name_attempts)
                .max(1),
            default_identity: lookup("DEFAULT_IDENTITY")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.default_identity),
        }
    }

    /// Socket address to bind the server to, on all interfaces.
    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.livekit_url, DEFAULT_LIVEKIT_URL);
        assert_eq!(config.token_ttl, DEFAULT_TOKEN_TTL);
        assert_eq!(config.room_list_timeout, DEFAULT_ROOM_LIST_TIMEOUT);
        assert_eq!(config.max_name_attempts, DEFAULT_MAX_NAME_ATTEMPTS);
        assert_eq!(config.default_identity, DEFAULT_IDENTITY);
        assert!(config.credentials.api_key.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("LIVEKIT_URL", "wss://media.example.com"),
            ("LIVEKIT_API_KEY", "APIkey"),
            ("LIVEKIT_API_SECRET", "s3cret"),
            ("TOKEN_TTL_SECS", "60"),
            ("ROOM_LIST_TIMEOUT_MS", "250"),
            ("ROOM_NAME_MAX_ATTEMPTS", "3"),
            ("DEFAULT_IDENTITY", "guest"),
        ]);
        assert_eq!(config.server_addr().port(), 9000);
        assert_eq!(config.livekit_url, "wss://media.example.com");
        assert_eq!(config.credentials.api_key, "APIkey");
        assert_eq!(config.credentials.api_secret, "s3cret");
        assert_eq!(config.token_ttl, Duration::from_secs(60));
        assert_eq!(config.room_list_timeout, Duration::from_millis(250));
        assert_eq!(config.max_name_attempts, 3);
        assert_eq!(config.default_identity, "guest");
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("ROOM_NAME_MAX_ATTEMPTS", "0")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_name_attempts, 1);
    }
}
