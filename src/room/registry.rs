//! Active room listing from the media service.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::token::{TokenError, TokenIssuer};

const LIST_ROOMS_PATH: &str = "/twirp/livekit.RoomService/ListRooms";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("room service request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("room service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("cannot sign room service request: {0}")]
    Token(#[from] TokenError),
}

/// Source of the currently active room names.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    async fn list_active_rooms(&self) -> Result<HashSet<String>, RegistryError>;
}

#[derive(Deserialize)]
struct ListRoomsResponse {
    #[serde(default)]
    rooms: Vec<RoomInfo>,
}

#[derive(Deserialize)]
struct RoomInfo {
    #[serde(default)]
    name: String,
}

/// Lists rooms over the media service's Twirp JSON API.
pub struct LiveKitRegistry {
    client: reqwest::Client,
    base_url: String,
    issuer: TokenIssuer,
}

impl LiveKitRegistry {
    pub fn new(url: &str, issuer: TokenIssuer, timeout: Duration) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: http_base_url(url),
            issuer,
        })
    }
}

#[async_trait]
impl RoomRegistry for LiveKitRegistry {
    async fn list_active_rooms(&self) -> Result<HashSet<String>, RegistryError> {
        let token = self.issuer.room_list_token()?;
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, LIST_ROOMS_PATH))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::Status { status, body });
        }

        let body: ListRoomsResponse = resp.json().await?;
        Ok(body.rooms.into_iter().map(|r| r.name).collect())
    }
}

/// Websocket URLs are accepted for convenience; the server API speaks HTTP.
fn http_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if let Some(rest) = url.strip_prefix("wss://") {
        format!("https://{rest}")
    } else if let Some(rest) = url.strip_prefix("ws://") {
        format!("http://{rest}")
    } else {
        url.to_string()
    }
}
