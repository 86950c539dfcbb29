//! Grant and claim types carried inside access tokens.
//!
//! Field names follow the media service's JWT layout: registered claims at
//! the top level, room permissions under `video` in camelCase.

use serde::{Deserialize, Serialize};

/// Room permissions embedded in a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoGrants {
    /// Permission to join `room`.
    #[serde(skip_serializing_if = "is_false")]
    pub room_join: bool,

    /// Room the join permission applies to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub room: String,

    /// Permission to list rooms through the server API.
    #[serde(skip_serializing_if = "is_false")]
    pub room_list: bool,
}

impl VideoGrants {
    /// Join permission for a single room.
    pub fn join(room: impl Into<String>) -> Self {
        Self {
            room_join: true,
            room: room.into(),
            ..Self::default()
        }
    }

    /// Server API permission to list active rooms.
    pub fn list_rooms() -> Self {
        Self {
            room_list: true,
            ..Self::default()
        }
    }
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// JWT payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// API key that signed the token.
    pub iss: String,
    /// Participant identity.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub nbf: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jti: String,
    #[serde(default)]
    pub video: VideoGrants,
}
