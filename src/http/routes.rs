//! HTTP routes: token issuance and health.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::Method,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::error::AppError;
use crate::room::namer::RoomNamer;
use crate::room::registry::{LiveKitRegistry, RegistryError, RoomRegistry};
use crate::token::{GrantSigner, TokenIssuer};

#[derive(Clone)]
pub struct AppState {
    pub namer: RoomNamer,
    pub signer: Arc<dyn GrantSigner>,
    pub default_identity: Arc<str>,
}

impl AppState {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        signer: Arc<dyn GrantSigner>,
        config: &Config,
    ) -> Self {
        Self {
            namer: RoomNamer::new(registry, config.max_name_attempts),
            signer,
            default_identity: config.default_identity.as_str().into(),
        }
    }

    /// Wire the media service client and issuer from `config`.
    pub fn from_config(config: &Config) -> Result<Self, RegistryError> {
        let issuer = TokenIssuer::new(config.credentials.clone(), config.token_ttl);
        let registry = LiveKitRegistry::new(
            &config.livekit_url,
            issuer.clone(),
            config.room_list_timeout,
        )?;
        Ok(Self::new(Arc::new(registry), Arc::new(issuer), config))
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/getToken", get(get_token))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub name: Option<String>,
    pub room: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub room: String,
}

pub async fn get_token(
    State(state): State<AppState>,
    Query(TokenQuery { name, room }): Query<TokenQuery>,
) -> Result<Json<TokenResponse>, AppError> {
    let identity = name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| state.default_identity.to_string());

    let room = match room.filter(|r| !r.is_empty()) {
        Some(room) => room,
        None => state.namer.generate_unique_room_name().await?,
    };

    let token = state.signer.sign_grant(&identity, &room)?;
    tracing::info!(%identity, %room, "issued room token");
    Ok(Json(TokenResponse { token, room }))
}
