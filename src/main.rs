use roomtoken::{config::Config, http, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = Config::from_env();
    if config.credentials.validate().is_err() {
        tracing::warn!("LIVEKIT_API_KEY/LIVEKIT_API_SECRET not set, token requests will fail");
    }

    let state = http::AppState::from_config(&config)?;
    let app = http::router(state);

    let addr = config.server_addr();
    tracing::info!(%addr, livekit_url = %config.livekit_url, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
