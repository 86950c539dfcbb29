//! Tracing initialization.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Used when `RUST_LOG` is unset or unparsable. The HTTP client to the room
/// service is chatty at `info`.
const DEFAULT_DIRECTIVES: &str = "info,tower_http=info,axum=info,reqwest=warn,hyper_util=warn";

/// Install the global tracing subscriber, filtered by `RUST_LOG`.
pub fn init() {
    let filter = env_filter(std::env::var("RUST_LOG").ok().as_deref());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}
