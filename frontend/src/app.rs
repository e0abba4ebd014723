/*
 * Responsibility
 * - tracing 初期化 → Config 読み込み → Router 組み立て → serve
 * - frontend は API を呼ばない (ブラウザが直接 API を叩く)
 */
use std::sync::Arc;

use anyhow::Result;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    pages::{index, main_script},
};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    tracing::info!(
        "starting frontend on {}, api base url {}",
        config.addr,
        config.api_base_url
    );

    let addr = config.addr;
    let app = build_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(config: Config) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/static/main.js", get(main_script))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(config))
}
