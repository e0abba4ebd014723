/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config 読み込み → PostRepo 生成 → Router 組み立て
 * - Middleware の適用 (security headers / http / CORS)
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::Result;
use axum::{Router, extract::Request, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api::{
        self,
        handlers::{
            docs::{API_DESCRIPTION_PATH, api_description},
            health::health,
        },
    },
    config::Config,
    error::AppError,
    middleware,
    repos::post_repo::PostRepo,
    state::AppState,
};

fn init_tracing() {
    // RUST_LOG=info,masterblog_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash loudly, production: keep serving
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    let repo = PostRepo::new(&config.storage_path);
    tracing::info!(
        "starting API in {:?} mode on {}, storage at {}",
        config.app_env,
        config.addr,
        repo.path().display()
    );

    let state = AppState::new(repo);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn fallback(request: Request) -> AppError {
    AppError::not_found(format!("route {}", request.uri().path()))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route(API_DESCRIPTION_PATH, get(api_description))
        .nest("/api", api::routes())
        .fallback(fallback)
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::http::apply(router);
    middleware::cors::apply(router, config)
}
