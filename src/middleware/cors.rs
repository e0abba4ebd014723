//! CORS policy for the browser frontend.
//!
//! The frontend is served from a different port than the API, so every API
//! response must be readable cross-origin.
//!
//! Policy:
//! - Default: any origin, no credentials.
//! - Production with `CORS_ALLOWED_ORIGINS` set: exact-match allowlist.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

fn allow_origin(config: &Config) -> AllowOrigin {
    if !config.app_env.is_production() || config.cors_allowed_origins.is_empty() {
        return AllowOrigin::from(Any);
    }

    let allowed: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();
    AllowOrigin::predicate(move |origin: &HeaderValue, _req| allowed.contains(origin))
}

pub fn apply(router: Router, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(config))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(Duration::from_secs(60 * 10));

    router.layer(cors)
}
