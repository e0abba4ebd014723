//! Transport-level middleware shared by every route.
//!
//! - `x-request-id`: generated when absent, echoed on the response
//! - request bodies capped at 1 MiB
//! - 30 second request timeout (408)
//! - access log via `TraceLayer`

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

const REQUEST_ID_HEADER: &str = "x-request-id";
const BODY_LIMIT_BYTES: usize = 1024 * 1024;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

async fn handle_layer_error(err: BoxError) -> StatusCode {
    if err.is::<tower::timeout::error::Elapsed>() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Wraps `router` in the transport layers, outermost first.
pub fn apply(router: Router) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        // Layer errors (only the timeout in practice) become plain status responses.
        .layer(HandleErrorLayer::new(handle_layer_error))
        // Assign an id when the client sent none; copy it onto the response.
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(request_id))
        // Oversized bodies are answered with 413 before the JSON extractor runs.
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        // A stuck storage call ends the request with 408.
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        // One span per request, carrying method and path.
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}
