use std::{path::Path, sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{handlers, AppState};

/// Build the HTTP router with tracing, request ids and a per-request timeout.
///
/// Paths that match no API route are served from `static_dir`, which holds
/// the browser front-end. A panicking handler becomes a 500 instead of a
/// dropped connection.
pub fn router(
    state: Arc<AppState>,
    request_timeout: Duration,
    static_dir: impl AsRef<Path>,
) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .route("/shorten", post(handlers::shorten::shorten))
        .route("/s/:alias", get(handlers::redirect::redirect))
        .route("/analytics/:alias", get(handlers::analytics::analytics))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(middleware)
}
