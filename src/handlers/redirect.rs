use crate::{error::AppError, error::StoreError, AppState};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// GET /s/:alias
///
/// 1. Resolve the alias to its target URL.
/// 2. Record the click with the caller's User-Agent. A failed write is
///    reported and swallowed; it never blocks the redirect.
/// 3. Return a 302 redirect to the target.
pub async fn redirect(
    State(state): State<Arc<AppState>>,
    Path(alias): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user_agent = user_agent(&headers);

    match state.redirects.redirect(&alias, user_agent).await {
        Ok(target) => {
            tracing::info!(alias = %alias, url = %target, "got url");
            Ok((StatusCode::FOUND, [(header::LOCATION, target)]).into_response())
        }
        Err(StoreError::NotFound) => {
            tracing::info!(alias = %alias, "url not found");
            Err(AppError::NotFound)
        }
        Err(e) => {
            tracing::error!(alias = %alias, error = %e, "failed to get url");
            Err(e.into())
        }
    }
}

/// Raw User-Agent header; missing or non-UTF-8 values count as empty.
fn user_agent(headers: &HeaderMap) -> &str {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
