use crate::{
    error::{AppError, StoreError},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderValue,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MAX_ALIAS_LENGTH: usize = 64;

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub url: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub status: &'static str,
    pub alias: String,
}

/// POST /shorten
///
/// Stores `url` under the supplied alias, or under a freshly generated one
/// when the alias is missing or blank. A colliding alias is reported as 409;
/// generated aliases are not retried.
pub async fn shorten(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::info!(error = %e, "failed to decode request body");
        AppError::BadRequest("failed to decode request")
    })?;

    let url = req.url.trim();
    if !is_valid_url(url) {
        tracing::info!(url = %url, "invalid url");
        return Err(AppError::BadRequest("field URL is not a valid URL"));
    }

    let alias = match req.alias.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(alias) if is_valid_alias(alias) => alias.to_owned(),
        Some(alias) => {
            tracing::info!(alias = %alias, "invalid alias");
            return Err(AppError::BadRequest("invalid alias"));
        }
        None => state.aliases.generate(state.alias_length),
    };

    match state.store.create(url, &alias).await {
        Ok(id) => {
            tracing::info!(alias = %alias, id, "url added");
            Ok(Json(SaveResponse {
                status: "OK",
                alias,
            }))
        }
        Err(StoreError::AliasConflict(_)) => {
            tracing::info!(alias = %alias, "url already exists");
            Err(AppError::Conflict)
        }
        Err(e) => {
            tracing::error!(alias = %alias, error = %e, "failed to add url");
            Err(AppError::Internal("failed to add url"))
        }
    }
}

/// Absolute http(s) URL with a host that can be sent back verbatim as a
/// `Location` header. The URL parser strips tabs and newlines on its own, so
/// control characters are rejected before parsing.
fn is_valid_url(raw: &str) -> bool {
    if raw.chars().any(char::is_control) || HeaderValue::from_str(raw).is_err() {
        return false;
    }

    match url::Url::parse(raw) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.has_host(),
        Err(_) => false,
    }
}

/// Letters, digits, `-` and `_`; at most 64 characters.
fn is_valid_alias(alias: &str) -> bool {
    alias.len() <= MAX_ALIAS_LENGTH
        && alias
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
