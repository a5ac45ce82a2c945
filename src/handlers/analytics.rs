use crate::{
    error::{AppError, StoreError},
    models::AnalyticsSnapshot,
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub snapshot: AnalyticsSnapshot,
}

/// GET /analytics/:alias
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    Path(alias): Path<String>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    match state.analytics.compute(&alias).await {
        Ok(snapshot) => Ok(Json(AnalyticsResponse {
            status: "OK",
            snapshot,
        })),
        Err(StoreError::NotFound) => {
            tracing::info!(alias = %alias, "url not found");
            Err(AppError::NotFound)
        }
        Err(e) => {
            tracing::error!(alias = %alias, error = %e, "failed to get analytics");
            Err(e.into())
        }
    }
}
