use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::models::CatalogStats;

/// GET /stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<CatalogStats>, ApiError> {
    Ok(Json(state.storage().stats().await?))
}
