use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

use super::form::{EntityForm, discard_upload, store_upload};
use super::params::RecordId;
use super::{ApiError, AppState};
use crate::models::{Episode, NewSeries, Series, SeriesPatch};

const INVALID_SERIES: &str = "Invalid series data";

fn prepare(form: &mut EntityForm) {
    form.coerce_integers(&["startYear"]);
    form.discard("thumbnailUrl");
}

pub async fn list_series(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Series>>, ApiError> {
    Ok(Json(state.storage().list_series().await?))
}

pub async fn get_series(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<Series>, ApiError> {
    state
        .storage()
        .get_series(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn create_series(
    State(state): State<Arc<AppState>>,
    mut form: EntityForm,
) -> Result<(StatusCode, Json<Series>), ApiError> {
    prepare(&mut form);
    let thumbnail = form.take_file("thumbnail");
    let mut input: NewSeries = form.parse(INVALID_SERIES)?;

    input.thumbnail_url = store_upload(&state, thumbnail).await?;

    let series = state.storage().create_series(input).await?;
    info!(series_id = series.id, title = %series.title, "Created series");
    Ok((StatusCode::CREATED, Json(series)))
}

pub async fn update_series(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    mut form: EntityForm,
) -> Result<Json<Series>, ApiError> {
    prepare(&mut form);
    let thumbnail = form.take_file("thumbnail");
    let mut patch: SeriesPatch = form.parse(INVALID_SERIES)?;

    if state.storage().get_series(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    let thumbnail_url = store_upload(&state, thumbnail).await?;
    patch.thumbnail_url.clone_from(&thumbnail_url);

    match state.storage().update_series(id, patch).await {
        Ok(Some(series)) => {
            info!(series_id = series.id, "Updated series");
            Ok(Json(series))
        }
        outcome => {
            // Deleted after the existence check; don't leave the file behind.
            discard_upload(&state, thumbnail_url).await;
            Err(outcome.err().map_or(ApiError::NotFound, ApiError::from))
        }
    }
}

/// DELETE /series/{id}
///
/// Episodes of the series go with it.
pub async fn delete_series(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    state.storage().delete_series(id).await?;
    Ok(StatusCode::OK)
}

/// GET /series/{id}/episodes
pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<Vec<Episode>>, ApiError> {
    Ok(Json(state.storage().list_episodes_by_series(id).await?))
}
