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
use crate::models::{Anime, AnimeEpisode, AnimePatch, NewAnime};

const INVALID_ANIME: &str = "Invalid anime data";

fn prepare(form: &mut EntityForm) {
    form.coerce_integers(&["year"]);
    form.discard("thumbnailUrl");
}

pub async fn list_anime(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Anime>>, ApiError> {
    Ok(Json(state.storage().list_anime().await?))
}

pub async fn get_anime(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<Anime>, ApiError> {
    state
        .storage()
        .get_anime(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn create_anime(
    State(state): State<Arc<AppState>>,
    mut form: EntityForm,
) -> Result<(StatusCode, Json<Anime>), ApiError> {
    prepare(&mut form);
    let thumbnail = form.take_file("thumbnail");
    let mut input: NewAnime = form.parse(INVALID_ANIME)?;

    input.thumbnail_url = store_upload(&state, thumbnail).await?;

    let anime = state.storage().create_anime(input).await?;
    info!(anime_id = anime.id, title = %anime.title, "Created anime");
    Ok((StatusCode::CREATED, Json(anime)))
}

pub async fn update_anime(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    mut form: EntityForm,
) -> Result<Json<Anime>, ApiError> {
    prepare(&mut form);
    let thumbnail = form.take_file("thumbnail");
    let mut patch: AnimePatch = form.parse(INVALID_ANIME)?;

    if state.storage().get_anime(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    let thumbnail_url = store_upload(&state, thumbnail).await?;
    patch.thumbnail_url.clone_from(&thumbnail_url);

    match state.storage().update_anime(id, patch).await {
        Ok(Some(anime)) => {
            info!(anime_id = anime.id, "Updated anime");
            Ok(Json(anime))
        }
        outcome => {
            // Deleted after the existence check; don't leave the file behind.
            discard_upload(&state, thumbnail_url).await;
            Err(outcome.err().map_or(ApiError::NotFound, ApiError::from))
        }
    }
}

/// DELETE /anime/{id}
///
/// Also removes the anime's episodes.
pub async fn delete_anime(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    state.storage().delete_anime(id).await?;
    Ok(StatusCode::OK)
}

/// GET /anime/{id}/episodes
pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<Vec<AnimeEpisode>>, ApiError> {
    Ok(Json(state.storage().list_anime_episodes_by_anime(id).await?))
}
