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
use crate::models::{Movie, MoviePatch, NewMovie};

const INVALID_MOVIE: &str = "Invalid movie data";

/// Prepares a movie form: numeric text becomes numbers and the thumbnail
/// can only come from an uploaded file.
fn prepare(form: &mut EntityForm) {
    form.coerce_integers(&["year"]);
    form.discard("thumbnailUrl");
}

pub async fn list_movies(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Movie>>, ApiError> {
    Ok(Json(state.storage().list_movies().await?))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<Movie>, ApiError> {
    state
        .storage()
        .get_movie(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    mut form: EntityForm,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    prepare(&mut form);
    let thumbnail = form.take_file("thumbnail");
    let mut input: NewMovie = form.parse(INVALID_MOVIE)?;

    input.thumbnail_url = store_upload(&state, thumbnail).await?;

    let movie = state.storage().create_movie(input).await?;
    info!(movie_id = movie.id, title = %movie.title, "Created movie");
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    mut form: EntityForm,
) -> Result<Json<Movie>, ApiError> {
    prepare(&mut form);
    let thumbnail = form.take_file("thumbnail");
    let mut patch: MoviePatch = form.parse(INVALID_MOVIE)?;

    if state.storage().get_movie(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    let thumbnail_url = store_upload(&state, thumbnail).await?;
    patch.thumbnail_url.clone_from(&thumbnail_url);

    match state.storage().update_movie(id, patch).await {
        Ok(Some(movie)) => {
            info!(movie_id = movie.id, "Updated movie");
            Ok(Json(movie))
        }
        outcome => {
            // Deleted after the existence check; don't leave the file behind.
            discard_upload(&state, thumbnail_url).await;
            Err(outcome.err().map_or(ApiError::NotFound, ApiError::from))
        }
    }
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    state.storage().delete_movie(id).await?;
    Ok(StatusCode::OK)
}
