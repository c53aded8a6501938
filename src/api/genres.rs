use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::form::EntityForm;
use super::params::RecordId;
use super::{ApiError, AppState};
use crate::models::{Genre, GenreCategory, NewGenre};

/// GET /genres
pub async fn list_genres(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Genre>>, ApiError> {
    Ok(Json(state.storage().list_genres().await?))
}

/// GET /genres/{category}
///
/// An unknown category matches nothing rather than failing the request.
pub async fn list_genres_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Genre>>, ApiError> {
    let Ok(category) = category.parse::<GenreCategory>() else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(
        state.storage().list_genres_by_category(category).await?,
    ))
}

/// POST /genres
pub async fn create_genre(
    State(state): State<Arc<AppState>>,
    form: EntityForm,
) -> Result<(StatusCode, Json<Genre>), ApiError> {
    let input: NewGenre = form.parse("Invalid genre data")?;
    let genre = state.storage().create_genre(input).await?;

    tracing::info!(genre_id = genre.id, name = %genre.name, category = %genre.category, "Created genre");
    Ok((StatusCode::CREATED, Json(genre)))
}

/// DELETE /genres/{id}
pub async fn delete_genre(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    state.storage().delete_genre(id).await?;
    Ok(StatusCode::OK)
}
