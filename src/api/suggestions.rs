use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

use super::form::EntityForm;
use super::params::RecordId;
use super::{ApiError, AppState};
use crate::models::{MovieSuggestion, NewMovieSuggestion, SuggestionStatusUpdate};

/// GET /movie-suggestions
pub async fn list_suggestions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MovieSuggestion>>, ApiError> {
    Ok(Json(state.storage().list_suggestions().await?))
}

/// POST /movie-suggestions (public) and POST /movie-suggestions/internal.
///
/// New suggestions always start out pending.
pub async fn create_suggestion(
    State(state): State<Arc<AppState>>,
    mut form: EntityForm,
) -> Result<(StatusCode, Json<MovieSuggestion>), ApiError> {
    form.coerce_integers(&["year"]);
    let input: NewMovieSuggestion = form.parse("Invalid suggestion data")?;

    let suggestion = state.storage().create_suggestion(input).await?;
    info!(suggestion_id = suggestion.id, title = %suggestion.title, "Received movie suggestion");
    Ok((StatusCode::CREATED, Json(suggestion)))
}

/// PUT /movie-suggestions/{id}
pub async fn update_suggestion(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    form: EntityForm,
) -> Result<Json<MovieSuggestion>, ApiError> {
    let update: SuggestionStatusUpdate = form.parse("Invalid update data")?;

    let suggestion = state
        .storage()
        .update_suggestion_status(id, update.status, update.admin_notes)
        .await?
        .ok_or(ApiError::NotFound)?;
    info!(suggestion_id = id, status = ?suggestion.status, "Moderated movie suggestion");
    Ok(Json(suggestion))
}

/// DELETE /movie-suggestions/{id}
pub async fn delete_suggestion(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    state.storage().delete_suggestion(id).await?;
    Ok(StatusCode::OK)
}
