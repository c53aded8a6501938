//! Episode writes for both series and anime. Listing lives next to the
//! parent resource.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

use super::form::{EntityForm, store_upload};
use super::params::RecordId;
use super::{ApiError, AppState};
use crate::models::{AnimeEpisode, Episode, NewAnimeEpisode, NewEpisode};

/// POST /episodes
///
/// An uploaded `subtitle` file replaces any `subtitleLink` text.
pub async fn create_episode(
    State(state): State<Arc<AppState>>,
    mut form: EntityForm,
) -> Result<(StatusCode, Json<Episode>), ApiError> {
    form.coerce_integers(&["seriesId", "seasonNumber", "episodeNumber", "duration"]);
    let subtitle = form.take_file("subtitle");
    let mut input: NewEpisode = form.parse("Invalid episode data")?;

    if let Some(url) = store_upload(&state, subtitle).await? {
        input.subtitle_link = Some(url);
    }

    let episode = state.storage().create_episode(input).await?;
    info!(
        episode_id = episode.id,
        series_id = ?episode.series_id,
        season = episode.season_number,
        episode = episode.episode_number,
        "Created episode"
    );
    Ok((StatusCode::CREATED, Json(episode)))
}

/// DELETE /episodes/{id}
pub async fn delete_episode(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    state.storage().delete_episode(id).await?;
    Ok(StatusCode::OK)
}

/// POST /anime-episodes
pub async fn create_anime_episode(
    State(state): State<Arc<AppState>>,
    mut form: EntityForm,
) -> Result<(StatusCode, Json<AnimeEpisode>), ApiError> {
    form.coerce_integers(&["animeId", "seasonNumber", "episodeNumber"]);
    let input: NewAnimeEpisode = form.parse("Invalid anime episode data")?;

    let episode = state.storage().create_anime_episode(input).await?;
    info!(
        episode_id = episode.id,
        anime_id = ?episode.anime_id,
        season = episode.season_number,
        episode = episode.episode_number,
        "Created anime episode"
    );
    Ok((StatusCode::CREATED, Json(episode)))
}

/// DELETE /anime-episodes/{id}
pub async fn delete_anime_episode(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    state.storage().delete_anime_episode(id).await?;
    Ok(StatusCode::OK)
}
