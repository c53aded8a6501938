//! Entity store: the storage contract consumed by the HTTP layer and its
//! in-memory implementation.

mod collection;
pub mod memory;
pub mod seed;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{
    Anime, AnimeEpisode, AnimePatch, CatalogStats, Episode, Genre, GenreCategory, Movie,
    MoviePatch, MovieSuggestion, NewAnime, NewAnimeEpisode, NewEpisode, NewGenre, NewMovie,
    NewMovieSuggestion, NewSeries, NewUser, Series, SeriesPatch, SuggestionStatus, User,
};

pub use collection::Collection;
pub use memory::MemStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Id space exhausted")]
    IdsExhausted,
}

pub type StorageResult<T> = Result<T, StorageError>;

pub type SharedStorage = Arc<dyn Storage>;

/// Typed CRUD over every catalog collection.
///
/// Lookups and updates on a missing id return `Ok(None)`; deletes of a
/// missing id succeed silently.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: i32) -> StorageResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;
    /// Fails with [`StorageError::UsernameTaken`] on a duplicate username.
    async fn create_user(&self, user: NewUser) -> StorageResult<User>;

    async fn list_genres(&self) -> StorageResult<Vec<Genre>>;
    async fn list_genres_by_category(&self, category: GenreCategory) -> StorageResult<Vec<Genre>>;
    async fn create_genre(&self, genre: NewGenre) -> StorageResult<Genre>;
    async fn delete_genre(&self, id: i32) -> StorageResult<()>;

    async fn list_movies(&self) -> StorageResult<Vec<Movie>>;
    async fn get_movie(&self, id: i32) -> StorageResult<Option<Movie>>;
    async fn create_movie(&self, movie: NewMovie) -> StorageResult<Movie>;
    async fn update_movie(&self, id: i32, patch: MoviePatch) -> StorageResult<Option<Movie>>;
    async fn delete_movie(&self, id: i32) -> StorageResult<()>;

    async fn list_series(&self) -> StorageResult<Vec<Series>>;
    async fn get_series(&self, id: i32) -> StorageResult<Option<Series>>;
    async fn create_series(&self, series: NewSeries) -> StorageResult<Series>;
    async fn update_series(&self, id: i32, patch: SeriesPatch) -> StorageResult<Option<Series>>;
    /// Also removes every episode whose `series_id` is `id`.
    async fn delete_series(&self, id: i32) -> StorageResult<()>;

    async fn list_episodes_by_series(&self, series_id: i32) -> StorageResult<Vec<Episode>>;
    async fn create_episode(&self, episode: NewEpisode) -> StorageResult<Episode>;
    async fn delete_episode(&self, id: i32) -> StorageResult<()>;

    async fn list_anime(&self) -> StorageResult<Vec<Anime>>;
    async fn get_anime(&self, id: i32) -> StorageResult<Option<Anime>>;
    async fn create_anime(&self, anime: NewAnime) -> StorageResult<Anime>;
    async fn update_anime(&self, id: i32, patch: AnimePatch) -> StorageResult<Option<Anime>>;
    /// Also removes every anime episode whose `anime_id` is `id`.
    async fn delete_anime(&self, id: i32) -> StorageResult<()>;

    async fn list_anime_episodes_by_anime(&self, anime_id: i32)
    -> StorageResult<Vec<AnimeEpisode>>;
    async fn create_anime_episode(&self, episode: NewAnimeEpisode) -> StorageResult<AnimeEpisode>;
    async fn delete_anime_episode(&self, id: i32) -> StorageResult<()>;

    async fn list_suggestions(&self) -> StorageResult<Vec<MovieSuggestion>>;
    async fn create_suggestion(
        &self,
        suggestion: NewMovieSuggestion,
    ) -> StorageResult<MovieSuggestion>;
    /// Sets `status` and replaces `admin_notes`; `None` clears the notes.
    async fn update_suggestion_status(
        &self,
        id: i32,
        status: SuggestionStatus,
        admin_notes: Option<String>,
    ) -> StorageResult<Option<MovieSuggestion>>;
    async fn delete_suggestion(&self, id: i32) -> StorageResult<()>;

    async fn stats(&self) -> StorageResult<CatalogStats>;
}
