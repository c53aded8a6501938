//! Process-local [`Storage`] backed by ordered maps.
//!
//! Cascade deletes scan the child collection linearly; catalogs are small
//! enough that a parent -> children index is not worth maintaining.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Collection, Storage, StorageError, StorageResult, seed};
use crate::models::{
    Anime, AnimeEpisode, AnimePatch, CatalogStats, Episode, Genre, GenreCategory, Movie,
    MoviePatch, MovieSuggestion, NewAnime, NewAnimeEpisode, NewEpisode, NewGenre, NewMovie,
    NewMovieSuggestion, NewSeries, NewUser, Series, SeriesPatch, SuggestionStatus, User,
};

#[derive(Debug, Default)]
struct Catalog {
    users: Collection<User>,
    genres: Collection<Genre>,
    movies: Collection<Movie>,
    series: Collection<Series>,
    episodes: Collection<Episode>,
    anime: Collection<Anime>,
    anime_episodes: Collection<AnimeEpisode>,
    suggestions: Collection<MovieSuggestion>,
}

#[derive(Debug)]
pub struct MemStorage {
    catalog: RwLock<Catalog>,
}

impl MemStorage {
    /// Empty store pre-populated with the default genres.
    #[must_use]
    pub fn new() -> Self {
        let mut catalog = Catalog::default();
        for genre in seed::default_genres() {
            // A fresh collection has the whole id range ahead of it.
            catalog.genres.insert_with(|id| genre.into_record(id)).ok();
        }

        Self {
            catalog: RwLock::new(catalog),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        Ok(self.catalog.read().await.users.get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(self
            .catalog
            .read()
            .await
            .users
            .find(|u| u.username == username))
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let mut catalog = self.catalog.write().await;
        if catalog.users.find(|u| u.username == user.username).is_some() {
            return Err(StorageError::UsernameTaken(user.username));
        }
        catalog.users.insert_with(|id| user.into_record(id))
    }

    async fn list_genres(&self) -> StorageResult<Vec<Genre>> {
        Ok(self.catalog.read().await.genres.all())
    }

    async fn list_genres_by_category(&self, category: GenreCategory) -> StorageResult<Vec<Genre>> {
        Ok(self
            .catalog
            .read()
            .await
            .genres
            .filter(|g| g.category == category))
    }

    async fn create_genre(&self, genre: NewGenre) -> StorageResult<Genre> {
        self
            .catalog
            .write()
            .await
            .genres
            .insert_with(|id| genre.into_record(id))
    }

    async fn delete_genre(&self, id: i32) -> StorageResult<()> {
        self.catalog.write().await.genres.remove(id);
        Ok(())
    }

    async fn list_movies(&self) -> StorageResult<Vec<Movie>> {
        Ok(self.catalog.read().await.movies.all())
    }

    async fn get_movie(&self, id: i32) -> StorageResult<Option<Movie>> {
        Ok(self.catalog.read().await.movies.get(id))
    }

    async fn create_movie(&self, movie: NewMovie) -> StorageResult<Movie> {
        let now = Utc::now();
        self
            .catalog
            .write()
            .await
            .movies
            .insert_with(|id| movie.into_record(id, now))
    }

    async fn update_movie(&self, id: i32, patch: MoviePatch) -> StorageResult<Option<Movie>> {
        Ok(self
            .catalog
            .write()
            .await
            .movies
            .update(id, |movie| patch.apply(movie)))
    }

    async fn delete_movie(&self, id: i32) -> StorageResult<()> {
        self.catalog.write().await.movies.remove(id);
        Ok(())
    }

    async fn list_series(&self) -> StorageResult<Vec<Series>> {
        Ok(self.catalog.read().await.series.all())
    }

    async fn get_series(&self, id: i32) -> StorageResult<Option<Series>> {
        Ok(self.catalog.read().await.series.get(id))
    }

    async fn create_series(&self, series: NewSeries) -> StorageResult<Series> {
        let now = Utc::now();
        self
            .catalog
            .write()
            .await
            .series
            .insert_with(|id| series.into_record(id, now))
    }

    async fn update_series(&self, id: i32, patch: SeriesPatch) -> StorageResult<Option<Series>> {
        Ok(self
            .catalog
            .write()
            .await
            .series
            .update(id, |series| patch.apply(series)))
    }

    async fn delete_series(&self, id: i32) -> StorageResult<()> {
        let mut catalog = self.catalog.write().await;
        catalog.series.remove(id);
        let removed = catalog
            .episodes
            .remove_where(|episode| episode.series_id == Some(id));
        debug!(series_id = id, episodes = removed, "Deleted series");
        Ok(())
    }

    async fn list_episodes_by_series(&self, series_id: i32) -> StorageResult<Vec<Episode>> {
        Ok(self
            .catalog
            .read()
            .await
            .episodes
            .filter(|e| e.series_id == Some(series_id)))
    }

    async fn create_episode(&self, episode: NewEpisode) -> StorageResult<Episode> {
        let now = Utc::now();
        self
            .catalog
            .write()
            .await
            .episodes
            .insert_with(|id| episode.into_record(id, now))
    }

    async fn delete_episode(&self, id: i32) -> StorageResult<()> {
        self.catalog.write().await.episodes.remove(id);
        Ok(())
    }

    async fn list_anime(&self) -> StorageResult<Vec<Anime>> {
        Ok(self.catalog.read().await.anime.all())
    }

    async fn get_anime(&self, id: i32) -> StorageResult<Option<Anime>> {
        Ok(self.catalog.read().await.anime.get(id))
    }

    async fn create_anime(&self, anime: NewAnime) -> StorageResult<Anime> {
        let now = Utc::now();
        self
            .catalog
            .write()
            .await
            .anime
            .insert_with(|id| anime.into_record(id, now))
    }

    async fn update_anime(&self, id: i32, patch: AnimePatch) -> StorageResult<Option<Anime>> {
        Ok(self
            .catalog
            .write()
            .await
            .anime
            .update(id, |anime| patch.apply(anime)))
    }

    async fn delete_anime(&self, id: i32) -> StorageResult<()> {
        let mut catalog = self.catalog.write().await;
        catalog.anime.remove(id);
        let removed = catalog
            .anime_episodes
            .remove_where(|episode| episode.anime_id == Some(id));
        debug!(anime_id = id, episodes = removed, "Deleted anime");
        Ok(())
    }

    async fn list_anime_episodes_by_anime(
        &self,
        anime_id: i32,
    ) -> StorageResult<Vec<AnimeEpisode>> {
        Ok(self
            .catalog
            .read()
            .await
            .anime_episodes
            .filter(|e| e.anime_id == Some(anime_id)))
    }

    async fn create_anime_episode(&self, episode: NewAnimeEpisode) -> StorageResult<AnimeEpisode> {
        let now = Utc::now();
        self
            .catalog
            .write()
            .await
            .anime_episodes
            .insert_with(|id| episode.into_record(id, now))
    }

    async fn delete_anime_episode(&self, id: i32) -> StorageResult<()> {
        self.catalog.write().await.anime_episodes.remove(id);
        Ok(())
    }

    async fn list_suggestions(&self) -> StorageResult<Vec<MovieSuggestion>> {
        Ok(self.catalog.read().await.suggestions.all())
    }

    async fn create_suggestion(
        &self,
        suggestion: NewMovieSuggestion,
    ) -> StorageResult<MovieSuggestion> {
        let now = Utc::now();
        self
            .catalog
            .write()
            .await
            .suggestions
            .insert_with(|id| suggestion.into_record(id, now))
    }

    async fn update_suggestion_status(
        &self,
        id: i32,
        status: SuggestionStatus,
        admin_notes: Option<String>,
    ) -> StorageResult<Option<MovieSuggestion>> {
        Ok(self
            .catalog
            .write()
            .await
            .suggestions
            .update(id, |suggestion| {
                suggestion.status = status;
                suggestion.admin_notes = admin_notes;
            }))
    }

    async fn delete_suggestion(&self, id: i32) -> StorageResult<()> {
        self.catalog.write().await.suggestions.remove(id);
        Ok(())
    }

    async fn stats(&self) -> StorageResult<CatalogStats> {
        let catalog = self.catalog.read().await;
        Ok(CatalogStats {
            movies: catalog.movies.len(),
            series: catalog.series.len(),
            anime: catalog.anime.len(),
            genres: catalog.genres.len(),
            suggestions: catalog
                .suggestions
                .count(|s| s.status == SuggestionStatus::Pending),
        })
    }
}
