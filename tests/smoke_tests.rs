//! Smoke tests for the multipart flows the admin UI uses.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use async_trait::async_trait;
use cinedex::config::Config;
use cinedex::db::{MemStorage, SharedStorage, Storage, StorageResult};
use cinedex::models::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "cinedex-smoke-boundary";

/// Deletes a movie right before updating it, the way a concurrent DELETE
/// landing between the handler's existence check and its update would.
struct VanishingMovies(MemStorage);

#[async_trait]
impl Storage for VanishingMovies {
    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        self.0.get_user(id).await
    }
    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        self.0.get_user_by_username(username).await
    }
    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        self.0.create_user(user).await
    }

    async fn list_genres(&self) -> StorageResult<Vec<Genre>> {
        self.0.list_genres().await
    }
    async fn list_genres_by_category(&self, category: GenreCategory) -> StorageResult<Vec<Genre>> {
        self.0.list_genres_by_category(category).await
    }
    async fn create_genre(&self, genre: NewGenre) -> StorageResult<Genre> {
        self.0.create_genre(genre).await
    }
    async fn delete_genre(&self, id: i32) -> StorageResult<()> {
        self.0.delete_genre(id).await
    }

    async fn list_movies(&self) -> StorageResult<Vec<Movie>> {
        self.0.list_movies().await
    }
    async fn get_movie(&self, id: i32) -> StorageResult<Option<Movie>> {
        self.0.get_movie(id).await
    }
    async fn create_movie(&self, movie: NewMovie) -> StorageResult<Movie> {
        self.0.create_movie(movie).await
    }
    async fn update_movie(&self, id: i32, patch: MoviePatch) -> StorageResult<Option<Movie>> {
        self.0.delete_movie(id).await?;
        self.0.update_movie(id, patch).await
    }
    async fn delete_movie(&self, id: i32) -> StorageResult<()> {
        self.0.delete_movie(id).await
    }

    async fn list_series(&self) -> StorageResult<Vec<Series>> {
        self.0.list_series().await
    }
    async fn get_series(&self, id: i32) -> StorageResult<Option<Series>> {
        self.0.get_series(id).await
    }
    async fn create_series(&self, series: NewSeries) -> StorageResult<Series> {
        self.0.create_series(series).await
    }
    async fn update_series(&self, id: i32, patch: SeriesPatch) -> StorageResult<Option<Series>> {
        self.0.update_series(id, patch).await
    }
    async fn delete_series(&self, id: i32) -> StorageResult<()> {
        self.0.delete_series(id).await
    }

    async fn list_episodes_by_series(&self, series_id: i32) -> StorageResult<Vec<Episode>> {
        self.0.list_episodes_by_series(series_id).await
    }
    async fn create_episode(&self, episode: NewEpisode) -> StorageResult<Episode> {
        self.0.create_episode(episode).await
    }
    async fn delete_episode(&self, id: i32) -> StorageResult<()> {
        self.0.delete_episode(id).await
    }

    async fn list_anime(&self) -> StorageResult<Vec<Anime>> {
        self.0.list_anime().await
    }
    async fn get_anime(&self, id: i32) -> StorageResult<Option<Anime>> {
        self.0.get_anime(id).await
    }
    async fn create_anime(&self, anime: NewAnime) -> StorageResult<Anime> {
        self.0.create_anime(anime).await
    }
    async fn update_anime(&self, id: i32, patch: AnimePatch) -> StorageResult<Option<Anime>> {
        self.0.update_anime(id, patch).await
    }
    async fn delete_anime(&self, id: i32) -> StorageResult<()> {
        self.0.delete_anime(id).await
    }

    async fn list_anime_episodes_by_anime(
        &self,
        anime_id: i32,
    ) -> StorageResult<Vec<AnimeEpisode>> {
        self.0.list_anime_episodes_by_anime(anime_id).await
    }
    async fn create_anime_episode(&self, episode: NewAnimeEpisode) -> StorageResult<AnimeEpisode> {
        self.0.create_anime_episode(episode).await
    }
    async fn delete_anime_episode(&self, id: i32) -> StorageResult<()> {
        self.0.delete_anime_episode(id).await
    }

    async fn list_suggestions(&self) -> StorageResult<Vec<MovieSuggestion>> {
        self.0.list_suggestions().await
    }
    async fn create_suggestion(
        &self,
        suggestion: NewMovieSuggestion,
    ) -> StorageResult<MovieSuggestion> {
        self.0.create_suggestion(suggestion).await
    }
    async fn update_suggestion_status(
        &self,
        id: i32,
        status: SuggestionStatus,
        admin_notes: Option<String>,
    ) -> StorageResult<Option<MovieSuggestion>> {
        self.0.update_suggestion_status(id, status, admin_notes).await
    }
    async fn delete_suggestion(&self, id: i32) -> StorageResult<()> {
        self.0.delete_suggestion(id).await
    }

    async fn stats(&self) -> StorageResult<CatalogStats> {
        self.0.stats().await
    }
}

struct TestApp {
    router: Router,
    cookie: String,
    upload_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

async fn spawn_app_with_limit(max_file_size_bytes: usize) -> TestApp {
    spawn_app_with(max_file_size_bytes, Arc::new(MemStorage::new())).await
}

async fn spawn_app_with(max_file_size_bytes: usize, storage: SharedStorage) -> TestApp {
    let upload_dir =
        std::env::temp_dir().join(format!("cinedex-smoke-test-{}", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.server.secure_cookies = false;
    config.uploads.directory = upload_dir.display().to_string();
    config.uploads.max_file_size_bytes = max_file_size_bytes;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config.auth.admin_username = Some("admin".to_string());
    config.auth.admin_password = Some("admin-pass".to_string());

    let state = Arc::new(cinedex::AppState::with_storage(config, storage, None));
    let (username, password) = state.config.admin_credentials().unwrap();
    state.auth.ensure_admin(username, password).await.unwrap();

    let router = cinedex::api::router(state.clone());

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/login")
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(Body::from(
                    json!({"username": "admin", "password": "admin-pass"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    TestApp {
        router,
        cookie,
        upload_dir,
    }
}

async fn spawn_app() -> TestApp {
    spawn_app_with_limit(1024 * 1024).await
}

struct FilePart<'a> {
    field: &'a str,
    file_name: &'a str,
    content_type: &'a str,
    data: &'a [u8],
}

fn multipart_body(fields: &[(&str, &str)], files: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for file in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

impl TestApp {
    async fn multipart(
        &self,
        method: &str,
        uri: &str,
        fields: &[(&str, &str)],
        files: &[FilePart<'_>],
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, &self.cookie)
            .header(
                header::CONTENT_TYPE,
                format!("{}; boundary={BOUNDARY}", mime::MULTIPART_FORM_DATA),
            )
            .body(Body::from(multipart_body(fields, files)))
            .unwrap();
        self.call(request).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::COOKIE, &self.cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn test_movie_with_thumbnail_upload() {
    let app = spawn_app().await;
    let png = b"\x89PNG\r\n\x1a\nfake-image";

    let (status, movie) = app
        .multipart(
            "POST",
            "/api/movies",
            &[
                ("title", "Inception"),
                ("year", "2010"),
                ("genre", "Sci-Fi"),
                ("rating", ""),
                ("thumbnailUrl", "https://elsewhere.example/cover.png"),
            ],
            &[FilePart {
                field: "thumbnail",
                file_name: "cover.png",
                content_type: mime::IMAGE_PNG.as_ref(),
                data: png,
            }],
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(movie["year"], 2010);
    assert!(movie["rating"].is_null());

    let url = movie["thumbnailUrl"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".png"));

    let (status, served) = app.get(url).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served, png);
}

#[tokio::test]
async fn test_update_replaces_thumbnail_and_keeps_fields() {
    let app = spawn_app().await;

    let (_, series) = app
        .multipart(
            "POST",
            "/api/series",
            &[
                ("title", "Dark"),
                ("startYear", "2017"),
                ("genre", "Mystery"),
                ("status", "completed"),
            ],
            &[],
        )
        .await;
    assert!(series["thumbnailUrl"].is_null());
    let uri = format!("/api/series/{}", series["id"]);

    let (status, updated) = app
        .multipart(
            "PUT",
            &uri,
            &[("description", "Winden, 1986 and 2019")],
            &[FilePart {
                field: "thumbnail",
                file_name: "dark.jpg",
                content_type: mime::IMAGE_JPEG.as_ref(),
                data: b"jpeg-bytes",
            }],
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Dark");
    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["description"], "Winden, 1986 and 2019");
    assert!(updated["thumbnailUrl"].as_str().unwrap().ends_with(".jpg"));
}

#[tokio::test]
async fn test_update_missing_record_writes_no_file() {
    let app = spawn_app().await;

    let (status, body) = app
        .multipart(
            "PUT",
            "/api/anime/42",
            &[("title", "Ghost")],
            &[FilePart {
                field: "thumbnail",
                file_name: "ghost.png",
                content_type: mime::IMAGE_PNG.as_ref(),
                data: b"png-bytes",
            }],
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);
    assert!(!app.upload_dir.exists());
}

#[tokio::test]
async fn test_record_deleted_mid_update_leaves_no_file() {
    let app = spawn_app_with(1024 * 1024, Arc::new(VanishingMovies(MemStorage::new()))).await;

    let (status, movie) = app
        .multipart(
            "POST",
            "/api/movies",
            &[("title", "Heat"), ("year", "1995"), ("genre", "Thriller")],
            &[],
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .multipart(
            "PUT",
            &format!("/api/movies/{}", movie["id"]),
            &[("rating", "R")],
            &[FilePart {
                field: "thumbnail",
                file_name: "heat.png",
                content_type: mime::IMAGE_PNG.as_ref(),
                data: b"png-bytes",
            }],
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);
    let leftovers = std::fs::read_dir(&app.upload_dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_episode_subtitle_upload_overrides_link() {
    let app = spawn_app().await;

    let (_, series) = app
        .multipart(
            "POST",
            "/api/series",
            &[
                ("title", "Twin Peaks"),
                ("startYear", "1990"),
                ("genre", "Mystery"),
                ("status", "hiatus"),
            ],
            &[],
        )
        .await;
    let series_id = series["id"].to_string();

    let (status, episode) = app
        .multipart(
            "POST",
            "/api/episodes",
            &[
                ("seriesId", series_id.as_str()),
                ("seasonNumber", "1"),
                ("episodeNumber", "0"),
                ("title", "Pilot"),
                ("duration", ""),
                ("subtitleLink", "https://subs.example/pilot.srt"),
            ],
            &[FilePart {
                field: "subtitle",
                file_name: "pilot.vtt",
                content_type: "text/vtt",
                data: b"WEBVTT\n\n00:00.000 --> 00:01.000\nHello",
            }],
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(episode["episodeNumber"], 0);
    assert!(episode["duration"].is_null());
    let subtitle = episode["subtitleLink"].as_str().unwrap();
    assert!(subtitle.starts_with("/uploads/"));
    assert!(subtitle.ends_with(".vtt"));
}

#[tokio::test]
async fn test_oversized_upload_is_rejected_without_a_record() {
    let app = spawn_app_with_limit(16).await;

    let (status, body) = app
        .multipart(
            "POST",
            "/api/anime",
            &[("title", "Akira"), ("year", "1988"), ("genre", "Sci-Fi")],
            &[FilePart {
                field: "thumbnail",
                file_name: "akira.png",
                content_type: mime::IMAGE_PNG.as_ref(),
                data: &[0u8; 64],
            }],
        )
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body, json!({"error": "File too large"}));

    let (_, anime) = app.get("/api/anime").await;
    assert_eq!(serde_json::from_slice::<Value>(&anime).unwrap(), json!([]));
}

#[tokio::test]
async fn test_invalid_form_does_not_store_file() {
    let app = spawn_app().await;

    let (status, body) = app
        .multipart(
            "POST",
            "/api/movies",
            &[("title", "No Year"), ("genre", "Drama")],
            &[FilePart {
                field: "thumbnail",
                file_name: "cover.png",
                content_type: mime::IMAGE_PNG.as_ref(),
                data: b"png-bytes",
            }],
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid movie data"}));
    assert!(!app.upload_dir.exists());
}

#[tokio::test]
async fn test_metrics_endpoint_without_recorder() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Metrics not enabled");
}
