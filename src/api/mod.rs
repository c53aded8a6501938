use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};

use crate::constants::uploads::{FORM_OVERHEAD_BYTES, PUBLIC_PREFIX};

mod anime;
pub mod auth;
mod episodes;
mod error;
mod form;
mod genres;
mod movies;
mod observability;
mod params;
mod series;
mod stats;
mod suggestions;
mod validation;

pub use crate::state::AppState;
pub use error::{ApiError, ErrorBody};
pub use form::EntityForm;
pub use validation::{Validate, ValidationError};

pub fn router(state: Arc<AppState>) -> Router {
    let config = state.config.clone();

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            config.server.session_inactivity_minutes,
        )));

    let body_limit = state.uploads.max_file_size() + FORM_OVERHEAD_BYTES;

    let api_router = Router::new()
        .merge(create_protected_router(state.clone()))
        // Visitors may submit suggestions without an account. Merges into
        // the same path as the protected GET, outside its auth layer.
        .route("/movie-suggestions", post(suggestions::create_suggestion))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::current_user))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(session_layer)
        .with_state(state.clone());

    let cors_origins = &config.server.cors_allowed_origins;
    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
    };

    Router::new()
        .nest("/api", api_router)
        .nest_service(PUBLIC_PREFIX, ServeDir::new(state.uploads.directory()))
        .layer(
            cors_layer
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats", get(stats::get_stats))
        .route(
            "/genres",
            get(genres::list_genres).post(genres::create_genre),
        )
        // GET takes a category name, DELETE a numeric id
        .route(
            "/genres/{key}",
            get(genres::list_genres_by_category).delete(genres::delete_genre),
        )
        .route(
            "/movies",
            get(movies::list_movies).post(movies::create_movie),
        )
        .route(
            "/movies/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route(
            "/series",
            get(series::list_series).post(series::create_series),
        )
        .route(
            "/series/{id}",
            get(series::get_series)
                .put(series::update_series)
                .delete(series::delete_series),
        )
        .route("/series/{id}/episodes", get(series::list_episodes))
        .route("/episodes", post(episodes::create_episode))
        .route("/episodes/{id}", delete(episodes::delete_episode))
        .route("/anime", get(anime::list_anime).post(anime::create_anime))
        .route(
            "/anime/{id}",
            get(anime::get_anime)
                .put(anime::update_anime)
                .delete(anime::delete_anime),
        )
        .route("/anime/{id}/episodes", get(anime::list_episodes))
        .route("/anime-episodes", post(episodes::create_anime_episode))
        .route(
            "/anime-episodes/{id}",
            delete(episodes::delete_anime_episode),
        )
        .route("/movie-suggestions", get(suggestions::list_suggestions))
        .route(
            "/movie-suggestions/internal",
            post(suggestions::create_suggestion),
        )
        .route(
            "/movie-suggestions/{id}",
            put(suggestions::update_suggestion)
                .delete(suggestions::delete_suggestion),
        )
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
