use axum::{
    extract::FromRef,
    routing::{delete, get, post},
    Router,
};
use sqlx::sqlite::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

pub use config::Config;
pub use error::ApiError;

/// Shared handler state: the store pool plus request-shaping settings.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub questions_per_page: i64,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        AppState {
            pool,
            questions_per_page: config.questions_per_page,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

pub fn build_router(state: AppState) -> Router {
    // The quiz frontend is served from its own origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Trivia API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // Category endpoints
        .route(
            "/categories",
            get(routes::categories::get_categories).fallback(error::method_not_allowed),
        )
        .route(
            "/categories/{id}/questions",
            get(routes::categories::get_category_questions).fallback(error::method_not_allowed),
        )
        .route(
            "/newcategories",
            post(routes::categories::create_category).fallback(error::method_not_allowed),
        )

        // Question endpoints
        .route(
            "/questions",
            get(routes::questions::get_questions)
                .post(routes::questions::search_questions)
                .fallback(error::method_not_allowed),
        )
        .route(
            "/questions/{id}",
            delete(routes::questions::delete_question).fallback(error::method_not_allowed),
        )
        .route(
            "/newquestions",
            post(routes::questions::create_question).fallback(error::method_not_allowed),
        )

        // Quiz endpoint
        .route(
            "/quizzes",
            post(routes::quizzes::play_quiz).fallback(error::method_not_allowed),
        )

        .fallback(error::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
