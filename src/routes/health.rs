use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::models::HealthResponse;

// GET /health - Liveness plus store reachability
//
// 503 with `status: "degraded"` when the store does not answer.
pub async fn health_check(
    State(pool): State<SqlitePool>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = match db::ping(&pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check could not reach the store: {}", e);
            false
        }
    };

    let (status, label) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let response = HealthResponse {
        status: label.to_string(),
        database,
        timestamp: chrono::Utc::now().timestamp(),
    };

    (status, Json(response))
}
