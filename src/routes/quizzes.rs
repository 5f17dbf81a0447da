use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use rand::seq::SliceRandom;
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::{QuizRequest, QuizResponse};
use crate::routes::numeric_field;

// POST /quizzes - Next quiz question for a category
//
// Body: {"quiz_category": {"id": 5, "type": "History"}, "previous_questions": [5]}
//
// The category must exist and its stored type must match the one sent. Once
// every question has been played the response is still a success, with a
// null question.
pub async fn play_quiz(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::BadRequest)?;

    let (Some(quiz_category), Some(previous)) = (request.quiz_category, request.previous_questions)
    else {
        return Err(ApiError::BadRequest);
    };

    let category_id = numeric_field(&quiz_category.id).ok_or(ApiError::BadRequest)?;
    let previous: Vec<i64> = previous
        .iter()
        .map(numeric_field)
        .collect::<Option<_>>()
        .ok_or(ApiError::BadRequest)?;

    let category = db::get_category(&pool, category_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    if category.kind != quiz_category.kind {
        tracing::debug!(
            "Quiz category {} is {:?}, client sent {:?}",
            category_id,
            category.kind,
            quiz_category.kind
        );
        return Err(ApiError::NotFound);
    }

    let candidates = db::list_quiz_candidates(&pool, category_id, &previous).await?;
    let question = candidates.choose(&mut rand::thread_rng()).cloned();

    if question.is_none() {
        tracing::debug!("Category {} has no questions left to play", category_id);
    }

    Ok(Json(QuizResponse {
        success: true,
        message: "OK".to_string(),
        question,
    }))
}
