use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::{
    category_map, MutationResponse, NewQuestion, NewQuestionRequest, QuestionPageResponse,
    SearchRequest, SearchResponse,
};
use crate::routes::numeric_field;
use crate::AppState;

// Query parameters for listing questions
#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    page: i64,
}

fn default_page() -> i64 {
    1
}

// GET /questions?page=N - One page of questions plus the category mapping
pub async fn get_questions(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<QuestionPageResponse>, ApiError> {
    let Query(params) = query.map_err(|_| ApiError::BadRequest)?;

    if params.page < 1 {
        return Err(ApiError::Unprocessable);
    }

    let per_page = state.questions_per_page;
    let offset = (params.page - 1)
        .checked_mul(per_page)
        .ok_or(ApiError::NotFound)?;

    let questions = db::list_questions(&state.pool, per_page, offset).await?;

    // Also covers page 1 of an empty store
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    let total_questions = db::count_questions(&state.pool).await?;
    let categories = db::list_categories(&state.pool).await?;

    Ok(Json(QuestionPageResponse {
        success: true,
        questions,
        total_questions,
        categories: category_map(categories),
        message: "OK".to_string(),
    }))
}

// DELETE /questions/{id} - Remove one question
pub async fn delete_question(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Path(question_id) = path.map_err(|_| ApiError::NotFound)?;

    if question_id <= 0 {
        return Err(ApiError::Unprocessable);
    }

    if db::delete_question(&pool, question_id).await? == 0 {
        return Err(ApiError::NotFound);
    }

    tracing::info!("Deleted question {}", question_id);
    Ok(Json(MutationResponse::ok("OK")))
}

// POST /newquestions - Add a question
pub async fn create_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<NewQuestionRequest>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected question body: {}", rejection);
        ApiError::BadRequest
    })?;

    let new = validate_new_question(request)?;
    let id = db::create_question(&pool, &new).await?;
    tracing::info!("Created question {} in category {}", id, new.category);

    Ok(Json(MutationResponse::created("question inserted", id)))
}

/// All four fields must be present (400 otherwise). Category and difficulty
/// that are present but not integers are treated as a server-side failure (500).
fn validate_new_question(request: NewQuestionRequest) -> Result<NewQuestion, ApiError> {
    let question = non_blank(request.question).ok_or(ApiError::BadRequest)?;
    let answer = non_blank(request.answer).ok_or(ApiError::BadRequest)?;
    let category = request.category.ok_or(ApiError::BadRequest)?;
    let difficulty = request.difficulty.ok_or(ApiError::BadRequest)?;

    let category = numeric_field(&category).ok_or(ApiError::InternalError)?;
    let difficulty = numeric_field(&difficulty).ok_or(ApiError::InternalError)?;

    Ok(NewQuestion {
        question,
        answer,
        category,
        difficulty,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// POST /questions - Substring search on question text
pub async fn search_questions(
    State(pool): State<SqlitePool>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::BadRequest)?;
    let term = request.search_term.ok_or(ApiError::BadRequest)?;

    let questions = db::search_questions(&pool, &term).await?;

    if questions.is_empty() {
        tracing::debug!("No questions match {:?}", term);
        return Ok(Json(SearchResponse {
            success: false,
            questions: None,
            total_questions: None,
            message: "Not Found!".to_string(),
        }));
    }

    let total_questions = questions.len() as i64;
    Ok(Json(SearchResponse {
        success: true,
        questions: Some(questions),
        total_questions: Some(total_questions),
        message: "OK".to_string(),
    }))
}
