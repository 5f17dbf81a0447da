use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::{
    category_map, CategoriesResponse, CategoryQuestionsResponse, MutationResponse,
    NewCategoryRequest,
};

// GET /categories - All categories as an id -> type mapping
pub async fn get_categories(
    State(pool): State<SqlitePool>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = db::list_categories(&pool).await?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(categories),
        message: "OK".to_string(),
    }))
}

// GET /categories/{id}/questions - Questions in one category
//
// A non-positive id is a well-formed but invalid value (422); an id with no
// category behind it is a 404.
pub async fn get_category_questions(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let Path(category_id) = path.map_err(|_| ApiError::NotFound)?;

    if category_id <= 0 {
        return Err(ApiError::Unprocessable);
    }

    db::get_category(&pool, category_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let questions = db::list_questions_by_category(&pool, category_id).await?;
    let total_questions = questions.len() as i64;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions,
        total_questions,
        current_category: category_id,
        message: "OK".to_string(),
    }))
}

// POST /newcategories - Add a category
//
// A missing or malformed body is reported as a 500, the same way
// malformed question fields are.
pub async fn create_category(
    State(pool): State<SqlitePool>,
    payload: Result<Json<NewCategoryRequest>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected category body: {}", rejection);
        ApiError::InternalError
    })?;

    let label = request
        .category
        .as_deref()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .ok_or(ApiError::InternalError)?;

    let id = db::create_category(&pool, label).await?;
    tracing::info!("Created category {} ({})", id, label);

    Ok(Json(MutationResponse::created("OK", id)))
}
