#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePool;
use tower::ServiceExt;
use trivia_api::{build_router, db, models::NewQuestion, AppState, Config};

/// Category labels in insertion order, so `CATEGORIES[i]` has id `i + 1`.
pub const CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "Entertainment",
    "History",
    "Sports",
];

pub const HISTORY: i64 = 5;
pub const SPORTS: i64 = 6;

/// (question, answer, category id, difficulty)
const QUESTIONS: [(&str, &str, i64, i64); 12] = [
    ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
    ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
    ("Which Dutch graphic artist created Relativity?", "Escher", 2, 1),
    ("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
    ("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    ("What is the capital city of Tunisia?", "Tunis", 3, 1),
    ("What movie earned Tom Hanks his third straight Oscar nomination?", "Apollo 13", 4, 4),
    ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 5, 2),
    ("Who invented Peanut Butter?", "George Washington Carver", 5, 2),
    ("Which country hosted Carthage?", "Tunisia", 5, 3),
    ("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
    ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
];

pub fn question_count() -> i64 {
    QUESTIONS.len() as i64
}

pub async fn empty_pool() -> SqlitePool {
    let pool = db::connect("sqlite::memory:").await.unwrap();
    db::init_schema(&pool).await.unwrap();
    pool
}

pub async fn seeded_pool() -> SqlitePool {
    let pool = empty_pool().await;

    for label in CATEGORIES {
        db::create_category(&pool, label).await.unwrap();
    }

    for (question, answer, category, difficulty) in QUESTIONS {
        let new = NewQuestion {
            question: question.to_string(),
            answer: answer.to_string(),
            category,
            difficulty,
        };
        db::create_question(&pool, &new).await.unwrap();
    }

    pool
}

pub fn app(pool: SqlitePool) -> Router {
    build_router(AppState::new(pool, &Config::default()))
}

pub async fn seeded_app() -> (Router, SqlitePool) {
    let pool = seeded_pool().await;
    (app(pool.clone()), pool)
}

/// Sends one request through the router and decodes the JSON body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}
