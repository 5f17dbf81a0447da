use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};
use crate::models::*;

/// Open a pool for `url`, creating the database file if needed.
///
/// In-memory databases live only as long as their connection, so those get a
/// single connection that is never recycled.
pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if url.contains(":memory:") || url.contains("mode=memory") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new()
    };

    pool_options.connect_with(options).await
}

/// Create the tables if they are not there yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS categories (
               id   INTEGER PRIMARY KEY AUTOINCREMENT,
               type TEXT NOT NULL
           )"#
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS questions (
               id         INTEGER PRIMARY KEY AUTOINCREMENT,
               question   TEXT NOT NULL,
               answer     TEXT NOT NULL,
               category   INTEGER NOT NULL REFERENCES categories(id),
               difficulty INTEGER NOT NULL
           )"#
    )
    .execute(pool)
    .await?;

    tracing::debug!("Schema ready.");
    Ok(())
}

// Category queries
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"SELECT id, type FROM categories ORDER BY id"#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, category_id: i64) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"SELECT id, type FROM categories WHERE id = ?"#
    )
    .bind(category_id)
    .fetch_optional(pool)
    .await
}

pub async fn create_category(pool: &SqlitePool, label: &str) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"INSERT INTO categories (type) VALUES (?)"#
    )
    .bind(label)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

// Question queries
pub async fn count_questions(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"SELECT COUNT(*) FROM questions"#
    )
    .fetch_one(pool)
    .await
}

/// One page of questions in insertion order.
pub async fn list_questions(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"SELECT id, question, answer, category, difficulty
           FROM questions
           ORDER BY id
           LIMIT ? OFFSET ?"#
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn list_questions_by_category(pool: &SqlitePool, category_id: i64) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"SELECT id, question, answer, category, difficulty
           FROM questions
           WHERE category = ?
           ORDER BY id"#
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_question(pool: &SqlitePool, question_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"DELETE FROM questions WHERE id = ?"#
    )
    .bind(question_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn create_question(pool: &SqlitePool, new: &NewQuestion) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"INSERT INTO questions (question, answer, category, difficulty)
           VALUES (?, ?, ?, ?)"#
    )
    .bind(&new.question)
    .bind(&new.answer)
    .bind(new.category)
    .bind(new.difficulty)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Substring search on the question text, case-insensitive over the full
/// Unicode range (SQLite `LIKE` only folds ASCII).
pub async fn search_questions(pool: &SqlitePool, term: &str) -> Result<Vec<Question>, sqlx::Error> {
    let needle = term.to_lowercase();

    let questions = sqlx::query_as::<_, Question>(
        r#"SELECT id, question, answer, category, difficulty
           FROM questions
           ORDER BY id"#
    )
    .fetch_all(pool)
    .await?;

    Ok(questions
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect())
}

/// Cheap round trip used by the health probe.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>(r#"SELECT 1"#)
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Questions in `category_id` that are not in `previous`.
pub async fn list_quiz_candidates(
    pool: &SqlitePool,
    category_id: i64,
    previous: &[i64],
) -> Result<Vec<Question>, sqlx::Error> {
    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT id, question, answer, category, difficulty FROM questions WHERE category = ",
    );
    query.push_bind(category_id);

    if !previous.is_empty() {
        query.push(" AND id NOT IN (");
        let mut ids = query.separated(", ");
        for id in previous {
            ids.push_bind(*id);
        }
        ids.push_unseparated(")");
    }

    query.push(" ORDER BY id");

    query.build_query_as::<Question>().fetch_all(pool).await
}
